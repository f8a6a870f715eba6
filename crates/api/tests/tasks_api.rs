//! HTTP-level integration tests for the standalone task family:
//! `/tasks`, `/projects`, `/tags`, and the `/tasks/{task_id}/tags`
//! sub-resource.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, patch_json, post_json};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

async fn create_user(pool: &PgPool, username: &str) -> i64 {
    let app = common::build_test_app(pool.clone());
    let json = body_json(
        post_json(app, "/api/v1/users", serde_json::json!({"username": username})).await,
    )
    .await;
    json["id"].as_i64().unwrap()
}

async fn create_task(pool: &PgPool, title: &str, created_by: i64) -> i64 {
    let app = common::build_test_app(pool.clone());
    let json = body_json(
        post_json(
            app,
            "/api/v1/tasks",
            serde_json::json!({"title": title, "created_by": created_by}),
        )
        .await,
    )
    .await;
    json["id"].as_i64().unwrap()
}

async fn create_tag(pool: &PgPool, name: &str) -> i64 {
    let app = common::build_test_app(pool.clone());
    let json = body_json(
        post_json(app, "/api/v1/tags", serde_json::json!({"name": name})).await,
    )
    .await;
    json["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Task CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_task_with_defaults(pool: PgPool) {
    let user = create_user(&pool, "maker").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/tasks",
        serde_json::json!({"title": "Write report", "created_by": user}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["title"], "Write report");
    assert_eq!(json["status"], "pending");
    assert_eq!(json["priority"], "medium");
    assert_eq!(json["is_locked"], false);
    assert_eq!(json["created_by"], user);
    assert_eq!(json["project"], serde_json::Value::Null);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_task_with_unknown_creator_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/tasks",
        serde_json::json!({"title": "Orphan", "created_by": 999999}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_task_filter_by_status(pool: PgPool) {
    let user = create_user(&pool, "filterer").await;
    let done = create_task(&pool, "Done", user).await;
    create_task(&pool, "Open", user).await;

    let app = common::build_test_app(pool.clone());
    patch_json(
        app,
        &format!("/api/v1/tasks/{done}"),
        serde_json::json!({"status": "completed"}),
    )
    .await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/tasks?status=completed").await;
    let json = body_json(response).await;
    assert_eq!(json["count"], 1);
    assert_eq!(json["results"][0]["title"], "Done");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_task_search_matches_title(pool: PgPool) {
    let user = create_user(&pool, "searcher").await;
    create_task(&pool, "Deploy staging", user).await;
    create_task(&pool, "Water plants", user).await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/tasks?search=staging").await;
    let json = body_json(response).await;
    assert_eq!(json["count"], 1);
    assert_eq!(json["results"][0]["title"], "Deploy staging");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_patch_null_unassigns_task(pool: PgPool) {
    let creator = create_user(&pool, "owner").await;
    let assignee = create_user(&pool, "helper").await;

    let app = common::build_test_app(pool.clone());
    let task = body_json(
        post_json(
            app,
            "/api/v1/tasks",
            serde_json::json!({
                "title": "Handover",
                "created_by": creator,
                "assigned_to": assignee,
                "due_date": "2026-09-01T00:00:00Z",
            }),
        )
        .await,
    )
    .await;
    let id = task["id"].as_i64().unwrap();
    assert_eq!(task["assigned_to"], assignee);

    // An explicit null unassigns; the omitted due_date is untouched.
    let app = common::build_test_app(pool.clone());
    let response = patch_json(
        app,
        &format!("/api/v1/tasks/{id}"),
        serde_json::json!({"assigned_to": null}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["assigned_to"], serde_json::Value::Null);
    assert!(json["due_date"].is_string());

    let app = common::build_test_app(pool);
    let response = patch_json(
        app,
        &format!("/api/v1/tasks/{id}"),
        serde_json::json!({"due_date": null}),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["due_date"], serde_json::Value::Null);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_patch_null_detaches_task_from_project(pool: PgPool) {
    let user = create_user(&pool, "mover").await;
    let app = common::build_test_app(pool.clone());
    let project = body_json(
        post_json(app, "/api/v1/projects", serde_json::json!({"name": "Sprint 9"})).await,
    )
    .await;
    let project_id = project["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let task = body_json(
        post_json(
            app,
            "/api/v1/tasks",
            serde_json::json!({"title": "Roaming", "created_by": user, "project": project_id}),
        )
        .await,
    )
    .await;
    let task_id = task["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let json = body_json(
        patch_json(
            app,
            &format!("/api/v1/tasks/{task_id}"),
            serde_json::json!({"project": null}),
        )
        .await,
    )
    .await;
    assert_eq!(json["project"], serde_json::Value::Null);
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_project_crud_roundtrip(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let created = body_json(
        post_json(
            app,
            "/api/v1/projects",
            serde_json::json!({"name": "Migration", "description": "Move to the new stack"}),
        )
        .await,
    )
    .await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["name"], "Migration");

    let app = common::build_test_app(pool.clone());
    let response = patch_json(
        app,
        &format!("/api/v1/projects/{id}"),
        serde_json::json!({"name": "Migration v2"}),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["name"], "Migration v2");
    assert_eq!(json["description"], "Move to the new stack");

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/projects/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/projects/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_patch_null_clears_project_description(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let created = body_json(
        post_json(
            app,
            "/api/v1/projects",
            serde_json::json!({"name": "Docs", "description": "Interim notes"}),
        )
        .await,
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let json = body_json(
        patch_json(
            app,
            &format!("/api/v1/projects/{id}"),
            serde_json::json!({"description": null}),
        )
        .await,
    )
    .await;
    assert_eq!(json["description"], serde_json::Value::Null);
    assert_eq!(json["name"], "Docs");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_project_detaches_tasks(pool: PgPool) {
    let user = create_user(&pool, "detacher").await;
    let app = common::build_test_app(pool.clone());
    let project = body_json(
        post_json(app, "/api/v1/projects", serde_json::json!({"name": "Temp"})).await,
    )
    .await;
    let project_id = project["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let task = body_json(
        post_json(
            app,
            "/api/v1/tasks",
            serde_json::json!({"title": "Attached", "created_by": user, "project": project_id}),
        )
        .await,
    )
    .await;
    let task_id = task["id"].as_i64().unwrap();
    assert_eq!(task["project"], project_id);

    let app = common::build_test_app(pool.clone());
    delete(app, &format!("/api/v1/projects/{project_id}")).await;

    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("/api/v1/tasks/{task_id}")).await).await;
    assert_eq!(json["project"], serde_json::Value::Null);
}

// ---------------------------------------------------------------------------
// Tags and task-tag associations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_duplicate_tag_name_returns_409(pool: PgPool) {
    create_tag(&pool, "backend").await;

    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/tags", serde_json::json!({"name": "backend"})).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_apply_and_list_task_tags(pool: PgPool) {
    let user = create_user(&pool, "labeller").await;
    let task = create_task(&pool, "Label me", user).await;
    let tag_b = create_tag(&pool, "beta").await;
    let tag_a = create_tag(&pool, "alpha").await;

    for tag in [tag_b, tag_a] {
        let app = common::build_test_app(pool.clone());
        let response = post_json(
            app,
            &format!("/api/v1/tasks/{task}/tags"),
            serde_json::json!({"tag": tag}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/tasks/{task}/tags")).await;
    assert_eq!(response.status(), StatusCode::OK);

    // Ordered by tag name.
    let json = body_json(response).await;
    let names: Vec<_> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["alpha", "beta"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_apply_same_tag_twice_returns_409(pool: PgPool) {
    let user = create_user(&pool, "doubler").await;
    let task = create_task(&pool, "Twice tagged", user).await;
    let tag = create_tag(&pool, "dup").await;

    let app = common::build_test_app(pool.clone());
    post_json(
        app,
        &format!("/api/v1/tasks/{task}/tags"),
        serde_json::json!({"tag": tag}),
    )
    .await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        &format!("/api/v1/tasks/{task}/tags"),
        serde_json::json!({"tag": tag}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_apply_tag_to_missing_task_returns_404(pool: PgPool) {
    let tag = create_tag(&pool, "lost").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/tasks/999999/tags",
        serde_json::json!({"tag": tag}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_remove_tag_from_task(pool: PgPool) {
    let user = create_user(&pool, "remover").await;
    let task = create_task(&pool, "Cleanup", user).await;
    let tag = create_tag(&pool, "stale").await;

    let app = common::build_test_app(pool.clone());
    post_json(
        app,
        &format!("/api/v1/tasks/{task}/tags"),
        serde_json::json!({"tag": tag}),
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/tasks/{task}/tags/{tag}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Removing again reports a missing association.
    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/tasks/{task}/tags/{tag}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The tag itself is untouched.
    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/tags/{tag}")).await;
    assert_eq!(response.status(), StatusCode::OK);
}
