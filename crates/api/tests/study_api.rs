//! HTTP-level integration tests for the study domain endpoints:
//! `/topics`, `/blocks`, `/block-tasks`, and `/student-task-progress`.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, patch_json, post_json, put_json};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

async fn create_topic(pool: &PgPool, name: &str) -> i64 {
    let app = common::build_test_app(pool.clone());
    let json = body_json(post_json(app, "/api/v1/topics", serde_json::json!({"name": name})).await)
        .await;
    json["id"].as_i64().unwrap()
}

async fn create_block(pool: &PgPool, topic: i64, number: i64, title: &str) -> i64 {
    let app = common::build_test_app(pool.clone());
    let json = body_json(
        post_json(
            app,
            "/api/v1/blocks",
            serde_json::json!({"topic": topic, "number": number, "title": title}),
        )
        .await,
    )
    .await;
    json["id"].as_i64().unwrap()
}

async fn create_block_task(pool: &PgPool, block: i64, order: i64, title: &str) -> i64 {
    let app = common::build_test_app(pool.clone());
    let json = body_json(
        post_json(
            app,
            "/api/v1/block-tasks",
            serde_json::json!({"block": block, "order": order, "title": title}),
        )
        .await,
    )
    .await;
    json["id"].as_i64().unwrap()
}

async fn create_student(pool: &PgPool, username: &str) -> i64 {
    let app = common::build_test_app(pool.clone());
    let user = body_json(
        post_json(app, "/api/v1/users", serde_json::json!({"username": username})).await,
    )
    .await;
    let app = common::build_test_app(pool.clone());
    let student = body_json(
        post_json(
            app,
            "/api/v1/students",
            serde_json::json!({"user": user["id"], "full_name": username}),
        )
        .await,
    )
    .await;
    student["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Topics
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_topic_with_defaults(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/topics", serde_json::json!({"name": "Rust"})).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Rust");
    assert_eq!(json["difficulty"], "beginner");
    assert_eq!(json["is_active"], true);
    assert_eq!(json["blocks"], serde_json::json!([]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_topic_detail_embeds_block_tree(pool: PgPool) {
    let topic = create_topic(&pool, "Databases").await;
    let block = create_block(&pool, topic, 1, "SQL basics").await;
    create_block_task(&pool, block, 2, "Joins").await;
    create_block_task(&pool, block, 1, "Selects").await;

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/topics/{topic}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let blocks = json["blocks"].as_array().unwrap();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0]["title"], "SQL basics");

    // Tasks are sorted by their position within the block.
    let tasks = blocks[0]["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0]["title"], "Selects");
    assert_eq!(tasks[0]["order"], 1);
    assert_eq!(tasks[1]["title"], "Joins");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_topic_filter_by_difficulty(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    post_json(
        app,
        "/api/v1/topics",
        serde_json::json!({"name": "Easy", "difficulty": "beginner"}),
    )
    .await;
    let app = common::build_test_app(pool.clone());
    post_json(
        app,
        "/api/v1/topics",
        serde_json::json!({"name": "Hard", "difficulty": "advanced"}),
    )
    .await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/topics?difficulty=advanced").await;
    let json = body_json(response).await;
    assert_eq!(json["count"], 1);
    assert_eq!(json["results"][0]["name"], "Hard");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_topic_removes_hierarchy(pool: PgPool) {
    let topic = create_topic(&pool, "Doomed").await;
    let block = create_block(&pool, topic, 1, "Gone").await;
    let task = create_block_task(&pool, block, 1, "Lost").await;

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/topics/{topic}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool.clone());
    assert_eq!(
        get(app, &format!("/api/v1/blocks/{block}")).await.status(),
        StatusCode::NOT_FOUND
    );
    let app = common::build_test_app(pool);
    assert_eq!(
        get(app, &format!("/api/v1/block-tasks/{task}")).await.status(),
        StatusCode::NOT_FOUND
    );
}

// ---------------------------------------------------------------------------
// Blocks
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_duplicate_block_number_returns_409(pool: PgPool) {
    let topic = create_topic(&pool, "Numbered").await;
    create_block(&pool, topic, 1, "First").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/blocks",
        serde_json::json!({"topic": topic, "number": 1, "title": "Clash"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_put_block_partial_update(pool: PgPool) {
    let topic = create_topic(&pool, "Editable").await;
    let block = create_block(&pool, topic, 1, "Draft").await;

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/api/v1/blocks/{block}"),
        serde_json::json!({"is_published": true}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["title"], "Draft");
    assert_eq!(json["is_published"], true);
    assert!(json["tasks"].is_array());
}

// ---------------------------------------------------------------------------
// Block tasks
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_block_task_fields_and_defaults(pool: PgPool) {
    let topic = create_topic(&pool, "Fields").await;
    let block = create_block(&pool, topic, 1, "Holder").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/block-tasks",
        serde_json::json!({
            "block": block,
            "order": 3,
            "title": "Exercise",
            "resources": [{"kind": "link", "url": "https://example.com"}]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["block"], block);
    assert_eq!(json["order"], 3);
    assert_eq!(json["status"], "available");
    assert_eq!(json["resources"][0]["kind"], "link");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_block_tasks_filter_by_topic(pool: PgPool) {
    let topic_a = create_topic(&pool, "A").await;
    let topic_b = create_topic(&pool, "B").await;
    let block_a = create_block(&pool, topic_a, 1, "A1").await;
    let block_b = create_block(&pool, topic_b, 1, "B1").await;
    create_block_task(&pool, block_a, 1, "In A").await;
    create_block_task(&pool, block_b, 1, "In B").await;

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/block-tasks?topic={topic_a}")).await;
    let json = body_json(response).await;
    assert_eq!(json["count"], 1);
    assert_eq!(json["results"][0]["title"], "In A");
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_progress_embeds_task_detail(pool: PgPool) {
    let student = create_student(&pool, "learner").await;
    let topic = create_topic(&pool, "Tracked").await;
    let block = create_block(&pool, topic, 1, "Tracked block").await;
    let task = create_block_task(&pool, block, 1, "Tracked task").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/student-task-progress",
        serde_json::json!({"student": student, "task": task}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["student"], student);
    assert_eq!(json["task"], task);
    assert_eq!(json["status"], "pending");
    assert_eq!(json["task_detail"]["id"], task);
    assert_eq!(json["task_detail"]["title"], "Tracked task");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_duplicate_progress_returns_409(pool: PgPool) {
    let student = create_student(&pool, "repeat").await;
    let topic = create_topic(&pool, "Once").await;
    let block = create_block(&pool, topic, 1, "Once block").await;
    let task = create_block_task(&pool, block, 1, "Once task").await;

    let app = common::build_test_app(pool.clone());
    post_json(
        app,
        "/api/v1/student-task-progress",
        serde_json::json!({"student": student, "task": task}),
    )
    .await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/student-task-progress",
        serde_json::json!({"student": student, "task": task}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_progress_status_update(pool: PgPool) {
    let student = create_student(&pool, "finisher").await;
    let topic = create_topic(&pool, "Finishable").await;
    let block = create_block(&pool, topic, 1, "Last block").await;
    let task = create_block_task(&pool, block, 1, "Last task").await;

    let app = common::build_test_app(pool.clone());
    let created = body_json(
        post_json(
            app,
            "/api/v1/student-task-progress",
            serde_json::json!({"student": student, "task": task}),
        )
        .await,
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = patch_json(
        app,
        &format!("/api/v1/student-task-progress/{id}"),
        serde_json::json!({"status": "completed", "notes": "all done"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "completed");
    assert_eq!(json["notes"], "all done");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_progress_reopen_clears_completed_at(pool: PgPool) {
    let student = create_student(&pool, "reopener").await;
    let topic = create_topic(&pool, "Reopenable").await;
    let block = create_block(&pool, topic, 1, "Block").await;
    let task = create_block_task(&pool, block, 1, "Task").await;

    let app = common::build_test_app(pool.clone());
    let created = body_json(
        post_json(
            app,
            "/api/v1/student-task-progress",
            serde_json::json!({
                "student": student,
                "task": task,
                "status": "completed",
                "completed_at": "2026-08-01T12:00:00Z",
            }),
        )
        .await,
    )
    .await;
    let id = created["id"].as_i64().unwrap();
    assert!(created["completed_at"].is_string());

    // Reopening sends an explicit null, which must reset the timestamp.
    let app = common::build_test_app(pool);
    let json = body_json(
        patch_json(
            app,
            &format!("/api/v1/student-task-progress/{id}"),
            serde_json::json!({"status": "in_progress", "completed_at": null}),
        )
        .await,
    )
    .await;
    assert_eq!(json["status"], "in_progress");
    assert_eq!(json["completed_at"], serde_json::Value::Null);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_progress_filter_by_student(pool: PgPool) {
    let student_a = create_student(&pool, "worker-a").await;
    let student_b = create_student(&pool, "worker-b").await;
    let topic = create_topic(&pool, "Shared").await;
    let block = create_block(&pool, topic, 1, "Shared block").await;
    let task = create_block_task(&pool, block, 1, "Shared task").await;

    for student in [student_a, student_b] {
        let app = common::build_test_app(pool.clone());
        post_json(
            app,
            "/api/v1/student-task-progress",
            serde_json::json!({"student": student, "task": task}),
        )
        .await;
    }

    let app = common::build_test_app(pool);
    let response = get(
        app,
        &format!("/api/v1/student-task-progress?student={student_a}"),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["count"], 1);
    assert_eq!(json["results"][0]["student"], student_a);
}
