//! Repository for the `tasks` table.

use sqlx::{PgPool, Postgres, QueryBuilder};
use studyhub_core::types::DbId;

use crate::models::task::{CreateTask, Task, TaskListParams, UpdateTask};
use crate::query::{clamp_limit, clamp_offset, order_clause, search_pattern, Conditions, Page};

const COLUMNS: &str = "id, title, description, status, priority, due_date, completed_at, \
     is_locked, tags, project_id, created_by, assigned_to, created_at, updated_at";

const ORDERABLE: &[(&str, &str)] = &[
    ("created_at", "created_at"),
    ("due_date", "due_date"),
    ("priority", "priority"),
    ("status", "status"),
    ("title", "title"),
];

/// Provides CRUD operations for standalone tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task, returning the created row. `created_by` must
    /// reference an existing user.
    pub async fn create(pool: &PgPool, input: &CreateTask) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks
                (title, description, status, priority, due_date, completed_at, is_locked,
                 tags, project_id, created_by, assigned_to)
             VALUES ($1, $2, COALESCE($3, 'pending'::task_status),
                     COALESCE($4, 'medium'::task_priority), $5, $6, COALESCE($7, FALSE),
                     COALESCE($8, ''), $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.status)
            .bind(input.priority)
            .bind(input.due_date)
            .bind(input.completed_at)
            .bind(input.is_locked)
            .bind(&input.tags)
            .bind(input.project)
            .bind(input.created_by)
            .bind(input.assigned_to)
            .fetch_one(pool)
            .await
    }

    /// Find a task by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List tasks with filtering, search, ordering, and pagination.
    pub async fn list(pool: &PgPool, params: &TaskListParams) -> Result<Page<Task>, sqlx::Error> {
        let order = order_clause(params.ordering.as_deref(), ORDERABLE, "created_at DESC");
        let limit = clamp_limit(params.limit);
        let offset = clamp_offset(params.offset);

        let mut count_qb = QueryBuilder::new("SELECT COUNT(*) FROM tasks");
        push_conditions(&mut count_qb, params);
        let total: i64 = count_qb.build_query_scalar().fetch_one(pool).await?;

        let mut qb = QueryBuilder::new(format!("SELECT {COLUMNS} FROM tasks"));
        push_conditions(&mut qb, params);
        qb.push(format!(" ORDER BY {order} LIMIT {limit} OFFSET {offset}"));
        let items = qb.build_query_as::<Task>().fetch_all(pool).await?;

        Ok(Page { items, total })
    }

    /// Update a task. Omitted fields keep their value; an explicit `null`
    /// on a nullable field clears it. `created_by` is immutable.
    ///
    /// Nullable columns cannot go through COALESCE (it would swallow the
    /// NULL), so each takes a presence flag plus a value bind.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTask,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET
                title = COALESCE($2, title),
                status = COALESCE($3, status),
                priority = COALESCE($4, priority),
                is_locked = COALESCE($5, is_locked),
                tags = COALESCE($6, tags),
                description = CASE WHEN $7 THEN $8 ELSE description END,
                due_date = CASE WHEN $9 THEN $10 ELSE due_date END,
                completed_at = CASE WHEN $11 THEN $12 ELSE completed_at END,
                project_id = CASE WHEN $13 THEN $14 ELSE project_id END,
                assigned_to = CASE WHEN $15 THEN $16 ELSE assigned_to END,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.status)
            .bind(input.priority)
            .bind(input.is_locked)
            .bind(&input.tags)
            .bind(input.description.is_set())
            .bind(input.description.value())
            .bind(input.due_date.is_set())
            .bind(input.due_date.value())
            .bind(input.completed_at.is_set())
            .bind(input.completed_at.value())
            .bind(input.project.is_set())
            .bind(input.project.value())
            .bind(input.assigned_to.is_set())
            .bind(input.assigned_to.value())
            .fetch_optional(pool)
            .await
    }

    /// Delete a task and its tag associations in one transaction.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query("DELETE FROM task_tags WHERE task_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}

fn push_conditions(qb: &mut QueryBuilder<'_, Postgres>, params: &TaskListParams) {
    let mut cond = Conditions::new();
    if let Some(status) = params.status {
        cond.sep(qb);
        qb.push("status = ").push_bind(status);
    }
    if let Some(priority) = params.priority {
        cond.sep(qb);
        qb.push("priority = ").push_bind(priority);
    }
    if let Some(assigned_to) = params.assigned_to {
        cond.sep(qb);
        qb.push("assigned_to = ").push_bind(assigned_to);
    }
    if let Some(created_by) = params.created_by {
        cond.sep(qb);
        qb.push("created_by = ").push_bind(created_by);
    }
    if let Some(project) = params.project {
        cond.sep(qb);
        qb.push("project_id = ").push_bind(project);
    }
    if let Some(term) = &params.search {
        let pattern = search_pattern(term);
        cond.sep(qb);
        qb.push("(title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR description ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR tags ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}
