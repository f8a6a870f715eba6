//! Repository for the `student_task_progress` table.
//!
//! Read paths return [`ProgressWithTask`]: the API embeds a read-only
//! snapshot of the referenced block task in every progress response.

use std::collections::HashMap;

use sqlx::{PgPool, Postgres, QueryBuilder};
use studyhub_core::types::DbId;

use crate::models::block_task::BlockTask;
use crate::models::progress::{
    CreateProgress, ProgressListParams, ProgressWithTask, StudentTaskProgress, UpdateProgress,
};
use crate::query::{clamp_limit, clamp_offset, order_clause, search_pattern, Conditions, Page};

const COLUMNS: &str = "id, student_id, task_id, status, started_at, completed_at, notes, \
     created_at, updated_at";

const TASK_COLUMNS: &str = "id, block_id, title, instructions, resources, estimated_minutes, \
     sort_order, status, created_at, updated_at";

const ORDERABLE: &[(&str, &str)] = &[
    ("started_at", "started_at"),
    ("completed_at", "completed_at"),
    ("status", "status"),
];

/// Provides CRUD operations for student task progress records.
pub struct ProgressRepo;

impl ProgressRepo {
    /// Insert a new progress record. `(student, task)` must be unique.
    pub async fn create(
        pool: &PgPool,
        input: &CreateProgress,
    ) -> Result<ProgressWithTask, sqlx::Error> {
        let query = format!(
            "INSERT INTO student_task_progress
                (student_id, task_id, status, started_at, completed_at, notes)
             VALUES ($1, $2, COALESCE($3, 'pending'::progress_status), $4, $5, COALESCE($6, ''))
             RETURNING {COLUMNS}"
        );
        let progress = sqlx::query_as::<_, StudentTaskProgress>(&query)
            .bind(input.student)
            .bind(input.task)
            .bind(input.status)
            .bind(input.started_at)
            .bind(input.completed_at)
            .bind(&input.notes)
            .fetch_one(pool)
            .await?;
        Self::attach_task(pool, progress).await
    }

    /// Find a progress record by its internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProgressWithTask>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM student_task_progress WHERE id = $1");
        match sqlx::query_as::<_, StudentTaskProgress>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
        {
            Some(progress) => Ok(Some(Self::attach_task(pool, progress).await?)),
            None => Ok(None),
        }
    }

    /// List progress records with filtering, search, ordering, and
    /// pagination. Task snapshots are fetched in one batched query.
    pub async fn list(
        pool: &PgPool,
        params: &ProgressListParams,
    ) -> Result<Page<ProgressWithTask>, sqlx::Error> {
        let order = order_clause(
            params.ordering.as_deref(),
            ORDERABLE,
            "completed_at DESC, started_at DESC",
        );
        let limit = clamp_limit(params.limit);
        let offset = clamp_offset(params.offset);

        let mut count_qb = QueryBuilder::new("SELECT COUNT(*) FROM student_task_progress");
        push_conditions(&mut count_qb, params);
        let total: i64 = count_qb.build_query_scalar().fetch_one(pool).await?;

        let mut qb = QueryBuilder::new(format!("SELECT {COLUMNS} FROM student_task_progress"));
        push_conditions(&mut qb, params);
        qb.push(format!(" ORDER BY {order} LIMIT {limit} OFFSET {offset}"));
        let rows = qb
            .build_query_as::<StudentTaskProgress>()
            .fetch_all(pool)
            .await?;

        let task_ids: Vec<DbId> = rows.iter().map(|p| p.task).collect();
        let tasks = Self::tasks_by_id(pool, &task_ids).await?;
        let items = rows
            .into_iter()
            .filter_map(|progress| {
                let task_detail = tasks.get(&progress.task).cloned()?;
                Some(ProgressWithTask {
                    progress,
                    task_detail,
                })
            })
            .collect();

        Ok(Page { items, total })
    }

    /// Update a progress record. Omitted fields keep their value; an
    /// explicit `null` on a timestamp clears it (the presence flags guard
    /// against COALESCE swallowing the NULL). The student/task pair is
    /// immutable after creation.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProgress,
    ) -> Result<Option<ProgressWithTask>, sqlx::Error> {
        let query = format!(
            "UPDATE student_task_progress SET
                status = COALESCE($2, status),
                notes = COALESCE($3, notes),
                started_at = CASE WHEN $4 THEN $5 ELSE started_at END,
                completed_at = CASE WHEN $6 THEN $7 ELSE completed_at END,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        match sqlx::query_as::<_, StudentTaskProgress>(&query)
            .bind(id)
            .bind(input.status)
            .bind(&input.notes)
            .bind(input.started_at.is_set())
            .bind(input.started_at.value())
            .bind(input.completed_at.is_set())
            .bind(input.completed_at.value())
            .fetch_optional(pool)
            .await?
        {
            Some(progress) => Ok(Some(Self::attach_task(pool, progress).await?)),
            None => Ok(None),
        }
    }

    /// Delete a progress record by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM student_task_progress WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn attach_task(
        pool: &PgPool,
        progress: StudentTaskProgress,
    ) -> Result<ProgressWithTask, sqlx::Error> {
        let query = format!("SELECT {TASK_COLUMNS} FROM block_tasks WHERE id = $1");
        let task_detail = sqlx::query_as::<_, BlockTask>(&query)
            .bind(progress.task)
            .fetch_one(pool)
            .await?;
        Ok(ProgressWithTask {
            progress,
            task_detail,
        })
    }

    async fn tasks_by_id(
        pool: &PgPool,
        task_ids: &[DbId],
    ) -> Result<HashMap<DbId, BlockTask>, sqlx::Error> {
        if task_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let query = format!("SELECT {TASK_COLUMNS} FROM block_tasks WHERE id = ANY($1)");
        let rows = sqlx::query_as::<_, BlockTask>(&query)
            .bind(task_ids)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(|t| (t.id, t)).collect())
    }
}

fn push_conditions(qb: &mut QueryBuilder<'_, Postgres>, params: &ProgressListParams) {
    let mut cond = Conditions::new();
    if let Some(student) = params.student {
        cond.sep(qb);
        qb.push("student_id = ").push_bind(student);
    }
    if let Some(task) = params.task {
        cond.sep(qb);
        qb.push("task_id = ").push_bind(task);
    }
    if let Some(status) = params.status {
        cond.sep(qb);
        qb.push("status = ").push_bind(status);
    }
    if let Some(block) = params.block {
        cond.sep(qb);
        qb.push("task_id IN (SELECT id FROM block_tasks WHERE block_id = ")
            .push_bind(block)
            .push(")");
    }
    if let Some(topic) = params.topic {
        cond.sep(qb);
        qb.push(
            "task_id IN (SELECT bt.id FROM block_tasks bt \
             JOIN study_blocks sb ON sb.id = bt.block_id WHERE sb.topic_id = ",
        )
        .push_bind(topic)
        .push(")");
    }
    if let Some(term) = &params.search {
        let pattern = search_pattern(term);
        cond.sep(qb);
        qb.push("(notes ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR student_id IN (SELECT id FROM students WHERE full_name ILIKE ")
            .push_bind(pattern.clone())
            .push(") OR task_id IN (SELECT id FROM block_tasks WHERE title ILIKE ")
            .push_bind(pattern.clone())
            .push(
                ") OR task_id IN (SELECT bt.id FROM block_tasks bt \
                 JOIN study_blocks sb ON sb.id = bt.block_id WHERE sb.title ILIKE ",
            )
            .push_bind(pattern)
            .push("))");
    }
}
