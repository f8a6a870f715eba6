//! Repository for the `block_tasks` table.

use std::collections::HashMap;

use sqlx::{PgPool, Postgres, QueryBuilder};
use studyhub_core::types::DbId;

use crate::models::block_task::{
    BlockTask, BlockTaskListParams, CreateBlockTask, UpdateBlockTask,
};
use crate::query::{clamp_limit, clamp_offset, order_clause, search_pattern, Conditions, Page};

const COLUMNS: &str = "id, block_id, title, instructions, resources, estimated_minutes, \
     sort_order, status, created_at, updated_at";

const ORDERABLE: &[(&str, &str)] = &[
    ("block", "block_id"),
    ("order", "sort_order"),
    ("created_at", "created_at"),
    ("updated_at", "updated_at"),
];

/// Provides CRUD operations for block tasks.
pub struct BlockTaskRepo;

impl BlockTaskRepo {
    /// Insert a new block task, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateBlockTask) -> Result<BlockTask, sqlx::Error> {
        let query = format!(
            "INSERT INTO block_tasks
                (block_id, title, instructions, resources, estimated_minutes, sort_order, status)
             VALUES ($1, $2, COALESCE($3, ''), COALESCE($4, '[]'::jsonb), COALESCE($5, 0), $6,
                     COALESCE($7, 'available'::block_task_status))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BlockTask>(&query)
            .bind(input.block)
            .bind(&input.title)
            .bind(&input.instructions)
            .bind(&input.resources)
            .bind(input.estimated_minutes)
            .bind(input.order)
            .bind(input.status)
            .fetch_one(pool)
            .await
    }

    /// Find a block task by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<BlockTask>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM block_tasks WHERE id = $1");
        sqlx::query_as::<_, BlockTask>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List block tasks with filtering, search, ordering, and pagination.
    pub async fn list(
        pool: &PgPool,
        params: &BlockTaskListParams,
    ) -> Result<Page<BlockTask>, sqlx::Error> {
        let order = order_clause(
            params.ordering.as_deref(),
            ORDERABLE,
            "block_id ASC, sort_order ASC",
        );
        let limit = clamp_limit(params.limit);
        let offset = clamp_offset(params.offset);

        let mut count_qb = QueryBuilder::new("SELECT COUNT(*) FROM block_tasks");
        push_conditions(&mut count_qb, params);
        let total: i64 = count_qb.build_query_scalar().fetch_one(pool).await?;

        let mut qb = QueryBuilder::new(format!("SELECT {COLUMNS} FROM block_tasks"));
        push_conditions(&mut qb, params);
        qb.push(format!(" ORDER BY {order} LIMIT {limit} OFFSET {offset}"));
        let items = qb.build_query_as::<BlockTask>().fetch_all(pool).await?;

        Ok(Page { items, total })
    }

    /// Fetch all tasks for the given blocks, grouped by block ID and ordered
    /// by `sort_order`. Used to assemble nested block/topic projections.
    pub async fn for_blocks(
        pool: &PgPool,
        block_ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<BlockTask>>, sqlx::Error> {
        if block_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let query = format!(
            "SELECT {COLUMNS} FROM block_tasks
             WHERE block_id = ANY($1)
             ORDER BY block_id, sort_order"
        );
        let rows = sqlx::query_as::<_, BlockTask>(&query)
            .bind(block_ids)
            .fetch_all(pool)
            .await?;

        let mut grouped: HashMap<DbId, Vec<BlockTask>> = HashMap::new();
        for task in rows {
            grouped.entry(task.block).or_default().push(task);
        }
        Ok(grouped)
    }

    /// Update a block task. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBlockTask,
    ) -> Result<Option<BlockTask>, sqlx::Error> {
        let query = format!(
            "UPDATE block_tasks SET
                block_id = COALESCE($2, block_id),
                title = COALESCE($3, title),
                instructions = COALESCE($4, instructions),
                resources = COALESCE($5, resources),
                estimated_minutes = COALESCE($6, estimated_minutes),
                sort_order = COALESCE($7, sort_order),
                status = COALESCE($8, status),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BlockTask>(&query)
            .bind(id)
            .bind(input.block)
            .bind(&input.title)
            .bind(&input.instructions)
            .bind(&input.resources)
            .bind(input.estimated_minutes)
            .bind(input.order)
            .bind(input.status)
            .fetch_optional(pool)
            .await
    }

    /// Delete a block task and its progress rows in one transaction.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query("DELETE FROM student_task_progress WHERE task_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM block_tasks WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}

fn push_conditions(qb: &mut QueryBuilder<'_, Postgres>, params: &BlockTaskListParams) {
    let mut cond = Conditions::new();
    if let Some(block) = params.block {
        cond.sep(qb);
        qb.push("block_id = ").push_bind(block);
    }
    if let Some(status) = params.status {
        cond.sep(qb);
        qb.push("status = ").push_bind(status);
    }
    if let Some(topic) = params.topic {
        cond.sep(qb);
        qb.push("block_id IN (SELECT id FROM study_blocks WHERE topic_id = ")
            .push_bind(topic)
            .push(")");
    }
    if let Some(term) = &params.search {
        let pattern = search_pattern(term);
        cond.sep(qb);
        qb.push("(title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR instructions ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR block_id IN (SELECT id FROM study_blocks WHERE title ILIKE ")
            .push_bind(pattern)
            .push("))");
    }
}
