//! Repository for the `study_blocks` table.
//!
//! Read paths return [`BlockWithTasks`]: the API always embeds a block's
//! tasks as a read-only projection.

use std::collections::HashMap;

use sqlx::{PgPool, Postgres, QueryBuilder};
use studyhub_core::types::DbId;

use crate::models::block::{
    BlockListParams, BlockWithTasks, CreateBlock, StudyBlock, UpdateBlock,
};
use crate::query::{clamp_limit, clamp_offset, order_clause, search_pattern, Conditions, Page};
use crate::repositories::BlockTaskRepo;

const COLUMNS: &str = "id, topic_id, number, title, description, estimated_minutes, \
     is_published, created_at, updated_at";

const ORDERABLE: &[(&str, &str)] = &[
    ("topic", "topic_id"),
    ("number", "number"),
    ("created_at", "created_at"),
    ("updated_at", "updated_at"),
];

/// Provides CRUD operations for study blocks.
pub struct BlockRepo;

impl BlockRepo {
    /// Insert a new block, returning it with an (empty) task list.
    pub async fn create(pool: &PgPool, input: &CreateBlock) -> Result<BlockWithTasks, sqlx::Error> {
        let query = format!(
            "INSERT INTO study_blocks
                (topic_id, number, title, description, estimated_minutes, is_published)
             VALUES ($1, $2, $3, COALESCE($4, ''), COALESCE($5, 0), COALESCE($6, FALSE))
             RETURNING {COLUMNS}"
        );
        let block = sqlx::query_as::<_, StudyBlock>(&query)
            .bind(input.topic)
            .bind(input.number)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.estimated_minutes)
            .bind(input.is_published)
            .fetch_one(pool)
            .await?;
        Ok(BlockWithTasks {
            block,
            tasks: Vec::new(),
        })
    }

    /// Find a block by ID with its tasks embedded.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<BlockWithTasks>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM study_blocks WHERE id = $1");
        let Some(block) = sqlx::query_as::<_, StudyBlock>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
        else {
            return Ok(None);
        };
        let mut tasks = BlockTaskRepo::for_blocks(pool, &[id]).await?;
        Ok(Some(BlockWithTasks {
            block,
            tasks: tasks.remove(&id).unwrap_or_default(),
        }))
    }

    /// List blocks with filtering, search, ordering, and pagination. Each
    /// page item embeds the block's tasks, fetched in one batched query.
    pub async fn list(
        pool: &PgPool,
        params: &BlockListParams,
    ) -> Result<Page<BlockWithTasks>, sqlx::Error> {
        let order = order_clause(
            params.ordering.as_deref(),
            ORDERABLE,
            "topic_id ASC, number ASC",
        );
        let limit = clamp_limit(params.limit);
        let offset = clamp_offset(params.offset);

        let mut count_qb = QueryBuilder::new("SELECT COUNT(*) FROM study_blocks");
        push_conditions(&mut count_qb, params);
        let total: i64 = count_qb.build_query_scalar().fetch_one(pool).await?;

        let mut qb = QueryBuilder::new(format!("SELECT {COLUMNS} FROM study_blocks"));
        push_conditions(&mut qb, params);
        qb.push(format!(" ORDER BY {order} LIMIT {limit} OFFSET {offset}"));
        let blocks = qb.build_query_as::<StudyBlock>().fetch_all(pool).await?;

        let items = Self::attach_tasks(pool, blocks).await?;
        Ok(Page { items, total })
    }

    /// Fetch all blocks for the given topics (with tasks embedded), grouped
    /// by topic ID and ordered by block number. Used by the topic projection.
    pub async fn with_tasks_for_topics(
        pool: &PgPool,
        topic_ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<BlockWithTasks>>, sqlx::Error> {
        if topic_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let query = format!(
            "SELECT {COLUMNS} FROM study_blocks
             WHERE topic_id = ANY($1)
             ORDER BY topic_id, number"
        );
        let blocks = sqlx::query_as::<_, StudyBlock>(&query)
            .bind(topic_ids)
            .fetch_all(pool)
            .await?;

        let with_tasks = Self::attach_tasks(pool, blocks).await?;
        let mut grouped: HashMap<DbId, Vec<BlockWithTasks>> = HashMap::new();
        for item in with_tasks {
            grouped.entry(item.block.topic).or_default().push(item);
        }
        Ok(grouped)
    }

    /// Update a block. Only non-`None` fields are applied. Returns the
    /// updated block with its tasks embedded.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBlock,
    ) -> Result<Option<BlockWithTasks>, sqlx::Error> {
        let query = format!(
            "UPDATE study_blocks SET
                topic_id = COALESCE($2, topic_id),
                number = COALESCE($3, number),
                title = COALESCE($4, title),
                description = COALESCE($5, description),
                estimated_minutes = COALESCE($6, estimated_minutes),
                is_published = COALESCE($7, is_published),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let Some(block) = sqlx::query_as::<_, StudyBlock>(&query)
            .bind(id)
            .bind(input.topic)
            .bind(input.number)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.estimated_minutes)
            .bind(input.is_published)
            .fetch_optional(pool)
            .await?
        else {
            return Ok(None);
        };
        let mut tasks = BlockTaskRepo::for_blocks(pool, &[id]).await?;
        Ok(Some(BlockWithTasks {
            block,
            tasks: tasks.remove(&id).unwrap_or_default(),
        }))
    }

    /// Delete a block, its tasks, and their progress rows in one transaction.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query(
            "DELETE FROM student_task_progress
             WHERE task_id IN (SELECT id FROM block_tasks WHERE block_id = $1)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;
        sqlx::query("DELETE FROM block_tasks WHERE block_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM study_blocks WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    async fn attach_tasks(
        pool: &PgPool,
        blocks: Vec<StudyBlock>,
    ) -> Result<Vec<BlockWithTasks>, sqlx::Error> {
        let block_ids: Vec<DbId> = blocks.iter().map(|b| b.id).collect();
        let mut tasks_by_block = BlockTaskRepo::for_blocks(pool, &block_ids).await?;
        Ok(blocks
            .into_iter()
            .map(|block| {
                let tasks = tasks_by_block.remove(&block.id).unwrap_or_default();
                BlockWithTasks { block, tasks }
            })
            .collect())
    }
}

fn push_conditions(qb: &mut QueryBuilder<'_, Postgres>, params: &BlockListParams) {
    let mut cond = Conditions::new();
    if let Some(topic) = params.topic {
        cond.sep(qb);
        qb.push("topic_id = ").push_bind(topic);
    }
    if let Some(is_published) = params.is_published {
        cond.sep(qb);
        qb.push("is_published = ").push_bind(is_published);
    }
    if let Some(term) = &params.search {
        let pattern = search_pattern(term);
        cond.sep(qb);
        qb.push("(title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR description ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR topic_id IN (SELECT id FROM study_topics WHERE name ILIKE ")
            .push_bind(pattern)
            .push("))");
    }
}
