//! Repository for the `study_topics` table.
//!
//! Read paths return [`TopicWithBlocks`]: the API always embeds a topic's
//! blocks (and their tasks) as a read-only projection.

use sqlx::{PgPool, Postgres, QueryBuilder};
use studyhub_core::types::DbId;

use crate::models::topic::{
    CreateTopic, StudyTopic, TopicListParams, TopicWithBlocks, UpdateTopic,
};
use crate::query::{clamp_limit, clamp_offset, order_clause, search_pattern, Conditions, Page};
use crate::repositories::BlockRepo;

const COLUMNS: &str = "id, name, description, difficulty, is_active, created_at, updated_at";

const ORDERABLE: &[(&str, &str)] = &[
    ("name", "name"),
    ("created_at", "created_at"),
    ("updated_at", "updated_at"),
];

/// Provides CRUD operations for study topics.
pub struct TopicRepo;

impl TopicRepo {
    /// Insert a new topic, returning it with an (empty) block list.
    pub async fn create(pool: &PgPool, input: &CreateTopic) -> Result<TopicWithBlocks, sqlx::Error> {
        let query = format!(
            "INSERT INTO study_topics (name, description, difficulty, is_active)
             VALUES ($1, COALESCE($2, ''), COALESCE($3, 'beginner'::difficulty), COALESCE($4, TRUE))
             RETURNING {COLUMNS}"
        );
        let topic = sqlx::query_as::<_, StudyTopic>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.difficulty)
            .bind(input.is_active)
            .fetch_one(pool)
            .await?;
        Ok(TopicWithBlocks {
            topic,
            blocks: Vec::new(),
        })
    }

    /// Find a topic by ID with its blocks and tasks embedded.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<TopicWithBlocks>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM study_topics WHERE id = $1");
        let Some(topic) = sqlx::query_as::<_, StudyTopic>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
        else {
            return Ok(None);
        };
        let mut blocks = BlockRepo::with_tasks_for_topics(pool, &[id]).await?;
        Ok(Some(TopicWithBlocks {
            topic,
            blocks: blocks.remove(&id).unwrap_or_default(),
        }))
    }

    /// List topics with filtering, search, ordering, and pagination. Each
    /// page item embeds the topic's blocks, fetched in batched queries.
    pub async fn list(
        pool: &PgPool,
        params: &TopicListParams,
    ) -> Result<Page<TopicWithBlocks>, sqlx::Error> {
        let order = order_clause(params.ordering.as_deref(), ORDERABLE, "id ASC");
        let limit = clamp_limit(params.limit);
        let offset = clamp_offset(params.offset);

        let mut count_qb = QueryBuilder::new("SELECT COUNT(*) FROM study_topics");
        push_conditions(&mut count_qb, params);
        let total: i64 = count_qb.build_query_scalar().fetch_one(pool).await?;

        let mut qb = QueryBuilder::new(format!("SELECT {COLUMNS} FROM study_topics"));
        push_conditions(&mut qb, params);
        qb.push(format!(" ORDER BY {order} LIMIT {limit} OFFSET {offset}"));
        let topics = qb.build_query_as::<StudyTopic>().fetch_all(pool).await?;

        let topic_ids: Vec<DbId> = topics.iter().map(|t| t.id).collect();
        let mut blocks_by_topic = BlockRepo::with_tasks_for_topics(pool, &topic_ids).await?;
        let items = topics
            .into_iter()
            .map(|topic| {
                let blocks = blocks_by_topic.remove(&topic.id).unwrap_or_default();
                TopicWithBlocks { topic, blocks }
            })
            .collect();

        Ok(Page { items, total })
    }

    /// Update a topic. Only non-`None` fields are applied. Returns the
    /// updated topic with its blocks embedded.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTopic,
    ) -> Result<Option<TopicWithBlocks>, sqlx::Error> {
        let query = format!(
            "UPDATE study_topics SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                difficulty = COALESCE($4, difficulty),
                is_active = COALESCE($5, is_active),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let Some(topic) = sqlx::query_as::<_, StudyTopic>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.difficulty)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await?
        else {
            return Ok(None);
        };
        let mut blocks = BlockRepo::with_tasks_for_topics(pool, &[id]).await?;
        Ok(Some(TopicWithBlocks {
            topic,
            blocks: blocks.remove(&id).unwrap_or_default(),
        }))
    }

    /// Delete a topic and everything under it (blocks, tasks, progress) in
    /// one transaction.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query(
            "DELETE FROM student_task_progress
             WHERE task_id IN (
                 SELECT bt.id FROM block_tasks bt
                 JOIN study_blocks sb ON sb.id = bt.block_id
                 WHERE sb.topic_id = $1
             )",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;
        sqlx::query(
            "DELETE FROM block_tasks
             WHERE block_id IN (SELECT id FROM study_blocks WHERE topic_id = $1)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;
        sqlx::query("DELETE FROM study_blocks WHERE topic_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM study_topics WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}

fn push_conditions(qb: &mut QueryBuilder<'_, Postgres>, params: &TopicListParams) {
    let mut cond = Conditions::new();
    if let Some(difficulty) = params.difficulty {
        cond.sep(qb);
        qb.push("difficulty = ").push_bind(difficulty);
    }
    if let Some(is_active) = params.is_active {
        cond.sep(qb);
        qb.push("is_active = ").push_bind(is_active);
    }
    if let Some(term) = &params.search {
        let pattern = search_pattern(term);
        cond.sep(qb);
        qb.push("(name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR description ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}
