//! Repository for the `tags` and `task_tags` tables.

use sqlx::{PgPool, Postgres, QueryBuilder};
use studyhub_core::types::DbId;

use crate::models::tag::{CreateTag, Tag, TagListParams, TaskTag, UpdateTag};
use crate::query::{clamp_limit, clamp_offset, order_clause, search_pattern, Conditions, Page};

const COLUMNS: &str = "id, name, created_at, updated_at";

const TASK_TAG_COLUMNS: &str = "id, task_id, tag_id, created_at, updated_at";

const ORDERABLE: &[(&str, &str)] = &[("name", "name"), ("created_at", "created_at")];

/// Provides CRUD operations for tags and task-tag associations.
pub struct TagRepo;

impl TagRepo {
    /// Insert a new tag, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateTag) -> Result<Tag, sqlx::Error> {
        let query = format!(
            "INSERT INTO tags (name)
             VALUES ($1)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tag>(&query)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// Find a tag by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Tag>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tags WHERE id = $1");
        sqlx::query_as::<_, Tag>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List tags with search, ordering, and pagination.
    pub async fn list(pool: &PgPool, params: &TagListParams) -> Result<Page<Tag>, sqlx::Error> {
        let order = order_clause(params.ordering.as_deref(), ORDERABLE, "name ASC");
        let limit = clamp_limit(params.limit);
        let offset = clamp_offset(params.offset);

        let mut count_qb = QueryBuilder::new("SELECT COUNT(*) FROM tags");
        push_conditions(&mut count_qb, params);
        let total: i64 = count_qb.build_query_scalar().fetch_one(pool).await?;

        let mut qb = QueryBuilder::new(format!("SELECT {COLUMNS} FROM tags"));
        push_conditions(&mut qb, params);
        qb.push(format!(" ORDER BY {order} LIMIT {limit} OFFSET {offset}"));
        let items = qb.build_query_as::<Tag>().fetch_all(pool).await?;

        Ok(Page { items, total })
    }

    /// Update a tag. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTag,
    ) -> Result<Option<Tag>, sqlx::Error> {
        let query = format!(
            "UPDATE tags SET
                name = COALESCE($2, name),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tag>(&query)
            .bind(id)
            .bind(&input.name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a tag and its task associations in one transaction.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query("DELETE FROM task_tags WHERE tag_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Task-tag associations
    // -----------------------------------------------------------------------

    /// Apply a tag to a task. A duplicate pair violates
    /// `uq_task_tags_task_tag` and surfaces as a conflict.
    pub async fn apply_to_task(
        pool: &PgPool,
        task_id: DbId,
        tag_id: DbId,
    ) -> Result<TaskTag, sqlx::Error> {
        let query = format!(
            "INSERT INTO task_tags (task_id, tag_id)
             VALUES ($1, $2)
             RETURNING {TASK_TAG_COLUMNS}"
        );
        sqlx::query_as::<_, TaskTag>(&query)
            .bind(task_id)
            .bind(tag_id)
            .fetch_one(pool)
            .await
    }

    /// Remove a tag from a task. Returns `true` if an association existed.
    pub async fn remove_from_task(
        pool: &PgPool,
        task_id: DbId,
        tag_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM task_tags WHERE task_id = $1 AND tag_id = $2")
            .bind(task_id)
            .bind(tag_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List all tags applied to a task, ordered by name.
    pub async fn for_task(pool: &PgPool, task_id: DbId) -> Result<Vec<Tag>, sqlx::Error> {
        sqlx::query_as::<_, Tag>(
            "SELECT t.id, t.name, t.created_at, t.updated_at
             FROM task_tags tt
             JOIN tags t ON t.id = tt.tag_id
             WHERE tt.task_id = $1
             ORDER BY t.name",
        )
        .bind(task_id)
        .fetch_all(pool)
        .await
    }
}

fn push_conditions(qb: &mut QueryBuilder<'_, Postgres>, params: &TagListParams) {
    let mut cond = Conditions::new();
    if let Some(term) = &params.search {
        let pattern = search_pattern(term);
        cond.sep(qb);
        qb.push("name ILIKE ").push_bind(pattern);
    }
}
