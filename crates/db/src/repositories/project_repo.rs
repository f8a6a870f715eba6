//! Repository for the `projects` table.

use sqlx::{PgPool, Postgres, QueryBuilder};
use studyhub_core::types::DbId;

use crate::models::project::{CreateProject, Project, ProjectListParams, UpdateProject};
use crate::query::{clamp_limit, clamp_offset, order_clause, search_pattern, Conditions, Page};

const COLUMNS: &str = "id, name, description, created_at, updated_at";

const ORDERABLE: &[(&str, &str)] = &[("name", "name"), ("created_at", "created_at")];

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (name, description)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List projects with search, ordering, and pagination.
    pub async fn list(
        pool: &PgPool,
        params: &ProjectListParams,
    ) -> Result<Page<Project>, sqlx::Error> {
        let order = order_clause(params.ordering.as_deref(), ORDERABLE, "created_at DESC");
        let limit = clamp_limit(params.limit);
        let offset = clamp_offset(params.offset);

        let mut count_qb = QueryBuilder::new("SELECT COUNT(*) FROM projects");
        push_conditions(&mut count_qb, params);
        let total: i64 = count_qb.build_query_scalar().fetch_one(pool).await?;

        let mut qb = QueryBuilder::new(format!("SELECT {COLUMNS} FROM projects"));
        push_conditions(&mut qb, params);
        qb.push(format!(" ORDER BY {order} LIMIT {limit} OFFSET {offset}"));
        let items = qb.build_query_as::<Project>().fetch_all(pool).await?;

        Ok(Page { items, total })
    }

    /// Update a project. An omitted description keeps its value; an
    /// explicit `null` clears it, hence the presence flag instead of
    /// COALESCE.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                name = COALESCE($2, name),
                description = CASE WHEN $3 THEN $4 ELSE description END,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.description.is_set())
            .bind(input.description.value())
            .fetch_optional(pool)
            .await
    }

    /// Delete a project, nulling `project` on its tasks, in one transaction.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query("UPDATE tasks SET project_id = NULL, updated_at = NOW() WHERE project_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}

fn push_conditions(qb: &mut QueryBuilder<'_, Postgres>, params: &ProjectListParams) {
    let mut cond = Conditions::new();
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
