//! Repository for the `students` table.

use sqlx::{PgPool, Postgres, QueryBuilder};
use studyhub_core::types::DbId;

use crate::models::student::{CreateStudent, Student, StudentListParams, UpdateStudent};
use crate::query::{clamp_limit, clamp_offset, order_clause, search_pattern, Conditions, Page};

const COLUMNS: &str = "id, user_id, full_name, started_at, created_at, updated_at";

const ORDERABLE: &[(&str, &str)] = &[("full_name", "full_name"), ("started_at", "started_at")];

/// Provides CRUD operations for student profiles.
pub struct StudentRepo;

impl StudentRepo {
    /// Insert a new student profile. `started_at` is server-assigned.
    pub async fn create(pool: &PgPool, input: &CreateStudent) -> Result<Student, sqlx::Error> {
        let query = format!(
            "INSERT INTO students (user_id, full_name)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(input.user)
            .bind(&input.full_name)
            .fetch_one(pool)
            .await
    }

    /// Find a student by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students WHERE id = $1");
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List students. Search matches the full name and the linked user's
    /// username and email.
    pub async fn list(
        pool: &PgPool,
        params: &StudentListParams,
    ) -> Result<Page<Student>, sqlx::Error> {
        let order = order_clause(params.ordering.as_deref(), ORDERABLE, "id ASC");
        let limit = clamp_limit(params.limit);
        let offset = clamp_offset(params.offset);

        let mut count_qb = QueryBuilder::new("SELECT COUNT(*) FROM students");
        push_conditions(&mut count_qb, params);
        let total: i64 = count_qb.build_query_scalar().fetch_one(pool).await?;

        let mut qb = QueryBuilder::new(format!("SELECT {COLUMNS} FROM students"));
        push_conditions(&mut qb, params);
        qb.push(format!(" ORDER BY {order} LIMIT {limit} OFFSET {offset}"));
        let items = qb.build_query_as::<Student>().fetch_all(pool).await?;

        Ok(Page { items, total })
    }

    /// Update a student profile. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateStudent,
    ) -> Result<Option<Student>, sqlx::Error> {
        let query = format!(
            "UPDATE students SET
                user_id = COALESCE($2, user_id),
                full_name = COALESCE($3, full_name),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .bind(input.user)
            .bind(&input.full_name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a student and its progress rows in one transaction.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query("DELETE FROM student_task_progress WHERE student_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}

fn push_conditions(qb: &mut QueryBuilder<'_, Postgres>, params: &StudentListParams) {
    let mut cond = Conditions::new();
    if let Some(user) = params.user {
        cond.sep(qb);
        qb.push("user_id = ").push_bind(user);
    }
    if let Some(term) = &params.search {
        let pattern = search_pattern(term);
        cond.sep(qb);
        qb.push("(full_name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR user_id IN (SELECT id FROM users WHERE username ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR email ILIKE ")
            .push_bind(pattern)
            .push("))");
    }
}
