//! Repository for the `users` table.

use sqlx::{PgPool, Postgres, QueryBuilder};
use studyhub_core::types::DbId;

use crate::models::user::{CreateUser, UpdateUser, User, UserDeletion, UserListParams};
use crate::query::{clamp_limit, clamp_offset, order_clause, search_pattern, Conditions, Page};

/// Column list shared across queries. `password_hash` is intentionally
/// excluded so it can never reach a serialized response.
const COLUMNS: &str =
    "id, username, email, first_name, last_name, is_active, date_joined, updated_at";

/// Sort keys accepted by the `ordering` parameter.
const ORDERABLE: &[(&str, &str)] = &[
    ("date_joined", "date_joined"),
    ("username", "username"),
    ("id", "id"),
];

/// Provides CRUD operations for user accounts.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    ///
    /// `password_hash` is the Argon2id PHC string produced by the API layer,
    /// or `None` when no password was submitted.
    pub async fn create(
        pool: &PgPool,
        input: &CreateUser,
        password_hash: Option<&str>,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, email, first_name, last_name, password_hash)
             VALUES ($1, COALESCE($2, ''), COALESCE($3, ''), COALESCE($4, ''), $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(password_hash)
            .fetch_one(pool)
            .await
    }

    /// Find a user by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List users with filtering, search, ordering, and pagination.
    pub async fn list(pool: &PgPool, params: &UserListParams) -> Result<Page<User>, sqlx::Error> {
        let order = order_clause(params.ordering.as_deref(), ORDERABLE, "id ASC");
        let limit = clamp_limit(params.limit);
        let offset = clamp_offset(params.offset);

        let mut count_qb = QueryBuilder::new("SELECT COUNT(*) FROM users");
        push_conditions(&mut count_qb, params);
        let total: i64 = count_qb.build_query_scalar().fetch_one(pool).await?;

        let mut qb = QueryBuilder::new(format!("SELECT {COLUMNS} FROM users"));
        push_conditions(&mut qb, params);
        qb.push(format!(" ORDER BY {order} LIMIT {limit} OFFSET {offset}"));
        let items = qb.build_query_as::<User>().fetch_all(pool).await?;

        Ok(Page { items, total })
    }

    /// Update a user. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUser,
        password_hash: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                username = COALESCE($2, username),
                email = COALESCE($3, email),
                first_name = COALESCE($4, first_name),
                last_name = COALESCE($5, last_name),
                is_active = COALESCE($6, is_active),
                password_hash = COALESCE($7, password_hash),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(input.is_active)
            .bind(password_hash)
            .fetch_optional(pool)
            .await
    }

    /// Delete a user, applying the reference policy in one transaction:
    /// tasks naming the user as `created_by` protect it from deletion,
    /// `assigned_to` references are nulled, and the student profile (with
    /// its progress rows) is removed with it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<UserDeletion, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let protected: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM tasks WHERE created_by = $1)")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;
        if protected {
            return Ok(UserDeletion::Protected);
        }

        sqlx::query("UPDATE tasks SET assigned_to = NULL, updated_at = NOW() WHERE assigned_to = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query(
            "DELETE FROM student_task_progress
             WHERE student_id IN (SELECT id FROM students WHERE user_id = $1)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;
        sqlx::query("DELETE FROM students WHERE user_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(if result.rows_affected() > 0 {
            UserDeletion::Deleted
        } else {
            UserDeletion::NotFound
        })
    }
}

fn push_conditions(qb: &mut QueryBuilder<'_, Postgres>, params: &UserListParams) {
    let mut cond = Conditions::new();
    if let Some(is_active) = params.is_active {
        cond.sep(qb);
        qb.push("is_active = ").push_bind(is_active);
    }
    if let Some(term) = &params.search {
        let pattern = search_pattern(term);
        cond.sep(qb);
        qb.push("(username ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR email ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR first_name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR last_name ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}
