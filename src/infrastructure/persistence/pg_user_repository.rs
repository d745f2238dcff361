//! PostgreSQL implementation of the user repository.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;

use crate::domain::entities::{NewUser, User};
use crate::domain::repositories::UserRepository;
use crate::error::{AppError, is_unique_violation_on};
use crate::infrastructure::persistence::with_deadline;

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            username: row.username,
            email: row.email,
            password_hash: row.password_hash,
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL repository for user accounts.
pub struct PgUserRepository {
    pool: Arc<PgPool>,
    deadline: Duration,
}

impl PgUserRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>, deadline: Duration) -> Self {
        Self { pool, deadline }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        with_deadline("user.create", self.deadline, async {
            let row = sqlx::query_as::<_, UserRow>(
                r#"
                INSERT INTO users (username, email, password_hash)
                VALUES ($1, $2, $3)
                RETURNING id, username, email, password_hash, created_at
                "#,
            )
            .bind(&new_user.username)
            .bind(&new_user.email)
            .bind(&new_user.password_hash)
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(|e| {
                if is_unique_violation_on(&e, "users_username_key") {
                    AppError::bad_request(
                        "Username is already taken",
                        json!({ "field": "username" }),
                    )
                } else if is_unique_violation_on(&e, "users_email_key") {
                    AppError::bad_request(
                        "Email is already registered",
                        json!({ "field": "email" }),
                    )
                } else {
                    AppError::from(e)
                }
            })?;

            Ok(row.into())
        })
        .await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        with_deadline("user.find_by_email", self.deadline, async {
            let row = sqlx::query_as::<_, UserRow>(
                r#"
                SELECT id, username, email, password_hash, created_at
                FROM users
                WHERE email = $1
                "#,
            )
            .bind(email)
            .fetch_optional(self.pool.as_ref())
            .await?;

            Ok(row.map(User::from))
        })
        .await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        with_deadline("user.find_by_id", self.deadline, async {
            let row = sqlx::query_as::<_, UserRow>(
                r#"
                SELECT id, username, email, password_hash, created_at
                FROM users
                WHERE id = $1
                "#,
            )
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

            Ok(row.map(User::from))
        })
        .await
    }
}
