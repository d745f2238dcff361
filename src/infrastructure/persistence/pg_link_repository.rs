//! PostgreSQL implementation of the link repository.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;

use crate::domain::entities::{Link, LinkUpdate, NewLink};
use crate::domain::repositories::{LinkRepository, LinkWithClicks};
use crate::error::{AppError, is_unique_violation_on};
use crate::infrastructure::persistence::with_deadline;

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: i64,
    code: String,
    original_url: String,
    owner_id: i64,
    created_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Link::new(
            row.id,
            row.code,
            row.original_url,
            row.owner_id,
            row.created_at,
            row.expires_at,
        )
    }
}

#[derive(sqlx::FromRow)]
struct LinkWithClicksRow {
    id: i64,
    code: String,
    original_url: String,
    owner_id: i64,
    created_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
    total_clicks: i64,
}

impl From<LinkWithClicksRow> for LinkWithClicks {
    fn from(row: LinkWithClicksRow) -> Self {
        LinkWithClicks {
            link: Link::new(
                row.id,
                row.code,
                row.original_url,
                row.owner_id,
                row.created_at,
                row.expires_at,
            ),
            total_clicks: row.total_clicks,
        }
    }
}

/// PostgreSQL repository for short link storage and retrieval.
///
/// Uses SQLx prepared statements for SQL injection protection. Click counts
/// are derived with an aggregate over the event log at query time.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
    deadline: Duration,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>, deadline: Duration) -> Self {
        Self { pool, deadline }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        with_deadline("link.create", self.deadline, async {
            let row = sqlx::query_as::<_, LinkRow>(
                r#"
                INSERT INTO links (code, original_url, owner_id, expires_at)
                VALUES ($1, $2, $3, $4)
                RETURNING id, code, original_url, owner_id, created_at, expires_at
                "#,
            )
            .bind(&new_link.code)
            .bind(&new_link.original_url)
            .bind(new_link.owner_id)
            .bind(new_link.expires_at)
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(|e| {
                if is_unique_violation_on(&e, "links_code_key") {
                    AppError::alias_taken(
                        "Short code is already in use",
                        json!({ "code": new_link.code }),
                    )
                } else {
                    AppError::from(e)
                }
            })?;

            Ok(row.into())
        })
        .await
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        with_deadline("link.find_by_code", self.deadline, async {
            let row = sqlx::query_as::<_, LinkRow>(
                r#"
                SELECT id, code, original_url, owner_id, created_at, expires_at
                FROM links
                WHERE code = $1
                "#,
            )
            .bind(code)
            .fetch_optional(self.pool.as_ref())
            .await?;

            Ok(row.map(Link::from))
        })
        .await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError> {
        with_deadline("link.find_by_id", self.deadline, async {
            let row = sqlx::query_as::<_, LinkRow>(
                r#"
                SELECT id, code, original_url, owner_id, created_at, expires_at
                FROM links
                WHERE id = $1
                "#,
            )
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

            Ok(row.map(Link::from))
        })
        .await
    }

    async fn list_by_owner(
        &self,
        owner_id: i64,
        offset: i64,
        limit: i64,
        search: Option<String>,
    ) -> Result<Vec<LinkWithClicks>, AppError> {
        with_deadline("link.list_by_owner", self.deadline, async {
            let rows = sqlx::query_as::<_, LinkWithClicksRow>(
                r#"
                SELECT
                    l.id, l.code, l.original_url, l.owner_id, l.created_at,
                    l.expires_at,
                    COUNT(c.id) AS total_clicks
                FROM links l
                LEFT JOIN clicks c ON c.link_id = l.id
                WHERE l.owner_id = $1
                  AND ($2::text IS NULL
                       OR l.original_url ILIKE '%' || $2 || '%'
                       OR l.code ILIKE '%' || $2 || '%')
                GROUP BY l.id
                ORDER BY l.created_at DESC
                LIMIT $3 OFFSET $4
                "#,
            )
            .bind(owner_id)
            .bind(&search)
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool.as_ref())
            .await?;

            Ok(rows.into_iter().map(LinkWithClicks::from).collect())
        })
        .await
    }

    async fn count_by_owner(
        &self,
        owner_id: i64,
        search: Option<String>,
    ) -> Result<i64, AppError> {
        with_deadline("link.count_by_owner", self.deadline, async {
            let count = sqlx::query_scalar::<_, i64>(
                r#"
                SELECT COUNT(*)
                FROM links
                WHERE owner_id = $1
                  AND ($2::text IS NULL
                       OR original_url ILIKE '%' || $2 || '%'
                       OR code ILIKE '%' || $2 || '%')
                "#,
            )
            .bind(owner_id)
            .bind(&search)
            .fetch_one(self.pool.as_ref())
            .await?;

            Ok(count)
        })
        .await
    }

    async fn update(&self, id: i64, update: LinkUpdate) -> Result<Link, AppError> {
        // Two-level Option on expires_at: the outer level is "touch this
        // column at all", the inner one is the new value (NULL clears it).
        let set_expires_at = update.expires_at.is_some();
        let expires_at = update.expires_at.flatten();

        with_deadline("link.update", self.deadline, async {
            let row = sqlx::query_as::<_, LinkRow>(
                r#"
                UPDATE links
                SET original_url = COALESCE($2, original_url),
                    expires_at = CASE WHEN $3 THEN $4 ELSE expires_at END
                WHERE id = $1
                RETURNING id, code, original_url, owner_id, created_at, expires_at
                "#,
            )
            .bind(id)
            .bind(&update.original_url)
            .bind(set_expires_at)
            .bind(expires_at)
            .fetch_optional(self.pool.as_ref())
            .await?;

            row.map(Link::from)
                .ok_or_else(|| AppError::not_found("Link not found", json!({ "id": id })))
        })
        .await
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        with_deadline("link.delete", self.deadline, async {
            let result = sqlx::query("DELETE FROM links WHERE id = $1")
                .bind(id)
                .execute(self.pool.as_ref())
                .await?;

            Ok(result.rows_affected() > 0)
        })
        .await
    }

    async fn ping(&self) -> Result<(), AppError> {
        with_deadline("link.ping", self.deadline, async {
            sqlx::query_scalar::<_, i32>("SELECT 1")
                .fetch_one(self.pool.as_ref())
                .await?;

            Ok(())
        })
        .await
    }
}
