//! PostgreSQL implementation of the click event repository.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::entities::{Click, NewClick};
use crate::domain::repositories::ClickRepository;
use crate::error::AppError;
use crate::infrastructure::persistence::with_deadline;

#[derive(sqlx::FromRow)]
struct ClickRow {
    id: i64,
    link_id: i64,
    clicked_at: DateTime<Utc>,
    ip_address: Option<String>,
    user_agent: Option<String>,
    device_type: String,
    browser: String,
    os: String,
}

impl From<ClickRow> for Click {
    fn from(row: ClickRow) -> Self {
        Click {
            id: row.id,
            link_id: row.link_id,
            clicked_at: row.clicked_at,
            ip_address: row.ip_address,
            user_agent: row.user_agent,
            device_type: row.device_type,
            browser: row.browser,
            os: row.os,
        }
    }
}

/// PostgreSQL repository for the append-only click event log.
pub struct PgClickRepository {
    pool: Arc<PgPool>,
    deadline: Duration,
}

impl PgClickRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>, deadline: Duration) -> Self {
        Self { pool, deadline }
    }
}

#[async_trait]
impl ClickRepository for PgClickRepository {
    async fn record(&self, new_click: NewClick) -> Result<Click, AppError> {
        with_deadline("click.record", self.deadline, async {
            let row = sqlx::query_as::<_, ClickRow>(
                r#"
                INSERT INTO clicks
                    (link_id, ip_address, user_agent, device_type, browser, os)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING id, link_id, clicked_at, ip_address, user_agent,
                          device_type, browser, os
                "#,
            )
            .bind(new_click.link_id)
            .bind(&new_click.ip_address)
            .bind(&new_click.user_agent)
            .bind(&new_click.device_type)
            .bind(&new_click.browser)
            .bind(&new_click.os)
            .fetch_one(self.pool.as_ref())
            .await?;

            Ok(row.into())
        })
        .await
    }

    async fn list_for_link(&self, link_id: i64) -> Result<Vec<Click>, AppError> {
        with_deadline("click.list_for_link", self.deadline, async {
            let rows = sqlx::query_as::<_, ClickRow>(
                r#"
                SELECT id, link_id, clicked_at, ip_address, user_agent,
                       device_type, browser, os
                FROM clicks
                WHERE link_id = $1
                ORDER BY clicked_at ASC, id ASC
                "#,
            )
            .bind(link_id)
            .fetch_all(self.pool.as_ref())
            .await?;

            Ok(rows.into_iter().map(Click::from).collect())
        })
        .await
    }
}
