//! Shared application state injected into handlers.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::services::{AuthService, LinkService, StatsService};
use crate::domain::click_event::ClickEvent;

/// Cloneable handle to the application's services and the click queue.
///
/// Dropping the last clone closes the click channel, which lets the
/// background worker drain and exit during shutdown.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub link_service: Arc<LinkService>,
    pub stats_service: Arc<StatsService>,
    pub click_tx: mpsc::Sender<ClickEvent>,
    pub base_url: String,
}

impl AppState {
    pub fn new(
        auth_service: Arc<AuthService>,
        link_service: Arc<LinkService>,
        stats_service: Arc<StatsService>,
        click_tx: mpsc::Sender<ClickEvent>,
        base_url: String,
    ) -> Self {
        Self {
            auth_service,
            link_service,
            stats_service,
            click_tx,
            base_url,
        }
    }
}
