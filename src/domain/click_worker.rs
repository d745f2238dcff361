//! Background worker that turns click events into durable records.
//!
//! Runs for the lifetime of the process, consuming the bounded channel fed
//! by the redirect handler. When the sender side closes (shutdown), the
//! worker drains every remaining event before exiting, so accepted clicks
//! are not lost to process termination.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, info, warn};

use crate::domain::click_event::ClickEvent;
use crate::domain::entities::NewClick;
use crate::domain::repositories::ClickRepository;
use crate::utils::user_agent::parse_user_agent;

/// Retry attempts per event before it is logged and dropped.
const MAX_ATTEMPTS: usize = 3;

/// Consumes click events until the channel closes, then drains and returns.
///
/// Each event is classified (device/browser/OS) and appended via the click
/// repository. Transient storage failures are retried with jittered
/// exponential backoff; an event that still fails is logged and dropped.
/// No failure ever propagates: the redirect path has already responded.
pub async fn run_click_worker(mut rx: mpsc::Receiver<ClickEvent>, clicks: Arc<dyn ClickRepository>) {
    while let Some(event) = rx.recv().await {
        let client = parse_user_agent(event.user_agent.as_deref());

        let new_click = NewClick {
            link_id: event.link_id,
            ip_address: event.ip,
            user_agent: event.user_agent,
            device_type: client.device_type,
            browser: client.browser,
            os: client.os,
        };

        let strategy = ExponentialBackoff::from_millis(50)
            .map(jitter)
            .take(MAX_ATTEMPTS - 1);

        let result = Retry::start(strategy, || clicks.record(new_click.clone())).await;

        match result {
            Ok(click) => {
                debug!(link_id = click.link_id, "click recorded");
            }
            Err(e) => {
                warn!(
                    link_id = new_click.link_id,
                    error = %e,
                    "dropping click event after {MAX_ATTEMPTS} failed attempts"
                );
            }
        }
    }

    info!("click worker drained, shutting down");
}
