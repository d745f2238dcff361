//! Click event model for asynchronous click tracking.

/// An in-memory representation of a click for async processing.
///
/// Passed from the redirect handler to the background worker via a bounded
/// channel, decoupling the HTTP response from the database write. Client
/// metadata is optional; classification happens in the worker so the redirect
/// path does no parsing at all.
#[derive(Debug, Clone)]
pub struct ClickEvent {
    pub link_id: i64,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
}

impl ClickEvent {
    /// Creates a new click event.
    ///
    /// # Arguments
    ///
    /// - `link_id` - The resolved link the visitor was redirected through
    /// - `ip` - Optional client IP address
    /// - `user_agent` - Optional raw User-Agent header
    pub fn new(link_id: i64, ip: Option<String>, user_agent: Option<&str>) -> Self {
        Self {
            link_id,
            ip,
            user_agent: user_agent.map(|s| s.to_string()),
        }
    }
}
