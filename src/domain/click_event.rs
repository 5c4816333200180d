//! Click event message for asynchronous click tracking.

/// An in-memory click notification passed from the redirect handler to the
/// background worker via a bounded channel.
///
/// Decouples the redirect response from durable click recording: the handler
/// enqueues and returns immediately, the worker persists with retries.
///
/// # Usage Flow
///
/// 1. Created in the redirect handler with request metadata
/// 2. Sent to the channel (non-blocking `try_send`)
/// 3. Processed by [`crate::domain::click_worker::run_click_worker`]
/// 4. Converted to [`crate::domain::entities::NewClick`] for persistence
#[derive(Debug, Clone)]
pub struct ClickEvent {
    /// Id of the resolved link; carried so the worker needs no extra lookup.
    pub link_id: i64,
    /// Short code, for logging only.
    pub code: String,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    pub country: Option<String>,
}

impl ClickEvent {
    pub fn new(
        link_id: i64,
        code: String,
        ip: Option<String>,
        user_agent: Option<&str>,
        referer: Option<&str>,
        country: Option<&str>,
    ) -> Self {
        Self {
            link_id,
            code,
            ip,
            user_agent: user_agent.map(|s| s.to_string()),
            referer: referer.map(|s| s.to_string()),
            country: country.map(|s| s.to_string()),
        }
    }
}
