//! Background worker draining the click event queue.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

use crate::domain::click_event::ClickEvent;
use crate::domain::entities::NewClick;
use crate::domain::repositories::ClickRepository;

/// Persists queued click events until the channel closes.
///
/// Each event is written with [`ClickRepository::record_click`], which
/// appends the event row and bumps the link counter in one transactional
/// step. Transient storage failures are retried with exponential backoff;
/// events that still fail are logged and counted, never silently dropped.
pub async fn run_click_worker(
    mut rx: mpsc::Receiver<ClickEvent>,
    clicks: Arc<dyn ClickRepository>,
) {
    while let Some(event) = rx.recv().await {
        let strategy = ExponentialBackoff::from_millis(50).map(jitter).take(3);

        let result = Retry::spawn(strategy, || {
            let new_click = NewClick {
                link_id: event.link_id,
                ip: event.ip.clone(),
                user_agent: event.user_agent.clone(),
                referer: event.referer.clone(),
                country: event.country.clone(),
            };
            let clicks = clicks.clone();
            async move { clicks.record_click(new_click).await }
        })
        .await;

        match result {
            Ok(click) => {
                metrics::counter!("clicks_recorded_total").increment(1);
                tracing::debug!(code = %event.code, click_id = click.id, "click recorded");
            }
            Err(e) => {
                metrics::counter!("clicks_failed_total").increment(1);
                tracing::error!(
                    code = %event.code,
                    link_id = event.link_id,
                    error = %e,
                    "failed to record click after retries"
                );
            }
        }
    }

    tracing::info!("click queue closed, worker exiting");
}
