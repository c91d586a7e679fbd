//! Background worker applying view/click increments.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Semaphore, mpsc};
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

use crate::domain::counter_event::CounterEvent;
use crate::domain::repositories::AnalyticsRepository;
use crate::error::AppError;

/// Backoff grows as `RETRY_FACTOR_MS * 2^n`: 50ms, 100ms, ...
const RETRY_FACTOR_MS: u64 = 25;
const RETRY_MAX_DELAY: Duration = Duration::from_secs(1);
const RETRY_ATTEMPTS: usize = 3;

/// Consumes counter events until every sender is dropped, then waits for
/// the increments still in flight.
///
/// At most `concurrency` increments are in flight at once. Each increment is
/// retried with exponential backoff; a final failure is logged and counted,
/// never propagated.
pub async fn run_counter_worker(
    mut rx: mpsc::Receiver<CounterEvent>,
    repository: Arc<dyn AnalyticsRepository>,
    concurrency: usize,
) {
    let permits = concurrency.clamp(1, u32::MAX as usize);
    let semaphore = Arc::new(Semaphore::new(permits));

    while let Some(event) = rx.recv().await {
        let Ok(permit) = semaphore.clone().acquire_owned().await else {
            break;
        };
        let repository = repository.clone();

        tokio::spawn(async move {
            let _ = apply_event(repository.as_ref(), event).await;
            drop(permit);
        });
    }

    let _ = semaphore.acquire_many(permits as u32).await;
    tracing::info!("Counter worker stopped");
}

/// Applies one event with retry.
pub async fn apply_event(
    repository: &dyn AnalyticsRepository,
    event: CounterEvent,
) -> Result<(), AppError> {
    let strategy = ExponentialBackoff::from_millis(2)
        .factor(RETRY_FACTOR_MS)
        .max_delay(RETRY_MAX_DELAY)
        .map(jitter)
        .take(RETRY_ATTEMPTS - 1);

    let result = Retry::spawn(strategy, || async move {
        match event {
            CounterEvent::PageView { page_id } => repository.increment_page_views(page_id).await,
            CounterEvent::LinkClick { link_id } => repository.increment_link_clicks(link_id).await,
        }
    })
    .await;

    match &result {
        Ok(()) => {
            metrics::counter!("linkhaven_counter_events_applied_total", "kind" => event.kind())
                .increment(1);
        }
        Err(e) => {
            tracing::error!(kind = event.kind(), ?event, error = %e, "Counter increment failed");
            metrics::counter!("linkhaven_counter_events_failed_total", "kind" => event.kind())
                .increment(1);
        }
    }

    result
}
