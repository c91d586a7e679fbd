//! Counter event model for asynchronous view/click tracking.

use tokio::sync::mpsc::{self, error::TrySendError};
use uuid::Uuid;

/// A pending counter increment.
///
/// Produced by the public page and link redirect handlers, consumed by
/// [`crate::domain::counter_worker::run_counter_worker`]. Sending never blocks
/// the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterEvent {
    /// One visit to a public page, counted against today's date.
    PageView { page_id: Uuid },
    /// One redirect through a link.
    LinkClick { link_id: Uuid },
}

impl CounterEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            CounterEvent::PageView { .. } => "page_view",
            CounterEvent::LinkClick { .. } => "link_click",
        }
    }
}

/// Queues an event without waiting.
///
/// A full or closed queue drops the event with a log line; the caller's
/// response is never affected.
pub fn enqueue(sender: &mpsc::Sender<CounterEvent>, event: CounterEvent) {
    match sender.try_send(event) {
        Ok(()) => {}
        Err(TrySendError::Full(event)) => {
            tracing::warn!(kind = event.kind(), ?event, "Counter queue full, event dropped");
            metrics::counter!("linkhaven_counter_events_dropped_total").increment(1);
        }
        Err(TrySendError::Closed(event)) => {
            tracing::error!(kind = event.kind(), ?event, "Counter queue closed, event dropped");
            metrics::counter!("linkhaven_counter_events_dropped_total").increment(1);
        }
    }
}
