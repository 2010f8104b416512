//! Event bus port — fan-out of listing and reservation lifecycle events.

use std::future::Future;

use hearth_domain::error::HearthError;
use hearth_domain::event::Event;

/// Publishes lifecycle events to whoever is watching availability.
///
/// Publishing is fire-and-forget from the caller's perspective: a publish
/// with no subscribers still succeeds.
pub trait EventPublisher {
    fn publish(&self, event: Event) -> impl Future<Output = Result<(), HearthError>> + Send;
}

impl<T: EventPublisher + Send + Sync> EventPublisher for std::sync::Arc<T> {
    fn publish(&self, event: Event) -> impl Future<Output = Result<(), HearthError>> + Send {
        (**self).publish(event)
    }
}
