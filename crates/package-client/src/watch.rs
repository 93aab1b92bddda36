//! Watch subscriptions
//!
//! A `WatchSubscription` owns an open event stream for one resource type.
//! Closing it drops the stream, which ends the underlying watch request.
//! The subscription closes itself when dropped, so every exit path of a
//! consumer releases it, and the close hook runs at most once.

use crate::error::PackageClientError;
use futures::stream::BoxStream;
use futures::StreamExt;
use std::fmt;

/// A change observed on the watched resource type.
#[derive(Debug, Clone, PartialEq)]
pub enum WatchEvent<K> {
    Added(K),
    Modified(K),
    Deleted(K),
}

impl<K> WatchEvent<K> {
    /// Snapshot carried by the event
    pub fn object(&self) -> &K {
        match self {
            WatchEvent::Added(obj) | WatchEvent::Modified(obj) | WatchEvent::Deleted(obj) => obj,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            WatchEvent::Added(_) => "Added",
            WatchEvent::Modified(_) => "Modified",
            WatchEvent::Deleted(_) => "Deleted",
        }
    }
}

/// Stream of events delivered to a subscription.
pub type EventStream<K> = BoxStream<'static, Result<WatchEvent<K>, PackageClientError>>;

type CloseHook = Box<dyn FnOnce() + Send>;

/// An open watch on a resource type.
pub struct WatchSubscription<K> {
    stream: Option<EventStream<K>>,
    on_close: Option<CloseHook>,
}

impl<K> WatchSubscription<K> {
    /// Subscription that runs `hook` once, right after the stream is released.
    pub fn with_close_hook(stream: EventStream<K>, hook: impl FnOnce() + Send + 'static) -> Self {
        Self {
            stream: Some(stream),
            on_close: Some(Box::new(hook)),
        }
    }

    /// Wait for the next event.
    ///
    /// Returns `None` once the stream has ended or the subscription has been
    /// closed. Cancel-safe: dropping the returned future loses no event.
    pub async fn next(&mut self) -> Option<Result<WatchEvent<K>, PackageClientError>> {
        match self.stream.as_mut() {
            Some(stream) => stream.next().await,
            None => None,
        }
    }

    /// Release the stream. Later calls are no-ops.
    pub fn close(&mut self) {
        if let Some(stream) = self.stream.take() {
            drop(stream);
            if let Some(hook) = self.on_close.take() {
                hook();
            }
        }
    }

    pub fn is_closed(&self) -> bool {
        self.stream.is_none()
    }
}

impl<K> Drop for WatchSubscription<K> {
    fn drop(&mut self) {
        self.close();
    }
}

impl<K> fmt::Debug for WatchSubscription<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchSubscription")
            .field("closed", &self.is_closed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counting_subscription(events: Vec<WatchEvent<u32>>) -> (WatchSubscription<u32>, Arc<AtomicUsize>) {
        let closed = Arc::new(AtomicUsize::new(0));
        let counter = closed.clone();
        let stream = futures::stream::iter(events.into_iter().map(Ok)).boxed();
        let sub = WatchSubscription::with_close_hook(stream, move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        (sub, closed)
    }

    #[tokio::test]
    async fn test_next_yields_events_in_order() {
        let (mut sub, _) = counting_subscription(vec![WatchEvent::Added(1), WatchEvent::Modified(2)]);
        assert_eq!(sub.next().await.unwrap().unwrap(), WatchEvent::Added(1));
        assert_eq!(sub.next().await.unwrap().unwrap(), WatchEvent::Modified(2));
        assert!(sub.next().await.is_none());
    }

    #[tokio::test]
    async fn test_close_is_idempotent_and_stops_delivery() {
        let (mut sub, closed) = counting_subscription(vec![WatchEvent::Added(1)]);
        sub.close();
        sub.close();
        assert!(sub.is_closed());
        assert!(sub.next().await.is_none());
        drop(sub);
        assert_eq!(closed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_drop_closes() {
        let (sub, closed) = counting_subscription(vec![]);
        drop(sub);
        assert_eq!(closed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_event_accessors() {
        let event = WatchEvent::Deleted(7);
        assert_eq!(*event.object(), 7);
        assert_eq!(event.kind(), "Deleted");
    }
}
