//! Index-changed notification fan-out.
//!
//! The controller emits once per accepted change; two adapters consume the
//! same emission: a direct callback slot and a list of channel subscribers.

use std::fmt;

use serde::Serialize;
use tokio::sync::mpsc;

/// Emitted after an accepted index change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexChanged {
    pub previous: usize,
    pub index: usize,
}

type Callback = Box<dyn FnMut(usize) + Send>;

#[derive(Default)]
pub struct Notifier {
    callback: Option<Callback>,
    subscribers: Vec<mpsc::UnboundedSender<IndexChanged>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the direct callback, replacing any previous one
    pub fn on_change<F>(&mut self, callback: F)
    where
        F: FnMut(usize) + Send + 'static,
    {
        self.callback = Some(Box::new(callback));
    }

    /// Open a new subscription channel
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<IndexChanged> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    pub(crate) fn emit(&mut self, event: IndexChanged) {
        // Receivers that were dropped are pruned here
        self.subscribers.retain(|tx| tx.send(event).is_ok());

        if let Some(callback) = self.callback.as_mut() {
            callback(event.index);
        }
    }
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("callback", &self.callback.is_some())
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_callback_and_subscriber_see_same_event() {
        let mut notifier = Notifier::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        notifier.on_change(move |index| sink.lock().unwrap().push(index));
        let mut rx = notifier.subscribe();

        notifier.emit(IndexChanged { previous: 0, index: 3 });

        assert_eq!(*seen.lock().unwrap(), vec![3]);
        assert_eq!(rx.try_recv().unwrap(), IndexChanged { previous: 0, index: 3 });
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_dropped_subscribers_are_pruned() {
        let mut notifier = Notifier::new();
        let rx = notifier.subscribe();
        let _kept = notifier.subscribe();
        drop(rx);

        notifier.emit(IndexChanged { previous: 1, index: 2 });
        assert_eq!(notifier.subscribers.len(), 1);
    }

    #[tokio::test]
    async fn test_async_subscriber() {
        let mut notifier = Notifier::new();
        let mut rx = notifier.subscribe();

        notifier.emit(IndexChanged { previous: 4, index: 1 });

        assert_eq!(rx.recv().await, Some(IndexChanged { previous: 4, index: 1 }));
    }
}
