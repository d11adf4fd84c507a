use super::{ChangeEvent, Subscription};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

struct Subscriber {
    round_id: String,
    tx: mpsc::UnboundedSender<ChangeEvent>,
    token: CancellationToken,
}

/// In-process fan-out of score changes to subscriptions filtered by round.
///
/// Callers publish while holding their own write lock, so every subscriber
/// sees changes in commit order.
#[derive(Clone, Default)]
pub struct ChangeFeed {
    subscribers: Arc<Mutex<Vec<Subscriber>>>,
}

impl ChangeFeed {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn subscribe(&self, round_id: &str) -> Subscription {
        let (tx, rx) = mpsc::unbounded_channel();
        let token = CancellationToken::new();
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Subscriber {
                round_id: round_id.to_string(),
                tx,
                token: token.clone(),
            });
        debug!(round_id, "score feed opened");
        Subscription::new(rx, token)
    }

    pub fn publish(&self, event: &ChangeEvent) {
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        subscribers.retain(|s| !s.token.is_cancelled() && !s.tx.is_closed());
        for subscriber in subscribers
            .iter()
            .filter(|s| s.round_id == event.row.round_id)
        {
            // a closed receiver is pruned on the next publish
            let _ = subscriber.tx.send(event.clone());
        }
    }

    /// Live subscriptions, pruning any that were torn down.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        subscribers.retain(|s| !s.token.is_cancelled() && !s.tx.is_closed());
        subscribers.len()
    }
}
