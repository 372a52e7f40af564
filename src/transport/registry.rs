use std::sync::{
    mpsc::{self, Receiver, Sender},
    Arc, Mutex, MutexGuard, PoisonError,
};

use crate::domain::events::{InboundEvent, InboundEventKind};

/// Subscribers shared between a transport and the handles it gave out.
#[derive(Debug, Clone, Default)]
pub struct SubscriberRegistry {
    inner: Arc<Mutex<RegistryInner>>,
}

#[derive(Debug, Default)]
struct RegistryInner {
    next_id: u64,
    subscribers: Vec<Subscriber>,
}

#[derive(Debug)]
struct Subscriber {
    id: u64,
    kinds: Vec<InboundEventKind>,
    tx: Sender<InboundEvent>,
}

impl SubscriberRegistry {
    pub fn register(&self, kinds: &[InboundEventKind]) -> Subscription {
        let mut inner = self.lock();
        let subscription = self.insert(&mut inner, kinds.to_vec());
        drop(inner);

        tracing::debug!(
            subscription_id = subscription.id,
            kinds = ?kinds,
            "subscription registered"
        );
        subscription
    }

    /// Swaps subscriber `old_id` for a fresh one with the same kinds.
    ///
    /// Both happen under one lock, so every event reaches exactly one of the two.
    fn replace(&self, old_id: u64) -> Subscription {
        let mut inner = self.lock();
        let kinds = inner
            .subscribers
            .iter()
            .find(|subscriber| subscriber.id == old_id)
            .map(|subscriber| subscriber.kinds.clone())
            .unwrap_or_default();
        inner.subscribers.retain(|subscriber| subscriber.id != old_id);
        let subscription = self.insert(&mut inner, kinds);
        drop(inner);

        tracing::debug!(
            old_subscription_id = old_id,
            subscription_id = subscription.id,
            "subscription renewed"
        );
        subscription
    }

    fn insert(&self, inner: &mut RegistryInner, kinds: Vec<InboundEventKind>) -> Subscription {
        let (tx, rx) = mpsc::channel();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.subscribers.push(Subscriber { id, kinds, tx });

        Subscription {
            id,
            rx,
            registry: self.clone(),
        }
    }

    /// Delivers `event` to every interested subscriber and returns how many got it.
    pub fn dispatch(&self, event: &InboundEvent) -> usize {
        let kind = event.kind();
        let mut delivered = 0;

        self.lock().subscribers.retain(|subscriber| {
            if !subscriber.kinds.contains(&kind) {
                return true;
            }
            match subscriber.tx.send(event.clone()) {
                Ok(()) => {
                    delivered += 1;
                    true
                }
                Err(_) => false,
            }
        });

        delivered
    }

    #[cfg(test)]
    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }

    fn deregister(&self, id: u64) {
        self.lock().subscribers.retain(|subscriber| subscriber.id != id);
        tracing::debug!(subscription_id = id, "subscription released");
    }

    fn lock(&self) -> MutexGuard<'_, RegistryInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A registered handler set. Events queue up until drained with [`Subscription::try_next`].
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    rx: Receiver<InboundEvent>,
    registry: SubscriberRegistry,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn try_next(&self) -> Option<InboundEvent> {
        self.rx.try_recv().ok()
    }

    /// Re-registers under a new id and hands back whatever was still queued here.
    pub fn renew(self) -> (Subscription, Vec<InboundEvent>) {
        let renewed = self.registry.replace(self.id);
        let pending = self.rx.try_iter().collect();
        (renewed, pending)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.registry.deregister(self.id);
    }
}
