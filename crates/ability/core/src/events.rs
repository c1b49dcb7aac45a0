//! Synchronous change-notification plumbing.
//!
//! Observers subscribe and receive a channel; publishing fans the event out
//! to every live subscriber before the triggering call returns. Delivery is
//! fire-and-forget: having no subscribers is normal, and subscribers that
//! dropped their receiver are pruned on the next publish.

use std::sync::mpsc::{Receiver, Sender, channel};

use crate::types::{AbilityId, AttributeId};

/// Fan-out bus for one event type.
///
/// The simulation is single-threaded and pull-based, so plain synchronous
/// channels are enough: `publish` completes delivery before it returns and
/// never blocks.
#[derive(Debug)]
pub struct EventBus<T> {
    subscribers: Vec<Sender<T>>,
}

impl<T> Default for EventBus<T> {
    fn default() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }
}

impl<T: Clone> EventBus<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new observer and returns its receiving end.
    pub fn subscribe(&mut self) -> Receiver<T> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }

    /// Delivers `event` to every live subscriber, dropping dead ones.
    pub fn publish(&mut self, event: T) {
        if self.subscribers.is_empty() {
            // No subscribers is normal, not an error.
            tracing::trace!("event published with no subscribers");
            return;
        }
        self.subscribers
            .retain(|tx| tx.send(event.clone()).is_ok());
    }

    /// Number of live subscribers as of the last publish.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

/// Lifecycle notifications emitted by a cast controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CastEvent {
    /// A cast began (also fired for instant abilities, before completion).
    Started(AbilityId),
    /// A cast ran to completion: cost applied, effects dispatched, cooldown
    /// started.
    Completed(AbilityId),
    /// A cast was cancelled before completion; nothing was applied.
    Cancelled(AbilityId),
}

impl CastEvent {
    /// The ability this event refers to.
    pub fn ability(&self) -> AbilityId {
        match self {
            Self::Started(id) | Self::Completed(id) | Self::Cancelled(id) => *id,
        }
    }
}

/// Notification that an attribute's derived value changed.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeChanged {
    pub attribute: AttributeId,
    pub old: f32,
    pub new: f32,
}
