//! Outbound event delivery.

use std::sync::mpsc::{channel, Receiver, Sender};

use super::event::GameEvent;

/// Delivers events either to subscriber channels or, while nobody is
/// subscribed, to a buffer read with [`EventQueue::drain`].
///
/// The two never overlap: once a channel is attached, events stop piling up
/// in the buffer. When the last receiver hangs up, buffering resumes with the
/// event that found it gone.
///
/// ```
/// use rust_dicedraft::core::PlayerId;
/// use rust_dicedraft::events::{EventQueue, GameEvent};
///
/// let mut queue = EventQueue::new();
/// let rx = queue.subscribe();
/// queue.emit(GameEvent::RoundStarted { round: 0, first_player: PlayerId(0) });
///
/// assert!(rx.try_recv().is_ok());
/// assert!(queue.drain().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct EventQueue {
    pending: Vec<GameEvent>,
    subscribers: Vec<Sender<GameEvent>>,
}

impl EventQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a channel that receives every event emitted from now on.
    pub fn subscribe(&mut self) -> Receiver<GameEvent> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn emit(&mut self, event: GameEvent) {
        // Receivers that hung up are forgotten.
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
        if self.subscribers.is_empty() {
            self.pending.push(event);
        }
    }

    /// Take every buffered event, oldest first. Events already sent to a
    /// subscriber are not buffered.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending)
    }

    #[must_use]
    pub fn pending(&self) -> &[GameEvent] {
        &self.pending
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
