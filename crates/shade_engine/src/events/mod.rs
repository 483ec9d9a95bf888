//! Event queue
//!
//! Gameplay code pushes discrete events while a frame runs; the
//! presentation layer drains them once per frame and maps them to sounds
//! or effects. Events carry the frame time (ms) they were raised at.

/// Event with the time it was raised at
#[derive(Debug, Clone, PartialEq)]
pub struct Stamped<E> {
    /// Milliseconds since the level started
    pub timestamp: u64,
    /// The event itself
    pub event: E,
}

/// FIFO queue of events raised during a frame
#[derive(Debug, Clone)]
pub struct EventQueue<E> {
    pending: Vec<Stamped<E>>,
    current_time: u64,
}

impl<E> EventQueue<E> {
    /// Create a new empty queue
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            current_time: 0,
        }
    }

    /// Update current time (ms since start); later events are stamped with it
    pub fn update_time(&mut self, time: u64) {
        self.current_time = time;
    }

    /// Queue an event
    pub fn push(&mut self, event: E) {
        self.pending.push(Stamped {
            timestamp: self.current_time,
            event,
        });
    }

    /// Take every queued event, oldest first
    pub fn drain(&mut self) -> Vec<Stamped<E>> {
        std::mem::take(&mut self.pending)
    }

    /// Queued events, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &E> + '_ {
        self.pending.iter().map(|stamped| &stamped.event)
    }

    /// Number of queued events
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is queued
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Clear all queued events (useful for restarts)
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl<E> Default for EventQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}
