//! Platform contract.
//!
//! Window creation and the native message pump live outside this crate. The
//! driver only needs a non-blocking event source and somewhere to hand back
//! events it does not understand.

use std::collections::VecDeque;

use crate::input::WindowEvent;

/// A window's event source.
pub trait Platform {
    /// Returns the next pending event without blocking.
    fn poll_event(&mut self) -> Option<WindowEvent>;

    /// Passes an unhandled event to the platform's default handling.
    fn forward(&mut self, event: WindowEvent);
}

/// A platform with no window: events are scripted, forwarded events recorded.
#[derive(Debug, Default)]
pub struct HeadlessPlatform {
    queue: VecDeque<WindowEvent>,
    forwarded: Vec<WindowEvent>,
}

impl HeadlessPlatform {
    /// Creates an empty headless platform.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues an event for the next poll.
    pub fn push(&mut self, event: WindowEvent) {
        self.queue.push_back(event);
    }

    /// Queues several events in order.
    pub fn extend(&mut self, events: impl IntoIterator<Item = WindowEvent>) {
        self.queue.extend(events);
    }

    /// Events still waiting to be polled.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Events the driver forwarded back.
    #[must_use]
    pub fn forwarded(&self) -> &[WindowEvent] {
        &self.forwarded
    }
}

impl Platform for HeadlessPlatform {
    fn poll_event(&mut self) -> Option<WindowEvent> {
        self.queue.pop_front()
    }

    fn forward(&mut self, event: WindowEvent) {
        self.forwarded.push(event);
    }
}
