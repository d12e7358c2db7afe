use heapless::Deque;
use log::warn;

use crate::types::CompassEvent;

pub trait EventSink {
    fn publish(&mut self, source: u16, event: CompassEvent);
}

/// Discards everything.
impl EventSink for () {
    fn publish(&mut self, _source: u16, _event: CompassEvent) {}
}

impl<T: EventSink + ?Sized> EventSink for &mut T {
    fn publish(&mut self, source: u16, event: CompassEvent) {
        (**self).publish(source, event)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub source: u16,
    pub event: CompassEvent,
}

/// Fixed-capacity FIFO of published events, drained by the application loop.
/// When full, new events are dropped.
pub struct EventQueue<const N: usize> {
    queue: Deque<Event, N>,
    dropped: usize,
}

impl<const N: usize> EventQueue<N> {
    pub const fn new() -> Self {
        Self {
            queue: Deque::new(),
            dropped: 0,
        }
    }

    pub fn pop(&mut self) -> Option<Event> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

impl<const N: usize> Default for EventQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> EventSink for EventQueue<N> {
    fn publish(&mut self, source: u16, event: CompassEvent) {
        if self.queue.push_back(Event { source, event }).is_err() {
            self.dropped += 1;
            warn!("event queue full, dropping {:?} from {}", event, source);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_is_fifo() {
        let mut q: EventQueue<4> = EventQueue::new();
        q.publish(5, CompassEvent::CalibrationStart);
        q.publish(5, CompassEvent::CalibrationEnd);

        assert_eq!(q.len(), 2);
        assert_eq!(q.pop(), Some(Event { source: 5, event: CompassEvent::CalibrationStart }));
        assert_eq!(q.pop(), Some(Event { source: 5, event: CompassEvent::CalibrationEnd }));
        assert!(q.pop().is_none());
    }

    #[test]
    fn full_queue_drops_newest() {
        let mut q: EventQueue<1> = EventQueue::default();
        q.publish(1, CompassEvent::CalibrationRequired);
        q.publish(1, CompassEvent::CalibrationStart);

        assert_eq!(q.dropped(), 1);
        assert_eq!(q.pop().map(|e| e.event), Some(CompassEvent::CalibrationRequired));
        assert!(q.is_empty());
    }

    #[test]
    fn event_ids_are_stable() {
        assert_eq!(CompassEvent::CalibrationRequired.id(), 1);
        assert_eq!(CompassEvent::CalibrationStart.id(), 2);
        assert_eq!(CompassEvent::CalibrationEnd.id(), 3);
    }
}
