//! Paint diagnostics.
//!
//! The counter tracks consecutive decorated paints and drops back to zero on
//! any direct paint. Every paint produces one [`PaintEvent`], handed to a
//! [`DiagnosticSink`]: [`TracingSink`] for logs, [`RecordingSink`] for tests.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Default)]
pub struct DiagnosticCounter {
    value: AtomicU32,
}

impl DiagnosticCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one decorated paint and return the new value.
    pub fn increment(&self) -> u32 {
        self.value.fetch_add(1, Ordering::AcqRel) + 1
    }

    pub fn reset(&self) {
        self.value.store(0, Ordering::Release);
    }

    pub fn value(&self) -> u32 {
        self.value.load(Ordering::Acquire)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaintEvent {
    pub decorated: bool,
    pub counter: u32,
}

pub trait DiagnosticSink: Send + Sync {
    fn record(&self, event: PaintEvent);
}

/// Logs "blurred paint N" for decorated paints; resets only show up at trace level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, event: PaintEvent) {
        if event.decorated {
            tracing::info!(target: "blur_layer::paint", counter = event.counter, "blurred paint {}", event.counter);
        } else {
            tracing::trace!(target: "blur_layer::paint", "paint counter reset");
        }
    }
}

/// Keeps every event in order. Clones share the same log.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<PaintEvent>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<PaintEvent> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Just the counter values, e.g. `[1, 2, 3, 0]`.
    pub fn counters(&self) -> Vec<u32> {
        self.events().iter().map(|e| e.counter).collect()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

impl DiagnosticSink for RecordingSink {
    fn record(&self, event: PaintEvent) {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn increment_then_reset() {
        let c = DiagnosticCounter::new();
        assert_eq!(c.increment(), 1);
        assert_eq!(c.increment(), 2);
        c.reset();
        assert_eq!(c.value(), 0);
        assert_eq!(c.increment(), 1);
    }

    #[test]
    fn increments_from_many_threads_are_not_lost() {
        let c = Arc::new(DiagnosticCounter::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let c = Arc::clone(&c);
                thread::spawn(move || {
                    for _ in 0..1000 {
                        c.increment();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(c.value(), 8000);
    }

    #[test]
    fn recording_sink_clones_share_log() {
        let sink = RecordingSink::new();
        let other = sink.clone();
        other.record(PaintEvent { decorated: true, counter: 1 });
        other.record(PaintEvent { decorated: false, counter: 0 });
        assert_eq!(sink.counters(), vec![1, 0]);
        sink.clear();
        assert!(other.events().is_empty());
    }
}
