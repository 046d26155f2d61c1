use std::sync::{Arc, Mutex};

use async_runner::{LifecycleEvent, LifecycleSink, ProcessRunner};

/// A sink that:
/// - records every lifecycle event in arrival order
/// - forwards nothing anywhere else.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<LifecycleEvent>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A runner wired to a fresh recording sink.
    pub fn runner() -> (ProcessRunner, RecordingSink) {
        let sink = RecordingSink::new();
        (ProcessRunner::new(Arc::new(sink.clone())), sink)
    }

    pub fn events(&self) -> Vec<LifecycleEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Events carrying the given label, in arrival order.
    pub fn events_for(&self, label: &str) -> Vec<LifecycleEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.label() == label)
            .collect()
    }

    pub fn start_count(&self) -> usize {
        self.events().iter().filter(|e| !e.is_terminal()).count()
    }

    pub fn terminal_count(&self) -> usize {
        self.events().iter().filter(|e| e.is_terminal()).count()
    }
}

impl LifecycleSink for RecordingSink {
    fn emit(&self, event: LifecycleEvent) {
        self.events.lock().unwrap().push(event);
    }
}
