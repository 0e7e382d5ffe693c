//! Shared helpers for dispatch integration tests.

use std::sync::{Arc, Mutex};

use request_router::routing::{Controller, ControllerRegistry, HandlerError};

/// Ordered record of everything that ran during a test.
#[derive(Clone, Default)]
pub struct CallLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    pub fn push(&self, entry: impl Into<String>) {
        self.entries.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().unwrap().clone()
    }

    /// A middleware callback that records `label`.
    pub fn middleware(&self, label: &'static str) -> impl Fn() + Send + Sync + 'static {
        let log = self.clone();
        move || log.push(label)
    }
}

/// Records `Target.action` for every call; `fail` returns an error.
pub struct RecordingController {
    target: &'static str,
    log: CallLog,
}

impl Controller for RecordingController {
    fn call(&mut self, action: &str) -> Result<(), HandlerError> {
        if action == "fail" {
            return Err(HandlerError::failed(format!("{} refused", self.target)));
        }
        self.log.push(format!("{}.{}", self.target, action));
        Ok(())
    }
}

/// A registry holding a [`RecordingController`] for each of `targets`.
pub fn recording_registry(log: &CallLog, targets: &[&'static str]) -> ControllerRegistry {
    let mut registry = ControllerRegistry::new();
    for &target in targets {
        let log = log.clone();
        registry.register(target, move || RecordingController {
            target,
            log: log.clone(),
        });
    }
    registry
}
