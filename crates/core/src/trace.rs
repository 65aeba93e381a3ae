use std::cell::RefCell;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceLevel {
    Debug,
    Advisory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEvent {
    pub level: TraceLevel,
    pub message: String,
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            TraceLevel::Debug => write!(f, "debug: {}", self.message),
            TraceLevel::Advisory => write!(f, "advisory: {}", self.message),
        }
    }
}

/// Trace channel owned by a single analysis run.
///
/// Every event is forwarded to `tracing`; the run also keeps its own copy so a
/// driver can show what happened in one unit without any global state.
/// Advisories are always kept, debug events only when enabled.
#[derive(Debug, Default)]
pub struct RunTrace {
    enabled: bool,
    events: RefCell<Vec<TraceEvent>>,
}

impl RunTrace {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            events: RefCell::new(Vec::new()),
        }
    }

    pub fn debug(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!("{}", message);
        if self.enabled {
            self.push(TraceLevel::Debug, message);
        }
    }

    pub fn advisory(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("{}", message);
        self.push(TraceLevel::Advisory, message);
    }

    pub fn advisories(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter(|e| e.level == TraceLevel::Advisory)
            .map(|e| e.message.clone())
            .collect()
    }

    pub fn into_events(self) -> Vec<TraceEvent> {
        self.events.into_inner()
    }

    fn push(&self, level: TraceLevel, message: String) {
        self.events.borrow_mut().push(TraceEvent { level, message });
    }
}
