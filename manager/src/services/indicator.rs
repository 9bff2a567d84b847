use std::sync::RwLock;
use tracing::{debug, info};

/// Persistent "schedule is active" notice.
///
/// Holds the status line while a schedule is active and clears it on stop.
/// The line is surfaced through the status endpoint and the log.
#[derive(Default)]
pub struct ForegroundIndicator {
    line: RwLock<Option<String>>,
}

impl ForegroundIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&self, status_line: &str) {
        self.set(Some(status_line.to_string()));
        info!("Schedule indicator started: {}", status_line);
    }

    pub fn update(&self, status_line: &str) {
        self.set(Some(status_line.to_string()));
        debug!("Schedule indicator updated: {}", status_line);
    }

    pub fn stop(&self) {
        if self.is_running() {
            info!("Schedule indicator stopped");
        }
        self.set(None);
    }

    pub fn current(&self) -> Option<String> {
        match self.line.read() {
            Ok(line) => line.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.current().is_some()
    }

    fn set(&self, value: Option<String>) {
        match self.line.write() {
            Ok(mut line) => *line = value,
            Err(poisoned) => *poisoned.into_inner() = value,
        }
    }
}
