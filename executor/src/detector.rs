//! Best-effort detection of the host mapping application.
//!
//! The process scan matches a name fragment, so a host app running under an
//! unexpected process name goes unnoticed. That miss is accepted.

use std::ffi::OsStr;
use sysinfo::{ProcessesToUpdate, System};
use tracing::debug;

pub const DEFAULT_HOST_PROCESS_FRAGMENT: &str = "atakmap";

pub trait RunningAppDetector: Send + Sync {
    fn is_running(&self) -> bool;
}

/// Scans the process list for a case-insensitive name fragment.
#[derive(Debug, Clone)]
pub struct ProcessListDetector {
    fragment: String,
}

impl ProcessListDetector {
    pub fn new(fragment: impl Into<String>) -> Self {
        Self {
            fragment: fragment.into().to_lowercase(),
        }
    }

    pub fn fragment(&self) -> &str {
        &self.fragment
    }
}

impl Default for ProcessListDetector {
    fn default() -> Self {
        Self::new(DEFAULT_HOST_PROCESS_FRAGMENT)
    }
}

impl RunningAppDetector for ProcessListDetector {
    fn is_running(&self) -> bool {
        let mut system = System::new();
        system.refresh_processes(ProcessesToUpdate::All, true);

        let found = system.processes().iter().find(|(_, process)| {
            fragment_matches(process.name(), &self.fragment)
                || process
                    .cmd()
                    .iter()
                    .any(|arg| fragment_matches(arg, &self.fragment))
        });

        match found {
            Some((pid, process)) => {
                debug!(
                    "Host app process detected: {} (pid {})",
                    process.name().to_string_lossy(),
                    pid
                );
                true
            }
            None => false,
        }
    }
}

fn fragment_matches(candidate: &OsStr, fragment: &str) -> bool {
    candidate.to_string_lossy().to_lowercase().contains(fragment)
}

/// Always returns the same answer.
#[derive(Debug, Clone, Copy)]
pub struct FixedDetector {
    running: bool,
}

impl FixedDetector {
    pub fn new(running: bool) -> Self {
        Self { running }
    }

    pub fn running() -> Self {
        Self::new(true)
    }

    pub fn not_running() -> Self {
        Self::new(false)
    }
}

impl RunningAppDetector for FixedDetector {
    fn is_running(&self) -> bool {
        self.running
    }
}
