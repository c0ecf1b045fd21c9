//! Shared helpers for unit tests (no GPU required)

use crate::log::{LogEntry, LogSeverity, Logger};
use std::sync::{Arc, Mutex};

/// Test logger that captures log entries for verification
pub struct CapturingLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl CapturingLogger {
    pub fn new() -> (Self, Arc<Mutex<Vec<LogEntry>>>) {
        let entries = Arc::new(Mutex::new(Vec::new()));
        (Self { entries: entries.clone() }, entries)
    }
}

impl Logger for CapturingLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

/// Count captured entries of a given severity coming from `source`
pub fn count_entries(entries: &Arc<Mutex<Vec<LogEntry>>>, severity: LogSeverity, source: &str) -> usize {
    entries
        .lock()
        .unwrap()
        .iter()
        .filter(|e| e.severity == severity && e.source == source)
        .count()
}
