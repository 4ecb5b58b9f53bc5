//! Diagnostic channel for values that should be seen but not raised.
//!
//! Unrecognized error bodies and unrecognized error values are emitted here
//! alongside the error the caller receives, so an operator can find the
//! original payload in the logs.

use std::sync::Mutex;

use log::warn;
use serde_json::Value;

pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, what: &str, value: &Value);
}

/// Default sink, writes through the `log` facade at warn level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn emit(&self, what: &str, value: &Value) {
        warn!("{what}: {value}");
    }
}

/// Sink that keeps every emission in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<(String, Value)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far.
    pub fn records(&self) -> Vec<(String, Value)> {
        match self.records.lock() {
            Ok(records) => records.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&self, what: &str, value: &Value) {
        let mut records = match self.records.lock() {
            Ok(records) => records,
            Err(poisoned) => poisoned.into_inner(),
        };
        records.push((what.to_string(), value.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_sink_keeps_emissions_in_order() {
        let sink = MemorySink::new();
        sink.emit("first", &serde_json::json!(1));
        sink.emit("second", &serde_json::json!({"a": 2}));
        let records = sink.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].0, "first");
        assert_eq!(records[1].1["a"], 2);
    }
}
