//! Diagnostic sinks.
//!
//! Diagnostic passes never write to a global logger directly. They write
//! [`DiagnosticRecord`]s to the [`DiagnosticSink`] carried by
//! [`PassData`](crate::PassData), so the destination is chosen by whoever
//! builds the pipeline:
//!
//! - [`TracingSink`] forwards records to `tracing` under the
//!   [`DIAGNOSTIC_TARGET`] target (the default)
//! - [`MemorySink`] keeps them in order for later inspection
//! - [`FanoutSink`] duplicates them to several sinks

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};

/// `tracing` target used by [`TracingSink`].
pub const DIAGNOSTIC_TARGET: &str = "partiq::diag";

/// Severity of a diagnostic record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
    /// Detail that is only shown with `-vv` or a matching `RUST_LOG`.
    Debug,
    /// Regular pass output; the level the built-in passes use.
    Info,
    /// Something a pass could not report normally.
    Warn,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DiagnosticLevel::Debug => "debug",
            DiagnosticLevel::Info => "info",
            DiagnosticLevel::Warn => "warn",
        };
        f.write_str(s)
    }
}

/// A single line of diagnostic output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticRecord {
    /// Severity.
    pub level: DiagnosticLevel,
    /// Name of the pass that produced the record.
    pub pass: String,
    /// Human-readable message.
    pub message: String,
}

impl DiagnosticRecord {
    /// Create a record at the given level.
    pub fn new(
        level: DiagnosticLevel,
        pass: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            level,
            pass: pass.into(),
            message: message.into(),
        }
    }

    /// Create an informational record.
    pub fn info(pass: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Info, pass, message)
    }
}

/// Destination for diagnostic records.
pub trait DiagnosticSink: Send + Sync {
    /// Write one record.
    fn emit(&self, record: DiagnosticRecord);

    /// Write an informational record.
    fn info(&self, pass: &str, message: String) {
        self.emit(DiagnosticRecord::info(pass, message));
    }
}

/// Sink that forwards records to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, record: DiagnosticRecord) {
        match record.level {
            DiagnosticLevel::Debug => {
                tracing::debug!(target: DIAGNOSTIC_TARGET, pass = %record.pass, "{}", record.message);
            }
            DiagnosticLevel::Info => {
                tracing::info!(target: DIAGNOSTIC_TARGET, pass = %record.pass, "{}", record.message);
            }
            DiagnosticLevel::Warn => {
                tracing::warn!(target: DIAGNOSTIC_TARGET, pass = %record.pass, "{}", record.message);
            }
        }
    }
}

/// Sink that keeps every record in memory, in emission order.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<DiagnosticRecord>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all records so far.
    pub fn records(&self) -> Vec<DiagnosticRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Messages of all records so far.
    pub fn messages(&self) -> Vec<String> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|r| r.message.clone())
            .collect()
    }

    /// Drop all records.
    pub fn clear(&self) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&self, record: DiagnosticRecord) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record);
    }
}

/// Sink that forwards every record to each of its children.
#[derive(Default)]
pub struct FanoutSink {
    sinks: Vec<Arc<dyn DiagnosticSink>>,
}

impl FanoutSink {
    /// Create a fanout over the given sinks.
    pub fn new(sinks: Vec<Arc<dyn DiagnosticSink>>) -> Self {
        Self { sinks }
    }

    /// Add another destination.
    #[must_use]
    pub fn with(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sinks.push(sink);
        self
    }
}

impl DiagnosticSink for FanoutSink {
    fn emit(&self, record: DiagnosticRecord) {
        if let Some((last, rest)) = self.sinks.split_last() {
            for sink in rest {
                sink.emit(record.clone());
            }
            last.emit(record);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_keeps_order() {
        let sink = MemorySink::new();
        sink.info("a", "first".into());
        sink.info("b", "second".into());

        let records = sink.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].pass, "a");
        assert_eq!(records[0].level, DiagnosticLevel::Info);
        assert_eq!(sink.messages(), vec!["first", "second"]);

        sink.clear();
        assert!(sink.records().is_empty());
    }

    #[test]
    fn test_fanout_duplicates_records() {
        let a = Arc::new(MemorySink::new());
        let b = Arc::new(MemorySink::new());
        let fanout = FanoutSink::new(vec![a.clone() as Arc<dyn DiagnosticSink>]).with(b.clone());

        fanout.info("pass", "hello".into());

        assert_eq!(a.messages(), vec!["hello"]);
        assert_eq!(b.messages(), vec!["hello"]);
    }

    #[test]
    fn test_empty_fanout_is_noop() {
        FanoutSink::default().info("pass", "dropped".into());
    }

    #[test]
    fn test_tracing_sink_without_subscriber() {
        TracingSink.emit(DiagnosticRecord::info("pass", "no subscriber installed"));
    }

    #[test]
    fn test_levels_are_kept_per_record() {
        let sink = MemorySink::new();
        sink.emit(DiagnosticRecord::new(DiagnosticLevel::Debug, "p", "detail"));
        sink.info("p", "normal".into());
        sink.emit(DiagnosticRecord::new(DiagnosticLevel::Warn, "p", "odd"));

        let levels: Vec<_> = sink.records().iter().map(|r| r.level).collect();
        assert_eq!(
            levels,
            vec![
                DiagnosticLevel::Debug,
                DiagnosticLevel::Info,
                DiagnosticLevel::Warn
            ]
        );

        // Each level reaches tracing without a subscriber installed.
        for record in sink.records() {
            TracingSink.emit(record);
        }
    }

    #[test]
    fn test_level_display() {
        assert_eq!(DiagnosticLevel::Info.to_string(), "info");
        assert_eq!(DiagnosticLevel::Warn.to_string(), "warn");
        assert_eq!(DiagnosticLevel::Debug.to_string(), "debug");
    }
}
