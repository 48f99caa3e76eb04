//! Diagnostic reporting
//!
//! The inspection pipeline never surfaces errors to its caller; anomalies go
//! to a [`DiagnosticSink`] as report-and-continue events. Embedders route
//! reports wherever their host wants them; tests collect them with
//! [`CollectSink`].

use parking_lot::Mutex;

use crate::error::MirrorError;

/// One reported anomaly.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Name of the operation that hit the anomaly
    pub operation: &'static str,
    /// What went wrong
    pub error: MirrorError,
}

/// Receiver for report-and-continue anomalies.
pub trait DiagnosticSink: Send + Sync {
    /// Record one anomaly. Implementations must not panic.
    fn report(&self, operation: &'static str, error: &MirrorError);
}

/// Sink that discards every report.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&self, _operation: &'static str, _error: &MirrorError) {}
}

/// Sink that accumulates reports in memory, in arrival order.
#[derive(Debug, Default)]
pub struct CollectSink {
    entries: Mutex<Vec<Diagnostic>>,
}

impl CollectSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of reports received so far.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether no reports have been received.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Drain the collected reports.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.entries.lock())
    }
}

impl DiagnosticSink for CollectSink {
    fn report(&self, operation: &'static str, error: &MirrorError) {
        self.entries.lock().push(Diagnostic {
            operation,
            error: error.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_sink_order() {
        let sink = CollectSink::new();
        assert!(sink.is_empty());

        sink.report("stringify", &MirrorError::DeadObject);
        sink.report("get_property", &MirrorError::ProtoChainTooLong { limit: 64 });
        assert_eq!(sink.len(), 2);

        let reports = sink.take();
        assert_eq!(reports[0].operation, "stringify");
        assert_eq!(reports[0].error, MirrorError::DeadObject);
        assert_eq!(reports[1].operation, "get_property");
        assert!(sink.is_empty());
    }

    #[test]
    fn test_take_drains() {
        let sink = CollectSink::new();
        sink.report("stringify", &MirrorError::DeadObject);
        assert_eq!(sink.take().len(), 1);
        assert_eq!(sink.take().len(), 0);
    }

    #[test]
    fn test_null_sink_discards() {
        let sink = NullSink;
        sink.report("stringify", &MirrorError::DeadObject);
    }
}
