//! Non-fatal diagnostics for malformed accelerators
//!
//! An invalid accelerator never aborts an operation. Instead a [`Diagnostic`]
//! carrying the call stack of the offending call is handed to a
//! [`DiagnosticSink`].

use std::backtrace::{Backtrace, BacktraceStatus};
use std::cell::RefCell;

use super::accelerator::AcceleratorError;

/// A malformed accelerator, with the call stack that passed it in
#[derive(Debug)]
pub struct Diagnostic {
    pub accelerator: String,
    pub error: AcceleratorError,
    pub backtrace: Backtrace,
}

impl Diagnostic {
    /// Capture a diagnostic at the current call site
    pub fn capture(accelerator: &str, error: AcceleratorError, with_backtrace: bool) -> Self {
        let backtrace = if with_backtrace {
            Backtrace::force_capture()
        } else {
            Backtrace::disabled()
        };
        Self {
            accelerator: accelerator.to_string(),
            error,
            backtrace,
        }
    }
}

/// Receiver for accelerator diagnostics
pub trait DiagnosticSink {
    fn report(&self, diagnostic: &Diagnostic);
}

/// Default sink: logs a warning through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: &Diagnostic) {
        if diagnostic.backtrace.status() == BacktraceStatus::Captured {
            tracing::warn!(
                target: "localshortcut::diagnostics",
                accelerator = %diagnostic.accelerator,
                "{} is not a valid accelerator: {}\n{}",
                diagnostic.accelerator,
                diagnostic.error,
                diagnostic.backtrace
            );
        } else {
            tracing::warn!(
                target: "localshortcut::diagnostics",
                accelerator = %diagnostic.accelerator,
                "{} is not a valid accelerator: {}",
                diagnostic.accelerator,
                diagnostic.error
            );
        }
    }
}

/// A diagnostic as kept by [`RecordingSink`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedDiagnostic {
    pub accelerator: String,
    pub error: AcceleratorError,
    /// Rendered call stack; empty when none was captured
    pub backtrace: String,
}

/// Sink that keeps every diagnostic, for inspection in tests
#[derive(Debug, Default)]
pub struct RecordingSink {
    records: RefCell<Vec<RecordedDiagnostic>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<RecordedDiagnostic> {
        self.records.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.records.borrow_mut().clear();
    }
}

impl DiagnosticSink for RecordingSink {
    fn report(&self, diagnostic: &Diagnostic) {
        self.records.borrow_mut().push(RecordedDiagnostic {
            accelerator: diagnostic.accelerator.clone(),
            error: diagnostic.error.clone(),
            backtrace: match diagnostic.backtrace.status() {
                BacktraceStatus::Captured => diagnostic.backtrace.to_string(),
                _ => String::new(),
            },
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_with_backtrace() {
        let diagnostic = Diagnostic::capture("Ctrl+", AcceleratorError::Empty, true);
        assert_eq!(diagnostic.backtrace.status(), BacktraceStatus::Captured);
    }

    #[test]
    fn test_capture_without_backtrace() {
        let diagnostic = Diagnostic::capture("Ctrl+", AcceleratorError::Empty, false);
        assert_eq!(diagnostic.backtrace.status(), BacktraceStatus::Disabled);
    }

    #[test]
    fn test_recording_sink() {
        let sink = RecordingSink::new();
        assert!(sink.is_empty());

        sink.report(&Diagnostic::capture(
            "Ctrl+Bogus",
            AcceleratorError::MissingKey("Ctrl+Bogus".to_string()),
            true,
        ));

        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].accelerator, "Ctrl+Bogus");
        assert!(!records[0].backtrace.is_empty());

        sink.clear();
        assert!(sink.is_empty());
    }
}
