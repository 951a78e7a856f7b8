//! Recoverable diagnostics.
//!
//! Nothing in the engine is fatal: unknown message types, orphan points and
//! smoothing instabilities are all reported through an injectable sink, so
//! hosts and tests can observe them without depending on an output stream.

use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;

/// A recoverable condition met while processing drawing messages.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Diagnostic {
    /// A message with an unrecognized `type` field was ignored.
    #[error("draw instruction with unknown type: {0}")]
    UnknownMessage(String),
    /// A point arrived for a line that has not been created; a stub stroke
    /// was fabricated so the point is not lost.
    #[error("received a point of a line that has not been created ({0})")]
    OrphanPoint(String),
    /// The tangent norm was too small to smooth safely; the point was
    /// appended as a straight segment.
    #[error("near-zero tangent while smoothing line {0}")]
    NumericInstability(String),
}

/// Where diagnostics go.
pub trait DiagnosticSink {
    fn report(&mut self, diag: Diagnostic);
}

/// Forwards diagnostics to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&mut self, diag: Diagnostic) {
        log::warn!("{diag}");
    }
}

/// Collects diagnostics in memory. Used by tests and headless hosts.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub reports: Vec<Diagnostic>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DiagnosticSink for MemorySink {
    fn report(&mut self, diag: Diagnostic) {
        self.reports.push(diag);
    }
}

// Lets a host hand the board a sink while keeping a handle to read it back.
impl<T: DiagnosticSink> DiagnosticSink for Rc<RefCell<T>> {
    fn report(&mut self, diag: Diagnostic) {
        self.borrow_mut().report(diag);
    }
}
