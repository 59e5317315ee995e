//! Diagnostic queue for collecting emitted diagnostics.
//!
//! The type layer emits at most one error per failed operation, and the
//! parser suppresses follow-on messages by comparing error counts before and
//! after a nested parse. The queue therefore keeps exact emission order and
//! counts; deduplication and limits are left to the embedder.

use crate::Diagnostic;

/// Collects diagnostics in emission order.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticQueue {
    diagnostics: Vec<Diagnostic>,
    error_count: usize,
}

impl DiagnosticQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a diagnostic onto the queue.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.is_error() {
            self.error_count += 1;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Number of error-severity diagnostics emitted so far.
    ///
    /// Producers snapshot this to detect whether a nested operation emitted.
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// All diagnostics emitted so far, in order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Check if nothing has been emitted.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Take all diagnostics, leaving the queue empty.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        self.error_count = 0;
        std::mem::take(&mut self.diagnostics)
    }

    /// Discard all diagnostics.
    pub fn clear(&mut self) {
        self.error_count = 0;
        self.diagnostics.clear();
    }
}
