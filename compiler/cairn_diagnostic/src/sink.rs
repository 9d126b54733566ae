use std::io;

use cairn_ir::Source;

use crate::emitter::{ColorMode, TerminalEmitter};
use crate::store::DiagnosticStore;
use crate::{ErrorGuaranteed, Severity};

enum SinkMode {
    Immediate(TerminalEmitter<io::Stderr>),
    Buffered(DiagnosticStore),
}

/// Destination for diagnostics raised during evaluation.
///
/// Immediate sinks print to stderr as diagnostics arrive; buffered sinks
/// collect them in a [`DiagnosticStore`] for later replay or inspection.
pub struct DiagnosticSink {
    mode: SinkMode,
    error_count: usize,
}

impl DiagnosticSink {
    pub fn immediate(color: ColorMode) -> Self {
        DiagnosticSink {
            mode: SinkMode::Immediate(TerminalEmitter::stderr(color)),
            error_count: 0,
        }
    }

    pub fn buffered() -> Self {
        DiagnosticSink {
            mode: SinkMode::Buffered(DiagnosticStore::new()),
            error_count: 0,
        }
    }

    pub fn is_buffered(&self) -> bool {
        matches!(self.mode, SinkMode::Buffered(_))
    }

    pub fn emit(
        &mut self,
        src: Option<&Source>,
        line: u32,
        col: u32,
        severity: Severity,
        message: &str,
    ) {
        tracing::debug!(%severity, line, col, msg = message, "diagnostic");
        if severity == Severity::Error {
            self.error_count += 1;
        }
        match &mut self.mode {
            SinkMode::Immediate(em) => em.emit(src, line, col, severity, message, true),
            SinkMode::Buffered(store) => store.push(src, line, col, severity, message),
        }
    }

    /// Emit an error and return proof of it.
    pub fn error(
        &mut self,
        src: Option<&Source>,
        line: u32,
        col: u32,
        message: &str,
    ) -> ErrorGuaranteed {
        self.emit(src, line, col, Severity::Error, message);
        ErrorGuaranteed::new()
    }

    /// Errors emitted through this sink so far.
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn store(&self) -> Option<&DiagnosticStore> {
        match &self.mode {
            SinkMode::Buffered(store) => Some(store),
            SinkMode::Immediate(_) => None,
        }
    }

    /// Take the buffered diagnostics, leaving an empty store behind.
    pub fn take_store(&mut self) -> Option<DiagnosticStore> {
        match &mut self.mode {
            SinkMode::Buffered(store) => Some(std::mem::take(store)),
            SinkMode::Immediate(_) => None,
        }
    }
}

impl Default for DiagnosticSink {
    fn default() -> Self {
        Self::immediate(ColorMode::Auto)
    }
}
