//! Buffered diagnostics.
//!
//! Diagnostics are kept in emission order until [`DiagnosticStore::replay`]
//! sorts them by source, line, column, message and severity, drops
//! duplicates that differ only in severity, and prints them.

use std::io::Write;

use bitflags::bitflags;
use cairn_ir::Source;
use rustc_hash::FxHashMap;

use crate::emitter::TerminalEmitter;
use crate::{Diagnostic, ErrorGuaranteed, Severity};

/// Index of a source registered with a [`DiagnosticStore`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceId(u32);

bitflags! {
    /// Replay options.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ReplayOptions: u8 {
        /// Print only error diagnostics (after `WERROR` promotion).
        const ERRORS_ONLY = 1 << 0;
        /// Print the offending source line under each located diagnostic.
        const INCLUDE_SOURCES = 1 << 1;
        /// Report every diagnostic as an error.
        const WERROR = 1 << 2;
    }
}

#[derive(Clone, Debug, Default)]
pub struct DiagnosticStore {
    sources: Vec<Source>,
    source_ids: FxHashMap<String, SourceId>,
    diagnostics: Vec<Diagnostic>,
    error_count: usize,
}

impl DiagnosticStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `src`, reusing the id of an earlier source with the same
    /// label.
    pub fn intern_source(&mut self, src: &Source) -> SourceId {
        if let Some(&id) = self.source_ids.get(&src.label) {
            return id;
        }
        let id = SourceId(u32::try_from(self.sources.len()).unwrap_or(u32::MAX));
        self.sources.push(src.clone());
        self.source_ids.insert(src.label.clone(), id);
        id
    }

    pub fn source(&self, id: SourceId) -> &Source {
        &self.sources[id.0 as usize]
    }

    pub fn push(
        &mut self,
        src: Option<&Source>,
        line: u32,
        col: u32,
        severity: Severity,
        message: &str,
    ) {
        let source = src.map(|s| self.intern_source(s));
        if severity == Severity::Error {
            self.error_count += 1;
        }
        self.diagnostics.push(Diagnostic {
            source,
            line,
            col,
            severity,
            message: message.to_owned(),
        });
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Messages of every buffered diagnostic, in emission order.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.diagnostics.iter().map(|d| d.message.as_str())
    }

    pub fn clear(&mut self) {
        self.diagnostics.clear();
        self.error_count = 0;
    }

    /// Sort and deduplicate in place.
    ///
    /// Diagnostics with the same position and message collapse to the most
    /// severe one.
    pub fn sort_and_dedup(&mut self) {
        self.diagnostics.sort_by(|a, b| {
            (a.source, a.line, a.col, &a.message, a.severity)
                .cmp(&(b.source, b.line, b.col, &b.message, b.severity))
        });
        self.diagnostics.dedup_by(|later, earlier| {
            later.source == earlier.source
                && later.line == earlier.line
                && later.col == earlier.col
                && later.message == earlier.message
        });
    }

    /// Sort, deduplicate and print every diagnostic.
    ///
    /// Returns a guarantee when anything counted as an error. Under
    /// [`ReplayOptions::WERROR`] every diagnostic counts.
    pub fn replay<W: Write>(
        &mut self,
        emitter: &mut TerminalEmitter<W>,
        opts: ReplayOptions,
    ) -> Option<ErrorGuaranteed> {
        self.sort_and_dedup();

        let mut errors = 0;
        for diag in &self.diagnostics {
            let severity = if opts.contains(ReplayOptions::WERROR) {
                Severity::Error
            } else {
                diag.severity
            };
            if severity == Severity::Error {
                errors += 1;
            } else if opts.contains(ReplayOptions::ERRORS_ONLY) {
                continue;
            }

            let src = diag.source.map(|id| self.source(id));
            emitter.emit(
                src,
                diag.line,
                diag.col,
                severity,
                &diag.message,
                opts.contains(ReplayOptions::INCLUDE_SOURCES),
            );
        }
        emitter.flush();

        ErrorGuaranteed::from_error_count(errors)
    }
}
