//! Diagnostic system for evaluation errors and warnings.
//!
//! Diagnostics are positioned by source label, line and column. They are
//! either written to the terminal as they happen or buffered in a
//! [`DiagnosticStore`] that can be sorted, deduplicated and replayed.
//!
//! # Error Guarantees
//!
//! The [`ErrorGuaranteed`] type provides type-level proof that at least one
//! error was emitted. Evaluation functions return
//! `Result<_, ErrorGuaranteed>`, so an evaluation failure always has a
//! diagnostic behind it.
//!
//! ```text
//! // Can only get ErrorGuaranteed by emitting an error
//! let guarantee = sink.error(Some(src), line, col, "undefined object");
//! return Err(guarantee);
//! ```

mod diagnostic;
pub mod emitter;
mod guarantee;
mod sink;
pub mod store;

pub use diagnostic::{Diagnostic, Severity};
pub use emitter::{ColorMode, TerminalEmitter};
pub use guarantee::ErrorGuaranteed;
pub use sink::DiagnosticSink;
pub use store::{DiagnosticStore, ReplayOptions, SourceId};
