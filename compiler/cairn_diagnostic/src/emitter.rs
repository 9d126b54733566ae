//! Terminal Emitter
//!
//! Human-readable diagnostic output with optional ANSI color support.
//!
//! ```text
//! meson.build:3:7: error: undefined object
//!   3 | foo = bar
//!     |       ^
//! ```

use std::io::{self, IsTerminal, Write};

use cairn_ir::Source;

use crate::Severity;

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const WARNING: &str = "\x1b[1;33m"; // Bold yellow
    pub const INFO: &str = "\x1b[1;36m"; // Bold cyan
    pub const DEBUG: &str = "\x1b[1;34m"; // Bold blue
    pub const BOLD: &str = "\x1b[1m";
    pub const RESET: &str = "\x1b[0m";
}

/// Color output mode for terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Automatically detect based on terminal capabilities.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorMode {
    /// Resolve to a boolean. `is_tty` only matters for `Auto`.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Terminal emitter with optional color support.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
}

impl TerminalEmitter<io::Stderr> {
    /// Create a terminal emitter for stderr, detecting whether it is a TTY.
    pub fn stderr(mode: ColorMode) -> Self {
        let stderr = io::stderr();
        let is_tty = stderr.is_terminal();
        TerminalEmitter::with_color_mode(stderr, mode, is_tty)
    }
}

impl<W: Write> TerminalEmitter<W> {
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_colored(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }

    fn write_severity(&mut self, severity: Severity) {
        let color = match severity {
            Severity::Error => colors::ERROR,
            Severity::Warning => colors::WARNING,
            Severity::Info => colors::INFO,
            Severity::Debug => colors::DEBUG,
        };
        self.write_colored(severity.as_str(), color);
    }

    /// Write one diagnostic.
    ///
    /// With a source, the header is prefixed with `label:line:col:` and,
    /// when `include_source` is set, followed by the offending line and a
    /// caret under the column.
    pub fn emit(
        &mut self,
        src: Option<&Source>,
        line: u32,
        col: u32,
        severity: Severity,
        message: &str,
        include_source: bool,
    ) {
        if let Some(src) = src {
            let location = format!("{}:{line}:{col}:", src.label);
            self.write_colored(&location, colors::BOLD);
            let _ = write!(self.writer, " ");
        }
        self.write_severity(severity);
        let _ = writeln!(self.writer, " {message}");

        if !include_source {
            return;
        }
        if let Some(text) = src.and_then(|s| s.line_text(line)) {
            let _ = writeln!(self.writer, "{line:>3} | {text}");
            let pad: String = text
                .chars()
                .take(col.saturating_sub(1) as usize)
                .map(|c| if c == '\t' { '\t' } else { ' ' })
                .collect();
            let _ = write!(self.writer, "    | {pad}");
            self.write_colored("^", colors::ERROR);
            let _ = writeln!(self.writer);
        }
    }

    /// Print up to `context` lines of `src` on either side of `line`.
    pub fn list_lines(&mut self, src: &Source, line: u32, context: u32) {
        let first = line.saturating_sub(context).max(1);
        for l in first..=line.saturating_add(context) {
            let Some(text) = src.line_text(l) else { break };
            let marker = if l == line { '>' } else { ' ' };
            let _ = writeln!(self.writer, "{marker}{l:>3} | {text}");
        }
    }

    pub fn flush(&mut self) {
        let _ = self.writer.flush();
    }
}
