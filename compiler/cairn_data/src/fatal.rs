//! Process-level fatal errors.
//!
//! Storage exhaustion cannot be reported as an ordinary evaluation error:
//! every handle issued afterwards would be meaningless. Such conditions
//! print a `fatal error:` line and abort.

/// Report an unrecoverable condition and abort the process.
#[cold]
pub fn unrecoverable(msg: &str) -> ! {
    tracing::error!(message = msg, "fatal error");
    eprintln!("fatal error: {msg}");
    std::process::abort()
}
