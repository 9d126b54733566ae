use std::fmt;

/// Proof that at least one error diagnostic was emitted.
///
/// Zero-sized and `Copy`; it carries no information beyond its existence.
/// Obtainable from [`DiagnosticSink::error`](crate::DiagnosticSink::error)
/// or, for callers that count errors themselves, from
/// [`ErrorGuaranteed::from_error_count`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ErrorGuaranteed(());

impl ErrorGuaranteed {
    pub(crate) fn new() -> Self {
        ErrorGuaranteed(())
    }

    /// A guarantee if `count` errors have already been reported.
    pub fn from_error_count(count: usize) -> Option<Self> {
        (count > 0).then(Self::new)
    }
}

impl fmt::Display for ErrorGuaranteed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("error(s) emitted")
    }
}

impl std::error::Error for ErrorGuaranteed {}
