/// Result of a per-element callback during container iteration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IterationResult {
    /// Keep visiting elements.
    Continue,
    /// Stop early; the iteration as a whole succeeded.
    Done,
    /// Stop early; the iteration as a whole failed.
    Err,
}

impl IterationResult {
    /// Whether the walk should stop after this element.
    #[inline]
    pub fn is_stop(self) -> bool {
        !matches!(self, IterationResult::Continue)
    }
}
