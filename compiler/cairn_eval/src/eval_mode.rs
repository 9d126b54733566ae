//! Evaluation and language modes.
//!
//! `EvalMode` separates running a build file from statically analyzing it.
//! `LanguageMode` selects which builtin function set is visible.

/// Evaluation mode; determines evaluator behavior via policy methods.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EvalMode {
    /// Ordinary evaluation with side effects.
    #[default]
    Execute,
    /// Static analysis: impure builtins are not run; their results become
    /// typeinfo placeholders that flow through the rest of the file.
    Analyze,
}

impl EvalMode {
    #[inline]
    pub fn is_analyze(self) -> bool {
        matches!(self, Self::Analyze)
    }

    /// Whether unvisited statements are reported after evaluation.
    #[inline]
    pub fn reports_dead_code(self) -> bool {
        matches!(self, Self::Analyze)
    }

    /// Whether `if` and `foreach` explore bodies whose condition or
    /// iterable is unknown.
    #[inline]
    pub fn explores_unknown_branches(self) -> bool {
        matches!(self, Self::Analyze)
    }
}

/// Which family of builtin functions is in scope.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LanguageMode {
    /// Build files.
    #[default]
    Normal,
    /// Internal scripts; a reduced kernel plus internal-only methods.
    Internal,
    /// Option definition files; only `option()` and helpers.
    Opts,
}

impl LanguageMode {
    pub const COUNT: usize = 3;
    pub const ALL: [LanguageMode; Self::COUNT] =
        [LanguageMode::Normal, LanguageMode::Internal, LanguageMode::Opts];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            LanguageMode::Normal => 0,
            LanguageMode::Internal => 1,
            LanguageMode::Opts => 2,
        }
    }
}
