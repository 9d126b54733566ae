/// Text of a build file and the label diagnostics refer to it by.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Source {
    pub label: String,
    pub text: String,
}

impl Source {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Source {
            label: label.into(),
            text: text.into(),
        }
    }

    /// Source for code that did not come from a file.
    pub fn internal(text: impl Into<String>) -> Self {
        Self::new("<internal>", text)
    }

    pub fn is_internal(&self) -> bool {
        self.label == "<internal>"
    }

    /// Text of the 1-based line `line`, without its terminator.
    pub fn line_text(&self, line: u32) -> Option<&str> {
        let idx = usize::try_from(line.checked_sub(1)?).ok()?;
        self.text.lines().nth(idx)
    }
}
