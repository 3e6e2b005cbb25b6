//! Search text capture with an explicit commit step.
//!
//! Keystrokes only edit the draft. The query coordinator reads the committed
//! value, so typing never fires a request until the user confirms.

/// Draft and committed search text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputCapture {
    draft: String,
    committed: String,
}

impl InputCapture {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, c: char) {
        self.draft.push(c);
    }

    pub fn backspace(&mut self) {
        self.draft.pop();
    }

    pub fn clear(&mut self) {
        self.draft.clear();
    }

    /// Copies the draft into the committed value.
    ///
    /// Returns `true` if the committed value changed.
    pub fn commit(&mut self) -> bool {
        if self.draft == self.committed {
            return false;
        }

        self.committed.clone_from(&self.draft);
        tracing::debug!(committed = %self.committed, "search text committed");
        true
    }

    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    #[must_use]
    pub fn committed(&self) -> &str {
        &self.committed
    }

    /// Returns `true` if the draft differs from what was last committed.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.draft != self.committed
    }
}
