/// A single true/false question.
///
/// Immutable once constructed: the bank is built once at startup and
/// never changes for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    prompt: String,
    answer_is_true: bool,
}

impl Question {
    #[must_use]
    pub fn new(prompt: impl Into<String>, answer_is_true: bool) -> Self {
        Self {
            prompt: prompt.into(),
            answer_is_true,
        }
    }

    /// The displayed question text. Opaque to the engine; only the
    /// display layer interprets it.
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn answer_is_true(&self) -> bool {
        self.answer_is_true
    }
}
