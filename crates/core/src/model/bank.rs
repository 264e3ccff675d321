use thiserror::Error;

use crate::model::Question;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BankError {
    #[error("a question bank needs at least one question")]
    Empty,

    #[error("question index {index} out of range for bank of {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

/// An immutable, ordered sequence of questions.
///
/// Fixed length N >= 1, addressable by index. The bounds check in
/// [`QuestionBank::get`] is the only error condition; navigation
/// arithmetic elsewhere keeps indices in range by construction, so a
/// range failure observed in practice means a broken invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    /// Build a bank from an ordered list of questions.
    ///
    /// # Errors
    ///
    /// Returns `BankError::Empty` if no questions are provided.
    pub fn new(questions: Vec<Question>) -> Result<Self, BankError> {
        if questions.is_empty() {
            return Err(BankError::Empty);
        }
        Ok(Self { questions })
    }

    /// The fixed geography bank the app ships with.
    #[must_use]
    pub fn geography() -> Self {
        Self {
            questions: vec![
                Question::new("Canberra is the capital of Australia.", true),
                Question::new(
                    "The Pacific Ocean is larger than the Atlantic Ocean.",
                    true,
                ),
                Question::new(
                    "The Suez Canal connects the Red Sea and the Indian Ocean.",
                    false,
                ),
                Question::new("The source of the Nile River is in Egypt.", false),
                Question::new(
                    "The Amazon River is the longest river in the Americas.",
                    true,
                ),
                Question::new(
                    "Lake Baikal is the world's oldest and deepest freshwater lake.",
                    true,
                ),
            ],
        }
    }

    /// Fetch the question at `index`.
    ///
    /// # Errors
    ///
    /// Returns `BankError::IndexOutOfRange` when `index` is outside
    /// `[0, len - 1]`.
    pub fn get(&self, index: usize) -> Result<&Question, BankError> {
        self.questions.get(index).ok_or(BankError::IndexOutOfRange {
            index,
            len: self.questions.len(),
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false once constructed; the constructor rejects empty banks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }
}
