mod bank;
mod outcome;
mod question;
mod state;

pub use bank::{BankError, QuestionBank};
pub use outcome::{AnswerKind, AnswerOutcome, PassSummary};
pub use question::Question;
pub use state::{QuizState, StateError};
