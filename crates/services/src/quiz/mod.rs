mod controller;
mod progress;
mod protocol;
mod view;
mod workflow;

// Public API of the quiz subsystem.
pub use crate::error::QuizError;
pub use controller::QuizController;
pub use progress::QuizProgress;
pub use protocol::{QuizIntent, QuizSignal};
pub use view::{kind_message, outcome_message, summary_message};
pub use workflow::QuizLoopService;
