use quiz_core::model::AnswerOutcome;

/// User intents a display layer forwards to the quiz.
///
/// `RevealReturned` is the deferred second half of `RequestReveal`:
/// the reveal component reports whether the answer was actually shown.
#[derive(Clone, Debug, PartialEq)]
pub enum QuizIntent {
    Advance,
    Retreat,
    SubmitAnswer(bool),
    RequestReveal,
    RevealReturned(bool),
}

/// Signals the quiz sends back for the display layer to render.
///
/// One intent maps to an ordered list of signals so composite effects
/// (question changed, then input re-enabled) stay explicit.
#[derive(Clone, Debug, PartialEq)]
pub enum QuizSignal {
    QuestionChanged {
        /// 1-based, for display.
        position: usize,
        total: usize,
        prompt: String,
    },
    /// Whether the display should accept answer submissions. Sent false
    /// after every accepted answer, true after navigation.
    InputEnabled(bool),
    /// Hand-off to the external reveal component, carrying the current
    /// question's correct answer.
    RevealRequested { answer_is_true: bool },
    Outcome(AnswerOutcome),
}
