//! Presentation-agnostic message text for answer outcomes.
//!
//! These are the transient messages a display layer shows after each
//! submission. Deliberately plain strings: no layout, no localization
//! assumptions. A richer frontend may ignore them and render from the
//! outcome itself.

use quiz_core::model::{AnswerKind, AnswerOutcome, PassSummary};

/// The per-question message for a judged submission.
#[must_use]
pub fn kind_message(kind: AnswerKind) -> &'static str {
    match kind {
        AnswerKind::Correct => "Correct!",
        AnswerKind::Incorrect => "Incorrect!",
        AnswerKind::Judgment => "Cheating is wrong.",
    }
}

/// The end-of-pass score message.
#[must_use]
pub fn summary_message(summary: &PassSummary) -> String {
    format!("You scored {}%", summary.percentage())
}

/// The single message to show for an outcome: the pass score when this
/// submission completed a pass, the per-question message otherwise.
#[must_use]
pub fn outcome_message(outcome: &AnswerOutcome) -> String {
    match &outcome.summary {
        Some(summary) => summary_message(summary),
        None => kind_message(outcome.kind).to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::time::fixed_now;

    #[test]
    fn summary_replaces_the_per_question_message() {
        let outcome = AnswerOutcome::with_summary(
            AnswerKind::Judgment,
            PassSummary::from_counts(3, 1, fixed_now()),
        );
        assert_eq!(outcome_message(&outcome), "You scored 75%");
    }

    #[test]
    fn plain_outcomes_use_the_kind_message() {
        let outcome = AnswerOutcome::of(AnswerKind::Incorrect);
        assert_eq!(outcome_message(&outcome), "Incorrect!");
    }
}
