use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a single submission was judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnswerKind {
    Correct,
    Incorrect,
    /// The answer had already been revealed for this question, so the
    /// submission is neither tallied as correct nor as incorrect.
    Judgment,
}

/// Score for one completed pass through the bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassSummary {
    percentage: u32,
    correct: u32,
    incorrect: u32,
    completed_at: DateTime<Utc>,
}

impl PassSummary {
    /// Compute the pass score from the running tallies.
    ///
    /// Truncating integer division, matching how the score has always
    /// been computed. An empty tally (the final question was judged and
    /// nothing else was answered this pass) scores 0 rather than
    /// dividing by zero.
    #[must_use]
    pub fn from_counts(correct: u32, incorrect: u32, completed_at: DateTime<Utc>) -> Self {
        let answered = correct + incorrect;
        let percentage = if answered == 0 {
            0
        } else {
            100 * correct / answered
        };
        Self {
            percentage,
            correct,
            incorrect,
            completed_at,
        }
    }

    #[must_use]
    pub fn percentage(&self) -> u32 {
        self.percentage
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn incorrect(&self) -> u32 {
        self.incorrect
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }
}

/// Result of submitting an answer.
///
/// `summary` is present exactly when the submission landed on the last
/// question of the bank; the display layer shows it instead of the
/// per-question message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOutcome {
    pub kind: AnswerKind,
    pub summary: Option<PassSummary>,
}

impl AnswerOutcome {
    #[must_use]
    pub fn of(kind: AnswerKind) -> Self {
        Self {
            kind,
            summary: None,
        }
    }

    #[must_use]
    pub fn with_summary(kind: AnswerKind, summary: PassSummary) -> Self {
        Self {
            kind,
            summary: Some(summary),
        }
    }

    /// True when this submission completed a pass through the bank.
    #[must_use]
    pub fn completed_pass(&self) -> bool {
        self.summary.is_some()
    }
}
