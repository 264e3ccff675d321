/// Aggregated view of quiz progress, useful for UI.
///
/// `position` is 1-based for display; tallies are the running counts
/// for the current pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizProgress {
    pub position: usize,
    pub total: usize,
    pub correct: u32,
    pub incorrect: u32,
    pub cheated_on_current: bool,
}
