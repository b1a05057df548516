use serde::Serialize;

/// Aggregated view of quiz progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizProgress {
    /// 1-based position of the current question.
    pub position: usize,
    pub total: usize,
    pub answered: usize,
    pub percent: u8,
    pub can_go_prev: bool,
    pub can_go_next: bool,
    pub can_finish: bool,
    pub is_complete: bool,
}
