use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

use career_core::Clock;
use career_core::model::{AnswerKeyMap, Question, Record};
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::progress::QuizProgress;
use super::recommend::{MatchBasis, recommend};

/// Where the session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    AwaitingAnswer(usize),
    AnsweredCanAdvance(usize),
    Complete,
}

/// Result of a finished quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOutcome {
    pub recommended: Vec<Record>,
    pub basis: MatchBasis,
    pub chosen_keys: BTreeSet<String>,
    pub completed_at: DateTime<Utc>,
}

/// In-memory questionnaire run.
///
/// Holds the position and at most one answer per question id. Transitions
/// that are not currently allowed are ignored and reported as `false` or
/// `None`; the presentation layer is expected to disable them, but the
/// session enforces the rules regardless.
pub struct QuizSession {
    questions: Arc<Vec<Question>>,
    answer_index: Arc<AnswerKeyMap>,
    items: Arc<Vec<Record>>,
    clock: Clock,
    current: usize,
    answers: HashMap<String, String>,
    started_at: DateTime<Utc>,
    outcome: Option<QuizOutcome>,
}

impl QuizSession {
    /// Start at the first question. `None` if there are no questions.
    #[must_use]
    pub fn new(
        questions: Arc<Vec<Question>>,
        answer_index: Arc<AnswerKeyMap>,
        items: Arc<Vec<Record>>,
        clock: Clock,
    ) -> Option<Self> {
        if questions.is_empty() {
            return None;
        }
        Some(Self {
            questions,
            answer_index,
            items,
            clock,
            current: 0,
            answers: HashMap::new(),
            started_at: clock.now(),
            outcome: None,
        })
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.questions[self.current]
    }

    fn last_index(&self) -> usize {
        self.questions.len() - 1
    }

    /// Number of distinct questions with an answer.
    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn is_answered(&self, question_id: &str) -> bool {
        self.answers.contains_key(question_id)
    }

    #[must_use]
    pub fn answer_for(&self, question_id: &str) -> Option<&str> {
        self.answers.get(question_id).map(String::as_str)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.outcome.is_some()
    }

    #[must_use]
    pub fn outcome(&self) -> Option<&QuizOutcome> {
        self.outcome.as_ref()
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        if self.is_complete() {
            QuizPhase::Complete
        } else if self.is_answered(self.current_question().id()) {
            QuizPhase::AnsweredCanAdvance(self.current)
        } else {
            QuizPhase::AwaitingAnswer(self.current)
        }
    }

    /// Record `key` as the answer to `question_id`, replacing any earlier one.
    ///
    /// Ignored once the quiz is complete, or when the question is unknown or
    /// `key` is not one of its options.
    pub fn select_answer(&mut self, question_id: &str, key: &str) -> bool {
        if self.is_complete() {
            return false;
        }
        let known = self
            .questions
            .iter()
            .any(|q| q.id() == question_id && q.has_key(key));
        if !known {
            debug!(question_id, key, "ignoring answer for unknown question or key");
            return false;
        }
        self.answers.insert(question_id.to_owned(), key.to_owned());
        true
    }

    #[must_use]
    pub fn can_go_next(&self) -> bool {
        !self.is_complete()
            && self.current < self.last_index()
            && self.is_answered(self.current_question().id())
    }

    /// Advance one question if the current one is answered.
    pub fn go_next(&mut self) -> bool {
        if !self.can_go_next() {
            return false;
        }
        self.current = (self.current + 1).min(self.last_index());
        true
    }

    #[must_use]
    pub fn can_go_prev(&self) -> bool {
        !self.is_complete() && self.current > 0
    }

    /// Step back one question; stays put on the first one.
    pub fn go_prev(&mut self) -> bool {
        if !self.can_go_prev() {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Finishing needs the last question on screen and every question answered.
    #[must_use]
    pub fn can_finish(&self) -> bool {
        !self.is_complete()
            && self.current == self.last_index()
            && self.answered_count() == self.total_questions()
    }

    /// Complete the quiz and compute recommendations.
    ///
    /// Returns `None` without changing state when finishing is not allowed.
    pub fn finish(&mut self) -> Option<&QuizOutcome> {
        if !self.can_finish() {
            return None;
        }
        let chosen_keys: BTreeSet<String> = self.answers.values().cloned().collect();
        let recommendation = recommend(
            &self.items,
            &self.answer_index,
            chosen_keys.iter().map(String::as_str),
        );
        info!(
            answered = self.answers.len(),
            recommended = recommendation.items.len(),
            basis = ?recommendation.basis,
            "quiz completed"
        );
        self.outcome = Some(QuizOutcome {
            recommended: recommendation.items,
            basis: recommendation.basis,
            chosen_keys,
            completed_at: self.clock.now(),
        });
        self.outcome.as_ref()
    }

    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn progress(&self) -> QuizProgress {
        let total = self.total_questions();
        let percent = if self.is_complete() {
            100
        } else {
            ((self.current * 100 + total / 2) / total).min(100) as u8
        };
        QuizProgress {
            position: self.current + 1,
            total,
            answered: self.answered_count(),
            percent,
            can_go_prev: self.can_go_prev(),
            can_go_next: self.can_go_next(),
            can_finish: self.can_finish(),
            is_complete: self.is_complete(),
        }
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("answers_len", &self.answers.len())
            .field("started_at", &self.started_at)
            .field("is_complete", &self.is_complete())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use career_core::model::{KeyMatches, QuestionOption};
    use career_core::time::fixed_now;

    fn question(id: &str, keys: &[&str]) -> Question {
        let options = keys
            .iter()
            .map(|k| QuestionOption::new(&format!("text {k}"), k).unwrap())
            .collect();
        Question::new(id, format!("Question {id}"), options).unwrap()
    }

    fn session(questions: Vec<Question>) -> QuizSession {
        let mut index = AnswerKeyMap::new();
        index.insert("A", KeyMatches::new(["1"], Vec::<&str>::new()));
        index.insert("B", KeyMatches::new(["2"], Vec::<&str>::new()));
        let items: Vec<Record> = vec![
            [("ID", "1"), ("Название профессии", "One")].into_iter().collect(),
            [("ID", "2"), ("Название профессии", "Two")].into_iter().collect(),
        ];
        QuizSession::new(
            Arc::new(questions),
            Arc::new(index),
            Arc::new(items),
            Clock::fixed(fixed_now()),
        )
        .unwrap()
    }

    fn three_questions() -> QuizSession {
        session(vec![
            question("q1", &["A", "B"]),
            question("q2", &["A", "B"]),
            question("q3", &["B"]),
        ])
    }

    #[test]
    fn empty_question_list_has_no_session() {
        let session = QuizSession::new(
            Arc::new(Vec::new()),
            Arc::new(AnswerKeyMap::new()),
            Arc::new(Vec::new()),
            Clock::default(),
        );
        assert!(session.is_none());
    }

    #[test]
    fn next_requires_answer_for_current_question() {
        let mut quiz = three_questions();
        assert_eq!(quiz.phase(), QuizPhase::AwaitingAnswer(0));
        assert!(!quiz.go_next());

        assert!(quiz.select_answer("q1", "A"));
        assert_eq!(quiz.phase(), QuizPhase::AnsweredCanAdvance(0));
        assert!(quiz.go_next());
        assert_eq!(quiz.current_index(), 1);
        assert_eq!(quiz.phase(), QuizPhase::AwaitingAnswer(1));
    }

    #[test]
    fn prev_is_clamped_at_first_question() {
        let mut quiz = three_questions();
        assert!(!quiz.go_prev());
        assert_eq!(quiz.current_index(), 0);

        quiz.select_answer("q1", "A");
        quiz.go_next();
        assert!(quiz.go_prev());
        assert_eq!(quiz.current_index(), 0);
    }

    #[test]
    fn reanswering_replaces_previous_answer() {
        let mut quiz = three_questions();
        quiz.select_answer("q1", "A");
        quiz.select_answer("q1", "B");

        assert_eq!(quiz.answered_count(), 1);
        assert_eq!(quiz.answer_for("q1"), Some("B"));
    }

    #[test]
    fn answers_may_target_any_question() {
        let mut quiz = three_questions();
        assert!(quiz.select_answer("q3", "B"));
        assert!(quiz.is_answered("q3"));
        assert_eq!(quiz.current_index(), 0);
    }

    #[test]
    fn unknown_question_or_key_is_ignored() {
        let mut quiz = three_questions();
        assert!(!quiz.select_answer("q9", "A"));
        assert!(!quiz.select_answer("q3", "A"));
        assert_eq!(quiz.answered_count(), 0);
    }

    #[test]
    fn finish_is_gated_on_all_answers_and_last_question() {
        let mut quiz = three_questions();
        quiz.select_answer("q1", "A");
        quiz.go_next();
        quiz.select_answer("q2", "A");
        quiz.go_next();
        assert_eq!(quiz.current_index(), 2);
        assert!(!quiz.go_next());

        assert!(quiz.finish().is_none());
        assert!(!quiz.is_complete());

        quiz.select_answer("q3", "B");
        assert!(quiz.can_finish());
        let outcome = quiz.finish().unwrap().clone();

        assert_eq!(quiz.phase(), QuizPhase::Complete);
        assert_eq!(outcome.basis, MatchBasis::ItemIds);
        assert_eq!(outcome.recommended.len(), 2);
        assert_eq!(outcome.chosen_keys.len(), 2);
        assert_eq!(outcome.completed_at, fixed_now());
    }

    #[test]
    fn finish_requires_last_question_even_when_all_answered() {
        let mut quiz = three_questions();
        quiz.select_answer("q1", "A");
        quiz.select_answer("q2", "A");
        quiz.select_answer("q3", "B");

        assert!(!quiz.can_finish());
        assert!(quiz.finish().is_none());
    }

    #[test]
    fn completed_session_rejects_further_changes() {
        let mut quiz = session(vec![question("only", &["A"])]);
        quiz.select_answer("only", "A");
        assert!(quiz.finish().is_some());

        assert!(!quiz.select_answer("only", "A"));
        assert!(!quiz.go_prev());
        assert!(quiz.finish().is_none());
        assert_eq!(quiz.outcome().unwrap().recommended.len(), 1);
    }

    #[test]
    fn progress_reflects_navigation() {
        let mut quiz = three_questions();
        let start = quiz.progress();
        assert_eq!(start.position, 1);
        assert_eq!(start.total, 3);
        assert_eq!(start.percent, 0);
        assert!(!start.can_go_next);

        quiz.select_answer("q1", "A");
        quiz.go_next();
        let middle = quiz.progress();
        assert_eq!(middle.position, 2);
        assert_eq!(middle.answered, 1);
        assert_eq!(middle.percent, 33);
        assert!(middle.can_go_prev);
    }
}
