use std::fmt;
use std::sync::Arc;

use career_core::Clock;
use career_core::answers::build_answer_index;
use career_core::model::{AnswerKeyMap, Question};
use career_core::normalize::normalize;
use career_core::questions::parse_questions;
use storage::{TableRef, TableSource};
use tracing::{debug, info};

use super::session::QuizSession;
use crate::cache::LoadOnce;
use crate::catalog::CatalogService;
use crate::error::QuizError;

/// Loads the questionnaire and its answer index once, and starts sessions.
pub struct QuizService {
    clock: Clock,
    source: Arc<dyn TableSource>,
    catalog: Arc<CatalogService>,
    questions_table: TableRef,
    results_table: TableRef,
    questions: LoadOnce<Vec<Question>>,
    answer_index: LoadOnce<AnswerKeyMap>,
}

impl QuizService {
    #[must_use]
    pub fn new(
        clock: Clock,
        source: Arc<dyn TableSource>,
        catalog: Arc<CatalogService>,
        questions_table: TableRef,
        results_table: TableRef,
    ) -> Self {
        Self {
            clock,
            source,
            catalog,
            questions_table,
            results_table,
            questions: LoadOnce::new(),
            answer_index: LoadOnce::new(),
        }
    }

    /// Questions with at least one valid option, in sheet order.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Source` if the sheet cannot be fetched.
    pub async fn load_questions(&self) -> Result<Arc<Vec<Question>>, QuizError> {
        if let Some(questions) = self.questions.get() {
            debug!(table = %self.questions_table, "questions cache hit");
            return Ok(questions);
        }
        self.questions
            .get_or_try_load(|| async {
                let raw = self.source.fetch(&self.questions_table).await?;
                let records = normalize(&raw);
                let questions = parse_questions(&records);
                let dropped = records.len() - questions.len();
                if dropped > 0 {
                    debug!(
                        table = %self.questions_table,
                        dropped,
                        "questions without valid options skipped"
                    );
                }
                info!(table = %self.questions_table, count = questions.len(), "questions loaded");
                Ok::<_, QuizError>(questions)
            })
            .await
    }

    /// Answer key index built from the results sheet.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Source` if the sheet cannot be fetched.
    pub async fn load_answer_index(&self) -> Result<Arc<AnswerKeyMap>, QuizError> {
        if let Some(index) = self.answer_index.get() {
            debug!(table = %self.results_table, "answer index cache hit");
            return Ok(index);
        }
        self.answer_index
            .get_or_try_load(|| async {
                let raw = self.source.fetch(&self.results_table).await?;
                let index = build_answer_index(&normalize(&raw));
                info!(table = %self.results_table, keys = index.len(), "answer index loaded");
                Ok::<_, QuizError>(index)
            })
            .await
    }

    /// Start a fresh session. `Ok(None)` when the sheet holds no usable
    /// questions.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` if questions, answers or catalog items cannot be
    /// loaded.
    pub async fn start_session(&self) -> Result<Option<QuizSession>, QuizError> {
        let questions = self.load_questions().await?;
        if questions.is_empty() {
            info!(table = %self.questions_table, "no valid questions");
            return Ok(None);
        }
        let answer_index = self.load_answer_index().await?;
        let items = self.catalog.load_items().await?;
        Ok(QuizSession::new(questions, answer_index, items, self.clock))
    }

    /// Drop cached questions and answers; sessions started later see fresh data.
    pub fn reset(&self) {
        self.questions.reset();
        self.answer_index.reset();
    }
}

impl fmt::Debug for QuizService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizService")
            .field("questions_table", &self.questions_table)
            .field("results_table", &self.results_table)
            .field("questions", &self.questions)
            .field("answer_index", &self.answer_index)
            .finish_non_exhaustive()
    }
}
