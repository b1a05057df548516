use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("option text cannot be empty")]
    EmptyText,

    #[error("option key cannot be empty")]
    EmptyKey,

    #[error("question {id} has no valid options")]
    NoOptions { id: String },
}

/// One selectable answer. `key` is the scoring tag and is never shown.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuestionOption {
    text: String,
    key: String,
}

impl QuestionOption {
    /// Build an option from untrimmed text and key.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyText` or `QuestionError::EmptyKey` when
    /// either part is blank after trimming.
    pub fn new(text: &str, key: &str) -> Result<Self, QuestionError> {
        let text = text.trim();
        let key = key.trim();
        if text.is_empty() {
            return Err(QuestionError::EmptyText);
        }
        if key.is_empty() {
            return Err(QuestionError::EmptyKey);
        }
        Ok(Self {
            text: text.to_owned(),
            key: key.to_owned(),
        })
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// A parsed questionnaire entry. Always carries at least one option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    id: String,
    text: String,
    options: Vec<QuestionOption>,
}

impl Question {
    /// # Errors
    ///
    /// Returns `QuestionError::NoOptions` if `options` is empty.
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        options: Vec<QuestionOption>,
    ) -> Result<Self, QuestionError> {
        let id = id.into();
        if options.is_empty() {
            return Err(QuestionError::NoOptions { id });
        }
        Ok(Self {
            id,
            text: text.into(),
            options,
        })
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[QuestionOption] {
        &self.options
    }

    /// Whether `key` belongs to one of this question's options.
    #[must_use]
    pub fn has_key(&self, key: &str) -> bool {
        self.options.iter().any(|option| option.key == key)
    }
}
