use async_trait::async_trait;
use career_core::model::RawTable;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by table sources. None of them are retried here.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    #[error("network failure: {0}")]
    Network(#[from] reqwest::Error),

    #[error("source unavailable: {0}")]
    Unavailable(String),

    #[error("invalid table url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("response is missing the table service framing")]
    Framing,

    #[error("malformed table payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    #[error("sheet not found: {0}")]
    NotFound(String),
}

/// Address of one sheet inside a remote table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableRef {
    pub table_id: String,
    pub sheet: String,
}

impl TableRef {
    #[must_use]
    pub fn new(table_id: impl Into<String>, sheet: impl Into<String>) -> Self {
        Self {
            table_id: table_id.into(),
            sheet: sheet.into(),
        }
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.table_id, self.sheet)
    }
}

/// Contract for anything that can hand back a raw table.
#[async_trait]
pub trait TableSource: Send + Sync {
    /// Fetch a sheet. Every call goes to the source; nothing is cached.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` on transport, framing or payload failures.
    async fn fetch(&self, table: &TableRef) -> Result<RawTable, SourceError>;
}

/// In-memory source for tests and prototyping. Counts fetches.
#[derive(Clone, Default)]
pub struct InMemoryTableSource {
    tables: Arc<Mutex<HashMap<TableRef, RawTable>>>,
    fetches: Arc<AtomicUsize>,
    offline: Arc<AtomicBool>,
}

impl InMemoryTableSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store or replace a sheet.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Unavailable` if the table lock is poisoned.
    pub fn insert_table(&self, table: TableRef, data: RawTable) -> Result<(), SourceError> {
        let mut guard = self
            .tables
            .lock()
            .map_err(|e| SourceError::Unavailable(e.to_string()))?;
        guard.insert(table, data);
        Ok(())
    }

    /// Make every following fetch fail with `SourceError::Unavailable` until
    /// switched back.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of `fetch` calls seen so far, failed ones included.
    #[must_use]
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TableSource for InMemoryTableSource {
    async fn fetch(&self, table: &TableRef) -> Result<RawTable, SourceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.offline.load(Ordering::SeqCst) {
            return Err(SourceError::Unavailable(format!("{table} is offline")));
        }
        let guard = self
            .tables
            .lock()
            .map_err(|e| SourceError::Unavailable(e.to_string()))?;
        guard
            .get(table)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(table.to_string()))
    }
}
