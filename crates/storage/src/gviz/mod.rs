use async_trait::async_trait;
use career_core::model::RawTable;
use reqwest::Client;
use reqwest::header::CACHE_CONTROL;
use tracing::{debug, warn};
use url::Url;

use crate::source::{SourceError, TableRef, TableSource};

mod payload;

pub use payload::{GVIZ_PREFIX, GVIZ_SUFFIX, decode, strip_framing};

/// Reads sheets through the spreadsheet visualization query endpoint.
#[derive(Clone, Debug)]
pub struct GvizTableSource {
    client: Client,
    base_url: String,
}

impl GvizTableSource {
    pub const DEFAULT_BASE_URL: &'static str = "https://docs.google.com/spreadsheets/d";

    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    #[must_use]
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// `<base>/<table id>/gviz/tq?tqx=out:json&sheet=<sheet>`
    ///
    /// # Errors
    ///
    /// Returns `SourceError::InvalidUrl` if the base URL does not parse.
    pub fn request_url(&self, table: &TableRef) -> Result<Url, SourceError> {
        let mut url = Url::parse(&format!(
            "{}/{}/gviz/tq",
            self.base_url.trim_end_matches('/'),
            table.table_id
        ))?;
        url.query_pairs_mut()
            .append_pair("tqx", "out:json")
            .append_pair("sheet", &table.sheet);
        Ok(url)
    }
}

impl Default for GvizTableSource {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl TableSource for GvizTableSource {
    async fn fetch(&self, table: &TableRef) -> Result<RawTable, SourceError> {
        let url = self.request_url(table)?;
        debug!(%table, %url, "fetching sheet");

        let response = self
            .client
            .get(url)
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .inspect_err(|e| warn!(%table, error = %e, "sheet request failed"))?;
        let body = response.text().await?;

        let raw = decode(&body)
            .inspect_err(|e| warn!(%table, error = %e, "sheet payload rejected"))?;
        debug!(%table, rows = raw.row_count(), "sheet fetched");
        Ok(raw)
    }
}
