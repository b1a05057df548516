use std::sync::Arc;

use career_core::Clock;
use storage::{GvizTableSource, TableSource};

use crate::catalog::CatalogService;
use crate::config::SheetsConfig;
use crate::quiz::QuizService;

/// Assembles the catalog and quiz services over one table source.
///
/// Rebuilding `AppServices` is the page-level reinitialization: it starts
/// with empty caches.
#[derive(Clone)]
pub struct AppServices {
    catalog: Arc<CatalogService>,
    quiz: Arc<QuizService>,
}

impl AppServices {
    /// Build services that read sheets over HTTP.
    #[must_use]
    pub fn from_config(config: &SheetsConfig, clock: Clock) -> Self {
        let source: Arc<dyn TableSource> = Arc::new(GvizTableSource::new(&config.base_url));
        Self::new(config, source, clock)
    }

    #[must_use]
    pub fn new(config: &SheetsConfig, source: Arc<dyn TableSource>, clock: Clock) -> Self {
        let catalog = Arc::new(CatalogService::new(
            Arc::clone(&source),
            config.groups_table(),
            config.items_table(),
        ));
        let quiz = Arc::new(QuizService::new(
            clock,
            source,
            Arc::clone(&catalog),
            config.questions_table(),
            config.results_table(),
        ));
        Self { catalog, quiz }
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<CatalogService> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn quiz(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz)
    }
}
