use std::env;

use storage::{GvizTableSource, TableRef};

pub const DEFAULT_GROUPS_SHEET: &str = "Группы";
pub const DEFAULT_ITEMS_SHEET: &str = "Профессии";
pub const DEFAULT_QUESTIONS_SHEET: &str = "Вопросы";
pub const DEFAULT_RESULTS_SHEET: &str = "Результаты";

/// Where the catalog and the questionnaire live.
///
/// Both sources share the fetch pipeline but may sit in different tables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SheetsConfig {
    pub base_url: String,
    pub catalog_table_id: String,
    pub quiz_table_id: String,
    pub groups_sheet: String,
    pub items_sheet: String,
    pub questions_sheet: String,
    pub results_sheet: String,
}

impl SheetsConfig {
    /// Defaults with both sources in one table.
    #[must_use]
    pub fn new(table_id: impl Into<String>) -> Self {
        let table_id = table_id.into();
        Self {
            base_url: GvizTableSource::DEFAULT_BASE_URL.to_owned(),
            quiz_table_id: table_id.clone(),
            catalog_table_id: table_id,
            groups_sheet: DEFAULT_GROUPS_SHEET.to_owned(),
            items_sheet: DEFAULT_ITEMS_SHEET.to_owned(),
            questions_sheet: DEFAULT_QUESTIONS_SHEET.to_owned(),
            results_sheet: DEFAULT_RESULTS_SHEET.to_owned(),
        }
    }

    /// Read `CAREER_*` variables. `None` when no catalog table is configured.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let mut config = Self::new(var("CAREER_CATALOG_TABLE_ID")?);
        if let Some(id) = var("CAREER_QUIZ_TABLE_ID") {
            config.quiz_table_id = id;
        }
        if let Some(url) = var("CAREER_GVIZ_BASE_URL") {
            config.base_url = url;
        }
        if let Some(sheet) = var("CAREER_SHEET_GROUPS") {
            config.groups_sheet = sheet;
        }
        if let Some(sheet) = var("CAREER_SHEET_ITEMS") {
            config.items_sheet = sheet;
        }
        if let Some(sheet) = var("CAREER_SHEET_QUESTIONS") {
            config.questions_sheet = sheet;
        }
        if let Some(sheet) = var("CAREER_SHEET_RESULTS") {
            config.results_sheet = sheet;
        }
        Some(config)
    }

    #[must_use]
    pub fn groups_table(&self) -> TableRef {
        TableRef::new(&self.catalog_table_id, &self.groups_sheet)
    }

    #[must_use]
    pub fn items_table(&self) -> TableRef {
        TableRef::new(&self.catalog_table_id, &self.items_sheet)
    }

    #[must_use]
    pub fn questions_table(&self) -> TableRef {
        TableRef::new(&self.quiz_table_id, &self.questions_sheet)
    }

    #[must_use]
    pub fn results_table(&self) -> TableRef {
        TableRef::new(&self.quiz_table_id, &self.results_sheet)
    }
}
