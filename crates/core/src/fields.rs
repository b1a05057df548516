//! Logical fields and the header spellings they go by.
//!
//! Source tables are edited by hand, so one logical column can appear under
//! several headers. Each [`Field`] lists its accepted spellings in preference
//! order and resolves against a [`Record`] by taking the first candidate with
//! a non-blank value.

use crate::model::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    name: &'static str,
    candidates: &'static [&'static str],
}

impl Field {
    #[must_use]
    pub const fn new(name: &'static str, candidates: &'static [&'static str]) -> Self {
        Self { name, candidates }
    }

    /// Logical name, used in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn candidates(&self) -> &'static [&'static str] {
        self.candidates
    }

    /// Trimmed value of the first candidate header holding a non-blank value.
    #[must_use]
    pub fn resolve<'a>(&self, record: &'a Record) -> Option<&'a str> {
        self.candidates
            .iter()
            .filter_map(|header| record.get(header))
            .map(str::trim)
            .find(|value| !value.is_empty())
    }

    #[must_use]
    pub fn resolve_or<'a>(&self, record: &'a Record, fallback: &'a str) -> &'a str {
        self.resolve(record).unwrap_or(fallback)
    }
}

pub mod group {
    use super::Field;

    pub const ID: Field = Field::new("group id", &["ID группы", "ID"]);
    pub const NAME: Field = Field::new("group name", &["Название группы", "Название"]);
    pub const DESCRIPTION: Field = Field::new("group description", &["Описание"]);
}

pub mod item {
    use super::Field;

    pub const ID: Field = Field::new("item id", &["ID"]);
    pub const NAME: Field = Field::new("item name", &["Название профессии"]);
    pub const GROUP_ID: Field = Field::new("item group id", &["Группа (ID)", "ID группы"]);
    pub const SHORT_DESCRIPTION: Field =
        Field::new("item short description", &["Описание", "Краткое описание"]);
    pub const DESCRIPTION: Field = Field::new("item description", &["Общее описание"]);
    pub const ROLES: Field = Field::new("item roles", &["Примеры ролей и трудовых функций"]);
    pub const SKILLS: Field = Field::new("item skills", &["Ключевые компетенции / навыки"]);
    pub const RECOMMENDATIONS: Field = Field::new("item recommendations", &["Рекомендации"]);
}

pub mod question {
    use super::Field;

    pub const ID: Field = Field::new("question id", &["ID", "№"]);
    pub const TEXT: Field = Field::new("question text", &["Вопрос", "Текст", "Question"]);

    /// Header prefixes for paired option columns, e.g. `Вариант 1`.
    pub const OPTION_PREFIXES: &[&str] = &["Вариант", "Option"];
    /// Header prefixes for the matching key columns, e.g. `Ключ 1`.
    pub const KEY_PREFIXES: &[&str] = &["Ключ", "Key"];
    /// Lower-case tokens marking a column that holds `text|key` lists.
    pub const DELIMITED_TOKENS: &[&str] = &["option", "variant", "вариант"];
}

pub mod answer {
    use super::Field;

    pub const KEY: Field = Field::new("answer key", &["Ключ", "Key"]);
    pub const ITEM_IDS: Field = Field::new("matched item ids", &["Профессии (ID)", "IDs"]);
    pub const ITEM_NAMES: Field =
        Field::new("matched item names", &["Профессии (названия)", "Названия", "Names"]);
}
