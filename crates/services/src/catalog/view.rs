use career_core::fields::{Field, item};
use career_core::model::{Group, Record};
use serde::Serialize;

/// Longest item summary shown on a card, in characters.
pub const SUMMARY_MAX_CHARS: usize = 140;

const UNTITLED_GROUP: &str = "Без названия";
const UNNAMED_ITEM: &str = "Профессия";
const GROUP_NOT_FOUND: &str = "Группа не найдена";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GroupCard {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ItemCard {
    pub id: String,
    pub name: String,
    pub summary: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ItemDetail {
    pub id: String,
    pub name: String,
    pub group_name: String,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub roles: Option<String>,
    pub skills: Option<String>,
    pub recommendations: Option<String>,
}

#[must_use]
pub fn map_group_card(group: &Group) -> GroupCard {
    GroupCard {
        id: group.id().to_owned(),
        title: non_empty(group.name()).unwrap_or_else(|| UNTITLED_GROUP.to_owned()),
        description: non_empty(group.description()),
    }
}

#[must_use]
pub fn map_item_card(record: &Record) -> ItemCard {
    ItemCard {
        id: item::ID.resolve_or(record, "").to_owned(),
        name: item::NAME.resolve_or(record, UNNAMED_ITEM).to_owned(),
        summary: item::SHORT_DESCRIPTION
            .resolve(record)
            .map(|text| clip(text, SUMMARY_MAX_CHARS)),
    }
}

/// `group` is whatever the caller resolved for the item; `None` renders as
/// a missing group.
#[must_use]
pub fn map_item_detail(record: &Record, group: Option<&Group>) -> ItemDetail {
    let text = |field: Field| field.resolve(record).map(str::to_owned);
    ItemDetail {
        id: item::ID.resolve_or(record, "").to_owned(),
        name: item::NAME.resolve_or(record, UNNAMED_ITEM).to_owned(),
        group_name: group
            .and_then(|g| non_empty(g.name()))
            .unwrap_or_else(|| GROUP_NOT_FOUND.to_owned()),
        short_description: text(item::SHORT_DESCRIPTION),
        description: text(item::DESCRIPTION),
        roles: text(item::ROLES),
        skills: text(item::SKILLS),
        recommendations: text(item::RECOMMENDATIONS),
    }
}

/// Cut `text` to `max_chars` characters, trimming and appending `…` when cut.
#[must_use]
pub fn clip(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}…", cut.trim())
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_owned())
}
