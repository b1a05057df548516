use std::collections::BTreeSet;

use career_core::fields::item;
use career_core::model::{AnswerKeyMap, Record};
use serde::Serialize;

/// Which lookup produced a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchBasis {
    ItemIds,
    ItemNames,
    NoMatch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    pub items: Vec<Record>,
    pub basis: MatchBasis,
}

/// Resolve chosen answer keys to catalog items.
///
/// Matched ids and names are unioned across all keys. Ids take priority: if
/// any key matched an id, names are not consulted at all. Result order follows
/// `items`, not `keys`.
#[must_use]
pub fn recommend<'k>(
    items: &[Record],
    index: &AnswerKeyMap,
    keys: impl IntoIterator<Item = &'k str>,
) -> Recommendation {
    let mut ids = BTreeSet::new();
    let mut names = BTreeSet::new();
    for matches in keys.into_iter().filter_map(|key| index.get(key)) {
        ids.extend(matches.item_ids().iter().map(String::as_str));
        names.extend(matches.item_names().iter().map(String::as_str));
    }

    if !ids.is_empty() {
        return Recommendation {
            items: select(items, |record| {
                item::ID.resolve(record).is_some_and(|id| ids.contains(id))
            }),
            basis: MatchBasis::ItemIds,
        };
    }

    if !names.is_empty() {
        return Recommendation {
            items: select(items, |record| {
                item::NAME
                    .resolve(record)
                    .is_some_and(|name| names.contains(name.to_lowercase().as_str()))
            }),
            basis: MatchBasis::ItemNames,
        };
    }

    Recommendation {
        items: Vec::new(),
        basis: MatchBasis::NoMatch,
    }
}

fn select(items: &[Record], keep: impl Fn(&Record) -> bool) -> Vec<Record> {
    items.iter().filter(|record| keep(record)).cloned().collect()
}
