//! Result records to the answer-key index.

use crate::fields::answer;
use crate::model::{AnswerKeyMap, KeyMatches, Record};

/// Build the key → matched items index.
///
/// Records without a key are skipped. Item ids are split on commas and
/// whitespace; when a record lists no ids, its comma-separated item names
/// are used instead. A repeated key replaces the earlier entry.
#[must_use]
pub fn build_answer_index(records: &[Record]) -> AnswerKeyMap {
    let mut index = AnswerKeyMap::new();
    for record in records {
        let Some(key) = answer::KEY.resolve(record) else {
            continue;
        };
        index.insert(key, matches_for(record));
    }
    index
}

fn matches_for(record: &Record) -> KeyMatches {
    let ids: Vec<&str> = answer::ITEM_IDS
        .resolve(record)
        .map(|raw| {
            raw.split(|c: char| c == ',' || c.is_whitespace())
                .filter(|id| !id.is_empty())
                .collect()
        })
        .unwrap_or_default();

    if !ids.is_empty() {
        return KeyMatches::new(ids, Vec::<&str>::new());
    }

    let names: Vec<&str> = answer::ITEM_NAMES
        .resolve(record)
        .map(|raw| raw.split(',').collect())
        .unwrap_or_default();
    KeyMatches::new(Vec::<&str>::new(), names)
}
