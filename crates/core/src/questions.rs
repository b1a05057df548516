//! Question records to the questionnaire model.
//!
//! Options can be encoded two ways in the source table. Paired columns
//! (`Вариант 1` / `Ключ 1`, `Option 2` / `Key 2`, ...) take priority; a record
//! with none falls back to delimited lists (`text|key` chunks separated by
//! newlines or semicolons) in any column whose header mentions an option.

use crate::fields::question;
use crate::model::{Question, QuestionOption, Record};

/// One way of reading answer options out of a question record.
pub trait OptionStrategy: Sync {
    fn name(&self) -> &'static str;

    fn extract(&self, record: &Record) -> Vec<QuestionOption>;
}

/// `<prefix> <n>` option columns paired with `<key prefix> <n>` key columns.
#[derive(Debug, Clone, Copy, Default)]
pub struct PairedColumns;

/// `text|key` chunks inside option-like columns.
#[derive(Debug, Clone, Copy, Default)]
pub struct DelimitedList;

/// Strategies in priority order; the first one producing options wins.
pub const DEFAULT_STRATEGIES: &[&dyn OptionStrategy] = &[&PairedColumns, &DelimitedList];

impl OptionStrategy for PairedColumns {
    fn name(&self) -> &'static str {
        "paired-columns"
    }

    fn extract(&self, record: &Record) -> Vec<QuestionOption> {
        record
            .iter()
            .filter_map(|(header, text)| {
                let number = option_number(header)?;
                let key = question::KEY_PREFIXES
                    .iter()
                    .filter_map(|prefix| record.get(&format!("{prefix} {number}")))
                    .map(str::trim)
                    .find(|key| !key.is_empty())
                    .unwrap_or("");
                QuestionOption::new(text, key).ok()
            })
            .collect()
    }
}

impl OptionStrategy for DelimitedList {
    fn name(&self) -> &'static str {
        "delimited-list"
    }

    fn extract(&self, record: &Record) -> Vec<QuestionOption> {
        record
            .iter()
            .filter(|(header, _)| {
                let header = header.to_lowercase();
                question::DELIMITED_TOKENS
                    .iter()
                    .any(|token| header.contains(token))
            })
            .flat_map(|(_, value)| value.split(['\n', ';']))
            .filter_map(|chunk| {
                let (text, key) = chunk.split_once('|')?;
                QuestionOption::new(text, key).ok()
            })
            .collect()
    }
}

/// Digits of an option header such as `Вариант 3` or `option2`, compared
/// case-insensitively. Returns `None` for other headers and for `0`.
fn option_number(header: &str) -> Option<&str> {
    let header = header.trim();
    question::OPTION_PREFIXES.iter().find_map(|prefix| {
        let head = header.get(..prefix.len())?;
        if head.to_lowercase() != prefix.to_lowercase() {
            return None;
        }
        let digits = header[prefix.len()..].trim_start();
        let positive = !digits.is_empty()
            && digits.chars().all(|c| c.is_ascii_digit())
            && digits.chars().any(|c| c != '0');
        positive.then_some(digits)
    })
}

/// Parse question records with the default strategies.
#[must_use]
pub fn parse_questions(records: &[Record]) -> Vec<Question> {
    parse_questions_with(records, DEFAULT_STRATEGIES)
}

/// Parse question records, trying `strategies` in order for each record.
///
/// Records whose options stay empty after every strategy are left out. Ids
/// default to the 1-based record position; text defaults to `Вопрос <n>`.
#[must_use]
pub fn parse_questions_with(
    records: &[Record],
    strategies: &[&dyn OptionStrategy],
) -> Vec<Question> {
    records
        .iter()
        .enumerate()
        .filter_map(|(idx, record)| {
            let position = idx + 1;
            let id = question::ID
                .resolve(record)
                .map_or_else(|| position.to_string(), str::to_owned);
            let text = question::TEXT
                .resolve(record)
                .map_or_else(|| format!("Вопрос {position}"), str::to_owned);
            let options = strategies
                .iter()
                .map(|strategy| strategy.extract(record))
                .find(|options| !options.is_empty())
                .unwrap_or_default();
            Question::new(id, text, options).ok()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs.iter().copied().collect()
    }

    #[test]
    fn paired_columns_skip_incomplete_pairs() {
        let rec = record(&[
            ("Option 1", "Red"),
            ("Key 1", "R"),
            ("Option 2", ""),
            ("Key 2", "B"),
        ]);
        let questions = parse_questions(&[rec]);

        assert_eq!(questions.len(), 1);
        let options = questions[0].options();
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].text(), "Red");
        assert_eq!(options[0].key(), "R");
    }

    #[test]
    fn localized_paired_columns_are_case_insensitive() {
        let rec = record(&[
            ("ID", "q1"),
            ("Вопрос", "Что ближе?"),
            ("вариант 1", " Люди "),
            ("Ключ 1", "soc"),
            ("ВАРИАНТ 2", "Техника"),
            ("Ключ 2", "tech"),
        ]);
        let questions = parse_questions(&[rec]);

        let q = &questions[0];
        assert_eq!(q.id(), "q1");
        assert_eq!(q.text(), "Что ближе?");
        let keys: Vec<_> = q.options().iter().map(QuestionOption::key).collect();
        assert_eq!(keys, vec!["soc", "tech"]);
        assert_eq!(q.options()[0].text(), "Люди");
    }

    #[test]
    fn english_key_column_backs_up_localized_one() {
        let rec = record(&[("Вариант 1", "Cat"), ("Ключ 1", " "), ("Key 1", "A")]);
        let questions = parse_questions(&[rec]);
        assert_eq!(questions[0].options()[0].key(), "A");
    }

    #[test]
    fn delimited_fallback_splits_chunks() {
        let rec = record(&[("Variant", "A|X;B|Y")]);
        let questions = parse_questions(&[rec]);

        let options: Vec<_> = questions[0]
            .options()
            .iter()
            .map(|o| (o.text(), o.key()))
            .collect();
        assert_eq!(options, vec![("A", "X"), ("B", "Y")]);
    }

    #[test]
    fn delimited_fallback_handles_newlines_and_bad_chunks() {
        let rec = record(&[("Options", "Yes | y\nNo\n|z\r\nMaybe|m")]);
        let questions = parse_questions(&[rec]);

        let keys: Vec<_> = questions[0].options().iter().map(QuestionOption::key).collect();
        assert_eq!(keys, vec!["y", "m"]);
    }

    #[test]
    fn delimited_is_ignored_when_paired_columns_yield_options() {
        let rec = record(&[
            ("Option 1", "Red"),
            ("Key 1", "R"),
            ("Variants", "A|X"),
        ]);
        let questions = parse_questions(&[rec]);

        assert_eq!(questions[0].options().len(), 1);
        assert_eq!(questions[0].options()[0].key(), "R");
    }

    #[test]
    fn questions_without_options_are_dropped_and_ids_follow_position() {
        let records = vec![
            record(&[("Вопрос", "Empty"), ("Вариант 1", "x")]),
            record(&[("Вариант 1", "Cat"), ("Ключ 1", "A")]),
        ];
        let questions = parse_questions(&records);

        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].id(), "2");
        assert_eq!(questions[0].text(), "Вопрос 2");
    }

    #[test]
    fn number_sign_column_serves_as_id() {
        let rec = record(&[("№", "7"), ("Question", "Pick"), ("Option 1", "a"), ("Key 1", "k")]);
        let questions = parse_questions(&[rec]);
        assert_eq!(questions[0].id(), "7");
        assert_eq!(questions[0].text(), "Pick");
    }

    #[test]
    fn option_number_rejects_zero_and_suffixes() {
        assert_eq!(option_number("Option 12"), Some("12"));
        assert_eq!(option_number("Вариант3"), Some("3"));
        assert_eq!(option_number("Option 0"), None);
        assert_eq!(option_number("Option 1a"), None);
        assert_eq!(option_number("Options"), None);
    }

    #[test]
    fn custom_strategy_order_is_respected() {
        let rec = record(&[("Option 1", "Red"), ("Key 1", "R"), ("Variants", "A|X")]);
        let questions = parse_questions_with(&[rec], &[&DelimitedList, &PairedColumns]);
        assert_eq!(questions[0].options()[0].key(), "X");
    }
}
