//! Raw table to field-keyed records.

use crate::model::{RawTable, Record};

/// Convert a fetched table into records keyed by header label.
///
/// Blank rows are dropped. If the first remaining row repeats the header
/// labels (compared trimmed and case-insensitively) it is treated as a second
/// header and skipped. Blank headers are named `col_<index>`; short rows are
/// padded with empty strings and cells past the last header are ignored.
#[must_use]
pub fn normalize(table: &RawTable) -> Vec<Record> {
    let headers: Vec<&str> = table.headers().iter().map(|h| h.trim()).collect();

    let rows: Vec<Vec<&str>> = table
        .rows()
        .iter()
        .map(|row| row.iter().map(|cell| cell.as_deref().unwrap_or("")).collect::<Vec<_>>())
        .filter(|row| row.iter().any(|value| !value.is_empty()))
        .collect();

    let skip = usize::from(rows.first().is_some_and(|first| repeats_header(&headers, first)));

    let names: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            if header.is_empty() {
                format!("col_{i}")
            } else {
                (*header).to_owned()
            }
        })
        .collect();

    rows.iter()
        .skip(skip)
        .map(|row| {
            let mut record = Record::with_capacity(names.len());
            for (i, name) in names.iter().enumerate() {
                record.insert(name.as_str(), row.get(i).copied().unwrap_or(""));
            }
            record
        })
        .collect()
}

fn repeats_header(headers: &[&str], row: &[&str]) -> bool {
    let mut labelled = headers.iter().enumerate().filter(|(_, h)| !h.is_empty()).peekable();
    if labelled.peek().is_none() {
        return false;
    }
    labelled.all(|(i, header)| {
        let value = row.get(i).copied().unwrap_or("").trim();
        value.to_lowercase() == header.to_lowercase()
    })
}
