//! In-process search mirror.

use std::cmp::Reverse;

use async_trait::async_trait;
use dashmap::DashMap;
use endqueue_domain::{Record, RecordId, SearchDocument, SearchQuery};
use serde_json::Value;

use crate::infrastructure::ports::{MirrorError, SearchMirror};

/// Keeps the full record next to its flattened text view, keyed by raw id.
pub struct InMemorySearchMirror<R> {
    entries: DashMap<i64, (R, SearchDocument)>,
}

impl<R: Record> InMemorySearchMirror<R> {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<R: Record> Default for InMemorySearchMirror<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R: Record> SearchMirror<R> for InMemorySearchMirror<R> {
    async fn index(&self, record: &R) -> Result<(), MirrorError> {
        let id = record.id().ok_or_else(|| {
            MirrorError::InvalidDocument(format!("{} has no id", R::DISPLAY_NAME))
        })?;
        let document = document_of(record)?;
        self.entries.insert(id.raw(), (record.clone(), document));
        Ok(())
    }

    async fn remove(&self, id: R::Id) -> Result<(), MirrorError> {
        self.entries.remove(&id.raw());
        Ok(())
    }

    async fn search(&self, query: &str) -> Result<Vec<R>, MirrorError> {
        let query =
            SearchQuery::parse(query).map_err(|e| MirrorError::InvalidQuery(e.to_string()))?;

        let mut hits: Vec<(usize, i64, R)> = self
            .entries
            .iter()
            .filter_map(|entry| {
                let (record, document) = entry.value();
                query
                    .score(document)
                    .map(|score| (score, *entry.key(), record.clone()))
            })
            .collect();

        hits.sort_by_key(|(score, id, _)| (Reverse(*score), *id));
        Ok(hits.into_iter().map(|(_, _, record)| record).collect())
    }
}

/// Flattens a record's JSON form into field texts; nulls are skipped and
/// nested objects use dotted names.
pub fn document_of<R: Record>(record: &R) -> Result<SearchDocument, MirrorError> {
    let value =
        serde_json::to_value(record).map_err(|e| MirrorError::InvalidDocument(e.to_string()))?;

    let mut document = SearchDocument::new();
    flatten(&mut document, "", &value);
    Ok(document)
}

fn flatten(document: &mut SearchDocument, prefix: &str, value: &Value) {
    match value {
        Value::Null => {}
        Value::Bool(b) => document.insert(prefix, b.to_string()),
        Value::Number(n) => document.insert(prefix, n.to_string()),
        Value::String(s) => document.insert(prefix, s.as_str()),
        Value::Array(items) => {
            let text = items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    Value::Number(n) => Some(n.to_string()),
                    Value::Bool(b) => Some(b.to_string()),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join(" ");
            if !text.is_empty() {
                document.insert(prefix, text);
            }
        }
        Value::Object(fields) => {
            for (name, field) in fields {
                let key = if prefix.is_empty() {
                    name.clone()
                } else {
                    format!("{prefix}.{name}")
                };
                flatten(document, &key, field);
            }
        }
    }
}
