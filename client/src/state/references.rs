//! Options for reference fields, loaded from the referenced collection.
//!
//! A reference field stores an id; its select shows a label. Labels come from
//! the first non-empty display key of each fetched record.

#[cfg(test)]
#[path = "references_test.rs"]
mod references_test;

use std::collections::BTreeMap;

use records::form::{FieldKind, FieldSpec};
use serde_json::Value;

/// Keys tried, in order, when labelling a referenced record.
const LABEL_KEYS: &[&str] = &["title", "name", "device_name", "initiator_key"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceOption {
    /// Record id as form text.
    pub value: String,
    pub label: String,
}

/// Loaded options keyed by collection endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceOptions(BTreeMap<&'static str, Vec<ReferenceOption>>);

impl ReferenceOptions {
    pub fn insert(&mut self, endpoint: &'static str, options: Vec<ReferenceOption>) {
        self.0.insert(endpoint, options);
    }

    /// Options for `endpoint`; empty until loaded.
    #[must_use]
    pub fn get(&self, endpoint: &str) -> &[ReferenceOption] {
        self.0.get(endpoint).map_or(&[], Vec::as_slice)
    }

    /// Label of `value` in `endpoint`, falling back to the raw id.
    #[must_use]
    pub fn label_for(&self, endpoint: &str, value: &str) -> String {
        self.get(endpoint)
            .iter()
            .find(|o| o.value == value)
            .map_or_else(|| value.to_owned(), |o| o.label.clone())
    }
}

/// Distinct endpoints referenced by `fields`, in field order.
#[must_use]
pub fn reference_endpoints(fields: &[FieldSpec]) -> Vec<&'static str> {
    let mut endpoints = Vec::new();
    for field in fields {
        if let FieldKind::Reference(endpoint) = field.kind {
            if !endpoints.contains(&endpoint) {
                endpoints.push(endpoint);
            }
        }
    }
    endpoints
}

/// Select options from raw list records. Records without a numeric id are skipped.
#[must_use]
pub fn options_from(records: &[Value]) -> Vec<ReferenceOption> {
    records
        .iter()
        .filter_map(|record| {
            let id = record.get("id").and_then(Value::as_i64)?;
            let label = LABEL_KEYS
                .iter()
                .filter_map(|key| record.get(*key).and_then(Value::as_str))
                .find(|s| !s.trim().is_empty())
                .map_or_else(|| format!("#{id}"), str::to_owned);
            Some(ReferenceOption {
                value: id.to_string(),
                label,
            })
        })
        .collect()
}
