//! Field union discovery.

use std::collections::BTreeSet;

use serde_json::Value;

/// Every field name observed across the raw records of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldUnion {
    names: BTreeSet<String>,
}

impl FieldUnion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Field names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for FieldUnion {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Collect the field names of all object items, whether or not they later
/// pass validation. Items that are not objects contribute nothing.
pub fn discover_field_union(items: &[Value]) -> FieldUnion {
    items
        .iter()
        .filter_map(Value::as_object)
        .flat_map(|record| record.keys().cloned())
        .collect()
}
