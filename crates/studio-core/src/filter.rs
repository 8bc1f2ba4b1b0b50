//! Filter entries and their pipeline ordering.
//!
//! Filters in an application's chain are kept sorted by a fixed priority
//! table keyed on the filter type. New filters are inserted before the first
//! existing entry with a strictly greater priority, so entries of equal
//! priority keep their insertion order.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Table key holding the priority of filters with no known type
pub const UNKNOWN_FILTER_TYPE: &str = "Unknown";

/// Priority assigned to unknown filter types by the default table
pub const UNKNOWN_FILTER_PRIORITY: i32 = 1000;

/// Built-in filter priorities (lower runs earlier in the chain)
pub const DEFAULT_FILTERS_ORDER: &[(&str, i32)] = &[
    ("ThrottlingFilter", 100),
    ("OAuth2ClientFilter", 200),
    ("OAuth2ResourceServerFilter", 300),
    ("PolicyEnforcementFilter", 400),
    ("PasswordReplayFilter", 500),
    (UNKNOWN_FILTER_TYPE, UNKNOWN_FILTER_PRIORITY),
];

/// A single filter in an application's chain.
///
/// Only a string `type` is interpreted; all other keys are carried through
/// untouched. A non-string `type` stays in `config` and the entry counts as
/// `Unknown`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(from = "Map<String, Value>")]
pub struct FilterEntry {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub filter_type: Option<String>,

    #[serde(flatten)]
    pub config: Map<String, Value>,
}

impl From<Map<String, Value>> for FilterEntry {
    fn from(mut config: Map<String, Value>) -> Self {
        let filter_type = match config.remove("type") {
            Some(Value::String(t)) => Some(t),
            Some(other) => {
                config.insert("type".to_string(), other);
                None
            }
            None => None,
        };
        Self {
            filter_type,
            config,
        }
    }
}

impl FilterEntry {
    pub fn new(filter_type: impl Into<String>) -> Self {
        Self {
            filter_type: Some(filter_type.into()),
            config: Map::new(),
        }
    }

    /// Add a configuration key (builder style)
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.config.insert(key.into(), value);
        self
    }

    /// Filter type, or `"Unknown"` when the entry has none
    pub fn type_name(&self) -> &str {
        self.filter_type.as_deref().unwrap_or(UNKNOWN_FILTER_TYPE)
    }
}

/// Priority lookup table for filter types
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOrder {
    priorities: HashMap<String, i32>,
}

impl Default for FilterOrder {
    fn default() -> Self {
        Self {
            priorities: DEFAULT_FILTERS_ORDER
                .iter()
                .map(|(name, priority)| (name.to_string(), *priority))
                .collect(),
        }
    }
}

impl FilterOrder {
    /// Default table extended (or overridden) by the given entries
    pub fn with_overrides<I, K>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, i32)>,
        K: Into<String>,
    {
        let mut order = Self::default();
        for (name, priority) in overrides {
            order.priorities.insert(name.into(), priority);
        }
        order
    }

    /// Priority of the `Unknown` sentinel
    pub fn unknown_priority(&self) -> i32 {
        self.priorities
            .get(UNKNOWN_FILTER_TYPE)
            .copied()
            .unwrap_or(UNKNOWN_FILTER_PRIORITY)
    }

    /// Priority for a filter type; unlisted types get the `Unknown` priority
    pub fn priority_of(&self, filter_type: &str) -> i32 {
        self.priorities
            .get(filter_type)
            .copied()
            .unwrap_or_else(|| self.unknown_priority())
    }

    /// Priority of a filter entry
    pub fn priority(&self, filter: &FilterEntry) -> i32 {
        self.priority_of(filter.type_name())
    }

}

/// Return a new filter list with `filter` inserted at its ordered position.
///
/// The new filter goes before the first existing entry whose priority is
/// strictly greater than its own; it is appended when there is none.
pub fn insert_ordered(
    filters: &[FilterEntry],
    filter: FilterEntry,
    order: &FilterOrder,
) -> Vec<FilterEntry> {
    let new_priority = order.priority(&filter);
    let position = filters
        .iter()
        .position(|existing| order.priority(existing) > new_priority)
        .unwrap_or(filters.len());

    let mut ordered = Vec::with_capacity(filters.len() + 1);
    ordered.extend_from_slice(&filters[..position]);
    ordered.push(filter);
    ordered.extend_from_slice(&filters[position..]);
    ordered
}
