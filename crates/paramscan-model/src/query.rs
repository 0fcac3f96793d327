// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scan queries and match sets

use crate::ElementId;
use serde::{Deserialize, Serialize};

/// What to do with the matched elements
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    /// Replace the host selection with the matches
    Select,
    /// Temporarily show only the matches in the active view
    Isolate,
}

/// A single scan request, created per button click
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// Parameter definition name (required)
    pub parameter_name: String,
    /// Value substring; empty matches any value
    pub value_substring: String,
    /// Action to apply to the matches
    pub mode: ScanMode,
}

impl Query {
    /// Create a new query
    pub fn new(
        parameter_name: impl Into<String>,
        value_substring: impl Into<String>,
        mode: ScanMode,
    ) -> Self {
        Self {
            parameter_name: parameter_name.into(),
            value_substring: value_substring.into(),
            mode,
        }
    }

    /// Query that selects matches
    pub fn select(parameter_name: impl Into<String>, value_substring: impl Into<String>) -> Self {
        Self::new(parameter_name, value_substring, ScanMode::Select)
    }

    /// Query that isolates matches
    pub fn isolate(parameter_name: impl Into<String>, value_substring: impl Into<String>) -> Self {
        Self::new(parameter_name, value_substring, ScanMode::Isolate)
    }
}

/// Elements matched by one query, in scan order
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSet {
    ids: Vec<ElementId>,
}

impl MatchSet {
    /// Create an empty match set
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a matching element
    pub fn push(&mut self, id: ElementId) {
        self.ids.push(id);
    }

    /// Matched element ids
    pub fn ids(&self) -> &[ElementId] {
        &self.ids
    }

    /// Number of matches
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing matched
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl FromIterator<ElementId> for MatchSet {
    fn from_iter<I: IntoIterator<Item = ElementId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for MatchSet {
    type Item = ElementId;
    type IntoIter = std::vec::IntoIter<ElementId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.into_iter()
    }
}
