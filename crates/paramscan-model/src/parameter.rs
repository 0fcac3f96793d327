// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Element parameters and their storage kinds

use crate::ElementId;
use serde::{Deserialize, Serialize};

/// Storage kind of a parameter value
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StorageKind {
    Float,
    Text,
    Integer,
    ReferenceId,
    Unsupported,
}

/// A parameter value, tagged by storage kind
///
/// Float values carry the host's own display string next to the raw number;
/// the scanner compares against the display string, never the number.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ParameterValue {
    /// Floating point value with the host-formatted display string
    Float { value: f64, display: Option<String> },
    /// Text value (may be absent)
    Text(Option<String>),
    /// Integer value (also used for yes/no parameters)
    Integer(i64),
    /// Reference to another element
    ReferenceId(ElementId),
    /// Value the host cannot expose as text
    Unsupported,
}

impl ParameterValue {
    /// Float value with its display string
    pub fn float(value: f64, display: impl Into<String>) -> Self {
        ParameterValue::Float {
            value,
            display: Some(display.into()),
        }
    }

    /// Present text value
    pub fn text(value: impl Into<String>) -> Self {
        ParameterValue::Text(Some(value.into()))
    }

    /// Storage kind of this value
    pub fn storage_kind(&self) -> StorageKind {
        match self {
            ParameterValue::Float { .. } => StorageKind::Float,
            ParameterValue::Text(_) => StorageKind::Text,
            ParameterValue::Integer(_) => StorageKind::Integer,
            ParameterValue::ReferenceId(_) => StorageKind::ReferenceId,
            ParameterValue::Unsupported => StorageKind::Unsupported,
        }
    }
}

/// A named parameter attached to an element
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Definition name; `None` when the host exposes no definition
    pub name: Option<String>,
    /// Parameter value
    pub value: ParameterValue,
}

impl Parameter {
    /// Create a parameter with a definition name
    pub fn new(name: impl Into<String>, value: ParameterValue) -> Self {
        Self {
            name: Some(name.into()),
            value,
        }
    }

    /// Create a parameter whose definition is missing
    pub fn without_definition(value: ParameterValue) -> Self {
        Self { name: None, value }
    }

    /// Storage kind of the value
    pub fn storage_kind(&self) -> StorageKind {
        self.value.storage_kind()
    }
}
