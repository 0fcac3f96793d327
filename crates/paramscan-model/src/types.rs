// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types for host elements and views

use crate::Parameter;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe element identifier
///
/// Signed so that a host's "invalid element" sentinel (usually -1) can be
/// carried through reference-id parameters unchanged.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize, Default)]
pub struct ElementId(pub i64);

impl ElementId {
    /// The host's integer value for this identity
    pub fn integer_value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<i64> for ElementId {
    fn from(id: i64) -> Self {
        ElementId(id)
    }
}

impl From<u32> for ElementId {
    fn from(id: u32) -> Self {
        ElementId(id as i64)
    }
}

impl From<ElementId> for i64 {
    fn from(id: ElementId) -> Self {
        id.0
    }
}

/// Kind of the host's active view
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewKind {
    FloorPlan,
    CeilingPlan,
    #[serde(rename = "3d")]
    ThreeD,
    Section,
    Elevation,
    Drafting,
    Legend,
    Schedule,
    Sheet,
    AreaPlan,
    Detail,
}

impl ViewKind {
    /// All view kinds, in declaration order
    pub const ALL: [ViewKind; 11] = [
        ViewKind::FloorPlan,
        ViewKind::CeilingPlan,
        ViewKind::ThreeD,
        ViewKind::Section,
        ViewKind::Elevation,
        ViewKind::Drafting,
        ViewKind::Legend,
        ViewKind::Schedule,
        ViewKind::Sheet,
        ViewKind::AreaPlan,
        ViewKind::Detail,
    ];

    /// Short identifier used in configuration files and on the command line
    pub fn key(&self) -> &'static str {
        match self {
            ViewKind::FloorPlan => "floor-plan",
            ViewKind::CeilingPlan => "ceiling-plan",
            ViewKind::ThreeD => "3d",
            ViewKind::Section => "section",
            ViewKind::Elevation => "elevation",
            ViewKind::Drafting => "drafting",
            ViewKind::Legend => "legend",
            ViewKind::Schedule => "schedule",
            ViewKind::Sheet => "sheet",
            ViewKind::AreaPlan => "area-plan",
            ViewKind::Detail => "detail",
        }
    }

    /// Plural name as shown to the user in restriction messages
    pub fn plural_label(&self) -> &'static str {
        match self {
            ViewKind::FloorPlan => "Floor Plans",
            ViewKind::CeilingPlan => "Reflected Ceiling Plans",
            ViewKind::ThreeD => "3D Views",
            ViewKind::Section => "Sections",
            ViewKind::Elevation => "Elevations",
            ViewKind::Drafting => "Drafting Views",
            ViewKind::Legend => "Legends",
            ViewKind::Schedule => "Schedules",
            ViewKind::Sheet => "Sheets",
            ViewKind::AreaPlan => "Area Plans",
            ViewKind::Detail => "Detail Views",
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ViewKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ViewKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.key().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                let known: Vec<&str> = ViewKind::ALL.iter().map(|k| k.key()).collect();
                format!("unknown view kind '{}' (expected one of: {})", s, known.join(", "))
            })
    }
}

/// A host element as seen by the scanner
///
/// Elements are owned by the host. The scanner only reads them and passes
/// their ids back to the host for selection or isolation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Element identity
    pub id: ElementId,
    /// Associated type entity, if this is a typed instance
    pub type_id: Option<ElementId>,
    /// Host category or class name (informational only)
    pub category: String,
    /// Parameters in host order
    pub parameters: Vec<Parameter>,
}

impl Element {
    /// Create an element without a type reference
    pub fn new(id: impl Into<ElementId>, category: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            type_id: None,
            category: category.into(),
            parameters: Vec::new(),
        }
    }

    /// Set the type entity reference
    pub fn with_type(mut self, type_id: impl Into<ElementId>) -> Self {
        self.type_id = Some(type_id.into());
        self
    }

    /// Append a parameter
    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Append a parameter in place
    pub fn push(&mut self, parameter: Parameter) {
        self.parameters.push(parameter);
    }
}
