// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Decoded STEP entities and attribute values

/// A decoded attribute value
#[derive(Clone, Debug, PartialEq, Default)]
pub enum StepValue {
    /// `$`
    #[default]
    Null,
    /// `*`
    Derived,
    /// `#123`
    Ref(u32),
    /// `'text'` with `''` already unescaped
    String(String),
    Integer(i64),
    Float(f64),
    /// `.VALUE.`
    Enum(String),
    /// `(a, b, ...)`
    List(Vec<StepValue>),
    /// `IFCLABEL('x')`, type name upper-cased
    Typed(String, Box<StepValue>),
}

impl StepValue {
    pub fn as_ref_id(&self) -> Option<u32> {
        match self {
            StepValue::Ref(id) => Some(*id),
            _ => None,
        }
    }

    /// String content, looking through a typed wrapper
    pub fn as_str(&self) -> Option<&str> {
        match self {
            StepValue::String(s) => Some(s),
            StepValue::Typed(_, inner) => inner.as_str(),
            _ => None,
        }
    }

    /// Numeric content, looking through a typed wrapper
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            StepValue::Float(f) => Some(*f),
            StepValue::Integer(i) => Some(*i as f64),
            StepValue::Typed(_, inner) => inner.as_f64(),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&str> {
        match self {
            StepValue::Enum(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[StepValue]> {
        match self {
            StepValue::List(items) => Some(items),
            _ => None,
        }
    }
}

/// One `#id=TYPE(...)` record
#[derive(Clone, Debug, PartialEq)]
pub struct StepEntity {
    pub id: u32,
    /// Upper-cased type name, e.g. `IFCWALL`
    pub type_name: String,
    pub attributes: Vec<StepValue>,
}

impl StepEntity {
    pub fn get(&self, index: usize) -> Option<&StepValue> {
        self.attributes.get(index)
    }

    pub fn get_ref(&self, index: usize) -> Option<u32> {
        self.get(index).and_then(StepValue::as_ref_id)
    }

    pub fn get_str(&self, index: usize) -> Option<&str> {
        self.get(index).and_then(StepValue::as_str)
    }

    pub fn get_f64(&self, index: usize) -> Option<f64> {
        self.get(index).and_then(StepValue::as_f64)
    }

    pub fn get_enum(&self, index: usize) -> Option<&str> {
        self.get(index).and_then(StepValue::as_enum)
    }

    /// Entity references in a list attribute; non-references are skipped
    pub fn get_refs(&self, index: usize) -> Vec<u32> {
        self.get(index)
            .and_then(StepValue::as_list)
            .map(|items| items.iter().filter_map(StepValue::as_ref_id).collect())
            .unwrap_or_default()
    }

    /// Whether the entity is of the given (upper-case) type
    pub fn is(&self, type_name: &str) -> bool {
        self.type_name == type_name
    }
}
