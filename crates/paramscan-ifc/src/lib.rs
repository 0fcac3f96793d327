// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ParamScan IFC - IFC (STEP) files as scanner host documents
//!
//! Implements the host traits from `paramscan-model` on top of a small
//! STEP reader, so the scanner can search real building models.
//!
//! # Features
//!
//! - **Fast tokenization** using `nom` combinators
//! - **SIMD-accelerated scanning** using `memchr`
//! - **Lazy entity decoding** with an `Arc`-based cache
//! - **Project units** in float display strings
//!
//! # Example
//!
//! ```ignore
//! use paramscan_ifc::{IfcDocument, IfcOptions};
//! use paramscan_model::ElementSource;
//!
//! let doc = IfcDocument::open("house.ifc", IfcOptions::new())?;
//! println!("{} elements", doc.instance_elements().len());
//! ```

mod document;
mod entity;
mod properties;
mod scanner;
mod store;
mod tokenizer;
mod units;

pub use document::{IfcDocument, IfcOptions};
pub use entity::{StepEntity, StepValue};
pub use scanner::{schema_version, EntityScanner, RecordSpan};
pub use store::EntityStore;
pub use tokenizer::parse_entity;
pub use units::{UnitKind, UnitTable};
