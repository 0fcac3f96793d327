// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ParamScan Model - Shared types and host capability traits
//!
//! This crate describes everything the scanner needs to know about a host
//! application without depending on any particular host. A host (a CAD
//! session, an IFC file, an in-memory test double) implements the
//! capability traits and the scanner works against those.
//!
//! # Architecture
//!
//! - [`ElementSource`] - Enumerate instance elements and resolve any element by id
//! - [`ViewControl`] - Active view kind and temporary isolation
//! - [`SelectionControl`] - Replace the host's current selection
//! - [`HostDocument`] - All of the above, implemented automatically
//!
//! # Example
//!
//! ```ignore
//! use paramscan_model::{ElementSource, ElementId};
//!
//! fn print_marks(source: &dyn ElementSource) {
//!     for element in source.instance_elements() {
//!         for parameter in &element.parameters {
//!             println!("{} {:?}", element.id, parameter.name);
//!         }
//!     }
//! }
//! ```

pub mod error;
pub mod parameter;
pub mod query;
pub mod traits;
pub mod types;

pub use error::*;
pub use parameter::*;
pub use query::*;
pub use traits::*;
pub use types::*;
