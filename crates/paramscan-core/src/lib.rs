// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ParamScan Core - Find elements by parameter and select or isolate them
//!
//! The scanner works against any host implementing
//! [`paramscan_model::HostDocument`].
//!
//! # Pipeline
//!
//! 1. Reject an empty parameter name
//! 2. Refuse to run outside the allowed view kinds ([`ScannerConfig`])
//! 3. [`filter`] the instance elements, falling back to type entities
//! 4. [`dispatch`] the matches as a selection or a temporary isolation
//! 5. Report one [`Notice`] through the shell's [`Notifier`]
//!
//! # Example
//!
//! ```
//! use paramscan_core::{MemoryDocument, ParameterScanner, Notice};
//! use paramscan_model::{Element, ElementId, Parameter, ParameterValue, Query};
//!
//! let mut doc = MemoryDocument::new();
//! doc.add(
//!     Element::new(ElementId(1), "Doors")
//!         .with_parameter(Parameter::new("Mark", ParameterValue::text("A-101"))),
//! );
//!
//! let mut notices: Vec<Notice> = Vec::new();
//! let notice = ParameterScanner::new().handle(&mut doc, &Query::select("mark", ""), &mut notices);
//! assert_eq!(notice.message, "Selected 1 elements.");
//! ```

pub mod application;
pub mod config;
pub mod dialog;
pub mod dispatcher;
pub mod filter;
pub mod matcher;
pub mod memory;
pub mod scanner;
pub mod session;

pub use application::{Icon, ParameterScannerApp, PushButton, PushButtonData, Ribbon, RibbonPanel};
pub use config::ScannerConfig;
pub use dialog::ScannerDialog;
pub use dispatcher::{dispatch, Outcome};
pub use filter::filter;
pub use matcher::{find_named_parameter, render_value, value_matches, UNEXPOSED_VALUE};
pub use memory::{Failure, MemoryDocument};
pub use scanner::{Notice, NoticeTitle, Notifier, ParameterScanner};
pub use session::{CommandResult, Dialog, DialogSession, DialogState, ScanCommand, SessionEvent, SCAN_COMMAND_ID};
