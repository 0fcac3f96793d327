// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Request handling: validation, view gate, filter, dispatch and notices

use crate::config::ScannerConfig;
use crate::dispatcher::{dispatch, Outcome};
use crate::filter::filter;
use log::{debug, warn};
use paramscan_model::{HostDocument, HostError, Query, Result, ScanError, ViewControl};
use serde::Serialize;
use std::any::Any;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Title of a user notice
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum NoticeTitle {
    Error,
    Result,
    Action,
}

impl fmt::Display for NoticeTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = match self {
            NoticeTitle::Error => "Error",
            NoticeTitle::Result => "Result",
            NoticeTitle::Action => "Action",
        };
        f.write_str(title)
    }
}

/// A message shown to the user once per request
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub title: NoticeTitle,
    pub message: String,
}

impl Notice {
    pub fn new(title: NoticeTitle, message: impl Into<String>) -> Self {
        Self {
            title,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeTitle::Error, message)
    }

    /// Whether this notice reports a failure
    pub fn is_error(&self) -> bool {
        self.title == NoticeTitle::Error
    }

    /// Notice for a completed dispatch
    pub fn from_outcome(outcome: &Outcome) -> Self {
        match outcome {
            Outcome::Isolated { count } => Self::new(
                NoticeTitle::Result,
                format!("Found {} elements and isolated them.", count),
            ),
            Outcome::Selected { count } => {
                Self::new(NoticeTitle::Action, format!("Selected {} elements.", count))
            }
            Outcome::NothingFound => Self::new(
                NoticeTitle::Result,
                "No elements found matching the specified criteria.",
            ),
        }
    }

    /// Notice for an aborted request
    pub fn from_error(error: &ScanError) -> Self {
        match error {
            ScanError::EmptyParameterName | ScanError::ViewRestricted { .. } => {
                Self::error(error.to_string())
            }
            ScanError::Host(host @ (HostError::InvalidArgument(_) | HostError::ElementNotFound(_))) => {
                Self::error(format!("Error: {}", host))
            }
            other => Self::error(format!("An unexpected error occurred: {}", other)),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}

/// Modal notification sink provided by the shell
pub trait Notifier {
    fn notify(&mut self, notice: &Notice);
}

/// Collects notices, mostly for tests
impl Notifier for Vec<Notice> {
    fn notify(&mut self, notice: &Notice) {
        self.push(notice.clone());
    }
}

/// Runs scan requests against a host document
#[derive(Clone, Debug, Default)]
pub struct ParameterScanner {
    config: ScannerConfig,
}

impl ParameterScanner {
    /// Create a scanner with the default view policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scanner with an explicit configuration
    pub fn with_config(config: ScannerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Check that the host's active view allows scanning
    pub fn check_view<V>(&self, view: &V) -> Result<()>
    where
        V: ViewControl + ?Sized,
    {
        let active = view.active_view();
        if self.config.is_view_allowed(active) {
            Ok(())
        } else {
            Err(ScanError::ViewRestricted {
                active,
                allowed: self.config.allowed_views.clone(),
            })
        }
    }

    /// Validate, filter and dispatch one query
    ///
    /// Nothing on the host is touched when validation or the view gate fails.
    pub fn run(&self, host: &mut dyn HostDocument, query: &Query) -> Result<Outcome> {
        if query.parameter_name.trim().is_empty() {
            return Err(ScanError::EmptyParameterName);
        }
        self.check_view(&*host)?;

        debug!("Running {:?} for '{}'", query.mode, query.parameter_name);
        let matches = filter(&*host, &query.parameter_name, &query.value_substring)?;
        dispatch(host, &matches, query.mode)
    }

    /// Run one query and report the result through `notifier`
    ///
    /// Every request produces exactly one notice, including requests whose
    /// host calls panic.
    pub fn handle(&self, host: &mut dyn HostDocument, query: &Query, notifier: &mut dyn Notifier) -> Notice {
        let result = catch_unwind(AssertUnwindSafe(|| self.run(host, query)))
            .unwrap_or_else(|payload| Err(ScanError::unexpected(panic_message(payload.as_ref()))));

        let notice = match &result {
            Ok(outcome) => Notice::from_outcome(outcome),
            Err(error) => {
                warn!("Scan for '{}' aborted: {}", query.parameter_name, error);
                Notice::from_error(error)
            }
        };
        notifier.notify(&notice);
        notice
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown failure".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{Failure, MemoryDocument};
    use paramscan_model::{Element, ElementId, Parameter, ParameterValue, SelectionControl, ViewKind};

    fn doc() -> MemoryDocument {
        let mut doc = MemoryDocument::new();
        doc.add(
            Element::new(ElementId(1), "Walls")
                .with_parameter(Parameter::new("Comments", ParameterValue::text("check"))),
        );
        doc
    }

    #[test]
    fn test_empty_name_is_checked_before_view() {
        let mut doc = doc().with_view(ViewKind::Section);
        let err = ParameterScanner::new()
            .run(&mut doc, &Query::select("", "x"))
            .unwrap_err();
        assert!(matches!(err, ScanError::EmptyParameterName));
        assert_eq!(doc.enumerations(), 0);
    }

    #[test]
    fn test_view_gate_follows_config() {
        let scanner = ParameterScanner::with_config(
            ScannerConfig::new().with_allowed_views([ViewKind::Section]),
        );
        let mut doc = doc().with_view(ViewKind::Section);
        let outcome = scanner.run(&mut doc, &Query::select("Comments", "")).unwrap();
        assert_eq!(outcome, Outcome::Selected { count: 1 });
    }

    #[test]
    fn test_invalid_argument_notice() {
        let mut doc = doc();
        doc.fail_with(Failure::RejectSelection("bad id list".into()));
        let mut notices: Vec<Notice> = Vec::new();
        let notice = ParameterScanner::new().handle(&mut doc, &Query::select("comments", ""), &mut notices);
        assert_eq!(notice, Notice::error("Error: bad id list"));
        assert_eq!(notices, vec![notice]);
        assert!(doc.selection().is_empty());
    }

    #[test]
    fn test_unknown_element_notice() {
        let err = ScanError::Host(HostError::ElementNotFound(ElementId(7)));
        assert_eq!(Notice::from_error(&err), Notice::error("Error: Element #7 not found"));

        let mut doc = doc();
        let err = doc.set_selection(&[ElementId(7)]).unwrap_err();
        assert_eq!(
            Notice::from_error(&ScanError::from(err)).message,
            "Error: Element #7 not found"
        );
    }

    #[test]
    fn test_other_host_failure_notice() {
        let mut doc = doc();
        doc.fail_with(Failure::RejectIsolation("view is locked".into()));
        let mut notices: Vec<Notice> = Vec::new();
        let notice = ParameterScanner::new().handle(&mut doc, &Query::isolate("comments", ""), &mut notices);
        assert_eq!(notice.message, "An unexpected error occurred: view is locked");
        assert!(notice.is_error());
    }

    #[test]
    fn test_panic_is_reported_and_scanner_stays_usable() {
        let scanner = ParameterScanner::new();
        let mut doc = doc();
        let mut notices: Vec<Notice> = Vec::new();

        doc.fail_with(Failure::PanicOnEnumerate("host crashed".into()));
        let notice = scanner.handle(&mut doc, &Query::select("comments", ""), &mut notices);
        assert_eq!(notice.message, "An unexpected error occurred: host crashed");

        doc.clear_failure();
        let notice = scanner.handle(&mut doc, &Query::select("comments", ""), &mut notices);
        assert_eq!(notice, Notice::new(NoticeTitle::Action, "Selected 1 elements."));
        assert_eq!(notices.len(), 2);
    }
}
