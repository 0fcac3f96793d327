// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Form state behind the scanner dialog
//!
//! Widget toolkits differ per shell; this is the part they share: two text
//! inputs and two actions that build a [`Query`] and hand it to the scanner.

use crate::scanner::{Notice, Notifier, ParameterScanner};
use crate::session::Dialog;
use paramscan_model::{HostDocument, Query, ScanMode};

/// The scanner dialog's inputs and actions
#[derive(Clone, Debug, Default)]
pub struct ScannerDialog {
    scanner: ParameterScanner,
    parameter_name: String,
    parameter_value: String,
    visible: bool,
}

impl ScannerDialog {
    /// Create a hidden dialog with empty inputs
    pub fn new(scanner: ParameterScanner) -> Self {
        Self {
            scanner,
            ..Default::default()
        }
    }

    /// Contents of the parameter name field
    pub fn parameter_name(&self) -> &str {
        &self.parameter_name
    }

    /// Contents of the parameter value field
    pub fn parameter_value(&self) -> &str {
        &self.parameter_value
    }

    pub fn set_parameter_name(&mut self, text: impl Into<String>) {
        self.parameter_name = text.into();
    }

    pub fn set_parameter_value(&mut self, text: impl Into<String>) {
        self.parameter_value = text.into();
    }

    /// Query built from the current inputs, trimmed
    pub fn query(&self, mode: ScanMode) -> Query {
        Query::new(self.parameter_name.trim(), self.parameter_value.trim(), mode)
    }

    /// The Select button
    pub fn click_select(&self, host: &mut dyn HostDocument, notifier: &mut dyn Notifier) -> Notice {
        self.scanner.handle(host, &self.query(ScanMode::Select), notifier)
    }

    /// The Isolate button
    pub fn click_isolate(&self, host: &mut dyn HostDocument, notifier: &mut dyn Notifier) -> Notice {
        self.scanner.handle(host, &self.query(ScanMode::Isolate), notifier)
    }

    /// Mark the dialog as closed by the user
    pub fn hide(&mut self) {
        self.visible = false;
    }
}

impl Dialog for ScannerDialog {
    fn show(&mut self) {
        self.visible = true;
    }

    fn focus(&mut self) {}

    fn is_visible(&self) -> bool {
        self.visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryDocument;
    use paramscan_model::{Element, ElementId, Parameter, ParameterValue, SelectionControl, ViewControl};

    fn doc() -> MemoryDocument {
        let mut doc = MemoryDocument::new();
        doc.add(
            Element::new(ElementId(5), "Rooms")
                .with_parameter(Parameter::new("Department", ParameterValue::text("Surgery"))),
        );
        doc
    }

    #[test]
    fn test_inputs_are_trimmed() {
        let mut dialog = ScannerDialog::new(ParameterScanner::new());
        dialog.set_parameter_name("  Department ");
        dialog.set_parameter_value(" surg  ");
        assert_eq!(dialog.query(ScanMode::Select), Query::select("Department", "surg"));
    }

    #[test]
    fn test_buttons_dispatch_modes() {
        let mut doc = doc();
        let mut notices: Vec<Notice> = Vec::new();
        let mut dialog = ScannerDialog::new(ParameterScanner::new());
        dialog.set_parameter_name("department");

        let notice = dialog.click_select(&mut doc, &mut notices);
        assert_eq!(notice.message, "Selected 1 elements.");
        assert_eq!(doc.selection(), vec![ElementId(5)]);

        dialog.set_parameter_value("pharmacy");
        let notice = dialog.click_isolate(&mut doc, &mut notices);
        assert_eq!(notice.message, "Found 0 elements and isolated them.");
        assert_eq!(doc.temporary_isolation(), Some(Vec::new()));
    }

    #[test]
    fn test_blank_name_reports_input_error() {
        let mut doc = doc();
        let mut notices: Vec<Notice> = Vec::new();
        let mut dialog = ScannerDialog::new(ParameterScanner::new());
        dialog.set_parameter_name("   ");
        let notice = dialog.click_select(&mut doc, &mut notices);
        assert!(notice.is_error());
        assert_eq!(doc.enumerations(), 0);
    }
}
