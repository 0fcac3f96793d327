// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ribbon registration
//!
//! On startup the application adds one panel with one push button bound to
//! [`SCAN_COMMAND_ID`]. A missing or unreadable icon is reported but does not
//! stop the button from being registered.

use crate::scanner::{Notice, Notifier};
use crate::session::{CommandResult, SCAN_COMMAND_ID};
use log::{debug, warn};
use std::io;
use std::path::{Path, PathBuf};

/// Name of the ribbon panel
pub const PANEL_NAME: &str = "Parameters";

/// Internal name of the push button
pub const BUTTON_NAME: &str = "cmdParameterScanner";

/// Button label
pub const BUTTON_TEXT: &str = "Parameter\nScanner";

/// Button tooltip
pub const BUTTON_TOOLTIP: &str =
    "Specify a parameter name and value to search for within the model elements.";

/// Icon location relative to the asset directory
pub const ICON_PATH: &str = "images/icon.png";

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

/// A loaded button image
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Icon {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

impl Icon {
    /// Read a PNG image from disk
    pub fn load(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        if !bytes.starts_with(&PNG_SIGNATURE) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("{} is not a PNG image", path.display()),
            ));
        }
        Ok(Self {
            path: path.to_path_buf(),
            bytes,
        })
    }
}

/// Static description of a push button
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PushButtonData {
    pub name: String,
    pub text: String,
    pub command_id: String,
}

/// A registered push button
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PushButton {
    pub data: PushButtonData,
    pub tooltip: Option<String>,
    pub large_image: Option<Icon>,
}

/// A named group of buttons
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RibbonPanel {
    pub name: String,
    pub buttons: Vec<PushButton>,
}

impl RibbonPanel {
    /// Add a button and return it for further setup
    pub fn add_button(&mut self, data: PushButtonData) -> &mut PushButton {
        self.buttons.push(PushButton {
            data,
            tooltip: None,
            large_image: None,
        });
        let last = self.buttons.len() - 1;
        &mut self.buttons[last]
    }
}

/// The host's ribbon
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ribbon {
    pub panels: Vec<RibbonPanel>,
}

impl Ribbon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new panel at the end of the ribbon
    pub fn create_panel(&mut self, name: impl Into<String>) -> &mut RibbonPanel {
        self.panels.push(RibbonPanel {
            name: name.into(),
            buttons: Vec::new(),
        });
        let last = self.panels.len() - 1;
        &mut self.panels[last]
    }

    /// All buttons, in panel order
    pub fn buttons(&self) -> impl Iterator<Item = &PushButton> {
        self.panels.iter().flat_map(|panel| panel.buttons.iter())
    }

    /// The button bound to `command_id`
    pub fn find_command(&self, command_id: &str) -> Option<&PushButton> {
        self.buttons().find(|button| button.data.command_id == command_id)
    }
}

/// Application entry points called by the host
#[derive(Clone, Copy, Debug, Default)]
pub struct ParameterScannerApp;

impl ParameterScannerApp {
    /// Register the ribbon panel and the scanner button
    ///
    /// `asset_dir` is the directory the icon path is resolved against,
    /// normally the directory holding the application binary.
    pub fn on_startup(
        &self,
        ribbon: &mut Ribbon,
        asset_dir: &Path,
        notifier: &mut dyn Notifier,
    ) -> CommandResult {
        let panel = ribbon.create_panel(PANEL_NAME);
        let button = panel.add_button(PushButtonData {
            name: BUTTON_NAME.to_string(),
            text: BUTTON_TEXT.to_string(),
            command_id: SCAN_COMMAND_ID.to_string(),
        });

        let icon_path = asset_dir.join(ICON_PATH);
        match Icon::load(&icon_path) {
            Ok(icon) => {
                debug!("Loaded ribbon icon from {}", icon_path.display());
                button.large_image = Some(icon);
                button.tooltip = Some(BUTTON_TOOLTIP.to_string());
            }
            Err(err) => {
                warn!("Ribbon icon unavailable at {}: {}", icon_path.display(), err);
                notifier.notify(&Notice::error(format!("Failed to load icon.png: {}", err)));
            }
        }

        CommandResult::Succeeded
    }

    pub fn on_shutdown(&self) -> CommandResult {
        CommandResult::Succeeded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_icon(dir: &Path, bytes: &[u8]) {
        fs::create_dir_all(dir.join("images")).unwrap();
        fs::write(dir.join(ICON_PATH), bytes).unwrap();
    }

    #[test]
    fn test_startup_with_icon() {
        let dir = tempfile::tempdir().unwrap();
        let mut png = PNG_SIGNATURE.to_vec();
        png.extend_from_slice(b"rest-of-image");
        write_icon(dir.path(), &png);

        let mut ribbon = Ribbon::new();
        let mut notices: Vec<Notice> = Vec::new();
        let result = ParameterScannerApp.on_startup(&mut ribbon, dir.path(), &mut notices);

        assert_eq!(result, CommandResult::Succeeded);
        assert!(notices.is_empty());
        assert_eq!(ribbon.panels.len(), 1);
        assert_eq!(ribbon.panels[0].name, PANEL_NAME);
        let button = ribbon.find_command(SCAN_COMMAND_ID).unwrap();
        assert_eq!(button.data.name, BUTTON_NAME);
        assert_eq!(button.tooltip.as_deref(), Some(BUTTON_TOOLTIP));
        assert_eq!(button.large_image.as_ref().map(|i| i.bytes.len()), Some(png.len()));
    }

    #[test]
    fn test_missing_icon_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut ribbon = Ribbon::new();
        let mut notices: Vec<Notice> = Vec::new();
        let result = ParameterScannerApp.on_startup(&mut ribbon, dir.path(), &mut notices);

        assert_eq!(result, CommandResult::Succeeded);
        assert_eq!(notices.len(), 1);
        assert!(notices[0].message.starts_with("Failed to load icon.png:"));
        let button = ribbon.find_command(SCAN_COMMAND_ID).unwrap();
        assert!(button.large_image.is_none());
    }

    #[test]
    fn test_rejects_non_png_icon() {
        let dir = tempfile::tempdir().unwrap();
        write_icon(dir.path(), b"GIF89a");
        let err = Icon::load(dir.path().join(ICON_PATH)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
