// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Dialog lifecycle and the command that opens the scanner dialog
//!
//! At most one scanner dialog exists per host session. The session state is
//! explicit: the command checks it before creating a dialog, and closing the
//! dialog returns it to [`DialogState::Closed`].

use crate::scanner::{Notice, Notifier};
use log::{debug, warn};
use std::fmt;

/// Command identifier registered with the host
pub const SCAN_COMMAND_ID: &str = "paramscan.scan";

/// A modeless window owned by the shell
pub trait Dialog {
    /// Make the dialog visible
    fn show(&mut self);

    /// Bring an already visible dialog to the front
    fn focus(&mut self);

    /// Whether the dialog is currently on screen
    fn is_visible(&self) -> bool;
}

/// Result reported back to the host after a command runs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandResult {
    Succeeded,
    Failed,
}

/// What [`DialogSession::open_or_focus`] did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// A new dialog was created and shown
    Opened,
    /// The existing dialog was brought to the front
    Focused,
}

/// Lifecycle of the session's single dialog
#[derive(Debug)]
pub enum DialogState<D> {
    Closed,
    Open(D),
}

/// Session-scoped holder for the scanner dialog
#[derive(Debug)]
pub struct DialogSession<D> {
    state: DialogState<D>,
}

impl<D> Default for DialogSession<D> {
    fn default() -> Self {
        Self {
            state: DialogState::Closed,
        }
    }
}

impl<D: Dialog> DialogSession<D> {
    /// Create a session with no dialog open
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a dialog is currently held
    pub fn is_open(&self) -> bool {
        matches!(self.state, DialogState::Open(_))
    }

    /// The open dialog, if any
    pub fn dialog(&self) -> Option<&D> {
        match &self.state {
            DialogState::Open(dialog) => Some(dialog),
            DialogState::Closed => None,
        }
    }

    /// The open dialog, mutably
    pub fn dialog_mut(&mut self) -> Option<&mut D> {
        match &mut self.state {
            DialogState::Open(dialog) => Some(dialog),
            DialogState::Closed => None,
        }
    }

    /// Focus the open dialog, or create and show a new one
    ///
    /// A held dialog that is no longer visible is replaced.
    pub fn open_or_focus<F, E>(&mut self, create: F) -> Result<SessionEvent, E>
    where
        F: FnOnce() -> Result<D, E>,
    {
        if let DialogState::Open(dialog) = &mut self.state {
            if dialog.is_visible() {
                dialog.focus();
                return Ok(SessionEvent::Focused);
            }
        }

        let mut dialog = create()?;
        dialog.show();
        self.state = DialogState::Open(dialog);
        Ok(SessionEvent::Opened)
    }

    /// Handle the dialog's close event
    pub fn close(&mut self) -> Option<D> {
        match std::mem::replace(&mut self.state, DialogState::Closed) {
            DialogState::Open(dialog) => Some(dialog),
            DialogState::Closed => None,
        }
    }
}

/// The host command bound to the ribbon button
#[derive(Clone, Copy, Debug, Default)]
pub struct ScanCommand;

impl ScanCommand {
    /// Open the dialog, or refocus it when it is already open
    ///
    /// A failure to create the dialog is reported through `notifier` and
    /// leaves the session closed.
    pub fn execute<D, F, E>(
        &self,
        session: &mut DialogSession<D>,
        create: F,
        notifier: &mut dyn Notifier,
    ) -> CommandResult
    where
        D: Dialog,
        F: FnOnce() -> Result<D, E>,
        E: fmt::Display,
    {
        match session.open_or_focus(create) {
            Ok(event) => {
                debug!("{}: {:?}", SCAN_COMMAND_ID, event);
                CommandResult::Succeeded
            }
            Err(err) => {
                warn!("{} failed: {}", SCAN_COMMAND_ID, err);
                notifier.notify(&Notice::error(format!("Failed to open UI: {}", err)));
                CommandResult::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct FakeDialog {
        visible: bool,
        focused: usize,
        serial: usize,
    }

    impl Dialog for FakeDialog {
        fn show(&mut self) {
            self.visible = true;
        }

        fn focus(&mut self) {
            self.focused += 1;
        }

        fn is_visible(&self) -> bool {
            self.visible
        }
    }

    fn make(serial: usize) -> impl FnOnce() -> Result<FakeDialog, String> {
        move || {
            Ok(FakeDialog {
                serial,
                ..Default::default()
            })
        }
    }

    #[test]
    fn test_second_execute_refocuses() {
        let mut session = DialogSession::new();
        let mut notices: Vec<Notice> = Vec::new();
        let command = ScanCommand;

        assert_eq!(command.execute(&mut session, make(1), &mut notices), CommandResult::Succeeded);
        assert_eq!(command.execute(&mut session, make(2), &mut notices), CommandResult::Succeeded);

        let dialog = session.dialog().unwrap();
        assert_eq!(dialog.serial, 1);
        assert_eq!(dialog.focused, 1);
        assert!(notices.is_empty());
    }

    #[test]
    fn test_close_then_reopen_creates_fresh_dialog() {
        let mut session = DialogSession::new();
        assert_eq!(session.open_or_focus(make(1)), Ok(SessionEvent::Opened));
        assert_eq!(session.close().map(|d| d.serial), Some(1));
        assert!(!session.is_open());
        assert_eq!(session.open_or_focus(make(2)), Ok(SessionEvent::Opened));
        assert_eq!(session.dialog().map(|d| d.serial), Some(2));
    }

    #[test]
    fn test_hidden_dialog_is_replaced() {
        let mut session = DialogSession::new();
        session.open_or_focus(make(1)).unwrap();
        session.dialog_mut().unwrap().visible = false;
        assert_eq!(session.open_or_focus(make(2)), Ok(SessionEvent::Opened));
        assert_eq!(session.dialog().map(|d| d.serial), Some(2));
    }

    #[test]
    fn test_creation_failure_is_reported() {
        let mut session: DialogSession<FakeDialog> = DialogSession::new();
        let mut notices: Vec<Notice> = Vec::new();
        let result = ScanCommand.execute(
            &mut session,
            || Err::<FakeDialog, _>("no active document"),
            &mut notices,
        );
        assert_eq!(result, CommandResult::Failed);
        assert!(!session.is_open());
        assert_eq!(notices, vec![Notice::error("Failed to open UI: no active document")]);
    }
}
