//! Terminal shell: notices on the console, the dialog as prompts.

use anyhow::Result;
use dialoguer::{Input, Select};
use paramscan_core::{Dialog, Notice, Notifier, ParameterScanner, ScannerDialog};
use paramscan_model::HostDocument;

/// Prints notices; to stderr when stdout is reserved for JSON.
#[derive(Debug, Default)]
pub struct TerminalNotifier {
    to_stderr: bool,
    shown: usize,
}

impl TerminalNotifier {
    pub fn new(to_stderr: bool) -> Self {
        Self {
            to_stderr,
            shown: 0,
        }
    }

    /// Number of notices shown so far.
    pub fn shown(&self) -> usize {
        self.shown
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&mut self, notice: &Notice) {
        self.shown += 1;
        tracing::debug!(title = %notice.title, "notice");
        if self.to_stderr {
            eprintln!("{}", notice);
        } else {
            println!("{}", notice);
        }
    }
}

/// How the user left the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogExit {
    /// Back to the ribbon; the dialog stays open with its inputs.
    Detached,
    /// Closed by the user.
    Closed,
}

const ACTIONS: [&str; 4] = ["Select", "Isolate", "Back to ribbon", "Close"];

/// The scanner dialog rendered with `dialoguer` prompts.
#[derive(Debug, Clone)]
pub struct TerminalDialog {
    form: ScannerDialog,
}

impl TerminalDialog {
    pub fn new(scanner: ParameterScanner) -> Self {
        Self {
            form: ScannerDialog::new(scanner),
        }
    }

    pub fn form_mut(&mut self) -> &mut ScannerDialog {
        &mut self.form
    }

    /// Prompt for the inputs and run actions until the user leaves.
    pub fn run(&mut self, host: &mut dyn HostDocument, notifier: &mut dyn Notifier) -> Result<DialogExit> {
        loop {
            let name: String = Input::new()
                .with_prompt("Parameter Name")
                .with_initial_text(self.form.parameter_name())
                .allow_empty(true)
                .interact_text()?;
            self.form.set_parameter_name(name);

            let value: String = Input::new()
                .with_prompt("Parameter Value")
                .with_initial_text(self.form.parameter_value())
                .allow_empty(true)
                .interact_text()?;
            self.form.set_parameter_value(value);

            let action = Select::new()
                .with_prompt("Action")
                .items(&ACTIONS)
                .default(0)
                .interact()?;

            match action {
                0 => {
                    self.form.click_select(host, notifier);
                }
                1 => {
                    self.form.click_isolate(host, notifier);
                }
                2 => return Ok(DialogExit::Detached),
                _ => {
                    self.form.hide();
                    return Ok(DialogExit::Closed);
                }
            }
        }
    }
}

impl Dialog for TerminalDialog {
    fn show(&mut self) {
        self.form.show();
        println!("\n== Parameter Scanner ==");
    }

    fn focus(&mut self) {
        self.form.focus();
        println!("\n== Parameter Scanner (already open) ==");
    }

    fn is_visible(&self) -> bool {
        self.form.is_visible()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paramscan_core::{DialogSession, NoticeTitle, SessionEvent};

    #[test]
    fn notifier_counts_notices() {
        let mut notifier = TerminalNotifier::new(true);
        notifier.notify(&Notice::new(NoticeTitle::Action, "Selected 1 elements."));
        notifier.notify(&Notice::error("boom"));
        assert_eq!(notifier.shown(), 2);
    }

    #[test]
    fn session_refocuses_terminal_dialog() {
        let mut session: DialogSession<TerminalDialog> = DialogSession::new();
        let first = session.open_or_focus(|| {
            Ok::<_, std::convert::Infallible>(TerminalDialog::new(ParameterScanner::new()))
        });
        assert_eq!(first, Ok(SessionEvent::Opened));

        let second = session.open_or_focus(|| {
            Ok::<_, std::convert::Infallible>(TerminalDialog::new(ParameterScanner::new()))
        });
        assert_eq!(second, Ok(SessionEvent::Focused));
        assert!(session.dialog().is_some_and(|d| d.is_visible()));
    }
}
