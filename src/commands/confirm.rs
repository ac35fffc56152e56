//! Terminal prompt for the halt-before-commit step.

use dialoguer::{theme::ColorfulTheme, Confirm};

use patchbot::error::{Error, Result};
use patchbot::workflow::Confirmation;

/// Shows the pending changes and asks on the terminal whether to commit.
pub struct TerminalConfirmation;

impl Confirmation for TerminalConfirmation {
    fn confirm(&self, context: &str) -> Result<bool> {
        eprintln!();
        eprintln!("{}", context);
        eprintln!();

        let theme = ColorfulTheme::default();
        Confirm::with_theme(&theme)
            .with_prompt("Commit and push these changes?")
            .default(false)
            .interact()
            .map_err(|e| Error::Io(std::io::Error::other(e.to_string())))
    }
}
