//! # Terminal Output
//!
//! Decides whether progress lines use color and emoji, and renders the
//! per-repository markers and the batch tally.
//!
//! `--color auto` turns styling off when any of these hold:
//! - `NO_COLOR` is set, even to an empty value
//! - `CLICOLOR=0`
//! - `TERM=dumb`
//! - stdout is not a terminal, unless `CLICOLOR_FORCE` is set to a non-zero value
//!
//! Without styling every emoji is replaced by a bracketed tag such as `[OK]`,
//! which keeps logs and test output stable.

use std::env;

use clap::ValueEnum;
use console::style;

use crate::batch::{BatchResult, BatchStatus};

/// Value of the global `--color` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Style output when the terminal supports it
    #[default]
    Auto,
    /// Always style output
    Always,
    /// Never style output
    Never,
}

/// Styling decision shared by all commands.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub use_color: bool,
}

impl OutputConfig {
    pub fn new(choice: ColorChoice) -> Self {
        let use_color = match choice {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => color_from_env(|name| {
                env::var_os(name).map(|v| v.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| console::Term::stdout().features().colors_supported()),
        };
        Self { use_color }
    }

    #[cfg(test)]
    pub fn plain() -> Self {
        Self { use_color: false }
    }

    #[cfg(test)]
    pub fn styled() -> Self {
        Self { use_color: true }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::new(ColorChoice::Auto)
    }
}

/// Color decision forced by the environment, or `None` to ask the terminal.
fn color_from_env(lookup: impl Fn(&str) -> Option<String>) -> Option<bool> {
    if lookup("NO_COLOR").is_some() {
        return Some(false);
    }
    if lookup("CLICOLOR").as_deref() == Some("0") {
        return Some(false);
    }
    if lookup("CLICOLOR_FORCE").is_some_and(|v| !v.is_empty() && v != "0") {
        return Some(true);
    }
    if lookup("TERM").as_deref() == Some("dumb") {
        return Some(false);
    }
    None
}

/// `symbol` when styling is on, `tag` otherwise.
pub fn emoji<'a>(config: &OutputConfig, symbol: &'a str, tag: &'a str) -> &'a str {
    if config.use_color {
        symbol
    } else {
        tag
    }
}

/// Status marker for a batch entry.
pub fn status_marker(config: &OutputConfig, status: BatchStatus) -> String {
    let marker = match status {
        BatchStatus::Success => emoji(config, "✅", "[OK]"),
        BatchStatus::Skipped => emoji(config, "⏭️", "[SKIP]"),
        BatchStatus::Failed => emoji(config, "❌", "[FAIL]"),
    };
    if !config.use_color {
        return marker.to_string();
    }
    match status {
        BatchStatus::Success => style(marker).green().to_string(),
        BatchStatus::Skipped => style(marker).yellow().to_string(),
        BatchStatus::Failed => style(marker).red().to_string(),
    }
}

/// One-line tally of a batch, e.g. `3 succeeded, 1 skipped, 0 failed`.
pub fn batch_summary(result: &BatchResult) -> String {
    format!(
        "{} succeeded, {} skipped, {} failed ({} repositories)",
        result.success,
        result.skipped,
        result.failed,
        result.total()
    )
}
