//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the `patchbot`
//! command-line tool. Each subcommand is defined in its own file to keep the
//! logic separated and maintainable.
//!
//! ## Structure
//!
//! Each command module typically contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and performs the
//!   command's logic.
//!
//! Checks that can fail without touching a repository (missing URL, missing
//! patch, missing token, halt without a terminal) run before any job starts.
//! Helpers shared by several commands live in `common`.

pub mod batch_merge;
pub mod batch_patch;
pub mod common;
pub mod completions;
pub mod confirm;
pub mod create;
pub mod discover;
pub mod export;
pub mod import;
pub mod list;
pub mod merge;
pub mod patch;
