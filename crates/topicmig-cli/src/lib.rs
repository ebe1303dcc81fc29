//! # topicmig-cli — Command-Line Interface
//!
//! Provides the `topicmig` binary.
//!
//! ## Subcommands
//!
//! - `topicmig topic --directory <DIR>` — discover the migrations of a
//!   directory, load them, and print the ordered plan (`--format json` for
//!   machine-readable output).
//!
//! ## Global Options
//!
//! `--config-file`, `--kafka-config-file` and `--bootstrap-servers` are
//! parsed by clap and then validated as a separate step (see [`options`]).
//!
//! ## Exit Codes
//!
//! - `0` — success.
//! - `1` — a command failed (discovery rejected the directory or a
//!   migration did not load).
//! - `2` — invalid options or usage.

pub mod cli;
pub mod options;
pub mod properties;
pub mod topic;

pub use cli::{run, Cli, Commands};
