//! # topicmig-core — Migration File Contract
//!
//! Turns a directory of versioned YAML files into strongly typed topic
//! migration descriptors. Nothing in this crate talks to a broker: it decides
//! which files are migrations, in what order they apply, and what each one
//! says.
//!
//! ## Components
//!
//! - **Filename contract** ([`filename`]): `v<4 digits>_<description>.yaml`
//!   (or `.yml`). The fixed-width version is what makes lexical order equal
//!   application order.
//!
//! - **Scalar typing** ([`value`]): resolves each `config` scalar to a
//!   [`TypedValue`] using YAML's implicit typing rules, so `1` stays a long,
//!   `0.2` a double, `true` a boolean and `"1"` a string. Zero-padded
//!   `007` is a long too, checked against a `yaml-rust2` parse.
//!
//! - **Loader** ([`loader`]): reads one migration file into an immutable
//!   [`MigrationDescriptor`].
//!
//! - **Discovery** ([`discovery`]): lists the migrations of a directory in
//!   version order.
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - Failures are returned as typed errors, never panics.
//! - The loader never logs and never writes to stdout/stderr; callers decide
//!   how failures are reported.

pub mod descriptor;
pub mod discovery;
pub mod error;
pub mod filename;
pub mod loader;
pub mod value;

// Re-export primary types for ergonomic imports.
pub use descriptor::{MigrationDescriptor, TopicConfig};
pub use discovery::{discover, load_all, MigrationFile};
pub use error::{DiscoveryError, DiscoveryResult, MigrationError, MigrationResult};
pub use filename::{Extension, MigrationFileName};
pub use loader::load;
pub use value::{resolve, TypedValue};
