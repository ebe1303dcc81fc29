//! Migration error types.
//!
//! Structured errors for loading and discovering migration files. Every
//! variant carries the offending path so the CLI can print a diagnostic
//! without re-deriving context.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading a single migration file.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// The path does not name an existing regular file.
    #[error("migration file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// The file exists but could not be read as UTF-8 text.
    #[error("failed to read migration file {path}: {source}")]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The content is not valid YAML or does not have the migration shape.
    #[error("failed to parse migration {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

impl MigrationError {
    /// The file the error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::FileNotFound { path } | Self::Unreadable { path, .. } | Self::Parse { path, .. } => {
                path
            }
        }
    }

    /// Whether the failure happened before any YAML was parsed.
    pub fn is_file_error(&self) -> bool {
        matches!(self, Self::FileNotFound { .. } | Self::Unreadable { .. })
    }

    /// Line and column (1-based) of a parse failure, when the parser knows it.
    pub fn location(&self) -> Option<(usize, usize)> {
        match self {
            Self::Parse { source, .. } => source.location().map(|l| (l.line(), l.column())),
            _ => None,
        }
    }
}

/// Result type alias for migration loading.
pub type MigrationResult<T> = Result<T, MigrationError>;

/// Errors that can occur while discovering the migrations of a directory.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The migrations directory does not exist or is not a directory.
    #[error("migrations directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Listing the directory failed.
    #[error("failed to list migrations directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Two migration files claim the same version.
    #[error("duplicate migration version v{version:04}: {first} and {second}")]
    DuplicateVersion {
        version: u16,
        first: PathBuf,
        second: PathBuf,
    },

    /// A discovered migration failed to load.
    #[error(transparent)]
    Migration(#[from] MigrationError),
}

/// Result type alias for migration discovery.
pub type DiscoveryResult<T> = Result<T, DiscoveryError>;
