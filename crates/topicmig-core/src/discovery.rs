//! # Migration Discovery
//!
//! Lists the migration files of a directory in application order.
//!
//! Only the top level of the directory is scanned. Entries are kept when
//! their file name satisfies the filename contract and they are regular
//! files; everything else (READMEs, editor backups, `v001_…` typos,
//! subdirectories) is skipped with a `debug` event so a missing migration
//! can be traced from the logs.
//!
//! Order is by version. Because versions are fixed-width this is the same as
//! lexical order of the file names, but two files sharing a version
//! (`v0003_a.yaml`, `v0003_b.yml`) have no defined order and are rejected.

use std::path::{Path, PathBuf};

use crate::descriptor::MigrationDescriptor;
use crate::error::{DiscoveryError, DiscoveryResult};
use crate::filename::MigrationFileName;
use crate::loader;

/// A migration file found by [`discover`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationFile {
    path: PathBuf,
    name: MigrationFileName,
}

impl MigrationFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn version(&self) -> u16 {
        self.name.version()
    }

    pub fn description(&self) -> &str {
        self.name.description()
    }

    pub fn file_name(&self) -> &MigrationFileName {
        &self.name
    }

    /// Load the descriptor of this migration.
    pub fn load(&self) -> DiscoveryResult<MigrationDescriptor> {
        Ok(loader::load(&self.path)?)
    }
}

/// List the migrations in `dir`, ordered by version.
pub fn discover(dir: &Path) -> DiscoveryResult<Vec<MigrationFile>> {
    if !dir.is_dir() {
        return Err(DiscoveryError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let read_dir_err = |source: std::io::Error| DiscoveryError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_dir_err)? {
        let entry = entry.map_err(read_dir_err)?;
        let path = entry.path();

        let Some(file_name) = entry.file_name().to_str().map(str::to_owned) else {
            tracing::debug!(path = %path.display(), "skipping non UTF-8 file name");
            continue;
        };
        let Some(name) = MigrationFileName::parse(&file_name) else {
            tracing::debug!(file = %file_name, "skipping file outside the migration naming contract");
            continue;
        };
        if !path.is_file() {
            tracing::debug!(file = %file_name, "skipping non-file entry");
            continue;
        }
        files.push(MigrationFile { path, name });
    }

    files.sort_by(|a, b| a.version().cmp(&b.version()).then_with(|| a.path.cmp(&b.path)));

    if let Some(pair) = files.windows(2).find(|w| w[0].version() == w[1].version()) {
        return Err(DiscoveryError::DuplicateVersion {
            version: pair[0].version(),
            first: pair[0].path.clone(),
            second: pair[1].path.clone(),
        });
    }

    tracing::debug!(dir = %dir.display(), count = files.len(), "discovered migrations");
    Ok(files)
}

/// Discover the migrations in `dir` and load each of them in order.
///
/// Stops at the first file that fails to load.
pub fn load_all(dir: &Path) -> DiscoveryResult<Vec<(MigrationFile, MigrationDescriptor)>> {
    discover(dir)?
        .into_iter()
        .map(|file| -> DiscoveryResult<_> {
            let descriptor = file.load()?;
            Ok((file, descriptor))
        })
        .collect()
}
