//! Migration file loader.
//!
//! Reads one migration file and deserializes it into a
//! [`MigrationDescriptor`]. The file is read in full and closed before
//! parsing starts; nothing is cached between calls, so concurrent loads of
//! the same or different files need no coordination.
//!
//! The path is not required to pass the filename contract here. Discovery
//! applies that filter; the loader only cares about content.
//!
//! The content is parsed twice. `serde_yaml` builds the descriptor and owns
//! every error; `yaml-rust2` keeps each scalar's quoting style so unquoted
//! zero-padded integers in `config` can be re-typed as longs.

use std::path::Path;

use serde::Deserialize;
use yaml_rust2::YamlLoader;

use crate::descriptor::MigrationDescriptor;
use crate::error::{MigrationError, MigrationResult};

/// Load the migration at `path`.
///
/// # Errors
///
/// - [`MigrationError::FileNotFound`] when `path` is not an existing file.
/// - [`MigrationError::Unreadable`] when the file cannot be read as UTF-8.
/// - [`MigrationError::Parse`] when the content is not valid YAML or not a
///   migration document.
pub fn load(path: &Path) -> MigrationResult<MigrationDescriptor> {
    let content = read_migration(path)?;
    parse_migration(path, &content)
}

fn read_migration(path: &Path) -> MigrationResult<String> {
    if !path.is_file() {
        return Err(MigrationError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    std::fs::read_to_string(path).map_err(|e| {
        // The file may vanish between the check and the read.
        if e.kind() == std::io::ErrorKind::NotFound {
            MigrationError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            MigrationError::Unreadable {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

fn parse_migration(path: &Path, content: &str) -> MigrationResult<MigrationDescriptor> {
    let parse_error = |source: serde_yaml::Error| MigrationError::Parse {
        path: path.to_path_buf(),
        source,
    };
    // Going through `Value` rejects repeated keys at any depth, including
    // under top-level keys the descriptor ignores.
    let document: serde_yaml::Value = serde_yaml::from_str(content).map_err(parse_error)?;
    let mut descriptor = MigrationDescriptor::deserialize(document).map_err(parse_error)?;

    if let Ok(styled) = YamlLoader::load_from_str(content) {
        if let Some(document) = styled.first() {
            descriptor.promote_plain_integers(document);
        }
    }
    Ok(descriptor)
}
