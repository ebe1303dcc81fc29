//! # Migration Filename Contract
//!
//! A migration file is named `v<version>_<description>.<ext>` where:
//!
//! - `version` is exactly four ASCII digits (`v0001`, `v0420`),
//! - `description` is one or more ASCII letters, digits or hyphens,
//! - `ext` is `yaml` or `yml`.
//!
//! The version width is fixed so that sorting names lexically sorts them in
//! application order. `v001_x.yaml` is rejected: accepting it would place it
//! after `v0001_…` and before `v0002_…` depending on the description.
//!
//! No upper bound is placed on the description length.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Anchored pattern for a migration file name. Group 1 is the version,
/// group 2 the description, group 3 the extension.
static MIGRATION_FILE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^v([0-9]{4})_([A-Za-z0-9-]+)\.(yaml|yml)$")
        .expect("migration file name pattern is a valid regex")
});

/// Whether `name` is a migration file name.
///
/// `name` is a bare file name; anything containing a path separator is
/// rejected.
pub fn matches(name: &str) -> bool {
    MIGRATION_FILE_NAME.is_match(name)
}

/// The parts of a file name that satisfied [`matches`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MigrationFileName {
    version: u16,
    description: String,
    extension: Extension,
}

/// The extension of a migration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Extension {
    Yaml,
    Yml,
}

impl Extension {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Yml => "yml",
        }
    }
}

impl MigrationFileName {
    /// Parse a file name, returning `None` when it is not a migration.
    pub fn parse(name: &str) -> Option<Self> {
        let caps = MIGRATION_FILE_NAME.captures(name)?;
        // Four ASCII digits always fit in a u16.
        let version = caps[1].parse().ok()?;
        let extension = match &caps[3] {
            "yaml" => Extension::Yaml,
            _ => Extension::Yml,
        };
        Some(Self {
            version,
            description: caps[2].to_string(),
            extension,
        })
    }

    /// The numeric version, e.g. `1` for `v0001_…`.
    pub fn version(&self) -> u16 {
        self.version
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn extension(&self) -> Extension {
        self.extension
    }
}

impl fmt::Display for MigrationFileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "v{:04}_{}.{}",
            self.version,
            self.description,
            self.extension.as_str()
        )
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Every four-digit version with a valid description matches.
        #[test]
        fn well_formed_names_match(
            version in 0u16..=9999,
            description in "[A-Za-z0-9-]{1,400}",
            yml in any::<bool>(),
        ) {
            let ext = if yml { "yml" } else { "yaml" };
            let name = format!("v{version:04}_{description}.{ext}");
            prop_assert!(matches(&name));
            let parsed = MigrationFileName::parse(&name).unwrap();
            prop_assert_eq!(parsed.version(), version);
            prop_assert_eq!(parsed.to_string(), name);
        }

        /// Versions with fewer than four digits never match.
        #[test]
        fn short_versions_never_match(
            version in "[0-9]{0,3}",
            description in "[A-Za-z0-9-]{1,40}",
        ) {
            let name = format!("v{version}_{description}.yaml");
            prop_assert!(!matches(&name));
        }

        /// Lexical order of matching names is version order.
        #[test]
        fn lexical_order_is_version_order(
            a in 0u16..=9999,
            b in 0u16..=9999,
            da in "[a-z-]{1,20}",
            db in "[a-z-]{1,20}",
        ) {
            prop_assume!(a != b);
            let na = format!("v{a:04}_{da}.yaml");
            let nb = format!("v{b:04}_{db}.yaml");
            prop_assert_eq!(na.cmp(&nb), a.cmp(&b));
        }
    }
}
