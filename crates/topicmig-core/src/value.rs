//! # Scalar Typing for Topic Configuration
//!
//! Topic configuration values are written as plain YAML scalars and their
//! kind is decided by YAML's implicit typing, not by any knowledge of the
//! broker's configuration schema:
//!
//! | Written as                    | Resolves to        |
//! |-------------------------------|--------------------|
//! | `snappy`, `"1"`, `'true'`     | [`TypedValue::String`] |
//! | `1`, `-3`, `24324324234242`   | [`TypedValue::Long`]   |
//! | `0.2`, `1e3`, `.inf`          | [`TypedValue::Double`] |
//! | `true`, `false`               | [`TypedValue::Boolean`]|
//!
//! Quoting always yields a string. It is the only way to keep a
//! numeric-looking value textual.
//!
//! Zero-padded digits (`007`, `-0100`) are integers under YAML 1.2, but
//! `serde_yaml` hands them to the visitor as text, where they look exactly
//! like a quoted `"007"`. A second, style-preserving parse with `yaml-rust2`
//! tells the two apart; see [`promote_plain_integer`].
//!
//! The resolution happens inside deserialization: [`TypedValue`] implements
//! `Deserialize` with a visitor that accepts exactly these four kinds, so a
//! loaded descriptor never holds an untyped YAML value. Nulls, sequences and
//! mappings are rejected, as are unsigned integers that do not fit in an
//! `i64`.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserialize, Deserializer, Unexpected, Visitor};
use serde::ser::{Serialize, Serializer};
use yaml_rust2::{Yaml, YamlLoader};

/// A resolved topic configuration value.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    String(String),
    Long(i64),
    Double(f64),
    Boolean(bool),
}

impl TypedValue {
    /// Human-readable name of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Long(_) => "long",
            Self::Double(_) => "double",
            Self::Boolean(_) => "boolean",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Long(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Double(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

/// Resolve an already-parsed YAML value.
///
/// Fails for anything that is not a string, integer, float or boolean
/// scalar. A `serde_yaml::Value` no longer knows how its scalars were
/// quoted, so a zero-padded string stays a string here.
pub fn resolve(raw: &serde_yaml::Value) -> Result<TypedValue, serde_yaml::Error> {
    TypedValue::deserialize(raw)
}

/// Re-type `value` as a long when `node`, the same scalar read with its
/// quoting style intact, is an unquoted integer.
pub(crate) fn promote_plain_integer(value: &mut TypedValue, node: &Yaml) {
    if let Yaml::Integer(n) = node {
        if matches!(value, TypedValue::String(_)) {
            *value = TypedValue::Long(*n);
        }
    }
}

/// Parses the text of a single YAML scalar, e.g. `0.2` or `"0.2"`.
impl FromStr for TypedValue {
    type Err = serde_yaml::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut value: TypedValue = serde_yaml::from_str(s)?;
        let styled = YamlLoader::load_from_str(s).ok();
        if let Some(node) = styled.as_ref().and_then(|docs| docs.first()) {
            promote_plain_integer(&mut value, node);
        }
        Ok(value)
    }
}

struct TypedValueVisitor;

impl<'de> Visitor<'de> for TypedValueVisitor {
    type Value = TypedValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, integer, float, or boolean scalar")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<TypedValue, E> {
        Ok(TypedValue::Boolean(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<TypedValue, E> {
        Ok(TypedValue::Long(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<TypedValue, E> {
        i64::try_from(v).map(TypedValue::Long).map_err(|_| {
            E::invalid_value(
                Unexpected::Unsigned(v),
                &"an integer within the 64-bit signed range",
            )
        })
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<TypedValue, E> {
        Ok(TypedValue::Double(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<TypedValue, E> {
        Ok(TypedValue::String(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<TypedValue, E> {
        Ok(TypedValue::String(v))
    }
}

impl<'de> Deserialize<'de> for TypedValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TypedValueVisitor)
    }
}

impl Serialize for TypedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::String(s) => serializer.serialize_str(s),
            Self::Long(n) => serializer.serialize_i64(*n),
            Self::Double(n) => serializer.serialize_f64(*n),
            Self::Boolean(b) => serializer.serialize_bool(*b),
        }
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Long(n) => write!(f, "{n}"),
            // Debug keeps the fractional part, so 1.0 does not print as a long.
            Self::Double(n) => write!(f, "{n:?}"),
            Self::Boolean(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for TypedValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for TypedValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for TypedValue {
    fn from(n: i64) -> Self {
        Self::Long(n)
    }
}

impl From<f64> for TypedValue {
    fn from(n: f64) -> Self {
        Self::Double(n)
    }
}

impl From<bool> for TypedValue {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}
