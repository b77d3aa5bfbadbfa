//! Detection configuration.
//!
//! A [`Config`] is consumed once by [`Featurist::init`](crate::Featurist::init).
//! Individual [`Featurist::add_test_with`](crate::Featurist::add_test_with)
//! calls may override its class-naming policy through [`TestOptions`].
//!
//! The TOML form mirrors the fields:
//!
//! ```toml
//! tests = ["has", "nesting"]
//! supports_prefix = "css"   # or `false` to use bare identifiers
//! unsupported_classes = false
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use indexmap::IndexSet;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// Prefix applied to supports-classes when none is configured.
pub const DEFAULT_SUPPORTS_PREFIX: &str = "supports";

/// Errors loading a configuration or engine profile.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// Error parsing TOML syntax or structure.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),
}

/// Supports-class prefix policy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Prefix {
	/// The supports-class is the bare identifier.
	Disabled,
	/// The supports-class is `"{prefix}-{identifier}"`.
	Custom(String),
}

impl Default for Prefix {
	fn default() -> Self {
		Prefix::Custom(DEFAULT_SUPPORTS_PREFIX.to_string())
	}
}

impl From<&str> for Prefix {
	fn from(prefix: &str) -> Self {
		Prefix::Custom(prefix.to_string())
	}
}

impl Serialize for Prefix {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			Prefix::Disabled => serializer.serialize_bool(false),
			Prefix::Custom(p) => serializer.serialize_str(p),
		}
	}
}

impl<'de> Deserialize<'de> for Prefix {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		struct PrefixVisitor;

		impl Visitor<'_> for PrefixVisitor {
			type Value = Prefix;

			fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				f.write_str("a prefix string or a boolean")
			}

			fn visit_bool<E: de::Error>(self, v: bool) -> Result<Prefix, E> {
				Ok(if v { Prefix::default() } else { Prefix::Disabled })
			}

			fn visit_str<E: de::Error>(self, v: &str) -> Result<Prefix, E> {
				Ok(Prefix::Custom(v.to_string()))
			}
		}

		deserializer.deserialize_any(PrefixVisitor)
	}
}

/// One-shot configuration for [`Featurist::init`](crate::Featurist::init).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	/// Built-in feature identifiers to run. Unknown identifiers are ignored.
	pub tests: Vec<String>,
	/// Prefix policy for supports-classes.
	pub supports_prefix: Prefix,
	/// Whether negative results add a `no-*` class.
	pub unsupported_classes: bool,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			tests: Vec::new(),
			supports_prefix: Prefix::default(),
			unsupported_classes: true,
		}
	}
}

impl Config {
	/// Configuration running `tests` with default class policy.
	pub fn with_tests<I, S>(tests: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			tests: tests.into_iter().map(Into::into).collect(),
			..Self::default()
		}
	}

	pub fn supports_prefix(mut self, prefix: Prefix) -> Self {
		self.supports_prefix = prefix;
		self
	}

	pub fn unsupported_classes(mut self, enabled: bool) -> Self {
		self.unsupported_classes = enabled;
		self
	}

	/// Requested identifiers with duplicates removed, first occurrence kept.
	pub fn selected(&self) -> IndexSet<&str> {
		self.tests.iter().map(String::as_str).collect()
	}

	pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(input)?)
	}

	pub fn load(path: &Path) -> Result<Self, ConfigError> {
		let input = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml_str(&input)
	}
}

/// Per-test override of the configured class policy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestOptions {
	pub prefix: Option<Prefix>,
	pub unsupported_classes: Option<bool>,
}

impl TestOptions {
	pub fn prefix(mut self, prefix: Prefix) -> Self {
		self.prefix = Some(prefix);
		self
	}

	pub fn unsupported_classes(mut self, enabled: bool) -> Self {
		self.unsupported_classes = Some(enabled);
		self
	}
}
