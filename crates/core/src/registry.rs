//! Test registry: one current entry per feature identifier.

use indexmap::IndexMap;
use serde::Serialize;

use crate::config::{Config, Prefix, TestOptions};
use crate::naming;

/// The registry's unit of record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestEntry {
	pub identifier: String,
	pub result: bool,
	/// Class added to the root when `result` is true.
	pub supports_class: String,
	/// Class added to the root when `result` is false, if negative classes are enabled.
	pub no_class: Option<String>,
}

impl TestEntry {
	/// Builds an entry, resolving overrides against the configured defaults.
	pub fn resolve(identifier: &str, result: bool, config: &Config, options: &TestOptions) -> Self {
		let prefix: &Prefix = options.prefix.as_ref().unwrap_or(&config.supports_prefix);
		let unsupported = options.unsupported_classes.unwrap_or(config.unsupported_classes);
		Self {
			identifier: identifier.to_string(),
			result,
			supports_class: naming::supports_class(prefix, identifier),
			no_class: unsupported.then(|| naming::no_class(identifier)),
		}
	}

	/// The class this entry puts on the root, if any.
	pub fn active_class(&self) -> Option<&str> {
		if self.result {
			Some(&self.supports_class)
		} else {
			self.no_class.as_deref()
		}
	}

	/// Every class name this entry could be responsible for.
	pub fn class_names(&self) -> impl Iterator<Item = &str> {
		std::iter::once(self.supports_class.as_str()).chain(self.no_class.as_deref())
	}
}

/// Insertion-ordered entries keyed by feature identifier.
///
/// Re-registering an identifier replaces its entry in place; the original
/// position is kept.
#[derive(Debug, Default, Clone)]
pub struct Registry {
	entries: IndexMap<String, TestEntry>,
}

impl Registry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Stores `entry`, returning the entry it replaced.
	pub fn insert(&mut self, entry: TestEntry) -> Option<TestEntry> {
		self.entries.insert(entry.identifier.clone(), entry)
	}

	pub fn get(&self, identifier: &str) -> Option<&TestEntry> {
		self.entries.get(identifier)
	}

	pub fn iter(&self) -> impl Iterator<Item = &TestEntry> {
		self.entries.values()
	}

	/// Identifier, other than `except`, whose entry currently makes `class` active.
	pub fn active_owner(&self, class: &str, except: &str) -> Option<&str> {
		self.entries
			.values()
			.find(|e| e.identifier != except && e.active_class() == Some(class))
			.map(|e| e.identifier.as_str())
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
