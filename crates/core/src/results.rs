//! Published detection results.
//!
//! [`Results`] is the read-only view callers consume: an insertion-ordered
//! identifier → boolean mapping plus one boolean per derived global name.
//! Both are patched by the same [`Results::publish`] call, so a global never
//! disagrees with the mapping.

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

use crate::naming;
use crate::registry::TestEntry;

/// Two identifiers deriving the same global name.
///
/// Resolved last-write-wins: the global follows `incoming` until `previous`
/// is registered again.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NameCollision {
	pub name: String,
	pub previous: String,
	pub incoming: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Global {
	owner: String,
	value: bool,
}

/// Aggregate results mapping and global-name accessors.
#[derive(Debug, Default, Clone, Serialize)]
pub struct Results {
	mapping: IndexMap<String, bool>,
	#[serde(serialize_with = "serialize_globals")]
	globals: IndexMap<String, Global>,
	#[serde(skip_serializing_if = "IndexSet::is_empty")]
	collisions: IndexSet<NameCollision>,
}

fn serialize_globals<S: serde::Serializer>(
	globals: &IndexMap<String, Global>,
	serializer: S,
) -> Result<S::Ok, S::Error> {
	serializer.collect_map(globals.iter().map(|(name, g)| (name, g.value)))
}

impl Results {
	/// Records `entry` in the mapping and under its global name.
	pub fn publish(&mut self, entry: &TestEntry) {
		self.mapping.insert(entry.identifier.clone(), entry.result);

		let name = naming::global_name(&entry.identifier);
		match self.globals.get_mut(&name) {
			Some(global) => {
				if global.owner != entry.identifier {
					let collision = NameCollision {
						name: name.clone(),
						previous: std::mem::replace(&mut global.owner, entry.identifier.clone()),
						incoming: entry.identifier.clone(),
					};
					if !self.collisions.contains(&collision) {
						tracing::warn!(
							name = %collision.name,
							previous = %collision.previous,
							incoming = %collision.incoming,
							"global name collision, last write wins"
						);
						self.collisions.insert(collision);
					}
				}
				global.value = entry.result;
			}
			None => {
				self.globals.insert(
					name,
					Global {
						owner: entry.identifier.clone(),
						value: entry.result,
					},
				);
			}
		}
	}

	/// Identifier → result, in first-registration order.
	pub fn mapping(&self) -> &IndexMap<String, bool> {
		&self.mapping
	}

	pub fn get(&self, identifier: &str) -> Option<bool> {
		self.mapping.get(identifier).copied()
	}

	/// Result reachable through a global name such as `AccentColor`.
	pub fn global(&self, name: &str) -> Option<bool> {
		self.globals.get(name).map(|g| g.value)
	}

	/// Identifier currently backing a global name.
	pub fn global_owner(&self, name: &str) -> Option<&str> {
		self.globals.get(name).map(|g| g.owner.as_str())
	}

	/// Global name → result, in first-registration order.
	pub fn globals(&self) -> impl Iterator<Item = (&str, bool)> {
		self.globals.iter().map(|(name, g)| (name.as_str(), g.value))
	}

	/// Distinct global-name collisions, in the order first observed.
	pub fn collisions(&self) -> &IndexSet<NameCollision> {
		&self.collisions
	}

	pub fn len(&self) -> usize {
		self.mapping.len()
	}

	pub fn is_empty(&self) -> bool {
		self.mapping.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::config::{Config, TestOptions};

	fn publish(results: &mut Results, id: &str, value: bool) {
		results.publish(&TestEntry::resolve(id, value, &Config::default(), &TestOptions::default()));
	}

	#[test]
	fn mapping_and_globals_agree() {
		let mut results = Results::default();
		publish(&mut results, "accent-color", true);
		publish(&mut results, "has", false);

		assert_eq!(results.get("accent-color"), Some(true));
		assert_eq!(results.global("AccentColor"), Some(true));
		assert_eq!(results.global("Has"), Some(false));
		assert_eq!(results.global("accent-color"), None);
		assert!(results.collisions().is_empty());
	}

	#[test]
	fn overwrite_updates_both_views() {
		let mut results = Results::default();
		publish(&mut results, "has", true);
		publish(&mut results, "has", false);
		assert_eq!(results.len(), 1);
		assert_eq!(results.get("has"), Some(false));
		assert_eq!(results.global("Has"), Some(false));
	}

	#[test]
	fn collision_is_last_write_wins_and_recorded() {
		let mut results = Results::default();
		publish(&mut results, "color-mix", true);
		publish(&mut results, "color_mix", false);

		assert_eq!(results.global("ColorMix"), Some(false));
		assert_eq!(results.global_owner("ColorMix"), Some("color_mix"));
		assert_eq!(
			results.collisions().iter().collect::<Vec<_>>(),
			vec![&NameCollision {
				name: "ColorMix".into(),
				previous: "color-mix".into(),
				incoming: "color_mix".into(),
			}]
		);
		// Both identifiers keep their own mapping entry.
		assert_eq!(results.get("color-mix"), Some(true));
		assert_eq!(results.get("color_mix"), Some(false));

		publish(&mut results, "color-mix", true);
		assert_eq!(results.global("ColorMix"), Some(true));
		assert_eq!(results.collisions().len(), 2);
	}

	#[test]
	fn repeated_collisions_are_not_duplicated() {
		let mut results = Results::default();
		for _ in 0..10 {
			publish(&mut results, "color-mix", true);
			publish(&mut results, "color_mix", false);
		}
		assert_eq!(results.collisions().len(), 2);
		assert_eq!(results.global_owner("ColorMix"), Some("color_mix"));
		assert_eq!(results.len(), 2);
	}

	#[test]
	fn serializes_mapping_and_globals() {
		let mut results = Results::default();
		publish(&mut results, "has", true);
		let out = toml::to_string(&results).unwrap();
		assert!(out.contains("[mapping]"));
		assert!(out.contains("has = true"));
		assert!(out.contains("Has = true"));
	}
}
