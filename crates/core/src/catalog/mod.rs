//! Built-in catalog of feature checks.
//!
//! Each check is a plain `fn(&mut dyn Host) -> bool` registered with
//! [`feature_test!`](crate::feature_test), which submits it through
//! `inventory`. [`Catalog::builtin`] collects every submitted definition; an
//! explicit [`Catalog::new`] is available for callers and tests that want a
//! different set.
//!
//! The catalog is the authority on what [`Featurist::init`](crate::Featurist::init)
//! can run: identifiers it does not know are skipped.

mod builtins;
mod macros;

use indexmap::IndexMap;

use crate::host::Host;

/// Signature of a feature check.
pub type CheckFn = fn(&mut dyn Host) -> bool;

/// A registered feature check.
#[derive(Debug)]
pub struct FeatureTestDef {
	/// Feature identifier (kebab-case).
	pub id: &'static str,
	/// Human-readable description for listings.
	pub description: &'static str,
	/// The check itself.
	pub check: CheckFn,
	/// Crate the definition was registered from.
	pub source: &'static str,
}

/// Wrapper for `inventory::collect!`.
pub struct FeatureTestReg(pub &'static FeatureTestDef);
inventory::collect!(FeatureTestReg);

/// What to do when two definitions share an identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DuplicatePolicy {
	/// Panic with both sources named.
	Panic,
	/// Keep the first definition seen.
	FirstWins,
	/// Overwrite with the last definition seen.
	LastWins,
}

impl DuplicatePolicy {
	/// Returns the appropriate policy based on build configuration.
	#[inline]
	pub fn for_build() -> Self {
		if cfg!(debug_assertions) {
			DuplicatePolicy::Panic
		} else {
			DuplicatePolicy::FirstWins
		}
	}
}

/// Feature identifier → check, sorted by identifier.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
	tests: IndexMap<&'static str, &'static FeatureTestDef>,
}

impl Catalog {
	/// Every definition submitted with [`feature_test!`](crate::feature_test).
	pub fn builtin() -> Self {
		Self::new(inventory::iter::<FeatureTestReg>.into_iter().map(|reg| reg.0))
	}

	/// A catalog of `defs`, resolving duplicates with [`DuplicatePolicy::for_build`].
	pub fn new<I>(defs: I) -> Self
	where
		I: IntoIterator<Item = &'static FeatureTestDef>,
	{
		Self::with_policy(defs, DuplicatePolicy::for_build())
	}

	pub fn with_policy<I>(defs: I, policy: DuplicatePolicy) -> Self
	where
		I: IntoIterator<Item = &'static FeatureTestDef>,
	{
		let mut tests: IndexMap<&'static str, &'static FeatureTestDef> = IndexMap::new();
		for def in defs {
			let Some(existing) = tests.get(def.id) else {
				tests.insert(def.id, def);
				continue;
			};
			match policy {
				DuplicatePolicy::Panic => panic!(
					"duplicate feature test {:?}: registered by {} and {}",
					def.id, existing.source, def.source
				),
				DuplicatePolicy::FirstWins => {
					tracing::warn!(id = def.id, kept = existing.source, dropped = def.source, "duplicate feature test");
				}
				DuplicatePolicy::LastWins => {
					tracing::warn!(id = def.id, kept = def.source, dropped = existing.source, "duplicate feature test");
					tests.insert(def.id, def);
				}
			}
		}
		tests.sort_keys();
		Self { tests }
	}

	pub fn get(&self, id: &str) -> Option<&'static FeatureTestDef> {
		self.tests.get(id).copied()
	}

	pub fn contains(&self, id: &str) -> bool {
		self.tests.contains_key(id)
	}

	/// Definitions in identifier order.
	pub fn iter(&self) -> impl Iterator<Item = &'static FeatureTestDef> + '_ {
		self.tests.values().copied()
	}

	pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
		self.tests.keys().copied()
	}

	pub fn len(&self) -> usize {
		self.tests.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tests.is_empty()
	}
}
