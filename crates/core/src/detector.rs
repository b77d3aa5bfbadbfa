//! The featurist namespace: initializer, registration and results in one owner.

use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::catalog::Catalog;
use crate::config::{Config, TestOptions};
use crate::env;
use crate::host::Host;
use crate::reflect;
use crate::registry::{Registry, TestEntry};
use crate::results::Results;

/// Lifecycle of a [`Featurist`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InitState {
	#[default]
	Uninitialized,
	/// Terminal for the lifetime of the instance.
	Initialized,
}

/// Owned detection namespace bound to one host.
///
/// Created empty; populated by [`init`](Self::init) and
/// [`add_test`](Self::add_test). Every registration updates the registry, the
/// root classes and the published results before returning.
pub struct Featurist<H: Host> {
	host: H,
	catalog: Catalog,
	config: Config,
	registry: Registry,
	results: Results,
	state: InitState,
}

impl<H: Host> Featurist<H> {
	/// A namespace over `host` using the built-in catalog.
	pub fn new(host: H) -> Self {
		Self::with_catalog(host, Catalog::builtin())
	}

	pub fn with_catalog(host: H, catalog: Catalog) -> Self {
		Self {
			host,
			catalog,
			config: Config::default(),
			registry: Registry::new(),
			results: Results::default(),
			state: InitState::Uninitialized,
		}
	}

	/// Runs the configured built-in checks.
	///
	/// Outside a browser-like context this returns without side effects. It
	/// may be called again; selected checks are re-run and their entries
	/// overwritten.
	pub fn init(&mut self, config: Config) {
		if !self.host.is_browser() {
			tracing::debug!("no browser context, skipping feature detection");
			return;
		}
		let selected: Vec<String> = config.selected().into_iter().map(str::to_string).collect();
		self.config = config;
		self.run_selected(&selected);
		self.state = InitState::Initialized;
		tracing::info!(
			requested = selected.len(),
			registered = self.registry.len(),
			"feature detection initialized"
		);
	}

	/// Runs each catalog check named in `ids`, skipping unknown identifiers.
	pub fn run_selected<S: AsRef<str>>(&mut self, ids: &[S]) {
		for id in ids {
			let id = id.as_ref();
			let Some(def) = self.catalog.get(id) else {
				tracing::debug!(id, "unknown feature test, skipping");
				continue;
			};
			let host = &mut self.host;
			let result = catch_unwind(AssertUnwindSafe(|| (def.check)(host))).unwrap_or_else(|_| {
				tracing::warn!(id, "feature check panicked, treating as unsupported");
				false
			});
			self.register(id, result, &TestOptions::default());
		}
	}

	/// Registers a caller-supplied result under the configured class policy.
	pub fn add_test(&mut self, identifier: &str, result: bool) {
		self.register(identifier, result, &TestOptions::default());
	}

	/// Registers a caller-supplied result with per-test class policy overrides.
	pub fn add_test_with(&mut self, identifier: &str, result: bool, options: TestOptions) {
		self.register(identifier, result, &options);
	}

	/// Stores, reflects and publishes one entry. Last write wins.
	fn register(&mut self, identifier: &str, result: bool, options: &TestOptions) {
		let entry = TestEntry::resolve(identifier, result, &self.config, options);
		tracing::debug!(
			identifier,
			result,
			class = entry.active_class().unwrap_or_default(),
			"feature registered"
		);
		let previous = self.registry.insert(entry.clone());
		reflect::apply(&mut self.host, &self.registry, previous.as_ref(), &entry);
		self.results.publish(&entry);
	}

	/// Isolated computed-style probe against this namespace's host.
	pub fn test_env(&mut self, style: &str, tag: &str, property: &str, expected: &str) -> bool {
		env::test_env(&mut self.host, style, tag, property, expected)
	}

	pub fn results(&self) -> &Results {
		&self.results
	}

	pub fn registry(&self) -> &Registry {
		&self.registry
	}

	pub fn catalog(&self) -> &Catalog {
		&self.catalog
	}

	/// Configuration from the last successful [`init`](Self::init).
	pub fn config(&self) -> &Config {
		&self.config
	}

	pub fn state(&self) -> InitState {
		self.state
	}

	pub fn host(&self) -> &H {
		&self.host
	}

	pub fn host_mut(&mut self) -> &mut H {
		&mut self.host
	}

	pub fn into_host(self) -> H {
		self.host
	}
}

#[cfg(test)]
mod tests;
