//! Runtime CSS feature detection.
//!
//! Featurist answers, for a configurable set of CSS features, whether the
//! current engine supports them, including features the `@supports` rule cannot
//! express. Results are published as an identifier → boolean mapping, as one
//! boolean per derived global name, and as classes on the document root so
//! stylesheets can branch on support.
//!
//! # Overview
//!
//! - [`Host`] - the browser environment boundary; [`host::sim::SimHost`] is a
//!   deterministic stand-in
//! - [`Featurist`] - owned namespace: [`init`](Featurist::init),
//!   [`add_test`](Featurist::add_test), [`results`](Featurist::results)
//! - [`test_env`] - isolated computed-style probe with guaranteed cleanup
//! - [`Catalog`] - built-in checks, extensible with [`feature_test!`]
//!
//! # Class naming
//!
//! A supported feature `accent-color` adds `supports-accent-color` (or
//! `{prefix}-accent-color`, or bare `accent-color` with the prefix disabled).
//! An unsupported one adds `no-accent-color` unless negative classes are
//! disabled. The two are mutually exclusive per identifier.
//!
//! ```
//! use featurist_core::host::sim::{EngineProfile, SimHost};
//! use featurist_core::{Config, Featurist, Host};
//!
//! let mut featurist = Featurist::new(SimHost::new(EngineProfile::baseline()));
//! featurist.init(Config::with_tests(["accent-color"]));
//! featurist.add_test("my-feature", false);
//!
//! assert_eq!(featurist.results().global("AccentColor"), Some(true));
//! assert!(featurist.host().has_root_class("supports-accent-color"));
//! assert!(featurist.host().has_root_class("no-my-feature"));
//! ```

pub mod catalog;
pub mod config;
mod detector;
pub mod env;
pub mod host;
pub mod naming;
pub mod reflect;
pub mod registry;
pub mod results;

pub use catalog::{Catalog, FeatureTestDef};
pub use config::{Config, ConfigError, Prefix, TestOptions};
pub use detector::{Featurist, InitState};
pub use env::test_env;
pub use host::{Host, HostError, NodeId, StyleId};
pub use registry::TestEntry;
pub use results::{NameCollision, Results};

#[doc(hidden)]
pub mod __private {
	pub use {inventory, paste};
}
