//! Engine profiles for the simulated host.

use std::path::Path;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Declarative description of what a simulated engine understands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineProfile {
	/// Display name, used in logs and CLI output.
	pub name: String,
	/// Whether a browser-like global context exists.
	pub browser: bool,
	/// Feature-query conditions answered `true` regardless of the other tables.
	pub supports: IndexSet<String>,
	/// Dotted global paths that exist.
	pub globals: IndexSet<String>,
	/// Supported pseudo-classes, written with their leading colon.
	pub selectors: IndexSet<String>,
	/// Supported at-rule names, without the `@`.
	pub at_rules: IndexSet<String>,
	/// Supported value functions, without the parenthesis.
	pub functions: IndexSet<String>,
	/// Whether nested style rules are understood.
	pub nesting: bool,
	/// Initial computed value per known property.
	pub defaults: IndexMap<String, String>,
	/// Source value to serialized computed value.
	pub normalize: IndexMap<String, String>,
}

impl Default for EngineProfile {
	fn default() -> Self {
		Self {
			name: "custom".into(),
			browser: true,
			supports: IndexSet::new(),
			globals: IndexSet::new(),
			selectors: IndexSet::new(),
			at_rules: IndexSet::new(),
			functions: IndexSet::new(),
			nesting: false,
			defaults: IndexMap::new(),
			normalize: IndexMap::new(),
		}
	}
}

impl EngineProfile {
	/// A profile named `name` that knows nothing beyond being a browser.
	pub fn empty(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			..Self::default()
		}
	}

	/// A non-browser context, e.g. server-side rendering.
	pub fn headless() -> Self {
		Self {
			name: "headless".into(),
			browser: false,
			..Self::default()
		}
	}

	/// An engine with most modern features, used when no profile is given.
	pub fn baseline() -> Self {
		let mut p = Self::empty("baseline");
		p.selectors = set([
			":has",
			":is",
			":where",
			":not",
			":focus-visible",
			":focus-within",
			":user-valid",
			":user-invalid",
			":hover",
			":first-child",
		]);
		p.at_rules = set(["layer", "container", "media", "supports", "scope"]);
		p.functions = set([
			"rgb", "rgba", "hsl", "calc", "var", "min", "max", "clamp", "color-mix", "lch",
			"oklch", "lab", "oklab", "sin", "cos", "scroll", "view",
		]);
		p.nesting = true;
		p.globals = set([
			"document.startViewTransition",
			"HTMLElement.prototype.popover",
			"CSS.registerProperty",
			"CSS.highlights",
		]);
		p.defaults = [
			("color", "rgb(0, 0, 0)"),
			("display", "inline"),
			("width", "auto"),
			("height", "auto"),
			("accent-color", "auto"),
			("aspect-ratio", "auto"),
			("container-type", "normal"),
			("text-wrap", "wrap"),
			("scale", "none"),
			("translate", "none"),
			("rotate", "none"),
			("animation-timeline", "auto"),
			("anchor-name", "none"),
			("content-visibility", "visible"),
			("scrollbar-gutter", "auto"),
			("overscroll-behavior", "auto"),
			("inset", "auto"),
			("grid-template-rows", "none"),
			("field-sizing", "fixed"),
		]
		.into_iter()
		.map(|(k, v)| (k.to_string(), v.to_string()))
		.collect();
		p.supports = set([
			"display: grid",
			"display: flex",
			"height: 1dvh",
			"width: 1cqi",
		]);
		p.normalize = [("red", "rgb(255, 0, 0)"), ("blue", "rgb(0, 0, 255)")]
			.into_iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();
		p
	}

	/// Parses a TOML profile.
	pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(input)?)
	}

	/// Reads and parses a TOML profile from disk.
	pub fn load(path: &Path) -> Result<Self, ConfigError> {
		let input = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml_str(&input)
	}
}

fn set<const N: usize>(items: [&str; N]) -> IndexSet<String> {
	items.into_iter().map(str::to_string).collect()
}
