//! Names derived from feature identifiers.

use heck::ToUpperCamelCase;

use crate::config::Prefix;

/// Prefix that marks a negative result on the document root.
pub const NO_PREFIX: &str = "no-";

/// Accessor name for `identifier`: kebab-case to PascalCase, punctuation dropped.
///
/// `accent-color` becomes `AccentColor`, `:has()` becomes `Has`. Distinct
/// identifiers can share a name (`a-b`, `a_b`); see
/// [`Results::collisions`](crate::Results::collisions).
pub fn global_name(identifier: &str) -> String {
	identifier.to_upper_camel_case()
}

/// Class added to the root when `identifier` is supported.
pub fn supports_class(prefix: &Prefix, identifier: &str) -> String {
	match prefix {
		Prefix::Disabled => identifier.to_string(),
		Prefix::Custom(p) => format!("{p}-{identifier}"),
	}
}

/// Class added to the root when `identifier` is not supported.
pub fn no_class(identifier: &str) -> String {
	format!("{NO_PREFIX}{identifier}")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn global_name_is_pascal_case() {
		assert_eq!(global_name("accent-color"), "AccentColor");
		assert_eq!(global_name("has"), "Has");
		assert_eq!(global_name("text-wrap-balance"), "TextWrapBalance");
		assert_eq!(global_name("container-queries"), "ContainerQueries");
	}

	#[test]
	fn global_name_drops_punctuation() {
		assert_eq!(global_name(":focus-visible"), "FocusVisible");
		assert_eq!(global_name("color.mix"), "ColorMix");
		assert_eq!(global_name("a_b"), global_name("a-b"));
	}

	#[test]
	fn supports_class_follows_prefix_policy() {
		assert_eq!(supports_class(&Prefix::Disabled, "has"), "has");
		assert_eq!(supports_class(&Prefix::Custom("css".into()), "has"), "css-has");
		assert_eq!(supports_class(&Prefix::default(), "has"), "supports-has");
	}

	#[test]
	fn no_class_is_prefixed() {
		assert_eq!(no_class("nesting"), "no-nesting");
	}
}
