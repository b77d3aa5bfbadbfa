//! Built-in feature checks.
//!
//! Most checks are a single feature query. The ones that cannot be phrased as
//! a query (nesting, at-rule gated rules) go through [`test_env`].

use crate::env::test_env;
use crate::feature_test;

feature_test!(has, "has", "The :has() relational pseudo-class", |host| {
	host.supports("selector(:has(+ *))")
});

feature_test!(nesting, "nesting", "Native CSS nesting", |host| {
	test_env(host, "div { & > p { width: 1px; } }", "p", "width", "1px")
});

feature_test!(
	container_queries,
	"container-queries",
	"Size container queries",
	|host| host.supports("container-type: inline-size")
);

feature_test!(
	style_queries,
	"style-queries",
	"Container style queries",
	|host| test_env(
		host,
		"@container style(--featurist: 1) { p { width: 1px; } } div { --featurist: 1; }",
		"p",
		"width",
		"1px",
	)
);

feature_test!(cascade_layers, "cascade-layers", "The @layer at-rule", |host| {
	test_env(host, "@layer featurist { p { width: 1px; } }", "p", "width", "1px")
});

feature_test!(scope, "scope", "The @scope at-rule", |host| {
	test_env(host, "@scope (div) { p { width: 1px; } }", "p", "width", "1px")
});

feature_test!(focus_visible, "focus-visible", "The :focus-visible pseudo-class", |host| {
	host.supports("selector(:focus-visible)")
});

feature_test!(focus_within, "focus-within", "The :focus-within pseudo-class", |host| {
	host.supports("selector(:focus-within)")
});

feature_test!(is, "is", "The :is() pseudo-class", |host| host.supports("selector(:is(*))"));

feature_test!(where_selector, "where", "The :where() pseudo-class", |host| {
	host.supports("selector(:where(*))")
});

feature_test!(not_list, "not-list", "Selector lists inside :not()", |host| {
	host.supports("selector(:not(p, a))")
});

feature_test!(user_valid, "user-valid", "The :user-valid and :user-invalid pseudo-classes", |host| {
	host.supports("selector(:user-valid)") && host.supports("selector(:user-invalid)")
});

feature_test!(accent_color, "accent-color", "The accent-color property", |host| {
	host.supports("accent-color: red")
});

feature_test!(aspect_ratio, "aspect-ratio", "The aspect-ratio property", |host| {
	host.supports("aspect-ratio: 1 / 1")
});

feature_test!(subgrid, "subgrid", "Grid subgrid tracks", |host| {
	host.supports("grid-template-rows: subgrid")
});

feature_test!(color_mix, "color-mix", "The color-mix() function", |host| {
	host.supports("color: color-mix(in srgb, red, blue)")
});

feature_test!(oklch, "oklch", "The oklch() color function", |host| {
	host.supports("color: oklch(70% 0.1 200)")
});

feature_test!(trig_functions, "trig-functions", "Trigonometric functions in calc()", |host| {
	host.supports("width: calc(1px * sin(1deg))")
});

feature_test!(text_wrap_balance, "text-wrap-balance", "Balanced text wrapping", |host| {
	host.supports("text-wrap: balance")
});

feature_test!(
	individual_transforms,
	"individual-transforms",
	"The scale, translate and rotate properties",
	|host| host.supports("scale: 1") && host.supports("translate: 1px") && host.supports("rotate: 1deg")
);

feature_test!(
	dynamic_viewport_units,
	"dynamic-viewport-units",
	"The dvh, svh and lvh units",
	|host| host.supports("height: 1dvh")
);

feature_test!(scroll_timeline, "scroll-timeline", "Scroll-driven animations", |host| {
	host.supports("animation-timeline: scroll()")
});

feature_test!(anchor_positioning, "anchor-positioning", "CSS anchor positioning", |host| {
	host.supports("anchor-name: --featurist")
});

feature_test!(content_visibility, "content-visibility", "The content-visibility property", |host| {
	host.supports("content-visibility: auto")
});

feature_test!(field_sizing, "field-sizing", "The field-sizing property", |host| {
	host.supports("field-sizing: content")
});

feature_test!(view_transitions, "view-transitions", "Same-document view transitions", |host| {
	host.has_global("document.startViewTransition")
});

feature_test!(popover, "popover", "The popover attribute", |host| {
	host.has_global("HTMLElement.prototype.popover")
});

feature_test!(
	registered_properties,
	"registered-properties",
	"Registered custom properties",
	|host| host.has_global("CSS.registerProperty")
);
