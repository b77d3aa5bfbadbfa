use pretty_assertions::assert_eq;

use super::*;
use crate::catalog::FeatureTestDef;
use crate::config::Prefix;
use crate::host::sim::{EngineProfile, SimHost};

static SUPPORTED: FeatureTestDef = FeatureTestDef {
	id: "supported",
	description: "",
	check: |_| true,
	source: "tests",
};

static MISSING: FeatureTestDef = FeatureTestDef {
	id: "missing",
	description: "",
	check: |_| false,
	source: "tests",
};

static EXPLODES: FeatureTestDef = FeatureTestDef {
	id: "explodes",
	description: "",
	check: |_| panic!("broken binding"),
	source: "tests",
};

static ROOT_AWARE: FeatureTestDef = FeatureTestDef {
	id: "grid",
	description: "",
	check: |host| host.supports("display: grid"),
	source: "tests",
};

fn featurist() -> Featurist<SimHost> {
	let mut profile = EngineProfile::empty("detector");
	profile.supports.insert("display: grid".into());
	Featurist::with_catalog(
		SimHost::new(profile),
		Catalog::new([&SUPPORTED, &MISSING, &EXPLODES, &ROOT_AWARE]),
	)
}

fn classes(f: &Featurist<SimHost>) -> Vec<String> {
	f.host().root_classes()
}

#[test]
fn starts_uninitialized_and_empty() {
	let f = featurist();
	assert_eq!(f.state(), InitState::Uninitialized);
	assert!(f.results().is_empty());
	assert!(classes(&f).is_empty());
}

#[test]
fn init_runs_selected_tests() {
	let mut f = featurist();
	f.init(Config::with_tests(["supported", "missing", "grid"]));

	assert_eq!(f.state(), InitState::Initialized);
	let mapping: Vec<_> = f.results().mapping().iter().map(|(k, v)| (k.as_str(), *v)).collect();
	assert_eq!(mapping, vec![("supported", true), ("missing", false), ("grid", true)]);
	assert_eq!(classes(&f), vec!["supports-supported", "no-missing", "supports-grid"]);
	assert_eq!(f.results().global("Supported"), Some(true));
	assert_eq!(f.results().global("Missing"), Some(false));
}

#[test]
fn unselected_and_unknown_tests_are_skipped() {
	let mut f = featurist();
	f.init(Config::with_tests(["supported", "not-in-catalog"]));
	assert_eq!(f.results().len(), 1);
	assert_eq!(f.results().get("not-in-catalog"), None);
	assert_eq!(f.results().get("missing"), None);
}

#[test]
fn init_outside_browser_is_a_no_op() {
	let mut f = Featurist::with_catalog(
		SimHost::new(EngineProfile::headless()),
		Catalog::new([&SUPPORTED]),
	);
	f.init(Config::with_tests(["supported"]));
	assert_eq!(f.state(), InitState::Uninitialized);
	assert!(f.results().is_empty());
	assert!(classes(&f).is_empty());
}

#[test]
fn panicking_check_reads_unsupported() {
	let mut f = featurist();
	f.init(Config::with_tests(["explodes", "supported"]));
	assert_eq!(f.results().get("explodes"), Some(false));
	assert_eq!(f.results().get("supported"), Some(true));
	assert!(f.host().has_root_class("no-explodes"));
}

#[test]
fn unsupported_classes_can_be_disabled() {
	let mut f = featurist();
	f.init(Config::with_tests(["missing"]).unsupported_classes(false));
	assert_eq!(f.results().get("missing"), Some(false));
	assert!(classes(&f).is_empty());
}

#[test]
fn prefix_policy_applies_to_init() {
	let mut f = featurist();
	f.init(Config::with_tests(["supported"]).supports_prefix(Prefix::Disabled));
	assert_eq!(classes(&f), vec!["supported"]);

	let mut f = featurist();
	f.init(Config::with_tests(["supported"]).supports_prefix("css".into()));
	assert_eq!(classes(&f), vec!["css-supported"]);
}

#[test]
fn add_test_works_without_init() {
	let mut f = featurist();
	f.add_test("accent-color", true);
	assert_eq!(f.state(), InitState::Uninitialized);
	assert_eq!(f.results().get("accent-color"), Some(true));
	assert_eq!(f.results().global("AccentColor"), Some(true));
	assert_eq!(classes(&f), vec!["supports-accent-color"]);
}

#[test]
fn add_test_inherits_init_policy() {
	let mut f = featurist();
	f.init(Config::default().supports_prefix("css".into()).unsupported_classes(false));
	f.add_test("a", true);
	f.add_test("b", false);
	assert_eq!(classes(&f), vec!["css-a"]);
}

#[test]
fn add_test_overrides_apply_to_one_entry() {
	let mut f = featurist();
	f.add_test_with(
		"a",
		false,
		TestOptions::default().unsupported_classes(false),
	);
	f.add_test_with("b", true, TestOptions::default().prefix(Prefix::Disabled));
	f.add_test("c", false);
	assert_eq!(classes(&f), vec!["b", "no-c"]);
}

#[test]
fn overwrite_replaces_classes_and_results() {
	let mut f = featurist();
	f.add_test("has", true);
	f.add_test("has", false);
	assert_eq!(classes(&f), vec!["no-has"]);
	assert_eq!(f.results().get("has"), Some(false));
	assert_eq!(f.results().global("Has"), Some(false));

	f.add_test_with("has", true, TestOptions::default().prefix("css".into()));
	assert_eq!(classes(&f), vec!["css-has"]);
}

#[test]
fn custom_test_overwrites_builtin_entry() {
	let mut f = featurist();
	f.init(Config::with_tests(["missing"]));
	f.add_test("missing", true);
	assert_eq!(classes(&f), vec!["supports-missing"]);
	assert_eq!(f.registry().len(), 1);
}

#[test]
fn reinit_reruns_and_overwrites() {
	let mut f = featurist();
	f.init(Config::with_tests(["missing"]));
	f.init(Config::with_tests(["missing"]).unsupported_classes(false));
	assert!(classes(&f).is_empty());
	assert_eq!(f.results().len(), 1);
	assert_eq!(f.state(), InitState::Initialized);
}

#[test]
fn test_env_uses_own_host() {
	let mut profile = EngineProfile::empty("env");
	profile.defaults.insert("width".into(), "auto".into());
	let mut f = Featurist::with_catalog(SimHost::new(profile), Catalog::default());
	assert!(f.test_env("p { width: 1px }", "p", "width", "1px"));
	assert!(!f.test_env("p { width: 1px }", "p", "width", "2px"));
	assert_eq!(f.host().node_count(), 0);
	assert_eq!(f.host().style_count(), 0);
	assert!(f.results().is_empty());
}

#[test]
fn global_name_collisions_are_recorded() {
	let mut f = featurist();
	f.add_test("color-mix", true);
	f.add_test("color_mix", false);
	assert_eq!(f.results().global("ColorMix"), Some(false));
	assert_eq!(f.results().collisions().len(), 1);
	assert_eq!(f.results().get("color-mix"), Some(true));
}

#[test]
fn supports_class_shared_with_another_no_class_survives() {
	let mut f = featurist();
	f.init(Config::default().supports_prefix(Prefix::Disabled));
	f.add_test("no-js", true);
	f.add_test("js", true);

	assert_eq!(f.results().get("no-js"), Some(true));
	assert_eq!(f.host().root_classes(), vec!["no-js", "js"]);
}

#[test]
fn alternating_collisions_are_recorded_once() {
	let mut f = featurist();
	for _ in 0..3 {
		f.add_test("color-mix", true);
		f.add_test("color_mix", false);
	}
	let pairs: Vec<_> = f
		.results()
		.collisions()
		.iter()
		.map(|c| (c.previous.as_str(), c.incoming.as_str()))
		.collect();
	assert_eq!(pairs, vec![("color-mix", "color_mix"), ("color_mix", "color-mix")]);
	assert_eq!(f.results().global("ColorMix"), Some(false));
}
