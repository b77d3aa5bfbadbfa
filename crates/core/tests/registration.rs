//! Registration invariants over arbitrary identifiers and policies.

use featurist_core::host::sim::{EngineProfile, SimHost};
use featurist_core::{Catalog, Config, Featurist, Host, Prefix, TestOptions};
use proptest::prelude::*;

fn featurist() -> Featurist<SimHost> {
	Featurist::with_catalog(SimHost::new(EngineProfile::empty("props")), Catalog::default())
}

fn identifier() -> impl Strategy<Value = String> {
	"[a-z][a-z0-9]{0,6}(-[a-z0-9]{1,6}){0,3}"
}

fn prefix() -> impl Strategy<Value = Prefix> {
	prop_oneof![
		Just(Prefix::Disabled),
		Just(Prefix::default()),
		"[a-z]{1,5}"
			.prop_filter("prefix would mimic negative classes", |p| p != "no")
			.prop_map(Prefix::Custom),
	]
}

fn supports_class(prefix: &Prefix, id: &str) -> String {
	match prefix {
		Prefix::Disabled => id.to_string(),
		Prefix::Custom(p) => format!("{p}-{id}"),
	}
}

fn snapshot(f: &Featurist<SimHost>) -> (Vec<String>, Vec<(String, bool)>) {
	let mut classes = f.host().root_classes();
	classes.sort();
	let mapping = f.results().mapping().iter().map(|(k, v)| (k.clone(), *v)).collect();
	(classes, mapping)
}

proptest! {
	#[test]
	fn positive_registration(id in identifier(), prefix in prefix()) {
		let mut f = featurist();
		f.init(Config::default().supports_prefix(prefix.clone()));
		f.add_test(&id, true);

		let no = format!("no-{id}");
		prop_assert_eq!(f.results().get(&id), Some(true));
		prop_assert!(f.host().has_root_class(&supports_class(&prefix, &id)));
		prop_assert!(!f.host().has_root_class(&no));
	}

	#[test]
	fn negative_registration(id in identifier(), prefix in prefix()) {
		let mut f = featurist();
		f.init(Config::default().supports_prefix(prefix.clone()));
		f.add_test(&id, false);

		let no = format!("no-{id}");
		prop_assert_eq!(f.results().get(&id), Some(false));
		prop_assert!(f.host().has_root_class(&no));
		prop_assert!(!f.host().has_root_class(&supports_class(&prefix, &id)));
	}

	#[test]
	fn registration_is_idempotent(
		id in identifier(),
		result in any::<bool>(),
		prefix in prefix(),
		unsupported in any::<bool>(),
	) {
		let options = TestOptions::default().prefix(prefix).unsupported_classes(unsupported);
		let mut once = featurist();
		once.add_test_with(&id, result, options.clone());
		let mut twice = featurist();
		twice.add_test_with(&id, result, options.clone());
		twice.add_test_with(&id, result, options);

		prop_assert_eq!(snapshot(&once), snapshot(&twice));
	}

	#[test]
	fn overwrite_leaves_no_residue(
		id in identifier(),
		first in prefix(),
		second in prefix(),
		unsupported in any::<bool>(),
	) {
		let mut f = featurist();
		f.add_test_with(&id, true, TestOptions::default().prefix(first.clone()));
		f.add_test_with(
			&id,
			false,
			TestOptions::default().prefix(second).unsupported_classes(unsupported),
		);

		let expected: Vec<String> = if unsupported { vec![format!("no-{id}")] } else { Vec::new() };
		prop_assert_eq!(f.host().root_classes(), expected);
		prop_assert_eq!(f.results().get(&id), Some(false));
	}

	#[test]
	fn globals_track_mapping(ids in proptest::collection::vec((identifier(), any::<bool>()), 1..12)) {
		let mut f = featurist();
		for (id, result) in &ids {
			f.add_test(id, *result);
		}
		for (name, value) in f.results().globals() {
			let owner = f.results().global_owner(name).unwrap();
			prop_assert_eq!(f.results().get(owner), Some(value));
		}
	}

	#[test]
	fn every_active_class_stays_on_root(
		regs in proptest::collection::vec(
			(prop_oneof![identifier(), identifier().prop_map(|id| format!("no-{id}"))], any::<bool>(), prefix()),
			1..16,
		),
	) {
		let mut f = featurist();
		for (id, result, prefix) in &regs {
			f.add_test_with(id, *result, TestOptions::default().prefix(prefix.clone()));
		}
		for entry in f.registry().iter() {
			if let Some(class) = entry.active_class() {
				prop_assert!(f.host().has_root_class(class), "{} lost {}", entry.identifier, class);
			}
		}
	}

	#[test]
	fn test_env_leaves_no_nodes(width in 0u32..500, expected in 0u32..500) {
		let mut profile = EngineProfile::empty("probe");
		profile.defaults.insert("width".into(), "auto".into());
		let mut f = Featurist::with_catalog(SimHost::new(profile), Catalog::default());
		let style = format!("p {{ width: {width}px }}");
		let matched = f.test_env(&style, "p", "width", &format!("{expected}px"));

		prop_assert_eq!(matched, width == expected);
		prop_assert_eq!(f.host().node_count(), 0);
		prop_assert_eq!(f.host().style_count(), 0);
		prop_assert!(f.host().root_classes().is_empty());
	}
}
