use super::*;
use crate::host::sim::{EngineProfile, FaultKind, SimHost, SimOp};

fn host() -> SimHost {
	let mut p = EngineProfile::empty("env");
	p.at_rules.insert("layer".into());
	p.defaults.insert("color".into(), "rgb(0, 0, 0)".into());
	p.defaults.insert("width".into(), "auto".into());
	p.normalize.insert("red".into(), "rgb(255, 0, 0)".into());
	SimHost::new(p)
}

fn assert_clean(host: &SimHost) {
	assert_eq!(host.node_count(), 0, "probe leaked elements");
	assert_eq!(host.style_count(), 0, "probe leaked style blocks");
}

#[test]
fn matching_value_is_true() {
	let mut host = host();
	assert!(test_env(&mut host, "p { width: 1px }", "p", "width", "1px"));
	assert_clean(&host);
}

#[test]
fn mismatched_value_is_false() {
	let mut host = host();
	assert!(!test_env(&mut host, "p { width: 1px }", "p", "width", "2px"));
	assert_clean(&host);
}

#[test]
fn expected_value_must_be_normalized() {
	let mut host = host();
	assert!(!test_env(&mut host, "p { color: red }", "p", "color", "red"));
	assert!(test_env(&mut host, "p { color: red }", "p", "color", "rgb(255, 0, 0)"));
	assert_clean(&host);
}

#[test]
fn unsupported_at_rule_is_false() {
	let mut host = host();
	assert!(test_env(&mut host, "@layer a { p { width: 1px } }", "p", "width", "1px"));
	assert!(!test_env(&mut host, "@scope (div) { p { width: 1px } }", "p", "width", "1px"));
	assert_clean(&host);
}

#[test]
fn probe_style_does_not_outlive_probe() {
	let mut host = host();
	assert!(test_env(&mut host, "p { width: 1px }", "p", "width", "1px"));
	// A second probe without the rule sees the default again.
	assert!(test_env(&mut host, "", "p", "width", "auto"));
	assert_clean(&host);
}

#[test]
fn root_classes_are_untouched() {
	let mut host = host();
	host.add_root_class("js");
	test_env(&mut host, "p { width: 1px }", "p", "width", "1px");
	assert_eq!(host.root_classes(), vec!["js".to_string()]);
}

#[test]
fn host_errors_read_false_and_clean_up() {
	for op in [
		SimOp::InsertStyle,
		SimOp::CreateElement,
		SimOp::AppendChild,
		SimOp::Attach,
		SimOp::ComputedValue,
	] {
		let mut host = host();
		host.fail_next(op, FaultKind::Error);
		assert!(!test_env(&mut host, "p { width: 1px }", "p", "width", "1px"), "{op:?}");
		assert_clean(&host);
	}
}

#[test]
fn host_panics_read_false_and_clean_up() {
	for op in [SimOp::Attach, SimOp::ComputedValue, SimOp::AppendChild] {
		let mut host = host();
		host.fail_next(op, FaultKind::Panic);
		assert!(!test_env(&mut host, "p { width: 1px }", "p", "width", "1px"), "{op:?}");
		assert_clean(&host);
	}
}

#[test]
fn invalid_tag_reads_false() {
	let mut host = host();
	assert!(!test_env(&mut host, "p { width: 1px }", "not a tag", "width", "1px"));
	assert_clean(&host);
}

#[test]
fn works_through_trait_objects() {
	let mut host = host();
	let dyn_host: &mut dyn Host = &mut host;
	assert!(test_env(dyn_host, "p { width: 1px }", "p", "width", "1px"));
	assert_clean(&host);
}
