//! Isolated test environment.
//!
//! Some features have no feature-query spelling: a selector inside a nested
//! rule, a cascade layer, a rule gated by an at-rule. For those the only
//! observation is to build a throwaway fragment, style it, and read back a
//! computed value. [`test_env`] does exactly that and leaves the document as it
//! found it.
//!
//! The expected value is compared against the engine's computed-style
//! serialization, so callers must pass the normalized form (`rgb(255, 0, 0)`,
//! not `red`).

use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::host::{Host, HostError, NodeId, StyleId};

/// Tag of the container element wrapping the probe.
const CONTAINER_TAG: &str = "div";

/// Runs an isolated computed-style probe.
///
/// Injects `style`, builds `<div><{tag}></div>` in the document, reads
/// `property` from the inner element and compares it with `expected`. Every
/// node and the style block are removed before returning. Any host failure,
/// including a panic inside the host, reads as `false`.
pub fn test_env<H: Host + ?Sized>(
	host: &mut H,
	style: &str,
	tag: &str,
	property: &str,
	expected: &str,
) -> bool {
	let outcome = catch_unwind(AssertUnwindSafe(|| probe(host, style, tag, property)));
	match outcome {
		Ok(Ok(actual)) => {
			let matched = actual == expected;
			tracing::trace!(tag, property, %actual, expected, matched, "probe evaluated");
			matched
		}
		Ok(Err(error)) => {
			tracing::debug!(tag, property, %error, "probe failed");
			false
		}
		Err(_) => {
			tracing::warn!(tag, property, "probe panicked");
			false
		}
	}
}

fn probe<H: Host + ?Sized>(
	host: &mut H,
	style: &str,
	tag: &str,
	property: &str,
) -> Result<String, HostError> {
	let mut fragment = Fragment::new(host);
	fragment.style(style)?;
	let container = fragment.element(CONTAINER_TAG)?;
	let child = fragment.element(tag)?;
	fragment.host.append_child(container, child)?;
	fragment.adopted(child);
	fragment.host.attach(container)?;
	fragment.host.computed_value(child, property)
}

/// Scoped ownership of everything a probe adds to the document.
///
/// Dropping the guard removes every element it still owns as a subtree root
/// and the injected style, on success, on error, and while unwinding.
struct Fragment<'h, H: Host + ?Sized> {
	host: &'h mut H,
	roots: Vec<NodeId>,
	style: Option<StyleId>,
}

impl<'h, H: Host + ?Sized> Fragment<'h, H> {
	fn new(host: &'h mut H) -> Self {
		Self {
			host,
			roots: Vec::with_capacity(2),
			style: None,
		}
	}

	fn element(&mut self, tag: &str) -> Result<NodeId, HostError> {
		let id = self.host.create_element(tag)?;
		self.roots.push(id);
		Ok(id)
	}

	fn style(&mut self, css: &str) -> Result<StyleId, HostError> {
		let id = self.host.insert_style(css)?;
		self.style = Some(id);
		Ok(id)
	}

	/// `node` now lives under another owned element and goes away with it.
	fn adopted(&mut self, node: NodeId) {
		self.roots.retain(|&r| r != node);
	}
}

impl<H: Host + ?Sized> Drop for Fragment<'_, H> {
	fn drop(&mut self) {
		for node in self.roots.drain(..).rev() {
			if let Err(error) = self.host.remove_node(node) {
				tracing::debug!(%node, %error, "failed to remove probe element");
			}
		}
		if let Some(style) = self.style.take() {
			if let Err(error) = self.host.remove_style(style) {
				tracing::debug!(%style, %error, "failed to remove probe style");
			}
		}
	}
}

#[cfg(test)]
mod tests;
