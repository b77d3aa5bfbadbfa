//! Host environment boundary.
//!
//! Everything featurist knows about the page goes through [`Host`]: the native
//! feature-query API, browser globals, the document root's class list, and the
//! handful of DOM primitives the isolated test environment needs. Detection
//! logic never touches a real engine directly, so it runs unchanged against the
//! simulated engine in [`sim`].

pub mod sim;

use thiserror::Error;

/// Handle to an element created through [`Host::create_element`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

/// Handle to a style block injected through [`Host::insert_style`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StyleId(pub u32);

impl std::fmt::Display for NodeId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "node#{}", self.0)
	}
}

impl std::fmt::Display for StyleId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "style#{}", self.0)
	}
}

/// Failures reported by host DOM primitives.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
	/// The primitive is not available in this environment.
	#[error("host primitive unavailable: {0}")]
	Unavailable(&'static str),

	/// The node handle does not refer to a live node.
	#[error("unknown node: {0}")]
	UnknownNode(NodeId),

	/// The style handle does not refer to an inserted style block.
	#[error("unknown style: {0}")]
	UnknownStyle(StyleId),

	/// The tag name cannot be used to create an element.
	#[error("invalid tag name: {0:?}")]
	InvalidTag(String),

	/// Any other engine failure.
	#[error("{0}")]
	Other(String),
}

/// Abstract browser environment.
///
/// Root-class operations and queries are infallible: an engine that cannot
/// answer a query answers `false`. Fragment primitives return [`HostError`] and
/// are only ever driven by [`crate::env::test_env`], which owns their cleanup.
pub trait Host {
	/// Whether a browser-like global execution context exists.
	fn is_browser(&self) -> bool;

	/// The native feature-query API (`CSS.supports(condition)`).
	fn supports(&self, condition: &str) -> bool;

	/// Whether a dotted browser global path (e.g. `document.startViewTransition`) exists.
	fn has_global(&self, path: &str) -> bool;

	/// Classes currently attached to the document root, in attachment order.
	fn root_classes(&self) -> Vec<String>;

	/// Adds `class` to the document root. Adding a present class is a no-op.
	fn add_root_class(&mut self, class: &str);

	/// Removes `class` from the document root. Removing an absent class is a no-op.
	fn remove_root_class(&mut self, class: &str);

	fn has_root_class(&self, class: &str) -> bool {
		self.root_classes().iter().any(|c| c == class)
	}

	/// Creates a detached element.
	fn create_element(&mut self, tag: &str) -> Result<NodeId, HostError>;

	/// Appends `child` as the last child of `parent`.
	fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), HostError>;

	/// Inserts a detached subtree into the document body so it receives style.
	fn attach(&mut self, node: NodeId) -> Result<(), HostError>;

	/// Injects a style block into the document.
	fn insert_style(&mut self, css: &str) -> Result<StyleId, HostError>;

	/// Serialized computed value of `property` on `node`.
	fn computed_value(&self, node: NodeId, property: &str) -> Result<String, HostError>;

	/// Detaches and destroys `node` together with its descendants.
	fn remove_node(&mut self, node: NodeId) -> Result<(), HostError>;

	/// Removes a previously injected style block.
	fn remove_style(&mut self, style: StyleId) -> Result<(), HostError>;
}

impl<H: Host + ?Sized> Host for &mut H {
	fn is_browser(&self) -> bool {
		(**self).is_browser()
	}

	fn supports(&self, condition: &str) -> bool {
		(**self).supports(condition)
	}

	fn has_global(&self, path: &str) -> bool {
		(**self).has_global(path)
	}

	fn root_classes(&self) -> Vec<String> {
		(**self).root_classes()
	}

	fn add_root_class(&mut self, class: &str) {
		(**self).add_root_class(class)
	}

	fn remove_root_class(&mut self, class: &str) {
		(**self).remove_root_class(class)
	}

	fn has_root_class(&self, class: &str) -> bool {
		(**self).has_root_class(class)
	}

	fn create_element(&mut self, tag: &str) -> Result<NodeId, HostError> {
		(**self).create_element(tag)
	}

	fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), HostError> {
		(**self).append_child(parent, child)
	}

	fn attach(&mut self, node: NodeId) -> Result<(), HostError> {
		(**self).attach(node)
	}

	fn insert_style(&mut self, css: &str) -> Result<StyleId, HostError> {
		(**self).insert_style(css)
	}

	fn computed_value(&self, node: NodeId, property: &str) -> Result<String, HostError> {
		(**self).computed_value(node, property)
	}

	fn remove_node(&mut self, node: NodeId) -> Result<(), HostError> {
		(**self).remove_node(node)
	}

	fn remove_style(&mut self, style: StyleId) -> Result<(), HostError> {
		(**self).remove_style(style)
	}
}
