//! Deterministic in-process engine implementing [`Host`].
//!
//! [`SimHost`] answers feature queries from an [`EngineProfile`], keeps a tiny
//! element arena for isolated probes, and evaluates injected style blocks with
//! the subset of CSS in [`sheet`]. It exists so detection logic can be
//! exercised without a rendering engine, and it exposes node and style counts
//! so callers can check that probes leave nothing behind.

mod profile;
mod sheet;

use std::cell::Cell;

pub use profile::EngineProfile;
use rustc_hash::FxHashMap as HashMap;
use sheet::{Element, Rule};

use super::{Host, HostError, NodeId, StyleId};

/// Host primitive targeted by an injected fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimOp {
	CreateElement,
	AppendChild,
	Attach,
	InsertStyle,
	ComputedValue,
	RemoveNode,
	RemoveStyle,
}

/// How an injected fault manifests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
	/// The primitive returns [`HostError::Other`].
	Error,
	/// The primitive panics, like a broken binding throwing mid-call.
	Panic,
}

#[derive(Debug, Clone, Copy)]
struct Fault {
	op: SimOp,
	kind: FaultKind,
}

#[derive(Debug)]
struct Node {
	tag: String,
	parent: Option<NodeId>,
	children: Vec<NodeId>,
}

/// Simulated browser environment.
#[derive(Debug)]
pub struct SimHost {
	profile: EngineProfile,
	root_classes: Vec<String>,
	nodes: HashMap<NodeId, Node>,
	/// Subtree roots inserted under the body, in insertion order.
	body: Vec<NodeId>,
	styles: Vec<(StyleId, Vec<Rule>)>,
	next_id: u32,
	fault: Cell<Option<Fault>>,
}

impl SimHost {
	pub fn new(profile: EngineProfile) -> Self {
		Self {
			profile,
			root_classes: Vec::new(),
			nodes: HashMap::default(),
			body: Vec::new(),
			styles: Vec::new(),
			next_id: 1,
			fault: Cell::new(None),
		}
	}

	pub fn profile(&self) -> &EngineProfile {
		&self.profile
	}

	/// Live elements, attached or not.
	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	/// Injected style blocks still in the document.
	pub fn style_count(&self) -> usize {
		self.styles.len()
	}

	/// Makes the next call to `op` fail with `kind`.
	pub fn fail_next(&mut self, op: SimOp, kind: FaultKind) {
		self.fault.set(Some(Fault { op, kind }));
	}

	fn check_fault(&self, op: SimOp) -> Result<(), HostError> {
		match self.fault.get() {
			Some(fault) if fault.op == op => {
				self.fault.set(None);
				match fault.kind {
					FaultKind::Error => Err(HostError::Other(format!("injected fault in {op:?}"))),
					FaultKind::Panic => panic!("injected panic in {op:?}"),
				}
			}
			_ => Ok(()),
		}
	}

	fn alloc_id(&mut self) -> u32 {
		let id = self.next_id;
		self.next_id += 1;
		id
	}

	fn node(&self, id: NodeId) -> Result<&Node, HostError> {
		self.nodes.get(&id).ok_or(HostError::UnknownNode(id))
	}

	fn is_attached(&self, id: NodeId) -> bool {
		let mut cur = id;
		while let Some(node) = self.nodes.get(&cur) {
			match node.parent {
				Some(parent) => cur = parent,
				None => return self.body.contains(&cur),
			}
		}
		false
	}

	fn detach(&mut self, id: NodeId) {
		let parent = self.nodes.get(&id).and_then(|n| n.parent);
		match parent {
			Some(parent) => {
				if let Some(p) = self.nodes.get_mut(&parent) {
					p.children.retain(|&c| c != id);
				}
			}
			None => self.body.retain(|&c| c != id),
		}
	}
}

/// A position in the simulated tree, including the implicit `body` and root.
#[derive(Clone, Copy)]
enum Cursor<'a> {
	Node(&'a SimHost, NodeId),
	Body(&'a SimHost),
	Root(&'a SimHost),
}

impl Element for Cursor<'_> {
	fn tag(&self) -> &str {
		match self {
			Cursor::Node(host, id) => host.nodes.get(id).map_or("", |n| n.tag.as_str()),
			Cursor::Body(_) => "body",
			Cursor::Root(_) => "html",
		}
	}

	fn has_class(&self, class: &str) -> bool {
		match self {
			Cursor::Root(host) => host.root_classes.iter().any(|c| c == class),
			_ => false,
		}
	}

	fn id(&self) -> Option<&str> {
		None
	}

	fn parent(&self) -> Option<Self> {
		match *self {
			Cursor::Node(host, id) => match host.nodes.get(&id)?.parent {
				Some(parent) => Some(Cursor::Node(host, parent)),
				None => Some(Cursor::Body(host)),
			},
			Cursor::Body(host) => Some(Cursor::Root(host)),
			Cursor::Root(_) => None,
		}
	}
}

impl Host for SimHost {
	fn is_browser(&self) -> bool {
		self.profile.browser
	}

	fn supports(&self, condition: &str) -> bool {
		let wanted = sheet::normalize_condition(condition);
		if self.profile.supports.iter().any(|c| sheet::normalize_condition(c) == wanted) {
			return true;
		}
		let trimmed = condition.trim();
		if let Some(inner) = trimmed.strip_prefix("selector(").and_then(|s| s.strip_suffix(')')) {
			return sheet::selector_supported(inner.trim(), &self.profile);
		}
		let inner = trimmed
			.strip_prefix('(')
			.and_then(|s| s.strip_suffix(')'))
			.unwrap_or(trimmed);
		match inner.split_once(':') {
			Some((prop, value)) => sheet::declaration_supported(
				&self.profile,
				&prop.trim().to_ascii_lowercase(),
				value.trim(),
			),
			None => false,
		}
	}

	fn has_global(&self, path: &str) -> bool {
		self.profile.globals.contains(path)
	}

	fn root_classes(&self) -> Vec<String> {
		self.root_classes.clone()
	}

	fn add_root_class(&mut self, class: &str) {
		if !self.root_classes.iter().any(|c| c == class) {
			self.root_classes.push(class.to_string());
		}
	}

	fn remove_root_class(&mut self, class: &str) {
		self.root_classes.retain(|c| c != class);
	}

	fn create_element(&mut self, tag: &str) -> Result<NodeId, HostError> {
		self.check_fault(SimOp::CreateElement)?;
		if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
			return Err(HostError::InvalidTag(tag.to_string()));
		}
		let id = NodeId(self.alloc_id());
		self.nodes.insert(
			id,
			Node {
				tag: tag.to_ascii_lowercase(),
				parent: None,
				children: Vec::new(),
			},
		);
		Ok(id)
	}

	fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), HostError> {
		self.check_fault(SimOp::AppendChild)?;
		self.node(parent)?;
		self.node(child)?;
		self.detach(child);
		if let Some(c) = self.nodes.get_mut(&child) {
			c.parent = Some(parent);
		}
		if let Some(p) = self.nodes.get_mut(&parent) {
			p.children.push(child);
		}
		Ok(())
	}

	fn attach(&mut self, node: NodeId) -> Result<(), HostError> {
		self.check_fault(SimOp::Attach)?;
		self.node(node)?;
		self.detach(node);
		if let Some(n) = self.nodes.get_mut(&node) {
			n.parent = None;
		}
		self.body.push(node);
		Ok(())
	}

	fn insert_style(&mut self, css: &str) -> Result<StyleId, HostError> {
		self.check_fault(SimOp::InsertStyle)?;
		let id = StyleId(self.alloc_id());
		let rules = sheet::parse(css, &self.profile);
		tracing::trace!(style = %id, rules = rules.len(), "style block inserted");
		self.styles.push((id, rules));
		Ok(id)
	}

	fn computed_value(&self, node: NodeId, property: &str) -> Result<String, HostError> {
		self.check_fault(SimOp::ComputedValue)?;
		self.node(node)?;
		if !self.is_attached(node) {
			// Detached elements have no computed style.
			return Ok(String::new());
		}
		let property = property.trim().to_ascii_lowercase();
		let el = Cursor::Node(self, node);
		let mut value = None;
		for rule in self.styles.iter().flat_map(|(_, rules)| rules) {
			if !rule.selectors.iter().any(|s| s.matches(&el)) {
				continue;
			}
			for (prop, v) in &rule.decls {
				if *prop == property {
					value = Some(v.as_str());
				}
			}
		}
		let computed = match value {
			Some(v) => self.profile.normalize.get(v).map_or(v, String::as_str),
			None => self.profile.defaults.get(&property).map_or("", String::as_str),
		};
		Ok(computed.to_string())
	}

	fn remove_node(&mut self, node: NodeId) -> Result<(), HostError> {
		self.check_fault(SimOp::RemoveNode)?;
		self.node(node)?;
		self.detach(node);
		let mut stack = vec![node];
		while let Some(id) = stack.pop() {
			if let Some(n) = self.nodes.remove(&id) {
				stack.extend(n.children);
			}
		}
		Ok(())
	}

	fn remove_style(&mut self, style: StyleId) -> Result<(), HostError> {
		self.check_fault(SimOp::RemoveStyle)?;
		let before = self.styles.len();
		self.styles.retain(|(id, _)| *id != style);
		if self.styles.len() == before {
			return Err(HostError::UnknownStyle(style));
		}
		Ok(())
	}
}
