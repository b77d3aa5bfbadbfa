//! Class reflection onto the document root.

use crate::host::Host;
use crate::naming;
use crate::registry::{Registry, TestEntry};

/// Brings the root's classes in line with `next`.
///
/// Every class `previous` or `next` could own for this identifier, plus a stale
/// `no-*` class, is removed unless it is the one `next` makes active or another
/// entry in `registry` currently makes it active; the active class is then
/// added. Applying the same entry twice is a no-op.
pub fn apply<H: Host + ?Sized>(
	host: &mut H,
	registry: &Registry,
	previous: Option<&TestEntry>,
	next: &TestEntry,
) {
	let active = next.active_class();
	let stale_no = naming::no_class(&next.identifier);
	let candidates = previous
		.into_iter()
		.flat_map(|e| e.class_names())
		.chain(next.class_names())
		.chain(std::iter::once(stale_no.as_str()));

	for class in candidates {
		if Some(class) == active || !host.has_root_class(class) {
			continue;
		}
		if let Some(owner) = registry.active_owner(class, &next.identifier) {
			tracing::trace!(identifier = %next.identifier, class, owner, "root class kept");
			continue;
		}
		host.remove_root_class(class);
		tracing::trace!(identifier = %next.identifier, class, "root class removed");
	}

	if let Some(class) = active {
		host.add_root_class(class);
		tracing::trace!(identifier = %next.identifier, class, "root class added");
	}
}
