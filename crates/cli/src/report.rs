//! Printable summary of a detection run.

use std::fmt;

use featurist_core::host::sim::SimHost;
use featurist_core::{Featurist, Host, InitState, NameCollision, naming};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Report {
	pub engine: String,
	pub initialized: bool,
	pub results: Vec<(String, bool)>,
	pub globals: Vec<(String, bool)>,
	pub classes: Vec<String>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub collisions: Vec<NameCollision>,
}

impl Report {
	pub fn new(engine: String, featurist: &Featurist<SimHost>) -> Self {
		let results = featurist.results();
		Self {
			engine,
			initialized: featurist.state() == InitState::Initialized,
			results: results.mapping().iter().map(|(k, v)| (k.clone(), *v)).collect(),
			globals: results.globals().map(|(k, v)| (k.to_string(), v)).collect(),
			classes: featurist.host().root_classes(),
			collisions: results.collisions().iter().cloned().collect(),
		}
	}
}

impl fmt::Display for Report {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "engine: {}", self.engine)?;
		if !self.initialized {
			return writeln!(f, "no browser context; nothing detected");
		}
		let width = self.results.iter().map(|(id, _)| id.len()).max().unwrap_or(0);
		for (id, supported) in &self.results {
			let mark = if *supported { "yes" } else { "no" };
			writeln!(f, "  {id:width$}  {mark:3}  {}", naming::global_name(id))?;
		}
		writeln!(f, "classes: {}", self.classes.join(" "))?;
		for c in &self.collisions {
			writeln!(f, "warning: {} and {} both map to {}", c.previous, c.incoming, c.name)?;
		}
		Ok(())
	}
}
