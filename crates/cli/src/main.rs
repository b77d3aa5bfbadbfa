//! Featurist command-line runner.
//!
//! Runs the built-in catalog against a simulated engine profile and prints the
//! results mapping, the global-name accessors and the resulting root classes.

mod cli;
mod report;

use anyhow::{Context, Result};
use clap::Parser;
use featurist_core::host::sim::{EngineProfile, SimHost};
use featurist_core::{Catalog, Config, Featurist, Prefix};
use tracing::info;

use crate::cli::{Cli, Format};
use crate::report::Report;

fn main() -> Result<()> {
	let cli = Cli::parse();

	let subscriber = tracing_subscriber::fmt()
		.with_writer(std::io::stderr)
		.with_max_level(if cli.verbose {
			tracing::Level::DEBUG
		} else {
			tracing::Level::WARN
		})
		.finish();
	tracing::subscriber::set_global_default(subscriber)?;

	if cli.list {
		print_catalog(&Catalog::builtin());
		return Ok(());
	}

	let profile = match &cli.profile {
		Some(path) => EngineProfile::load(path)
			.with_context(|| format!("loading engine profile {}", path.display()))?,
		None => EngineProfile::baseline(),
	};
	let config = resolve_config(&cli)?;
	info!(engine = %profile.name, tests = config.tests.len(), "running feature detection");

	let engine = profile.name.clone();
	let mut featurist = Featurist::new(SimHost::new(profile));
	featurist.init(config);

	let report = Report::new(engine, &featurist);
	match cli.format {
		Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
		Format::Text => print!("{report}"),
	}
	Ok(())
}

/// Merges the config file, if any, with command-line overrides.
fn resolve_config(cli: &Cli) -> Result<Config> {
	let mut config = match &cli.config {
		Some(path) => {
			Config::load(path).with_context(|| format!("loading config {}", path.display()))?
		}
		None => Config::default(),
	};
	if cli.all {
		config.tests = Catalog::builtin().ids().map(str::to_string).collect();
	}
	config.tests.extend(cli.tests.iter().cloned());
	if cli.no_prefix {
		config.supports_prefix = Prefix::Disabled;
	} else if let Some(prefix) = &cli.prefix {
		config.supports_prefix = Prefix::Custom(prefix.clone());
	}
	if cli.no_unsupported_classes {
		config.unsupported_classes = false;
	}
	Ok(config)
}

fn print_catalog(catalog: &Catalog) {
	let width = catalog.ids().map(str::len).max().unwrap_or(0);
	for def in catalog.iter() {
		println!("{:width$}  {}", def.id, def.description);
	}
}
