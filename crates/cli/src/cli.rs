use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "featurist")]
#[command(about = "Detect CSS feature support against a simulated engine")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Engine profile (TOML); defaults to the built-in baseline engine
	#[arg(long, short = 'p', value_name = "FILE")]
	pub profile: Option<PathBuf>,

	/// Detection config (TOML) with `tests`, `supports_prefix`, `unsupported_classes`
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: Option<PathBuf>,

	/// Feature identifier to run; may be repeated
	#[arg(long = "test", short = 't', value_name = "ID")]
	pub tests: Vec<String>,

	/// Run every built-in check
	#[arg(long, short = 'a')]
	pub all: bool,

	/// Prefix for supports-classes
	#[arg(long, value_name = "PREFIX", conflicts_with = "no_prefix")]
	pub prefix: Option<String>,

	/// Use bare identifiers as supports-classes
	#[arg(long)]
	pub no_prefix: bool,

	/// Do not add `no-*` classes for unsupported features
	#[arg(long)]
	pub no_unsupported_classes: bool,

	/// Output format
	#[arg(long, short = 'f', value_enum, default_value_t = Format::Text)]
	pub format: Format,

	/// List the built-in catalog and exit
	#[arg(long)]
	pub list: bool,

	/// Verbose logging
	#[arg(short, long)]
	pub verbose: bool,
}

/// Output formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
	Text,
	Json,
}

#[cfg(test)]
mod tests {
	use clap::CommandFactory;

	use super::*;

	#[test]
	fn command_is_well_formed() {
		Cli::command().debug_assert();
	}

	#[test]
	fn parses_repeated_tests_and_policy() {
		let cli = Cli::try_parse_from([
			"featurist",
			"-t",
			"has",
			"--test",
			"nesting",
			"--prefix",
			"css",
			"--no-unsupported-classes",
			"-f",
			"json",
		])
		.unwrap();
		assert_eq!(cli.tests, vec!["has", "nesting"]);
		assert_eq!(cli.prefix.as_deref(), Some("css"));
		assert!(cli.no_unsupported_classes);
		assert_eq!(cli.format, Format::Json);
	}

	#[test]
	fn prefix_conflicts_with_no_prefix() {
		assert!(Cli::try_parse_from(["featurist", "--prefix", "css", "--no-prefix"]).is_err());
	}
}
