use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Generate the AEP documentation site from proposal and linter repositories.",
	long_about = "aepdocs turns the markdown sources of the AEP repositories into MDX pages, \
				  navigation data and static files for the aep.dev site.\n\nSource \
				  repositories are configured in `aepdocs.toml` or through the AEP_LOCATION, \
				  AEP_LINTER_LOC, AEP_OPENAPI_LINTER_LOC, AEP_COMPONENTS_LOC and \
				  AEP_EDITION_2026 environment variables.\n\nQuick start:\n  aepdocs generate   \
				  Build every page and data file\n  aepdocs check      Validate template tags\n  \
				  aepdocs transform  Print the MDX for a single proposal"
)]
pub struct AepdocsCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the site project root directory.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Generate the site content from every configured repository.
	///
	/// Writes proposal pages, general pages, linter pages, the site
	/// structure, the sidebar and the static files. A document that fails to
	/// build is reported and skipped; the command then exits with status 1.
	Generate,
	/// Transform a single proposal template and print the resulting MDX body.
	///
	/// Samples are resolved relative to the folder containing the file. The
	/// components the body references are listed on stderr.
	Transform {
		/// The `aep.md.j2` (or markdown) file to transform.
		file: PathBuf,
	},
	/// Check that every template only uses supported tags.
	///
	/// Directories are searched recursively for `.md` and `.md.j2` files.
	/// Every failing file is reported, and the command exits with status 1
	/// if any file fails.
	Check {
		/// Files or directories to check. Defaults to the project root.
		paths: Vec<PathBuf>,
	},
	/// Rebuild `generated/sidebar.json` from an existing
	/// `generated/site-structure.json`.
	Sidebar,
}
