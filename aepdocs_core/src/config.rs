use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::SiteError;
use crate::SiteResult;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
	["aepdocs.toml", ".aepdocs.toml", ".config/aepdocs.toml"];

/// Environment variable that points at the main AEP repository.
pub const ENV_AEP_LOCATION: &str = "AEP_LOCATION";
/// Environment variable that points at the protobuf linter repository.
pub const ENV_LINTER_LOCATION: &str = "AEP_LINTER_LOC";
/// Environment variable that points at the OpenAPI linter repository.
pub const ENV_OPENAPI_LINTER_LOCATION: &str = "AEP_OPENAPI_LINTER_LOC";
/// Environment variable that points at the components (JSON schema)
/// repository.
pub const ENV_COMPONENTS_LOCATION: &str = "AEP_COMPONENTS_LOC";
/// Environment variable that points at the 2026 edition checkout.
pub const ENV_EDITION_2026: &str = "AEP_EDITION_2026";

/// Name of the edition built from [`ENV_EDITION_2026`].
pub const EDITION_2026: &str = "aep-2026";

/// Configuration loaded from an `aepdocs.toml` file.
///
/// ```toml
/// [sources]
/// aep = "../aep.dev"
/// linter = "../api-linter"
/// openapi_linter = "../aep-openapi-linter"
/// components = "../aep-components"
///
/// [[editions]]
/// name = "aep-2026"
/// path = "../aep-edition-2026"
///
/// [output]
/// root = "."
/// ```
///
/// Every source is optional; sections whose source is missing are skipped
/// during generation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SiteConfig {
	#[serde(default)]
	pub sources: SourcesConfig,
	/// Additional proposal editions, each written to its own folder.
	#[serde(default)]
	pub editions: Vec<EditionSource>,
	#[serde(default)]
	pub output: OutputConfig,
}

/// Locations of the repositories the site is generated from.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourcesConfig {
	/// The main AEP repository (proposals, general pages, blog).
	#[serde(default)]
	pub aep: Option<PathBuf>,
	/// The protobuf API linter repository.
	#[serde(default)]
	pub linter: Option<PathBuf>,
	/// The OpenAPI linter repository.
	#[serde(default)]
	pub openapi_linter: Option<PathBuf>,
	/// The components repository holding JSON schemas.
	#[serde(default)]
	pub components: Option<PathBuf>,
}

/// A versioned snapshot of the proposal corpus.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EditionSource {
	/// Edition name; also the folder its pages are written to.
	pub name: String,
	pub path: PathBuf,
}

/// Where generated files are written.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
	/// Root of the site project. `src/content/docs`, `generated` and `public`
	/// live below it.
	#[serde(default = "default_output_root")]
	pub root: PathBuf,
}

impl Default for OutputConfig {
	fn default() -> Self {
		Self {
			root: default_output_root(),
		}
	}
}

fn default_output_root() -> PathBuf {
	PathBuf::from(".")
}

impl OutputConfig {
	/// Directory holding the content collection pages.
	pub fn docs_dir(&self) -> PathBuf {
		self.root.join("src").join("content").join("docs")
	}

	/// Directory holding generated JSON consumed by the site.
	pub fn generated_dir(&self) -> PathBuf {
		self.root.join("generated")
	}

	/// Directory holding static files served as-is.
	pub fn public_dir(&self) -> PathBuf {
		self.root.join("public")
	}
}

impl SiteConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	///
	/// Relative source and output paths are resolved against `root`.
	pub fn load(root: &Path) -> SiteResult<Option<SiteConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let mut config = Self::parse(&content)?;
		config.resolve_relative_to(root);
		tracing::debug!(path = %config_path.display(), "loaded config");

		Ok(Some(config))
	}

	/// Parse config from TOML text without touching the filesystem.
	pub fn parse(content: &str) -> SiteResult<SiteConfig> {
		toml::from_str(content).map_err(|e| SiteError::ConfigParse(e.to_string()))
	}

	/// Load the config at `root` (or start from defaults) and then apply the
	/// environment variable overrides.
	pub fn load_with_env(root: &Path) -> SiteResult<SiteConfig> {
		let mut config = Self::load(root)?.unwrap_or_else(|| {
			let mut config = SiteConfig::default();
			config.resolve_relative_to(root);
			config
		});
		config.apply_env(|name| std::env::var(name).ok());
		Ok(config)
	}

	/// Apply overrides from environment variables. `lookup` returns the value
	/// of a variable; empty values count as unset.
	pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
		let read = |name: &str| lookup(name).filter(|value| !value.is_empty()).map(PathBuf::from);

		if let Some(path) = read(ENV_AEP_LOCATION) {
			self.sources.aep = Some(path);
		}
		if let Some(path) = read(ENV_LINTER_LOCATION) {
			self.sources.linter = Some(path);
		}
		if let Some(path) = read(ENV_OPENAPI_LINTER_LOCATION) {
			self.sources.openapi_linter = Some(path);
		}
		if let Some(path) = read(ENV_COMPONENTS_LOCATION) {
			self.sources.components = Some(path);
		}
		if let Some(path) = read(ENV_EDITION_2026) {
			self.editions.retain(|edition| edition.name != EDITION_2026);
			self.editions.push(EditionSource {
				name: EDITION_2026.to_string(),
				path,
			});
		}
	}

	fn resolve_relative_to(&mut self, root: &Path) {
		let resolve = |path: &mut PathBuf| {
			if path.is_relative() {
				*path = root.join(&*path);
			}
		};

		for source in [
			&mut self.sources.aep,
			&mut self.sources.linter,
			&mut self.sources.openapi_linter,
			&mut self.sources.components,
		]
		.into_iter()
		.flatten()
		{
			resolve(source);
		}
		for edition in &mut self.editions {
			resolve(&mut edition.path);
		}
		resolve(&mut self.output.root);
	}
}
