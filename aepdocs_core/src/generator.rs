use std::path::Path;
use std::path::PathBuf;

use crate::Aep;
use crate::SiteConfig;
use crate::SiteError;
use crate::SiteResult;
use crate::aep::build_aep;
use crate::aep::build_llms_txt;
use crate::aep::build_redirects;
use crate::aep::read_aep;
use crate::linter::assemble_linter_rules;
use crate::linter::assemble_openapi_linter_rules;
use crate::linter::list_dirs;
use crate::linter::unique_aeps;
use crate::linter::write_linter_rules_json;
use crate::page::build_plain_page;
use crate::sidebar::assemble_sidebar;
use crate::site::GroupFile;
use crate::site::PageItem;
use crate::site::SiteStructure;
use crate::site::write_file;
use crate::site::write_json;

/// Name of the edition built from the main AEP repository.
pub const GENERAL_EDITION: &str = "general";
/// Site settings read from `config/` in the AEP repository and merged into
/// `generated/config.json`, each under its file stem.
pub const SITE_SETTINGS_FILES: [&str; 3] = ["hero.yaml", "urls.yaml", "site.yaml"];
/// Prefix stripped from component schema `$id`s to get their public path.
pub const SCHEMA_ID_PREFIX: &str = "https://aep.dev/";

/// A document that could not be generated. The rest of the batch continues.
#[derive(Debug)]
pub struct DocumentFailure {
	pub path: PathBuf,
	pub error: SiteError,
}

/// Everything a generator run produced.
#[derive(Debug, Default)]
pub struct GenerateReport {
	/// Files written, in write order.
	pub written: Vec<PathBuf>,
	pub failures: Vec<DocumentFailure>,
	pub structure: SiteStructure,
}

impl GenerateReport {
	/// Returns true if every document was generated.
	pub fn is_ok(&self) -> bool {
		self.failures.is_empty()
	}

	fn write(&mut self, path: PathBuf, content: &str) -> SiteResult<()> {
		write_file(&path, content)?;
		self.written.push(path);
		Ok(())
	}

	fn write_json<T: serde::Serialize + ?Sized>(&mut self, path: PathBuf, value: &T) -> SiteResult<()> {
		write_json(&path, value)?;
		self.written.push(path);
		Ok(())
	}

	fn fail(&mut self, path: &Path, error: SiteError) {
		tracing::warn!(path = %path.display(), error = %error, "document failed, skipping");
		self.failures.push(DocumentFailure {
			path: path.to_path_buf(),
			error,
		});
	}
}

/// Generates the site content from the configured source repositories.
pub struct Generator {
	config: SiteConfig,
}

impl Generator {
	pub fn new(config: SiteConfig) -> Self {
		Self { config }
	}

	pub fn config(&self) -> &SiteConfig {
		&self.config
	}

	/// Generate every configured section and write the site structure and
	/// sidebar.
	///
	/// A document that fails to build is recorded in
	/// [`GenerateReport::failures`] and skipped; only problems with the
	/// repositories themselves (missing folders, unreadable scope files) abort
	/// the run.
	pub fn run(&self) -> SiteResult<GenerateReport> {
		let mut report = GenerateReport::default();

		if let Some(root) = &self.config.sources.aep {
			tracing::info!(path = %root.display(), "processing AEP repository");
			self.generate_aep_repository(root, &mut report)?;
		} else {
			tracing::warn!("AEP repository is not configured");
		}

		if let Some(root) = &self.config.sources.linter {
			tracing::info!(path = %root.display(), "processing linter repository");
			self.generate_linter(root, &mut report)?;
		} else {
			tracing::warn!("protobuf linter repository is not configured");
		}

		if let Some(root) = &self.config.sources.openapi_linter {
			tracing::info!(path = %root.display(), "processing OpenAPI linter repository");
			self.generate_openapi_linter(root, &mut report)?;
		}

		if let Some(root) = &self.config.sources.components {
			tracing::info!(path = %root.display(), "processing components repository");
			self.generate_components(root, &mut report)?;
		}

		for edition in &self.config.editions {
			tracing::info!(edition = %edition.name, path = %edition.path.display(), "processing edition");
			self.generate_edition(&edition.name, &edition.path, &mut report)?;
		}

		let generated = self.config.output.generated_dir();
		let structure = report.structure.clone();
		report.write_json(generated.join("site-structure.json"), &structure)?;
		report.write_json(generated.join("sidebar.json"), &assemble_sidebar(&structure))?;

		Ok(report)
	}

	fn generate_aep_repository(&self, root: &Path, report: &mut GenerateReport) -> SiteResult<()> {
		let docs = self.config.output.docs_dir();

		report.write_json(
			self.config.output.generated_dir().join("config.json"),
			&load_site_settings(&root.join("config"))?,
		)?;

		self.generate_general_pages(root, report)?;

		let contributing = root.join("CONTRIBUTING.md");
		if contributing.is_file() {
			let raw = std::fs::read_to_string(&contributing)?;
			let (page, title) = build_plain_page(&raw, None);
			report.write(docs.join("contributing.md"), &page.render()?)?;
			report.structure.add_overview_page(PageItem::new(
				title.unwrap_or_else(|| "Contributing".to_string()),
				"contributing",
			));
		}

		let general = root.join("aep").join("general");
		let aeps = build_aeps(&general, report)?;
		let groups = GroupFile::load(&general.join("scope.yaml"))?;
		report
			.structure
			.add_aep_edition(GENERAL_EDITION, ".", &aeps, &groups);

		let categorized: Vec<Aep> = aeps
			.into_iter()
			.filter(|aep| groups.has_category(&aep.category))
			.collect();
		for aep in &categorized {
			report.write(docs.join(format!("{}.mdx", aep.id)), &aep.page.render()?)?;
		}

		report.write_json(
			self.config.output.generated_dir().join("redirects.json"),
			&build_redirects(&categorized),
		)?;
		report.write(
			self.config.output.public_dir().join("llms.txt"),
			&build_llms_txt(&categorized),
		)?;

		let blog = root.join("blog");
		if blog.is_dir() {
			for entry in std::fs::read_dir(&blog)? {
				let path = entry?.path();
				let Some(name) = path.file_name() else {
					continue;
				};
				if path.is_file() {
					let target = docs.join("blog").join(name);
					tracing::debug!(from = %path.display(), to = %target.display(), "copying blog post");
					if let Some(parent) = target.parent() {
						std::fs::create_dir_all(parent)?;
					}
					std::fs::copy(&path, &target)?;
					report.written.push(target);
				}
			}
		}

		Ok(())
	}

	fn generate_general_pages(&self, root: &Path, report: &mut GenerateReport) -> SiteResult<()> {
		let pages = root.join("pages").join("general");
		if !pages.is_dir() {
			tracing::warn!(path = %pages.display(), "general pages folder not found");
			return Ok(());
		}

		let mut files: Vec<PathBuf> = std::fs::read_dir(&pages)?
			.filter_map(Result::ok)
			.map(|entry| entry.path())
			.filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "md"))
			.collect();
		files.sort();

		for file in files {
			let Some(name) = file.file_name().and_then(|name| name.to_str()) else {
				continue;
			};
			let raw = std::fs::read_to_string(&file)?;
			let (page, title) = build_plain_page(&raw, None);
			let Some(title) = title else {
				report.fail(&file, SiteError::MissingTitle(file.display().to_string()));
				continue;
			};
			report.write(self.config.output.docs_dir().join(name), &page.render()?)?;
			report
				.structure
				.add_overview_page(PageItem::new(title, name.trim_end_matches(".md")));
		}

		Ok(())
	}

	fn generate_linter(&self, root: &Path, report: &mut GenerateReport) -> SiteResult<()> {
		let docs = self.config.output.docs_dir();
		self.write_readme(
			&root.join("README.md"),
			&docs.join("tooling").join("linter").join("index.md"),
			"Protobuf Linter",
			report,
		)?;

		let website_readme = self.config.output.root.join("README.md");
		if website_readme.is_file() {
			self.write_readme(
				&website_readme,
				&docs.join("tooling").join("website").join("index.md"),
				"Website",
				report,
			)?;
			report
				.structure
				.add_tooling_page(PageItem::new("Website", "tooling/website"));
		}

		let rules = assemble_linter_rules(root)?;
		let path = self
			.config
			.output
			.generated_dir()
			.join("linter-rules")
			.join("protobuf.json");
		write_linter_rules_json(&rules, &path)?;
		report.written.push(path);
		report.structure.set_linter_rules(unique_aeps(&rules));

		Ok(())
	}

	fn generate_openapi_linter(&self, root: &Path, report: &mut GenerateReport) -> SiteResult<()> {
		let rules = assemble_openapi_linter_rules(root)?;
		if rules.is_empty() {
			tracing::info!("no OpenAPI linter rules found, skipping");
			return Ok(());
		}

		self.write_readme(
			&root.join("README.md"),
			&self
				.config
				.output
				.docs_dir()
				.join("tooling")
				.join("openapi-linter")
				.join("index.md"),
			"OpenAPI Linter",
			report,
		)?;

		let path = self
			.config
			.output
			.generated_dir()
			.join("linter-rules")
			.join("openapi.json");
		write_linter_rules_json(&rules, &path)?;
		report.written.push(path);
		report.structure.set_openapi_linter_rules(unique_aeps(&rules));

		Ok(())
	}

	/// Copy a repository README into the docs with a fixed title.
	fn write_readme(
		&self,
		source: &Path,
		target: &Path,
		title: &str,
		report: &mut GenerateReport,
	) -> SiteResult<()> {
		if !source.is_file() {
			tracing::warn!(path = %source.display(), "README not found");
			return Ok(());
		}

		let raw = std::fs::read_to_string(source)?;
		let (page, _) = build_plain_page(&raw, Some(title));
		report.write(target.to_path_buf(), &page.render()?)
	}

	/// Convert every YAML JSON-schema under `json_schema/` into JSON served
	/// from the path of its `$id`.
	fn generate_components(&self, root: &Path, report: &mut GenerateReport) -> SiteResult<()> {
		let mut files = Vec::new();
		collect_files_recursive(&root.join("json_schema"), &mut files)?;
		files.sort();

		for file in files {
			match component_schema(&file) {
				Ok((public_path, schema)) => {
					report.write_json(self.config.output.public_dir().join(public_path), &schema)?;
				}
				Err(error) => report.fail(&file, error),
			}
		}

		Ok(())
	}

	fn generate_edition(&self, name: &str, root: &Path, report: &mut GenerateReport) -> SiteResult<()> {
		let general = root.join("aep").join("general");
		let mut aeps = build_aeps(&general, report)?;
		let docs = self.config.output.docs_dir().join(name);

		for aep in &mut aeps {
			aep.set_edition_slug(name);
			report.write(docs.join(format!("{}.mdx", aep.id)), &aep.page.render()?)?;
			tracing::debug!(edition = name, id = %aep.id, "processed edition AEP");
		}

		let groups = GroupFile::load(&general.join("scope.yaml"))?;
		report.structure.add_aep_edition(name, name, &aeps, &groups);

		Ok(())
	}
}

/// Build every proposal folder below `dir`. Failing proposals are recorded
/// and skipped.
fn build_aeps(dir: &Path, report: &mut GenerateReport) -> SiteResult<Vec<Aep>> {
	let mut aeps = Vec::new();
	for folder in list_dirs(dir)? {
		match read_aep(&folder).and_then(|source| build_aep(&source)) {
			Ok(aep) => aeps.push(aep),
			Err(error) => report.fail(&folder, error),
		}
	}
	tracing::info!(count = aeps.len(), path = %dir.display(), "built AEPs");
	Ok(aeps)
}

/// Merge the site settings files into one object keyed by file stem
/// (`hero`, `urls`, `site`). Missing files are skipped with a warning.
fn load_site_settings(dir: &Path) -> SiteResult<serde_json::Map<String, serde_json::Value>> {
	let mut settings = serde_json::Map::new();
	for name in SITE_SETTINGS_FILES {
		let path = dir.join(name);
		if !path.is_file() {
			tracing::warn!(path = %path.display(), "site settings file not found");
			continue;
		}

		let content = std::fs::read_to_string(&path)?;
		let value: serde_json::Value =
			serde_yaml_ng::from_str(&content).map_err(|e| SiteError::Metadata {
				path: path.display().to_string(),
				reason: e.to_string(),
			})?;
		let stem = name.trim_end_matches(".yaml");
		settings.insert(stem.to_string(), value);
	}

	Ok(settings)
}

fn component_schema(path: &Path) -> SiteResult<(String, serde_json::Value)> {
	let content = std::fs::read_to_string(path)?;
	let schema: serde_json::Value =
		serde_yaml_ng::from_str(&content).map_err(|e| SiteError::Metadata {
			path: path.display().to_string(),
			reason: e.to_string(),
		})?;
	let id = schema
		.get("$id")
		.and_then(serde_json::Value::as_str)
		.ok_or_else(|| SiteError::MissingField {
			path: path.display().to_string(),
			field: "$id".to_string(),
		})?;
	let public_path = id.strip_prefix(SCHEMA_ID_PREFIX).unwrap_or(id).to_string();

	Ok((public_path, schema))
}

fn collect_files_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> SiteResult<()> {
	for entry in std::fs::read_dir(dir)? {
		let path = entry?.path();
		if path.is_dir() {
			collect_files_recursive(&path, files)?;
		} else {
			files.push(path);
		}
	}
	Ok(())
}
