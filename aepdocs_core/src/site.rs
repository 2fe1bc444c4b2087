//! The site structure: everything the site needs to build its navigation,
//! written as `generated/site-structure.json`.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

use crate::Aep;
use crate::SiteError;
use crate::SiteResult;

/// Edition names treated as the main (latest) edition, in preference order.
pub const MAIN_EDITION_NAMES: [&str; 3] = ["general", "main", "default"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteStructure {
	pub overview: OverviewSection,
	pub aeps: AepsSection,
	pub tooling: ToolingSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageItem {
	pub label: String,
	pub link: String,
}

impl PageItem {
	pub fn new(label: impl Into<String>, link: impl Into<String>) -> Self {
		Self {
			label: label.into(),
			link: link.into(),
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverviewSection {
	pub pages: Vec<PageItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AepsSection {
	pub editions: BTreeMap<String, Edition>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolingSection {
	pub pages: Vec<PageItem>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub linter_rules: Option<Vec<String>>,
	#[serde(
		default,
		rename = "openAPILinterRules",
		skip_serializing_if = "Option::is_none"
	)]
	pub openapi_linter_rules: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edition {
	pub name: String,
	/// Folder the edition's pages live in; `.` for the root of the docs.
	pub folder: String,
	pub categories: Vec<AepCategory>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AepCategory {
	pub code: String,
	pub title: String,
	pub aeps: Vec<AepItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AepItem {
	pub id: String,
	pub title: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub slug: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub status: Option<String>,
	pub category: String,
	pub order: i64,
}

/// The category list from `aep/general/scope.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GroupFile {
	#[serde(default)]
	pub categories: Vec<Group>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Group {
	pub code: String,
	pub title: String,
}

impl GroupFile {
	/// Read and parse a scope file.
	pub fn load(path: &Path) -> SiteResult<Self> {
		tracing::debug!(path = %path.display(), "reading AEP group configuration");
		let content = std::fs::read_to_string(path)?;
		serde_yaml_ng::from_str(&content).map_err(|e| SiteError::Metadata {
			path: path.display().to_string(),
			reason: e.to_string(),
		})
	}

	pub fn has_category(&self, code: &str) -> bool {
		self.categories.iter().any(|group| group.code == code)
	}
}

impl SiteStructure {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add_overview_page(&mut self, page: PageItem) -> &mut Self {
		self.overview.pages.push(page);
		self
	}

	pub fn add_tooling_page(&mut self, page: PageItem) -> &mut Self {
		self.tooling.pages.push(page);
		self
	}

	pub fn set_linter_rules(&mut self, rules: Vec<String>) -> &mut Self {
		self.tooling.linter_rules = Some(rules);
		self
	}

	pub fn set_openapi_linter_rules(&mut self, rules: Vec<String>) -> &mut Self {
		self.tooling.openapi_linter_rules = Some(rules);
		self
	}

	/// Add (or replace) an edition built from `aeps`, grouped by `groups`.
	pub fn add_aep_edition(
		&mut self,
		name: &str,
		folder: &str,
		aeps: &[Aep],
		groups: &GroupFile,
	) -> &mut Self {
		self.aeps.editions.insert(name.to_string(), Edition {
			name: name.to_string(),
			folder: folder.to_string(),
			categories: build_aep_categories(aeps, groups),
		});
		self
	}

	/// The edition shown by default: `general`, `main` or `default` when one
	/// exists, otherwise the first edition by name.
	pub fn latest_edition_name(&self) -> Option<&str> {
		MAIN_EDITION_NAMES
			.iter()
			.find_map(|main| {
				self.aeps
					.editions
					.keys()
					.find(|name| name.eq_ignore_ascii_case(main))
			})
			.or_else(|| self.aeps.editions.keys().next())
			.map(String::as_str)
	}

	pub fn latest_edition(&self) -> Option<&Edition> {
		self.latest_edition_name()
			.and_then(|name| self.aeps.editions.get(name))
	}
}

/// Group proposals into the categories of `groups`, keeping the group order.
/// Proposals are sorted by their placement order; categories without
/// proposals are dropped, as are proposals in unknown categories.
pub fn build_aep_categories(aeps: &[Aep], groups: &GroupFile) -> Vec<AepCategory> {
	groups
		.categories
		.iter()
		.filter_map(|group| {
			let mut members: Vec<&Aep> = aeps
				.iter()
				.filter(|aep| aep.category == group.code)
				.collect();
			if members.is_empty() {
				return None;
			}
			members.sort_by_key(|aep| aep.order);

			Some(AepCategory {
				code: group.code.clone(),
				title: group.title.clone(),
				aeps: members
					.into_iter()
					.map(|aep| AepItem {
						id: aep.id.clone(),
						title: aep.title.clone(),
						slug: aep.slug.clone(),
						status: aep.state.clone(),
						category: aep.category.clone(),
						order: aep.order,
					})
					.collect(),
			})
		})
		.collect()
}

/// Read a site structure previously written by the generator.
pub fn read_site_structure(path: &Path) -> SiteResult<SiteStructure> {
	if !path.is_file() {
		return Err(SiteError::SiteStructureNotFound(path.display().to_string()));
	}

	let json = std::fs::read_to_string(path)?;
	let structure = serde_json::from_str(&json).map_err(|e| SiteError::Metadata {
		path: path.display().to_string(),
		reason: e.to_string(),
	})?;
	tracing::debug!(path = %path.display(), "read site structure");
	Ok(structure)
}

/// Write `value` as pretty-printed JSON, creating parent directories.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> SiteResult<()> {
	let json = serde_json::to_string_pretty(value).map_err(|e| SiteError::Serialize {
		path: path.display().to_string(),
		reason: e.to_string(),
	})?;
	write_file(path, &json)
}

/// Write `content` to `path`, creating parent directories.
pub fn write_file(path: &Path, content: &str) -> SiteResult<()> {
	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent)?;
	}
	std::fs::write(path, content)?;
	tracing::info!(path = %path.display(), "wrote file");
	Ok(())
}
