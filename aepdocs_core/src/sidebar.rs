use serde::Deserialize;
use serde::Serialize;

use crate::site::Edition;
use crate::site::SiteStructure;

/// One entry of the Starlight sidebar configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SidebarItem {
	/// A page referenced by its slug.
	Slug(String),
	Group(SidebarGroup),
	Link { label: String, link: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarGroup {
	pub label: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub link: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub icon: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub collapsed: Option<bool>,
	pub items: Vec<SidebarItem>,
}

impl SidebarGroup {
	fn new(label: &str, items: Vec<SidebarItem>) -> Self {
		Self {
			label: label.to_string(),
			link: None,
			icon: None,
			id: None,
			collapsed: None,
			items,
		}
	}

	fn section(label: &str, link: &str, icon: &str, id: &str, items: Vec<SidebarItem>) -> Self {
		Self {
			link: Some(link.to_string()),
			icon: Some(icon.to_string()),
			id: Some(id.to_string()),
			..Self::new(label, items)
		}
	}
}

/// Build the top-level sidebar: Overview, AEPs, Tooling and Blog.
pub fn assemble_sidebar(structure: &SiteStructure) -> Vec<SidebarItem> {
	vec![
		SidebarItem::Group(SidebarGroup::section(
			"Overview",
			"1",
			"bars",
			"overview",
			overview_items(structure),
		)),
		SidebarItem::Group(SidebarGroup::section(
			"AEPs",
			"/aep_list",
			"open-book",
			"aeps",
			structure.latest_edition().map(aep_items).unwrap_or_default(),
		)),
		SidebarItem::Group(SidebarGroup::section(
			"Tooling",
			"/tooling-and-ecosystem",
			"puzzle",
			"tooling",
			tooling_items(structure),
		)),
		SidebarItem::Group(SidebarGroup::section(
			"Blog",
			"/blog",
			"document",
			"blog",
			Vec::new(),
		)),
	]
}

fn overview_items(structure: &SiteStructure) -> Vec<SidebarItem> {
	structure
		.overview
		.pages
		.iter()
		.map(|page| SidebarItem::Slug(page.link.clone()))
		.collect()
}

/// One group per category of `edition`, each proposal linked by id.
pub fn aep_items(edition: &Edition) -> Vec<SidebarItem> {
	edition
		.categories
		.iter()
		.map(|category| {
			let items = category
				.aeps
				.iter()
				.map(|aep| SidebarItem::Link {
					label: format!("{}. {}", aep.id, aep.title),
					link: if edition.folder == "." {
						aep.id.clone()
					} else {
						format!("{}/{}", edition.folder, aep.id)
					},
				})
				.collect();
			SidebarItem::Group(SidebarGroup::new(&category.title, items))
		})
		.collect()
}

fn tooling_items(structure: &SiteStructure) -> Vec<SidebarItem> {
	let mut items: Vec<SidebarItem> = structure
		.tooling
		.pages
		.iter()
		.map(|page| SidebarItem::Link {
			label: page.label.clone(),
			link: page.link.clone(),
		})
		.collect();

	if let Some(rules) = structure.tooling.linter_rules.as_deref() {
		items.extend(linter_group("Protobuf Linter", "tooling/linter", rules));
	}
	if let Some(rules) = structure.tooling.openapi_linter_rules.as_deref() {
		items.extend(linter_group("OpenAPI Linter", "tooling/openapi-linter", rules));
	}

	items
}

/// A linter overview page plus a collapsed list of its rules. Nothing is
/// emitted when there are no rules.
fn linter_group(label: &str, base: &str, rules: &[String]) -> Option<SidebarItem> {
	if rules.is_empty() {
		return None;
	}

	let rule_items = rules
		.iter()
		.map(|rule| SidebarItem::Slug(format!("{base}/rules/{rule}")))
		.collect();
	let rules_group = SidebarGroup {
		collapsed: Some(true),
		..SidebarGroup::new("Rules", rule_items)
	};

	Some(SidebarItem::Group(SidebarGroup::new(label, vec![
		SidebarItem::Slug(base.to_string()),
		SidebarItem::Group(rules_group),
	])))
}
