use std::collections::BTreeSet;
use std::fmt::Write as _;

use serde_yaml_ng::Mapping;
use serde_yaml_ng::Value;

use crate::Document;
use crate::SiteError;
use crate::SiteResult;
use crate::callouts::ASIDE_COMPONENT;
use crate::substitutions::remove_title;
use crate::tabs::TAB_ITEM_COMPONENT;
use crate::tabs::TABS_COMPONENT;

/// Module the built-in Starlight components are imported from.
pub const STARLIGHT_COMPONENTS: &str = "@astrojs/starlight/components";

/// Return the text of the first top-level `# ` heading, if any.
pub fn extract_title(text: &str) -> Option<String> {
	text.lines()
		.find_map(|line| line.strip_prefix("# "))
		.map(|title| title.trim().to_string())
}

/// A single `import { A, B } from 'path';` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentImport {
	pub names: Vec<String>,
	pub path: String,
}

impl ComponentImport {
	pub fn new<I, S>(names: I, path: impl Into<String>) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			names: names.into_iter().map(Into::into).collect(),
			path: path.into(),
		}
	}

	/// Import the Starlight built-ins among `components`. Returns `None` when
	/// none of them are used.
	pub fn starlight(components: &BTreeSet<String>) -> Option<Self> {
		let names: Vec<&str> = [ASIDE_COMPONENT, TABS_COMPONENT, TAB_ITEM_COMPONENT]
			.into_iter()
			.filter(|name| components.contains(*name))
			.collect();

		(!names.is_empty()).then(|| Self::new(names, STARLIGHT_COMPONENTS))
	}

	fn render(&self) -> String {
		format!("import {{ {} }} from '{}';", self.names.join(", "), self.path)
	}
}

/// A page ready to be written into the site's content collection: YAML front
/// matter, component imports and the transformed body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MdxPage {
	pub frontmatter: Mapping,
	pub imports: Vec<ComponentImport>,
	pub body: String,
}

impl MdxPage {
	/// Build a page from a transformed document, importing the Starlight
	/// components it references.
	pub fn from_document(doc: Document, frontmatter: Mapping) -> Self {
		let (body, components) = doc.into_parts();
		Self {
			frontmatter,
			imports: ComponentImport::starlight(&components).into_iter().collect(),
			body,
		}
	}

	/// Set a front matter key, replacing any previous value in place.
	pub fn set(&mut self, key: &str, value: impl Into<Value>) {
		self.frontmatter
			.insert(Value::String(key.to_string()), value.into());
	}

	pub fn get(&self, key: &str) -> Option<&Value> {
		self.frontmatter.get(key)
	}

	/// Render the page as `---\n<front matter>---\n\n<imports>\n\n<body>`.
	pub fn render(&self) -> SiteResult<String> {
		let yaml = if self.frontmatter.is_empty() {
			String::new()
		} else {
			serde_yaml_ng::to_string(&self.frontmatter).map_err(|e| SiteError::Serialize {
				path: "front matter".to_string(),
				reason: e.to_string(),
			})?
		};

		let mut output = format!("---\n{yaml}---\n\n");
		if !self.imports.is_empty() {
			for import in &self.imports {
				let _ = writeln!(output, "{}", import.render());
			}
			output.push('\n');
		}
		output.push_str(&self.body);

		Ok(output)
	}
}

/// Build a plain markdown page (general pages, linter READMEs). Only the title
/// line is moved into the front matter; no other rewriting happens.
///
/// `title` overrides the title found in the content. Returns `None` for the
/// title when neither is available.
pub fn build_plain_page(raw: &str, title: Option<&str>) -> (MdxPage, Option<String>) {
	let page_title = title
		.map(ToString::to_string)
		.or_else(|| extract_title(raw));

	let mut doc = Document::new(raw);
	remove_title(&mut doc);

	let mut page = MdxPage {
		body: doc.body,
		..MdxPage::default()
	};
	if let Some(page_title) = &page_title {
		page.set("title", page_title.as_str());
	}

	(page, page_title)
}
