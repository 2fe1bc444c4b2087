use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;
use serde_yaml_ng::Mapping;
use serde_yaml_ng::Value;

use crate::MdxPage;
use crate::SiteError;
use crate::SiteResult;
use crate::page::extract_title;
use crate::pipeline::transform;

/// Proposal body template inside each AEP folder.
pub const AEP_MARKDOWN_FILE: &str = "aep.md.j2";
/// Proposal metadata inside each AEP folder.
pub const AEP_METADATA_FILE: &str = "aep.yaml";

static IMPORT_LINE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r#"import\s+.*from\s+['"].*['"];?\n?"#).unwrap());
static JSX_ELEMENT: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"(?s)<[A-Z][^>]*/?>.*?</[A-Z][^>]*>|<[A-Z][^>]*/>").unwrap()
});
static JSX_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)\{/\*.*?\*/\}").unwrap());
static HTML_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());

/// The raw files of one proposal folder.
#[derive(Debug, Clone)]
pub struct AepSource {
	pub folder: PathBuf,
	pub markdown: String,
	pub metadata: String,
}

/// Read `aep.md.j2` and `aep.yaml` from a proposal folder.
pub fn read_aep(folder: &Path) -> SiteResult<AepSource> {
	let markdown_path = folder.join(AEP_MARKDOWN_FILE);
	tracing::debug!(path = %markdown_path.display(), "reading AEP markdown template");
	let markdown = std::fs::read_to_string(&markdown_path)?;

	let metadata_path = folder.join(AEP_METADATA_FILE);
	tracing::debug!(path = %metadata_path.display(), "reading AEP metadata");
	let metadata = std::fs::read_to_string(&metadata_path)?;

	Ok(AepSource {
		folder: folder.to_path_buf(),
		markdown,
		metadata,
	})
}

/// A transformed proposal together with the metadata used for navigation.
#[derive(Debug, Clone, PartialEq)]
pub struct Aep {
	pub id: String,
	pub title: String,
	/// Legacy slug, used to build redirects to the numeric id.
	pub slug: Option<String>,
	pub category: String,
	pub order: i64,
	pub state: Option<String>,
	pub page: MdxPage,
}

impl Aep {
	/// Point the page at an edition folder (`<edition>/<id>`).
	pub fn set_edition_slug(&mut self, edition: &str) {
		let slug = format!("{edition}/{}", self.id);
		self.page.set("slug", slug);
	}
}

/// Build a proposal page from its source files.
///
/// The metadata becomes the front matter (with `title` added and `slug`
/// removed), and the body goes through [`transform`] with samples resolved
/// against the proposal folder.
pub fn build_aep(source: &AepSource) -> SiteResult<Aep> {
	let metadata_path = source.folder.join(AEP_METADATA_FILE);
	let path_label = metadata_path.display().to_string();

	let mut frontmatter: Mapping =
		serde_yaml_ng::from_str(&source.metadata).map_err(|e| SiteError::Metadata {
			path: path_label.clone(),
			reason: e.to_string(),
		})?;

	let title = extract_title(&source.markdown).ok_or_else(|| {
		SiteError::MissingTitle(source.folder.join(AEP_MARKDOWN_FILE).display().to_string())
	})?;
	let id = frontmatter
		.get("id")
		.and_then(scalar_to_string)
		.ok_or_else(|| missing_field(&path_label, "id"))?;
	let placement = frontmatter.get("placement");
	let category = placement
		.and_then(|placement| placement.get("category"))
		.and_then(scalar_to_string)
		.ok_or_else(|| missing_field(&path_label, "placement.category"))?;
	let order = placement
		.and_then(|placement| placement.get("order"))
		.and_then(Value::as_i64)
		.unwrap_or_default();
	let state = frontmatter.get("state").and_then(scalar_to_string);
	let slug = frontmatter.remove("slug").as_ref().and_then(scalar_to_string);

	frontmatter.insert(Value::from("title"), Value::from(title.as_str()));

	let doc = transform(&source.markdown, &source.folder)?;
	let mut page = MdxPage::from_document(doc, frontmatter);
	page.set("prev", false);
	page.set("next", false);
	page.set("isAEP", true);

	Ok(Aep {
		id,
		title,
		slug,
		category,
		order,
		state,
		page,
	})
}

fn scalar_to_string(value: &Value) -> Option<String> {
	match value {
		Value::String(text) => Some(text.clone()),
		Value::Number(number) => Some(number.to_string()),
		Value::Bool(flag) => Some(flag.to_string()),
		_ => None,
	}
}

fn missing_field(path: &str, field: &str) -> SiteError {
	SiteError::MissingField {
		path: path.to_string(),
		field: field.to_string(),
	}
}

/// Map every legacy `/slug` to the proposal's `/id`.
pub fn build_redirects(aeps: &[Aep]) -> BTreeMap<String, String> {
	aeps.iter()
		.filter_map(|aep| {
			let slug = aep.slug.as_ref()?;
			Some((format!("/{slug}"), format!("/{}", aep.id)))
		})
		.collect()
}

/// Build the `llms.txt` digest: every proposal body, ordered by numeric id,
/// with imports, components and comments stripped.
pub fn build_llms_txt(aeps: &[Aep]) -> String {
	let mut sorted: Vec<&Aep> = aeps.iter().collect();
	sorted.sort_by_key(|aep| aep.id.parse::<u64>().unwrap_or(u64::MAX));

	sorted
		.into_iter()
		.map(|aep| {
			let content = IMPORT_LINE.replace_all(&aep.page.body, "");
			let content = JSX_ELEMENT.replace_all(&content, "");
			let content = JSX_COMMENT.replace_all(&content, "");
			let content = HTML_COMMENT.replace_all(&content, "");
			format!("# AEP-{} {}\n\n{}", aep.id, aep.title, content.trim())
		})
		.collect::<Vec<_>>()
		.join("\n\n---\n\n")
}
