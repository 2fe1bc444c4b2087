//! Linter rule pages gathered from the protobuf and OpenAPI linter
//! repositories.

use std::collections::BTreeSet;
use std::path::Path;
use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde::Serialize;

use crate::SiteError;
use crate::SiteResult;
use crate::page::extract_title;

static H2_HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^## (.+)$").unwrap());
static OPENAPI_RULE_FILE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}\.md$").unwrap());
static NON_SLUG_CHARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// A single linter rule page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinterRule {
	pub title: String,
	/// Zero-padded proposal number the rule belongs to, e.g. `0131`.
	pub aep: String,
	/// Markdown contents including front matter.
	pub contents: String,
	pub filename: String,
	pub slug: String,
	/// Text before the first rule of a multi-rule file. Only carried by the
	/// first rule of that file.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub preamble: Option<String>,
}

/// Collect the protobuf linter rules under `<root>/docs/rules/<aep>/*.md`.
///
/// Files ending in `index.md` are skipped. A folder that cannot be read is
/// logged and skipped.
pub fn assemble_linter_rules(root: &Path) -> SiteResult<Vec<LinterRule>> {
	let mut rules = Vec::new();

	for folder in list_dirs(&root.join("docs").join("rules"))? {
		let Some(aep) = folder.file_name().and_then(|name| name.to_str()) else {
			continue;
		};

		let files = match list_rule_files(&folder) {
			Ok(files) => files,
			Err(e) => {
				tracing::warn!(folder = %folder.display(), error = %e, "skipping linter rule folder");
				continue;
			}
		};

		for file in files {
			match build_linter_rule(&file, aep) {
				Ok(rule) => rules.push(rule),
				Err(e) => {
					tracing::warn!(file = %file.display(), error = %e, "skipping linter rule");
				}
			}
		}
	}

	tracing::info!(count = rules.len(), "assembled protobuf linter rules");
	Ok(rules)
}

fn list_rule_files(folder: &Path) -> SiteResult<Vec<PathBuf>> {
	let mut files = Vec::new();
	for entry in std::fs::read_dir(folder)? {
		let path = entry?.path();
		let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
			continue;
		};
		if path.is_file() && name.ends_with(".md") && !name.ends_with("index.md") {
			files.push(path);
		}
	}
	files.sort();
	Ok(files)
}

/// List the sub-directories of `dir` in sorted order.
pub fn list_dirs(dir: &Path) -> SiteResult<Vec<PathBuf>> {
	let mut dirs = Vec::new();
	for entry in std::fs::read_dir(dir)? {
		let path = entry?.path();
		if path.is_dir() {
			dirs.push(path);
		}
	}
	dirs.sort();
	Ok(dirs)
}

/// Build one protobuf linter rule, adding its title to the front matter.
pub fn build_linter_rule(path: &Path, aep: &str) -> SiteResult<LinterRule> {
	tracing::debug!(path = %path.display(), "reading linter rule");
	let contents = std::fs::read_to_string(path)?;
	let title = extract_title(&contents)
		.ok_or_else(|| SiteError::MissingTitle(path.display().to_string()))?;
	let contents = contents.replacen("---", &format!("---\ntitle: {title}"), 1);
	let filename = path
		.file_name()
		.and_then(|name| name.to_str())
		.unwrap_or_default()
		.to_string();
	let slug = filename.split('.').next().unwrap_or_default().to_string();

	Ok(LinterRule {
		title,
		aep: aep.to_string(),
		contents,
		filename,
		slug,
		preamble: None,
	})
}

/// Collect the OpenAPI linter rules from `<root>/docs/NNNN.md`.
///
/// Each `## ` section of a file is a separate rule; the text before the first
/// section becomes the preamble of the first rule. Files without sections are
/// a single rule. A missing repository or docs folder yields no rules.
pub fn assemble_openapi_linter_rules(root: &Path) -> SiteResult<Vec<LinterRule>> {
	if !root.exists() {
		tracing::info!(path = %root.display(), "OpenAPI linter repository not found, skipping");
		return Ok(Vec::new());
	}

	let docs = root.join("docs");
	if !docs.is_dir() {
		tracing::warn!(path = %docs.display(), "OpenAPI linter docs directory not found");
		return Ok(Vec::new());
	}

	let mut files: Vec<PathBuf> = std::fs::read_dir(&docs)?
		.filter_map(Result::ok)
		.map(|entry| entry.path())
		.filter(|path| {
			path.file_name()
				.and_then(|name| name.to_str())
				.is_some_and(|name| OPENAPI_RULE_FILE.is_match(name))
		})
		.collect();
	files.sort();

	let mut rules = Vec::new();
	for file in files {
		let Some(aep) = file.file_stem().and_then(|stem| stem.to_str()) else {
			continue;
		};
		match std::fs::read_to_string(&file) {
			Ok(contents) if H2_HEADING.is_match(&contents) => {
				let split = split_openapi_rules(&contents, aep);
				tracing::debug!(aep, count = split.len(), "processed OpenAPI linter rules");
				rules.extend(split);
			}
			Ok(_) => match build_linter_rule(&file, aep) {
				Ok(rule) => rules.push(rule),
				Err(e) => tracing::warn!(file = %file.display(), error = %e, "skipping OpenAPI linter rule"),
			},
			Err(e) => tracing::warn!(file = %file.display(), error = %e, "failed to read OpenAPI linter rule"),
		}
	}

	tracing::info!(count = rules.len(), "assembled OpenAPI linter rules");
	Ok(rules)
}

/// Split a file into one rule per `## ` section.
pub fn split_openapi_rules(contents: &str, aep: &str) -> Vec<LinterRule> {
	let headings: Vec<_> = H2_HEADING.captures_iter(contents).collect();
	let Some(first) = headings.first().and_then(|captures| captures.get(0)) else {
		return Vec::new();
	};
	let preamble = contents[..first.start()].trim().to_string();

	headings
		.iter()
		.enumerate()
		.filter_map(|(index, captures)| {
			let heading = captures.get(0)?;
			let title = captures.get(1)?.as_str().trim().to_string();
			let end = headings
				.get(index + 1)
				.and_then(|next| next.get(0))
				.map_or(contents.len(), |next| next.start());
			let section = contents[heading.end()..end].trim();
			let slug = format!("{aep}-{}", slugify(&title));

			Some(LinterRule {
				contents: format!("---\ntitle: {title}\n---\n# {title}\n\n{section}"),
				filename: format!("{slug}.md"),
				slug,
				aep: aep.to_string(),
				preamble: (index == 0 && !preamble.is_empty()).then(|| preamble.clone()),
				title,
			})
		})
		.collect()
}

/// Lowercase `title` and collapse every run of other characters into `-`.
pub fn slugify(title: &str) -> String {
	NON_SLUG_CHARS
		.replace_all(&title.to_lowercase(), "-")
		.trim_matches('-')
		.to_string()
}

/// The distinct proposal numbers covered by `rules`, sorted.
pub fn unique_aeps(rules: &[LinterRule]) -> Vec<String> {
	rules
		.iter()
		.map(|rule| rule.aep.clone())
		.collect::<BTreeSet<_>>()
		.into_iter()
		.collect()
}

/// Write the rules as pretty-printed JSON for the site to render.
pub fn write_linter_rules_json(rules: &[LinterRule], path: &Path) -> SiteResult<()> {
	crate::site::write_json(path, &rules)?;
	tracing::info!(count = rules.len(), path = %path.display(), "wrote linter rules");
	Ok(())
}
