use std::path::Path;

use crate::Document;
use crate::SiteResult;
use crate::callouts::substitute_callouts;
use crate::rules::substitute_rule_keywords;
use crate::samples::substitute_samples;
use crate::substitutions::remove_title;
use crate::substitutions::substitute_escape_characters;
use crate::substitutions::substitute_graphviz;
use crate::substitutions::substitute_html_comments;
use crate::substitutions::substitute_links;
use crate::tabs::substitute_tabs;
use crate::tags::validate_tags;

/// Transform a raw proposal body into MDX.
///
/// Tags are validated before anything is rewritten, so a document with an
/// unsupported tag fails without being partially transformed. The passes then
/// run in a fixed order:
///
/// 1. sample inclusion (`folder` is the directory samples are read from)
/// 2. tab blocks
/// 3. HTML comments
/// 4. `<=` / `>=` escaping
/// 5. callouts
/// 6. rule keywords
/// 7. title removal
/// 8. link rewriting
/// 9. graphviz fences
pub fn transform(raw: &str, folder: &Path) -> SiteResult<Document> {
	validate_tags(raw)?;

	let mut doc = Document::new(raw);
	substitute_samples(&mut doc, folder)?;
	substitute_tabs(&mut doc);
	substitute_html_comments(&mut doc);
	substitute_escape_characters(&mut doc);
	substitute_callouts(&mut doc);
	substitute_rule_keywords(&mut doc);
	remove_title(&mut doc);
	substitute_links(&mut doc);
	substitute_graphviz(&mut doc);

	tracing::debug!(
		folder = %folder.display(),
		components = doc.components.len(),
		"transformed document"
	);

	Ok(doc)
}
