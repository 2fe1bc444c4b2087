//! Small, order-sensitive rewrites that run after the structural passes.

use std::sync::LazyLock;

use regex::Regex;

use crate::Document;
use crate::fence::map_outside_fences;

/// The first top-level heading line.
static TITLE_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^# .*(?:\n|$)").unwrap());

/// Rewrite HTML comments to MDX comments, outside fenced code.
pub fn substitute_html_comments(doc: &mut Document) {
	doc.body = map_outside_fences(&doc.body, |prose| {
		prose.replace("<!-- ", "{/* ").replace("-->", " */}")
	});
}

/// Escape `<=` and `>=` so MDX does not read them as the start of a tag.
/// Fenced code is left alone.
pub fn substitute_escape_characters(doc: &mut Document) {
	doc.body = map_outside_fences(&doc.body, |prose| {
		prose.replace("<=", "\\<=").replace(">=", "\\>=")
	});
}

/// Relabel `graphviz` fences to the `dot` alias the site's renderer expects.
pub fn substitute_graphviz(doc: &mut Document) {
	if doc.body.contains("```graphviz") {
		doc.body = doc.body.replace("```graphviz", "```dot");
	}
}

/// Rewrite reference links of the form `[x]: ./0123` to `[x]: /123`, outside
/// fenced code.
///
/// Exactly one leading zero is stripped: `./0042` becomes `/042`.
pub fn substitute_links(doc: &mut Document) {
	if !doc.body.contains("]: ") {
		return;
	}

	doc.body = map_outside_fences(&doc.body, |prose| {
		prose.replace("]: ./", "]: /").replace("]: /0", "]: /")
	});
}

/// Drop the first `# Title` line outside fenced code. The title is carried in
/// the front matter instead.
pub fn remove_title(doc: &mut Document) {
	let mut removed = false;
	doc.body = map_outside_fences(&doc.body, |prose| {
		if removed {
			return prose.to_string();
		}
		match TITLE_LINE.find(prose) {
			Some(found) => {
				removed = true;
				let mut prose = prose.to_string();
				prose.replace_range(found.range(), "");
				prose
			}
			None => prose.to_string(),
		}
	});
}
