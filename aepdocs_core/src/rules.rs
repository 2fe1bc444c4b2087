use std::sync::LazyLock;

use regex::Captures;
use regex::Regex;

use crate::Document;
use crate::fence::map_outside_fences;

/// Bolded normative keywords. The two-word forms are listed first so that
/// `**must not**` is a single keyword.
static RULE_KEYWORD: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"\*\*(must not|must|should not|should|may not|may)\*\*").unwrap()
});

const RED: &str = "font-extrabold text-red-700";
const YELLOW: &str = "font-extrabold text-yellow-700";
const GREEN: &str = "font-extrabold text-green-700";

/// Normative keyword to the style class it is rendered with.
pub const RULE_STYLES: [(&str, &str); 6] = [
	("must", RED),
	("must not", RED),
	("should", YELLOW),
	("should not", YELLOW),
	("may", GREEN),
	("may not", GREEN),
];

pub fn rule_style(keyword: &str) -> Option<&'static str> {
	RULE_STYLES
		.iter()
		.find(|(name, _)| *name == keyword)
		.map(|(_, style)| *style)
}

/// Rewrite every `**must**`-style keyword into a styled `<b>` element.
/// Fenced code is left alone.
pub fn substitute_rule_keywords(doc: &mut Document) {
	if !RULE_KEYWORD.is_match(&doc.body) {
		return;
	}

	doc.body = map_outside_fences(&doc.body, |prose| {
		RULE_KEYWORD
			.replace_all(prose, |captures: &Captures<'_>| {
				let keyword = &captures[1];
				match rule_style(keyword) {
					Some(style) => format!("<b class=\"{style}\">{keyword}</b>"),
					None => captures[0].to_string(),
				}
			})
			.into_owned()
	});
}
