use std::fmt::Write as _;
use std::sync::LazyLock;

use regex::Regex;

use crate::Document;
use crate::fence::map_outside_fences;
use crate::tabs::indent;

pub const ASIDE_COMPONENT: &str = "Aside";

/// A paragraph that starts with `**Label:**` (or a bare `Label:`) for one of
/// the recognized callout labels.
static CALLOUT_START: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(
		r"(?m)^(?:\*\*(Important|Note|TL;DR|Warning|Summary):\*\*|(Important|Note|TL;DR|Warning|Summary):)",
	)
	.unwrap()
});

/// How a callout label is rendered as an `<Aside>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AsideStyle {
	pub r#type: &'static str,
	pub title: &'static str,
}

/// Callout label to aside type and title.
pub const CALLOUTS: [(&str, AsideStyle); 5] = [
	("Important", AsideStyle { r#type: "caution", title: "Important" }),
	("Note", AsideStyle { r#type: "note", title: "Note" }),
	("TL;DR", AsideStyle { r#type: "tip", title: "TL;DR" }),
	("Warning", AsideStyle { r#type: "danger", title: "Warning" }),
	("Summary", AsideStyle { r#type: "tip", title: "Summary" }),
];

/// Look up the aside style for a callout label. Labels are case-sensitive.
pub fn aside_style(label: &str) -> Option<AsideStyle> {
	CALLOUTS
		.iter()
		.find(|(name, _)| *name == label)
		.map(|(_, style)| *style)
}

/// Turn every callout paragraph into an `<Aside>` block.
///
/// The paragraph runs from the label to the first blank line (or the end of
/// the document). Its text is trimmed at the start and indented one level.
/// Unknown labels and fenced code are left alone.
pub fn substitute_callouts(doc: &mut Document) {
	let mut count = 0usize;
	let body = map_outside_fences(&doc.body, |prose| rewrite_callouts(prose, &mut count));
	if count == 0 {
		return;
	}

	tracing::debug!(count, "substituted callouts");
	doc.body = body;
	doc.register_component(ASIDE_COMPONENT);
}

fn rewrite_callouts(text: &str, count: &mut usize) -> String {
	let mut output = String::with_capacity(text.len());
	let mut last = 0;

	while let Some(captures) = CALLOUT_START.captures_at(text, last) {
		let Some(whole) = captures.get(0) else {
			break;
		};
		let Some(style) = captures
			.get(1)
			.or_else(|| captures.get(2))
			.and_then(|label| aside_style(label.as_str()))
		else {
			break;
		};

		let body_start = whole.end();
		let mut end = text[body_start..]
			.find("\n\n")
			.map_or(text.len(), |offset| body_start + offset);
		end -= text[body_start..end].len() - text[body_start..end].trim_end_matches('\n').len();

		output.push_str(&text[last..whole.start()]);
		let _ = write!(
			output,
			"<{ASIDE_COMPONENT} type=\"{}\" title=\"{}\">\n{}\n</{ASIDE_COMPONENT}>",
			style.r#type,
			style.title,
			indent(text[body_start..end].trim_start())
		);
		last = end;
		*count += 1;

		if last >= text.len() {
			break;
		}
	}

	output.push_str(&text[last..]);
	output
}
