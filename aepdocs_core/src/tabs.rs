use std::ops::Range;

use crate::Document;
use crate::tags::TagKind;
use crate::tags::scan_tags;

pub const TABS_COMPONENT: &str = "Tabs";
pub const TAB_ITEM_COMPONENT: &str = "TabItem";

const PROTO_LABEL: &str = "Protocol Buffers";
const OAS_LABEL: &str = "OpenAPI 3.0";

/// A complete `tab proto` … `tab oas` … `endtabs` sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TabBlock {
	/// From the start of `{% tab proto %}` to the end of `{% endtabs %}`.
	span: Range<usize>,
	proto: Range<usize>,
	oas: Range<usize>,
}

/// Replace every complete two-branch tab sequence with a `<Tabs>` block that
/// holds one `<TabItem>` per branch.
///
/// Sequences that never complete (a stray `{% endtabs %}`, an open without a
/// switch) are left in place as literal text. Documents without tab tags are
/// returned unchanged.
pub fn substitute_tabs(doc: &mut Document) {
	let blocks = find_tab_blocks(&doc.body);
	if blocks.is_empty() {
		return;
	}

	let mut output = String::with_capacity(doc.body.len());
	let mut last = 0;
	for block in &blocks {
		output.push_str(&doc.body[last..block.span.start]);
		output.push_str(&render_tabs(
			&doc.body[block.proto.clone()],
			&doc.body[block.oas.clone()],
		));
		last = block.span.end;
	}
	output.push_str(&doc.body[last..]);

	tracing::debug!(count = blocks.len(), "substituted tab blocks");
	doc.body = output;
	doc.register_component(TABS_COMPONENT);
	doc.register_component(TAB_ITEM_COMPONENT);
}

fn find_tab_blocks(text: &str) -> Vec<TabBlock> {
	let mut blocks = Vec::new();
	let mut open: Option<Range<usize>> = None;
	let mut switch: Option<Range<usize>> = None;

	for occurrence in scan_tags(text) {
		match (&occurrence.kind, open.clone(), switch.clone()) {
			(TagKind::TabOpen, None, _) => open = Some(occurrence.range),
			(TagKind::TabSwitch, Some(_), None) => switch = Some(occurrence.range),
			(TagKind::TabClose, Some(open_range), Some(switch_range)) => {
				blocks.push(TabBlock {
					span: open_range.start..occurrence.range.end,
					proto: open_range.end..switch_range.start,
					oas: switch_range.end..occurrence.range.start,
				});
				open = None;
				switch = None;
			}
			(TagKind::TabClose, _, _) => {
				open = None;
				switch = None;
			}
			_ => {}
		}
	}

	blocks
}

fn render_tabs(proto: &str, oas: &str) -> String {
	format!(
		"<{TABS_COMPONENT}>\n  <{TAB_ITEM_COMPONENT} label=\"{PROTO_LABEL}\">\n{}\n  \
		 </{TAB_ITEM_COMPONENT}>\n  <{TAB_ITEM_COMPONENT} label=\"{OAS_LABEL}\">\n{}\n  \
		 </{TAB_ITEM_COMPONENT}>\n</{TABS_COMPONENT}>",
		indent(proto),
		indent(oas)
	)
}

/// Indent every non-empty line by two spaces so the content nests inside the
/// surrounding component markup. Empty lines stay empty; whitespace-only lines
/// are indented like any other.
pub(crate) fn indent(content: &str) -> String {
	content
		.split('\n')
		.map(|line| {
			if line.is_empty() {
				String::new()
			} else {
				format!("  {line}")
			}
		})
		.collect::<Vec<_>>()
		.join("\n")
}
