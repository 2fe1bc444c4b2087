use std::fmt::Write as _;
use std::ops::Range;
use std::path::Path;

use crate::Document;
use crate::SiteError;
use crate::SiteResult;
use crate::fence::fence_for;
use crate::tags::SampleReference;
use crate::tags::TagKind;
use crate::tags::scan_tags;

/// Replace every `{% sample … %}` tag that references a `.proto`, `.yaml` or
/// `.yml` file with a fenced code block holding the file contents.
///
/// The block is laid out to fit the line the tag sits on: an indented or
/// list-item tag indents every emitted line to match, and a tag that follows
/// prose on its line starts the fence on a line of its own.
///
/// Samples are resolved against `folder`, the directory of the document being
/// transformed. A missing file aborts the transform of this document with
/// [`SiteError::SampleNotFound`]. Sample tags with other extensions are left
/// as they are.
pub fn substitute_samples(doc: &mut Document, folder: &Path) -> SiteResult<()> {
	let occurrences = scan_tags(&doc.body);
	let mut output = String::with_capacity(doc.body.len());
	let mut last = 0;
	let mut replaced = false;

	for occurrence in occurrences {
		let TagKind::Sample(sample) = &occurrence.kind else {
			continue;
		};
		if sample.language().is_none() {
			continue;
		}

		let block = render_sample(sample, folder)?;
		let placement = Placement::around(&doc.body, occurrence.range.clone());
		output.push_str(&doc.body[last..occurrence.range.start]);
		placement.push_block(&mut output, &block);
		last = occurrence.range.end;
		if placement.break_after {
			let rest = &doc.body[last..];
			last += rest.len() - rest.trim_start_matches([' ', '\t']).len();
		}
		replaced = true;
	}

	if replaced {
		output.push_str(&doc.body[last..]);
		doc.body = output;
	}

	Ok(())
}

/// Read a sample file and wrap it in a fenced code block. The sample tokens
/// are carried on the info string for the site's code renderer.
pub fn render_sample(sample: &SampleReference, folder: &Path) -> SiteResult<String> {
	let path = folder.join(&sample.filename);
	tracing::debug!(path = %path.display(), "reading sample");

	let content = std::fs::read_to_string(&path).map_err(|e| {
		if e.kind() == std::io::ErrorKind::NotFound {
			SiteError::SampleNotFound {
				path: path.display().to_string(),
			}
		} else {
			SiteError::Io(e)
		}
	})?;

	let language = sample.language().map_or("text", |language| language.fence_tag());
	let fence = fence_for(&content);

	let mut block = format!(
		"{fence}{language} title=\"{}\" token1=\"{}\"",
		quote_attr(&sample.filename),
		quote_attr(&sample.token1)
	);
	if let Some(token2) = &sample.token2 {
		let _ = write!(block, " token2=\"{}\"", quote_attr(token2));
	}
	block.push('\n');
	block.push_str(&content);
	if !content.is_empty() && !content.ends_with('\n') {
		block.push('\n');
	}
	block.push_str(&fence);

	Ok(block)
}

/// Backslash-escape `\` and `"` so a value stays inside its quoted info
/// string attribute.
fn quote_attr(value: &str) -> String {
	value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Where a sample block goes relative to the text around its tag.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Placement {
	/// The tag follows prose, so the fence must open on a new line.
	break_before: bool,
	/// Text after the tag on the same line, so the fence must close on its own
	/// line.
	break_after: bool,
	/// Prefix for every block line after the first.
	indentation: String,
	/// Leading whitespace of the tag's line, used for the line breaks.
	leading: String,
}

impl Placement {
	fn around(text: &str, tag: Range<usize>) -> Self {
		let line_start = text[..tag.start].rfind('\n').map_or(0, |index| index + 1);
		let line_end = text[tag.end..]
			.find('\n')
			.map_or(text.len(), |offset| tag.end + offset);
		let prefix = &text[line_start..tag.start];
		let break_after = !text[tag.end..line_end].trim().is_empty();

		let leading_len = prefix.len() - prefix.trim_start().len();
		let leading = prefix[..leading_len].to_string();
		let marker = &prefix[leading_len..];

		if marker.is_empty() {
			return Self {
				break_before: false,
				break_after,
				indentation: prefix.to_string(),
				leading,
			};
		}

		if is_blockquote(marker) {
			return Self {
				break_before: false,
				break_after,
				indentation: prefix.to_string(),
				leading: prefix.to_string(),
			};
		}

		if is_list_marker(marker) {
			let indentation = format!("{leading}{}", " ".repeat(marker.chars().count()));
			return Self {
				break_before: false,
				break_after,
				indentation: indentation.clone(),
				leading: indentation,
			};
		}

		Self {
			break_before: true,
			break_after,
			indentation: leading.clone(),
			leading,
		}
	}

	fn push_block(&self, output: &mut String, block: &str) {
		if self.break_before {
			output.truncate(output.trim_end_matches([' ', '\t']).len());
			output.push('\n');
			output.push_str(&self.leading);
		}

		for (index, line) in block.split('\n').enumerate() {
			if index > 0 {
				output.push('\n');
				if line.is_empty() {
					output.push_str(self.indentation.trim_end());
				} else {
					output.push_str(&self.indentation);
				}
			}
			output.push_str(line);
		}

		if self.break_after {
			output.push('\n');
			output.push_str(&self.leading);
		}
	}
}

/// `- `, `* `, `+ `, `1. ` or `1) `, followed by whitespace.
fn is_list_marker(marker: &str) -> bool {
	if !marker.ends_with(char::is_whitespace) {
		return false;
	}

	let bullet = marker.trim_end();
	if matches!(bullet, "-" | "*" | "+") {
		return true;
	}

	bullet
		.strip_suffix(['.', ')'])
		.is_some_and(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()))
}

fn is_blockquote(marker: &str) -> bool {
	marker.starts_with('>') && marker.chars().all(|c| c == '>' || c.is_whitespace())
}
