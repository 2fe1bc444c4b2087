use std::ops::Range;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::SiteError;
use crate::SiteResult;
use crate::lexer::classify;

/// Generic pseudo-template delimiter: `{%`, the shortest run of anything
/// (newlines included), `%}`.
static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)\{%.*?%\}").unwrap());

/// Every tag shape the generator understands. Anything else is rejected by
/// [`validate_tags`].
pub const SUPPORTED_TAGS: [&str; 5] = [
	"{% tab proto %}",
	"{% tab oas %}",
	"{% endtabs %}",
	"{% sample '<file>', '<token>' %}",
	"{% sample '<file>', '<token>', '<token>' %}",
];

/// The language a sample file is rendered with, inferred from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleLanguage {
	Protobuf,
	Yaml,
}

impl SampleLanguage {
	/// Only `.proto`, `.yaml` and `.yml` files are treated as samples.
	pub fn from_filename(filename: &str) -> Option<Self> {
		match Path::new(filename).extension().and_then(|ext| ext.to_str()) {
			Some("proto") => Some(Self::Protobuf),
			Some("yaml" | "yml") => Some(Self::Yaml),
			_ => None,
		}
	}

	/// The fence info string used for this language.
	pub fn fence_tag(self) -> &'static str {
		match self {
			Self::Protobuf => "protobuf",
			Self::Yaml => "yaml",
		}
	}
}

/// The arguments of a `{% sample … %}` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleReference {
	/// Path of the sample, relative to the folder of the referencing document.
	pub filename: String,
	pub token1: String,
	pub token2: Option<String>,
}

impl SampleReference {
	pub fn new(filename: &str, token1: &str, token2: Option<&str>) -> Self {
		Self {
			filename: filename.to_string(),
			token1: token1.to_string(),
			token2: token2.map(ToString::to_string),
		}
	}

	pub fn language(&self) -> Option<SampleLanguage> {
		SampleLanguage::from_filename(&self.filename)
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TagKind {
	/// `{% tab proto %}`
	TabOpen,
	/// `{% tab oas %}`
	TabSwitch,
	/// `{% endtabs %}`
	TabClose,
	/// `{% sample 'file', 'token' %}`
	Sample(SampleReference),
	Unsupported,
}

/// A located `{% … %}` tag inside a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagOccurrence {
	pub kind: TagKind,
	/// The tag exactly as written, delimiters included.
	pub raw: String,
	/// Byte range of `raw` within the scanned text.
	pub range: Range<usize>,
	/// 1-indexed line of the opening delimiter.
	pub line: usize,
	/// 1-indexed column (in characters) of the opening delimiter.
	pub column: usize,
}

/// Find every `{% … %}` tag in `text` in document order and classify it.
pub fn scan_tags(text: &str) -> Vec<TagOccurrence> {
	let mut occurrences = Vec::new();
	let mut line = 1;
	let mut line_start = 0;
	let mut cursor = 0;

	for found in TAG_PATTERN.find_iter(text) {
		for (offset, _) in text[cursor..found.start()].match_indices('\n') {
			line += 1;
			line_start = cursor + offset + 1;
		}
		cursor = found.start();

		let raw = found.as_str();
		let inner = &raw[2..raw.len() - 2];
		occurrences.push(TagOccurrence {
			kind: classify(inner),
			raw: raw.to_string(),
			range: found.range(),
			line,
			column: text[line_start..found.start()].chars().count() + 1,
		});
	}

	occurrences
}

/// Reject documents that use any tag outside of [`SUPPORTED_TAGS`]. Only the
/// first unsupported tag (in document order) is reported.
///
/// Recognized tags that have no partner (a stray `{% endtabs %}`, a sample
/// with an unknown extension) are accepted here and later passed through
/// verbatim by the substitution passes.
pub fn validate_tags(text: &str) -> SiteResult<()> {
	let Some(unsupported) = scan_tags(text)
		.into_iter()
		.find(|occurrence| occurrence.kind == TagKind::Unsupported)
	else {
		return Ok(());
	};

	tracing::debug!(tag = %unsupported.raw, line = unsupported.line, "unsupported tag");

	Err(SiteError::UnsupportedTag {
		tag: unsupported.raw,
		line: unsupported.line,
		column: unsupported.column,
		supported: SUPPORTED_TAGS.iter().map(ToString::to_string).collect(),
	})
}
