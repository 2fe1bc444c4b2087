use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum SiteError {
	#[error(transparent)]
	#[diagnostic(code(aepdocs::io_error))]
	Io(#[from] std::io::Error),

	#[error(
		"Unsupported Jinja2 tag found at {line}:{column}: `{tag}`. Supported tags: {}",
		.supported.join(", ")
	)]
	#[diagnostic(
		code(aepdocs::unsupported_tag),
		help("rewrite the tag using one of the supported shapes or remove it")
	)]
	UnsupportedTag {
		tag: String,
		line: usize,
		column: usize,
		supported: Vec<String>,
	},

	#[error("sample file not found: `{path}`")]
	#[diagnostic(
		code(aepdocs::sample_not_found),
		help("sample paths are resolved relative to the folder of the document that references them")
	)]
	SampleNotFound { path: String },

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(aepdocs::config_parse),
		help("check that aepdocs.toml is valid TOML with [sources], [[editions]] and/or [output] sections")
	)]
	ConfigParse(String),

	#[error("failed to parse metadata `{path}`: {reason}")]
	#[diagnostic(code(aepdocs::metadata))]
	Metadata { path: String, reason: String },

	#[error("metadata `{path}` is missing required field `{field}`")]
	#[diagnostic(code(aepdocs::missing_field))]
	MissingField { path: String, field: String },

	#[error("no top-level `# ` heading found in `{0}`")]
	#[diagnostic(
		code(aepdocs::missing_title),
		help("the first `# Title` line of a page is used as its title")
	)]
	MissingTitle(String),

	#[error("failed to serialize `{path}`: {reason}")]
	#[diagnostic(code(aepdocs::serialize))]
	Serialize { path: String, reason: String },

	#[error("site structure file not found: `{0}`")]
	#[diagnostic(
		code(aepdocs::site_structure_not_found),
		help("run `aepdocs generate` first to produce the site structure")
	)]
	SiteStructureNotFound(String),
}

pub type SiteResult<T> = Result<T, SiteError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
