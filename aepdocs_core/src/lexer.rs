use logos::Logos;
use snailquote::unescape;

use crate::tags::SampleReference;
use crate::tags::TagKind;

/// Raw tokens produced by logos for the interior of a `{% … %}` tag.
#[derive(Logos, Debug, PartialEq)]
enum RawToken {
	#[token(",")]
	Comma,
	#[token("-")]
	TrimMarker,
	#[regex(r"[ \t\r\n]+")]
	Whitespace,
	#[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
	Ident,
	#[regex(r"'[^'\n]*'")]
	SingleQuotedString,
}

/// Tokens that carry meaning once whitespace has been dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TagToken {
	Ident(String),
	String(String),
	Comma,
	TrimMarker,
}

/// Tokenize the text between `{%` and `%}`. Returns `None` when the interior
/// contains anything the recognized tag shapes never use (double quotes,
/// operators, unterminated strings, …).
pub(crate) fn tokenize(inner: &str) -> Option<Vec<TagToken>> {
	let mut tokens = Vec::new();

	for (result, span) in RawToken::lexer(inner).spanned() {
		let slice = &inner[span];
		let token = match result.ok()? {
			RawToken::Whitespace => continue,
			RawToken::Comma => TagToken::Comma,
			RawToken::TrimMarker => TagToken::TrimMarker,
			RawToken::Ident => TagToken::Ident(slice.to_string()),
			RawToken::SingleQuotedString => TagToken::String(unescape(slice).ok()?),
		};
		tokens.push(token);
	}

	Some(tokens)
}

/// Classify the interior of a tag against the fixed set of recognized shapes.
pub(crate) fn classify(inner: &str) -> TagKind {
	let Some(tokens) = tokenize(inner) else {
		return TagKind::Unsupported;
	};

	match tokens.as_slice() {
		[TagToken::Ident(keyword), rest @ ..] if keyword == "sample" => classify_sample(rest),
		[TagToken::Ident(keyword), TagToken::Ident(branch), trim @ ..]
			if keyword == "tab" && is_optional_trim(trim) =>
		{
			match branch.as_str() {
				"proto" => TagKind::TabOpen,
				"oas" => TagKind::TabSwitch,
				_ => TagKind::Unsupported,
			}
		}
		[TagToken::Ident(keyword), trim @ ..] if keyword == "endtabs" && is_optional_trim(trim) => {
			TagKind::TabClose
		}
		_ => TagKind::Unsupported,
	}
}

fn is_optional_trim(tokens: &[TagToken]) -> bool {
	matches!(tokens, [] | [TagToken::TrimMarker])
}

fn classify_sample(arguments: &[TagToken]) -> TagKind {
	match arguments {
		[
			TagToken::String(filename),
			TagToken::Comma,
			TagToken::String(token1),
		] => TagKind::Sample(SampleReference::new(filename, token1, None)),
		[
			TagToken::String(filename),
			TagToken::Comma,
			TagToken::String(token1),
			TagToken::Comma,
			TagToken::String(token2),
		] => TagKind::Sample(SampleReference::new(filename, token1, Some(token2))),
		_ => TagKind::Unsupported,
	}
}
