//! Fenced code block tracking.
//!
//! Text substitutions that target prose (comments, escapes, callouts, rule
//! keywords, titles and links) must not touch code that was inlined from
//! sample files, so they only run on the parts of a document that sit outside
//! of fenced code blocks.

/// Tracks code fence state during line-by-line processing.
///
/// Fences use backticks or tildes (three or more). The closing fence must use
/// the same character and be at least as long as the opening fence.
#[derive(Debug, Default)]
pub(crate) struct FenceTracker {
	fence_char: Option<char>,
	fence_len: usize,
}

impl FenceTracker {
	pub(crate) fn new() -> Self {
		Self::default()
	}

	pub(crate) fn in_fence(&self) -> bool {
		self.fence_char.is_some()
	}

	/// Update fence state based on a line. Returns `true` if the line opens or
	/// closes a fence.
	pub(crate) fn update(&mut self, line: &str) -> bool {
		let trimmed = line.trim_start();

		if let Some(fence_char) = self.fence_char {
			if is_closing_fence(trimmed, fence_char, self.fence_len) {
				self.fence_char = None;
				self.fence_len = 0;
				return true;
			}
			false
		} else if let Some((ch, len)) = detect_fence(trimmed) {
			self.fence_char = Some(ch);
			self.fence_len = len;
			true
		} else {
			false
		}
	}
}

fn detect_fence(trimmed: &str) -> Option<(char, usize)> {
	let first = trimmed.chars().next()?;
	if first != '`' && first != '~' {
		return None;
	}

	let count = trimmed.chars().take_while(|&c| c == first).count();
	(count >= 3).then_some((first, count))
}

fn is_closing_fence(trimmed: &str, expected: char, min_len: usize) -> bool {
	if !trimmed.starts_with(expected) {
		return false;
	}

	let count = trimmed.chars().take_while(|&c| c == expected).count();
	count >= min_len && trimmed[count * expected.len_utf8()..].trim().is_empty()
}

/// Apply `rewrite` to every run of lines that lies outside fenced code blocks,
/// leaving fence lines and fenced content untouched. Line endings are kept.
pub(crate) fn map_outside_fences(text: &str, mut rewrite: impl FnMut(&str) -> String) -> String {
	let mut output = String::with_capacity(text.len());
	let mut tracker = FenceTracker::new();
	let mut prose = String::new();

	for line in text.split_inclusive('\n') {
		let was_in_fence = tracker.in_fence();
		let is_marker = tracker.update(line);

		if was_in_fence || is_marker {
			if !prose.is_empty() {
				output.push_str(&rewrite(&prose));
				prose.clear();
			}
			output.push_str(line);
		} else {
			prose.push_str(line);
		}
	}

	if !prose.is_empty() {
		output.push_str(&rewrite(&prose));
	}

	output
}

/// The shortest backtick fence that cannot be closed by anything inside
/// `content`.
pub(crate) fn fence_for(content: &str) -> String {
	let longest_run = content
		.split(|c| c != '`')
		.map(str::len)
		.max()
		.unwrap_or(0);
	"`".repeat(longest_run.max(2) + 1)
}
