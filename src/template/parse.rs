use super::{Constant, Reference, Segment};

/// Parse a template source into segments.
///
/// This never fails: anything that is not a well-formed reference or escape sequence is literal text.
pub(super) fn parse(source: &str) -> Vec<Segment> {
	let bytes = source.as_bytes();
	let mut parser = Parser {
		segments: Vec::with_capacity(2),
		literal: String::new(),
		literal_start: 0,
	};

	// Once an opening brace has no closing brace after it, no later one can have one either.
	let mut unclosed = false;

	let mut finger = 0;
	while finger < bytes.len() {
		// Backslashes and braces are ASCII, so every index we stop at is a char boundary.
		let next = match memchr::memchr3(b'\\', b'{', b'}', &bytes[finger..]) {
			Some(x) => finger + x,
			None => bytes.len(),
		};
		parser.literal.push_str(&source[finger..next]);
		if next == bytes.len() {
			break;
		}

		match bytes[next] {
			b'\\' => match escaped_brace(bytes, next) {
				Some(brace) => {
					parser.literal.push(brace);
					finger = next + 2;
				},
				None => {
					parser.literal.push('\\');
					finger = next + 1;
				},
			},
			b'{' => {
				let name_start = next + 1;
				let name_end = if unclosed { None } else { find_closing_brace(bytes, name_start) };
				match name_end {
					// An empty name is not a reference.
					Some(name_end) if name_end > name_start => {
						parser.flush_literal(next);
						parser.segments.push(Segment::Reference(Reference {
							name: unescape_braces(&source[name_start..name_end]),
							range: name_start..name_end,
						}));
						finger = name_end + 1;
						parser.literal_start = finger;
					},
					Some(_) => {
						parser.literal.push('{');
						finger = name_start;
					},
					None => {
						unclosed = true;
						parser.literal.push('{');
						finger = name_start;
					},
				}
			},
			// A closing brace without an opening brace.
			_ => {
				parser.literal.push('}');
				finger = next + 1;
			},
		}
	}

	parser.flush_literal(bytes.len());
	parser.segments
}

/// Parser state: the finished segments and the literal text collected since the last reference.
struct Parser {
	segments: Vec<Segment>,
	literal: String,
	literal_start: usize,
}

impl Parser {
	/// Emit the collected literal text as a constant segment ending at `end`, unless it is empty.
	fn flush_literal(&mut self, end: usize) {
		if self.literal.is_empty() {
			return;
		}
		self.segments.push(Segment::Constant(Constant {
			text: std::mem::take(&mut self.literal),
			range: self.literal_start..end,
		}));
	}
}

/// Get the brace escaped by the backslash at `position`, if any.
///
/// Only `\{` and `\}` are escape sequences.
/// A backslash followed by anything else is a literal backslash.
fn escaped_brace(source: &[u8], position: usize) -> Option<char> {
	match source.get(position + 1) {
		Some(b'{') => Some('{'),
		Some(b'}') => Some('}'),
		_ => None,
	}
}

/// Find the first unescaped closing brace at or after `start`.
///
/// Escape sequences are recognized exactly like the main parse loop does,
/// so a brace is only skipped here if the parser would also treat it as escaped.
fn find_closing_brace(source: &[u8], start: usize) -> Option<usize> {
	let mut finger = start;
	while finger < source.len() {
		let next = finger + memchr::memchr2(b'\\', b'}', &source[finger..])?;
		if source[next] == b'}' {
			return Some(next);
		}
		finger = match escaped_brace(source, next) {
			Some(_) => next + 2,
			None => next + 1,
		};
	}
	None
}

/// Resolve `\{` and `\}` in a field name.
fn unescape_braces(raw: &str) -> String {
	if !raw.contains('\\') {
		return raw.to_owned();
	}
	let mut output = String::with_capacity(raw.len());
	let mut chars = raw.chars().peekable();
	while let Some(c) = chars.next() {
		match (c, chars.peek()) {
			('\\', Some(&brace @ ('{' | '}'))) => {
				output.push(brace);
				chars.next();
			},
			_ => output.push(c),
		}
	}
	output
}
