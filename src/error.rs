//! Module containing error details.
//!
//! Parsing a template never fails, so the only error is a reference
//! that the record could not resolve at evaluation time.

/// A template references a field that the lookup does not have.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub struct MissingReference {
	/// The byte offset within the template source where the error occurs.
	///
	/// This points to the first character of the field name, after the opening brace.
	pub position: usize,

	/// The length of the field name in the template source, in bytes.
	///
	/// This can differ from `name.len()` when the name contains escaped braces.
	pub len: usize,

	/// The name of the missing field.
	pub name: String,
}

impl std::error::Error for MissingReference {}

impl std::fmt::Display for MissingReference {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "No value for reference: {{{}}}", crate::template::escape_braces(&self.name))
	}
}

impl MissingReference {
	/// Get the range in the template source that contains the error.
	pub fn source_range(&self) -> std::ops::Range<usize> {
		self.position..self.position + self.len
	}

	/// Get the line of the template source that contains the error.
	///
	/// # Panics
	/// May panic if the source text is not the template source that produced the error.
	pub fn source_line<'a>(&self, source: &'a str) -> &'a str {
		let position = self.source_range().start;
		let start = line_start(source, position);
		let end = line_end(source, position);
		&source[start..end]
	}

	/// Write source highlighting for the error location.
	///
	/// The highlighting ends with a newline.
	///
	/// Note: this function doesn't print anything if the source line exceeds 60 characters in width.
	/// For more control over this behaviour, consider using [`Self::source_range()`] and [`Self::source_line()`] instead.
	pub fn write_source_highlighting(&self, f: &mut impl std::fmt::Write, source: &str) -> std::fmt::Result {
		use unicode_width::UnicodeWidthStr;

		let line = self.source_line(source);
		if line.width() > 60 {
			return Ok(());
		}
		// A name can span lines: only the part on the first line is underlined.
		let start = self.position - line_start(source, self.position);
		let range = start..(start + self.len).min(line.len());
		write!(f, "  {}\n  ", line)?;
		write_underline(f, line, range)?;
		writeln!(f)
	}

	/// Get source highlighting for the error location as a string.
	///
	/// The highlighting ends with a newline.
	pub fn source_highlighting(&self, source: &str) -> String {
		let mut output = String::new();
		// Writing to a `String` can not fail.
		let _ = self.write_source_highlighting(&mut output, source);
		output
	}
}

fn line_start(source: &str, position: usize) -> usize {
	match source.as_bytes()[..position].iter().rposition(|&c| c == b'\n' || c == b'\r') {
		Some(line_end) => line_end + 1,
		None => 0,
	}
}

fn line_end(source: &str, position: usize) -> usize {
	match source.as_bytes()[position..].iter().position(|&c| c == b'\n' || c == b'\r') {
		Some(line_end) => position + line_end,
		None => source.len(),
	}
}

fn write_underline(f: &mut impl std::fmt::Write, line: &str, range: std::ops::Range<usize>) -> std::fmt::Result {
	use unicode_width::UnicodeWidthStr;
	let spaces = line[..range.start].width();
	let carets = line[range].width();
	write!(f, "{}", " ".repeat(spaces))?;
	write!(f, "{}", "^".repeat(carets))?;
	Ok(())
}
