use std::convert::Infallible;

use crate::error::MissingReference;
use crate::{Encoding, Lookup};

mod evaluate;
mod parse;

/// A parsed template.
///
/// You can parse the template once and call [`Self::evaluate()`] for every record.
/// This is generally more efficient than calling [`substitute()`][crate::substitute] for each record.
///
/// A template is immutable once built.
/// It is [`Send`] and [`Sync`], so it can be shared by any number of workers evaluating records concurrently.
#[derive(Clone, PartialEq, Eq)]
pub struct Template {
	source: String,
	segments: Vec<Segment>,
}

/// The two kinds of [`Segment`] a template is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
	/// Literal text, copied to the output verbatim.
	Constant,

	/// A field reference, substituted from the record at evaluation time.
	Reference,
}

/// One piece of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
	/// Literal text.
	Constant(Constant),

	/// A reference to a field of the record.
	Reference(Reference),
}

/// Literal template text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constant {
	/// The text with escape sequences already resolved.
	text: String,

	/// The range of the raw text in the template source.
	range: std::ops::Range<usize>,
}

/// A reference to a field of the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
	/// The name of the field, never empty.
	name: String,

	/// The range of the raw name in the template source, without the braces.
	range: std::ops::Range<usize>,
}

impl std::fmt::Debug for Template {
	#[inline]
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_tuple("Template").field(&self.source).finish()
	}
}

impl Template {
	/// Parse a template from a string.
	///
	/// The template can contain field references in the form `{name}`.
	/// Literal braces are written as `\{` and `\}`.
	///
	/// Parsing never fails.
	/// An opening brace without a matching closing brace, a closing brace without an opening brace,
	/// and an empty pair of braces are all taken as literal text.
	pub fn parse(source: impl Into<String>) -> Self {
		let source = source.into();
		let segments = parse::parse(&source);
		Self { source, segments }
	}

	/// Create a template that always evaluates to `value`.
	///
	/// The value is not parsed, so braces and backslashes in it are kept as they are.
	/// The template has one constant segment, or none if `value` is empty.
	///
	/// The [source][Self::source] is `value` with its braces escaped,
	/// and parsing it again gives an equal template.
	pub fn constant(value: impl Into<String>) -> Self {
		let text = value.into();
		let source = escape_braces(&text);
		let mut segments = Vec::with_capacity(1);
		if !text.is_empty() {
			let range = 0..source.len();
			segments.push(Segment::Constant(Constant { text, range }));
		}
		Self { source, segments }
	}

	/// Get the template source.
	///
	/// For parsed templates this is the exact string that was parsed.
	/// For [constant templates][Self::constant] this is the value with its braces escaped.
	#[inline]
	pub fn source(&self) -> &str {
		&self.source
	}

	/// Get the segments of the template, in order.
	#[inline]
	pub fn segments(&self) -> &[Segment] {
		&self.segments
	}

	/// Iterate over the names of all referenced fields, in order of appearance.
	///
	/// A field that is referenced more than once is reported each time.
	pub fn references(&self) -> impl Iterator<Item = &str> + '_ {
		self.segments.iter().filter_map(|segment| match segment {
			Segment::Constant(_) => None,
			Segment::Reference(x) => Some(x.name()),
		})
	}

	/// Check if the template contains no references at all.
	///
	/// A constant template evaluates to the same string for every record.
	pub fn is_constant(&self) -> bool {
		self.references().next().is_none()
	}

	/// Evaluate the template against one record.
	///
	/// Every reference is replaced by the value of the field from `lookup`,
	/// percent-encoded if `encoding` asks for it. Constant text is never encoded.
	///
	/// Returns [`None`] if the record is missing any referenced field:
	/// a template never produces a partial result.
	///
	/// # Example
	/// ```rust
	/// # use rml_template::{Encoding, Template};
	/// let template = Template::parse("http://example.org/{id}");
	///
	/// assert_eq!(
	///   template.evaluate(&[("id", "a b")], Encoding::PercentEncodeReferences).as_deref(),
	///   Some("http://example.org/a%20b"),
	/// );
	/// assert_eq!(template.evaluate(&[("name", "a b")], Encoding::Raw), None);
	/// ```
	#[inline]
	pub fn evaluate<'a, M>(&self, lookup: &'a M, encoding: Encoding) -> Option<String>
	where
		M: Lookup<'a> + ?Sized,
		M::Value: AsRef<str>,
	{
		self.try_evaluate(lookup, encoding).ok()
	}

	/// Evaluate the template against one record, reporting which reference could not be resolved.
	///
	/// This behaves like [`Self::evaluate()`], but returns the first missing reference as an error.
	/// The error can highlight the reference in [`Self::source()`].
	pub fn try_evaluate<'a, M>(&self, lookup: &'a M, encoding: Encoding) -> Result<String, MissingReference>
	where
		M: Lookup<'a> + ?Sized,
		M::Value: AsRef<str>,
	{
		let mut output = String::with_capacity(self.source.len() + self.source.len() / 10);
		evaluate::evaluate(&self.segments, &mut output, lookup, encoding)?;
		Ok(output)
	}
}

impl std::str::FromStr for Template {
	type Err = Infallible;

	#[inline]
	fn from_str(source: &str) -> Result<Self, Self::Err> {
		Ok(Self::parse(source))
	}
}

impl From<&str> for Template {
	#[inline]
	fn from(source: &str) -> Self {
		Self::parse(source)
	}
}

impl From<String> for Template {
	#[inline]
	fn from(source: String) -> Self {
		Self::parse(source)
	}
}

/// Render the segments back into template syntax.
///
/// Braces in constant text and in field names are escaped again.
/// Parsing the rendered string gives back the same segments,
/// except that a constant ending in a backslash directly before a reference
/// can not be expressed in the syntax and re-parses as literal text.
impl std::fmt::Display for Template {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		for segment in &self.segments {
			match segment {
				Segment::Constant(x) => f.write_str(&escape_braces(&x.text))?,
				Segment::Reference(x) => write!(f, "{{{}}}", escape_braces(&x.name))?,
			}
		}
		Ok(())
	}
}

impl Segment {
	/// Get the kind of the segment.
	#[inline]
	pub fn kind(&self) -> SegmentKind {
		match self {
			Self::Constant(_) => SegmentKind::Constant,
			Self::Reference(_) => SegmentKind::Reference,
		}
	}

	/// Get the literal text of a constant, or the field name of a reference.
	#[inline]
	pub fn text(&self) -> &str {
		match self {
			Self::Constant(x) => x.text(),
			Self::Reference(x) => x.name(),
		}
	}

	/// Get the range of the raw segment in the template source.
	///
	/// For references, the range covers the name without the surrounding braces.
	#[inline]
	pub fn source_range(&self) -> std::ops::Range<usize> {
		match self {
			Self::Constant(x) => x.range.clone(),
			Self::Reference(x) => x.range.clone(),
		}
	}
}

impl Constant {
	/// Get the literal text, with escape sequences resolved.
	#[inline]
	pub fn text(&self) -> &str {
		&self.text
	}
}

impl Reference {
	/// Get the name of the referenced field.
	#[inline]
	pub fn name(&self) -> &str {
		&self.name
	}
}

/// Escape all braces in `text` with a backslash.
pub(crate) fn escape_braces(text: &str) -> String {
	let mut output = String::with_capacity(text.len());
	for c in text.chars() {
		if c == '{' || c == '}' {
			output.push('\\');
		}
		output.push(c);
	}
	output
}

#[cfg(test)]
#[rustfmt::skip]
mod test {
	use std::collections::BTreeMap;
	use assert2::{assert, check, let_assert};

	use super::*;
	use crate::EmptyRecord;

	fn shape(template: &Template) -> Vec<(SegmentKind, &str)> {
		template.segments().iter().map(|x| (x.kind(), x.text())).collect()
	}

	#[test]
	fn test_evaluate_raw() {
		let template = Template::parse("http://example.org/{id}");
		assert!(shape(&template) == [
			(SegmentKind::Constant, "http://example.org/"),
			(SegmentKind::Reference, "id"),
		]);
		check!(let Some("http://example.org/42") = template.evaluate(&[("id", "42")], Encoding::Raw).as_deref());
	}

	#[test]
	fn test_evaluate_percent_encoded() {
		let template = Template::parse("http://example.org/{id}");
		let record = [("id", "a b")];
		check!(let Some("http://example.org/a%20b") = template.evaluate(&record, Encoding::PercentEncodeReferences).as_deref());
		check!(let Some("http://example.org/a b") = template.evaluate(&record, Encoding::Raw).as_deref());
	}

	#[test]
	fn test_encoding_never_touches_constants() {
		let template = Template::parse("http://a/b?x={x}#{y}");
		let record = [("x", "1/2"), ("y", "c d")];
		let_assert!(Some(output) = template.evaluate(&record, Encoding::PercentEncodeReferences));
		assert!(output == "http://a/b?x=1%2F2#c%20d");
	}

	#[test]
	fn test_missing_reference_gives_no_result() {
		let template = Template::parse("{a}{b}");
		check!(template.evaluate(&[("a", "x")], Encoding::Raw) == None);
		check!(template.evaluate(&[("b", "x")], Encoding::PercentEncodeReferences) == None);
		check!(let Some("xy") = template.evaluate(&[("a", "x"), ("b", "y")], Encoding::Raw).as_deref());

		let_assert!(Err(e) = template.try_evaluate(&[("a", "x")], Encoding::Raw));
		assert!(e.name == "b");
		assert!(e.position == 4);
	}

	#[test]
	fn test_empty_value_is_not_missing() {
		let template = Template::parse("x{a}y");
		check!(let Some("xy") = template.evaluate(&[("a", "")], Encoding::PercentEncodeReferences).as_deref());
	}

	#[test]
	fn test_empty_template() {
		let template = Template::parse("");
		assert!(template.segments().is_empty());
		check!(let Some("") = template.evaluate(&EmptyRecord, Encoding::Raw).as_deref());
		check!(let Some("") = template.evaluate(&EmptyRecord, Encoding::PercentEncodeReferences).as_deref());
	}

	#[test]
	fn test_constant_template() {
		let template = Template::constant("42");
		assert!(shape(&template) == [(SegmentKind::Constant, "42")]);
		assert!(template.is_constant());
		check!(let Some("42") = template.evaluate(&EmptyRecord, Encoding::Raw).as_deref());
		check!(let Some("42") = template.evaluate(&[("id", "7")], Encoding::PercentEncodeReferences).as_deref());
	}

	#[test]
	fn test_constant_template_keeps_braces_and_spaces() {
		let template = Template::constant("{id} a/b");
		assert!(template.source() == r"\{id\} a/b");
		assert!(!template.references().any(|_| true));
		check!(let Some("{id} a/b") = template.evaluate(&EmptyRecord, Encoding::PercentEncodeReferences).as_deref());
		assert!(Template::parse(template.source()).evaluate(&EmptyRecord, Encoding::Raw) == Some("{id} a/b".into()));
	}

	#[test]
	fn test_empty_constant_template() {
		let template = Template::constant("");
		assert!(template.segments().is_empty());
		assert!(template.is_constant());
		assert!(template == Template::parse(""));
		check!(let Some("") = template.evaluate(&EmptyRecord, Encoding::Raw).as_deref());
	}

	#[test]
	fn test_constant_template_equals_its_parsed_source() {
		for value in ["", "42", "{id}", r"a\{b", r"\}", r"trailing\", r"\{x}", "é {} }{"] {
			let template = Template::constant(value);
			let reparsed = Template::parse(template.source());
			assert!(reparsed == template, "value: {value:?}");
		}
	}

	#[test]
	fn test_output_length_is_sum_of_parts() {
		let template = Template::parse("http://example.org/{a}/x/{b}");
		let record = [("a", "é x"), ("b", "plain")];
		let constants: usize = template.segments().iter()
			.filter(|x| x.kind() == SegmentKind::Constant)
			.map(|x| x.text().len())
			.sum();
		for encoding in [Encoding::Raw, Encoding::PercentEncodeReferences] {
			let values: usize = template.references()
				.map(|name| encoding.apply(record.iter().find(|x| x.0 == name).unwrap().1).len())
				.sum();
			let_assert!(Some(output) = template.evaluate(&record, encoding));
			assert!(output.len() == constants + values);
		}
	}

	#[test]
	fn test_references() {
		let template = Template::parse("{a}-{b}-{a}");
		assert!(template.references().collect::<Vec<_>>() == ["a", "b", "a"]);
		assert!(!template.is_constant());
		assert!(Template::parse(r"no \{refs\}").is_constant());
	}

	#[test]
	fn test_display_round_trip() {
		for source in ["", "plain text", r"literal \{not a ref\}", r"\{\}\{", r"a\b", "http://example.org/{id}", r"{a\}b}{c}"] {
			let template = Template::parse(source);
			let rendered = template.to_string();
			assert!(rendered == source);
			assert!(Template::parse(rendered).segments() == template.segments());
		}
	}

	#[test]
	fn test_from_impls() {
		let_assert!(Ok(template) = "x/{y}".parse::<Template>());
		assert!(template == Template::from("x/{y}"));
		assert!(template == Template::from(String::from("x/{y}")));
		assert!(format!("{template:?}") == r#"Template("x/{y}")"#);
	}

	#[test]
	fn test_btree_map_lookup() {
		let mut map: BTreeMap<&str, String> = BTreeMap::new();
		map.insert("name", "Jane Doe".into());
		let template = Template::parse("http://example.org/person/{name}");
		check!(let Some("http://example.org/person/Jane%20Doe") = template.evaluate(&map, Encoding::PercentEncodeReferences).as_deref());
	}

	#[test]
	fn test_shared_between_threads() {
		fn assert_send_sync<T: Send + Sync>() {}
		assert_send_sync::<Template>();

		let template = Template::parse("http://example.org/{id}");
		let outputs: Vec<Option<String>> = std::thread::scope(|scope| {
			let handles: Vec<_> = (0..4)
				.map(|i| {
					let template = &template;
					scope.spawn(move || {
						let id = format!("row {i}");
						template.evaluate(&[("id", id.as_str())], Encoding::PercentEncodeReferences)
					})
				})
				.collect();
			handles.into_iter().map(|x| x.join().unwrap()).collect()
		});
		for (i, output) in outputs.iter().enumerate() {
			assert!(output.as_deref() == Some(format!("http://example.org/row%20{i}").as_str()));
		}
	}
}
