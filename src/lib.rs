//! Parse-once, evaluate-many string templates for generating identifiers and literal values from records.
//!
//! # Features
//!
//! * Templates mix literal text with field references: `"http://example.org/{id}/{name}"`.
//! * Parse a template once and evaluate it against any number of records.
//! * Records are anything implementing [`Lookup`]: maps, key-value slices, tabular rows, closures, ...
//! * Percent-encode substituted values for identifier output, while literal template text stays untouched.
//! * A record missing a referenced field produces no result, never a partial one.
//! * Optional [`serde`](https://docs.rs/serde) support to read templates from mapping configuration (requires the `serde` feature).
//!
//! Literal braces are written as `\{` and `\}`.
//! Parsing never fails: malformed references are kept as literal text.
//!
//! # Examples
//!
//! The [`Template`] type parses a template once, after which it can be evaluated for every record.
//!
//! ```
//! # use std::collections::HashMap;
//! use rml_template::{Encoding, Template};
//!
//! let template = Template::parse("http://example.org/{id}");
//!
//! let mut record = HashMap::new();
//! record.insert("id", "a b");
//! assert_eq!(
//!   template.evaluate(&record, Encoding::PercentEncodeReferences).as_deref(),
//!   Some("http://example.org/a%20b"),
//! );
//! assert_eq!(
//!   template.evaluate(&record, Encoding::Raw).as_deref(),
//!   Some("http://example.org/a b"),
//! );
//! ```
//!
//! For a one-off evaluation, the [`substitute()`][substitute] function parses and evaluates in one go.
//!
//! ```
//! assert_eq!(
//!   rml_template::substitute("{a}/{b}", &[("a", "x"), ("b", "y")], rml_template::Encoding::Raw).as_deref(),
//!   Some("x/y"),
//! );
//! assert_eq!(rml_template::substitute("{a}/{b}", &[("a", "x")], rml_template::Encoding::Raw), None);
//! ```
#![warn(missing_docs, missing_debug_implementations)]
#![cfg_attr(feature = "doc-cfg", feature(doc_cfg))]

pub mod error;
pub use error::MissingReference;

mod encoding;
pub use encoding::*;

mod features;

mod function;
pub use function::*;

pub mod lookup;
pub use lookup::*;

mod template;
pub use template::*;

/// Parse a template and evaluate it against one record.
///
/// Templates contain field references of the form `{name}`.
/// You can escape braces with a backslash.
///
/// Returns [`None`] if the record is missing any referenced field.
///
/// If the same template is used for many records,
/// parse it once with [`Template::parse()`] and call [`Template::evaluate()`] instead.
pub fn substitute<'a, M>(source: &str, lookup: &'a M, encoding: Encoding) -> Option<String>
where
	M: Lookup<'a> + ?Sized,
	M::Value: AsRef<str>,
{
	Template::parse(source).evaluate(lookup, encoding)
}

#[cfg(test)]
#[rustfmt::skip]
mod test {
	use std::collections::{BTreeMap, HashMap};
	use assert2::{assert, check};
	use super::*;

	#[test]
	fn test_substitute() {
		let mut map: BTreeMap<String, String> = BTreeMap::new();
		map.insert("id".into(), "42".into());
		check!(let Some("http://example.org/42") = substitute("http://example.org/{id}", &map, Encoding::Raw).as_deref());

		let mut map: HashMap<&str, &str> = HashMap::new();
		map.insert("id", "a b");
		check!(let Some("http://example.org/a%20b") = substitute("http://example.org/{id}", &map, Encoding::PercentEncodeReferences).as_deref());
	}

	#[test]
	fn test_substitute_missing_field() {
		let map: BTreeMap<String, String> = BTreeMap::new();
		check!(substitute("{a}{b}", &map, Encoding::Raw) == None);
		check!(substitute("{a}{b}", &[("a", "x")], Encoding::Raw) == None);
	}

	#[test]
	fn test_substitute_literal_braces() {
		check!(let Some("literal {not a ref}") = substitute(r"literal \{not a ref\}", &EmptyRecord, Encoding::PercentEncodeReferences).as_deref());
		check!(let Some("") = substitute("", &EmptyRecord, Encoding::Raw).as_deref());
	}

	#[test]
	fn test_substitute_with_row() {
		let header = Header::new(["id", "name"]);
		let values = ["42", "Jane Doe"];
		check!(let Some("http://example.org/42/Jane%20Doe") = substitute("http://example.org/{id}/{name}", &header.row(&values), Encoding::PercentEncodeReferences).as_deref());
		check!(substitute("{email}", &header.row(&values), Encoding::Raw) == None);
	}

	#[test]
	fn test_substitute_with_closure() {
		let record = from_fn(|field| match field {
			"id" => Some(format!("{field}-value")),
			_ => None,
		});
		check!(let Some("urn:x:id-value") = substitute("urn:x:{id}", &record, Encoding::PercentEncodeReferences).as_deref());
		assert!(substitute("urn:x:{other}", &record, Encoding::Raw).is_none());
	}
}
