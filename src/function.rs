//! Template functions: a template paired with the encoding its output needs.
//!
//! A mapping rule that generates identifiers wants its references percent-encoded,
//! a rule that generates literal values does not.
//! The caller makes that decision once, when the rule is built,
//! and every record evaluated through the function gets the same treatment.

use crate::{Encoding, Lookup, Template};

/// A template together with the encoding to apply when evaluating it.
///
/// # Example
/// ```rust
/// # use rml_template::TemplateFunction;
/// let subject = TemplateFunction::from_template("http://example.org/person/{name}", true);
/// let label = TemplateFunction::from_template("{name}", false);
///
/// let record = [("name", "Jane Doe")];
/// assert_eq!(subject.apply(&record).as_deref(), Some("http://example.org/person/Jane%20Doe"));
/// assert_eq!(label.apply(&record).as_deref(), Some("Jane Doe"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TemplateFunction {
	template: Template,

	#[cfg_attr(feature = "serde", serde(default))]
	encoding: Encoding,
}

impl TemplateFunction {
	/// Pair a parsed template with an encoding.
	#[inline]
	pub fn new(template: Template, encoding: Encoding) -> Self {
		Self { template, encoding }
	}

	/// Parse a template and pair it with an encoding.
	///
	/// Pass `true` for `encode_references` when the output becomes an identifier (such as an IRI).
	pub fn from_template(source: impl Into<String>, encode_references: bool) -> Self {
		Self::new(Template::parse(source), Encoding::from(encode_references))
	}

	/// Create a function that always produces `value`, whatever the record.
	///
	/// The value is not parsed and not encoded.
	pub fn with_constant_value(value: impl Into<String>) -> Self {
		Self::new(Template::constant(value), Encoding::Raw)
	}

	/// Get the template.
	#[inline]
	pub fn template(&self) -> &Template {
		&self.template
	}

	/// Get the encoding applied to substituted values.
	#[inline]
	pub fn encoding(&self) -> Encoding {
		self.encoding
	}

	/// Evaluate the function for one record.
	///
	/// Returns [`None`] if the record is missing a referenced field.
	pub fn apply<'a, M>(&self, record: &'a M) -> Option<String>
	where
		M: Lookup<'a> + ?Sized,
		M::Value: AsRef<str>,
	{
		match self.template.try_evaluate(record, self.encoding) {
			Ok(output) => Some(output),
			Err(e) => {
				log::debug!("template {:?} produced no value: {}", self.template.source(), e);
				None
			},
		}
	}
}

/// Evaluate several templates, each against its own record.
///
/// Returns the outputs in order, or [`None`] as soon as one template can not be evaluated.
///
/// # Example
/// ```rust
/// # use rml_template::{evaluate_all, Encoding, Template};
/// let base = Template::parse("http://example.org/{type}/");
/// let local = Template::parse("{id}");
///
/// let outputs = evaluate_all(
///   [(&base, &[("type", "person")]), (&local, &[("id", "42")])],
///   Encoding::PercentEncodeReferences,
/// );
/// assert_eq!(outputs, Some(vec!["http://example.org/person/".to_string(), "42".to_string()]));
/// ```
pub fn evaluate_all<'t, 'a, I, M>(pairs: I, encoding: Encoding) -> Option<Vec<String>>
where
	I: IntoIterator<Item = (&'t Template, &'a M)>,
	M: Lookup<'a> + ?Sized + 'a,
	M::Value: AsRef<str>,
{
	let pairs = pairs.into_iter();
	let mut outputs = Vec::with_capacity(pairs.size_hint().0);
	for (index, (template, lookup)) in pairs.enumerate() {
		match template.try_evaluate(lookup, encoding) {
			Ok(output) => outputs.push(output),
			Err(e) => {
				log::debug!("template #{} ({:?}) produced no value: {}", index, template.source(), e);
				return None;
			},
		}
	}
	Some(outputs)
}

/// Evaluate several templates, each against its own record, and join the outputs with `separator`.
///
/// Returns [`None`] if any template can not be evaluated.
pub fn evaluate_joined<'t, 'a, I, M>(pairs: I, encoding: Encoding, separator: &str) -> Option<String>
where
	I: IntoIterator<Item = (&'t Template, &'a M)>,
	M: Lookup<'a> + ?Sized + 'a,
	M::Value: AsRef<str>,
{
	Some(evaluate_all(pairs, encoding)?.join(separator))
}
