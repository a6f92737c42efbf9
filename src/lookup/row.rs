use std::collections::HashMap;

use super::Lookup;

/// The column names of a tabular source, such as the first line of a CSV file.
///
/// A header resolves every column name to its position once,
/// after which any number of [`Row`]s can share it.
/// If a name occurs more than once, the first column with that name is used.
///
/// # Example
/// ```rust
/// # use rml_template::{lookup::Header, Encoding, Template};
/// let header = Header::new(["id", "name"]);
/// let template = Template::parse("http://example.org/person/{id}");
///
/// let outputs: Vec<_> = [["1", "Alice"], ["2", "Bob"]]
///     .iter()
///     .filter_map(|values| template.evaluate(&header.row(values), Encoding::Raw))
///     .collect();
/// assert_eq!(outputs, ["http://example.org/person/1", "http://example.org/person/2"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
	columns: Vec<String>,
	positions: HashMap<String, usize>,
}

impl Header {
	/// Create a header from column names, in column order.
	pub fn new<I>(columns: I) -> Self
	where
		I: IntoIterator,
		I::Item: Into<String>,
	{
		let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
		let mut positions = HashMap::with_capacity(columns.len());
		for (index, name) in columns.iter().enumerate() {
			positions.entry(name.clone()).or_insert(index);
		}
		Self { columns, positions }
	}

	/// Get the column names, in column order.
	#[inline]
	pub fn columns(&self) -> &[String] {
		&self.columns
	}

	/// Get the position of a column, if the header has it.
	#[inline]
	pub fn position(&self, field: &str) -> Option<usize> {
		self.positions.get(field).copied()
	}

	/// View the values of one line as a record with these columns.
	#[inline]
	pub fn row<'r, V>(&'r self, values: &'r [V]) -> Row<'r, V> {
		Row { header: self, values }
	}
}

/// One line of a tabular source, viewed through its [`Header`].
///
/// A field is missing when the header has no such column,
/// or when the line is too short to have a value in that column.
#[derive(Debug)]
pub struct Row<'r, V> {
	header: &'r Header,
	values: &'r [V],
}

impl<V> Clone for Row<'_, V> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<V> Copy for Row<'_, V> {}

impl<'r, V> Row<'r, V> {
	/// Get the header of the row.
	#[inline]
	pub fn header(&self) -> &'r Header {
		self.header
	}

	/// Get the values of the row, in column order.
	#[inline]
	pub fn values(&self) -> &'r [V] {
		self.values
	}
}

impl<'a, V: 'a> Lookup<'a> for Row<'_, V> {
	type Value = &'a V;

	fn get(&'a self, field: &str) -> Option<Self::Value> {
		self.values.get(self.header.position(field)?)
	}
}
