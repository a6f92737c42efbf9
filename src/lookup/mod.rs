//! Lookups: the per-record capability that resolves field references.
//!
//! A template never knows where a record came from.
//! It only asks a [`Lookup`] for the value of a field by name.
//! Tabular sources can use [`Header`] and [`Row`],
//! anything else can be adapted with [`from_fn()`].

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

mod row;
pub use row::*;

/// Trait for types that can resolve the fields of one record.
pub trait Lookup<'a> {
	/// The type returned by the [`get()`][Self::get] function.
	type Value;

	/// Get the value of a field, or [`None`] if the record does not have it.
	fn get(&'a self, field: &str) -> Option<Self::Value>;
}

/// Field-value pairs, searched front to back.
///
/// The first pair with a matching field wins.
/// A linear scan is fine for the handful of fields a typical template references;
/// use a [`Header`] with [`Row`]s or a map for wide records.
///
/// # Example
/// ```rust
/// # use rml_template::Lookup;
/// let record = &[("id", "42"), ("name", "Alice"), ("id", "43")];
///
/// assert_eq!(record.get("id"), Some(&"42"));
/// assert_eq!(record.get("email"), None);
/// ```
impl<'a, K, V> Lookup<'a> for [(K, V)]
where
	K: Borrow<str>,
	V: 'a,
{
	type Value = &'a V;

	fn get(&'a self, field: &str) -> Option<Self::Value> {
		self.iter().find(|(k, _)| Borrow::<str>::borrow(k) == field).map(|(_, v)| v)
	}
}

impl<'a, K, V, const N: usize> Lookup<'a> for [(K, V); N]
where
	K: Borrow<str>,
	V: 'a,
{
	type Value = &'a V;

	fn get(&'a self, field: &str) -> Option<Self::Value> {
		Lookup::get(&self[..], field)
	}
}

impl<'a, K, V> Lookup<'a> for Vec<(K, V)>
where
	K: Borrow<str>,
	V: 'a,
{
	type Value = &'a V;

	fn get(&'a self, field: &str) -> Option<Self::Value> {
		Lookup::get(&self[..], field)
	}
}

/// Maps keyed by anything that borrows as a field name, such as `String` or `&str`.
impl<'a, K, V, S> Lookup<'a> for HashMap<K, V, S>
where
	K: Borrow<str> + Hash + Eq,
	V: 'a,
	S: BuildHasher,
{
	type Value = &'a V;

	#[inline]
	fn get(&'a self, field: &str) -> Option<Self::Value> {
		HashMap::get(self, field)
	}
}

impl<'a, K, V> Lookup<'a> for BTreeMap<K, V>
where
	K: Borrow<str> + Ord,
	V: 'a,
{
	type Value = &'a V;

	#[inline]
	fn get(&'a self, field: &str) -> Option<Self::Value> {
		BTreeMap::get(self, field)
	}
}

// Records are usually borrowed from the engine iterating a source, or shared between workers.
impl<'a, T> Lookup<'a> for &'_ T
where
	T: ?Sized + Lookup<'a>,
{
	type Value = T::Value;

	#[inline]
	fn get(&'a self, field: &str) -> Option<Self::Value> {
		(**self).get(field)
	}
}

impl<'a, T> Lookup<'a> for Box<T>
where
	T: ?Sized + Lookup<'a>,
{
	type Value = T::Value;

	#[inline]
	fn get(&'a self, field: &str) -> Option<Self::Value> {
		(**self).get(field)
	}
}

impl<'a, T> Lookup<'a> for std::sync::Arc<T>
where
	T: ?Sized + Lookup<'a>,
{
	type Value = T::Value;

	#[inline]
	fn get(&'a self, field: &str) -> Option<Self::Value> {
		(**self).get(field)
	}
}

/// A record without any fields.
///
/// Useful to evaluate templates that are known to be constant.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyRecord;

impl<'a> Lookup<'a> for EmptyRecord {
	type Value = NeverValue;

	#[inline]
	fn get(&'a self, _field: &str) -> Option<Self::Value> {
		None
	}
}

/// Value returned by the [`EmptyRecord`] lookup.
#[derive(Debug)]
pub enum NeverValue {}

impl<T: ?Sized> AsRef<T> for NeverValue {
	#[inline]
	fn as_ref(&self) -> &T {
		match *self {}
	}
}

/// A record that resolves fields by calling a function.
///
/// Created by [`from_fn()`].
#[derive(Clone, Copy)]
pub struct FnLookup<F>(F);

impl<F> std::fmt::Debug for FnLookup<F> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str("FnLookup(..)")
	}
}

impl<'a, F, V> Lookup<'a> for FnLookup<F>
where
	F: 'a + Fn(&str) -> Option<V>,
{
	type Value = V;

	#[inline]
	fn get(&'a self, field: &str) -> Option<Self::Value> {
		(self.0)(field)
	}
}

/// Use a function from field name to value as a record.
///
/// This plugs any data source into a template:
/// the function resolves a field against the current JSON node, XML element, SQL row, ...
///
/// # Example
/// ```rust
/// # use rml_template::{lookup::from_fn, Encoding, Template};
/// let record = from_fn(|field| match field {
///     "id" => Some(42.to_string()),
///     _ => None,
/// });
///
/// let template = Template::parse("http://example.org/{id}");
/// assert_eq!(template.evaluate(&record, Encoding::Raw).as_deref(), Some("http://example.org/42"));
/// ```
pub const fn from_fn<F, V>(func: F) -> FnLookup<F>
where
	F: Fn(&str) -> Option<V>,
{
	FnLookup(func)
}
