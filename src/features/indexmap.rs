use std::borrow::Borrow;
use std::hash::{BuildHasher, Hash};

use indexmap::IndexMap;

use crate::Lookup;

/// Records that keep their fields in source order, keyed by anything that borrows as a field name.
impl<'a, K, V, S> Lookup<'a> for IndexMap<K, V, S>
where
	K: Borrow<str> + Hash + Eq,
	V: 'a,
	S: BuildHasher,
{
	type Value = &'a V;

	#[inline]
	fn get(&'a self, field: &str) -> Option<Self::Value> {
		IndexMap::get(self, field)
	}
}
