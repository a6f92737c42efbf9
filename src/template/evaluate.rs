use super::{Reference, Segment};
use crate::error::MissingReference;
use crate::{Encoding, Lookup};

/// Evaluate all segments into the output string.
///
/// Stops at the first reference that the lookup can not resolve.
/// The output is left partially written in that case, so callers must discard it.
pub(super) fn evaluate<'a, M>(
	segments: &[Segment],
	output: &mut String,
	lookup: &'a M,
	encoding: Encoding,
) -> Result<(), MissingReference>
where
	M: Lookup<'a> + ?Sized,
	M::Value: AsRef<str>,
{
	for segment in segments {
		match segment {
			Segment::Constant(x) => output.push_str(&x.text),
			Segment::Reference(x) => x.evaluate(output, lookup, encoding)?,
		}
	}
	Ok(())
}

impl Reference {
	/// Substitute the referenced field into the output string.
	fn evaluate<'a, M>(&self, output: &mut String, lookup: &'a M, encoding: Encoding) -> Result<(), MissingReference>
	where
		M: Lookup<'a> + ?Sized,
		M::Value: AsRef<str>,
	{
		match lookup.get(&self.name) {
			Some(value) => {
				output.push_str(&encoding.apply(value.as_ref()));
				Ok(())
			},
			None => Err(MissingReference {
				position: self.range.start,
				len: self.range.len(),
				name: self.name.clone(),
			}),
		}
	}
}
