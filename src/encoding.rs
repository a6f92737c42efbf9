use std::borrow::Cow;

/// How substituted values are written into the output of a template.
///
/// Literal template text is never encoded, whatever the mode.
/// Only values coming from the record are affected,
/// so scheme and path separators written by the template author survive intact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Encoding {
	/// Substitute values verbatim, for literal output.
	#[default]
	Raw,

	/// Percent-encode every substituted value, for identifier output.
	PercentEncodeReferences,
}

impl Encoding {
	/// Apply this encoding to a substituted value.
	#[inline]
	pub fn apply(self, value: &str) -> Cow<'_, str> {
		match self {
			Self::Raw => Cow::Borrowed(value),
			Self::PercentEncodeReferences => encode(value),
		}
	}
}

impl From<bool> for Encoding {
	/// Map an "encode references" flag to an encoding mode.
	#[inline]
	fn from(encode_references: bool) -> Self {
		if encode_references {
			Self::PercentEncodeReferences
		} else {
			Self::Raw
		}
	}
}

/// Percent-encode a value for use inside an identifier.
///
/// ASCII letters, digits, `-`, `.`, `_` and `~` are kept.
/// Every other byte of the UTF-8 encoding becomes `%XX` with upper-case hex digits.
///
/// # Example
/// ```rust
/// assert_eq!(rml_template::encode("a b/c"), "a%20b%2Fc");
/// assert_eq!(rml_template::encode("plain-value_1.0~"), "plain-value_1.0~");
/// ```
#[inline]
pub fn encode(value: &str) -> Cow<'_, str> {
	urlencoding::encode(value)
}

#[cfg(test)]
#[rustfmt::skip]
mod test {
	use std::borrow::Cow;
	use assert2::{assert, check, let_assert};

	use super::*;

	#[test]
	fn unreserved_characters_are_kept() {
		let value = "ABCXYZabcxyz0189-._~";
		assert!(encode(value) == value);
	}

	#[test]
	fn reserved_and_non_ascii_bytes_are_encoded() {
		check!(encode("a b") == "a%20b");
		check!(encode("/?#[]@") == "%2F%3F%23%5B%5D%40");
		check!(encode("!$&'()*+,;=") == "%21%24%26%27%28%29%2A%2B%2C%3B%3D");
		check!(encode("%") == "%25");
		check!(encode("{}") == "%7B%7D");
		check!(encode("é") == "%C3%A9");
		check!(encode("❤") == "%E2%9D%A4");
		check!(encode("") == "");
	}

	#[test]
	fn raw_mode_borrows_the_value() {
		let_assert!(Cow::Borrowed(value) = Encoding::Raw.apply("a b/c"));
		assert!(value == "a b/c");
		check!(Encoding::PercentEncodeReferences.apply("a b/c") == "a%20b%2Fc");
	}

	#[test]
	fn encoding_from_flag() {
		check!(Encoding::from(true) == Encoding::PercentEncodeReferences);
		check!(Encoding::from(false) == Encoding::Raw);
		check!(Encoding::default() == Encoding::Raw);
	}
}
