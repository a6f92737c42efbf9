use serde::{
	de::{Error, Visitor},
	Deserialize,
	Deserializer,
	Serialize,
	Serializer,
};

use crate::Template;

struct TemplateVisitor;

impl<'de> Visitor<'de> for TemplateVisitor {
	type Value = Template;

	fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
		formatter.write_str("a template string")
	}

	fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
	where
		E: Error,
	{
		Ok(Template::parse(v))
	}

	fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
	where
		E: Error,
	{
		Ok(Template::parse(v))
	}
}

impl Serialize for Template {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(self.source())
	}
}

impl<'de> Deserialize<'de> for Template {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		deserializer.deserialize_string(TemplateVisitor)
	}
}
