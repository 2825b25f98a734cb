//! Encoder-facing view of values: absent slots serialize as none, which JSON renders as
//! `null`, so a normalized value never renders a sequence slot that way.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::fill::{MapValue, RecordValue, RefValue, SeqValue, Value};

impl Serialize for Value {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		match self {
			Value::Bool(value) => serializer.serialize_bool(*value),
			Value::I64(value) => serializer.serialize_i64(*value),
			Value::U64(value) => serializer.serialize_u64(*value),
			Value::F64(value) => serializer.serialize_f64(*value),
			Value::String(value) => serializer.serialize_str(value),
			Value::Record(record) => record.serialize(serializer),
			Value::Seq(seq) => seq.serialize(serializer),
			Value::Map(map) => map.serialize(serializer),
			Value::Ref(reference) => reference.serialize(serializer),
			Value::Any(Some(inner)) => inner.serialize(serializer),
			Value::Any(None) => serializer.serialize_none(),
		}
	}
}

/// Records serialize as maps of their settable fields, in declaration order.
impl Serialize for RecordValue {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		let visible = self.fields().filter(|(decl, _)| decl.is_settable()).count();
		let mut state = serializer.serialize_map(Some(visible))?;
		for (decl, value) in self.fields().filter(|(decl, _)| decl.is_settable()) {
			state.serialize_entry(&*decl.name, value)?;
		}
		state.end()
	}
}

impl Serialize for SeqValue {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		let Some(items) = self.items() else {
			return serializer.serialize_none();
		};

		let mut state = serializer.serialize_seq(Some(items.len()))?;
		for item in items {
			state.serialize_element(item)?;
		}
		state.end()
	}
}

impl Serialize for MapValue {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		let Some(entries) = self.entries() else {
			return serializer.serialize_none();
		};

		let mut state = serializer.serialize_map(Some(entries.len()))?;
		for (key, value) in entries {
			state.serialize_entry(key, value)?;
		}
		state.end()
	}
}

impl Serialize for RefValue {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		match self.target() {
			Some(target) => target.serialize(serializer),
			None => serializer.serialize_none(),
		}
	}
}
