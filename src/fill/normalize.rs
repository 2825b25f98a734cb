use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, trace};

use crate::fill::value::{MapValue, Pointee, RecordValue, RefValue, SeqValue};
use crate::fill::{RecordType, Type, Value};

/// Behavior switches for normalization.
#[derive(Debug, Clone)]
pub struct NormalizeOptions {
	/// Give reference fields of zero-valued records a zero-constructed target.
	pub materialize_zero_refs: bool,
	/// Replace absent mappings with empty ones too.
	pub fill_absent_maps: bool,
}

impl Default for NormalizeOptions {
	fn default() -> Self {
		Self {
			materialize_zero_refs: true,
			fill_absent_maps: false,
		}
	}
}

impl NormalizeOptions {
	/// Preset that also replaces absent mappings with empty ones.
	pub fn fill_all() -> Self {
		Self {
			materialize_zero_refs: true,
			fill_absent_maps: true,
		}
	}
}

/// Counters accumulated by a [`Normalizer`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NormalizeStats {
	/// Absent sequences replaced by empty ones.
	pub filled_sequences: usize,
	/// Absent mappings replaced by empty ones.
	pub filled_maps: usize,
	/// Zero-valued records rebuilt by zero construction.
	pub zero_records: usize,
	/// Absent reference fields given a zero-constructed target.
	pub materialized_refs: usize,
	/// Non-settable fields left at their zero value.
	pub skipped_fields: usize,
	/// Shared references passed through unchanged.
	pub shared_refs: usize,
}

/// Replace every absent sequence reachable from `value` with an empty one.
///
/// The input is never mutated; the result is a fresh deep copy of the same static type.
/// Passing the no-value sentinel ([`Value::NONE`]) returns it unchanged, and a present
/// top-level holder is unwrapped to its normalized content.
pub fn normalize(value: &Value) -> Value {
	Normalizer::default().normalize(value)
}

/// Reusable normalizer carrying options and counters.
#[derive(Debug, Default)]
pub struct Normalizer {
	pub(crate) opt: NormalizeOptions,
	pub(crate) stats: NormalizeStats,
	/// Records under zero construction, innermost last.
	pub(crate) building: Vec<Arc<RecordType>>,
}

impl Normalizer {
	/// Normalizer with explicit options.
	pub fn new(opt: NormalizeOptions) -> Self {
		Self {
			opt,
			stats: NormalizeStats::default(),
			building: Vec::new(),
		}
	}

	/// Active options.
	pub fn options(&self) -> &NormalizeOptions {
		&self.opt
	}

	/// Counters accumulated since creation or the last reset.
	pub fn stats(&self) -> NormalizeStats {
		self.stats
	}

	/// Clear accumulated counters.
	pub fn reset_stats(&mut self) {
		self.stats = NormalizeStats::default();
	}

	/// Normalize one value; see [`normalize`].
	pub fn normalize(&mut self, value: &Value) -> Value {
		match value {
			Value::Any(None) => Value::NONE,
			Value::Any(Some(inner)) => self.convert(inner),
			other => self.convert(other),
		}
	}

	/// Entry rule for top-level values and reference targets.
	fn convert(&mut self, value: &Value) -> Value {
		match value {
			Value::Record(record) if settable_zero(record) => Value::Record(self.zero_record(record.ty())),
			other => self.clone_value(other),
		}
	}

	/// Rule for record fields, sequence elements, mapping values, and holder content.
	fn clone_value(&mut self, value: &Value) -> Value {
		match value {
			Value::Record(record) => Value::Record(self.clone_record(record)),
			Value::Seq(seq) => Value::Seq(self.clone_seq(seq)),
			Value::Map(map) => Value::Map(self.clone_map(map)),
			Value::Ref(reference) => Value::Ref(self.clone_ref(reference)),
			Value::Any(Some(inner)) => Value::any(self.clone_value(inner)),
			Value::Any(None) | Value::Bool(_) | Value::I64(_) | Value::U64(_) | Value::F64(_) | Value::String(_) => value.clone(),
		}
	}

	fn clone_record(&mut self, record: &RecordValue) -> RecordValue {
		let ty = record.ty();
		let mut values = Vec::with_capacity(ty.fields().len());

		for (decl, value) in record.fields() {
			if !decl.is_settable() {
				self.skip_field(ty, &decl.name);
				values.push(Value::zero(&decl.ty));
				continue;
			}
			values.push(self.clone_value(value));
		}

		RecordValue::from_parts(ty.clone(), values)
	}

	fn clone_seq(&mut self, seq: &SeqValue) -> SeqValue {
		let Some(items) = seq.items() else {
			self.stats.filled_sequences += 1;
			trace!(elem = %seq.elem(), "filled absent sequence");
			return SeqValue::empty(seq.elem().clone());
		};

		let mut out = Vec::with_capacity(seq.capacity());
		for item in items {
			out.push(self.clone_value(item));
		}
		SeqValue::from_parts(seq.elem().clone(), Some(out))
	}

	fn clone_map(&mut self, map: &MapValue) -> MapValue {
		let Some(entries) = map.entries() else {
			if self.opt.fill_absent_maps {
				return self.empty_map(map.key_type().clone(), map.value_type().clone());
			}
			return map.clone();
		};

		let mut out = Vec::with_capacity(entries.len());
		for (key, value) in entries {
			out.push((key.clone(), self.clone_value(value)));
		}
		MapValue::from_parts(map.key_type().clone(), map.value_type().clone(), Some(out))
	}

	fn clone_ref(&mut self, reference: &RefValue) -> RefValue {
		match reference.pointee() {
			None => reference.clone(),
			Some(Pointee::Owned(target)) => {
				let target = self.convert(target);
				RefValue::from_parts(reference.pointee_type().clone(), Some(Pointee::Owned(Box::new(target))))
			}
			Some(Pointee::Shared(_)) => {
				self.stats.shared_refs += 1;
				debug!(pointee = %reference.pointee_type(), "kept shared reference unchanged");
				reference.clone()
			}
		}
	}

	pub(crate) fn empty_map(&mut self, key: Type, value: Type) -> MapValue {
		self.stats.filled_maps += 1;
		trace!(key = %key, value = %value, "filled absent mapping");
		MapValue::from_parts(key, value, Some(Vec::new()))
	}

	pub(crate) fn skip_field(&mut self, record: &RecordType, field: &str) {
		self.stats.skipped_fields += 1;
		debug!(record = record.name(), field, "left non-settable field at zero value");
	}
}

/// Zero check over what normalization keeps: non-settable fields are reset on both the
/// clone and the zero-construction path, so they cannot decide between them.
fn settable_zero(record: &RecordValue) -> bool {
	record.fields().all(|(decl, value)| {
		!decl.is_settable()
			|| match value {
				Value::Record(nested) => settable_zero(nested),
				other => other.is_zero(),
			}
	})
}
