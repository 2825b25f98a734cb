use std::sync::Arc;

use tracing::trace;

use crate::fill::value::{Pointee, RecordValue, RefValue, SeqValue};
use crate::fill::{FieldDecl, Normalizer, RecordType, Type, Value};

/// Zero-valued instance of `ty` with its composite fields materialized.
///
/// Sequence fields are present and empty, nested record fields are built the same way,
/// and reference fields point at a zero-constructed record, sequence, or reference.
/// A reference back to a record being built stays absent, so recursive types terminate.
pub fn zero_record(ty: &Arc<RecordType>) -> RecordValue {
	Normalizer::default().zero_record(ty)
}

impl Normalizer {
	pub(crate) fn zero_record(&mut self, ty: &Arc<RecordType>) -> RecordValue {
		self.stats.zero_records += 1;
		self.building.push(Arc::clone(ty));

		let mut values = Vec::with_capacity(ty.fields().len());
		for decl in ty.fields() {
			values.push(self.zero_field(ty, decl));
		}

		self.building.pop();
		RecordValue::from_parts(Arc::clone(ty), values)
	}

	fn zero_field(&mut self, record: &RecordType, decl: &FieldDecl) -> Value {
		if !decl.is_settable() {
			self.skip_field(record, &decl.name);
			return Value::zero(&decl.ty);
		}

		match &decl.ty {
			Type::Record(inner) => Value::Record(self.zero_record(inner)),
			Type::Seq(_) => Value::Seq(self.empty_seq(&decl.ty)),
			Type::Ref(_) if self.opt.materialize_zero_refs => Value::Ref(self.zero_ref(&decl.ty)),
			Type::Map { key, value } if self.opt.fill_absent_maps => Value::Map(self.empty_map((**key).clone(), (**value).clone())),
			other => Value::zero(other),
		}
	}

	/// Present empty sequence for a sequence type.
	///
	/// # Panics
	///
	/// Panics if `ty` is not a sequence type.
	pub(crate) fn empty_seq(&mut self, ty: &Type) -> SeqValue {
		let Type::Seq(elem) = ty else {
			panic!("empty_seq requires a sequence type, got {ty}");
		};

		self.stats.filled_sequences += 1;
		trace!(elem = %elem, "constructed empty sequence");
		SeqValue::empty((**elem).clone())
	}

	/// Reference for a reference type, materialized when the pointee has composite
	/// structure to construct. Scalar, mapping, and holder pointees stay absent, as does a
	/// record pointee already under construction further up.
	///
	/// # Panics
	///
	/// Panics if `ty` is not a reference type.
	pub(crate) fn zero_ref(&mut self, ty: &Type) -> RefValue {
		let Type::Ref(pointee) = ty else {
			panic!("zero_ref requires a reference type, got {ty}");
		};

		let target = match pointee.as_ref() {
			Type::Record(inner) if self.building.iter().any(|open| Arc::ptr_eq(open, inner)) => {
				trace!(record = inner.name(), "left recursive reference absent");
				return RefValue::absent((**pointee).clone());
			}
			Type::Record(inner) => Value::Record(self.zero_record(inner)),
			Type::Seq(_) => Value::Seq(self.empty_seq(pointee)),
			Type::Ref(_) => Value::Ref(self.zero_ref(pointee)),
			Type::Scalar(_) | Type::Map { .. } | Type::Any => return RefValue::absent((**pointee).clone()),
		};

		self.stats.materialized_refs += 1;
		trace!(pointee = %pointee, "materialized reference field");
		RefValue::from_parts((**pointee).clone(), Some(Pointee::Owned(Box::new(target))))
	}
}
