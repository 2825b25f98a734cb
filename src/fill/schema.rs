use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::fill::{FillError, Result, Shape};

/// Leaf value kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
	/// Boolean.
	Bool,
	/// Signed 64-bit integer.
	I64,
	/// Unsigned 64-bit integer.
	U64,
	/// 64-bit float.
	F64,
	/// UTF-8 string.
	String,
}

impl ScalarKind {
	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Bool => "bool",
			Self::I64 => "i64",
			Self::U64 => "u64",
			Self::F64 => "f64",
			Self::String => "string",
		}
	}
}

/// Static type of a slot in a value graph.
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
	/// Leaf value.
	Scalar(ScalarKind),
	/// Named record type.
	Record(Arc<RecordType>),
	/// Sequence of the element type.
	Seq(Box<Type>),
	/// Mapping from scalar keys to values.
	Map {
		/// Key type, always scalar.
		key: Box<Type>,
		/// Value type.
		value: Box<Type>,
	},
	/// Optional reference to the pointee type.
	Ref(Box<Type>),
	/// Polymorphic holder of any concrete value.
	Any,
}

impl Type {
	/// Boolean scalar type.
	pub const BOOL: Type = Type::Scalar(ScalarKind::Bool);
	/// Signed integer scalar type.
	pub const I64: Type = Type::Scalar(ScalarKind::I64);
	/// Unsigned integer scalar type.
	pub const U64: Type = Type::Scalar(ScalarKind::U64);
	/// Float scalar type.
	pub const F64: Type = Type::Scalar(ScalarKind::F64);
	/// String scalar type.
	pub const STRING: Type = Type::Scalar(ScalarKind::String);

	/// Sequence of `elem`.
	pub fn seq(elem: Type) -> Self {
		Self::Seq(Box::new(elem))
	}

	/// Mapping from `key` to `value`.
	pub fn map(key: Type, value: Type) -> Self {
		Self::Map {
			key: Box::new(key),
			value: Box::new(value),
		}
	}

	/// Optional reference to `pointee`.
	pub fn reference(pointee: Type) -> Self {
		Self::Ref(Box::new(pointee))
	}

	/// Structural shape of values of this type.
	pub fn shape(&self) -> Shape {
		match self {
			Self::Scalar(_) => Shape::Scalar,
			Self::Record(_) => Shape::Record,
			Self::Seq(_) => Shape::Sequence,
			Self::Map { .. } => Shape::Mapping,
			Self::Ref(_) => Shape::Reference,
			Self::Any => Shape::Holder,
		}
	}

	/// Element type of a sequence.
	pub fn elem(&self) -> Option<&Type> {
		match self {
			Self::Seq(elem) => Some(elem),
			_ => None,
		}
	}

	/// Pointee type of a reference.
	pub fn pointee(&self) -> Option<&Type> {
		match self {
			Self::Ref(pointee) => Some(pointee),
			_ => None,
		}
	}

	/// Reject mappings keyed by non-scalar types anywhere below this type.
	///
	/// Record types are validated when declared, so they are not descended into.
	pub(crate) fn validate(&self) -> Result<()> {
		match self {
			Self::Seq(elem) => elem.validate(),
			Self::Ref(pointee) => pointee.validate(),
			Self::Map { key, value } => {
				if !matches!(**key, Self::Scalar(_)) {
					return Err(FillError::UnsupportedMapKey { key: key.to_string() });
				}
				value.validate()
			}
			Self::Scalar(_) | Self::Record(_) | Self::Any => Ok(()),
		}
	}
}

impl fmt::Display for Type {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Scalar(kind) => f.write_str(kind.as_str()),
			Self::Record(record) => f.write_str(record.name()),
			Self::Seq(elem) => write!(f, "seq<{elem}>"),
			Self::Map { key, value } => write!(f, "map<{key}, {value}>"),
			Self::Ref(pointee) => write!(f, "ref<{pointee}>"),
			Self::Any => f.write_str("any"),
		}
	}
}

/// One field declaration of a record type.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
	/// Field identifier.
	pub name: Box<str>,
	/// Static field type.
	pub ty: Type,
	/// Whether the normalizer may assign this field.
	pub settable: bool,
}

impl FieldDecl {
	/// Externally settable field.
	pub fn new(name: &str, ty: Type) -> Self {
		Self {
			name: name.into(),
			ty,
			settable: true,
		}
	}

	/// Field the normalizer must not assign; it keeps its zero value.
	pub fn hidden(name: &str, ty: Type) -> Self {
		Self {
			name: name.into(),
			ty,
			settable: false,
		}
	}

	/// Capability query used before every assignment.
	pub fn is_settable(&self) -> bool {
		self.settable
	}
}

/// Named record type with fields in declaration order.
///
/// A record is either built complete with [`RecordType::new`], or declared first with
/// [`RecordType::declare`] and given its fields later with [`RecordType::define`], so
/// field types can refer back to it (`Node { next: ref<Node> }`). Such records form a
/// reference cycle and live as long as the program does.
pub struct RecordType {
	name: Box<str>,
	fields: OnceLock<Vec<FieldDecl>>,
}

impl RecordType {
	/// Declare a record type, validating names and map key types.
	pub fn new(name: &str, fields: Vec<FieldDecl>) -> Result<Arc<Self>> {
		let record = Self::declare(name)?;
		record.define(fields)?;
		Ok(record)
	}

	/// Declare a record type whose fields are supplied later.
	pub fn declare(name: &str) -> Result<Arc<Self>> {
		if name.is_empty() {
			return Err(FillError::EmptyRecordName);
		}
		Ok(Arc::new(Self {
			name: name.into(),
			fields: OnceLock::new(),
		}))
	}

	/// Supply the fields of a declared record type.
	pub fn define(self: &Arc<Self>, fields: Vec<FieldDecl>) -> Result<()> {
		if self.is_defined() {
			return Err(FillError::DuplicateRecord { name: self.name.to_string() });
		}

		for (idx, field) in fields.iter().enumerate() {
			if fields[..idx].iter().any(|prev| prev.name == field.name) {
				return Err(FillError::DuplicateField {
					record: self.name.to_string(),
					field: field.name.to_string(),
				});
			}
			field.ty.validate()?;
			if matches!(&field.ty, Type::Record(inner) if contains_directly(inner, self)) {
				return Err(FillError::InfiniteRecord {
					record: self.name.to_string(),
					field: field.name.to_string(),
				});
			}
		}

		self.fields
			.set(fields)
			.map_err(|_| FillError::DuplicateRecord { name: self.name.to_string() })
	}

	/// Record type name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Whether the fields have been supplied.
	pub fn is_defined(&self) -> bool {
		self.fields.get().is_some()
	}

	/// Field declarations in order; empty until defined.
	pub fn fields(&self) -> &[FieldDecl] {
		self.fields.get().map_or(&[], Vec::as_slice)
	}

	/// Look up a field and its position by name.
	pub fn field(&self, name: &str) -> Option<(usize, &FieldDecl)> {
		self.fields().iter().enumerate().find(|(_, field)| field.name.as_ref() == name)
	}
}

/// Records nested in records are compared by name, which keeps recursive types finite.
impl PartialEq for RecordType {
	fn eq(&self, other: &Self) -> bool {
		if std::ptr::eq(self, other) {
			return true;
		}
		self.name == other.name
			&& self.fields().len() == other.fields().len()
			&& self
				.fields()
				.iter()
				.zip(other.fields())
				.all(|(lhs, rhs)| lhs.name == rhs.name && lhs.settable == rhs.settable && nominal_eq(&lhs.ty, &rhs.ty))
	}
}

impl fmt::Debug for RecordType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RecordType")
			.field("name", &self.name)
			.field("fields", &FieldTypes(self.fields()))
			.finish()
	}
}

/// Renders field types by name so recursive records print finitely.
struct FieldTypes<'a>(&'a [FieldDecl]);

impl fmt::Debug for FieldTypes<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_map()
			.entries(self.0.iter().map(|field| (field.name.as_ref(), field.ty.to_string())))
			.finish()
	}
}

fn nominal_eq(lhs: &Type, rhs: &Type) -> bool {
	match (lhs, rhs) {
		(Type::Record(lhs), Type::Record(rhs)) => Arc::ptr_eq(lhs, rhs) || lhs.name == rhs.name,
		(Type::Seq(lhs), Type::Seq(rhs)) | (Type::Ref(lhs), Type::Ref(rhs)) => nominal_eq(lhs, rhs),
		(Type::Map { key: lk, value: lv }, Type::Map { key: rk, value: rv }) => lk == rk && nominal_eq(lv, rv),
		_ => lhs == rhs,
	}
}

/// Whether `record` reaches `target` through record-typed fields alone, which would make
/// `target` infinitely large. Sequences, mappings, references and holders break the chain.
fn contains_directly(record: &Arc<RecordType>, target: &Arc<RecordType>) -> bool {
	if Arc::ptr_eq(record, target) {
		return true;
	}
	record.fields().iter().any(|field| match &field.ty {
		Type::Record(inner) => contains_directly(inner, target),
		_ => false,
	})
}

/// Registry of named record types.
#[derive(Debug, Default)]
pub struct Schema {
	records: Vec<Arc<RecordType>>,
	by_name: HashMap<Box<str>, usize>,
}

impl Schema {
	/// Empty schema.
	pub fn new() -> Self {
		Self::default()
	}

	/// Declare a record type by name so other field types can refer to it before it is
	/// defined. Declaring an existing name returns the registered type.
	pub fn declare(&mut self, name: &str) -> Result<Arc<RecordType>> {
		if let Some(idx) = self.by_name.get(name) {
			return Ok(Arc::clone(&self.records[*idx]));
		}

		let record = RecordType::declare(name)?;
		self.by_name.insert(name.into(), self.records.len());
		self.records.push(Arc::clone(&record));
		Ok(record)
	}

	/// Define a record type, completing an earlier declaration of the same name.
	pub fn define(&mut self, name: &str, fields: Vec<FieldDecl>) -> Result<Arc<RecordType>> {
		let record = self.declare(name)?;
		record.define(fields)?;
		Ok(record)
	}

	/// Check that every declared record type has been defined.
	pub fn check_defined(&self) -> Result<()> {
		match self.records.iter().find(|record| !record.is_defined()) {
			Some(record) => Err(FillError::RecordNotDefined { name: record.name().to_owned() }),
			None => Ok(()),
		}
	}

	/// Look up a registered record type.
	pub fn record(&self, name: &str) -> Result<Arc<RecordType>> {
		self.by_name
			.get(name)
			.map(|idx| Arc::clone(&self.records[*idx]))
			.ok_or_else(|| FillError::RecordNotFound { name: name.to_owned() })
	}

	/// Slot type for a registered record.
	pub fn record_type(&self, name: &str) -> Result<Type> {
		self.record(name).map(Type::Record)
	}

	/// Registered record types in declaration order.
	pub fn records(&self) -> impl Iterator<Item = &Arc<RecordType>> {
		self.records.iter()
	}

	/// Number of registered record types.
	pub fn len(&self) -> usize {
		self.records.len()
	}

	/// Whether no record type is registered.
	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}
}
