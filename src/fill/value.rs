use std::sync::Arc;

use crate::fill::{FieldDecl, FillError, RecordType, Result, ScalarKind, Shape, Type};

/// Runtime value typed by the schema.
///
/// Sequences, mappings, references and holders each carry an explicit absent state,
/// which is what [`normalize`](crate::fill::normalize) rewrites for sequences.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	Bool(bool),
	I64(i64),
	U64(u64),
	F64(f64),
	String(Box<str>),
	Record(RecordValue),
	Seq(SeqValue),
	Map(MapValue),
	Ref(RefValue),
	/// `Any(None)` is the no-value sentinel.
	Any(Option<Box<Value>>),
}

impl Value {
	/// The no-value sentinel.
	pub const NONE: Value = Value::Any(None);

	/// String scalar from a borrowed str.
	pub fn string(value: &str) -> Self {
		Self::String(value.into())
	}

	/// Holder containing `value`.
	pub fn any(value: Value) -> Self {
		Self::Any(Some(Box::new(value)))
	}

	/// Absent sequence of `elem`.
	pub fn absent_seq(elem: Type) -> Self {
		Self::Seq(SeqValue::absent(elem))
	}

	/// Present sequence of `elem`, checking every item.
	pub fn seq(elem: Type, items: Vec<Value>) -> Result<Self> {
		SeqValue::new(elem, items).map(Self::Seq)
	}

	/// Absent mapping.
	pub fn absent_map(key: Type, value: Type) -> Self {
		Self::Map(MapValue::absent(key, value))
	}

	/// Present mapping, checking keys and values.
	pub fn map(key: Type, value: Type, entries: Vec<(Value, Value)>) -> Result<Self> {
		MapValue::new(key, value, entries).map(Self::Map)
	}

	/// Absent reference to `pointee`.
	pub fn absent_ref(pointee: Type) -> Self {
		Self::Ref(RefValue::absent(pointee))
	}

	/// Present owned reference.
	pub fn owned_ref(pointee: Type, value: Value) -> Result<Self> {
		RefValue::owned(pointee, value).map(Self::Ref)
	}

	/// Language-default zero value of `ty`.
	pub fn zero(ty: &Type) -> Self {
		match ty {
			Type::Scalar(ScalarKind::Bool) => Self::Bool(false),
			Type::Scalar(ScalarKind::I64) => Self::I64(0),
			Type::Scalar(ScalarKind::U64) => Self::U64(0),
			Type::Scalar(ScalarKind::F64) => Self::F64(0.0),
			Type::Scalar(ScalarKind::String) => Self::String("".into()),
			Type::Record(record) => Self::Record(RecordValue::zeroed(Arc::clone(record))),
			Type::Seq(elem) => Self::absent_seq((**elem).clone()),
			Type::Map { key, value } => Self::absent_map((**key).clone(), (**value).clone()),
			Type::Ref(pointee) => Self::absent_ref((**pointee).clone()),
			Type::Any => Self::NONE,
		}
	}

	/// Structural shape of this value.
	pub fn shape(&self) -> Shape {
		match self {
			Self::Bool(_) | Self::I64(_) | Self::U64(_) | Self::F64(_) | Self::String(_) => Shape::Scalar,
			Self::Record(_) => Shape::Record,
			Self::Seq(_) => Shape::Sequence,
			Self::Map(_) => Shape::Mapping,
			Self::Ref(_) => Shape::Reference,
			Self::Any(_) => Shape::Holder,
		}
	}

	/// Short label of the value kind.
	pub fn kind_name(&self) -> &'static str {
		match self {
			Self::Bool(_) => "bool",
			Self::I64(_) => "i64",
			Self::U64(_) => "u64",
			Self::F64(_) => "f64",
			Self::String(_) => "string",
			Self::Record(_) => "record",
			Self::Seq(_) => "seq",
			Self::Map(_) => "map",
			Self::Ref(_) => "ref",
			Self::Any(_) => "any",
		}
	}

	/// Static type of this value. Holders report `any`, not their content.
	pub fn type_of(&self) -> Type {
		match self {
			Self::Bool(_) => Type::BOOL,
			Self::I64(_) => Type::I64,
			Self::U64(_) => Type::U64,
			Self::F64(_) => Type::F64,
			Self::String(_) => Type::STRING,
			Self::Record(record) => Type::Record(Arc::clone(&record.ty)),
			Self::Seq(seq) => Type::seq(seq.elem.clone()),
			Self::Map(map) => Type::map(map.key.clone(), map.value.clone()),
			Self::Ref(reference) => Type::reference(reference.pointee.clone()),
			Self::Any(_) => Type::Any,
		}
	}

	/// Whether this value can occupy a slot of type `ty`.
	pub fn has_type(&self, ty: &Type) -> bool {
		match (self, ty) {
			(Self::Bool(_), Type::Scalar(ScalarKind::Bool))
			| (Self::I64(_), Type::Scalar(ScalarKind::I64))
			| (Self::U64(_), Type::Scalar(ScalarKind::U64))
			| (Self::F64(_), Type::Scalar(ScalarKind::F64))
			| (Self::String(_), Type::Scalar(ScalarKind::String))
			| (Self::Any(_), Type::Any) => true,
			(Self::Record(record), Type::Record(expected)) => Arc::ptr_eq(&record.ty, expected) || *record.ty == **expected,
			(Self::Seq(seq), Type::Seq(elem)) => seq.elem == **elem,
			(Self::Map(map), Type::Map { key, value }) => map.key == **key && map.value == **value,
			(Self::Ref(reference), Type::Ref(pointee)) => reference.pointee == **pointee,
			_ => false,
		}
	}

	/// Check that this value can occupy a slot of type `ty`.
	pub fn conforms_to(&self, ty: &Type) -> Result<()> {
		check_slot(self, ty, || "value".to_owned())
	}

	/// Whether this value equals its type's zero value.
	///
	/// A present empty sequence is not zero, and neither is `-0.0`.
	pub fn is_zero(&self) -> bool {
		match self {
			Self::Bool(value) => !value,
			Self::I64(value) => *value == 0,
			Self::U64(value) => *value == 0,
			Self::F64(value) => value.to_bits() == 0,
			Self::String(value) => value.is_empty(),
			Self::Record(record) => record.is_zero(),
			Self::Seq(seq) => seq.is_absent(),
			Self::Map(map) => map.is_absent(),
			Self::Ref(reference) => reference.is_absent(),
			Self::Any(inner) => inner.is_none(),
		}
	}

	/// Whether this is an absent sequence, mapping, reference, or holder.
	pub fn is_absent(&self) -> bool {
		match self {
			Self::Seq(seq) => seq.is_absent(),
			Self::Map(map) => map.is_absent(),
			Self::Ref(reference) => reference.is_absent(),
			Self::Any(inner) => inner.is_none(),
			_ => false,
		}
	}

	/// Value contained in a present holder.
	pub fn held(&self) -> Option<&Value> {
		match self {
			Self::Any(Some(inner)) => Some(inner),
			_ => None,
		}
	}
}

#[allow(missing_docs)]
impl Value {
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Self::Bool(value) => Some(*value),
			_ => None,
		}
	}

	pub fn as_i64(&self) -> Option<i64> {
		match self {
			Self::I64(value) => Some(*value),
			_ => None,
		}
	}

	pub fn as_u64(&self) -> Option<u64> {
		match self {
			Self::U64(value) => Some(*value),
			_ => None,
		}
	}

	pub fn as_f64(&self) -> Option<f64> {
		match self {
			Self::F64(value) => Some(*value),
			_ => None,
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(value) => Some(value),
			_ => None,
		}
	}

	pub fn as_record(&self) -> Option<&RecordValue> {
		match self {
			Self::Record(record) => Some(record),
			_ => None,
		}
	}

	pub fn as_seq(&self) -> Option<&SeqValue> {
		match self {
			Self::Seq(seq) => Some(seq),
			_ => None,
		}
	}

	pub fn as_map(&self) -> Option<&MapValue> {
		match self {
			Self::Map(map) => Some(map),
			_ => None,
		}
	}

	pub fn as_reference(&self) -> Option<&RefValue> {
		match self {
			Self::Ref(reference) => Some(reference),
			_ => None,
		}
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Self::I64(value)
	}
}

impl From<u64> for Value {
	fn from(value: u64) -> Self {
		Self::U64(value)
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Self::F64(value)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::string(value)
	}
}

impl From<RecordValue> for Value {
	fn from(value: RecordValue) -> Self {
		Self::Record(value)
	}
}

/// Record instance with one value per declared field.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordValue {
	ty: Arc<RecordType>,
	values: Vec<Value>,
}

impl RecordValue {
	/// Build a record, checking field count and field types.
	pub fn new(ty: Arc<RecordType>, values: Vec<Value>) -> Result<Self> {
		if values.len() != ty.fields().len() {
			return Err(FillError::FieldCountMismatch {
				record: ty.name().to_owned(),
				expected: ty.fields().len(),
				got: values.len(),
			});
		}

		for (decl, value) in ty.fields().iter().zip(&values) {
			check_slot(value, &decl.ty, || format!("{}.{}", ty.name(), decl.name))?;
		}

		Ok(Self { ty, values })
	}

	/// Language-default record: every field at its zero value.
	pub fn zeroed(ty: Arc<RecordType>) -> Self {
		let values = ty.fields().iter().map(|decl| Value::zero(&decl.ty)).collect();
		Self { ty, values }
	}

	/// Replace one field by name.
	pub fn with(mut self, name: &str, value: Value) -> Result<Self> {
		let Some((idx, decl)) = self.ty.field(name) else {
			return Err(FillError::FieldNotFound {
				record: self.ty.name().to_owned(),
				field: name.to_owned(),
			});
		};

		check_slot(&value, &decl.ty, || format!("{}.{}", self.ty.name(), decl.name))?;
		self.values[idx] = value;
		Ok(self)
	}

	pub(crate) fn from_parts(ty: Arc<RecordType>, values: Vec<Value>) -> Self {
		debug_assert_eq!(ty.fields().len(), values.len());
		Self { ty, values }
	}

	/// Record type.
	pub fn ty(&self) -> &Arc<RecordType> {
		&self.ty
	}

	/// Record type name.
	pub fn type_name(&self) -> &str {
		self.ty.name()
	}

	/// Field values in declaration order.
	pub fn values(&self) -> &[Value] {
		&self.values
	}

	/// Field declarations paired with their values.
	pub fn fields(&self) -> impl Iterator<Item = (&FieldDecl, &Value)> {
		self.ty.fields().iter().zip(&self.values)
	}

	/// Field value by name.
	pub fn get(&self, name: &str) -> Option<&Value> {
		self.ty.field(name).map(|(idx, _)| &self.values[idx])
	}

	/// Whether every field is at its zero value.
	pub fn is_zero(&self) -> bool {
		self.values.iter().all(Value::is_zero)
	}
}

/// Sequence with an element type and optional storage.
#[derive(Debug, Clone, PartialEq)]
pub struct SeqValue {
	elem: Type,
	items: Option<Vec<Value>>,
}

impl SeqValue {
	/// Sequence without storage.
	pub fn absent(elem: Type) -> Self {
		Self { elem, items: None }
	}

	/// Present sequence with no elements.
	pub fn empty(elem: Type) -> Self {
		Self {
			elem,
			items: Some(Vec::new()),
		}
	}

	/// Present sequence, checking every item against `elem`.
	pub fn new(elem: Type, items: Vec<Value>) -> Result<Self> {
		elem.validate()?;
		for (idx, item) in items.iter().enumerate() {
			check_slot(item, &elem, || format!("[{idx}]"))?;
		}
		Ok(Self { elem, items: Some(items) })
	}

	pub(crate) fn from_parts(elem: Type, items: Option<Vec<Value>>) -> Self {
		Self { elem, items }
	}

	/// Element type.
	pub fn elem(&self) -> &Type {
		&self.elem
	}

	/// Items, or `None` when absent.
	pub fn items(&self) -> Option<&[Value]> {
		self.items.as_deref()
	}

	/// Whether the sequence has no storage.
	pub fn is_absent(&self) -> bool {
		self.items.is_none()
	}

	/// Element count; absent sequences have none.
	pub fn len(&self) -> usize {
		self.items.as_ref().map_or(0, Vec::len)
	}

	/// Whether there are no elements, absent or not.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Reserved storage; absent sequences have none.
	pub fn capacity(&self) -> usize {
		self.items.as_ref().map_or(0, Vec::capacity)
	}

	/// Element by index.
	pub fn get(&self, idx: usize) -> Option<&Value> {
		self.items.as_ref().and_then(|items| items.get(idx))
	}
}

/// Mapping from scalar keys to values, with optional storage.
///
/// Entries keep insertion order; equality ignores it.
#[derive(Debug, Clone)]
pub struct MapValue {
	key: Type,
	value: Type,
	entries: Option<Vec<(Value, Value)>>,
}

impl MapValue {
	/// Mapping without storage.
	pub fn absent(key: Type, value: Type) -> Self {
		Self { key, value, entries: None }
	}

	/// Present mapping, checking key type, entry types, and key uniqueness.
	pub fn new(key: Type, value: Type, entries: Vec<(Value, Value)>) -> Result<Self> {
		if !matches!(key, Type::Scalar(_)) {
			return Err(FillError::UnsupportedMapKey { key: key.to_string() });
		}
		value.validate()?;

		for (idx, (entry_key, entry_value)) in entries.iter().enumerate() {
			check_slot(entry_key, &key, || format!("key #{idx}"))?;
			check_slot(entry_value, &value, || format!("[{}]", render_key(entry_key)))?;
			if entries[..idx].iter().any(|(prev, _)| prev == entry_key) {
				return Err(FillError::DuplicateMapKey { key: render_key(entry_key) });
			}
		}

		Ok(Self {
			key,
			value,
			entries: Some(entries),
		})
	}

	pub(crate) fn from_parts(key: Type, value: Type, entries: Option<Vec<(Value, Value)>>) -> Self {
		Self { key, value, entries }
	}

	/// Key type.
	pub fn key_type(&self) -> &Type {
		&self.key
	}

	/// Value type.
	pub fn value_type(&self) -> &Type {
		&self.value
	}

	/// Entries, or `None` when absent.
	pub fn entries(&self) -> Option<&[(Value, Value)]> {
		self.entries.as_deref()
	}

	/// Whether the mapping has no storage.
	pub fn is_absent(&self) -> bool {
		self.entries.is_none()
	}

	/// Entry count; absent mappings have none.
	pub fn len(&self) -> usize {
		self.entries.as_ref().map_or(0, Vec::len)
	}

	/// Whether there are no entries, absent or not.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Value stored under `key`.
	pub fn get(&self, key: &Value) -> Option<&Value> {
		self.entries()?.iter().find(|(entry_key, _)| entry_key == key).map(|(_, value)| value)
	}

	/// Value stored under a string key.
	pub fn get_str(&self, key: &str) -> Option<&Value> {
		self.entries()?
			.iter()
			.find(|(entry_key, _)| entry_key.as_str() == Some(key))
			.map(|(_, value)| value)
	}
}

impl PartialEq for MapValue {
	fn eq(&self, other: &Self) -> bool {
		if self.key != other.key || self.value != other.value {
			return false;
		}
		match (&self.entries, &other.entries) {
			(None, None) => true,
			(Some(lhs), Some(rhs)) => lhs.len() == rhs.len() && lhs.iter().all(|(key, value)| other.get(key) == Some(value)),
			_ => false,
		}
	}
}

/// Target of a present reference.
#[derive(Debug, Clone)]
pub enum Pointee {
	/// Exclusively owned target; normalization rebuilds it behind a new reference.
	Owned(Box<Value>),
	/// Shared target that cannot be rebound; normalization keeps the reference as is.
	Shared(Arc<Value>),
}

impl Pointee {
	/// Target value.
	pub fn get(&self) -> &Value {
		match self {
			Self::Owned(value) => value,
			Self::Shared(value) => value,
		}
	}

	/// Whether the target can be rebuilt behind a new reference.
	pub fn is_addressable(&self) -> bool {
		matches!(self, Self::Owned(_))
	}
}

impl PartialEq for Pointee {
	fn eq(&self, other: &Self) -> bool {
		self.get() == other.get()
	}
}

/// Optional reference with a pointee type.
#[derive(Debug, Clone, PartialEq)]
pub struct RefValue {
	pointee: Type,
	target: Option<Pointee>,
}

impl RefValue {
	/// Reference without a target.
	pub fn absent(pointee: Type) -> Self {
		Self { pointee, target: None }
	}

	/// Reference owning its target.
	pub fn owned(pointee: Type, value: Value) -> Result<Self> {
		check_slot(&value, &pointee, || "*ref".to_owned())?;
		Ok(Self {
			pointee,
			target: Some(Pointee::Owned(Box::new(value))),
		})
	}

	/// Reference to a shared, non-addressable target.
	pub fn shared(pointee: Type, value: Arc<Value>) -> Result<Self> {
		check_slot(&value, &pointee, || "*ref".to_owned())?;
		Ok(Self {
			pointee,
			target: Some(Pointee::Shared(value)),
		})
	}

	pub(crate) fn from_parts(pointee: Type, target: Option<Pointee>) -> Self {
		Self { pointee, target }
	}

	/// Pointee type.
	pub fn pointee_type(&self) -> &Type {
		&self.pointee
	}

	/// Target value, or `None` when absent.
	pub fn target(&self) -> Option<&Value> {
		self.target.as_ref().map(Pointee::get)
	}

	/// Target with its ownership mode.
	pub fn pointee(&self) -> Option<&Pointee> {
		self.target.as_ref()
	}

	/// Whether the reference has no target.
	pub fn is_absent(&self) -> bool {
		self.target.is_none()
	}

	/// Whether the target is present and owned.
	pub fn is_addressable(&self) -> bool {
		self.target.as_ref().is_some_and(Pointee::is_addressable)
	}
}

fn check_slot(value: &Value, ty: &Type, at: impl FnOnce() -> String) -> Result<()> {
	if value.has_type(ty) {
		return Ok(());
	}
	Err(FillError::TypeMismatch {
		at: at(),
		expected: ty.to_string(),
		got: value.type_of().to_string(),
	})
}

fn render_key(key: &Value) -> String {
	match key {
		Value::Bool(value) => value.to_string(),
		Value::I64(value) => value.to_string(),
		Value::U64(value) => value.to_string(),
		Value::F64(value) => value.to_string(),
		Value::String(value) => value.to_string(),
		other => other.kind_name().to_owned(),
	}
}
