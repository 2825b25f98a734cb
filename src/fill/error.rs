use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, FillError>;

/// Errors produced while declaring schemas, building values, and resolving paths.
///
/// Normalization itself never fails; these only surface from the checked builders and
/// from path lookup.
#[derive(Debug, Error)]
pub enum FillError {
	/// Record type declared without a name.
	#[error("record type name must not be empty")]
	EmptyRecordName,
	/// Two fields of one record share a name.
	#[error("duplicate field {field} in record {record}")]
	DuplicateField {
		/// Record type name.
		record: String,
		/// Repeated field name.
		field: String,
	},
	/// Schema already holds a record type with this name.
	#[error("duplicate record type: {name}")]
	DuplicateRecord {
		/// Record type name.
		name: String,
	},
	/// Record type was declared but its fields were never supplied.
	#[error("record type declared but not defined: {name}")]
	RecordNotDefined {
		/// Record type name.
		name: String,
	},
	/// Record contains itself through record-typed fields alone.
	#[error("record {record} contains itself through field {field}")]
	InfiniteRecord {
		/// Record type name.
		record: String,
		/// Field closing the cycle.
		field: String,
	},
	/// Requested record type is not declared in the schema.
	#[error("record type not found: {name}")]
	RecordNotFound {
		/// Requested record type name.
		name: String,
	},
	/// Mapping declared with a non-scalar key type.
	#[error("unsupported map key type {key}")]
	UnsupportedMapKey {
		/// Rendered key type.
		key: String,
	},
	/// Record value built with the wrong number of field values.
	#[error("record {record} expects {expected} fields, got {got}")]
	FieldCountMismatch {
		/// Record type name.
		record: String,
		/// Declared field count.
		expected: usize,
		/// Supplied value count.
		got: usize,
	},
	/// Record has no field with the requested name.
	#[error("field {field} not found on {record}")]
	FieldNotFound {
		/// Record type name.
		record: String,
		/// Requested field name.
		field: String,
	},
	/// Value does not have the static type of its slot.
	#[error("type mismatch at {at}: expected {expected}, got {got}")]
	TypeMismatch {
		/// Slot description (field name, index, or key).
		at: String,
		/// Declared slot type.
		expected: String,
		/// Type of the supplied value.
		got: String,
	},
	/// Mapping built with a repeated key.
	#[error("duplicate map key {key}")]
	DuplicateMapKey {
		/// Rendered key value.
		key: String,
	},
	/// Path expression syntax is invalid.
	#[error("invalid field path: {path}")]
	InvalidFieldPath {
		/// Original path string.
		path: String,
	},
	/// Path step names a missing record field or mapping key.
	#[error("path field not found at step {step}: {field}")]
	PathFieldNotFound {
		/// Zero-based step index.
		step: usize,
		/// Missing field or key.
		field: String,
	},
	/// Path index selector exceeds the sequence length.
	#[error("path index {index} out of range at step {step} (len={len})")]
	PathIndexOutOfRange {
		/// Zero-based step index.
		step: usize,
		/// Requested element index.
		index: usize,
		/// Sequence length.
		len: usize,
	},
	/// Path crossed an absent container.
	#[error("path reached absent {kind} at step {step}")]
	PathAbsent {
		/// Zero-based step index.
		step: usize,
		/// Shape label of the absent container.
		kind: &'static str,
	},
	/// Path step does not apply to the value shape reached.
	#[error("path step {step} cannot descend into {kind}")]
	PathNotTraversable {
		/// Zero-based step index.
		step: usize,
		/// Kind label of the value reached.
		kind: &'static str,
	},
}
