use crate::fill::test_support::{ints, nest, tags, tags_with};
use crate::fill::{FieldPath, FillError, PathStep, RecordValue, Type, Value};

#[test]
fn parses_fields_and_indices() {
	let path = FieldPath::parse("many[1].list[0]").expect("path parses");
	assert_eq!(
		path.steps,
		vec![PathStep::Field("many".into()), PathStep::Index(1), PathStep::Field("list".into()), PathStep::Index(0)]
	);
}

#[test]
fn parses_leading_index() {
	let path = FieldPath::parse("[2][0].name").expect("path parses");
	assert_eq!(path.steps, vec![PathStep::Index(2), PathStep::Index(0), PathStep::Field("name".into())]);
}

#[test]
fn rejects_malformed_paths() {
	for input in ["", "a.", ".a", "a..b", "a[", "a[]", "a[x]", "a[1]b", "a.[0]", "a-b"] {
		let err = FieldPath::parse(input).expect_err("malformed path should fail");
		assert!(matches!(err, FillError::InvalidFieldPath { ref path } if path == input), "unexpected error for {input:?}");
	}
}

#[test]
fn resolves_through_records_sequences_and_maps() {
	let keyed = Value::map(Type::STRING, Type::Record(tags()), vec![(Value::string("k"), tags_with(ints(&[7])).into())]).expect("map builds");
	let many = Value::seq(Type::Record(tags()), vec![tags_with(ints(&[1, 2])).into()]).expect("seq builds");
	let value: Value = RecordValue::zeroed(nest())
		.with("keyed", keyed)
		.and_then(|record| record.with("many", many))
		.expect("fields accept")
		.into();

	assert_eq!(value.lookup_str("many[0].list[1]").expect("resolves"), &Value::I64(2));
	assert_eq!(value.lookup_str("keyed.k.list[0]").expect("resolves"), &Value::I64(7));
}

#[test]
fn resolves_through_references_and_holders() {
	let inner = Value::any(Value::owned_ref(Type::Record(tags()), tags_with(ints(&[9])).into()).expect("ref builds"));
	assert_eq!(inner.lookup_str("list[0]").expect("resolves"), &Value::I64(9));
}

#[test]
fn reports_lookup_failures() {
	let value: Value = RecordValue::zeroed(nest()).into();

	let err = value.lookup_str("nope").expect_err("missing field should fail");
	assert!(matches!(err, FillError::PathFieldNotFound { step: 0, .. }));

	let err = value.lookup_str("many[0]").expect_err("absent sequence should fail");
	assert!(matches!(err, FillError::PathAbsent { step: 1, kind: "sequence" }));

	let err = value.lookup_str("keyed.k").expect_err("absent map should fail");
	assert!(matches!(err, FillError::PathAbsent { step: 1, kind: "mapping" }));

	let err = value.lookup_str("inner.list.x").expect_err("field on sequence should fail");
	assert!(matches!(err, FillError::PathNotTraversable { step: 2, kind: "seq" }));

	let err = ints(&[1]).lookup_str("[3]").expect_err("index past end should fail");
	assert!(matches!(err, FillError::PathIndexOutOfRange { index: 3, len: 1, .. }));

	let err = Value::NONE.lookup_str("a").expect_err("absent holder should fail");
	assert!(matches!(err, FillError::PathAbsent { step: 0, kind: "holder" }));
}
