use std::sync::Arc;

use crate::fill::{FieldDecl, RecordType, RecordValue, Type, Value};

/// `Point { x: i64 }`
pub(crate) fn point() -> Arc<RecordType> {
	RecordType::new("Point", vec![FieldDecl::new("x", Type::I64)]).expect("Point declares")
}

/// `Tags { list: seq<i64> }`
pub(crate) fn tags() -> Arc<RecordType> {
	RecordType::new("Tags", vec![FieldDecl::new("list", Type::seq(Type::I64))]).expect("Tags declares")
}

/// `Counted { list: seq<i64>, num: i64 }`
pub(crate) fn counted() -> Arc<RecordType> {
	RecordType::new("Counted", vec![FieldDecl::new("list", Type::seq(Type::I64)), FieldDecl::new("num", Type::I64)]).expect("Counted declares")
}

/// `Nest { inner: Tags, many: seq<Tags>, keyed: map<string, Tags> }`
pub(crate) fn nest() -> Arc<RecordType> {
	let tags = Type::Record(tags());
	RecordType::new(
		"Nest",
		vec![
			FieldDecl::new("inner", tags.clone()),
			FieldDecl::new("many", Type::seq(tags.clone())),
			FieldDecl::new("keyed", Type::map(Type::STRING, tags)),
		],
	)
	.expect("Nest declares")
}

/// `Holder { num: ref<i64> }`
pub(crate) fn holder() -> Arc<RecordType> {
	RecordType::new("Holder", vec![FieldDecl::new("num", Type::reference(Type::I64))]).expect("Holder declares")
}

/// `Links { tags: ref<Tags>, list: ref<seq<i64>>, deep: ref<ref<Tags>>, payload: any }`
pub(crate) fn links() -> Arc<RecordType> {
	let tags = Type::Record(tags());
	RecordType::new(
		"Links",
		vec![
			FieldDecl::new("tags", Type::reference(tags.clone())),
			FieldDecl::new("list", Type::reference(Type::seq(Type::I64))),
			FieldDecl::new("deep", Type::reference(Type::reference(tags))),
			FieldDecl::new("payload", Type::Any),
		],
	)
	.expect("Links declares")
}

/// `Secret { list: seq<i64>, hidden: seq<i64> (not settable) }`
pub(crate) fn secret() -> Arc<RecordType> {
	RecordType::new("Secret", vec![FieldDecl::new("list", Type::seq(Type::I64)), FieldDecl::hidden("hidden", Type::seq(Type::I64))])
		.expect("Secret declares")
}

/// `Sealed { pin: i64 (not settable), tags: ref<Tags> }`
pub(crate) fn sealed() -> Arc<RecordType> {
	RecordType::new("Sealed", vec![FieldDecl::hidden("pin", Type::I64), FieldDecl::new("tags", Type::reference(Type::Record(tags())))])
		.expect("Sealed declares")
}

/// `Comment { body: string, replies: seq<Comment> }`
pub(crate) fn comment() -> Arc<RecordType> {
	let comment = RecordType::declare("Comment").expect("Comment declares");
	comment
		.define(vec![FieldDecl::new("body", Type::STRING), FieldDecl::new("replies", Type::seq(Type::Record(comment.clone())))])
		.expect("Comment defines");
	comment
}

/// `Node { value: i64, next: ref<Node> }`
pub(crate) fn node() -> Arc<RecordType> {
	let node = RecordType::declare("Node").expect("Node declares");
	node.define(vec![FieldDecl::new("value", Type::I64), FieldDecl::new("next", Type::reference(Type::Record(node.clone())))])
		.expect("Node defines");
	node
}

pub(crate) fn ints(items: &[i64]) -> Value {
	Value::seq(Type::I64, items.iter().copied().map(Value::I64).collect()).expect("int sequence builds")
}

pub(crate) fn tags_with(list: Value) -> RecordValue {
	RecordValue::zeroed(tags()).with("list", list).expect("Tags.list accepts sequence")
}

/// Assert `value` is a present, empty sequence.
pub(crate) fn assert_present_empty(value: &Value) {
	let seq = value.as_seq().expect("value is a sequence");
	assert!(!seq.is_absent(), "sequence should be present");
	assert_eq!(seq.len(), 0, "sequence should be empty");
}
