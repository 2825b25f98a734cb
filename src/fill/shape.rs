/// Structural category that drives normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
	/// Leaf value (`bool`, integers, floats, strings).
	Scalar,
	/// Named record with ordered typed fields.
	Record,
	/// Ordered list that may be absent.
	Sequence,
	/// Key/value mapping that may be absent.
	Mapping,
	/// Optional owned or shared reference.
	Reference,
	/// Polymorphic `any` holder.
	Holder,
}

impl Shape {
	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Scalar => "scalar",
			Self::Record => "record",
			Self::Sequence => "sequence",
			Self::Mapping => "mapping",
			Self::Reference => "reference",
			Self::Holder => "holder",
		}
	}

	/// Whether values of this shape contain other values.
	pub fn is_composite(self) -> bool {
		!matches!(self, Self::Scalar)
	}
}
