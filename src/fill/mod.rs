mod error;
mod normalize;
mod path;
mod schema;
mod ser;
mod shape;
mod value;
mod zero;

/// Error and result aliases.
pub use error::{FillError, Result};
/// Normalization entry points, options, and counters.
pub use normalize::{NormalizeOptions, NormalizeStats, Normalizer, normalize};
/// Field path parser types.
pub use path::{FieldPath, PathStep};
/// Schema declarations.
pub use schema::{FieldDecl, RecordType, ScalarKind, Schema, Type};
/// Structural shape classification.
pub use shape::Shape;
/// Runtime value types.
pub use value::{MapValue, Pointee, RecordValue, RefValue, SeqValue, Value};
/// Zero construction for record types.
pub use zero::zero_record;

#[cfg(test)]
mod test_support;
