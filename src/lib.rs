//! Typed value graphs and a normalizer that turns absent sequences into empty ones, so
//! encoders emit `[]` rather than `null` for list-typed slots.

/// Schema, runtime values, path lookup, and the absent-sequence normalizer.
pub mod fill;
