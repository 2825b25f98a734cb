use crate::fill::{FillError, Result, Value};

/// One parsed operation in a field path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStep {
	/// Select a record field or a string-keyed mapping entry.
	Field(String),
	/// Select a sequence element by zero-based index.
	Index(usize),
}

/// Parsed field path such as `items[0].list` or `[2].name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
	/// Ordered sequence of path steps.
	pub steps: Vec<PathStep>,
}

impl FieldPath {
	/// Parse dotted field syntax with optional `[index]` selectors.
	pub fn parse(input: &str) -> Result<Self> {
		let invalid = || FillError::InvalidFieldPath { path: input.to_owned() };
		if input.is_empty() {
			return Err(invalid());
		}

		let bytes = input.as_bytes();
		let mut idx = 0_usize;
		let mut steps = Vec::new();

		while idx < bytes.len() {
			let start = idx;
			while idx < bytes.len() && (bytes[idx].is_ascii_alphanumeric() || bytes[idx] == b'_') {
				idx += 1;
			}
			if idx > start {
				steps.push(PathStep::Field(input[start..idx].to_owned()));
			} else if !(steps.is_empty() && bytes[idx] == b'[') {
				// Only the very first segment may open with a selector.
				return Err(invalid());
			}

			while idx < bytes.len() && bytes[idx] == b'[' {
				let digits = idx + 1;
				let close = input[digits..].find(']').map(|offset| digits + offset).ok_or_else(invalid)?;
				let text = &input[digits..close];
				if text.is_empty() || !text.bytes().all(|byte| byte.is_ascii_digit()) {
					return Err(invalid());
				}
				steps.push(PathStep::Index(text.parse::<usize>().map_err(|_| invalid())?));
				idx = close + 1;
			}

			if idx < bytes.len() {
				if bytes[idx] != b'.' || idx + 1 == bytes.len() {
					return Err(invalid());
				}
				idx += 1;
			}
		}

		Ok(Self { steps })
	}
}

impl Value {
	/// Resolve a parsed path against this value.
	///
	/// Present references and holders are followed before every step; the value the last
	/// step selects is returned as stored.
	pub fn lookup(&self, path: &FieldPath) -> Result<&Value> {
		let mut current = self;
		for (step_idx, step) in path.steps.iter().enumerate() {
			current = follow(current, step_idx)?;
			current = match step {
				PathStep::Field(name) => select_field(current, name, step_idx)?,
				PathStep::Index(index) => select_index(current, *index, step_idx)?,
			};
		}
		Ok(current)
	}

	/// Parse `expr` and resolve it against this value.
	pub fn lookup_str(&self, expr: &str) -> Result<&Value> {
		self.lookup(&FieldPath::parse(expr)?)
	}
}

fn follow(mut value: &Value, step: usize) -> Result<&Value> {
	loop {
		value = match value {
			Value::Ref(reference) => reference.target().ok_or(FillError::PathAbsent { step, kind: "reference" })?,
			Value::Any(inner) => inner.as_deref().ok_or(FillError::PathAbsent { step, kind: "holder" })?,
			other => return Ok(other),
		};
	}
}

fn select_field<'a>(value: &'a Value, name: &str, step: usize) -> Result<&'a Value> {
	let missing = || FillError::PathFieldNotFound {
		step,
		field: name.to_owned(),
	};

	match value {
		Value::Record(record) => record.get(name).ok_or_else(missing),
		Value::Map(map) => {
			if map.is_absent() {
				return Err(FillError::PathAbsent { step, kind: "mapping" });
			}
			map.get_str(name).ok_or_else(missing)
		}
		other => Err(FillError::PathNotTraversable {
			step,
			kind: other.kind_name(),
		}),
	}
}

fn select_index(value: &Value, index: usize, step: usize) -> Result<&Value> {
	match value {
		Value::Seq(seq) => {
			if seq.is_absent() {
				return Err(FillError::PathAbsent { step, kind: "sequence" });
			}
			seq.get(index).ok_or(FillError::PathIndexOutOfRange { step, index, len: seq.len() })
		}
		other => Err(FillError::PathNotTraversable {
			step,
			kind: other.kind_name(),
		}),
	}
}

#[cfg(test)]
mod tests;
