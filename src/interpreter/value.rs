use std::fmt::Display;

use NumericCell::*;

use crate::scanner::{DataType, NumericLiteral};

/// Runtime storage of one symbol.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericCell {
	Integer(i32),
	Float(f32),
}

impl Display for NumericCell {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Integer(n) => write!(f, "{n}"),
			Float(n) => {
				let text = n.to_string();
				if n.is_finite() && !text.contains('.') { write!(f, "{text}.0") } else { write!(f, "{text}") }
			}
		}
	}
}

impl NumericCell {
	pub fn zero(r#type: DataType) -> Self {
		match r#type {
			DataType::Integer => Integer(0),
			DataType::Float => Float(0.0),
		}
	}

	pub fn from_literal(literal: &NumericLiteral) -> Self {
		match literal.kind() {
			DataType::Integer => Integer(literal.int_value()),
			DataType::Float => Float(literal.value()),
		}
	}

	/// Store a computed value in a cell of the given type, truncating toward zero for integers.
	pub fn narrow(value: f32, r#type: DataType) -> Self {
		match r#type {
			DataType::Integer => Integer(value as i32),
			DataType::Float => Float(value),
		}
	}

	/// Parse user input for a cell of the given type.
	pub fn parse(text: &str, r#type: DataType) -> Option<Self> {
		match r#type {
			DataType::Integer => text.parse().ok().map(Integer),
			DataType::Float => text.parse::<f32>().ok().filter(|n| n.is_finite()).map(Float),
		}
	}

	pub fn value(&self) -> f32 {
		match *self {
			Integer(n) => n as f32,
			Float(n) => n,
		}
	}

	pub fn r#type(&self) -> DataType {
		match self {
			Integer(_) => DataType::Integer,
			Float(_) => DataType::Float,
		}
	}
}
