use serde::{Deserialize, Serialize};

use crate::{ObjectError, ObjectKind};

/// Key of a row in the symbol table, dense from 1.
pub type Attribute = usize;

/// Declared type of an identifier or kind of a numeric constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
	Integer,
	Float,
}

impl DataType {
	pub fn name(self) -> &'static str {
		match self {
			DataType::Integer => "integer",
			DataType::Float => "float",
		}
	}
}

impl std::fmt::Display for DataType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.name()) }
}

/// Who introduced an identifier: the expression author or the code generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
	User,
	Program,
}

/// Arithmetic operators plus the compiler-synthesized int to float cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
	Add,
	Subtract,
	Multiply,
	Divide,
	IntToFloat,
}

impl Operator {
	pub fn from_char(c: char) -> Option<Self> {
		match c {
			'+' => Some(Operator::Add),
			'-' => Some(Operator::Subtract),
			'*' => Some(Operator::Multiply),
			'/' => Some(Operator::Divide),
			_ => None,
		}
	}

	pub fn lexeme(self) -> &'static str {
		match self {
			Operator::Add => "+",
			Operator::Subtract => "-",
			Operator::Multiply => "*",
			Operator::Divide => "/",
			Operator::IntToFloat => "i2f",
		}
	}

	/// Binding strength used by the shunting-yard conversion.
	pub fn priority(self) -> u8 {
		match self {
			Operator::Add | Operator::Subtract => 1,
			Operator::Multiply | Operator::Divide => 2,
			Operator::IntToFloat => 3,
		}
	}

	/// Three-address code mnemonic.
	pub fn mnemonic(self) -> &'static str {
		match self {
			Operator::Add => "add",
			Operator::Subtract => "sub",
			Operator::Multiply => "mul",
			Operator::Divide => "div",
			Operator::IntToFloat => "i2f",
		}
	}

	pub fn is_cast(self) -> bool { self == Operator::IntToFloat }

	/// Applies a binary operator in single precision. The cast yields its right operand.
	pub fn apply(self, left: f32, right: f32) -> f32 {
		match self {
			Operator::Add => left + right,
			Operator::Subtract => left - right,
			Operator::Multiply => left * right,
			Operator::Divide => left / right,
			Operator::IntToFloat => right,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bracket {
	Open,
	Close,
}

/// A numeric constant, kept in its normalized decimal form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLiteral")]
pub struct NumericLiteral {
	text:  String,
	kind:  DataType,
	#[serde(skip_serializing)]
	value: f64,
}

#[derive(Deserialize)]
struct RawLiteral {
	text: String,
	kind: DataType,
}

impl TryFrom<RawLiteral> for NumericLiteral {
	type Error = ObjectError;

	fn try_from(raw: RawLiteral) -> Result<Self, Self::Error> { Self::new(raw.text, raw.kind) }
}

impl NumericLiteral {
	/// Creates a literal from text that must match the grammar of `kind`.
	pub fn new(text: impl Into<String>, kind: DataType) -> Result<Self, ObjectError> {
		let text = text.into();
		let value = match kind {
			DataType::Integer if is_integer_text(&text) => text.parse::<i32>().ok().map(f64::from),
			DataType::Float if is_float_text(&text) => {
				text.parse::<f32>().ok().filter(|v| v.is_finite()).map(f64::from)
			}
			_ => {
				return Err(ObjectError::new(
					ObjectKind::NumericLiteral,
					format!("\"{text}\" is not a valid {kind} constant"),
				));
			}
		};
		match value {
			Some(value) => Ok(Self { text, kind, value }),
			None => Err(ObjectError::new(ObjectKind::NumericLiteral, format!("\"{text}\" is out of range"))),
		}
	}

	pub fn from_int(value: i32) -> Result<Self, ObjectError> { Self::new(value.to_string(), DataType::Integer) }

	/// Floats always keep a fractional part, `2` is written `2.0`.
	pub fn from_float(value: f32) -> Result<Self, ObjectError> {
		let mut text = value.to_string();
		if !text.contains('.') {
			text.push_str(".0");
		}
		Self::new(text, DataType::Float)
	}

	pub fn zero(kind: DataType) -> Self {
		let text = match kind {
			DataType::Integer => "0",
			DataType::Float => "0.0",
		};
		Self { text: text.to_string(), kind, value: 0.0 }
	}

	pub fn text(&self) -> &str { &self.text }

	pub fn kind(&self) -> DataType { self.kind }

	pub fn value(&self) -> f32 { self.value as f32 }

	/// Exact value of an integer constant. Float constants are truncated.
	pub fn int_value(&self) -> i32 { self.value as i32 }

	pub fn is_zero(&self) -> bool { self.value == 0.0 }

	pub fn is_one(&self) -> bool { self.value == 1.0 }
}

/// A reference to a symbol table row, carrying the declared type of the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawIdentifier")]
pub struct Identifier {
	attribute:  Attribute,
	r#type:     DataType,
	provenance: Provenance,
}

#[derive(Deserialize)]
struct RawIdentifier {
	attribute:  Attribute,
	r#type:     DataType,
	provenance: Provenance,
}

impl TryFrom<RawIdentifier> for Identifier {
	type Error = ObjectError;

	fn try_from(raw: RawIdentifier) -> Result<Self, Self::Error> {
		Self::new(raw.attribute, raw.r#type, raw.provenance)
	}
}

impl Identifier {
	pub fn new(attribute: Attribute, r#type: DataType, provenance: Provenance) -> Result<Self, ObjectError> {
		if attribute == 0 {
			return Err(ObjectError::new(ObjectKind::Identifier, "attribute must be positive"));
		}
		Ok(Self { attribute, r#type, provenance })
	}

	pub fn attribute(&self) -> Attribute { self.attribute }

	pub fn r#type(&self) -> DataType { self.r#type }

	pub fn provenance(&self) -> Provenance { self.provenance }
}

impl std::fmt::Display for Identifier {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "<id,{}>", self.attribute) }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
	Operator(Operator),
	Bracket(Bracket),
	Number(NumericLiteral),
	Identifier(Identifier),
}

/// A token produced by the scanner, or synthesized by a later stage
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
	pub kind:     TokenKind,
	/// 1-based position in the source, `None` for synthesized tokens
	pub position: Option<usize>,
}

impl Token {
	pub fn new(kind: TokenKind, position: usize) -> Result<Self, ObjectError> {
		if position == 0 {
			return Err(ObjectError::new(ObjectKind::Token, "position must be positive"));
		}
		Ok(Self { kind, position: Some(position) })
	}

	pub fn synthesized(kind: TokenKind) -> Self { Self { kind, position: None } }

	pub fn operator(&self) -> Option<Operator> {
		match self.kind {
			TokenKind::Operator(operator) => Some(operator),
			_ => None,
		}
	}

	pub fn bracket(&self) -> Option<Bracket> {
		match self.kind {
			TokenKind::Bracket(bracket) => Some(bracket),
			_ => None,
		}
	}

	pub fn number(&self) -> Option<&NumericLiteral> {
		match &self.kind {
			TokenKind::Number(literal) => Some(literal),
			_ => None,
		}
	}

	pub fn identifier(&self) -> Option<&Identifier> {
		match &self.kind {
			TokenKind::Identifier(identifier) => Some(identifier),
			_ => None,
		}
	}

	/// Numbers and identifiers.
	pub fn is_operand(&self) -> bool { matches!(self.kind, TokenKind::Number(_) | TokenKind::Identifier(_)) }

	/// Type of an operand token, `None` for operators and brackets.
	pub fn data_type(&self) -> Option<DataType> {
		match &self.kind {
			TokenKind::Number(literal) => Some(literal.kind()),
			TokenKind::Identifier(identifier) => Some(identifier.r#type()),
			_ => None,
		}
	}

	/// Bare source-like text: `+`, `(`, `2.5` or `<id,1>`.
	pub fn text(&self) -> String {
		match &self.kind {
			TokenKind::Operator(operator) => operator.lexeme().to_string(),
			TokenKind::Bracket(Bracket::Open) => "(".to_string(),
			TokenKind::Bracket(Bracket::Close) => ")".to_string(),
			TokenKind::Number(literal) => literal.text().to_string(),
			TokenKind::Identifier(identifier) => identifier.to_string(),
		}
	}
}

impl std::fmt::Display for Token {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match &self.kind {
			TokenKind::Identifier(identifier) => write!(f, "{identifier}"),
			_ => write!(f, "<{}>", self.text()),
		}
	}
}

/// `[A-Za-z_][A-Za-z_0-9]*`
pub fn is_identifier_name(text: &str) -> bool {
	let mut chars = text.chars();
	chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
		&& chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// `[0-9]+`
pub fn is_integer_text(text: &str) -> bool { !text.is_empty() && text.chars().all(|c| c.is_ascii_digit()) }

/// `[0-9]+\.[0-9]+`
pub fn is_float_text(text: &str) -> bool {
	text.split_once('.').is_some_and(|(whole, fraction)| is_integer_text(whole) && is_integer_text(fraction))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn literal_grammar() {
		assert!(NumericLiteral::new("12", DataType::Integer).is_ok());
		assert!(NumericLiteral::new("1.5", DataType::Float).is_ok());
		assert!(NumericLiteral::new("1.", DataType::Float).is_err());
		assert!(NumericLiteral::new(".5", DataType::Float).is_err());
		assert!(NumericLiteral::new("1.5", DataType::Integer).is_err());
		assert!(NumericLiteral::new("-1", DataType::Integer).is_err());
		assert!(NumericLiteral::new("3000000000", DataType::Integer).is_err());
	}

	#[test]
	fn float_literal_keeps_fraction() {
		assert_eq!(NumericLiteral::from_float(2.0).unwrap().text(), "2.0");
		assert_eq!(NumericLiteral::from_float(2.5).unwrap().text(), "2.5");
		assert!(NumericLiteral::from_float(-1.0).is_err());
		assert!(NumericLiteral::from_float(f32::INFINITY).is_err());
	}

	#[test]
	fn token_position_must_be_positive() {
		let kind = TokenKind::Operator(Operator::Add);
		assert!(Token::new(kind.clone(), 0).is_err());
		assert_eq!(Token::new(kind, 3).unwrap().position, Some(3));
	}

	#[test]
	fn token_display() {
		let identifier = Identifier::new(2, DataType::Float, Provenance::User).unwrap();
		assert_eq!(Token::synthesized(TokenKind::Identifier(identifier)).to_string(), "<id,2>");
		assert_eq!(Token::synthesized(TokenKind::Operator(Operator::IntToFloat)).to_string(), "<i2f>");
		assert_eq!(Token::synthesized(TokenKind::Bracket(Bracket::Close)).to_string(), "<)>");
		assert!(Identifier::new(0, DataType::Float, Provenance::User).is_err());
	}

	#[test]
	fn identifier_names() {
		assert!(is_identifier_name("_a1"));
		assert!(is_identifier_name("T12"));
		assert!(!is_identifier_name("1a"));
		assert!(!is_identifier_name("a[i]"));
		assert!(!is_identifier_name(""));
	}
}
