/// A semantic error, positioned at the identifier or operator at fault.
#[derive(thiserror::Error, Debug, PartialEq)]
#[error("{type} at position {position}")]
pub struct SemanticError {
	position: usize,
	r#type:   SemanticErrorType,
}

impl SemanticError {
	pub fn new(position: usize, r#type: SemanticErrorType) -> Self { Self { position, r#type } }

	pub fn position(&self) -> usize { self.position }

	pub fn r#type(&self) -> &SemanticErrorType { &self.r#type }
}

#[derive(Debug, PartialEq)]
pub enum SemanticErrorType {
	/// An identifier whose type differs from its first declaration.
	TypeMismatch(String),
	/// A division whose right operand is the literal zero.
	DivisionByZero,
}

impl std::fmt::Display for SemanticErrorType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			SemanticErrorType::TypeMismatch(lexeme) => {
				write!(f, "Identifier \"{lexeme}\" does not match the type of its first declaration")
			}
			SemanticErrorType::DivisionByZero => write!(f, "Division by zero"),
		}
	}
}
