/// A lexical error with the 1-based position of the offending character or lexeme.
#[derive(thiserror::Error, Debug, PartialEq)]
#[error("{type} at position {position}")]
pub struct LexicalError {
	/// The position where the error occurred.
	position: usize,
	/// The type of lexical error.
	r#type:   LexicalErrorType,
}

impl LexicalError {
	pub fn new(position: usize, r#type: LexicalErrorType) -> Self { Self { position, r#type } }

	pub fn position(&self) -> usize { self.position }

	pub fn r#type(&self) -> &LexicalErrorType { &self.r#type }
}

/// Types of lexical errors.
#[derive(Debug, PartialEq)]
pub enum LexicalErrorType {
	/// A character outside the identifier and number alphabet.
	UnexpectedCharacter(char),
	/// An identifier starting with a digit, e.g. `1abc`.
	LeadingDigit(String),
	/// A type suffix other than `[i]`, `[I]`, `[f]` or `[F]`.
	MalformedTypeSuffix(String),
	/// Digits and dots that form neither an integer nor a float.
	MalformedConstant(String),
	/// A constant that does not fit the runtime numeric types.
	ConstantOutOfRange(String),
	/// A run such as `.` or `[]` that is neither identifier nor number.
	UnrecognizedLexeme(String),
}

impl std::fmt::Display for LexicalErrorType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use LexicalErrorType::*;
		match self {
			UnexpectedCharacter(c) => {
				write!(f, "Unexpected character '{c}'")
			}
			LeadingDigit(lexeme) => {
				write!(f, "Identifier \"{lexeme}\" cannot start with a digit")
			}
			MalformedTypeSuffix(lexeme) => {
				write!(f, "Typed identifier \"{lexeme}\" must look like name[i], name[I], name[f] or name[F]")
			}
			MalformedConstant(lexeme) => {
				write!(f, "Malformed numeric constant \"{lexeme}\"")
			}
			ConstantOutOfRange(lexeme) => {
				write!(f, "Numeric constant \"{lexeme}\" is out of range")
			}
			UnrecognizedLexeme(lexeme) => {
				write!(f, "Unrecognized lexeme \"{lexeme}\"")
			}
		}
	}
}
