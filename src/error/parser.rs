use super::at;

/// A syntax error, positioned at the token that broke the rule.
#[derive(thiserror::Error, Debug, PartialEq)]
#[error("{type}{}", at(.position))]
pub struct SyntaxError {
	position: Option<usize>,
	r#type:   SyntaxErrorType,
}

impl SyntaxError {
	pub fn new(position: Option<usize>, r#type: SyntaxErrorType) -> Self { Self { position, r#type } }

	pub fn position(&self) -> Option<usize> { self.position }

	pub fn r#type(&self) -> &SyntaxErrorType { &self.r#type }
}

#[derive(Debug, PartialEq)]
pub enum SyntaxErrorType {
	EmptyExpression,
	LeadingOperator(String),
	LeadingCloseBracket,
	TrailingOperator(String),
	TrailingOpenBracket,
	/// A number, identifier or `)` followed by something other than an operator or `)`.
	ExpectedOperator(String),
	/// An operator or `(` followed by something other than a number, identifier or `(`.
	ExpectedOperand(String),
	UnmatchedCloseBracket,
	UnmatchedOpenBracket,
}

impl std::fmt::Display for SyntaxErrorType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use SyntaxErrorType::*;
		match self {
			EmptyExpression => write!(f, "Expression is empty"),
			LeadingOperator(token) => write!(f, "Expression cannot start with operator {token}"),
			LeadingCloseBracket => write!(f, "Expression cannot start with a closing bracket"),
			TrailingOperator(token) => write!(f, "Expression cannot end with operator {token}"),
			TrailingOpenBracket => write!(f, "Expression cannot end with an opening bracket"),
			ExpectedOperator(token) => write!(f, "Expected an operator or closing bracket after {token}"),
			ExpectedOperand(token) => {
				write!(f, "Expected a number, an identifier or an opening bracket after {token}")
			}
			UnmatchedCloseBracket => write!(f, "Closing bracket has no matching opening bracket"),
			UnmatchedOpenBracket => write!(f, "Opening bracket has no matching closing bracket"),
		}
	}
}
