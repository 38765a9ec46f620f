use super::at;

#[derive(thiserror::Error, Debug, PartialEq)]
#[error("{type}{}", at(.position))]
pub struct OptimizationError {
	/// Position of the division operator, when the error concerns one.
	position: Option<usize>,
	r#type:   OptimizationErrorType,
}

impl OptimizationError {
	pub fn new(position: Option<usize>, r#type: OptimizationErrorType) -> Self { Self { position, r#type } }

	pub fn position(&self) -> Option<usize> { self.position }

	pub fn r#type(&self) -> &OptimizationErrorType { &self.r#type }
}

#[derive(Debug, PartialEq)]
pub enum OptimizationErrorType {
	/// Folding or simplification produced a zero divisor.
	DivisionByZero,
	/// Folding the given operation leaves the range of its result type.
	Overflow(String),
	/// The whole expression collapsed to the given literal or identifier.
	Degenerate(String),
}

impl std::fmt::Display for OptimizationErrorType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			OptimizationErrorType::DivisionByZero => write!(f, "Optimization produced a division by zero"),
			OptimizationErrorType::Overflow(operation) => write!(f, "Folding {operation} overflows"),
			OptimizationErrorType::Degenerate(token) => {
				write!(f, "Expression degenerated into the single value {token} after optimization")
			}
		}
	}
}
