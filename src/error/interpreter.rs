#[derive(thiserror::Error, Debug)]
/// Errors that can occur while executing three-address code
pub enum InterpreterError {
	/// The result of an operation is infinite or NaN
	#[error("Failed to execute {left} {operator} {right}: result is not a finite number")]
	NonFiniteResult { left: String, operator: &'static str, right: String },
	/// A command references an attribute missing from the symbol table
	#[error("Symbol <id,{0}> is not defined")]
	UndefinedSymbol(usize),
	/// A command lacks an operand its operator needs
	#[error("Command {0} is missing an operand")]
	MissingOperand(String),
	/// The value source could not produce a value
	#[error("Failed to read value of {name}: {reason}")]
	ValueSource { name: String, reason: anyhow::Error },
}
