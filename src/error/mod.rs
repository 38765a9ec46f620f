pub mod interpreter;
pub mod object;
pub mod optimizer;
pub mod parser;
pub mod scanner;
pub mod semantic;

use crate::{InterpreterError, LexicalError, ObjectError, OptimizationError, SemanticError, SyntaxError};

/// TacError is the top-level error type for the translator and the interpreter.
///
/// The display form carries the stage label, e.g. `Syntax error! ...`.
#[derive(thiserror::Error, Debug)]
pub enum TacError {
	/// I/O failures, bad invocations and broken internal invariants
	#[error("{0:#}")]
	InternalError(#[from] anyhow::Error),
	/// Unrecognized characters or malformed lexemes
	#[error("Lexical error! {0}")]
	LexicalError(#[from] LexicalError),
	/// Token adjacency and bracket matching errors
	#[error("Syntax error! {0}")]
	SyntaxError(#[from] SyntaxError),
	/// Conflicting identifier types and literal division by zero
	#[error("Semantic error! {0}")]
	SemanticError(#[from] SemanticError),
	/// Division by zero discovered by folding, or a degenerate expression
	#[error("Optimization error! {0}")]
	OptimizationError(#[from] OptimizationError),
	/// Failures while executing three-address code
	#[error("Runtime error! {0}")]
	RuntimeError(#[from] InterpreterError),
	/// A data-model invariant was violated on construction
	#[error("Object construction error! {0}")]
	ObjectError(#[from] ObjectError),
}

impl TacError {
	/// The taxonomy label of the error.
	pub fn label(&self) -> &'static str {
		match self {
			TacError::InternalError(_) => "Internal error",
			TacError::LexicalError(_) => "Lexical error",
			TacError::SyntaxError(_) => "Syntax error",
			TacError::SemanticError(_) => "Semantic error",
			TacError::OptimizationError(_) => "Optimization error",
			TacError::RuntimeError(_) => "Runtime error",
			TacError::ObjectError(_) => "Object construction error",
		}
	}
}

/// Renders an optional source position as a message suffix.
pub(crate) fn at(position: &Option<usize>) -> String {
	match position {
		Some(position) => format!(" at position {position}"),
		None => String::new(),
	}
}
