//! Three-address code interpreter.
//!
//! Every symbol owns one cell. User symbols are filled from a [`ValueSource`]
//! before execution, temporaries start at zero of their declared type. The
//! commands then run in order:
//!
//! - **Cast**: widen the operand to a float, traced as `2 -> 2.0`
//! - **Binary**: compute in single precision, then store into the receiver as
//!   its declared type, traced as `5 / 2 = 2`
//!
//! An infinite or NaN result stops execution and leaves the receiver as it was.
//! The result of the program is the receiver of its last command.

pub mod input;
pub mod value;

use std::{collections::BTreeMap, io::Write};

use anyhow::Context;
pub use input::{PromptValueSource, ValueSource};
pub use value::NumericCell;

use crate::{
	InterpreterError, TacError,
	codegen::{Operand, ThreeAddressCommand},
	scanner::{Attribute, Provenance},
	symbol::SymbolTable,
};

/// Interpreter that executes three-address code over typed cells.
pub struct Interpreter {
	cells: BTreeMap<Attribute, NumericCell>,
	/// Receiver of the last executed command
	last:  Option<Attribute>,
}

impl Interpreter {
	/// Create one cell per symbol, asking `source` for the values of user symbols.
	pub fn new(symbols: &SymbolTable, source: &mut impl ValueSource) -> Result<Self, InterpreterError> {
		let mut cells = BTreeMap::new();
		for (attribute, entry) in symbols.iter() {
			let cell = match entry.provenance() {
				Provenance::User => source
					.read_value(entry.name(), entry.r#type())
					.map_err(|reason| InterpreterError::ValueSource { name: entry.name().to_string(), reason })?,
				Provenance::Program => NumericCell::zero(entry.r#type()),
			};
			cells.insert(attribute, cell);
		}
		Ok(Self { cells, last: None })
	}

	/// Execute the commands in order, writing one trace line per command.
	pub fn execute(&mut self, code: &[ThreeAddressCommand], trace: &mut impl Write) -> Result<(), TacError> {
		for command in code {
			let line = self.execute_command(command)?;
			writeln!(trace, "{line}").context("Failed write trace")?;
		}
		Ok(())
	}

	fn execute_command(&mut self, command: &ThreeAddressCommand) -> Result<String, InterpreterError> {
		let receiver = command.receiver();
		if !self.cells.contains_key(&receiver.attribute()) {
			return Err(InterpreterError::UndefinedSymbol(receiver.attribute()));
		}
		let missing_operand = || InterpreterError::MissingOperand(command.to_string());

		let operator = command.operator();
		let (result, line) = if operator.is_cast() {
			let operand = self.read(command.right().or(command.left()).ok_or_else(missing_operand)?)?;
			let result = NumericCell::Float(operand.value());
			(result, format!("{operand} -> {result}"))
		} else {
			let (Some(left), Some(right)) = (command.left(), command.right()) else {
				return Err(missing_operand());
			};
			let (left, right) = (self.read(left)?, self.read(right)?);
			let value = operator.apply(left.value(), right.value());
			if !value.is_finite() {
				return Err(InterpreterError::NonFiniteResult {
					left: left.to_string(),
					operator: operator.lexeme(),
					right: right.to_string(),
				});
			}
			let result = NumericCell::narrow(value, receiver.r#type());
			(result, format!("{left} {} {right} = {result}", operator.lexeme()))
		};

		self.cells.insert(receiver.attribute(), result);
		self.last = Some(receiver.attribute());
		Ok(line)
	}

	fn read(&self, operand: &Operand) -> Result<NumericCell, InterpreterError> {
		match operand {
			Operand::Number(literal) => Ok(NumericCell::from_literal(literal)),
			Operand::Identifier(identifier) => {
				self.cell(identifier.attribute()).ok_or(InterpreterError::UndefinedSymbol(identifier.attribute()))
			}
		}
	}

	pub fn cell(&self, attribute: Attribute) -> Option<NumericCell> { self.cells.get(&attribute).copied() }

	/// The receiver cell of the last executed command.
	pub fn result(&self) -> Option<NumericCell> { self.last.and_then(|attribute| self.cell(attribute)) }
}

#[cfg(test)]
mod tests {
	use std::collections::HashMap;

	use super::*;
	use crate::{
		codegen::{CodegenMode, three_address},
		parser::Parser,
		scanner::{DataType, Identifier, Operator, Scanner, Token, TokenKind},
		semantic::analyze,
	};

	fn compile(input: &str) -> (Vec<ThreeAddressCommand>, SymbolTable) {
		let (tokens, mut symbols) = Scanner::new(input).scan_tokens().unwrap();
		let mut tree = Parser::new(tokens).parse().unwrap();
		analyze(&mut tree).unwrap();
		let code = three_address(&tree, &mut symbols, CodegenMode::Plain).unwrap();
		(code, symbols)
	}

	fn run(input: &str, values: &[(&str, f32)]) -> (Result<Option<NumericCell>, TacError>, String) {
		let (code, symbols) = compile(input);
		let mut source: HashMap<String, f32> = values.iter().map(|&(name, value)| (name.to_string(), value)).collect();
		let mut interpreter = Interpreter::new(&symbols, &mut source).unwrap();
		let mut trace = Vec::new();
		let result = interpreter.execute(&code, &mut trace).map(|_| interpreter.result());
		(result, String::from_utf8(trace).unwrap())
	}

	#[test]
	fn integer_arithmetic() {
		let (result, trace) = run("3+4*2", &[]);
		assert_eq!(result.unwrap(), Some(NumericCell::Integer(11)));
		assert_eq!(trace, "4 * 2 = 8\n3 + 8 = 11\n");

		let (result, trace) = run("5/2", &[]);
		assert_eq!(result.unwrap(), Some(NumericCell::Integer(2)));
		assert_eq!(trace, "5 / 2 = 2\n");

		let (result, _) = run("0 - 7 / 2", &[]);
		assert_eq!(result.unwrap(), Some(NumericCell::Integer(-3)));
	}

	#[test]
	fn float_arithmetic() {
		let (result, trace) = run("5.0/2", &[]);
		assert_eq!(result.unwrap(), Some(NumericCell::Float(2.5)));
		assert_eq!(trace, "2 -> 2.0\n5.0 / 2.0 = 2.5\n");

		let (result, trace) = run("a[f] * b", &[("a", 1.5), ("b", 4.0)]);
		assert_eq!(result.unwrap(), Some(NumericCell::Float(6.0)));
		assert_eq!(trace, "4 -> 4.0\n1.5 * 4.0 = 6.0\n");
	}

	#[test]
	fn user_values_are_narrowed() {
		let (result, _) = run("a + 1", &[("a", 2.7)]);
		assert_eq!(result.unwrap(), Some(NumericCell::Integer(3)));
	}

	#[test]
	fn division_by_zero_at_runtime() {
		let (code, symbols) = compile("a / b + 1");
		let mut source: HashMap<String, f32> = HashMap::from([("a".to_string(), 5.0), ("b".to_string(), 0.0)]);
		let mut interpreter = Interpreter::new(&symbols, &mut source).unwrap();
		let mut trace = Vec::new();
		let error = interpreter.execute(&code, &mut trace).unwrap_err();
		assert_eq!(error.to_string(), "Runtime error! Failed to execute 5 / 0: result is not a finite number");
		assert!(trace.is_empty());
		assert_eq!(interpreter.cell(3), Some(NumericCell::Integer(0)));
		assert_eq!(interpreter.result(), None);
	}

	#[test]
	fn failure_keeps_earlier_work() {
		let (code, symbols) = compile("a * 2 + b / c");
		let mut source: HashMap<String, f32> =
			HashMap::from([("a".to_string(), 3.0), ("b".to_string(), 1.0), ("c".to_string(), 0.0)]);
		let mut interpreter = Interpreter::new(&symbols, &mut source).unwrap();
		let mut trace = Vec::new();
		let error = interpreter.execute(&code, &mut trace).unwrap_err();

		assert_eq!(error.to_string(), "Runtime error! Failed to execute 1 / 0: result is not a finite number");
		assert_eq!(String::from_utf8(trace).unwrap(), "3 * 2 = 6\n");
		assert_eq!(interpreter.cell(4), Some(NumericCell::Integer(6)));
		assert_eq!(interpreter.cell(5), Some(NumericCell::Integer(0)));
		assert_eq!(interpreter.cell(6), Some(NumericCell::Integer(0)));
		assert_eq!(interpreter.result(), Some(NumericCell::Integer(6)));
	}

	fn identifier(attribute: Attribute, r#type: DataType, provenance: Provenance) -> Token {
		Token::synthesized(TokenKind::Identifier(Identifier::new(attribute, r#type, provenance).unwrap()))
	}

	/// Division ignores the divisor's type: both sides are divided as floats and
	/// the receiver's type decides whether the quotient is truncated.
	#[test]
	fn division_is_typed_by_receiver() {
		let mut symbols = SymbolTable::new();
		symbols.define("x", DataType::Float, Provenance::User).unwrap();
		symbols.define("n", DataType::Integer, Provenance::User).unwrap();
		symbols.define("T1", DataType::Integer, Provenance::Program).unwrap();
		symbols.define("T2", DataType::Float, Provenance::Program).unwrap();

		let divide = Token::synthesized(TokenKind::Operator(Operator::Divide));
		let x = identifier(1, DataType::Float, Provenance::User);
		let n = identifier(2, DataType::Integer, Provenance::User);
		let code = [
			ThreeAddressCommand::new(&divide, &identifier(3, DataType::Integer, Provenance::Program), Some(&x), Some(&n))
				.unwrap(),
			ThreeAddressCommand::new(&divide, &identifier(4, DataType::Float, Provenance::Program), Some(&x), Some(&n))
				.unwrap(),
		];

		let mut source: HashMap<String, f32> = HashMap::from([("x".to_string(), 7.5), ("n".to_string(), 2.0)]);
		let mut interpreter = Interpreter::new(&symbols, &mut source).unwrap();
		let mut trace = Vec::new();
		interpreter.execute(&code, &mut trace).unwrap();

		assert_eq!(String::from_utf8(trace).unwrap(), "7.5 / 2 = 3\n7.5 / 2 = 3.75\n");
		assert_eq!(interpreter.cell(3), Some(NumericCell::Integer(3)));
		assert_eq!(interpreter.result(), Some(NumericCell::Float(3.75)));
	}

	#[test]
	fn missing_value() {
		let (_, symbols) = compile("a + b");
		let mut source: HashMap<String, f32> = HashMap::from([("a".to_string(), 1.0)]);
		let error = Interpreter::new(&symbols, &mut source).err().unwrap();
		assert!(matches!(error, InterpreterError::ValueSource { ref name, .. } if name == "b"));
	}

	#[test]
	fn undefined_symbol() {
		let (code, _) = compile("a * 2");
		let mut source: HashMap<String, f32> = HashMap::new();
		let mut interpreter = Interpreter::new(&SymbolTable::new(), &mut source).unwrap();
		let error = interpreter.execute(&code, &mut std::io::sink()).unwrap_err();
		assert!(matches!(error, TacError::RuntimeError(InterpreterError::UndefinedSymbol(2))));
	}
}
