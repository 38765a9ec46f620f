//! The container handed from the translator to the interpreter: three-address
//! code together with the symbol table it refers to, stored as YAML.

use std::{fs, path::Path};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::{ObjectError, ObjectKind, codegen::ThreeAddressCommand, symbol::SymbolTable};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawProgram")]
pub struct PortableProgram {
	code:    Vec<ThreeAddressCommand>,
	symbols: SymbolTable,
}

#[derive(Deserialize)]
struct RawProgram {
	code:    Vec<ThreeAddressCommand>,
	symbols: SymbolTable,
}

impl TryFrom<RawProgram> for PortableProgram {
	type Error = ObjectError;

	fn try_from(raw: RawProgram) -> Result<Self, Self::Error> { Self::new(raw.code, raw.symbols) }
}

impl PortableProgram {
	/// Pair code with its symbols. Every identifier in the code must name a row
	/// of the table with the same type.
	pub fn new(code: Vec<ThreeAddressCommand>, symbols: SymbolTable) -> Result<Self, ObjectError> {
		for identifier in code.iter().flat_map(ThreeAddressCommand::identifiers) {
			match symbols.get(identifier.attribute()) {
				Some(entry) if entry.r#type() == identifier.r#type() => {}
				Some(entry) => {
					return Err(ObjectError::new(
						ObjectKind::PortableProgram,
						format!("{identifier} is used as {} but declared as {}", identifier.r#type(), entry.r#type()),
					));
				}
				None => {
					return Err(ObjectError::new(
						ObjectKind::PortableProgram,
						format!("{identifier} is missing from the symbol table"),
					));
				}
			}
		}
		Ok(Self { code, symbols })
	}

	pub fn code(&self) -> &[ThreeAddressCommand] { &self.code }

	pub fn symbols(&self) -> &SymbolTable { &self.symbols }

	pub fn to_yaml(&self) -> anyhow::Result<String> { serde_yaml::to_string(self).context("Failed serialize program") }

	pub fn from_yaml(text: &str) -> anyhow::Result<Self> { serde_yaml::from_str(text).context("Failed parse program") }

	pub fn write<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
		let path = path.as_ref();
		fs::write(path, self.to_yaml()?).with_context(|| format!("Failed write program file {}", path.display()))
	}

	pub fn read<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
		let path = path.as_ref();
		let text =
			fs::read_to_string(path).with_context(|| format!("Failed open program file {}", path.display()))?;
		Self::from_yaml(&text).with_context(|| format!("Invalid program file {}", path.display()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		codegen::{CodegenMode, three_address},
		parser::Parser,
		scanner::{DataType, Provenance, Scanner},
		semantic::analyze,
	};

	fn compile(input: &str) -> PortableProgram {
		let (tokens, mut symbols) = Scanner::new(input).scan_tokens().unwrap();
		let mut tree = Parser::new(tokens).parse().unwrap();
		analyze(&mut tree).unwrap();
		let code = three_address(&tree, &mut symbols, CodegenMode::Optimal).unwrap();
		PortableProgram::new(code, symbols).unwrap()
	}

	#[test]
	fn yaml_keeps_the_program() {
		let program = compile("(a + b[f]) * 2.5 - a");
		let text = program.to_yaml().unwrap();
		assert_eq!(PortableProgram::from_yaml(&text).unwrap(), program);
	}

	#[test]
	fn code_must_match_symbols() {
		let program = compile("a * b + 1");
		let code = program.code().to_vec();
		let error = PortableProgram::new(code.clone(), SymbolTable::new()).unwrap_err();
		assert_eq!(error.kind(), ObjectKind::PortableProgram);

		let mut mistyped = SymbolTable::new();
		mistyped.define("a", DataType::Float, Provenance::User).unwrap();
		mistyped.define("b", DataType::Integer, Provenance::User).unwrap();
		mistyped.define("T1", DataType::Integer, Provenance::Program).unwrap();
		assert!(PortableProgram::new(code, mistyped).is_err());
	}

	#[test]
	fn invalid_yaml_is_rejected() {
		let text = compile("a - 1").to_yaml().unwrap().replace("name: a", "name: 1a");
		assert!(PortableProgram::from_yaml(&text).is_err());
	}
}
