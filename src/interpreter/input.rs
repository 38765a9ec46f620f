use std::{
	collections::HashMap,
	io::{BufRead, Write},
};

use anyhow::{Context, bail};

use super::NumericCell;
use crate::scanner::DataType;

/// Supplies the initial values of user symbols.
pub trait ValueSource {
	fn read_value(&mut self, name: &str, r#type: DataType) -> anyhow::Result<NumericCell>;
}

/// Asks for every value on `output` and reads the answer from `input`,
/// asking again until the answer parses.
pub struct PromptValueSource<R, W> {
	input:  R,
	output: W,
}

impl<R: BufRead, W: Write> PromptValueSource<R, W> {
	pub fn new(input: R, output: W) -> Self { Self { input, output } }
}

impl<R: BufRead, W: Write> ValueSource for PromptValueSource<R, W> {
	fn read_value(&mut self, name: &str, r#type: DataType) -> anyhow::Result<NumericCell> {
		let mut line = String::new();
		loop {
			write!(self.output, "Enter value of {name} ({}): ", r#type)?;
			self.output.flush().context("Failed flush prompt")?;
			line.clear();
			if self.input.read_line(&mut line).context("Failed read value")? == 0 {
				bail!("input ended before a value was given");
			}
			match NumericCell::parse(line.trim(), r#type) {
				Some(cell) => return Ok(cell),
				None => writeln!(self.output, "Invalid input, try again!")?,
			}
		}
	}
}

/// Values known up front, keyed by symbol name.
impl ValueSource for HashMap<String, f32> {
	fn read_value(&mut self, name: &str, r#type: DataType) -> anyhow::Result<NumericCell> {
		let value = self.get(name).with_context(|| format!("no value given for {name}"))?;
		Ok(NumericCell::narrow(*value, r#type))
	}
}

#[cfg(test)]
mod tests {
	use std::io::Cursor;

	use super::*;

	#[test]
	fn prompt_until_valid() {
		let mut output = Vec::new();
		let mut source = PromptValueSource::new(Cursor::new("abc\n1.5\n 4 \n"), &mut output);
		assert_eq!(source.read_value("x", DataType::Integer).unwrap(), NumericCell::Integer(4));
		let output = String::from_utf8(output).unwrap();
		assert_eq!(output.matches("Enter value of x (integer): ").count(), 3);
		assert_eq!(output.matches("Invalid input, try again!").count(), 2);
	}

	#[test]
	fn prompt_fails_on_eof() {
		let mut source = PromptValueSource::new(Cursor::new("oops\n"), std::io::sink());
		assert!(source.read_value("y", DataType::Float).is_err());
	}

	#[test]
	fn map_source() {
		let mut source: HashMap<String, f32> = HashMap::from([("a".to_string(), 2.5)]);
		assert_eq!(source.read_value("a", DataType::Integer).unwrap(), NumericCell::Integer(2));
		assert_eq!(source.read_value("a", DataType::Float).unwrap(), NumericCell::Float(2.5));
		assert!(source.read_value("b", DataType::Float).is_err());
	}
}
