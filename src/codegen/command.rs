use serde::{Deserialize, Serialize};

use crate::{
	ObjectError, ObjectKind,
	scanner::{Identifier, NumericLiteral, Operator, Token, TokenKind},
};

/// A value a command reads: a symbol or a constant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operand {
	Identifier(Identifier),
	Number(NumericLiteral),
}

impl Operand {
	fn from_token(token: &Token) -> Result<Self, ObjectError> {
		match &token.kind {
			TokenKind::Identifier(identifier) => Ok(Operand::Identifier(*identifier)),
			TokenKind::Number(literal) => Ok(Operand::Number(literal.clone())),
			_ => Err(ObjectError::new(
				ObjectKind::ThreeAddressCommand,
				format!("operand {token} is neither a number nor an identifier"),
			)),
		}
	}
}

impl std::fmt::Display for Operand {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Operand::Identifier(identifier) => write!(f, "{identifier}"),
			Operand::Number(literal) => write!(f, "{}", literal.text()),
		}
	}
}

/// One operation writing into one receiver, e.g. `add <id,4> <id,1> 2`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCommand")]
pub struct ThreeAddressCommand {
	operator: Operator,
	receiver: Identifier,
	left:     Option<Operand>,
	right:    Option<Operand>,
}

#[derive(Deserialize)]
struct RawCommand {
	operator: Operator,
	receiver: Identifier,
	left:     Option<Operand>,
	right:    Option<Operand>,
}

impl TryFrom<RawCommand> for ThreeAddressCommand {
	type Error = ObjectError;

	fn try_from(raw: RawCommand) -> Result<Self, Self::Error> {
		Self::from_parts(raw.operator, raw.receiver, raw.left, raw.right)
	}
}

impl ThreeAddressCommand {
	/// Build a command from tree tokens, checking every token plays its role.
	pub fn new(
		operator: &Token,
		receiver: &Token,
		left: Option<&Token>,
		right: Option<&Token>,
	) -> Result<Self, ObjectError> {
		let invalid = |message: String| ObjectError::new(ObjectKind::ThreeAddressCommand, message);
		let operator = operator.operator().ok_or_else(|| invalid(format!("{operator} is not an operator")))?;
		let receiver = *receiver.identifier().ok_or_else(|| invalid(format!("receiver {receiver} is not an identifier")))?;
		let left = left.map(Operand::from_token).transpose()?;
		let right = right.map(Operand::from_token).transpose()?;
		Self::from_parts(operator, receiver, left, right)
	}

	fn from_parts(
		operator: Operator,
		receiver: Identifier,
		left: Option<Operand>,
		right: Option<Operand>,
	) -> Result<Self, ObjectError> {
		if left.is_none() && right.is_none() {
			return Err(ObjectError::new(ObjectKind::ThreeAddressCommand, "a command needs at least one operand"));
		}
		Ok(Self { operator, receiver, left, right })
	}

	pub fn operator(&self) -> Operator { self.operator }

	pub fn receiver(&self) -> &Identifier { &self.receiver }

	pub fn left(&self) -> Option<&Operand> { self.left.as_ref() }

	pub fn right(&self) -> Option<&Operand> { self.right.as_ref() }

	/// Identifiers the command reads or writes.
	pub fn identifiers(&self) -> impl Iterator<Item = &Identifier> {
		let operands = [&self.left, &self.right].into_iter().flatten().filter_map(|operand| match operand {
			Operand::Identifier(identifier) => Some(identifier),
			Operand::Number(_) => None,
		});
		std::iter::once(&self.receiver).chain(operands)
	}
}

impl std::fmt::Display for ThreeAddressCommand {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{} {}", self.operator.mnemonic(), self.receiver)?;
		for operand in [&self.left, &self.right].into_iter().flatten() {
			write!(f, " {operand}")?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::scanner::{Bracket, DataType, Provenance};

	fn token(kind: TokenKind) -> Token { Token::synthesized(kind) }

	fn identifier(attribute: usize) -> Token {
		token(TokenKind::Identifier(Identifier::new(attribute, DataType::Integer, Provenance::Program).unwrap()))
	}

	fn number(text: &str) -> Token { token(TokenKind::Number(NumericLiteral::new(text, DataType::Integer).unwrap())) }

	#[test]
	fn command_display() {
		let add = token(TokenKind::Operator(Operator::Add));
		let command = ThreeAddressCommand::new(&add, &identifier(3), Some(&identifier(1)), Some(&number("2"))).unwrap();
		assert_eq!(command.to_string(), "add <id,3> <id,1> 2");

		let cast = token(TokenKind::Operator(Operator::IntToFloat));
		let command = ThreeAddressCommand::new(&cast, &identifier(4), None, Some(&identifier(3))).unwrap();
		assert_eq!(command.to_string(), "i2f <id,4> <id,3>");
		assert_eq!(command.identifiers().map(Identifier::attribute).collect::<Vec<_>>(), vec![4, 3]);
	}

	#[test]
	fn command_invariants() {
		let add = token(TokenKind::Operator(Operator::Add));
		let open = token(TokenKind::Bracket(Bracket::Open));
		assert!(ThreeAddressCommand::new(&add, &identifier(1), None, None).is_err());
		assert!(ThreeAddressCommand::new(&add, &number("1"), Some(&number("1")), None).is_err());
		assert!(ThreeAddressCommand::new(&open, &identifier(1), Some(&number("1")), None).is_err());
		assert!(ThreeAddressCommand::new(&add, &identifier(1), Some(&open), Some(&number("1"))).is_err());
		assert!(ThreeAddressCommand::new(&add, &identifier(1), Some(&add), Some(&number("1"))).is_err());
	}
}
