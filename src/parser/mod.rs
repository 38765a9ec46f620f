//! The `Scanner` works on the lexical grammar with characters as its alphabet,
//! the `Parser` works on the syntactic grammar with tokens as its alphabet.
//!
//! |Name|Operators|Priority|Associates
//! --|--|--|--
//! Term|+ -|1|Left
//! Factor|* /|2|Left
//!
//! Parsing runs in three steps:
//!
//! 1. Neighbour validation. Every adjacent pair of tokens must be allowed:
//!
//!    |Left|May be followed by
//!    --|--
//!    number, identifier, `)`|operator, `)`
//!    operator, `(`|number, identifier, `(`
//!
//!    The expression cannot start with an operator or `)` and cannot end with an
//!    operator or `(`.
//! 2. Shunting-yard conversion to postfix. Before an operator is pushed, every
//!    operator of greater or equal priority is popped to the output, which makes
//!    both levels left associative.
//! 3. Tree construction from the postfix sequence, see [`SyntaxTree::from_postfix`].
//!
//! `3 + 4 * 2` becomes `3 4 2 * +`, which becomes `(+ 3 (* 4 2))`.

mod tree;

pub use tree::*;

use crate::{
	SyntaxError, SyntaxErrorType, TacError,
	scanner::{Bracket, Token},
};

/// Parser turns a token sequence into a syntax tree.
pub struct Parser {
	/// The tokens to parse.
	tokens: Vec<Token>,
}

impl Parser {
	pub fn new(tokens: Vec<Token>) -> Self { Self { tokens } }

	pub fn parse(self) -> Result<SyntaxTree, TacError> {
		self.check_neighbours()?;
		let postfix = self.into_postfix()?;
		Ok(SyntaxTree::from_postfix(postfix)?)
	}

	/// Check the first and last tokens and every adjacent pair.
	fn check_neighbours(&self) -> Result<(), SyntaxError> {
		use SyntaxErrorType::*;

		let (Some(first), Some(last)) = (self.tokens.first(), self.tokens.last()) else {
			return Err(SyntaxError::new(None, EmptyExpression));
		};
		if first.operator().is_some() {
			return Err(SyntaxError::new(first.position, LeadingOperator(first.to_string())));
		}
		if first.bracket() == Some(Bracket::Close) {
			return Err(SyntaxError::new(first.position, LeadingCloseBracket));
		}

		for pair in self.tokens.windows(2) {
			let (left, right) = (&pair[0], &pair[1]);
			if left.is_operand() || left.bracket() == Some(Bracket::Close) {
				if right.operator().is_none() && right.bracket() != Some(Bracket::Close) {
					return Err(SyntaxError::new(left.position, ExpectedOperator(left.to_string())));
				}
			} else if !right.is_operand() && right.bracket() != Some(Bracket::Open) {
				return Err(SyntaxError::new(left.position, ExpectedOperand(left.to_string())));
			}
		}

		if last.operator().is_some() {
			return Err(SyntaxError::new(last.position, TrailingOperator(last.to_string())));
		}
		if last.bracket() == Some(Bracket::Open) {
			return Err(SyntaxError::new(last.position, TrailingOpenBracket));
		}
		Ok(())
	}

	/// Shunting-yard conversion of the infix token sequence.
	fn into_postfix(self) -> Result<Vec<Token>, SyntaxError> {
		let mut output = Vec::with_capacity(self.tokens.len());
		let mut stack: Vec<Token> = Vec::new();

		for token in self.tokens {
			if token.is_operand() {
				output.push(token);
			} else if let Some(operator) = token.operator() {
				while stack.last().and_then(Token::operator).is_some_and(|top| top.priority() >= operator.priority()) {
					output.extend(stack.pop());
				}
				stack.push(token);
			} else if token.bracket() == Some(Bracket::Open) {
				stack.push(token);
			} else {
				loop {
					match stack.pop() {
						Some(top) if top.bracket() == Some(Bracket::Open) => break,
						Some(top) => output.push(top),
						None => return Err(SyntaxError::new(token.position, SyntaxErrorType::UnmatchedCloseBracket)),
					}
				}
			}
		}

		while let Some(top) = stack.pop() {
			if top.bracket().is_some() {
				return Err(SyntaxError::new(top.position, SyntaxErrorType::UnmatchedOpenBracket));
			}
			output.push(top);
		}
		Ok(output)
	}
}
