//! Turns expression text into tokens and fills the symbol table.
//!
//! The fixed lexemes are the operators `+ - * /` and the brackets `( )`.
//! Whitespace separates lexemes and is dropped. Everything else is read as a
//! `run`, the longest stretch of characters up to the next fixed lexeme or
//! whitespace, and the run as a whole is classified:
//!
//! ``` BNF
//! run        → identifier | integer | float ;
//! identifier → [A-Za-z_] [A-Za-z_0-9]* ( "[" ( "i" | "I" | "f" | "F" ) "]" )? ;
//! integer    → [0-9]+ ;
//! float      → [0-9]+ "." [0-9]+ ;
//! ```
//!
//! An identifier without a suffix is an integer. The first occurrence of a
//! name declares it, later occurrences must agree on its type.
//!
//! Positions are 1-based and counted in characters.
mod token;

use std::{
	iter::{Enumerate, Peekable},
	str::Chars,
};

pub use token::*;

use crate::{
	LexicalError, LexicalErrorType, SemanticError, SemanticErrorType, TacError, symbol::SymbolTable,
};

/// A scanner for arithmetic expressions
pub struct Scanner<'a> {
	/// Expression source iterator, yielding 0-based character indices
	source_iter: Peekable<Enumerate<Chars<'a>>>,
	/// Identifiers met so far
	symbols:     SymbolTable,
}

impl<'a> Scanner<'a> {
	pub fn new(source: &'a str) -> Self {
		Self { source_iter: source.chars().enumerate().peekable(), symbols: SymbolTable::new() }
	}

	/// Scan all tokens, returning them with the symbol table of user identifiers
	pub fn scan_tokens(mut self) -> Result<(Vec<Token>, SymbolTable), TacError> {
		let mut tokens = Vec::new();
		while let Some(&(index, c)) = self.source_iter.peek() {
			let position = index + 1;
			#[rustfmt::skip]
			let kind = match c {
				c if c.is_whitespace() => { self.source_iter.next(); continue; }
				'(' => { self.source_iter.next(); TokenKind::Bracket(Bracket::Open) }
				')' => { self.source_iter.next(); TokenKind::Bracket(Bracket::Close) }
				c => match Operator::from_char(c) {
					Some(operator) => { self.source_iter.next(); TokenKind::Operator(operator) }
					None => self.scan_run(position)?,
				},
			};
			tokens.push(Token::new(kind, position)?);
		}
		Ok((tokens, self.symbols))
	}

	/// Consume and classify one run starting at `position`
	fn scan_run(&mut self, position: usize) -> Result<TokenKind, TacError> {
		let mut run = String::new();
		while let Some(&(_, c)) = self.source_iter.peek() {
			if c.is_whitespace() || is_fixed_lexeme(c) {
				break;
			}
			run.push(c);
			self.source_iter.next();
		}

		if let Some((offset, c)) = run.chars().enumerate().find(|&(_, c)| !is_run_char(c)) {
			return Err(LexicalError::new(position + offset, LexicalErrorType::UnexpectedCharacter(c)).into());
		}

		if run.chars().any(|c| c.is_ascii_alphabetic() || c == '_') {
			self.identifier(run, position)
		} else if run.chars().any(|c| c.is_ascii_digit()) {
			Ok(TokenKind::Number(number(run, position)?))
		} else {
			Err(LexicalError::new(position, LexicalErrorType::UnrecognizedLexeme(run)).into())
		}
	}

	/// Resolve a typed identifier against the symbol table, declaring it on first sight
	fn identifier(&mut self, lexeme: String, position: usize) -> Result<TokenKind, TacError> {
		let Some((name, r#type)) = split_type_suffix(&lexeme) else {
			let r#type = if lexeme.starts_with(|c: char| c.is_ascii_digit()) {
				LexicalErrorType::LeadingDigit(lexeme)
			} else {
				LexicalErrorType::MalformedTypeSuffix(lexeme)
			};
			return Err(LexicalError::new(position, r#type).into());
		};

		let attribute = match self.symbols.lookup(name) {
			Some((attribute, entry)) if entry.r#type() == r#type => attribute,
			Some(_) => {
				return Err(SemanticError::new(position, SemanticErrorType::TypeMismatch(lexeme)).into());
			}
			None => self.symbols.define(name, r#type, Provenance::User)?,
		};
		Ok(TokenKind::Identifier(Identifier::new(attribute, r#type, Provenance::User)?))
	}
}

/// Parse and normalize a numeric constant: `007` becomes `7`, `2.50` becomes `2.5`
fn number(lexeme: String, position: usize) -> Result<NumericLiteral, TacError> {
	let out_of_range = |lexeme| LexicalError::new(position, LexicalErrorType::ConstantOutOfRange(lexeme));
	if is_integer_text(&lexeme) {
		let value = lexeme.parse::<i32>().map_err(|_| out_of_range(lexeme))?;
		Ok(NumericLiteral::from_int(value)?)
	} else if is_float_text(&lexeme) {
		match lexeme.parse::<f32>() {
			Ok(value) if value.is_finite() => Ok(NumericLiteral::from_float(value)?),
			_ => Err(out_of_range(lexeme).into()),
		}
	} else {
		Err(LexicalError::new(position, LexicalErrorType::MalformedConstant(lexeme)).into())
	}
}

/// Split `name[t]` into the bare name and its declared type
fn split_type_suffix(lexeme: &str) -> Option<(&str, DataType)> {
	let (name, r#type) = match lexeme.strip_suffix(']').and_then(|rest| rest.rsplit_once('[')) {
		Some((name, "i" | "I")) => (name, DataType::Integer),
		Some((name, "f" | "F")) => (name, DataType::Float),
		Some(_) => return None,
		None => (lexeme, DataType::Integer),
	};
	is_identifier_name(name).then_some((name, r#type))
}

fn is_fixed_lexeme(c: char) -> bool { matches!(c, '(' | ')') || Operator::from_char(c).is_some() }

fn is_run_char(c: char) -> bool { c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '[' | ']') }
