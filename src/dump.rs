//! Plain-text dumps of every intermediate form, one line per item.

use std::fmt::Write;

use crate::{
	codegen::ThreeAddressCommand,
	parser::{SyntaxNode, SyntaxTree},
	scanner::{Bracket, Operator, Token, TokenKind},
	symbol::SymbolTable,
};

/// `<+>\t - addition operator`, identifiers are described with their name and type.
pub fn tokens(tokens: &[Token], symbols: &SymbolTable) -> String {
	let mut out = String::new();
	for token in tokens {
		let description = match &token.kind {
			TokenKind::Operator(operator) => describe_operator(*operator).to_string(),
			TokenKind::Bracket(Bracket::Open) => "opening bracket".to_string(),
			TokenKind::Bracket(Bracket::Close) => "closing bracket".to_string(),
			TokenKind::Number(literal) => format!("{} constant", literal.kind()),
			TokenKind::Identifier(identifier) => {
				let name = symbols.get(identifier.attribute()).map_or("?", |entry| entry.name());
				format!("identifier named {name} of {} type", identifier.r#type())
			}
		};
		let _ = writeln!(out, "{token}\t - {description}");
	}
	out
}

fn describe_operator(operator: Operator) -> &'static str {
	match operator {
		Operator::Add => "addition operator",
		Operator::Subtract => "subtraction operator",
		Operator::Multiply => "multiplication operator",
		Operator::Divide => "division operator",
		Operator::IntToFloat => "int to float cast",
	}
}

/// `1\t - a [integer]`
pub fn symbols(symbols: &SymbolTable) -> String {
	let mut out = String::new();
	for (attribute, entry) in symbols.iter() {
		let _ = writeln!(out, "{attribute}\t - {} [{}]", entry.name(), entry.r#type());
	}
	out
}

/// `<id,1>\t - a, integer`, the form shipped next to three-address code.
pub fn symbols_portable(symbols: &SymbolTable) -> String {
	let mut out = String::new();
	for (attribute, entry) in symbols.iter() {
		let _ = writeln!(out, "<id,{attribute}>\t - {}, {}", entry.name(), entry.r#type());
	}
	out
}

/// Draw the tree top-down, left child first:
///
/// ``` markdown
/// <+>
///  ├───Int2Float
///  │    └───<id,1>
///  └───<id,2>
/// ```
pub fn tree(tree: &SyntaxTree) -> String {
	let mut out = String::new();
	draw(&mut out, &tree.root, &mut Vec::new());
	out
}

/// `left_branches` records, for each ancestor below the root, whether it is a left child.
fn draw(out: &mut String, node: &SyntaxNode, left_branches: &mut Vec<bool>) {
	if let Some((is_left, ancestors)) = left_branches.split_last() {
		for &ancestor_is_left in ancestors {
			out.push_str(if ancestor_is_left { " │   " } else { "     " });
		}
		out.push_str(if *is_left { " ├───" } else { " └───" });
	}
	if node.is_cast() {
		out.push_str("Int2Float\n");
	} else {
		let _ = writeln!(out, "{}", node.token);
	}

	for (child, is_left) in [(&node.left, true), (&node.right, false)] {
		if let Some(child) = child {
			left_branches.push(is_left);
			draw(out, child, left_branches);
			left_branches.pop();
		}
	}
}

/// Tokens written back to back: `<3><4><2><*><+>`.
pub fn postfix(tokens: &[Token]) -> String { tokens.iter().map(Token::to_string).collect() }

/// One command per line.
pub fn commands(code: &[ThreeAddressCommand]) -> String {
	code.iter().map(|command| format!("{command}\n")).collect()
}
