//! Tree rewriting after type resolution.
//!
//! Nodes are visited in post-order. Once both children of a node are final:
//!
//! 1. a cast whose sibling is an integer again is dropped and the node's type
//!    is resolved anew, which may insert casts elsewhere;
//! 2. cast children over a number are folded into float numbers;
//! 3. the node itself is rewritten by the first rule that applies:
//!    constant folding, cast folding, dropping a cast over a float operand, or
//!    an algebraic identity.
//!
//! |Before|After
//! --|--
//! `x + 0`, `0 + x`, `x - 0`|`x`
//! `x * 1`, `1 * x`, `x / 1`|`x`
//! `x * 0`, `0 * x`|`0`
//! `x - x`|`0`
//!
//! Folding computes in single precision. A folded division or float operation
//! yields a float number, anything else truncates to an integer. Negative
//! results are written `0 - n`, since numbers carry no sign.
//!
//! A zero produced by any rule in the divisor slot of a division is an error.

use crate::{
	OptimizationError, OptimizationErrorType, TacError,
	parser::{OperationResult, SyntaxNode, SyntaxTree},
	scanner::{DataType, NumericLiteral, Operator, Token, TokenKind},
	semantic::resolve_operation,
};

/// Lowest magnitude that no longer fits an `i32`.
const INTEGER_LIMIT: f32 = 2_147_483_648.0;

/// Where a node sits in its parent.
#[derive(Debug, Clone, Copy)]
enum Slot {
	Operand,
	/// Right operand of the division at the given position.
	Divisor(Option<usize>),
}

/// Rewrite the tree in place. A tree may collapse into a single leaf.
pub fn simplify(tree: &mut SyntaxTree) -> Result<(), TacError> { optimize_node(&mut tree.root, Slot::Operand) }

/// Rewrite the tree in place, rejecting a tree that collapses into a single leaf.
pub fn optimize(tree: &mut SyntaxTree) -> Result<(), TacError> {
	simplify(tree)?;
	if tree.root.is_leaf() {
		let value = tree.root.token.to_string();
		return Err(OptimizationError::new(None, OptimizationErrorType::Degenerate(value)).into());
	}
	Ok(())
}

fn optimize_node(node: &mut SyntaxNode, slot: Slot) -> Result<(), TacError> {
	let divisor = match node.operator() {
		Some(Operator::Divide) => Slot::Divisor(node.token.position),
		_ => Slot::Operand,
	};
	if let Some(left) = node.left.as_deref_mut() {
		optimize_node(left, Slot::Operand)?;
	}
	if let Some(right) = node.right.as_deref_mut() {
		optimize_node(right, divisor)?;
	}

	if !node.is_leaf() {
		remove_redundant_casts(node);
		resolve_operation(node);
		if let Some(left) = node.left.as_deref_mut().filter(|left| left.is_cast()) {
			rewrite(left, Slot::Operand)?;
		}
		if let Some(right) = node.right.as_deref_mut().filter(|right| right.is_cast()) {
			rewrite(right, divisor)?;
		}
	}
	rewrite(node, slot)
}

/// Replace the node by the result of the first rule that applies to it.
fn rewrite(node: &mut SyntaxNode, slot: Slot) -> Result<(), TacError> {
	let replacement = match fold_constants(node)? {
		Some(folded) => Some(folded),
		None => fold_cast(node)?.or_else(|| drop_float_cast(node)).or_else(|| simplify_identity(node)),
	};
	let Some(replacement) = replacement else {
		return Ok(());
	};
	if let (Slot::Divisor(position), Some(true)) = (slot, replacement.token.number().map(NumericLiteral::is_zero)) {
		return Err(OptimizationError::new(position, OptimizationErrorType::DivisionByZero).into());
	}
	*node = replacement;
	Ok(())
}

/// Drop a cast child when its sibling is an integer.
fn remove_redundant_casts(node: &mut SyntaxNode) {
	let (Some(left), Some(right)) = (node.left.as_deref(), node.right.as_deref()) else {
		return;
	};
	let unwrap_left = left.is_cast() && right.result == OperationResult::Integer;
	let unwrap_right = right.is_cast() && left.result == OperationResult::Integer;
	if unwrap_left {
		node.left = node.left.take().and_then(|cast| cast.right);
	}
	if unwrap_right {
		node.right = node.right.take().and_then(|cast| cast.right);
	}
}

fn number_leaf(literal: NumericLiteral) -> SyntaxNode { SyntaxNode::leaf(Token::synthesized(TokenKind::Number(literal))) }

/// Evaluate an operator over two numbers.
fn fold_constants(node: &SyntaxNode) -> Result<Option<SyntaxNode>, TacError> {
	let left = node.left.as_deref().and_then(|left| left.token.number());
	let right = node.right.as_deref().and_then(|right| right.token.number());
	let (Some(left), Some(right), Some(operator)) = (left, right, node.operator()) else {
		return Ok(None);
	};

	let result = operator.apply(left.value(), right.value());
	let kind = if operator == Operator::Divide || node.result == OperationResult::Float {
		DataType::Float
	} else {
		DataType::Integer
	};
	if !result.is_finite() || (kind == DataType::Integer && result.abs() >= INTEGER_LIMIT) {
		let operation = format!("{} {} {}", left.text(), operator.lexeme(), right.text());
		return Err(OptimizationError::new(node.token.position, OptimizationErrorType::Overflow(operation)).into());
	}

	let magnitude = match kind {
		DataType::Integer => NumericLiteral::from_int(result.abs() as i32)?,
		DataType::Float => NumericLiteral::from_float(result.abs())?,
	};
	if result >= 0.0 {
		return Ok(Some(number_leaf(magnitude)));
	}
	let subtract = Token::synthesized(TokenKind::Operator(Operator::Subtract));
	let mut negated = SyntaxNode::binary(subtract, number_leaf(NumericLiteral::zero(kind)), number_leaf(magnitude));
	negated.result = kind.into();
	Ok(Some(negated))
}

/// Replace a cast over a number by the float number.
fn fold_cast(node: &SyntaxNode) -> Result<Option<SyntaxNode>, TacError> {
	if !node.is_cast() {
		return Ok(None);
	}
	match node.right.as_deref().and_then(|operand| operand.token.number()) {
		Some(literal) => Ok(Some(number_leaf(NumericLiteral::from_float(literal.value())?))),
		None => Ok(None),
	}
}

/// A cast whose operand became a float, e.g. `(i2f (* 1.5 (i2f b)))` after `6 / 4` folded.
fn drop_float_cast(node: &SyntaxNode) -> Option<SyntaxNode> {
	let operand = node.right.as_deref().filter(|operand| node.is_cast() && operand.result == OperationResult::Float)?;
	Some(operand.clone())
}

/// Remove operations that leave one operand unchanged or always yield zero.
fn simplify_identity(node: &SyntaxNode) -> Option<SyntaxNode> {
	use Operator::*;

	let (left, right) = (node.left.as_deref()?, node.right.as_deref()?);
	let operator = node.operator()?;
	let token = match (&left.token.kind, &right.token.kind) {
		(TokenKind::Identifier(_), TokenKind::Number(number)) => match operator {
			Add | Subtract if number.is_zero() => &left.token,
			Multiply if number.is_zero() => &right.token,
			Multiply | Divide if number.is_one() => &left.token,
			_ => return None,
		},
		(TokenKind::Number(number), TokenKind::Identifier(_)) => match operator {
			Add if number.is_zero() => &right.token,
			Multiply if number.is_zero() => &left.token,
			Multiply if number.is_one() => &right.token,
			_ => return None,
		},
		(TokenKind::Identifier(a), TokenKind::Identifier(b)) if operator == Subtract && a.attribute() == b.attribute() => {
			return Some(number_leaf(NumericLiteral::zero(a.r#type())));
		}
		_ => return None,
	};
	Some(SyntaxNode::leaf(token.clone()))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		parser::Parser,
		scanner::Scanner,
		semantic::{analyze, tests::assert_consistent},
	};

	fn analyzed(input: &str) -> SyntaxTree {
		let (tokens, _) = Scanner::new(input).scan_tokens().unwrap();
		let mut tree = Parser::new(tokens).parse().unwrap();
		analyze(&mut tree).unwrap();
		tree
	}

	fn optimized(input: &str, equals: &str) {
		let mut tree = analyzed(input);
		optimize(&mut tree).unwrap();
		assert_eq!(tree.to_string(), equals);
	}

	fn simplified(input: &str, equals: &str) {
		let mut tree = analyzed(input);
		simplify(&mut tree).unwrap();
		assert_eq!(tree.to_string(), equals);
	}

	fn optimization_error(input: &str) -> OptimizationError {
		let mut tree = analyzed(input);
		match optimize(&mut tree) {
			Err(TacError::OptimizationError(e)) => e,
			other => panic!("expected an optimization error, got {other:?}"),
		}
	}

	#[test]
	fn constant_folding() {
		optimized("a + 2 * 3", "(+ <id,1> 6)");
		optimized("a * (2 - 5)", "(* <id,1> (- 0 3))");
		optimized("a[f] + 6 / 4", "(+ <id,1> 1.5)");
		optimized("a + 6 / 4", "(+ (i2f <id,1>) 1.5)");
		optimized("a[f] - 1.5 * 3", "(- <id,1> 4.5)");
		optimized("a[f] * (1 - 1.5)", "(* <id,1> (- 0.0 0.5))");
		optimized("(1-1)/x", "(/ 0 <id,1>)");
	}

	#[test]
	fn cast_folding() {
		optimized("a[f] + 2", "(+ <id,1> 2.0)");
		optimized("a[f] / (2 + 3)", "(/ <id,1> 5.0)");
	}

	#[test]
	fn casts_over_floats_are_dropped() {
		optimized("a[f] + 6 / 4 * b", "(+ <id,1> (* 1.5 (i2f <id,2>)))");
		optimized("a[f] - (1 / 2 + b)", "(- <id,1> (+ 0.5 (i2f <id,2>)))");
	}

	#[test]
	fn optimized_types_are_consistent() {
		for input in ["a[f] + 6 / 4 * b", "a * (2 - 5) + b[f] / 3", "(x - 0) * (y + 1.5) - 2 * 3", "c[f] * (7 / 2 - d)"] {
			let mut tree = analyzed(input);
			optimize(&mut tree).unwrap();
			assert_consistent(&tree.root);
		}
	}

	#[test]
	fn identities() {
		simplified("a + 0", "<id,1>");
		simplified("0 + a", "<id,1>");
		simplified("a - 0", "<id,1>");
		simplified("a * 1", "<id,1>");
		simplified("1 * a", "<id,1>");
		simplified("a / 1", "<id,1>");
		simplified("a * 0", "0");
		simplified("0 * a", "0");
		simplified("a - a", "0");
		simplified("b[f] - b[f]", "0.0");
		simplified("b[f] * 0", "0.0");
		optimized("b * (a - 0) + 1 * c", "(+ (* <id,1> <id,2>) <id,3>)");
		optimized("0 - a", "(- 0 <id,1>)");
		optimized("1 / a", "(/ 1 <id,1>)");
	}

	#[test]
	fn redundant_casts() {
		let integer = |input: &str| analyzed(input).root;
		let mut node = SyntaxNode::binary(
			Token::synthesized(TokenKind::Operator(Operator::Add)),
			SyntaxNode::cast(integer("a")),
			integer("b"),
		);
		remove_redundant_casts(&mut node);
		resolve_operation(&mut node);
		assert_eq!(node.to_string(), "(+ <id,1> <id,1>)");
		assert_eq!(node.result, OperationResult::Integer);
	}

	#[test]
	fn degenerate_expressions() {
		let error = optimization_error("2*3-6");
		assert_eq!(error.r#type(), &OptimizationErrorType::Degenerate("<0>".to_string()));
		let error = optimization_error("a + 0");
		assert_eq!(error.r#type(), &OptimizationErrorType::Degenerate("<id,1>".to_string()));
	}

	#[test]
	fn division_by_folded_zero() {
		let error = optimization_error("x / (1 - 1)");
		assert_eq!((error.position(), error.r#type()), (Some(3), &OptimizationErrorType::DivisionByZero));
		let error = optimization_error("x / (y - y)");
		assert_eq!(error.position(), Some(3));
		let error = optimization_error("x[f] / (0 * y)");
		assert_eq!(error.position(), Some(6));
		let error = optimization_error("x / (0 * y + z * 0)");
		assert_eq!(error.r#type(), &OptimizationErrorType::DivisionByZero);
	}

	#[test]
	fn folding_overflow() {
		let error = optimization_error("a + 2000000000 * 2");
		assert_eq!(error.r#type(), &OptimizationErrorType::Overflow("2000000000 * 2".to_string()));
	}

	#[test]
	fn idempotent() {
		for input in ["a * (2 - 5) + b[f] / 3", "a + 6 / 4 * c", "(x - 0) * (y + 1.5) - 2 * 3", "q / (1 + 1)"] {
			let mut once = analyzed(input);
			optimize(&mut once).unwrap();
			let mut twice = once.clone();
			optimize(&mut twice).unwrap();
			assert_eq!(once, twice);
		}
	}
}
