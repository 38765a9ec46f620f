//! Type resolution over the syntax tree.
//!
//! Resolution runs bottom-up. Leaves take the type of their number or
//! identifier. An operator is an integer operation when both operands are
//! integers, otherwise it is a float operation and every integer operand is
//! wrapped in an int to float cast:
//!
//! ``` markdown
//! a + b[f]          (+ <id,1> <id,2>)
//!                   └── (+ (i2f <id,1>) <id,2>)
//! ```
//!
//! Dividing by the literal zero is rejected before the division's operands are
//! resolved.

use crate::{
	SemanticError, SemanticErrorType,
	parser::{OperationResult, SyntaxNode, SyntaxTree},
	scanner::{NumericLiteral, Operator},
};

/// Resolve the type of every node, inserting casts where operand types differ.
pub fn analyze(tree: &mut SyntaxTree) -> Result<(), SemanticError> { analyze_node(&mut tree.root) }

fn analyze_node(node: &mut SyntaxNode) -> Result<(), SemanticError> {
	if node.operator() == Some(Operator::Divide)
		&& node.right.as_ref().is_some_and(|right| right.token.number().is_some_and(NumericLiteral::is_zero))
	{
		let position = node.token.position.unwrap_or_default();
		return Err(SemanticError::new(position, SemanticErrorType::DivisionByZero));
	}
	if let Some(left) = node.left.as_deref_mut() {
		analyze_node(left)?;
	}
	if let Some(right) = node.right.as_deref_mut() {
		analyze_node(right)?;
	}
	resolve_operation(node);
	Ok(())
}

/// Resolve the type of one node from its already resolved children.
pub(crate) fn resolve_operation(node: &mut SyntaxNode) {
	if node.is_leaf() {
		node.result = node.token.data_type().map_or(OperationResult::Unknown, OperationResult::from);
		return;
	}
	if node.is_cast() {
		node.result = OperationResult::Float;
		return;
	}
	let (Some(left), Some(right)) = (node.left.as_deref(), node.right.as_deref()) else {
		return;
	};
	if left.result == OperationResult::Integer && right.result == OperationResult::Integer {
		node.result = OperationResult::Integer;
		return;
	}

	node.result = OperationResult::Float;
	for child in [&mut node.left, &mut node.right] {
		if child.as_ref().is_some_and(|c| c.result == OperationResult::Integer) {
			*child = child.take().map(|operand| Box::new(SyntaxNode::cast(*operand)));
		}
	}
}
