//! Code generation from an analyzed syntax tree.
//!
//! Three-address code is produced by lowering the tree bottom-up. Every
//! operator node becomes one command writing into a receiver, and the node is
//! then replaced by a leaf holding that receiver, so its parent reads the
//! receiver as an operand:
//!
//! ``` markdown
//! 3 + 4 * 2      mul <id,1> 4 2
//!                add <id,2> 3 <id,1>
//! ```
//!
//! In plain mode each command gets a fresh temporary `T<n>`. In optimal mode
//! the tree is optimized first, and a command writes into an operand that is
//! already a temporary of the same type when there is one.

mod command;
mod postfix;

use anyhow::anyhow;
pub use command::*;
pub use postfix::postfix;

use crate::{
	TacError, optimizer,
	parser::{SyntaxNode, SyntaxTree},
	scanner::{Identifier, Provenance, Token, TokenKind},
	symbol::SymbolTable,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CodegenMode {
	#[default]
	Plain,
	/// Optimize the tree and reuse temporaries as receivers.
	Optimal,
}

/// Lower a copy of the tree to three-address code, registering temporaries in `symbols`.
///
/// A tree that is a single leaf needs no commands.
pub fn three_address(
	tree: &SyntaxTree,
	symbols: &mut SymbolTable,
	mode: CodegenMode,
) -> Result<Vec<ThreeAddressCommand>, TacError> {
	let mut tree = tree.clone();
	if mode == CodegenMode::Optimal {
		optimizer::optimize(&mut tree)?;
	}
	let mut code = Vec::new();
	if !tree.root.is_leaf() {
		lower(&mut tree.root, symbols, mode, &mut code)?;
	}
	Ok(code)
}

fn lower(
	node: &mut SyntaxNode,
	symbols: &mut SymbolTable,
	mode: CodegenMode,
	code: &mut Vec<ThreeAddressCommand>,
) -> Result<(), TacError> {
	for child in [&mut node.left, &mut node.right] {
		if let Some(child) = child.as_deref_mut().filter(|child| !child.is_leaf()) {
			lower(child, symbols, mode, code)?;
		}
	}

	let r#type = node.result.data_type().ok_or_else(|| anyhow!("Operation {} has no resolved type", node.token))?;
	let reusable = match mode {
		CodegenMode::Optimal => reusable_receiver(node),
		CodegenMode::Plain => None,
	};
	let receiver = match reusable {
		Some(receiver) => receiver,
		None => symbols.define_temporary(r#type)?,
	};
	let receiver = Token::synthesized(TokenKind::Identifier(receiver));

	let left = node.left.as_deref().map(|left| &left.token);
	let right = node.right.as_deref().map(|right| &right.token);
	code.push(ThreeAddressCommand::new(&node.token, &receiver, left, right)?);
	*node = SyntaxNode::leaf(receiver);
	Ok(())
}

/// A temporary among the operands, left first, whose type matches the node's.
fn reusable_receiver(node: &SyntaxNode) -> Option<Identifier> {
	[&node.left, &node.right]
		.into_iter()
		.flatten()
		.filter_map(|child| child.token.identifier())
		.find(|identifier| {
			identifier.provenance() == Provenance::Program && Some(identifier.r#type()) == node.result.data_type()
		})
		.copied()
}
