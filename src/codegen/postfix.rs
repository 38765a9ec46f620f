use super::CodegenMode;
use crate::{TacError, optimizer, parser::SyntaxTree, scanner::Token};

/// Flatten a copy of the tree into postfix order. No temporaries are needed.
pub fn postfix(tree: &SyntaxTree, mode: CodegenMode) -> Result<Vec<Token>, TacError> {
	let mut tree = tree.clone();
	if mode == CodegenMode::Optimal {
		optimizer::optimize(&mut tree)?;
	}
	Ok(tree.postfix())
}
