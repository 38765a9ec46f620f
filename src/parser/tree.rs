//! Syntax tree nodes
//!
//! The tree owns its nodes top-down. A node has no link to its parent, so
//! rewriting passes return replacement nodes and the caller installs them.
//! Binary operators have both children, the int to float cast only has a
//! right child, numbers and identifiers are leaves.

use anyhow::{Context, bail};

use crate::scanner::{DataType, Operator, Token, TokenKind};

/// Resolved type of the value a node produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationResult {
	Integer,
	Float,
	Unknown,
}

impl OperationResult {
	pub fn data_type(self) -> Option<DataType> {
		match self {
			OperationResult::Integer => Some(DataType::Integer),
			OperationResult::Float => Some(DataType::Float),
			OperationResult::Unknown => None,
		}
	}
}

impl From<DataType> for OperationResult {
	fn from(r#type: DataType) -> Self {
		match r#type {
			DataType::Integer => OperationResult::Integer,
			DataType::Float => OperationResult::Float,
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxNode {
	pub token:  Token,
	pub left:   Option<Box<SyntaxNode>>,
	pub right:  Option<Box<SyntaxNode>>,
	pub result: OperationResult,
}

impl SyntaxNode {
	/// A number or identifier leaf, typed after its token.
	pub fn leaf(token: Token) -> Self {
		let result = token.data_type().map_or(OperationResult::Unknown, OperationResult::from);
		Self { token, left: None, right: None, result }
	}

	pub fn binary(token: Token, left: SyntaxNode, right: SyntaxNode) -> Self {
		Self { token, left: Some(Box::new(left)), right: Some(Box::new(right)), result: OperationResult::Unknown }
	}

	/// Wraps `operand` in an int to float cast.
	pub fn cast(operand: SyntaxNode) -> Self {
		let token = Token::synthesized(TokenKind::Operator(Operator::IntToFloat));
		Self::cast_with(token, operand)
	}

	fn cast_with(token: Token, operand: SyntaxNode) -> Self {
		Self { token, left: None, right: Some(Box::new(operand)), result: OperationResult::Float }
	}

	pub fn operator(&self) -> Option<Operator> { self.token.operator() }

	pub fn is_leaf(&self) -> bool { self.left.is_none() && self.right.is_none() }

	pub fn is_cast(&self) -> bool { self.operator().is_some_and(Operator::is_cast) }

	/// Nodes in post-order: left subtree, right subtree, then the node.
	pub fn post_order(&self) -> Vec<&SyntaxNode> {
		let mut nodes = Vec::new();
		self.collect_post_order(&mut nodes);
		nodes
	}

	fn collect_post_order<'a>(&'a self, nodes: &mut Vec<&'a SyntaxNode>) {
		if let Some(left) = &self.left {
			left.collect_post_order(nodes);
		}
		if let Some(right) = &self.right {
			right.collect_post_order(nodes);
		}
		nodes.push(self);
	}
}

impl std::fmt::Display for SyntaxNode {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match (&self.left, &self.right) {
			(Some(left), Some(right)) => write!(f, "({} {left} {right})", self.token.text()),
			(None, Some(operand)) | (Some(operand), None) => write!(f, "({} {operand})", self.token.text()),
			(None, None) => write!(f, "{}", self.token.text()),
		}
	}
}

/// A whole expression. Cloning copies the tree deeply.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxTree {
	pub root: SyntaxNode,
}

impl SyntaxTree {
	pub fn new(root: SyntaxNode) -> Self { Self { root } }

	/// Build a tree from a postfix sequence, consuming it from the end. An
	/// operator takes its right subtree first, then its left one.
	pub fn from_postfix(mut postfix: Vec<Token>) -> anyhow::Result<Self> {
		let root = Self::build(&mut postfix)?;
		if !postfix.is_empty() {
			bail!("{} tokens left over after building the tree", postfix.len());
		}
		Ok(Self { root })
	}

	fn build(postfix: &mut Vec<Token>) -> anyhow::Result<SyntaxNode> {
		let token = postfix.pop().context("Postfix sequence ended before the tree was complete")?;
		match token.operator() {
			Some(operator) if operator.is_cast() => {
				let operand = Self::build(postfix)?;
				Ok(SyntaxNode::cast_with(token, operand))
			}
			Some(_) => {
				let right = Self::build(postfix)?;
				let left = Self::build(postfix)?;
				Ok(SyntaxNode::binary(token, left, right))
			}
			None if token.is_operand() => Ok(SyntaxNode::leaf(token)),
			None => bail!("Cannot build a tree node from {token}"),
		}
	}

	/// Tokens of the tree in post-order.
	pub fn postfix(&self) -> Vec<Token> { self.root.post_order().into_iter().map(|node| node.token.clone()).collect() }
}

impl std::fmt::Display for SyntaxTree {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.root) }
}
