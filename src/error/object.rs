/// Kinds of data-model objects whose construction is validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
	Token,
	Identifier,
	NumericLiteral,
	Symbol,
	ThreeAddressCommand,
	PortableProgram,
}

impl std::fmt::Display for ObjectKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let name = match self {
			ObjectKind::Token => "token",
			ObjectKind::Identifier => "identifier",
			ObjectKind::NumericLiteral => "numeric constant",
			ObjectKind::Symbol => "symbol table entry",
			ObjectKind::ThreeAddressCommand => "three-address command",
			ObjectKind::PortableProgram => "portable program",
		};
		write!(f, "{name}")
	}
}

/// A violated data-model invariant. These are programmer errors, never user input errors.
#[derive(thiserror::Error, Debug, PartialEq)]
#[error("Failed to create {kind}: {message}")]
pub struct ObjectError {
	kind:    ObjectKind,
	message: String,
}

impl ObjectError {
	pub fn new(kind: ObjectKind, message: impl Into<String>) -> Self { Self { kind, message: message.into() } }

	pub fn kind(&self) -> ObjectKind { self.kind }
}
