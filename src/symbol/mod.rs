//! The symbol table maps attributes to named, typed rows.
//!
//! Attributes are dense and handed out in insertion order starting at 1, and a
//! name is bound to exactly one attribute for the lifetime of the table. The
//! scanner fills it with user identifiers; code generation appends temporaries.
use serde::{Deserialize, Serialize};

use crate::{
	ObjectError, ObjectKind,
	scanner::{Attribute, DataType, Identifier, Provenance, is_identifier_name},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawEntry")]
pub struct SymbolEntry {
	name:       String,
	r#type:     DataType,
	provenance: Provenance,
}

#[derive(Deserialize)]
struct RawEntry {
	name:       String,
	r#type:     DataType,
	provenance: Provenance,
}

impl TryFrom<RawEntry> for SymbolEntry {
	type Error = ObjectError;

	fn try_from(raw: RawEntry) -> Result<Self, Self::Error> { Self::new(raw.name, raw.r#type, raw.provenance) }
}

impl SymbolEntry {
	pub fn new(name: impl Into<String>, r#type: DataType, provenance: Provenance) -> Result<Self, ObjectError> {
		let name = name.into();
		if !is_identifier_name(&name) {
			return Err(ObjectError::new(ObjectKind::Symbol, format!("\"{name}\" is not a valid identifier name")));
		}
		Ok(Self { name, r#type, provenance })
	}

	pub fn name(&self) -> &str { &self.name }

	pub fn r#type(&self) -> DataType { self.r#type }

	pub fn provenance(&self) -> Provenance { self.provenance }
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<SymbolEntry>", into = "Vec<SymbolEntry>")]
pub struct SymbolTable {
	entries: Vec<SymbolEntry>,
}

impl TryFrom<Vec<SymbolEntry>> for SymbolTable {
	type Error = ObjectError;

	fn try_from(entries: Vec<SymbolEntry>) -> Result<Self, Self::Error> {
		let mut table = SymbolTable::new();
		for entry in entries {
			table.insert(entry)?;
		}
		Ok(table)
	}
}

impl From<SymbolTable> for Vec<SymbolEntry> {
	fn from(table: SymbolTable) -> Self { table.entries }
}

impl SymbolTable {
	pub fn new() -> Self { Self { entries: Vec::new() } }

	/// Registers a new name and returns its attribute.
	pub fn define(
		&mut self,
		name: impl Into<String>,
		r#type: DataType,
		provenance: Provenance,
	) -> Result<Attribute, ObjectError> {
		self.insert(SymbolEntry::new(name, r#type, provenance)?)
	}

	fn insert(&mut self, entry: SymbolEntry) -> Result<Attribute, ObjectError> {
		if self.lookup(&entry.name).is_some() {
			return Err(ObjectError::new(ObjectKind::Symbol, format!("\"{}\" is already defined", entry.name)));
		}
		self.entries.push(entry);
		Ok(self.entries.len())
	}

	/// Registers the lowest unused `T<n>` and returns an identifier for it.
	pub fn define_temporary(&mut self, r#type: DataType) -> Result<Identifier, ObjectError> {
		let name = (1..)
			.map(|n| format!("T{n}"))
			.find(|name| self.lookup(name).is_none())
			.ok_or_else(|| ObjectError::new(ObjectKind::Symbol, "no temporary name left"))?;
		let attribute = self.define(name, r#type, Provenance::Program)?;
		Identifier::new(attribute, r#type, Provenance::Program)
	}

	pub fn get(&self, attribute: Attribute) -> Option<&SymbolEntry> {
		attribute.checked_sub(1).and_then(|index| self.entries.get(index))
	}

	pub fn lookup(&self, name: &str) -> Option<(Attribute, &SymbolEntry)> { self.iter().find(|(_, e)| e.name == name) }

	/// Rows in attribute order.
	pub fn iter(&self) -> impl Iterator<Item = (Attribute, &SymbolEntry)> {
		self.entries.iter().enumerate().map(|(index, entry)| (index + 1, entry))
	}

	pub fn len(&self) -> usize { self.entries.len() }

	pub fn is_empty(&self) -> bool { self.entries.is_empty() }

	/// Number of rows synthesized by code generation.
	pub fn temporaries(&self) -> usize {
		self.entries.iter().filter(|e| e.provenance == Provenance::Program).count()
	}
}
