//! # From expression text to executed three-address code
//!
//! Source expression: `(a + b[f]) * 2`

//! ## Scanning
//!
//! The scanner turns characters into tokens. Operators and brackets are
//! single characters, everything else is read as a run up to the next
//! operator, bracket or whitespace, and the run becomes a number or an
//! identifier. Identifiers carry their type in an optional suffix, `b[f]` is a
//! float and a bare `a` is an integer. Each new name gets a row in the symbol
//! table, and its token keeps the row's attribute:
//!
//! `<(> <id,1> <+> <id,2> <)> <*> <2>`

//! ## Parsing
//!
//! The parser checks which tokens may stand next to each other, converts the
//! infix sequence to postfix with the shunting-yard algorithm and builds the
//! syntax tree from the postfix sequence.
//!
//! ``` markdown
//! <*>
//!  ├───<+>
//!  │    ├───<id,1>
//!  │    └───<id,2>
//!  └───<2>
//! ```

//! ## Semantic analysis
//!
//! Types are resolved bottom-up. Mixing an integer with a float makes a float
//! operation, and the integer side is wrapped in an int to float cast. Dividing
//! by the literal zero is rejected here.
//!
//! ``` markdown
//! <*>
//!  ├───<+>
//!  │    ├───Int2Float
//!  │    │    └───<id,1>
//!  │    └───<id,2>
//!  └───Int2Float
//!       └───<2>
//! ```

//! ## Optimization
//!
//! Optional. Constants are folded, casts over constants become float
//! constants, casts that are no longer needed are dropped, and operations such
//! as `x * 1` or `x - x` are simplified. An expression that collapses into a
//! single value is rejected, since there is nothing left to compute.

//! ## Code generation
//!
//! The tree is lowered to three-address code, one command per operation, with
//! temporaries `T<n>` added to the symbol table as receivers. In optimal mode a
//! temporary is reused as receiver once its value has been read:
//!
//! ``` markdown
//! i2f <id,3> <id,1>
//! add <id,3> <id,3> <id,2>
//! mul <id,3> <id,3> 2.0
//! ```
//!
//! The tree can also be flattened into postfix notation. The code and its
//! symbol table are packed into a portable program file.

//! ## Interpretation
//!
//! The interpreter asks for the values of user identifiers, executes the
//! commands over typed cells and reports the receiver of the last command.

pub mod cli;
pub mod codegen;
pub mod dump;
mod error;
pub mod interpreter;
pub mod optimizer;
pub mod parser;
pub mod program;
pub mod scanner;
pub mod semantic;
pub mod symbol;
mod tacer;

pub use codegen::CodegenMode;
pub use error::{
	TacError,
	interpreter::InterpreterError,
	object::{ObjectError, ObjectKind},
	optimizer::{OptimizationError, OptimizationErrorType},
	parser::{SyntaxError, SyntaxErrorType},
	scanner::{LexicalError, LexicalErrorType},
	semantic::{SemanticError, SemanticErrorType},
};
pub use tacer::{Stage, StageOutput, Tacer, Translation};
