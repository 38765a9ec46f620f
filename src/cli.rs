use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::Stage;

#[derive(Parser)]
#[command(
	name = "tacer",
	version,
	about = "Translate arithmetic expressions to three-address code and run them",
	after_long_help = "Identifiers are typed with a suffix: a[i] is an integer, b[f] is a float."
)]
pub struct Cli {
	#[command(subcommand)]
	pub mode: Mode,
}

#[derive(Subcommand, Debug)]
pub enum Mode {
	/// Translate the expression in a file up to the given stage
	Translate {
		/// File holding a single expression
		input:   PathBuf,
		/// Last stage to run
		#[arg(value_enum)]
		stage:   Stage,
		/// Optimize before generating code (gen1 and gen2 only)
		#[arg(long)]
		opt:     bool,
		/// Output files: tokens and symbols for lex, the tree for syn and sem,
		/// code and symbols for gen1 and gen2, the program for gen3
		#[arg(required = true)]
		outputs: Vec<PathBuf>,
	},
	/// Run a program file written by gen3, asking for the values of its variables
	Interpret { program: PathBuf },
	/// Translate and run an expression given on the command line
	Run {
		expression: String,
		/// Optimize before generating code
		#[arg(long)]
		opt:        bool,
	},
}
