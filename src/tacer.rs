use std::{
	fs::{read_to_string, write},
	io::Write,
	path::{Path, PathBuf},
};

use anyhow::{Context, bail, ensure};

use crate::{
	InterpreterError, TacError,
	codegen::{self, CodegenMode},
	dump,
	interpreter::{Interpreter, NumericCell, ValueSource},
	parser::{Parser, SyntaxTree},
	program::PortableProgram,
	scanner::{Scanner, Token, TokenKind},
	semantic,
	symbol::SymbolTable,
};

/// The last translation stage to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Stage {
	/// Tokens and symbol table
	#[value(name = "lex")]
	Lexical,
	/// Syntax tree before type resolution
	#[value(name = "syn")]
	Syntax,
	/// Syntax tree with resolved types and casts
	#[value(name = "sem")]
	Semantic,
	/// Three-address code and its symbol table
	#[value(name = "gen1")]
	ThreeAddress,
	/// Postfix notation and its symbol table
	#[value(name = "gen2")]
	Postfix,
	/// Optimal three-address code packed with its symbols into a program file
	#[value(name = "gen3")]
	Program,
}

impl Stage {
	pub fn name(self) -> &'static str {
		match self {
			Stage::Lexical => "lex",
			Stage::Syntax => "syn",
			Stage::Semantic => "sem",
			Stage::ThreeAddress => "gen1",
			Stage::Postfix => "gen2",
			Stage::Program => "gen3",
		}
	}

	/// Number of output files the stage writes.
	pub fn outputs(self) -> usize {
		match self {
			Stage::Lexical | Stage::ThreeAddress | Stage::Postfix => 2,
			Stage::Syntax | Stage::Semantic | Stage::Program => 1,
		}
	}

	/// Whether the stage can generate in optimal mode on request.
	pub fn accepts_mode(self) -> bool { matches!(self, Stage::ThreeAddress | Stage::Postfix) }
}

/// What a translation stage produced.
#[derive(Debug)]
pub enum StageOutput {
	Tokens { tokens: String, symbols: String },
	Tree(String),
	Code { code: String, symbols: String },
	Postfix { postfix: String, symbols: String },
	Program(PortableProgram),
}

/// The front end's results for one expression.
#[derive(Debug, Clone)]
pub struct Translation {
	pub tokens:  Vec<Token>,
	pub symbols: SymbolTable,
	/// Syntax tree with resolved types
	pub tree:    SyntaxTree,
}

/// Tacer is the entry point of the translator and the interpreter.
pub struct Tacer;

impl Tacer {
	/// Scan, parse and analyze an expression.
	pub fn compile(&self, source: &str) -> Result<Translation, TacError> {
		let (tokens, symbols) = Scanner::new(source).scan_tokens()?;
		let mut tree = Parser::new(tokens.clone()).parse()?;
		semantic::analyze(&mut tree)?;
		Ok(Translation { tokens, symbols, tree })
	}

	/// Run the pipeline up to `stage`.
	pub fn translate(&self, source: &str, stage: Stage, mode: CodegenMode) -> Result<StageOutput, TacError> {
		let (tokens, mut symbols) = Scanner::new(source).scan_tokens()?;
		if stage == Stage::Lexical {
			return Ok(StageOutput::Tokens { tokens: dump::tokens(&tokens, &symbols), symbols: dump::symbols(&symbols) });
		}
		let mut tree = Parser::new(tokens).parse()?;
		if stage == Stage::Syntax {
			return Ok(StageOutput::Tree(dump::tree(&tree)));
		}
		semantic::analyze(&mut tree)?;
		Ok(match stage {
			Stage::Lexical | Stage::Syntax | Stage::Semantic => StageOutput::Tree(dump::tree(&tree)),
			Stage::Postfix => {
				let postfix = codegen::postfix(&tree, mode)?;
				StageOutput::Postfix { postfix: dump::postfix(&postfix), symbols: dump::symbols_portable(&symbols) }
			}
			Stage::ThreeAddress => {
				let code = codegen::three_address(&tree, &mut symbols, mode)?;
				StageOutput::Code { code: dump::commands(&code), symbols: dump::symbols_portable(&symbols) }
			}
			Stage::Program => {
				let code = codegen::three_address(&tree, &mut symbols, CodegenMode::Optimal)?;
				StageOutput::Program(PortableProgram::new(code, symbols)?)
			}
		})
	}

	/// Translate the expression in `input` and write the stage's results to `outputs`.
	pub fn translate_file<P: AsRef<Path>>(
		&self,
		input: P,
		stage: Stage,
		optimal: bool,
		outputs: &[PathBuf],
	) -> Result<(), TacError> {
		check_outputs(stage, optimal, outputs)?;
		let source = read_source(input.as_ref())?;
		let mode = if optimal { CodegenMode::Optimal } else { CodegenMode::Plain };

		match self.translate(&source, stage, mode)? {
			StageOutput::Tree(tree) => write_outputs(outputs, &[tree])?,
			StageOutput::Tokens { tokens: first, symbols }
			| StageOutput::Code { code: first, symbols }
			| StageOutput::Postfix { postfix: first, symbols } => write_outputs(outputs, &[first, symbols])?,
			StageOutput::Program(program) => program.write(&outputs[0])?,
		}
		Ok(())
	}

	/// Compile an expression and execute it right away.
	///
	/// An expression that is a single number or identifier needs no commands and
	/// evaluates to its own value.
	pub fn run(
		&self,
		source: &str,
		mode: CodegenMode,
		values: &mut impl ValueSource,
		trace: &mut impl Write,
	) -> Result<NumericCell, TacError> {
		let Translation { mut symbols, tree, .. } = self.compile(source)?;
		let code = codegen::three_address(&tree, &mut symbols, mode)?;
		let mut interpreter = Interpreter::new(&symbols, values)?;
		interpreter.execute(&code, trace)?;

		if let Some(result) = interpreter.result() {
			return Ok(result);
		}
		match &tree.root.token.kind {
			TokenKind::Number(literal) => Ok(NumericCell::from_literal(literal)),
			TokenKind::Identifier(identifier) => interpreter
				.cell(identifier.attribute())
				.ok_or_else(|| InterpreterError::UndefinedSymbol(identifier.attribute()).into()),
			_ => Err(anyhow::anyhow!("Expression {} produced no commands", tree.root.token).into()),
		}
	}

	/// Execute a program file written by the `gen3` stage.
	pub fn interpret_file<P: AsRef<Path>>(
		&self,
		path: P,
		values: &mut impl ValueSource,
		trace: &mut impl Write,
	) -> Result<Option<NumericCell>, TacError> {
		let program = PortableProgram::read(path)?;
		let mut interpreter = Interpreter::new(program.symbols(), values)?;
		interpreter.execute(program.code(), trace)?;
		Ok(interpreter.result())
	}
}

fn check_outputs(stage: Stage, optimal: bool, outputs: &[PathBuf]) -> anyhow::Result<()> {
	ensure!(!optimal || stage.accepts_mode(), "Optimal generation only applies to gen1 and gen2");
	ensure!(
		outputs.len() == stage.outputs(),
		"Stage {} writes {} output files, {} given",
		stage.name(),
		stage.outputs(),
		outputs.len()
	);
	if let [first, second] = outputs {
		ensure!(first != second, "Output files must have different names");
	}
	Ok(())
}

fn read_source(path: &Path) -> anyhow::Result<String> {
	let source = read_to_string(path).with_context(|| format!("Failed open source file {}", path.display()))?;
	if source.trim().is_empty() {
		bail!("Source file {} is empty", path.display());
	}
	Ok(source)
}

fn write_outputs(paths: &[PathBuf], contents: &[String]) -> anyhow::Result<()> {
	for (path, content) in paths.iter().zip(contents) {
		write(path, content).with_context(|| format!("Failed write output file {}", path.display()))?;
	}
	Ok(())
}
