use std::{
	io::{stdin, stdout},
	process::ExitCode,
};

use clap::Parser;
use tacer::{CodegenMode, cli::*, interpreter::PromptValueSource};

fn main() -> ExitCode {
	let tacer = tacer::Tacer;

	match Cli::parse().mode {
		Mode::Translate { input, stage, opt, outputs } => {
			if let Err(e) = tacer.translate_file(&input, stage, opt, &outputs) {
				eprintln!("Failed translate: {e}");
				return ExitCode::FAILURE;
			}
			println!("Translation finished.");
		}
		Mode::Interpret { program } => {
			let mut values = PromptValueSource::new(stdin().lock(), stdout());
			match tacer.interpret_file(&program, &mut values, &mut stdout()) {
				Ok(Some(result)) => println!("Result: {result}"),
				Ok(None) => println!("Program has no commands"),
				Err(e) => {
					eprintln!("Failed interpret: {e}");
					return ExitCode::FAILURE;
				}
			}
		}
		Mode::Run { expression, opt } => {
			let mode = if opt { CodegenMode::Optimal } else { CodegenMode::Plain };
			let mut values = PromptValueSource::new(stdin().lock(), stdout());
			match tacer.run(&expression, mode, &mut values, &mut stdout()) {
				Ok(result) => println!("Result: {result}"),
				Err(e) => {
					eprintln!("Failed run: {e}");
					return ExitCode::FAILURE;
				}
			}
		}
	}
	ExitCode::SUCCESS
}
