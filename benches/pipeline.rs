use std::{collections::HashMap, hint::black_box, io::sink};

use criterion::{Criterion, criterion_group, criterion_main};
use tacer::{CodegenMode, Tacer, codegen, parser::Parser, scanner::Scanner};

/// `(a + b[f]) * 2 - c / 4` chained `terms` times.
fn workload(terms: usize) -> String {
	(0..terms).map(|i| format!("(a + b[f]) * {} - c / {}", i + 2, i + 1)).collect::<Vec<_>>().join(" + ")
}

fn bench_pipeline(c: &mut Criterion) {
	for (label, terms) in [("small", 1), ("large", 200)] {
		let source = workload(terms);
		let (tokens, symbols) = Scanner::new(&source).scan_tokens().expect("scan");
		let translation = Tacer.compile(&source).expect("compile");

		c.bench_function(&format!("scan_{label}"), |b| {
			b.iter(|| black_box(Scanner::new(black_box(&source)).scan_tokens().expect("scan")))
		});

		c.bench_function(&format!("parse_{label}"), |b| {
			b.iter(|| black_box(Parser::new(black_box(tokens.clone())).parse().expect("parse")))
		});

		for mode in [CodegenMode::Plain, CodegenMode::Optimal] {
			c.bench_function(&format!("three_address_{mode:?}_{label}").to_lowercase(), |b| {
				b.iter(|| {
					let mut symbols = symbols.clone();
					black_box(codegen::three_address(&translation.tree, &mut symbols, mode).expect("codegen"))
				})
			});
		}

		let mut values: HashMap<String, f32> = [("a", 1.0), ("b", 2.5), ("c", 10.0)]
			.into_iter()
			.map(|(name, value)| (name.to_string(), value))
			.collect();
		c.bench_function(&format!("run_{label}"), |b| {
			b.iter(|| black_box(Tacer.run(black_box(&source), CodegenMode::Optimal, &mut values, &mut sink()).expect("run")))
		});
	}
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
