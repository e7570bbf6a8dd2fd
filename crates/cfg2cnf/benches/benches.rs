use std::{env, fs, path::PathBuf};

use cfg2cnf::{cyk, syntax, Config};
use criterion::{criterion_group, criterion_main, Criterion};

criterion_main!(benches);
criterion_group!(benches, bench_convert, bench_recognize);

fn bench_convert(c: &mut Criterion) {
    for name in ["assignment", "arithmetic", "balanced", "nullable"] {
        let source = load_source(name);
        let grammar = syntax::parse(&source).grammar;

        let mut group = c.benchmark_group(name);
        group.bench_function("parse", |b| {
            b.iter(|| syntax::parse(&source));
        });
        group.bench_function("convert", |b| {
            b.iter(|| Config::new().convert(&grammar).unwrap());
        });
        group.bench_function("convert (keep empty start)", |b| {
            b.iter(|| Config::new().keep_empty_start().convert(&grammar).unwrap());
        });
        group.finish();
    }
}

fn bench_recognize(c: &mut Criterion) {
    let grammar = syntax::parse(&load_source("arithmetic")).grammar;
    let cnf = Config::new().convert(&grammar).unwrap();
    let word = "lnpnrmn".repeat(8).replace("nl", "npl");
    c.bench_function("cyk", |b| {
        b.iter(|| cyk::recognize(&cnf, &word));
    });
}

fn load_source(name: &str) -> String {
    let project_root = env::var_os("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .expect("missing environment variable: `CARGO_MANIFEST_DIR'");
    fs::read_to_string(project_root.join(format!("tests/{}.cfg", name))).unwrap()
}
