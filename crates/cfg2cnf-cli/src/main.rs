use anyhow::Context as _;
use cfg2cnf::{cyk, grammar::Grammar, syntax, Config};
use clap::Parser;
use std::{
    fs,
    io::{self, BufRead, IsTerminal},
    path::PathBuf,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The path of grammar definition file. Read from stdin when omitted.
    input: Option<PathBuf>,

    /// Print the grammar produced by every stage of the conversion.
    #[arg(long)]
    steps: bool,

    /// Keep the empty string when the start symbol is nullable.
    #[arg(long)]
    keep_empty_start: bool,

    /// Write the converted grammar to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Check whether the converted grammar derives this word.
    #[arg(long, value_name = "WORD")]
    check: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    tracing::trace!("CLI args = {:?}", args);

    let source = match &args.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| anyhow::anyhow!("failed to read {}", path.display()))?,
        None => read_stdin().context("failed to read the grammar from stdin")?,
    };

    let parsed = syntax::parse(&source);
    for error in &parsed.errors {
        println!("[warning] {}", error);
    }
    let grammar = parsed.grammar;

    let empty_nonterminals: Vec<_> = grammar
        .rules()
        .filter_map(|(left, right)| right.is_empty().then_some(left))
        .collect();
    if !empty_nonterminals.is_empty() {
        println!(
            "[warning] The following nonterminals have no associated production rule: {:?}",
            empty_nonterminals
        );
    }

    let mut config = Config::new();
    if args.keep_empty_start {
        config = config.keep_empty_start();
    }
    let stages = config
        .run(&grammar)
        .context("failed to convert the grammar into Chomsky Normal Form")?;

    if args.steps {
        for (title, grammar) in stages.iter() {
            println!("{}:", title);
            print!("{}", grammar);
            println!();
        }
        if !stages.terminal_mapping.is_empty() {
            println!("Isolated terminals:");
            for (terminal, nonterminal) in &stages.terminal_mapping {
                println!("{} -> {}", nonterminal, terminal);
            }
            println!();
        }
    }

    let cnf = stages.into_grammar();
    report_words(&cnf, &args.check);

    match &args.output {
        Some(out_file) => {
            fs::write(out_file, cnf.to_string()).with_context(|| {
                anyhow::anyhow!("failed to write the grammar to {}", out_file.display())
            })?;
        }
        None if !args.steps => print!("{}", cnf),
        None => (),
    }

    Ok(())
}

/// Read lines until a line holding only `*`, or the end of input.
fn read_stdin() -> io::Result<String> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        eprintln!("Enter the grammar as `S -> aB | $` lines, then a line holding only `*`:");
    }
    let mut source = String::new();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim() == "*" {
            break;
        }
        source.push_str(&line);
        source.push('\n');
    }
    Ok(source)
}

fn report_words(grammar: &Grammar, words: &[String]) {
    for word in words {
        let verdict = if cyk::recognize(grammar, word) {
            "accepted"
        } else {
            "rejected"
        };
        println!("{:?}: {}", word, verdict);
    }
}
