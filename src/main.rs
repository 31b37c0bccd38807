//! dvibhasha - a bilingual-keyword language compiler
//!
//! This is the command-line interface for the dvibhasha compiler.

use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use dvibhasha::codegen::{CodeGenerator, JsBackend, JsOptions};
use dvibhasha::lexer::{lex, lookup_with_script};
use dvibhasha::parse_source;
use dvibhasha::parser::ParseError;

/// dvibhasha - compiles Devanagari or romanized source to JavaScript
#[derive(Parser, Debug)]
#[command(name = "dvibhasha")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input source file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Output file (default: input name with .js extension)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Only run lexer and print tokens (for debugging)
    #[arg(long)]
    tokens: bool,

    /// Only parse and print the syntax tree
    #[arg(long)]
    ast: bool,

    /// Check for syntax errors without writing output
    #[arg(long)]
    check: bool,

    /// Spaces per indentation level in generated code
    #[arg(long, value_name = "N", default_value_t = 4)]
    indent: usize,

    /// Emit a "use strict" prologue
    #[arg(long)]
    strict: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let source = match fs::read_to_string(&args.input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading '{}': {}", args.input.display(), e);
            return ExitCode::FAILURE;
        }
    };

    if args.verbose {
        println!("Compiling: {}", args.input.display());
        println!("Source length: {} bytes", source.len());
    }

    if args.tokens {
        print_tokens(&args.input, &source);
        return ExitCode::SUCCESS;
    }

    let result = parse_source(&source);
    if !result.is_ok() {
        report_errors(&args.input, &result.errors);
        return ExitCode::FAILURE;
    }

    if args.ast {
        for stmt in &result.ast {
            println!("{stmt}");
        }
        return ExitCode::SUCCESS;
    }

    if args.check {
        println!("{}: OK ({} statements)", args.input.display(), result.ast.len());
        return ExitCode::SUCCESS;
    }

    let backend = JsBackend::with_options(JsOptions {
        indent_width: args.indent,
        strict_mode: args.strict,
    });
    let output = match backend.generate(&result.ast) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("{}: error: {}", args.input.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let out_path = args
        .output
        .unwrap_or_else(|| args.input.with_extension(&output.extension));
    if let Err(e) = fs::write(&out_path, &output.code) {
        eprintln!("Error writing '{}': {}", out_path.display(), e);
        return ExitCode::FAILURE;
    }

    log::info!("wrote {} ({} bytes)", out_path.display(), output.code.len());
    if args.verbose {
        println!("Backend: {}", backend.backend_name());
        println!("Output: {}", out_path.display());
    }

    ExitCode::SUCCESS
}

fn print_tokens(path: &Path, source: &str) {
    println!("Tokens for {}:", path.display());
    println!("{:-<60}", "");

    for token in lex(source) {
        let script = lookup_with_script(&token.text)
            .map(|(script, _)| format!("{script:?}"))
            .unwrap_or_default();
        println!(
            "{:4} {:4}..{:<4} {:20} {:10} {:?}",
            token.line,
            token.span.start,
            token.span.end,
            format!("{:?}", token.kind),
            script,
            token.text
        );
    }
}

fn report_errors(path: &Path, errors: &[ParseError]) {
    for err in errors {
        eprintln!("{}:{}: error: {}", path.display(), err.line(), err);
    }
    eprintln!(
        "{}: {} error(s); no output written",
        path.display(),
        errors.len()
    );
}
