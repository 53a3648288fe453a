use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use eliql::query::parser::{
    AstPrinter, LexError, Parser as QueryParser, ScanOutput, Scanner, ScannerConfig,
    StreamCollector,
};

#[derive(Parser)]
#[command(author, version, about = "eliql - inspect how EliQL queries scan and parse")]
struct Cli {
    /// Deepest allowed function call nesting
    #[arg(short, long, default_value_t = ScannerConfig::default().max_nesting_depth)]
    max_depth: usize,

    /// Command to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the token sequence of a query
    Tokens {
        /// EliQL query text
        query: String,

        /// Print tokens as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the parsed tree of a query
    Ast {
        /// EliQL query text
        query: String,
    },

    /// List the streams a query reads from
    Streams {
        /// EliQL query text
        query: String,
    },
}

fn scan(query: &str, max_depth: usize) -> ScanOutput {
    let config = ScannerConfig {
        max_nesting_depth: max_depth,
    };
    Scanner::with_config(query, config).scan_tokens()
}

fn print_lex_errors(errors: &[LexError]) {
    for err in errors {
        eprintln!("{}", err);
    }
}

fn run_tokens(query: &str, json: bool, max_depth: usize) -> Result<bool> {
    let output = scan(query, max_depth);

    if json {
        let text = serde_json::to_string_pretty(&output.tokens).context("Failed to encode tokens")?;
        println!("{}", text);
    } else {
        for token in &output.tokens {
            println!("{:>4}  {}", token.line, token);
        }
    }

    print_lex_errors(&output.errors);
    Ok(!output.has_errors())
}

/// Scan and parse, reporting every diagnostic. `None` when anything failed.
fn parse(query: &str, max_depth: usize) -> Option<eliql::Expression> {
    let output = scan(query, max_depth);
    if output.has_errors() {
        print_lex_errors(&output.errors);
        return None;
    }

    match QueryParser::new(output.tokens).parse() {
        Ok(expr) => Some(expr),
        Err(err) => {
            eprintln!("{}", err);
            None
        }
    }
}

fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let ok = match &cli.command {
        Commands::Tokens { query, json } => run_tokens(query, *json, cli.max_depth)?,
        Commands::Ast { query } => match parse(query, cli.max_depth) {
            Some(expr) => {
                println!("{}", AstPrinter::new().print(&expr));
                true
            }
            None => false,
        },
        Commands::Streams { query } => match parse(query, cli.max_depth) {
            Some(expr) => {
                for stream in StreamCollector::collect(&expr) {
                    println!("{}", stream);
                }
                true
            }
            None => false,
        },
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
