use std::fs;

use clap::Parser;
use minipas::{analyzer::lexer::{render_token_table, tokenize},
              check, check_table};

/// minipas is a single-pass checker for a small Pascal-like language:
/// programs are scanned, parsed and type-checked without building a syntax
/// tree.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells minipas to look at a file instead of an inline program.
    #[arg(short, long)]
    file: bool,

    /// Prints the classified token table instead of analyzing the program.
    #[arg(short, long)]
    dump_tokens: bool,

    /// Treats the input as an already rendered token table.
    #[arg(short = 't', long)]
    from_table: bool,

    contents: String,
}

fn main() {
    let args = Args::parse();

    let input = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            std::process::exit(1);
        })
    } else {
        args.contents
    };

    let result = if args.from_table {
        check_table(&input)
    } else if args.dump_tokens {
        dump_tokens(&input)
    } else {
        check(&input)
    };

    if let Err(e) = result {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

/// Scans the input and prints its token table without analyzing it.
fn dump_tokens(source: &str) -> Result<(), Box<dyn std::error::Error>> {
    let tokens = tokenize(source)?;
    println!("{}", render_token_table(&tokens));

    Ok(())
}
