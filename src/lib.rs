//! # minipas
//!
//! minipas is a single-pass front end for a small Pascal-like language.
//! It scans a program into a classified token table, parses it by recursive
//! descent and checks declarations, scopes and expression types while
//! parsing. No syntax tree is built and no code is generated.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::analyzer::{grammar::core::analyze,
                      lexer::{read_token_table, tokenize}};

/// Performs scanning and single-pass analysis of source programs.
///
/// This module ties together the scanner, the recursive-descent grammar, the
/// scope stack and the type control stack. The grammar drives the other three:
/// tokens are consumed directly from the scanner's output, declarations and
/// uses are checked against the scope stack as they are parsed, and every
/// expression is checked on the type control stack at its evaluation boundary.
///
/// # Responsibilities
/// - Scans source text into classified tokens and token tables.
/// - Parses the token stream by recursive descent, without building a tree.
/// - Tracks declarations and visibility in a block-structured scope stack.
/// - Checks expression and assignment types with an operator-precedence stack.
pub mod analyzer;
/// Provides unified error types for scanning and analysis.
///
/// This module defines all errors that can be raised while scanning a program,
/// reading a token table or analyzing the token stream. It standardizes error
/// reporting and carries detailed information about failures, including source
/// lines for debugging and user feedback.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (scanner, table reader,
///   analyzer).
/// - Attaches line numbers and detailed messages for context.
/// - Supports integration with standard error handling traits and reporting
///   utilities.
pub mod error;

/// Checks a source program in a single pass.
///
/// This function scans the provided source string into tokens and analyzes
/// them: syntax, declarations and expression types are all checked in one
/// traversal. If the program is well formed, it returns `Ok(())`; otherwise,
/// it returns the first error encountered with details about the failure.
///
/// # Errors
/// Returns an error if scanning or analysis fails.
///
/// # Examples
/// ```
/// use minipas::check;
///
/// // A well-formed program: every identifier is declared before use.
/// let source = "program p; var a: integer; begin a := 1 end.";
/// let res = check(source);
/// assert!(res.is_ok());
///
/// // Example with an intentional error ('a' is not declared).
/// let source = "program p; begin a := 1 end.";
/// let res = check(source);
/// assert!(res.is_err());
/// ```
pub fn check(source: &str) -> Result<(), Box<dyn std::error::Error>> {
    let tokens = tokenize(source)?;
    analyze(&tokens)?;

    Ok(())
}

/// Checks a program given as an already classified token table.
///
/// The table must use the format produced by
/// [`render_token_table`](crate::analyzer::lexer::render_token_table): a
/// header row followed by one `token,classification,line` row per token.
/// Scanning is skipped entirely; the table is read back into tokens and
/// analyzed as usual.
///
/// # Errors
/// Returns an error if the table is malformed or analysis fails.
///
/// # Examples
/// ```
/// use minipas::analyzer::lexer::{render_token_table, tokenize};
/// use minipas::check_table;
///
/// let source = "program p; var a: integer; begin a := 1 end.";
/// let table = render_token_table(&tokenize(source).unwrap());
/// assert!(check_table(&table).is_ok());
/// ```
pub fn check_table(table: &str) -> Result<(), Box<dyn std::error::Error>> {
    let tokens = read_token_table(table)?;
    analyze(&tokens)?;

    Ok(())
}
