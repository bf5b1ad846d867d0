/// Engine state and the analysis entry point.
///
/// Contains the per-run `Analysis` state, the shared result alias, and the
/// function driving the root production.
pub mod core;

/// Program structure and declarations.
///
/// Parses the program header, `var` sections, procedure declarations and
/// parameter lists, binding every declared identifier.
pub mod program;

/// Commands.
///
/// Parses compound commands and the statement alternatives: assignment,
/// procedure call, `if` and `while`.
pub mod command;

/// Expressions.
///
/// Parses the expression hierarchy, feeding operands and operators to the
/// type control stack and triggering boundary evaluation.
pub mod expression;

/// Utility functions for the grammar engine.
///
/// Provides the shared cursor helpers: peeking checks, expectation
/// consumers, and line lookup.
pub mod utils;
