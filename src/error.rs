/// Scanning errors.
///
/// Defines all error types that can occur before analysis begins: source
/// text that no lexer rule matches, unbalanced comment braces, and token
/// tables whose header or rows cannot be read back.
pub mod lex_error;
/// Analysis errors.
///
/// Contains all error types that can be raised while the grammar engine
/// consumes the token stream: unexpected or missing tokens, declaration
/// conflicts, undeclared identifiers, and failed type evaluation.
pub mod analyze_error;

pub use analyze_error::AnalyzeError;
pub use lex_error::LexError;
