use crate::{
    analyzer::{grammar::program::parse_program,
               lexer::Token,
               scope::ScopeStack,
               type_control::TypeControlStack},
    error::AnalyzeError,
};

/// Result type used by the grammar engine.
///
/// Mandatory rules return `AnalyzeResult<T>`; trial rules return
/// `AnalyzeResult<Option<T>>`, where `Ok(None)` means the alternative does
/// not apply here and no tokens were consumed.
pub type AnalyzeResult<T> = Result<T, AnalyzeError>;

/// Stores the semantic state of one analysis run.
///
/// The grammar engine threads one `Analysis` through every production: the
/// symbol table tracks declarations across nested scopes, and the type
/// control stack accumulates the expression currently being parsed.
pub struct Analysis {
    /// The block-structured symbol table.
    pub scopes: ScopeStack,
    /// The expression type checker.
    pub types:  TypeControlStack,
}

#[allow(clippy::new_without_default)]
impl Analysis {
    /// Creates the state for a fresh analysis run: no open scope, an empty
    /// expression buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self { scopes: ScopeStack::new(),
               types:  TypeControlStack::new(), }
    }
}

/// Analyzes a complete token stream against the `program` production.
///
/// This is the analyzer's entry point. The stream must hold exactly one
/// well-formed program: the root production consumes every token up to and
/// including the final `.`, and anything left after it is an error.
///
/// # Parameters
/// - `tokens`: The classified token stream, in source order.
///
/// # Returns
/// `Ok(())` when the stream is a syntactically and type-correct program.
///
/// # Errors
/// Returns the first [`AnalyzeError`] encountered; analysis stops there.
///
/// # Example
/// ```
/// use minipas::analyzer::{grammar::core::analyze, lexer::tokenize};
///
/// let tokens = tokenize("program p; begin end.").unwrap();
///
/// assert!(analyze(&tokens).is_ok());
/// ```
pub fn analyze(tokens: &[Token]) -> AnalyzeResult<()> {
    let mut tokens = tokens.iter().peekable();
    let mut analysis = Analysis::new();

    parse_program(&mut tokens, &mut analysis)
}
