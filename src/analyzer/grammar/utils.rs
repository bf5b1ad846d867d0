use std::iter::Peekable;

use crate::{
    analyzer::{grammar::core::AnalyzeResult,
               lexer::{Token, TokenClass}},
    error::AnalyzeError,
};

/// Returns `true` if the next token's text is exactly `text`.
///
/// Never advances the cursor; the keyword-driven productions use this for
/// their candidate checks.
pub(in crate::analyzer::grammar) fn next_is<'a, I>(tokens: &mut Peekable<I>, text: &str) -> bool
    where I: Iterator<Item = &'a Token>
{
    tokens.peek().is_some_and(|token| token.text == text)
}

/// Returns `true` if the next token carries the given classification.
pub(in crate::analyzer::grammar) fn next_class_is<'a, I>(tokens: &mut Peekable<I>,
                                                         class: TokenClass)
                                                         -> bool
    where I: Iterator<Item = &'a Token>
{
    tokens.peek().is_some_and(|token| token.class == class)
}

/// The line of the next token, or `0` at the end of the stream.
pub(in crate::analyzer::grammar) fn current_line<'a, I>(tokens: &mut Peekable<I>) -> usize
    where I: Iterator<Item = &'a Token>
{
    tokens.peek().map_or(0, |token| token.line)
}

/// Consumes the next token, requiring its text to be exactly `text`.
///
/// `context` finishes the expectation message, e.g. `after the program
/// name`.
///
/// # Returns
/// The consumed token's line.
///
/// # Errors
/// Returns an `AnalyzeError` if the next token differs or the stream ends.
pub(in crate::analyzer::grammar) fn expect_text<'a, I>(tokens: &mut Peekable<I>,
                                                       text: &str,
                                                       context: &str)
                                                       -> AnalyzeResult<usize>
    where I: Iterator<Item = &'a Token>
{
    match tokens.next() {
        Some(token) if token.text == text => Ok(token.line),
        Some(token) => {
            Err(AnalyzeError::UnexpectedToken { token: format!("Expected '{text}' {context}, found '{}'",
                                                               token.text),
                                                line:  token.line, })
        },
        None => Err(AnalyzeError::UnexpectedEndOfInput { line: 0 }),
    }
}

/// Consumes the next token, requiring an identifier.
///
/// # Returns
/// The identifier's name and line.
///
/// # Errors
/// Returns an `AnalyzeError` if the next token is not an identifier or the
/// stream ends.
pub(in crate::analyzer::grammar) fn expect_identifier<'a, I>(tokens: &mut Peekable<I>,
                                                             context: &str)
                                                             -> AnalyzeResult<(String, usize)>
    where I: Iterator<Item = &'a Token>
{
    match tokens.next() {
        Some(token) if token.class == TokenClass::Identifier => {
            Ok((token.text.clone(), token.line))
        },
        Some(token) => {
            Err(AnalyzeError::UnexpectedToken { token: format!("Expected an identifier {context}, found '{}'",
                                                               token.text),
                                                line:  token.line, })
        },
        None => Err(AnalyzeError::UnexpectedEndOfInput { line: 0 }),
    }
}
