use std::iter::Peekable;

use crate::{
    analyzer::{grammar::{core::{Analysis, AnalyzeResult},
                         expression::{parse_argument_list, parse_checked_expression,
                                      parse_expression},
                         utils::{expect_identifier, expect_text, next_is}},
               lexer::{Token, TokenClass},
               type_control::{Entry, Operator}},
    error::AnalyzeError,
};

/// Parses a compound command, if the next token starts one.
///
/// Grammar: `compound_command := begin [command {; command}] end`
///
/// The block opens its own scope for structural symmetry with procedure
/// bodies; the grammar has no block-local declarations, so nothing can bind
/// inside it.
///
/// # Returns
/// `Ok(None)` when the next token is not `begin`; no tokens are consumed in
/// that case.
///
/// # Errors
/// Returns an `AnalyzeError` once `begin` is committed and the body or the
/// closing `end` is malformed.
pub fn parse_compound_command<'a, I>(tokens: &mut Peekable<I>,
                                     analysis: &mut Analysis)
                                     -> AnalyzeResult<Option<()>>
    where I: Iterator<Item = &'a Token> + Clone
{
    if !next_is(tokens, "begin") {
        return Ok(None);
    }
    tokens.next();
    analysis.scopes.open_scope();

    parse_command_list(tokens, analysis)?;

    analysis.scopes.close_scope();
    expect_text(tokens, "end", "to close the command block")?;

    Ok(Some(()))
}

/// Parses a compound command in a position where one is mandatory.
pub(in crate::analyzer::grammar) fn expect_compound_command<'a, I>(tokens: &mut Peekable<I>,
                                                                   analysis: &mut Analysis)
                                                                   -> AnalyzeResult<()>
    where I: Iterator<Item = &'a Token> + Clone
{
    match parse_compound_command(tokens, analysis)? {
        Some(()) => Ok(()),
        None => match tokens.peek() {
            Some(token) => {
                Err(AnalyzeError::UnexpectedToken { token: format!("Expected 'begin' to open a command block, found '{}'",
                                                                   token.text),
                                                    line:  token.line, })
            },
            None => Err(AnalyzeError::UnexpectedEndOfInput { line: 0 }),
        },
    }
}

/// Parses the possibly empty command list of a compound command.
///
/// Grammar: `commands := [command {; command}]`
///
/// After a `;` a command is mandatory, so a trailing semicolon before `end`
/// is an error.
fn parse_command_list<'a, I>(tokens: &mut Peekable<I>, analysis: &mut Analysis) -> AnalyzeResult<()>
    where I: Iterator<Item = &'a Token> + Clone
{
    if parse_command(tokens, analysis)?.is_none() {
        return Ok(());
    }

    while next_is(tokens, ";") {
        tokens.next();
        expect_command(tokens, analysis)?;
    }

    Ok(())
}

/// Parses a command in a position where one is mandatory.
fn expect_command<'a, I>(tokens: &mut Peekable<I>, analysis: &mut Analysis) -> AnalyzeResult<()>
    where I: Iterator<Item = &'a Token> + Clone
{
    match parse_command(tokens, analysis)? {
        Some(()) => Ok(()),
        None => match tokens.peek() {
            Some(token) => {
                Err(AnalyzeError::UnexpectedToken { token: format!("Expected a command, found '{}'",
                                                                   token.text),
                                                    line:  token.line, })
            },
            None => Err(AnalyzeError::UnexpectedEndOfInput { line: 0 }),
        },
    }
}

/// Parses a single command, if the next token can start one.
///
/// A command is an assignment, a procedure call, a nested compound command,
/// an `if` command or a `while` command. An identifier starts either of the
/// first two; a cloned cursor peeks at the token after it to decide, so
/// nothing is consumed before the alternative commits.
///
/// # Returns
/// `Ok(None)` when no alternative applies; no tokens are consumed in that
/// case.
pub fn parse_command<'a, I>(tokens: &mut Peekable<I>,
                            analysis: &mut Analysis)
                            -> AnalyzeResult<Option<()>>
    where I: Iterator<Item = &'a Token> + Clone
{
    let token = match tokens.peek() {
        Some(token) => *token,
        None => return Ok(None),
    };

    if token.class == TokenClass::Identifier {
        let mut lookahead = tokens.clone();
        lookahead.next();

        if lookahead.peek()
                    .is_some_and(|next| next.class == TokenClass::Attribution)
        {
            parse_assignment(tokens, analysis)?;
        } else {
            parse_procedure_call(tokens, analysis)?;
        }

        return Ok(Some(()));
    }

    match token.text.as_str() {
        "begin" => parse_compound_command(tokens, analysis),

        "if" => {
            parse_if_command(tokens, analysis)?;
            Ok(Some(()))
        },

        "while" => {
            parse_while_command(tokens, analysis)?;
            Ok(Some(()))
        },

        _ => Ok(None),
    }
}

/// Parses `variable := expression` and type-checks it as one unit.
///
/// The variable's resolved kind and the `:=` symbol go onto the type stack
/// before the right-hand side parses; the single evaluation at the
/// statement boundary then reduces kind, `:=` and right-hand side together,
/// leaving the buffer empty.
fn parse_assignment<'a, I>(tokens: &mut Peekable<I>, analysis: &mut Analysis) -> AnalyzeResult<()>
    where I: Iterator<Item = &'a Token> + Clone
{
    let (name, line) = expect_identifier(tokens, "to assign to")?;
    let kind = analysis.scopes
                       .resolve(&name)
                       .map_err(|e| AnalyzeError::from_scope(e, line))?;
    analysis.types.push(Entry::Operand(kind));

    let assign_line = expect_text(tokens, ":=", "after the variable")?;
    analysis.types.push(Entry::Operator(Operator::Assign));

    parse_expression(tokens, analysis)?;
    analysis.types
            .evaluate()
            .map_err(|e| AnalyzeError::from_type(e, assign_line))?;

    Ok(())
}

/// Parses a statement-level procedure call.
///
/// Grammar: `procedure_call := id [( expression {, expression} )]`
///
/// Only the callee's existence is resolved; its kind and the declared
/// parameter list are not validated against the call. Each argument is
/// still checked on its own boundary.
fn parse_procedure_call<'a, I>(tokens: &mut Peekable<I>,
                               analysis: &mut Analysis)
                               -> AnalyzeResult<()>
    where I: Iterator<Item = &'a Token> + Clone
{
    let (name, line) = expect_identifier(tokens, "to call")?;
    analysis.scopes
            .resolve(&name)
            .map_err(|e| AnalyzeError::from_scope(e, line))?;

    if next_is(tokens, "(") {
        parse_argument_list(tokens, analysis)?;
    }

    Ok(())
}

/// Parses `if expression then command [else command]`.
///
/// The condition is evaluated and drained at the test boundary; its
/// resulting kind is not constrained. An `else` always belongs to the
/// nearest open `if`.
fn parse_if_command<'a, I>(tokens: &mut Peekable<I>, analysis: &mut Analysis) -> AnalyzeResult<()>
    where I: Iterator<Item = &'a Token> + Clone
{
    tokens.next(); // the 'if' the caller peeked

    parse_checked_expression(tokens, analysis)?;
    expect_text(tokens, "then", "after the condition")?;
    expect_command(tokens, analysis)?;

    if next_is(tokens, "else") {
        tokens.next();
        expect_command(tokens, analysis)?;
    }

    Ok(())
}

/// Parses `while expression do command`.
fn parse_while_command<'a, I>(tokens: &mut Peekable<I>,
                              analysis: &mut Analysis)
                              -> AnalyzeResult<()>
    where I: Iterator<Item = &'a Token> + Clone
{
    tokens.next(); // the 'while' the caller peeked

    parse_checked_expression(tokens, analysis)?;
    expect_text(tokens, "do", "after the loop condition")?;
    expect_command(tokens, analysis)?;

    Ok(())
}
