use std::iter::Peekable;

use crate::{
    analyzer::{grammar::{command::expect_compound_command,
                         core::{Analysis, AnalyzeResult},
                         utils::{expect_identifier, expect_text, next_class_is, next_is}},
               lexer::{Token, TokenClass},
               scope::Kind},
    error::AnalyzeError,
};

/// Parses the root `program` production.
///
/// Grammar: `program := program id ; var_declarations
/// subprogram_declarations compound_command .`
///
/// The program's name is declared in the outermost scope, which stays open
/// for the whole run. After the final `.` the stream must be exhausted.
///
/// # Errors
/// Returns an `AnalyzeError` on any violated expectation; the root
/// production has no non-fatal outcome.
pub fn parse_program<'a, I>(tokens: &mut Peekable<I>, analysis: &mut Analysis) -> AnalyzeResult<()>
    where I: Iterator<Item = &'a Token> + Clone
{
    expect_text(tokens, "program", "to start the program")?;
    analysis.scopes.open_scope();

    let (name, line) = expect_identifier(tokens, "to name the program")?;
    analysis.scopes
            .declare(&name, Kind::Program)
            .map_err(|e| AnalyzeError::from_scope(e, line))?;
    expect_text(tokens, ";", "after the program name")?;

    parse_var_declarations(tokens, analysis)?;
    parse_subprogram_declarations(tokens, analysis)?;
    expect_compound_command(tokens, analysis)?;

    match tokens.next() {
        Some(token) if token.text == "." => {},
        Some(token) => return Err(AnalyzeError::MissingFinalPeriod { line: token.line }),
        None => return Err(AnalyzeError::UnexpectedEndOfInput { line: 0 }),
    }

    match tokens.peek() {
        Some(token) => {
            Err(AnalyzeError::UnexpectedTrailingTokens { token: token.text.clone(),
                                                         line:  token.line, })
        },
        None => Ok(()),
    }
}

/// Parses an optional `var` section.
///
/// Grammar: `var_declarations := var declaration_group {declaration_group}
/// | ε`
///
/// Once `var` is consumed the first group is mandatory; further groups
/// follow while the next token is an identifier.
pub fn parse_var_declarations<'a, I>(tokens: &mut Peekable<I>,
                                     analysis: &mut Analysis)
                                     -> AnalyzeResult<()>
    where I: Iterator<Item = &'a Token>
{
    if !next_is(tokens, "var") {
        return Ok(());
    }
    tokens.next();

    parse_declaration_group(tokens, analysis)?;
    while next_class_is(tokens, TokenClass::Identifier) {
        parse_declaration_group(tokens, analysis)?;
    }

    Ok(())
}

/// Parses one `id_list : type ;` group, binding every identifier.
fn parse_declaration_group<'a, I>(tokens: &mut Peekable<I>,
                                  analysis: &mut Analysis)
                                  -> AnalyzeResult<()>
    where I: Iterator<Item = &'a Token>
{
    let names = parse_identifier_list(tokens)?;
    expect_text(tokens, ":", "after the declared identifiers")?;
    let kind = parse_type(tokens)?;

    for (name, line) in names {
        analysis.scopes
                .declare(&name, kind)
                .map_err(|e| AnalyzeError::from_scope(e, line))?;
    }
    expect_text(tokens, ";", "after the declaration")?;

    Ok(())
}

/// Parses `id {, id}`, collecting each name with its line.
fn parse_identifier_list<'a, I>(tokens: &mut Peekable<I>) -> AnalyzeResult<Vec<(String, usize)>>
    where I: Iterator<Item = &'a Token>
{
    let mut names = vec![expect_identifier(tokens, "in the declaration list")?];

    while next_is(tokens, ",") {
        tokens.next();
        names.push(expect_identifier(tokens, "in the declaration list")?);
    }

    Ok(names)
}

/// Parses a type name into its kind.
///
/// Grammar: `type := integer | real | boolean`
fn parse_type<'a, I>(tokens: &mut Peekable<I>) -> AnalyzeResult<Kind>
    where I: Iterator<Item = &'a Token>
{
    match tokens.next() {
        Some(token) => match Kind::from_type_name(&token.text) {
            Some(kind) => Ok(kind),
            None => {
                Err(AnalyzeError::InvalidType { token: token.text.clone(),
                                                line:  token.line, })
            },
        },
        None => Err(AnalyzeError::UnexpectedEndOfInput { line: 0 }),
    }
}

/// Parses zero or more procedure declarations, each terminated by `;`.
///
/// Grammar: `subprogram_declarations := {subprogram_declaration ;}`
pub fn parse_subprogram_declarations<'a, I>(tokens: &mut Peekable<I>,
                                            analysis: &mut Analysis)
                                            -> AnalyzeResult<()>
    where I: Iterator<Item = &'a Token> + Clone
{
    while parse_subprogram_declaration(tokens, analysis)?.is_some() {
        expect_text(tokens, ";", "after the procedure body")?;
    }

    Ok(())
}

/// Parses one procedure declaration, if the next token starts one.
///
/// Grammar: `subprogram_declaration := procedure id [parameters] ;
/// var_declarations subprogram_declarations compound_command`
///
/// The procedure's name binds in the enclosing scope, so sibling and
/// recursive calls resolve; its parameters and body live in a fresh scope
/// closed when the body ends.
fn parse_subprogram_declaration<'a, I>(tokens: &mut Peekable<I>,
                                       analysis: &mut Analysis)
                                       -> AnalyzeResult<Option<()>>
    where I: Iterator<Item = &'a Token> + Clone
{
    if !next_is(tokens, "procedure") {
        return Ok(None);
    }
    tokens.next();

    let (name, line) = expect_identifier(tokens, "to name the procedure")?;
    analysis.scopes
            .declare(&name, Kind::Procedure)
            .map_err(|e| AnalyzeError::from_scope(e, line))?;
    analysis.scopes.open_scope();

    if next_is(tokens, "(") {
        parse_parameter_list(tokens, analysis)?;
    }
    expect_text(tokens, ";", "after the procedure heading")?;

    parse_var_declarations(tokens, analysis)?;
    parse_subprogram_declarations(tokens, analysis)?;
    expect_compound_command(tokens, analysis)?;

    analysis.scopes.close_scope();

    Ok(Some(()))
}

/// Parses a parenthesized parameter list.
///
/// Grammar: `parameters := ( parameter_group {; parameter_group} )`
fn parse_parameter_list<'a, I>(tokens: &mut Peekable<I>,
                               analysis: &mut Analysis)
                               -> AnalyzeResult<()>
    where I: Iterator<Item = &'a Token>
{
    tokens.next(); // the '(' the caller peeked

    parse_parameter_group(tokens, analysis)?;
    while next_is(tokens, ";") {
        tokens.next();
        parse_parameter_group(tokens, analysis)?;
    }

    match tokens.next() {
        Some(token) if token.text == ")" => Ok(()),
        Some(token) => Err(AnalyzeError::ExpectedClosingParen { line: token.line }),
        None => Err(AnalyzeError::UnexpectedEndOfInput { line: 0 }),
    }
}

/// Parses one `id_list : type` parameter group into the procedure's scope.
fn parse_parameter_group<'a, I>(tokens: &mut Peekable<I>,
                                analysis: &mut Analysis)
                                -> AnalyzeResult<()>
    where I: Iterator<Item = &'a Token>
{
    let names = parse_identifier_list(tokens)?;
    expect_text(tokens, ":", "after the parameter names")?;
    let kind = parse_type(tokens)?;

    for (name, line) in names {
        analysis.scopes
                .declare(&name, kind)
                .map_err(|e| AnalyzeError::from_scope(e, line))?;
    }

    Ok(())
}
