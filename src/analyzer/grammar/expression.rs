use std::iter::Peekable;

use crate::{
    analyzer::{grammar::{core::{Analysis, AnalyzeResult},
                         utils::{current_line, expect_text, next_class_is, next_is}},
               lexer::{Token, TokenClass},
               scope::Kind,
               type_control::{Entry, Operator}},
    error::AnalyzeError,
};

/// Maps an operator token to its symbol on the type control stack.
///
/// Covers the additive and multiplicative operators (including the
/// keyword-spelled `or` and `and`), the six relational operators, `not`,
/// and `:=`. Any other token maps to `None`.
///
/// # Example
/// ```
/// use minipas::analyzer::{grammar::expression::operator_for,
///                         lexer::{Token, TokenClass},
///                         type_control::Operator};
///
/// let or = Token { text:  "or".to_string(),
///                  class: TokenClass::AdditiveOperator,
///                  line:  1, };
///
/// assert_eq!(operator_for(&or), Some(Operator::Or));
/// ```
#[must_use]
pub fn operator_for(token: &Token) -> Option<Operator> {
    match token.text.as_str() {
        "not" => Some(Operator::Not),
        "and" => Some(Operator::And),
        "or" => Some(Operator::Or),
        "*" => Some(Operator::Mul),
        "/" => Some(Operator::Div),
        "+" => Some(Operator::Add),
        "-" => Some(Operator::Sub),
        "=" => Some(Operator::Equal),
        "<>" => Some(Operator::NotEqual),
        "<" => Some(Operator::Less),
        ">" => Some(Operator::Greater),
        "<=" => Some(Operator::LessOrEqual),
        ">=" => Some(Operator::GreaterOrEqual),
        ":=" => Some(Operator::Assign),
        _ => None,
    }
}

/// Consumes the next token as an operator and pushes its symbol.
fn push_next_operator<'a, I>(tokens: &mut Peekable<I>, analysis: &mut Analysis) -> AnalyzeResult<()>
    where I: Iterator<Item = &'a Token>
{
    match tokens.next() {
        Some(token) => match operator_for(token) {
            Some(operator) => {
                analysis.types.push(Entry::Operator(operator));
                Ok(())
            },
            None => {
                Err(AnalyzeError::UnexpectedToken { token: format!("Expected an operator, found '{}'",
                                                                   token.text),
                                                    line:  token.line, })
            },
        },
        None => Err(AnalyzeError::UnexpectedEndOfInput { line: 0 }),
    }
}

/// Parses an expression, pushing operands and operators as encountered.
///
/// Grammar: `expression := simple_expression [relational_op
/// simple_expression]`
///
/// Nothing is evaluated here: the boundary that owns the expression
/// (assignment, condition, argument) decides when the accumulated buffer is
/// reduced.
///
/// # Errors
/// Returns an `AnalyzeError` if any sub-rule fails; an expression in parsing
/// position is mandatory, so there is no non-fatal outcome.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>, analysis: &mut Analysis) -> AnalyzeResult<()>
    where I: Iterator<Item = &'a Token> + Clone
{
    parse_simple_expression(tokens, analysis)?;

    if next_class_is(tokens, TokenClass::Comparison) {
        push_next_operator(tokens, analysis)?;
        parse_simple_expression(tokens, analysis)?;
    }

    Ok(())
}

/// Parses a simple expression.
///
/// Grammar: `simple_expression := [sign] term {additive_op term}`
///
/// A leading sign is consumed but never pushed, so `-x` carries the kind of
/// `x`.
pub fn parse_simple_expression<'a, I>(tokens: &mut Peekable<I>,
                                      analysis: &mut Analysis)
                                      -> AnalyzeResult<()>
    where I: Iterator<Item = &'a Token> + Clone
{
    if next_is(tokens, "+") || next_is(tokens, "-") {
        tokens.next();
    }
    parse_term(tokens, analysis)?;

    while next_class_is(tokens, TokenClass::AdditiveOperator) {
        push_next_operator(tokens, analysis)?;
        parse_term(tokens, analysis)?;
    }

    Ok(())
}

/// Parses a term.
///
/// Grammar: `term := factor {multiplicative_op factor}`
pub fn parse_term<'a, I>(tokens: &mut Peekable<I>, analysis: &mut Analysis) -> AnalyzeResult<()>
    where I: Iterator<Item = &'a Token> + Clone
{
    parse_factor(tokens, analysis)?;

    while next_class_is(tokens, TokenClass::MultiplicativeOperator) {
        push_next_operator(tokens, analysis)?;
        parse_factor(tokens, analysis)?;
    }

    Ok(())
}

/// Parses a factor and pushes its contribution to the type stack.
///
/// Grammar: `factor := identifier | identifier ( expression {, expression} )
/// | integer | real | true | false | ( expression ) | not factor`
///
/// An identifier resolves against the symbol table and pushes its kind; for
/// a call-like factor the resolved kind stands as the single operand while
/// each argument is checked on its own boundary. Parenthesized
/// sub-expressions push explicit grouping markers for the shunting-yard
/// pass.
///
/// # Errors
/// Returns an `AnalyzeError` on an undeclared identifier, an unclosed
/// parenthesis, or a token no factor alternative accepts.
pub fn parse_factor<'a, I>(tokens: &mut Peekable<I>, analysis: &mut Analysis) -> AnalyzeResult<()>
    where I: Iterator<Item = &'a Token> + Clone
{
    let token = match tokens.peek() {
        Some(token) => *token,
        None => return Err(AnalyzeError::UnexpectedEndOfInput { line: 0 }),
    };

    match token.class {
        TokenClass::Identifier => {
            tokens.next();

            let kind = analysis.scopes
                               .resolve(&token.text)
                               .map_err(|e| AnalyzeError::from_scope(e, token.line))?;
            analysis.types.push(Entry::Operand(kind));

            if next_is(tokens, "(") {
                parse_argument_list(tokens, analysis)?;
            }

            Ok(())
        },

        TokenClass::Integer => {
            tokens.next();
            analysis.types.push(Entry::Operand(Kind::Integer));

            Ok(())
        },

        TokenClass::Real => {
            tokens.next();
            analysis.types.push(Entry::Operand(Kind::Real));

            Ok(())
        },

        _ if token.text == "true" || token.text == "false" => {
            tokens.next();
            analysis.types.push(Entry::Operand(Kind::Boolean));

            Ok(())
        },

        _ if token.text == "(" => {
            tokens.next();
            analysis.types.push(Entry::Open);

            parse_expression(tokens, analysis)?;

            match tokens.next() {
                Some(closing) if closing.text == ")" => {
                    analysis.types.push(Entry::Close);
                    Ok(())
                },
                Some(closing) => Err(AnalyzeError::ExpectedClosingParen { line: closing.line }),
                None => Err(AnalyzeError::ExpectedClosingParen { line: token.line }),
            }
        },

        _ if token.text == "not" => {
            tokens.next();
            analysis.types.push(Entry::Operator(Operator::Not));

            parse_factor(tokens, analysis)
        },

        _ => {
            Err(AnalyzeError::UnexpectedToken { token: format!("Expected a factor, found '{}'",
                                                               token.text),
                                                line:  token.line, })
        },
    }
}

/// Parses a parenthesized argument list, checking each argument in
/// isolation.
///
/// Grammar: `arguments := ( expression {, expression} )`
///
/// The list must hold at least one expression; each one is evaluated and
/// drained on its own boundary, so arguments never mix with the surrounding
/// expression's buffer.
pub(in crate::analyzer::grammar) fn parse_argument_list<'a, I>(tokens: &mut Peekable<I>,
                                                               analysis: &mut Analysis)
                                                               -> AnalyzeResult<()>
    where I: Iterator<Item = &'a Token> + Clone
{
    let open_line = expect_text(tokens, "(", "to open the argument list")?;

    parse_checked_expression(tokens, analysis)?;
    while next_is(tokens, ",") {
        tokens.next();
        parse_checked_expression(tokens, analysis)?;
    }

    match tokens.next() {
        Some(token) if token.text == ")" => Ok(()),
        Some(token) => Err(AnalyzeError::ExpectedClosingParen { line: token.line }),
        None => Err(AnalyzeError::ExpectedClosingParen { line: open_line }),
    }
}

/// Parses one expression and type-evaluates it on its own boundary.
///
/// The surrounding infix buffer is set aside so the expression starts on a
/// fresh stack; afterwards the buffer is restored and the expression's
/// result kind returned. Conditions and call arguments go through here.
///
/// # Errors
/// Returns an `AnalyzeError` if parsing fails or the expression's typing
/// rules reject it; the type error carries the line the expression started
/// on.
pub(in crate::analyzer::grammar) fn parse_checked_expression<'a, I>(tokens: &mut Peekable<I>,
                                                                    analysis: &mut Analysis)
                                                                    -> AnalyzeResult<Option<Kind>>
    where I: Iterator<Item = &'a Token> + Clone
{
    let line = current_line(tokens);
    let surrounding = std::mem::take(&mut analysis.types);

    parse_expression(tokens, analysis)?;
    let result = analysis.types
                         .evaluate()
                         .map_err(|e| AnalyzeError::from_type(e, line))?;

    analysis.types = surrounding;

    Ok(result)
}
