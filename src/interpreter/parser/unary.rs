use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr},
    error::ParseError,
    interpreter::{
        lexer::{Span, Token},
        parser::{
            core::{ParseResult, parse_expression},
            utils::{expect, parse_comma_separated},
        },
    },
};

/// Parses a unary expression.
///
/// The only prefix operator is numeric negation, and it has no node of its
/// own: `-x` desugars to `0 - x` so the evaluator only ever sees binary
/// subtraction. Negation is right-associative, so `--x` parses as
/// `0 - (0 - x)`.
///
/// Grammar:
/// ```text
///     unary := "-" unary
///            | call
/// ```
///
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// The desugared [`Expr::Binary`] or whatever the call level produces.
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    if let Some((Token::Minus, span)) = tokens.peek() {
        let line = span.line;
        tokens.next();
        let operand = parse_unary(tokens)?;
        return Ok(Expr::Binary { op:  BinaryOperator::Sub,
                                 lhs: Box::new(Expr::Number { value: 0.0, line }),
                                 rhs: Box::new(operand),
                                 line, });
    }
    parse_call(tokens)
}

/// Parses a call expression.
///
/// A call is recognized by a two-token lookahead: an identifier immediately
/// followed by `(`. The lookahead uses a cloned iterator so a bare
/// identifier is left untouched and falls through to [`parse_primary`] as a
/// variable reference.
///
/// Grammar: `call := IDENTIFIER "(" (expression ("," expression)*)? ")" | primary`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at a potential call.
///
/// # Returns
/// An [`Expr::Call`] with its arguments in source order, or a primary
/// expression.
pub(crate) fn parse_call<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    if let Some((Token::Identifier(_), _)) = tokens.peek() {
        let mut lookahead = tokens.clone();
        lookahead.next();
        if let Some((Token::LParen, _)) = lookahead.peek() {
            let (name, line) = match tokens.next() {
                Some((Token::Identifier(name), span)) => (name.clone(), span.line),
                _ => unreachable!(),
            };
            tokens.next(); // consume '('

            let arguments = parse_comma_separated(tokens, parse_expression, &Token::RParen)?;
            return Ok(Expr::Call { name,
                                   arguments,
                                   line });
        }
    }
    parse_primary(tokens)
}

/// Parses a primary (atomic) expression.
///
/// Primary expressions form the base of the expression grammar:
/// - numeric literals,
/// - variable references,
/// - parenthesized expressions.
///
/// Grammar:
/// ```text
///     primary := NUMBER
///              | IDENTIFIER
///              | "(" expression ")"
/// ```
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of a primary
///   expression.
///
/// # Returns
/// The parsed primary [`Expr`] or a `ParseError` on failure.
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    match tokens.next() {
        Some((Token::Number(value), span)) => Ok(Expr::Number { value: *value,
                                                                line:  span.line, }),
        Some((Token::Identifier(name), span)) => Ok(Expr::Variable { name: name.clone(),
                                                                     line: span.line, }),
        Some((Token::LParen, _)) => {
            let expr = parse_expression(tokens)?;
            expect(tokens, &Token::RParen)?;
            Ok(expr)
        },
        Some((token, span)) => Err(ParseError::UnexpectedToken { token:  token.to_string(),
                                                                 line:   span.line,
                                                                 column: span.column, }),
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}
