use std::iter::Peekable;

use crate::{
    error::ParseError,
    interpreter::{
        lexer::{Span, Token},
        parser::core::ParseResult,
    },
};

/// Consumes the next token, requiring it to be `expected`.
///
/// This is the workhorse of the statement grammar: keywords, delimiters and
/// terminators are all consumed through it. On success the consumed token's
/// span is returned so callers can attach positions to AST nodes.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the token to check.
/// - `expected`: The exact token that must come next.
///
/// # Returns
/// The [`Span`] of the consumed token.
///
/// # Errors
/// Returns a `ParseError` if:
/// - a different token is found,
/// - the input ends unexpectedly.
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                    expected: &Token)
                                                    -> ParseResult<Span>
    where I: Iterator<Item = &'a (Token, Span)>
{
    match tokens.next() {
        Some((token, span)) if token == expected => Ok(*span),
        Some((token, span)) => Err(ParseError::ExpectedToken { expected: expected.to_string(),
                                                               found:    token.to_string(),
                                                               line:     span.line,
                                                               column:   span.column, }),
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

/// Parses a plain identifier and returns its name.
///
/// The next token must be `Token::Identifier`.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at an identifier.
///
/// # Returns
/// A `String` containing the identifier.
///
/// # Errors
/// Returns a `ParseError` if:
/// - the next token is not an identifier,
/// - the input ends unexpectedly.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>)
                                                              -> ParseResult<String>
    where I: Iterator<Item = &'a (Token, Span)>
{
    match tokens.next() {
        Some((Token::Identifier(name), _)) => Ok(name.clone()),
        Some((token, span)) => {
            Err(ParseError::ExpectedToken { expected: "an identifier".to_string(),
                                            found:    token.to_string(),
                                            line:     span.line,
                                            column:   span.column, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

/// Parses a comma-separated list of items until a closing token.
///
/// This utility is shared by call argument lists and function parameter
/// lists. It repeatedly calls `parse_item` to parse one element, expecting
/// either:
///
/// - a comma, to continue the list, or
/// - the specified closing token, to end it.
///
/// An immediately encountered closing token produces an empty list. The
/// closing token is consumed.
///
/// Grammar (simplified): `list := (item ("," item)*)? closing`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the first item or closing token.
/// - `parse_item`: Function used to parse each list element.
/// - `closing`: The token that terminates the list (e.g. `)`).
///
/// # Returns
/// A vector of parsed items.
///
/// # Errors
/// Returns a `ParseError` if:
/// - an item fails to parse,
/// - an unexpected token is encountered,
/// - the stream ends before the closing token.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: &Token)
    -> Result<Vec<T>, ParseError>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    let mut items = Vec::new();
    if let Some((token, _)) = tokens.peek()
       && token == closing
    {
        tokens.next();

        return Ok(items);
    }
    loop {
        items.push(parse_item(tokens)?);
        match tokens.peek() {
            Some((Token::Comma, _)) => {
                tokens.next();
            },
            Some((token, _)) if token == closing => {
                tokens.next();
                break;
            },
            Some((token, span)) => {
                return Err(ParseError::ExpectedToken { expected: format!("',' or {closing}"),
                                                       found:    token.to_string(),
                                                       line:     span.line,
                                                       column:   span.column, });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line: 0 }),
        }
    }
    Ok(items)
}
