use std::iter::Peekable;

use crate::{
    ast::{Expr, Program},
    error::ParseError,
    interpreter::{
        lexer::{Span, Token},
        parser::{binary::parse_logical_or, statement::parse_statement},
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a whole program.
///
/// This is the entry point for parsing. Statements are parsed in order until
/// the token sequence is exhausted; the first failure aborts parsing of the
/// remainder, with no recovery or resynchronization.
///
/// Grammar: `program := statement*`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, Span)` pairs.
///
/// # Returns
/// The parsed [`Program`] holding all top-level statements.
///
/// # Examples
/// ```
/// use lumen::interpreter::{lexer::tokenize_all, parser::core::parse_program};
///
/// let tokens = tokenize_all("let hue = 0; hue = hue + 1;").unwrap();
/// let program = parse_program(&mut tokens.iter().peekable()).unwrap();
///
/// assert_eq!(program.statements.len(), 2);
/// ```
pub fn parse_program<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Program>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    let mut statements = Vec::new();
    while tokens.peek().is_some() {
        statements.push(parse_statement(tokens)?);
    }
    Ok(Program { statements })
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the
/// lowest-precedence level, assignment, and recursively descends through the
/// precedence hierarchy.
///
/// Grammar: `expression := assignment`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, Span)` pairs.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    parse_assignment(tokens)
}

/// Parses an assignment expression.
///
/// Assignment is right-associative and applies only when the next two tokens
/// are an identifier followed by `=`; the check uses a cloned lookahead so
/// nothing is consumed otherwise. Any other shape falls through to the
/// logical-or level.
///
/// Grammar: `assignment := IDENTIFIER "=" assignment | logical_or`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at a potential assignment.
///
/// # Returns
/// An [`Expr::Assignment`] node, or whatever the lower levels produce.
fn parse_assignment<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    if let Some((Token::Identifier(_), _)) = tokens.peek() {
        let mut lookahead = tokens.clone();
        lookahead.next();
        if let Some((Token::Assign, _)) = lookahead.peek() {
            let (name, line) = match tokens.next() {
                Some((Token::Identifier(name), span)) => (name.clone(), span.line),
                _ => unreachable!(),
            };
            tokens.next(); // consume '='

            let value = parse_assignment(tokens)?;
            return Ok(Expr::Assignment { name,
                                         value: Box::new(value),
                                         line });
        }
    }
    parse_logical_or(tokens)
}
