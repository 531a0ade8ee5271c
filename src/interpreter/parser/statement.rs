use std::iter::Peekable;

use crate::{
    ast::Statement,
    error::ParseError,
    interpreter::{
        lexer::{Span, Token},
        parser::{
            core::{ParseResult, parse_expression},
            utils::{expect, parse_comma_separated, parse_identifier},
        },
    },
};

/// Parses a single statement.
///
/// The statement form is chosen by one token of lookahead:
/// - `if` starts a conditional,
/// - `loop` starts an unconditional loop,
/// - `let` starts a variable declaration,
/// - `fn` starts a function declaration,
/// - `{` starts a block,
/// - anything else is an expression statement terminated by `;`.
///
/// Grammar:
/// ```text
///     statement := if_else | loop | var_decl | fn_decl | block
///                | expression ";"
/// ```
///
/// # Parameters
/// - `tokens`: Token iterator containing `(Token, Span)` pairs.
///
/// # Returns
/// A parsed [`Statement`] node.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    match tokens.peek() {
        Some((Token::If, _)) => parse_if_else(tokens),
        Some((Token::Loop, _)) => parse_loop(tokens),
        Some((Token::Let, _)) => parse_var_declaration(tokens),
        Some((Token::Fn, _)) => parse_fn_declaration(tokens),
        Some((Token::LBrace, _)) => parse_block(tokens),
        _ => {
            let line = tokens.peek().map_or(0, |(_, span)| span.line);
            let expr = parse_expression(tokens)?;
            expect(tokens, &Token::Semicolon)?;
            Ok(Statement::Expression { expr, line })
        },
    }
}

/// Parses a conditional statement with an optional `else` branch.
///
/// Grammar: `if_else := "if" "(" expression ")" statement ("else" statement)?`
///
/// Both branches are full statements, so `else if` chains arise naturally
/// from an `if` statement in the else position.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at `if`.
///
/// # Returns
/// A [`Statement::IfElse`] node.
fn parse_if_else<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    let span = expect(tokens, &Token::If)?;
    expect(tokens, &Token::LParen)?;
    let condition = parse_expression(tokens)?;
    expect(tokens, &Token::RParen)?;

    let then_branch = Box::new(parse_statement(tokens)?);

    let else_branch = if let Some((Token::Else, _)) = tokens.peek() {
        tokens.next();
        Some(Box::new(parse_statement(tokens)?))
    } else {
        None
    };

    Ok(Statement::IfElse { condition,
                           then_branch,
                           else_branch,
                           line: span.line })
}

/// Parses an unconditional loop.
///
/// Grammar: `loop := "loop" statement`
///
/// The loop has no exit construct of its own; see the evaluator's
/// cancellation handling for how a host terminates one.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at `loop`.
///
/// # Returns
/// A [`Statement::Loop`] node.
fn parse_loop<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    let span = expect(tokens, &Token::Loop)?;
    let body = Box::new(parse_statement(tokens)?);
    Ok(Statement::Loop { body,
                         line: span.line })
}

/// Parses a variable declaration.
///
/// Grammar: `var_decl := "let" IDENTIFIER ("=" expression)? ";"`
///
/// The initializer is optional; a declaration without one defaults the
/// variable to `0.0` at runtime.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at `let`.
///
/// # Returns
/// A [`Statement::VarDeclaration`] node.
fn parse_var_declaration<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    let span = expect(tokens, &Token::Let)?;
    let name = parse_identifier(tokens)?;

    let init = if let Some((Token::Assign, _)) = tokens.peek() {
        tokens.next();
        Some(parse_expression(tokens)?)
    } else {
        None
    };
    expect(tokens, &Token::Semicolon)?;

    Ok(Statement::VarDeclaration { name,
                                   init,
                                   line: span.line })
}

/// Parses a function declaration.
///
/// Grammar: `fn_decl := "fn" IDENTIFIER "(" (IDENTIFIER ("," IDENTIFIER)*)? ")" statement`
///
/// Declarations are legal syntax but have no runtime effect; the evaluator
/// skips them, and calling a declared name still faults.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at `fn`.
///
/// # Returns
/// A [`Statement::FunctionDecl`] node.
fn parse_fn_declaration<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    let span = expect(tokens, &Token::Fn)?;
    let name = parse_identifier(tokens)?;
    expect(tokens, &Token::LParen)?;
    let params = parse_comma_separated(tokens, parse_identifier, &Token::RParen)?;
    let body = Box::new(parse_statement(tokens)?);

    Ok(Statement::FunctionDecl { name,
                                 params,
                                 body,
                                 line: span.line })
}

/// Parses a braced block of statements.
///
/// Grammar: `block := "{" statement* "}"`
///
/// Blocks group statements for `if`/`loop` bodies; they do not open a new
/// variable scope.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at `{`.
///
/// # Returns
/// A [`Statement::Block`] node.
///
/// # Errors
/// Returns a `ParseError` if the input ends before the closing `}`.
fn parse_block<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    let span = expect(tokens, &Token::LBrace)?;
    let mut statements = Vec::new();

    loop {
        match tokens.peek() {
            Some((Token::RBrace, _)) => {
                tokens.next();
                break;
            },
            Some(_) => statements.push(parse_statement(tokens)?),
            None => return Err(ParseError::UnexpectedEndOfInput { line: span.line }),
        }
    }

    Ok(Statement::Block { statements,
                          line: span.line })
}
