use logos::Logos;

use crate::error::TokenizeError;

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
#[logos(error = LexFault)]
pub enum Token {
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `loop`
    #[token("loop")]
    Loop,
    /// `let`
    #[token("let")]
    Let,
    /// `fn`
    #[token("fn")]
    Fn,
    /// `and`
    #[token("and")]
    And,
    /// `or`
    #[token("or")]
    Or,
    /// Identifier tokens; variable or builtin names such as `hue` or
    /// `fill_hsv`. Identifiers are runs of letters and underscores; digits
    /// are not part of a name.
    #[regex(r"[a-zA-Z_]+", |lex| lex.slice().to_string())]
    Identifier(String),
    /// Numeric literal tokens, such as `255` or `0.5`. At most one decimal
    /// point is allowed; a second one in the same literal is a lexing fault.
    #[regex(r"[0-9]+\.?[0-9]*", parse_number)]
    #[regex(r"[0-9]+\.[0-9]*\.[0-9.]*", second_decimal_point)]
    Number(f64),
    /// `// Comments.`
    #[regex(r"//[^\n]*", logos::skip)]
    Comment,
    /// Newlines bump the line counter and are otherwise skipped.
    #[token("\n", newline)]
    NewLine,
    /// Spaces, tabs and feeds.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
    /// `,`
    #[token(",")]
    Comma,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `=`
    #[token("=")]
    Assign,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `!`
    #[token("!")]
    Bang,
}

/// The source position and extent of a single token.
///
/// Lines and columns are 1-based. `length` is the number of bytes the token
/// occupies; no token crosses a line boundary in this language.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    /// The 1-based source line the token starts on.
    pub line:   usize,
    /// The 1-based column of the token's first character.
    pub column: usize,
    /// The number of characters the token covers.
    pub length: usize,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number and the byte offset of the start of that
/// line, so token columns can be derived from byte spans.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line:       usize,
    /// Byte offset at which the current line begins.
    pub line_start: usize,
}

/// Internal lexing fault raised by token callbacks.
///
/// `tokenize_all` converts these into a positioned [`TokenizeError`]; the
/// variants never escape this module otherwise.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum LexFault {
    /// A character no token pattern recognizes.
    #[default]
    UnexpectedCharacter,
    /// A numeric literal containing more than one decimal point.
    SecondDecimalPoint,
}

/// Tokenizes an entire source string.
///
/// Produces the full token sequence in source order, each token paired with
/// its [`Span`]. Whitespace and `//` comments are consumed but never emitted,
/// so the returned tokens cover exactly the meaningful characters of the
/// input, in strictly increasing position order. The end of input is
/// observed as the end of the returned sequence.
///
/// # Errors
/// Returns a [`TokenizeError`] for a character outside the language alphabet
/// or for a numeric literal with a second decimal point; the error carries
/// the position of the offending character.
///
/// # Examples
/// ```
/// use lumen::interpreter::lexer::{Token, tokenize_all};
///
/// let tokens = tokenize_all("let hue = 0;").unwrap();
///
/// assert_eq!(tokens[0].0, Token::Let);
/// assert_eq!(tokens[1].0, Token::Identifier("hue".to_string()));
/// assert_eq!(tokens.len(), 5);
/// ```
pub fn tokenize_all(source: &str) -> Result<Vec<(Token, Span)>, TokenizeError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer_with_extras(source, LexerExtras { line: 1, line_start: 0 });

    while let Some(item) = lexer.next() {
        let span = lexer.span();
        let position = Span { line:   lexer.extras.line,
                              column: span.start - lexer.extras.line_start + 1,
                              length: span.len(), };

        match item {
            Ok(token) => tokens.push((token, position)),
            Err(LexFault::SecondDecimalPoint) => {
                // Point at the second dot inside the malformed literal.
                let offset = lexer.slice()
                                  .match_indices('.')
                                  .nth(1)
                                  .map_or(0, |(index, _)| index);
                return Err(TokenizeError::SecondDecimalPoint { line:   position.line,
                                                               column: position.column + offset, });
            },
            Err(LexFault::UnexpectedCharacter) => {
                return Err(TokenizeError::UnexpectedCharacter { text:   lexer.slice().to_string(),
                                                                line:   position.line,
                                                                column: position.column, });
            },
        }
    }

    Ok(tokens)
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Identifier(name) => write!(f, "identifier '{name}'"),
            Self::Number(value) => write!(f, "number '{value}'"),
            other => {
                let lexeme = match other {
                    Self::If => "if",
                    Self::Else => "else",
                    Self::Loop => "loop",
                    Self::Let => "let",
                    Self::Fn => "fn",
                    Self::And => "and",
                    Self::Or => "or",
                    Self::Comma => ",",
                    Self::Semicolon => ";",
                    Self::Assign => "=",
                    Self::LBrace => "{",
                    Self::RBrace => "}",
                    Self::LParen => "(",
                    Self::RParen => ")",
                    Self::Plus => "+",
                    Self::Minus => "-",
                    Self::Star => "*",
                    Self::Slash => "/",
                    Self::Percent => "%",
                    Self::EqualEqual => "==",
                    Self::BangEqual => "!=",
                    Self::LessEqual => "<=",
                    Self::GreaterEqual => ">=",
                    Self::Less => "<",
                    Self::Greater => ">",
                    Self::Bang => "!",
                    Self::Comment | Self::NewLine | Self::Ignored => "",
                    Self::Identifier(_) | Self::Number(_) => unreachable!(),
                };
                write!(f, "'{lexeme}'")
            },
        }
    }
}

/// Parses a numeric literal from the current token slice.
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Returns
/// - `Some(f64)`: The parsed value if successful.
/// - `None`: If the token slice is not a valid number.
fn parse_number(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Rejects a numeric literal that contains a second decimal point.
fn second_decimal_point(_lex: &logos::Lexer<Token>) -> Result<f64, LexFault> {
    Err(LexFault::SecondDecimalPoint)
}

/// Advances the line bookkeeping when a newline is consumed.
fn newline(lex: &mut logos::Lexer<Token>) -> logos::Skip {
    lex.extras.line += 1;
    lex.extras.line_start = lex.span().end;
    logos::Skip
}
