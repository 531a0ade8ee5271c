#[derive(Debug, Clone, PartialEq)]
/// Represents all errors that can occur during parsing.
pub enum ParseError {
    /// A specific token kind was required but a different one was found.
    ExpectedToken {
        /// Description of the expected token.
        expected: String,
        /// Description of the token actually found.
        found:    String,
        /// The source line where the error occurred.
        line:     usize,
        /// The source column where the error occurred.
        column:   usize,
    },
    /// Found a token that cannot start the construct being parsed.
    UnexpectedToken {
        /// Description of the token encountered.
        token:  String,
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// Reached the end of input while a construct was still open.
    UnexpectedEndOfInput {
        /// The source line where the error occurred.
        line: usize,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ExpectedToken { expected,
                                  found,
                                  line,
                                  column, } => write!(f,
                                                      "Error on line {line}, column {column}: Expected {expected}, got {found}."),

            Self::UnexpectedToken { token, line, column } => {
                write!(f, "Error on line {line}, column {column}: Unexpected token: {token}.")
            },

            Self::UnexpectedEndOfInput { line } => {
                write!(f, "Error on line {line}: Unexpected end of input.")
            },
        }
    }
}

impl std::error::Error for ParseError {}
