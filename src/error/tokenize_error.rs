#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while tokenizing source text.
pub enum TokenizeError {
    /// Encountered a character that is not part of the language alphabet.
    UnexpectedCharacter {
        /// The offending text.
        text:   String,
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// A numeric literal contained a second decimal separator.
    SecondDecimalPoint {
        /// The source line where the error occurred.
        line:   usize,
        /// The column of the second decimal point.
        column: usize,
    },
}

impl std::fmt::Display for TokenizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedCharacter { text, line, column } => {
                write!(f, "Error on line {line}, column {column}: Unexpected symbol: '{text}'.")
            },
            Self::SecondDecimalPoint { line, column } => write!(f,
                                                                "Error on line {line}, column {column}: Found second decimal separator in number."),
        }
    }
}

impl std::error::Error for TokenizeError {}
