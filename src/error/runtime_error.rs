#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can be raised while a script is running.
pub enum RuntimeError {
    /// Tried to read or assign a variable that was never declared.
    UndeclaredVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Attempted division (or remainder) with a zero divisor.
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Called a name that is not a recognized builtin.
    UnknownCall {
        /// The name that was called.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A builtin was called with the wrong number of arguments.
    ArgumentCountMismatch {
        /// The name of the builtin.
        name:     String,
        /// The number of arguments the builtin requires.
        expected: usize,
        /// The number of arguments actually supplied.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UndeclaredVariable { name, line } => {
                write!(f, "Error on line {line}: Undeclared variable '{name}'.")
            },
            Self::DivisionByZero { line } => write!(f, "Error on line {line}: Division by zero."),
            Self::UnknownCall { name, line } => {
                write!(f, "Error on line {line}: Unknown call '{name}'.")
            },
            Self::ArgumentCountMismatch { name,
                                          expected,
                                          found,
                                          line, } => write!(f,
                                                            "Error on line {line}: '{name}' takes {expected} arguments, but {found} were supplied."),
        }
    }
}

impl std::error::Error for RuntimeError {}
