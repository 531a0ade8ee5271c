use std::fmt::{self, Write};

/// An abstract syntax tree (AST) node representing an expression.
///
/// `Expr` covers every expression form in the language: numeric literals,
/// variable references, assignments, binary operations, and builtin calls.
/// Each variant carries the source line it originated from for error
/// reporting. Every expression evaluates to exactly one `f64` value.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A numeric literal.
    Number {
        /// The literal value.
        value: f64,
        /// Line number in the source code.
        line:  usize,
    },
    /// Reference to a variable by name.
    Variable {
        /// Name of the variable.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// An assignment binding a name to a value; the value is also the result
    /// of the expression.
    Assignment {
        /// The name of the variable.
        name:  String,
        /// The value which is being assigned.
        value: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// A binary operation (addition, comparison, etc.).
    Binary {
        /// The operator.
        op:   BinaryOperator,
        /// Left operand.
        lhs:  Box<Self>,
        /// Right operand.
        rhs:  Box<Self>,
        /// Line number in the source code.
        line: usize,
    },
    /// Builtin call expression (e.g. `fill_hsv(h, s, v)`).
    Call {
        /// Name of the builtin being called.
        name:      String,
        /// Arguments to the call, in source order.
        arguments: Vec<Self>,
        /// Line number in the source code.
        line:      usize,
    },
}

impl Expr {
    /// Gets the line number from `self`.
    /// ## Example
    /// ```
    /// use lumen::ast::Expr;
    ///
    /// let expr = Expr::Variable { name: "hue".to_string(),
    ///                             line: 5, };
    ///
    /// assert_eq!(expr.line_number(), 5);
    /// ```
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Number { line, .. }
            | Self::Variable { line, .. }
            | Self::Assignment { line, .. }
            | Self::Binary { line, .. }
            | Self::Call { line, .. } => *line,
        }
    }
}

/// A statement, the unit of execution.
///
/// Statements do not produce values; they are executed in order for their
/// effect on the environment or the LED device.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A standalone expression evaluated for its side effects.
    Expression {
        /// The expression to evaluate.
        expr: Expr,
        /// Line number in the source code.
        line: usize,
    },
    /// A variable declaration using `let`, with an optional initializer.
    VarDeclaration {
        /// The name of the variable.
        name: String,
        /// The initial value, or `None` to default to `0.0`.
        init: Option<Expr>,
        /// Line number in the source code.
        line: usize,
    },
    /// A conditional with an optional `else` branch.
    IfElse {
        /// The condition expression.
        condition:   Expr,
        /// Statement executed if the condition is exactly `1.0`.
        then_branch: Box<Self>,
        /// Statement executed otherwise, if present.
        else_branch: Option<Box<Self>>,
        /// Line number in the source code.
        line:        usize,
    },
    /// An unconditional loop with no built-in exit; termination is the
    /// host's concern via cancellation.
    Loop {
        /// The loop body.
        body: Box<Self>,
        /// Line number in the source code.
        line: usize,
    },
    /// A braced sequence of statements. Blocks do *not* introduce a new
    /// variable scope.
    Block {
        /// Statements inside the block, in source order.
        statements: Vec<Self>,
        /// Line number in the source code.
        line:       usize,
    },
    /// A function declaration. Accepted by the grammar but inert at runtime;
    /// user-defined calls are not part of the language.
    FunctionDecl {
        /// The name of the function.
        name:   String,
        /// The parameter names, in source order.
        params: Vec<String>,
        /// The function body.
        body:   Box<Self>,
        /// Line number in the source code.
        line:   usize,
    },
}

impl Statement {
    /// Gets the line number from `self`.
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Expression { line, .. }
            | Self::VarDeclaration { line, .. }
            | Self::IfElse { line, .. }
            | Self::Loop { line, .. }
            | Self::Block { line, .. }
            | Self::FunctionDecl { line, .. } => *line,
        }
    }
}

/// A complete parsed script: the ordered top-level statements.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// Top-level statements in source order.
    pub statements: Vec<Statement>,
}

/// Represents a binary operator.
///
/// Binary operators include arithmetic, comparisons, and the sentinel
/// logical connectives.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Truncating remainder (`%`)
    Mod,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Logical and (`and`)
    And,
    /// Logical or (`or`)
    Or,
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use BinaryOperator::{
            Add, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mod, Mul, NotEqual, Or,
            Sub,
        };
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Mod => "%",
            Equal => "==",
            NotEqual => "!=",
            LessEqual => "<=",
            GreaterEqual => ">=",
            Less => "<",
            Greater => ">",
            And => "and",
            Or => "or",
        };
        write!(f, "{operator}")
    }
}

const INDENT: &str = "  ";

/// Renders a program as an indented syntax tree, one node per line.
///
/// ## Example
/// ```
/// use lumen::compile;
///
/// let program = compile("let hue = 0;").unwrap();
/// let tree = program.to_string();
///
/// assert!(tree.contains("VarDeclaration (hue)"));
/// assert!(tree.contains("Number: 0"));
/// ```
impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Program: (")?;
        for statement in &self.statements {
            write_statement(f, statement, 1)?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_statement(f, self, 0)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_expression(f, self, 0)
    }
}

fn write_statement(f: &mut impl Write, statement: &Statement, depth: usize) -> fmt::Result {
    let pad = INDENT.repeat(depth);
    match statement {
        Statement::Expression { expr, .. } => {
            writeln!(f, "{pad}ExprStatement:")?;
            write_expression(f, expr, depth + 1)
        },
        Statement::VarDeclaration { name, init, .. } => match init {
            Some(expr) => {
                writeln!(f, "{pad}VarDeclaration ({name}):")?;
                write_expression(f, expr, depth + 1)
            },
            None => writeln!(f, "{pad}VarDeclaration ({name})"),
        },
        Statement::IfElse { condition,
                            then_branch,
                            else_branch,
                            .. } => {
            writeln!(f, "{pad}If: (")?;
            writeln!(f, "{pad}{INDENT}condition:")?;
            write_expression(f, condition, depth + 2)?;
            writeln!(f, "{pad}{INDENT}body:")?;
            write_statement(f, then_branch, depth + 2)?;
            if let Some(else_branch) = else_branch {
                writeln!(f, "{pad}{INDENT}else body:")?;
                write_statement(f, else_branch, depth + 2)?;
            }
            writeln!(f, "{pad})")
        },
        Statement::Loop { body, .. } => {
            writeln!(f, "{pad}Loop:")?;
            write_statement(f, body, depth + 1)
        },
        Statement::Block { statements, .. } => {
            writeln!(f, "{pad}Block: (")?;
            for statement in statements {
                write_statement(f, statement, depth + 1)?;
            }
            writeln!(f, "{pad})")
        },
        Statement::FunctionDecl { name, params, body, .. } => {
            if params.is_empty() {
                writeln!(f, "{pad}Function ({name}):")?;
            } else {
                writeln!(f, "{pad}Function ({name}: {}):", params.join(", "))?;
            }
            write_statement(f, body, depth + 1)
        },
    }
}

fn write_expression(f: &mut impl Write, expr: &Expr, depth: usize) -> fmt::Result {
    let pad = INDENT.repeat(depth);
    match expr {
        Expr::Number { value, .. } => writeln!(f, "{pad}Number: {value}"),
        Expr::Variable { name, .. } => writeln!(f, "{pad}Var: {name}"),
        Expr::Assignment { name, value, .. } => {
            writeln!(f, "{pad}Assignment ({name}):")?;
            write_expression(f, value, depth + 1)
        },
        Expr::Binary { op, lhs, rhs, .. } => {
            writeln!(f, "{pad}BinOp ({op}): (")?;
            writeln!(f, "{pad}{INDENT}Left:")?;
            write_expression(f, lhs, depth + 2)?;
            writeln!(f, "{pad}{INDENT}Right:")?;
            write_expression(f, rhs, depth + 2)?;
            writeln!(f, "{pad})")
        },
        Expr::Call { name, arguments, .. } => {
            if arguments.is_empty() {
                writeln!(f, "{pad}Call ({name})")
            } else {
                writeln!(f, "{pad}Call ({name}): (")?;
                for argument in arguments {
                    write_expression(f, argument, depth + 1)?;
                }
                writeln!(f, "{pad})")
            }
        },
    }
}
