use std::collections::HashMap;

use crate::{
    ast::{Expr, Program, Statement},
    device::{CancelToken, LedDevice},
    error::RuntimeError,
    interpreter::evaluator::binary::eval_binary_op,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Executes parsed programs against an injected LED device.
///
/// An `Interpreter` owns the complete runtime state of one script: the flat
/// variable environment, the transient evaluation stack, the device it
/// drives, and the cancellation token that lets a host tear the script down.
/// Nothing is shared between instances; a host running several scripts
/// concurrently creates one interpreter per script.
pub struct Interpreter<D: LedDevice> {
    /// The single flat mapping from variable name to value. The whole
    /// language has one namespace; blocks and function bodies do not scope.
    pub(in crate::interpreter::evaluator) variables: HashMap<String, f64>,
    /// Scratch stack for expression evaluation. Balanced around every
    /// statement; each expression leaves exactly one value.
    pub(in crate::interpreter::evaluator) stack:     Vec<f64>,
    /// The host-provided LED capability.
    pub(in crate::interpreter::evaluator) device:    D,
    /// Cancellation signal checked at every loop-iteration boundary and
    /// polled by the device during `delay`.
    pub(in crate::interpreter::evaluator) cancel:    CancelToken,
}

impl<D: LedDevice> Interpreter<D> {
    /// Creates an interpreter with an empty environment, driving `device`.
    #[must_use]
    pub fn new(device: D) -> Self {
        Self { variables: HashMap::new(),
               stack:     Vec::new(),
               device,
               cancel:    CancelToken::new(), }
    }

    /// Returns a clonable handle to this interpreter's cancellation token.
    ///
    /// Cancelling the token makes a running `loop` exit at its next
    /// iteration boundary and preempts any in-flight `delay`.
    #[must_use]
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Returns the current value of `name`, if it has been declared.
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<f64> {
        self.variables.get(name).copied()
    }

    /// Borrows the device this interpreter drives.
    #[must_use]
    pub const fn device(&self) -> &D {
        &self.device
    }

    /// Consumes the interpreter and returns its device.
    #[must_use]
    pub fn into_device(self) -> D {
        self.device
    }

    /// Runs a program to completion.
    ///
    /// Top-level statements execute in order. There is no return value; a
    /// script's only outputs are its device calls. Execution stops early
    /// when the cancellation token fires or a statement faults.
    ///
    /// # Errors
    /// Returns the first [`RuntimeError`] a statement raises.
    ///
    /// # Examples
    /// ```
    /// use lumen::{compile, device::NullLed, interpreter::evaluator::core::Interpreter};
    ///
    /// let program = compile("let x = 2 + 3 * 4;").unwrap();
    /// let mut interpreter = Interpreter::new(NullLed);
    /// interpreter.run(&program).unwrap();
    ///
    /// assert_eq!(interpreter.variable("x"), Some(14.0));
    /// ```
    pub fn run(&mut self, program: &Program) -> EvalResult<()> {
        for statement in &program.statements {
            if self.cancel.is_cancelled() {
                break;
            }
            self.eval_statement(statement)?;
        }
        Ok(())
    }

    /// Executes a single statement.
    ///
    /// Statements produce no value and leave the evaluation stack exactly as
    /// they found it.
    ///
    /// # Parameters
    /// - `statement`: Statement to execute.
    fn eval_statement(&mut self, statement: &Statement) -> EvalResult<()> {
        match statement {
            Statement::Expression { expr, .. } => {
                let depth = self.stack.len();
                self.eval_expression(expr)?;
                self.stack.truncate(depth);
                Ok(())
            },
            Statement::VarDeclaration { name, init, .. } => {
                let value = match init {
                    Some(expr) => {
                        self.eval_expression(expr)?;
                        self.pop_operand()
                    },
                    None => 0.0,
                };
                // Redeclaring an existing name silently overwrites it.
                self.variables.insert(name.clone(), value);
                Ok(())
            },
            Statement::IfElse { condition,
                                then_branch,
                                else_branch,
                                .. } => {
                self.eval_expression(condition)?;
                let result = self.pop_operand();
                // Only the exact sentinel 1.0 selects the then-branch; any
                // other number counts as false.
                if result == 1.0 {
                    self.eval_statement(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.eval_statement(else_branch)
                } else {
                    Ok(())
                }
            },
            Statement::Loop { body, .. } => {
                while !self.cancel.is_cancelled() {
                    self.eval_statement(body)?;
                }
                Ok(())
            },
            Statement::Block { statements, .. } => {
                for statement in statements {
                    self.eval_statement(statement)?;
                }
                Ok(())
            },
            // Declarations parse but never execute; calls are not part of
            // the language.
            Statement::FunctionDecl { .. } => Ok(()),
        }
    }

    /// Evaluates an expression, leaving exactly one value on the stack.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    fn eval_expression(&mut self, expr: &Expr) -> EvalResult<()> {
        match expr {
            Expr::Number { value, .. } => {
                self.stack.push(*value);
                Ok(())
            },
            Expr::Variable { name, line } => {
                let value =
                    *self.variables
                         .get(name)
                         .ok_or_else(|| RuntimeError::UndeclaredVariable { name: name.clone(),
                                                                           line: *line, })?;
                self.stack.push(value);
                Ok(())
            },
            Expr::Assignment { name, value, line } => {
                if !self.variables.contains_key(name) {
                    return Err(RuntimeError::UndeclaredVariable { name: name.clone(),
                                                                  line: *line, });
                }

                self.eval_expression(value)?;
                let result = self.pop_operand();
                self.variables.insert(name.clone(), result);
                // The assigned value is also the expression's value.
                self.stack.push(result);
                Ok(())
            },
            Expr::Binary { op, lhs, rhs, line } => {
                // Strict left-to-right evaluation; `and`/`or` do not
                // short-circuit.
                self.eval_expression(lhs)?;
                self.eval_expression(rhs)?;
                let rhs = self.pop_operand();
                let lhs = self.pop_operand();

                let result = eval_binary_op(*op, lhs, rhs, *line)?;
                self.stack.push(result);
                Ok(())
            },
            Expr::Call { name, arguments, line } => {
                let mut args = Vec::with_capacity(arguments.len());
                for argument in arguments {
                    self.eval_expression(argument)?;
                    args.push(self.pop_operand());
                }

                let result = self.call_builtin(name, &args, *line)?;
                self.stack.push(result);
                Ok(())
            },
        }
    }

    /// Pops one value off the evaluation stack.
    fn pop_operand(&mut self) -> f64 {
        match self.stack.pop() {
            Some(value) => value,
            None => unreachable!("every expression leaves exactly one value on the stack"),
        }
    }
}
