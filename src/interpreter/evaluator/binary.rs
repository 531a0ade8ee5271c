use crate::{ast::BinaryOperator, error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Applies a binary operator to two evaluated operands.
///
/// Arithmetic runs directly on the `f64` operands. Division with a zero
/// divisor is rejected rather than producing IEEE infinities, keeping
/// behavior deterministic on embedded hosts. The remainder operator
/// truncates both operands toward zero, takes the integer remainder (so the
/// sign follows the dividend), and converts back; a divisor that truncates
/// to zero is rejected the same way. Comparisons and the logical
/// connectives return the boolean sentinels `1.0`/`0.0`, and `and`/`or`
/// treat *only* an operand exactly equal to `1.0` as true.
///
/// # Parameters
/// - `op`: The operator to apply.
/// - `lhs`: Left operand.
/// - `rhs`: Right operand.
/// - `line`: Line number for error reporting.
///
/// # Returns
/// The computed value.
///
/// # Errors
/// Returns [`RuntimeError::DivisionByZero`] for `/` or `%` with a zero
/// divisor.
///
/// # Example
/// ```
/// use lumen::{ast::BinaryOperator, interpreter::evaluator::binary::eval_binary_op};
///
/// assert_eq!(eval_binary_op(BinaryOperator::Mod, -5.0, 2.0, 1).unwrap(), -1.0);
/// assert_eq!(eval_binary_op(BinaryOperator::And, 0.5, 1.0, 1).unwrap(), 0.0);
/// ```
pub fn eval_binary_op(op: BinaryOperator, lhs: f64, rhs: f64, line: usize) -> EvalResult<f64> {
    use BinaryOperator::{
        Add, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mod, Mul, NotEqual, Or, Sub,
    };

    match op {
        Add => Ok(lhs + rhs),
        Sub => Ok(lhs - rhs),
        Mul => Ok(lhs * rhs),
        Div => {
            if rhs == 0.0 {
                return Err(RuntimeError::DivisionByZero { line });
            }
            Ok(lhs / rhs)
        },
        Mod => {
            let lhs = lhs.trunc() as i64;
            let rhs = rhs.trunc() as i64;
            if rhs == 0 {
                return Err(RuntimeError::DivisionByZero { line });
            }
            Ok((lhs % rhs) as f64)
        },
        Equal => Ok(sentinel(lhs == rhs)),
        NotEqual => Ok(sentinel(lhs != rhs)),
        LessEqual => Ok(sentinel(lhs <= rhs)),
        GreaterEqual => Ok(sentinel(lhs >= rhs)),
        Less => Ok(sentinel(lhs < rhs)),
        Greater => Ok(sentinel(lhs > rhs)),
        And => Ok(sentinel(lhs == 1.0 && rhs == 1.0)),
        Or => Ok(sentinel(lhs == 1.0 || rhs == 1.0)),
    }
}

/// Encodes a boolean as the language's sentinel values.
const fn sentinel(value: bool) -> f64 {
    if value { 1.0 } else { 0.0 }
}
