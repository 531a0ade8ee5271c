use crate::{
    device::LedDevice,
    error::RuntimeError,
    interpreter::evaluator::core::{EvalResult, Interpreter},
};

const FILL_HSV: &str = "fill_hsv";
const DELAY: &str = "delay";

/// Specifies one builtin: its name and the exact argument count it takes.
struct BuiltinDef {
    name:  &'static str,
    arity: usize,
}

/// The closed set of builtins a script may call. Anything else is an
/// unknown-call fault.
static BUILTIN_TABLE: &[BuiltinDef] = &[BuiltinDef { name:  FILL_HSV,
                                                     arity: 3, },
                                        BuiltinDef { name:  DELAY,
                                                     arity: 1, }];

/// Public list of builtin names.
pub const BUILTIN_FUNCTIONS: &[&str] = &[FILL_HSV, DELAY];

impl<D: LedDevice> Interpreter<D> {
    /// Dispatches a call expression to its builtin.
    ///
    /// `fill_hsv(h, s, v)` forwards its arguments to the device unmodified;
    /// `delay(ms)` suspends through the device's preemptible sleep. Every
    /// call evaluates to `0.0` so call expressions fit the one-value stack
    /// contract.
    ///
    /// # Parameters
    /// - `name`: The called name.
    /// - `args`: Evaluated argument values, in source order.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// The call expression's value, always `0.0`.
    ///
    /// # Errors
    /// - [`RuntimeError::UnknownCall`] if `name` is not a builtin.
    /// - [`RuntimeError::ArgumentCountMismatch`] if the arity is wrong.
    pub(in crate::interpreter::evaluator) fn call_builtin(&mut self,
                                                          name: &str,
                                                          args: &[f64],
                                                          line: usize)
                                                          -> EvalResult<f64> {
        let def = BUILTIN_TABLE.iter()
                               .find(|def| def.name == name)
                               .ok_or_else(|| RuntimeError::UnknownCall { name: name.to_string(),
                                                                          line })?;

        if args.len() != def.arity {
            return Err(RuntimeError::ArgumentCountMismatch { name:     name.to_string(),
                                                             expected: def.arity,
                                                             found:    args.len(),
                                                             line, });
        }

        match def.name {
            FILL_HSV => self.device.fill_hsv(args[0], args[1], args[2]),
            DELAY => {
                // An interrupted delay returns early; the enclosing loop
                // observes the cancellation at its next iteration boundary.
                let _ = self.device.delay(args[0], &self.cancel);
            },
            _ => unreachable!(),
        }

        Ok(0.0)
    }
}
