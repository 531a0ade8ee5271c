/// Binary operator evaluation.
///
/// Applies a single binary operator to two already-evaluated operands,
/// including the truncating remainder and the boolean-sentinel logical
/// connectives, and raises division-by-zero faults.
pub mod binary;
/// Builtin call dispatch.
///
/// Defines the closed table of builtins a script may call (`fill_hsv`,
/// `delay`), checks arities, and forwards the calls to the injected LED
/// device.
pub mod builtin;
/// The interpreter core.
///
/// Owns the variable environment, the evaluation stack, the device, and the
/// cancellation token; walks the syntax tree executing statements and
/// evaluating expressions.
pub mod core;
