//! # lumen
//!
//! lumen is a tiny imperative scripting language for addressable-LED
//! effects, written in Rust. A script's only externally visible effects are
//! filling the strip with an HSV color and suspending execution, so the
//! whole language fits in one small pipeline: tokenizer, recursive-descent
//! parser, and a tree-walking interpreter that drives a host-provided
//! device capability.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    ast::Program,
    device::LedDevice,
    interpreter::{evaluator::core::Interpreter, lexer::tokenize_all, parser::core::parse_program},
};

/// Defines the structure of parsed code.
///
/// This module declares the `Statement` and `Expr` enums and related types
/// that represent the syntactic structure of source code as a tree. The AST
/// is built by the parser and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches source lines to AST nodes for error reporting.
/// - Renders parsed programs as readable syntax trees.
pub mod ast;
/// The LED capability boundary and cancellation primitives.
///
/// This module defines the `LedDevice` trait through which the interpreter
/// produces all of its externally visible effects, the cancellation token a
/// host uses to tear down a running script, and two ready-made devices: a
/// silent one for embedding and tests, and a console device that logs fills
/// and sleeps in real time.
///
/// # Responsibilities
/// - Declares the `fill_hsv`/`delay` capability surface.
/// - Provides the shared, clonable cancellation signal.
/// - Ships reference device implementations.
pub mod device;
/// Provides unified error types for tokenizing, parsing and evaluation.
///
/// This module defines all errors that can be raised while compiling or
/// running code. It standardizes error reporting and carries detailed
/// information about failures, including error kinds, descriptions, and
/// source locations for debugging and user feedback.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Attaches line numbers and detailed messages for context.
/// - Supports integration with standard error handling traits and reporting
///   utilities.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, error handling,
/// and all supporting infrastructure to provide a complete runtime for
/// source code execution. It exposes the public API for compiling and
/// running scripts.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, and evaluator.
/// - Provides entry points for parsing and executing scripts.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;

/// Compiles source text into a [`Program`].
///
/// Runs the tokenizer and the parser, returning the syntax tree without
/// executing anything. The first tokenizing or parsing failure aborts the
/// attempt.
///
/// # Errors
/// Returns an error if tokenizing or parsing fails.
///
/// # Examples
/// ```
/// use lumen::compile;
///
/// let program = compile("let hue = 0; hue = (hue + 1) % 255;").unwrap();
/// assert_eq!(program.statements.len(), 2);
///
/// // A second decimal separator is a tokenizing error.
/// assert!(compile("let x = 1.2.3;").is_err());
/// ```
pub fn compile(source: &str) -> Result<Program, Box<dyn std::error::Error>> {
    let tokens = tokenize_all(source)?;
    tracing::debug!(tokens = tokens.len(), "tokenized");

    let program = parse_program(&mut tokens.iter().peekable())?;
    tracing::debug!(statements = program.statements.len(), "parsed");

    Ok(program)
}

/// Compiles and runs a script against the given device.
///
/// This is the one-call entry point for hosts that do not need to inspect
/// the token stream or the syntax tree. The device receives every `fill_hsv`
/// the script performs; `delay` suspends through the device's preemptible
/// sleep.
///
/// Note that a script containing a `loop` will not return until the
/// interpreter's cancellation token fires; hosts that need teardown control
/// should construct an [`Interpreter`] themselves and keep the token.
///
/// # Errors
/// Returns an error if tokenizing, parsing, or execution fails.
///
/// # Examples
/// ```
/// use lumen::{device::NullLed, run_script};
///
/// let source = "let hue = 128; fill_hsv(hue, 255, 255);";
/// assert!(run_script(source, NullLed).is_ok());
///
/// // 'x' is not declared.
/// assert!(run_script("x = 1;", NullLed).is_err());
/// ```
pub fn run_script<D: LedDevice>(source: &str, device: D) -> Result<(), Box<dyn std::error::Error>> {
    let program = compile(source)?;

    let mut interpreter = Interpreter::new(device);
    interpreter.run(&program)?;

    Ok(())
}
