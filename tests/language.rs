use std::fs;

use lumen::{
    compile,
    device::{CancelToken, DelayStatus, LedDevice},
    error::{ParseError, RuntimeError, TokenizeError},
    interpreter::{evaluator::core::Interpreter, lexer::tokenize_all, parser::core::parse_program},
};
use walkdir::WalkDir;

/// A scripted device with a logical clock instead of real sleeps.
///
/// `delay` advances `now_ms` by the requested duration. If the advance would
/// reach `cancel_at_ms`, the device fires the cancellation token instead and
/// reports the wait as interrupted, which is exactly what a preemptible
/// real-time sleep does when a host tears the script down.
#[derive(Debug, Default)]
struct FakeLed {
    now_ms:           f64,
    cancel_at_ms:     Option<f64>,
    fills:            Vec<(f64, f64, f64)>,
    delays_started:   usize,
    delays_completed: usize,
}

impl FakeLed {
    fn cancelling_at(ms: f64) -> Self {
        Self { cancel_at_ms: Some(ms),
               ..Self::default() }
    }
}

impl LedDevice for FakeLed {
    fn fill_hsv(&mut self, hue: f64, saturation: f64, value: f64) {
        self.fills.push((hue, saturation, value));
    }

    fn delay(&mut self, milliseconds: f64, cancel: &CancelToken) -> DelayStatus {
        self.delays_started += 1;
        let target = self.now_ms + milliseconds;

        if let Some(at) = self.cancel_at_ms
           && target >= at
        {
            self.now_ms = at;
            cancel.cancel();
            return DelayStatus::Interrupted;
        }

        self.now_ms = target;
        self.delays_completed += 1;
        DelayStatus::Completed
    }
}

fn run_ok(src: &str) -> Interpreter<FakeLed> {
    let program = compile(src).unwrap_or_else(|e| panic!("Script failed to compile:\n{src}\n{e}"));
    let mut interpreter = Interpreter::new(FakeLed::default());
    if let Err(e) = interpreter.run(&program) {
        panic!("Script failed:\n{src}\n{e}");
    }
    interpreter
}

fn eval_var(src: &str, name: &str) -> f64 {
    run_ok(src).variable(name)
               .unwrap_or_else(|| panic!("variable '{name}' was never bound"))
}

fn runtime_error(src: &str) -> RuntimeError {
    let program = compile(src).unwrap_or_else(|e| panic!("Script failed to compile: {e}"));
    let mut interpreter = Interpreter::new(FakeLed::default());
    match interpreter.run(&program) {
        Ok(()) => panic!("Script succeeded but was expected to fail:\n{src}"),
        Err(e) => e,
    }
}

fn parse_error(src: &str) -> ParseError {
    let tokens = tokenize_all(src).expect("tokenizing should succeed");
    match parse_program(&mut tokens.iter().peekable()) {
        Ok(_) => panic!("Parsing succeeded but was expected to fail:\n{src}"),
        Err(e) => e,
    }
}

/// Maps a 1-based (line, column) position back to a byte offset.
fn byte_offset(source: &str, line: usize, column: usize) -> usize {
    let line_start: usize = source.split_inclusive('\n')
                                  .take(line - 1)
                                  .map(str::len)
                                  .sum();
    line_start + column - 1
}

#[test]
fn tokens_cover_every_meaningful_character_exactly_once() {
    let source = "let hue = 0; // initial color\nloop {\n    fill_hsv(hue, 255, 255);\n    hue = (hue + 1) % 255;\n    delay(20);\n}\n";
    let tokens = tokenize_all(source).unwrap();

    let mut covered = vec![false; source.len()];
    let mut last_position = (0, 0);

    for (_, span) in &tokens {
        assert!((span.line, span.column) > last_position,
                "token positions must be strictly increasing");
        last_position = (span.line, span.column);

        let start = byte_offset(source, span.line, span.column);
        for flag in &mut covered[start..start + span.length] {
            assert!(!*flag, "token spans must not overlap");
            *flag = true;
        }
    }

    for (line_index, line) in source.lines().enumerate() {
        let line_offset = byte_offset(source, line_index + 1, 1);
        let comment_start = line.find("//").map_or(line.len(), |at| at);
        for (char_index, c) in line.char_indices() {
            let expected = char_index < comment_start && !c.is_whitespace();
            assert_eq!(covered[line_offset + char_index], expected,
                       "byte {c:?} on line {} has wrong coverage",
                       line_index + 1);
        }
    }
}

#[test]
fn literals_and_basic_arithmetic() {
    assert_eq!(eval_var("let r = 1 + 2;", "r"), 3.0);
    assert_eq!(eval_var("let r = 8 - 5;", "r"), 3.0);
    assert_eq!(eval_var("let r = 7 * 9;", "r"), 63.0);
    assert_eq!(eval_var("let r = 10 / 4;", "r"), 2.5);
    assert_eq!(eval_var("let r = 0.5 + 1.;", "r"), 1.5);
}

#[test]
fn arithmetic_precedence() {
    assert_eq!(eval_var("let r = 2 + 3 * 4;", "r"), 14.0);
    assert_eq!(eval_var("let r = (2 + 3) * 4;", "r"), 20.0);
}

#[test]
fn modulo_truncates_toward_zero() {
    assert_eq!(eval_var("let r = 5 % 2;", "r"), 1.0);
    // The remainder keeps the dividend's sign.
    assert_eq!(eval_var("let r = -5 % 2;", "r"), -1.0);
    assert_eq!(eval_var("let r = 5 % -2;", "r"), 1.0);
    assert_eq!(eval_var("let r = 7.9 % 2.9;", "r"), 1.0);
}

#[test]
fn boolean_sentinels() {
    assert_eq!(eval_var("let r = 0.5 and 1;", "r"), 0.0);
    assert_eq!(eval_var("let r = 1 and 1;", "r"), 1.0);
    assert_eq!(eval_var("let r = 0 or 1;", "r"), 1.0);
    // Only the exact value 1.0 counts as true; general truthiness does not
    // apply.
    assert_eq!(eval_var("let r = 2 or 0;", "r"), 0.0);
    assert_eq!(eval_var("let r = 1 <= 2;", "r"), 1.0);
    assert_eq!(eval_var("let r = 1 == 2;", "r"), 0.0);
    assert_eq!(eval_var("let r = 1 != 2;", "r"), 1.0);
}

#[test]
fn logical_operators_do_not_short_circuit() {
    let interpreter = run_ok("let x = 0; let r = 1 or (x = 1);");
    assert_eq!(interpreter.variable("x"), Some(1.0));
    assert_eq!(interpreter.variable("r"), Some(1.0));
}

#[test]
fn assignment_mutates_shared_state() {
    assert_eq!(eval_var("let x = 1; x = x + 1;", "x"), 2.0);
}

#[test]
fn assignment_is_an_expression() {
    let interpreter = run_ok("let x = 0; let y = (x = 5) + 1;");
    assert_eq!(interpreter.variable("x"), Some(5.0));
    assert_eq!(interpreter.variable("y"), Some(6.0));
}

#[test]
fn declarations_default_and_overwrite() {
    assert_eq!(eval_var("let x;", "x"), 0.0);
    assert_eq!(eval_var("let x = 1; let x = 2;", "x"), 2.0);
}

#[test]
fn blocks_do_not_scope() {
    assert_eq!(eval_var("if (1 == 1) { let y = 5; } else { let y = 6; }", "y"),
               5.0);
}

#[test]
fn condition_must_be_the_exact_sentinel() {
    assert_eq!(eval_var("let x = 0; if (0.5) x = 1;", "x"), 0.0);
    assert_eq!(eval_var("let x = 0; if (2) { x = 1; } else { x = 2; }", "x"),
               2.0);
}

#[test]
fn unary_minus_desugars_to_subtraction_from_zero() {
    assert_eq!(compile("-5;").unwrap(), compile("0 - 5;").unwrap());
    assert_eq!(eval_var("let r = -5;", "r"), -5.0);
    assert_eq!(eval_var("let r = --5;", "r"), 5.0);
}

#[test]
fn loop_with_delay_cancels_after_two_iterations() {
    let program = compile("loop { delay(10); }").unwrap();
    let mut interpreter = Interpreter::new(FakeLed::cancelling_at(25.0));
    interpreter.run(&program).unwrap();

    let device = interpreter.device();
    assert_eq!(device.delays_completed, 2);
    assert_eq!(device.delays_started, 3);
}

#[test]
fn cancelled_loop_finishes_its_iteration() {
    let source = "let mode = 0;\nlet count = 0;\nloop {\n    if (mode == 0) {\n        fill_hsv(0, 255, 255);\n        mode = 1;\n    } else {\n        fill_hsv(128, 255, 255);\n        mode = 0;\n    }\n    count = count + 1;\n    delay(10);\n}\n";
    let program = compile(source).unwrap();
    let mut interpreter = Interpreter::new(FakeLed::cancelling_at(35.0));
    interpreter.run(&program).unwrap();

    // Three full waits elapse; the fourth is preempted but its iteration had
    // already filled and counted.
    assert_eq!(interpreter.device().delays_completed, 3);
    assert_eq!(interpreter.device().fills.len(), 4);
    assert_eq!(interpreter.variable("count"), Some(4.0));
}

#[test]
fn builtin_arguments_arrive_in_source_order() {
    let interpreter = run_ok("fill_hsv(1, 2, 3);");
    assert_eq!(interpreter.device().fills, vec![(1.0, 2.0, 3.0)]);
}

#[test]
fn call_expressions_evaluate_to_zero() {
    assert_eq!(eval_var("let x = delay(0);", "x"), 0.0);
}

#[test]
fn function_declarations_are_inert() {
    let interpreter = run_ok("fn flash(h, v) { fill_hsv(h, 255, v); } let x = 1;");
    assert!(interpreter.device().fills.is_empty());
    assert_eq!(interpreter.variable("x"), Some(1.0));
}

#[test]
fn unknown_call_is_error() {
    assert!(matches!(runtime_error("sparkle(1);"),
                     RuntimeError::UnknownCall { .. }));
    // Declared functions cannot be called either; declarations are inert.
    assert!(matches!(runtime_error("fn pulse(ms) { delay(ms); } pulse(10);"),
                     RuntimeError::UnknownCall { .. }));
}

#[test]
fn wrong_builtin_arity_is_error() {
    assert!(matches!(runtime_error("delay();"),
                     RuntimeError::ArgumentCountMismatch { expected: 1,
                                                           found: 0,
                                                           .. }));
    assert!(matches!(runtime_error("fill_hsv(1, 2);"),
                     RuntimeError::ArgumentCountMismatch { expected: 3,
                                                           found: 2,
                                                           .. }));
}

#[test]
fn undeclared_variable_is_error() {
    assert!(matches!(runtime_error("let y = x + 1;"),
                     RuntimeError::UndeclaredVariable { .. }));
    // Assignment does not implicitly declare.
    assert!(matches!(runtime_error("x = 1;"),
                     RuntimeError::UndeclaredVariable { .. }));
}

#[test]
fn division_by_zero_is_error() {
    assert!(matches!(runtime_error("let r = 1 / 0;"),
                     RuntimeError::DivisionByZero { .. }));
    // A modulo divisor that truncates to zero is the same fault.
    assert!(matches!(runtime_error("let r = 5 % 0.4;"),
                     RuntimeError::DivisionByZero { .. }));
}

#[test]
fn second_decimal_separator_is_positioned_error() {
    let error = tokenize_all("let x = 1.2.3;").unwrap_err();
    assert_eq!(error,
               TokenizeError::SecondDecimalPoint { line:   1,
                                                   column: 12, });
}

#[test]
fn unexpected_symbol_is_positioned_error() {
    let error = tokenize_all("let hue = 0;\nlet $ = 1;").unwrap_err();
    assert_eq!(error,
               TokenizeError::UnexpectedCharacter { text:   "$".to_string(),
                                                    line:   2,
                                                    column: 5, });
}

#[test]
fn parse_errors_abort_without_recovery() {
    assert!(matches!(parse_error("let = 5;"), ParseError::ExpectedToken { .. }));
    assert!(matches!(parse_error("if (1 { delay(1); }"),
                     ParseError::ExpectedToken { .. }));
    assert!(matches!(parse_error("let x = ;"), ParseError::UnexpectedToken { .. }));
    assert!(matches!(parse_error("1 + 2"), ParseError::UnexpectedEndOfInput { .. }));
    assert!(matches!(parse_error("loop { delay(1);"),
                     ParseError::UnexpectedEndOfInput { .. }));
}

#[test]
fn syntax_trees_render_readably() {
    let program = compile("loop { fill_hsv(0, 255, 255); }").unwrap();
    let tree = program.to_string();

    assert!(tree.starts_with("Program: ("));
    assert!(tree.contains("Loop:"));
    assert!(tree.contains("Call (fill_hsv)"));
    assert!(tree.contains("Number: 255"));
}

#[test]
fn example_script_works() {
    let script = fs::read_to_string("tests/example.led").expect("missing file");
    let interpreter = run_ok(&script);
    assert!(!interpreter.device().fills.is_empty());
}

#[test]
fn demo_scripts_run_under_cancellation() {
    let mut count = 0;

    for entry in WalkDir::new("demos").into_iter()
                                      .filter_map(Result::ok)
                                      .filter(|e| {
                                          e.path().extension().is_some_and(|ext| ext == "led")
                                      })
    {
        count += 1;
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        let program =
            compile(&source).unwrap_or_else(|e| panic!("Demo {path:?} failed to compile: {e}"));
        let mut interpreter = Interpreter::new(FakeLed::cancelling_at(200.0));
        if let Err(e) = interpreter.run(&program) {
            panic!("Demo {path:?} failed: {e}");
        }

        assert!(!interpreter.device().fills.is_empty(),
                "Demo {path:?} never filled the strip");
    }

    assert!(count > 0, "No demo scripts found in demos/");
}
