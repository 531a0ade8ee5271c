use std::fs;

use clap::Parser;
use lumen::{
    device::ConsoleLed,
    interpreter::{evaluator::core::Interpreter, lexer::tokenize_all, parser::core::parse_program},
};
use tracing_subscriber::EnvFilter;

/// lumen is a tiny scripting language for addressable-LED effects.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells lumen to look at a file instead of a script.
    #[arg(short, long)]
    file: bool,

    /// Print the token stream and exit without running.
    #[arg(short, long)]
    tokens: bool,

    /// Print the parsed syntax tree and exit without running.
    #[arg(short, long)]
    ast: bool,

    contents: String,
}

fn main() {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::try_from_default_env()
                                                  .unwrap_or_else(|_| EnvFilter::new("info")))
                             .init();

    let args = Args::parse();

    let script = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            std::process::exit(1);
        })
    } else {
        args.contents
    };

    let tokens = match tokenize_all(&script) {
        Ok(tokens) => tokens,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        },
    };

    if args.tokens {
        for (token, span) in &tokens {
            println!("{}:{} {token}", span.line, span.column);
        }
        return;
    }

    let program = match parse_program(&mut tokens.iter().peekable()) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        },
    };

    if args.ast {
        println!("{program}");
        return;
    }

    let mut interpreter = Interpreter::new(ConsoleLed);
    if let Err(e) = interpreter.run(&program) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
