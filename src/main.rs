/*
 * ============================================================================
 * XEVAL - Expression Evaluator
 * ============================================================================
 *
 * CLI Front-End
 * -------------
 * Thin wrapper over the library: parse argv into
 * {expression, values, debug level, port} and call into the evaluator.
 *
 *   xeval '(x+5)/y' x=5 y=2        evaluate once with explicit values
 *   xeval 'x*2'                    read CSV values from stdin, line by line
 *   xeval serve -p 8080 -d         start the HTTP server
 *
 * --------------------------------------------------------------------------
 * Author:   Sam Wilcox
 * Email:    sam@pawx-lang.com
 * Website:  https://www.pawx-lang.com
 * Github:   https://github.com/samwilcox/xeval
 *
 * License:
 * This file is part of the XEVAL expression evaluator project.
 *
 * XEVAL is dual-licensed under the terms of:
 *   - The MIT License
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 * Full license text available at:
 *    https://license.pawx-lang.com
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ============================================================================
 */

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{ArgAction, Parser, Subcommand};
use tracing::debug;

use xeval::csv::CsvBindings;
use xeval::diagnostics::DiagnosticPrinter;
use xeval::server;
use xeval::{Binding, Config, EvalError, Expression, Value};

#[derive(Parser, Debug)]
#[command(
    name = "xeval",
    version,
    about = "Evaluate mathematical expressions from the command line or over HTTP"
)]
struct Cli {
    /// Debug mode (add twice for verbose debug)
    #[arg(short = 'd', long = "debug", action = ArgAction::Count, global = true)]
    debug: u8,

    #[command(subcommand)]
    cmd: Option<Command>,

    /// Expression to evaluate (for example "x+5")
    #[arg(value_name = "EXPRESSION")]
    expression: Option<String>,

    /// Values to use, in format name=value (eg. x=2)
    #[arg(value_name = "VALUES")]
    values: Vec<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the server
    Serve {
        /// Port to serve on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Evaluate the expression supplied through CLI
    Eval {
        /// Expression to evaluate (for example "x+5")
        expression: String,

        /// Values to use, in format name=value (eg. x=2)
        values: Vec<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match cli.cmd {
        Some(Command::Serve { port }) => run_serve(port),
        Some(Command::Eval { expression, values }) => run_eval(&expression, &values),
        None => match cli.expression {
            Some(expression) => run_eval(&expression, &cli.values),
            None => {
                println!("No expression given. Try calling with --help for usage instructions");
                ExitCode::SUCCESS
            }
        },
    }
}

fn init_tracing(debug: u8) {
    let level = match debug {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    // Diagnostics and debug traces go to stderr; stdout carries results only.
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run_serve(port: Option<u16>) -> ExitCode {
    let port = port
        .or_else(|| std::env::var("PORT").ok().and_then(|p| p.parse().ok()))
        .unwrap_or(server::DEFAULT_PORT);

    match server::serve(port, Arc::new(Config::default())) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_eval(expression: &str, values: &[String]) -> ExitCode {
    let config = Arc::new(Config::default());

    let expr = match xeval::parse_with_config(expression, config) {
        Ok(expr) => expr,
        Err(e) => {
            DiagnosticPrinter::new("expression", expression).print(&e);
            return ExitCode::FAILURE;
        }
    };

    let binding = binding_from_pairs(values);

    // With explicit values (or no free variables at all) evaluate exactly
    // once. Otherwise values stream in from stdin as CSV lines, one
    // evaluation per line, fields assigned in the tree's variable order.
    if !binding.is_empty() || expr.variables().is_empty() {
        return match evaluate_once(&expr, &binding) {
            Ok(value) => {
                println!("{}", value.stringify());
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("error: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    let stdin = io::stdin();
    let mut failed = false;

    for item in CsvBindings::new(stdin.lock(), expr.variables()) {
        match item {
            Ok((line_number, binding)) => match evaluate_once(&expr, &binding) {
                Ok(value) => println!("{}", value.stringify()),
                Err(e) => {
                    eprintln!("line {}: error: {}", line_number, e);
                    failed = true;
                }
            },
            Err(e) => {
                eprintln!("stdin: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn evaluate_once(expr: &Expression, binding: &Binding) -> Result<Value, EvalError> {
    debug!(
        canonical = %expr.to_canonical_string(),
        binding = ?binding,
        "evaluating"
    );

    expr.evaluate(binding)
}

/// Converts `name=value` argument pairs into a binding: split on the first
/// `=`, trim both sides, coerce the value number → bool → string.
fn binding_from_pairs(pairs: &[String]) -> Binding {
    let mut binding = Binding::new();

    for pair in pairs {
        match pair.split_once('=') {
            Some((name, value)) => {
                binding.insert(name.trim().to_string(), Value::from_cli_literal(value));
            }
            None => {
                eprintln!("warning: ignoring malformed pair '{}' (expected name=value)", pair);
            }
        }
    }

    binding
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_split_on_first_equals_and_trim() {
        let binding = binding_from_pairs(&[
            "x=5".to_string(),
            " y = 2 ".to_string(),
            "msg=a=b".to_string(),
            "junk".to_string(),
        ]);

        assert_eq!(binding.get("x"), Some(&Value::Number(5.0)));
        assert_eq!(binding.get("y"), Some(&Value::Number(2.0)));
        assert_eq!(binding.get("msg"), Some(&Value::String("a=b".into())));
        assert_eq!(binding.len(), 3);
    }
}
