use crate::error::SpartieResult;
use crate::evaluator::Evaluator;
use crate::parser::Parser;
use crate::scanner::{scan, Token};
use crate::value::Value;

/// Scans, parses and evaluates `source` with a fresh evaluator.
pub fn interpret(source: &str) -> SpartieResult<Vec<Value>> {
    interpret_with(source, &mut Evaluator::new())
}

/// Like [`interpret`] but keeps the bindings of `evaluator` between calls.
pub fn interpret_with(source: &str, evaluator: &mut Evaluator) -> SpartieResult<Vec<Value>> {
    let tokens = scan(source)?;
    let program = Parser::new(tokens).parse()?;
    tracing::debug!(statements = program.statements.len(), "parsed program");
    evaluator.evaluate_program(&program)
}

/// Runs a script and prints the value of each expression statement.
/// Returns `false` after reporting a fatal error.
pub fn run(source: &str, filename: Option<&str>) -> bool {
    match interpret(source) {
        Ok(values) => {
            for value in values {
                println!("{}", value);
            }
            true
        }
        Err(error) => {
            error.report(source, filename);
            false
        }
    }
}

/// Prints one token per line: line number, kind, lexeme and decoded literal.
pub fn dump_tokens(source: &str, filename: Option<&str>) -> bool {
    match scan(source) {
        Ok(tokens) => {
            for token in &tokens {
                println!("{}", describe(token));
            }
            true
        }
        Err(error) => {
            error.report(source, filename);
            false
        }
    }
}

fn describe(token: &Token) -> String {
    match &token.literal {
        Some(literal) => format!(
            "{:>4} {:?} {} ({})",
            token.line, token.token_type, token.lexeme, literal
        ),
        None => format!("{:>4} {:?} {}", token.line, token.token_type, token.lexeme),
    }
}
