use crate::evaluator::Evaluator;
use crate::runner::interpret_with;
use std::io::{self, Write};

/// Interactive prompt; bindings persist between lines.
pub fn start() {
    println!("Spartie Interpreter v{}", env!("CARGO_PKG_VERSION"));
    println!("Type 'exit' or press Ctrl+D to quit");
    println!();

    let mut evaluator = Evaluator::new();

    loop {
        print!("> ");
        if let Err(error) = io::stdout().flush() {
            tracing::warn!(%error, "failed to flush prompt");
        }

        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) => {
                // EOF (Ctrl+D or piped input ended)
                println!();
                break;
            }
            Ok(_) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if line == "exit" || line == "quit" {
                    println!("Goodbye!");
                    break;
                }

                // A failed line leaves earlier bindings intact.
                match interpret_with(line, &mut evaluator) {
                    Ok(values) => {
                        for value in values {
                            println!("{}", value);
                        }
                    }
                    Err(error) => error.report(line, None),
                }
            }
            Err(error) => {
                eprintln!("Error reading input: {}", error);
                break;
            }
        }
    }
}
