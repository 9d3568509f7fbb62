// Spartie Language Interpreter Library
//
// Scanner, parser and tree-walking evaluator for the Spartie expression
// language, with chained lexical scopes and ariadne diagnostics.

// Public modules
pub mod ast;
pub mod cli;
pub mod environment;
pub mod error;
pub mod evaluator;
pub mod parser;
pub mod repl;
pub mod runner;
pub mod scanner;
pub mod value;

// Re-export commonly used items
pub use ast::{Expr, Program, Stmt};
pub use environment::{Environment, ScopeId};
pub use error::{ErrorKind, SpartieError, SpartieResult, Span};
pub use evaluator::{evaluate, Evaluator};
pub use parser::Parser;
pub use scanner::{scan, Scanner, Token, TokenType};
pub use value::Value;

// Re-export main functions
pub use repl::start as start_repl;
pub use runner::{interpret, run};
