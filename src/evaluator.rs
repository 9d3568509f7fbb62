use crate::ast::{Expr, Program, Stmt};
use crate::environment::{Environment, ScopeId};
use crate::error::{SpartieError, SpartieResult};
use crate::scanner::{Token, TokenType};
use crate::value::Value;

pub struct Evaluator {
    environment: Environment,
    scope: ScopeId,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    pub fn new() -> Self {
        let environment = Environment::new();
        let scope = environment.global();
        Self { environment, scope }
    }

    /// Runs every statement and returns the values of the expression
    /// statements other than bare assignments, in order. Nothing is returned
    /// if any statement fails.
    pub fn evaluate_program(&mut self, program: &Program) -> SpartieResult<Vec<Value>> {
        let mut values = Vec::new();
        for statement in &program.statements {
            self.execute_statement(statement, &mut values)?;
        }
        Ok(values)
    }

    fn execute_statement(&mut self, stmt: &Stmt, values: &mut Vec<Value>) -> SpartieResult<()> {
        match stmt {
            Stmt::Expression { expr, .. } => {
                let value = self.evaluate(expr)?;
                // Bare assignments are evaluated for their effect only.
                if !matches!(expr, Expr::Assign { .. }) {
                    values.push(value);
                }
            }
            Stmt::Var {
                name, initializer, ..
            } => {
                let value = match initializer {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Null,
                };
                self.environment.define(self.scope, &name.lexeme, value)?;
            }
            Stmt::Block { statements, .. } => {
                self.execute_block(statements, values)?;
            }
        }
        Ok(())
    }

    fn execute_block(&mut self, statements: &[Stmt], values: &mut Vec<Value>) -> SpartieResult<()> {
        let previous = self.scope;
        self.scope = self.environment.push_scope(previous);

        let result = statements
            .iter()
            .try_for_each(|statement| self.execute_statement(statement, values));

        self.environment.pop_scope(self.scope);
        self.scope = previous;
        result
    }

    pub fn evaluate(&mut self, expr: &Expr) -> SpartieResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(value.clone()),
            Expr::Grouping { expr, .. } => self.evaluate(expr),
            Expr::Unary {
                operator, right, ..
            } => {
                let right = self.evaluate(right)?;
                evaluate_unary(operator, right)
            }
            Expr::Binary {
                left,
                operator,
                right,
                ..
            } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                evaluate_binary(operator, left, right)
            }
            Expr::Variable { name } => match self.environment.get(self.scope, &name.lexeme) {
                Some(value) => Ok(value.clone()),
                None => {
                    tracing::debug!(name = %name.lexeme, line = name.line, "unresolved variable reads as null");
                    Ok(Value::Null)
                }
            },
            Expr::Assign { name, value, .. } => {
                let value = self.evaluate(value)?;
                self.environment.assign(self.scope, name, value.clone())?;
                Ok(value)
            }
        }
    }
}

/// Evaluates `expr` against `scope` of an existing environment.
pub fn evaluate(expr: &Expr, environment: &mut Environment, scope: ScopeId) -> SpartieResult<Value> {
    let mut evaluator = Evaluator {
        environment: std::mem::take(environment),
        scope,
    };
    let result = evaluator.evaluate(expr);
    *environment = evaluator.environment;
    result
}

fn evaluate_unary(operator: &Token, right: Value) -> SpartieResult<Value> {
    match operator.token_type {
        TokenType::Not => Ok(Value::Bool(!right.is_truthy())),
        TokenType::Subtract => {
            let n = number_operand(operator, &right)?;
            Ok(Value::Number(-n))
        }
        _ => Err(invalid_type(operator, vec![right])),
    }
}

fn evaluate_binary(operator: &Token, left: Value, right: Value) -> SpartieResult<Value> {
    match operator.token_type {
        TokenType::Add => add(operator, left, right),
        TokenType::Equivalent => Ok(Value::Bool(left.is_equivalent(&right))),
        TokenType::NotEqual => Ok(Value::Bool(!left.is_equivalent(&right))),
        // Both sides were already evaluated: `|` never short-circuits.
        TokenType::Or => Ok(Value::Bool(left.is_truthy() || right.is_truthy())),
        _ => {
            let (a, b) = match (left.as_number(), right.as_number()) {
                (Some(a), Some(b)) => (a, b),
                _ => return Err(invalid_type(operator, vec![left, right])),
            };

            let result = match operator.token_type {
                TokenType::Subtract => Value::Number(a - b),
                TokenType::Multiply => Value::Number(a * b),
                TokenType::Divide => Value::Number(a / b),
                TokenType::GreaterThan => Value::Bool(a > b),
                TokenType::GreaterEqual => Value::Bool(a >= b),
                TokenType::LessThan => Value::Bool(a < b),
                TokenType::LessEqual => Value::Bool(a <= b),
                _ => return Err(invalid_type(operator, vec![left, right])),
            };
            Ok(result)
        }
    }
}

fn add(operator: &Token, left: Value, right: Value) -> SpartieResult<Value> {
    if left.is_string() || right.is_string() {
        return Ok(Value::String(format!("{}{}", left, right)));
    }

    match (&left, &right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
        _ => Err(invalid_type(operator, vec![left, right])),
    }
}

fn number_operand(operator: &Token, operand: &Value) -> SpartieResult<f64> {
    operand
        .as_number()
        .ok_or_else(|| invalid_type(operator, vec![operand.clone()]))
}

fn invalid_type(operator: &Token, operands: Vec<Value>) -> SpartieError {
    SpartieError::InvalidType {
        line: operator.line,
        span: operator.span,
        operator: operator.lexeme.clone(),
        operands,
    }
}
