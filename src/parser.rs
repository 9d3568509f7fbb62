use crate::ast::{Expr, Program, Stmt};
use crate::error::{SpartieError, SpartieResult, Span};
use crate::scanner::{Token, TokenType};
use crate::value::Value;

/// Recursive-descent parser, lowest precedence first:
/// assignment, `|`, equality, comparison, term, factor, unary, primary.
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, current: 0 }
    }

    pub fn parse(&mut self) -> SpartieResult<Program> {
        let mut statements = Vec::new();

        while !self.is_at_end() {
            statements.push(self.declaration()?);
        }

        Ok(Program { statements })
    }

    /// Parses a single expression that must span every token.
    pub fn parse_expression(&mut self) -> SpartieResult<Expr> {
        let expr = self.expression()?;
        if let Some(token) = self.peek() {
            return Err(SpartieError::parse(
                token.line,
                token.span,
                format!("Unexpected '{}' after expression", token.lexeme),
            ));
        }
        Ok(expr)
    }

    fn declaration(&mut self) -> SpartieResult<Stmt> {
        if self.match_types(&[TokenType::Var]) {
            self.var_declaration()
        } else {
            self.statement()
        }
    }

    fn var_declaration(&mut self) -> SpartieResult<Stmt> {
        let start = self.previous().span;
        let name = self
            .consume_with_help(
                TokenType::Identifier,
                "Expected variable name after 'var'",
                "Declarations look like: var x = 1;",
            )?
            .clone();

        let initializer = if self.match_types(&[TokenType::Assign]) {
            Some(self.expression()?)
        } else {
            None
        };

        self.consume(TokenType::Semicolon, "Expected ';' after variable declaration")?;

        Ok(Stmt::Var {
            name,
            initializer,
            span: start.to(self.previous().span),
        })
    }

    fn statement(&mut self) -> SpartieResult<Stmt> {
        if self.match_types(&[TokenType::LeftBrace]) {
            let start = self.previous().span;
            let statements = self.block()?;
            return Ok(Stmt::Block {
                statements,
                span: start.to(self.previous().span),
            });
        }

        if let Some(token) = self.peek() {
            if is_reserved_statement(token.token_type) {
                return Err(SpartieError::parse_with_help(
                    token.line,
                    token.span,
                    format!("'{}' is reserved but not supported", token.lexeme),
                    "Only expressions, 'var' declarations and '{ }' blocks can be evaluated.",
                ));
            }
        }

        self.expression_statement()
    }

    fn block(&mut self) -> SpartieResult<Vec<Stmt>> {
        let mut statements = Vec::new();

        while !self.check(TokenType::RightBrace) && !self.is_at_end() {
            statements.push(self.declaration()?);
        }

        self.consume_with_help(
            TokenType::RightBrace,
            "Expected '}' after block",
            "Block statements must be closed with '}' after the opening '{'.",
        )?;
        Ok(statements)
    }

    fn expression_statement(&mut self) -> SpartieResult<Stmt> {
        let expr = self.expression()?;

        // Semicolons are optional after an expression.
        self.match_types(&[TokenType::Semicolon]);

        Ok(Stmt::Expression {
            span: expr.span().to(self.previous().span),
            expr,
        })
    }

    fn expression(&mut self) -> SpartieResult<Expr> {
        self.assignment()
    }

    fn assignment(&mut self) -> SpartieResult<Expr> {
        let expr = self.or()?;

        if self.match_types(&[TokenType::Assign]) {
            let equals = self.previous().clone();
            let value = self.assignment()?;

            if let Expr::Variable { name } = expr {
                let span = name.span.to(value.span());
                return Ok(Expr::Assign {
                    name,
                    value: Box::new(value),
                    span,
                });
            }

            return Err(SpartieError::parse_with_help(
                equals.line,
                equals.span,
                "Invalid assignment target",
                "Only variables can be assigned to, e.g. 'x = 10'.",
            ));
        }

        Ok(expr)
    }

    fn or(&mut self) -> SpartieResult<Expr> {
        self.binary_level(&[TokenType::Or], Self::equality)
    }

    fn equality(&mut self) -> SpartieResult<Expr> {
        self.binary_level(&[TokenType::Equivalent, TokenType::NotEqual], Self::comparison)
    }

    fn comparison(&mut self) -> SpartieResult<Expr> {
        self.binary_level(
            &[
                TokenType::GreaterThan,
                TokenType::GreaterEqual,
                TokenType::LessThan,
                TokenType::LessEqual,
            ],
            Self::term,
        )
    }

    fn term(&mut self) -> SpartieResult<Expr> {
        self.binary_level(&[TokenType::Subtract, TokenType::Add], Self::factor)
    }

    fn factor(&mut self) -> SpartieResult<Expr> {
        self.binary_level(&[TokenType::Divide, TokenType::Multiply], Self::unary)
    }

    /// One left-associative precedence level.
    fn binary_level(
        &mut self,
        operators: &[TokenType],
        operand: fn(&mut Self) -> SpartieResult<Expr>,
    ) -> SpartieResult<Expr> {
        let mut expr = operand(self)?;

        while self.match_types(operators) {
            let operator = self.previous().clone();
            if !self.peek().is_some_and(|token| starts_expression(token.token_type)) {
                return Err(SpartieError::parse(
                    operator.line,
                    operator.span,
                    format!("Expected expression after '{}'", operator.lexeme),
                ));
            }
            let right = operand(self)?;
            expr = Expr::binary(expr, operator, right);
        }

        Ok(expr)
    }

    fn unary(&mut self) -> SpartieResult<Expr> {
        if self.match_types(&[TokenType::Not, TokenType::Subtract]) {
            let operator = self.previous().clone();
            let right = self.unary()?;
            return Ok(Expr::unary(operator, right));
        }

        self.primary()
    }

    fn primary(&mut self) -> SpartieResult<Expr> {
        let Some(token) = self.peek().cloned() else {
            return Err(SpartieError::parse_with_help(
                self.last_line(),
                self.end_span(),
                "Expected expression, found end of input",
                "Reached end of input while expecting an expression.",
            ));
        };
        self.advance();

        match token.token_type {
            TokenType::False => Ok(Expr::literal(Value::Bool(false), token.span)),
            TokenType::True => Ok(Expr::literal(Value::Bool(true), token.span)),
            TokenType::Null => Ok(Expr::literal(Value::Null, token.span)),
            TokenType::Number | TokenType::String => {
                let value = token.literal.clone().ok_or_else(|| {
                    SpartieError::parse(token.line, token.span, "Literal token without a value")
                })?;
                Ok(Expr::literal(value, token.span))
            }
            TokenType::Identifier => Ok(Expr::Variable { name: token }),
            TokenType::LeftParen => {
                if self.check(TokenType::RightParen) {
                    return Err(SpartieError::parse_with_help(
                        token.line,
                        token.span.to(self.peek().map_or(token.span, |t| t.span)),
                        "Empty parentheses are not allowed",
                        "Parentheses must contain an expression. Use 'null' for a null value: (null)",
                    ));
                }

                let expr = self.expression()?;
                let end = self
                    .consume_with_help(
                        TokenType::RightParen,
                        "Expected ')' after expression",
                        "Every opening parenthesis '(' must have a matching closing parenthesis ')'.",
                    )?
                    .span;
                Ok(Expr::grouping(expr, token.span.to(end)))
            }
            _ => {
                let help = match token.token_type {
                    TokenType::RightParen => "Found ')' without matching '('. Check for unbalanced parentheses.",
                    TokenType::RightBrace => "Found '}' without matching '{'. Check for unbalanced braces.",
                    tt if is_reserved_statement(tt) => "This keyword is reserved but not supported.",
                    _ => "Expected a literal value, variable, or parenthesized expression here.",
                };

                Err(SpartieError::parse_with_help(
                    token.line,
                    token.span,
                    format!("Expected expression, found '{}'", token.lexeme),
                    help,
                ))
            }
        }
    }

    fn match_types(&mut self, types: &[TokenType]) -> bool {
        if types.iter().any(|token_type| self.check(*token_type)) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn check(&self, token_type: TokenType) -> bool {
        self.peek().is_some_and(|token| token.token_type == token_type)
    }

    fn advance(&mut self) {
        if !self.is_at_end() {
            self.current += 1;
        }
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len()
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.current)
    }

    // Only called after at least one token has been consumed.
    fn previous(&self) -> &Token {
        &self.tokens[self.current - 1]
    }

    fn last_line(&self) -> usize {
        self.tokens.last().map_or(1, |token| token.line)
    }

    fn end_span(&self) -> Span {
        self.tokens
            .last()
            .map_or(Span::single(0), |token| Span::single(token.span.end))
    }

    fn consume(&mut self, token_type: TokenType, message: &str) -> SpartieResult<&Token> {
        if self.check(token_type) {
            self.advance();
            Ok(self.previous())
        } else {
            Err(self.error_here(message, None))
        }
    }

    fn consume_with_help(
        &mut self,
        token_type: TokenType,
        message: &str,
        help: &str,
    ) -> SpartieResult<&Token> {
        if self.check(token_type) {
            self.advance();
            Ok(self.previous())
        } else {
            Err(self.error_here(message, Some(help)))
        }
    }

    /// Points at the unexpected token, or just past the last token at end of input.
    fn error_here(&self, message: &str, help: Option<&str>) -> SpartieError {
        let (line, span) = match self.peek() {
            Some(token) => (token.line, token.span),
            None => (self.last_line(), self.end_span()),
        };

        SpartieError::Parse {
            line,
            span,
            message: message.to_string(),
            help: help.map(str::to_string),
        }
    }
}

fn starts_expression(token_type: TokenType) -> bool {
    matches!(
        token_type,
        TokenType::Number
            | TokenType::String
            | TokenType::True
            | TokenType::False
            | TokenType::Null
            | TokenType::Identifier
            | TokenType::LeftParen
            | TokenType::Not
            | TokenType::Subtract
    )
}

fn is_reserved_statement(token_type: TokenType) -> bool {
    matches!(
        token_type,
        TokenType::If
            | TokenType::Else
            | TokenType::For
            | TokenType::While
            | TokenType::Fun
            | TokenType::Return
            | TokenType::Print
    )
}

/// Parses a whole token stream into a program.
pub fn parse(tokens: Vec<Token>) -> SpartieResult<Program> {
    Parser::new(tokens).parse()
}
