use crate::error::Span;
use crate::scanner::Token;
use crate::value::Value;

#[derive(Debug, Clone)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

#[derive(Debug, Clone)]
pub enum Stmt {
    Expression {
        expr: Expr,
        span: Span,
    },
    /// `var name = initializer;` with a null initializer when omitted.
    Var {
        name: Token,
        initializer: Option<Expr>,
        span: Span,
    },
    Block {
        statements: Vec<Stmt>,
        span: Span,
    },
}

impl Stmt {
    pub fn span(&self) -> Span {
        match self {
            Stmt::Expression { span, .. } | Stmt::Var { span, .. } | Stmt::Block { span, .. } => {
                *span
            }
        }
    }
}

/// Operators keep their source token so errors can cite its line and lexeme.
#[derive(Debug, Clone)]
pub enum Expr {
    Literal {
        value: Value,
        span: Span,
    },
    Grouping {
        expr: Box<Expr>,
        span: Span,
    },
    Unary {
        operator: Token,
        right: Box<Expr>,
        span: Span,
    },
    Binary {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
        span: Span,
    },
    Variable {
        name: Token,
    },
    Assign {
        name: Token,
        value: Box<Expr>,
        span: Span,
    },
}

impl Expr {
    pub fn literal(value: Value, span: Span) -> Self {
        Expr::Literal { value, span }
    }

    pub fn grouping(expr: Expr, span: Span) -> Self {
        Expr::Grouping {
            expr: Box::new(expr),
            span,
        }
    }

    pub fn unary(operator: Token, right: Expr) -> Self {
        let span = operator.span.to(right.span());
        Expr::Unary {
            operator,
            right: Box::new(right),
            span,
        }
    }

    pub fn binary(left: Expr, operator: Token, right: Expr) -> Self {
        let span = left.span().to(right.span());
        Expr::Binary {
            left: Box::new(left),
            operator,
            right: Box::new(right),
            span,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Expr::Literal { span, .. }
            | Expr::Grouping { span, .. }
            | Expr::Unary { span, .. }
            | Expr::Binary { span, .. }
            | Expr::Assign { span, .. } => *span,
            Expr::Variable { name } => name.span,
        }
    }
}
