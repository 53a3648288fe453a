// AST Printer
//
// Renders a tree as parenthesised, Lisp-style text. Used to check the shape
// the parser produced.

use std::fmt;

use super::ast::*;
use super::token::{Literal, Token, TokenKind};

/// Reference visitor rendering every node kind
#[derive(Debug, Default)]
pub struct AstPrinter;

impl AstPrinter {
    pub fn new() -> Self {
        AstPrinter
    }

    pub fn print(&mut self, expr: &Expression) -> String {
        expr.accept(self)
    }

    fn parenthesize(&self, name: &str, parts: impl IntoIterator<Item = String>) -> String {
        let mut out = String::from("(");
        out.push_str(name);
        for part in parts {
            out.push(' ');
            out.push_str(&part);
        }
        out.push(')');
        out
    }
}

/// Essential value of a token: `table.column`, a stream name, `'text'`,
/// a number, or a call rendered as `(name args...)`
pub fn render_token(token: &Token) -> String {
    match &token.literal {
        Some(Literal::Column { table, column }) => format!("{}.{}", table, column),
        Some(Literal::String(text)) if token.kind == TokenKind::String => format!("'{}'", text),
        Some(Literal::String(name)) => name.clone(),
        Some(Literal::Number(value)) => value.to_string(),
        Some(Literal::Function { kind, parameters }) => {
            let mut out = format!("({}", kind.to_string().to_lowercase());
            for param in parameters.iter().filter(|p| p.kind != TokenKind::Comma) {
                out.push(' ');
                out.push_str(&render_token(param));
            }
            out.push(')');
            out
        }
        None => token.lexeme.clone(),
    }
}

impl Visitor for AstPrinter {
    type Output = String;

    fn visit_union(&mut self, expr: &UnionExpression) -> String {
        let parts: Vec<String> = expr.selects().iter().map(|s| s.accept(self)).collect();
        self.parenthesize("union", parts)
    }

    fn visit_union_select(&mut self, expr: &UnionSelectExpression) -> String {
        let select = expr.select().accept(self);
        if expr.is_all() {
            self.parenthesize("branch all", [select])
        } else {
            self.parenthesize("branch", [select])
        }
    }

    fn visit_select(&mut self, expr: &SelectExpression) -> String {
        let mut parts = Vec::new();

        let columns: Vec<String> = expr.columns().iter().map(|c| c.accept(self)).collect();
        parts.push(self.parenthesize("columns", columns));
        parts.push(self.parenthesize("from", [render_token(expr.table())]));

        for join in expr.joins() {
            parts.push(join.accept(self));
        }
        if let Some(where_clause) = expr.where_clause() {
            parts.push(where_clause.accept(self));
        }
        if let Some(group_by) = expr.group_by() {
            parts.push(group_by.accept(self));
        }
        if let Some(order_by) = expr.order_by() {
            parts.push(order_by.accept(self));
        }

        self.parenthesize("select", parts)
    }

    fn visit_column(&mut self, expr: &ColumnExpression) -> String {
        let mut parts = vec![match expr.source() {
            ColumnSource::Column(token) | ColumnSource::Function(token) => render_token(token),
            ColumnSource::Arithmetic(arithmetic) => arithmetic.accept(self),
        }];
        if let Some(alias) = expr.alias() {
            parts.push("as".to_string());
            parts.push(render_token(alias));
        }
        self.parenthesize("column", parts)
    }

    fn visit_join(&mut self, expr: &JoinExpression) -> String {
        let name = match expr.kind() {
            JoinKind::Inner => "inner-join",
            JoinKind::Left => "left-join",
            JoinKind::Right => "right-join",
            JoinKind::Full => "full-join",
        };
        let mut parts = vec![render_token(expr.table())];
        parts.extend(expr.conditions().iter().map(|c| c.accept(self)));
        self.parenthesize(name, parts)
    }

    fn visit_join_condition(&mut self, expr: &JoinCondition) -> String {
        self.parenthesize("=", [render_token(expr.left()), render_token(expr.right())])
    }

    fn visit_where(&mut self, expr: &WhereExpression) -> String {
        let parts: Vec<String> = expr.comparisons().iter().map(|c| c.accept(self)).collect();
        self.parenthesize("where", parts)
    }

    fn visit_comparison(&mut self, expr: &ComparisonExpression) -> String {
        let right = expr.right().accept(self);
        let mut out = self.parenthesize(&expr.comparator().lexeme, [render_token(expr.left()), right]);
        if expr.is_negated() {
            out = self.parenthesize("not", [out]);
        }
        if let Some(op) = expr.logical_operator() {
            out = self.parenthesize(&op.kind.to_string().to_lowercase(), [out]);
        }
        out
    }

    fn visit_group_by(&mut self, expr: &GroupByExpression) -> String {
        let parts: Vec<String> = expr.columns().iter().map(render_token).collect();
        self.parenthesize("group-by", parts)
    }

    fn visit_order_by(&mut self, expr: &OrderByExpression) -> String {
        let parts: Vec<String> = expr.column_orders().iter().map(|o| o.accept(self)).collect();
        self.parenthesize("order-by", parts)
    }

    fn visit_column_order(&mut self, expr: &ColumnOrderExpression) -> String {
        let direction = expr.order().kind.to_string().to_lowercase();
        self.parenthesize(&direction, [render_token(expr.column())])
    }

    fn visit_arithmetic(&mut self, expr: &ArithmeticExpression) -> String {
        let left = expr.left().accept(self);
        match (expr.operator(), expr.right()) {
            (Some(op), Some(right)) => {
                let right = right.accept(self);
                self.parenthesize(&op.lexeme, [left, right])
            }
            _ => self.parenthesize("group", [left]),
        }
    }

    fn visit_primary(&mut self, expr: &PrimaryExpression) -> String {
        render_token(expr.token())
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&AstPrinter::new().print(self))
    }
}
