// Stream References
//
// Lists the streams a query reads from, so ingestion can open exactly those
// feeds before the query runs.

use super::ast::*;
use super::token::Token;

/// Collects every referenced stream name in first-seen order, without duplicates
#[derive(Debug, Default)]
pub struct StreamCollector {
    streams: Vec<String>,
}

impl StreamCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Streams referenced anywhere in `expr`
    pub fn collect(expr: &Expression) -> Vec<String> {
        let mut collector = StreamCollector::new();
        expr.accept(&mut collector);
        collector.streams
    }

    pub fn streams(&self) -> &[String] {
        &self.streams
    }

    fn note(&mut self, token: &Token) {
        if let Some(name) = token.table_name() {
            if !self.streams.iter().any(|s| s == name) {
                self.streams.push(name.to_string());
            }
        }
        // Function arguments are tokens too, possibly nested calls
        if let Some(parameters) = token.parameters() {
            for param in parameters {
                self.note(param);
            }
        }
    }
}

impl Visitor for StreamCollector {
    type Output = ();

    fn visit_union(&mut self, expr: &UnionExpression) {
        for select in expr.selects() {
            select.accept(self);
        }
    }

    fn visit_union_select(&mut self, expr: &UnionSelectExpression) {
        expr.select().accept(self);
    }

    fn visit_select(&mut self, expr: &SelectExpression) {
        self.note(expr.table());
        for join in expr.joins() {
            join.accept(self);
        }
        for column in expr.columns() {
            column.accept(self);
        }
        if let Some(where_clause) = expr.where_clause() {
            where_clause.accept(self);
        }
        if let Some(group_by) = expr.group_by() {
            group_by.accept(self);
        }
        if let Some(order_by) = expr.order_by() {
            order_by.accept(self);
        }
    }

    fn visit_column(&mut self, expr: &ColumnExpression) {
        // The alias names an output column, not a stream
        match expr.source() {
            ColumnSource::Column(token) | ColumnSource::Function(token) => self.note(token),
            ColumnSource::Arithmetic(arithmetic) => arithmetic.accept(self),
        }
    }

    fn visit_join(&mut self, expr: &JoinExpression) {
        self.note(expr.table());
        for condition in expr.conditions() {
            condition.accept(self);
        }
    }

    fn visit_join_condition(&mut self, expr: &JoinCondition) {
        self.note(expr.left());
        self.note(expr.right());
    }

    fn visit_where(&mut self, expr: &WhereExpression) {
        for comparison in expr.comparisons() {
            comparison.accept(self);
        }
    }

    fn visit_comparison(&mut self, expr: &ComparisonExpression) {
        self.note(expr.left());
        expr.right().accept(self);
    }

    fn visit_group_by(&mut self, expr: &GroupByExpression) {
        for column in expr.columns() {
            self.note(column);
        }
    }

    fn visit_order_by(&mut self, expr: &OrderByExpression) {
        for order in expr.column_orders() {
            order.accept(self);
        }
    }

    fn visit_column_order(&mut self, expr: &ColumnOrderExpression) {
        self.note(expr.column());
    }

    fn visit_arithmetic(&mut self, expr: &ArithmeticExpression) {
        expr.left().accept(self);
        if let Some(right) = expr.right() {
            right.accept(self);
        }
    }

    fn visit_primary(&mut self, expr: &PrimaryExpression) {
        self.note(expr.token());
    }
}
