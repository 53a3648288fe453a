// EliQL Abstract Syntax Tree (AST) Implementation
//
// This module defines the AST nodes for parsed EliQL queries and the visitor
// contract consumers implement to render, compile or run them.
//
// Nodes are built once by the parser and expose no mutation afterwards.

use super::token::{Token, TokenKind};

/// One method per node kind. Adding a consumer means adding an implementation
/// of this trait, never touching the nodes.
pub trait Visitor {
    type Output;

    fn visit_union(&mut self, expr: &UnionExpression) -> Self::Output;
    fn visit_union_select(&mut self, expr: &UnionSelectExpression) -> Self::Output;
    fn visit_select(&mut self, expr: &SelectExpression) -> Self::Output;
    fn visit_column(&mut self, expr: &ColumnExpression) -> Self::Output;
    fn visit_join(&mut self, expr: &JoinExpression) -> Self::Output;
    fn visit_join_condition(&mut self, expr: &JoinCondition) -> Self::Output;
    fn visit_where(&mut self, expr: &WhereExpression) -> Self::Output;
    fn visit_comparison(&mut self, expr: &ComparisonExpression) -> Self::Output;
    fn visit_group_by(&mut self, expr: &GroupByExpression) -> Self::Output;
    fn visit_order_by(&mut self, expr: &OrderByExpression) -> Self::Output;
    fn visit_column_order(&mut self, expr: &ColumnOrderExpression) -> Self::Output;
    fn visit_arithmetic(&mut self, expr: &ArithmeticExpression) -> Self::Output;
    fn visit_primary(&mut self, expr: &PrimaryExpression) -> Self::Output;
}

/// Any EliQL expression node. A parsed query root is always `Union` or `Select`.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Union(UnionExpression),
    UnionSelect(UnionSelectExpression),
    Select(SelectExpression),
    Column(ColumnExpression),
    Join(JoinExpression),
    JoinCondition(JoinCondition),
    Where(WhereExpression),
    Comparison(ComparisonExpression),
    GroupBy(GroupByExpression),
    OrderBy(OrderByExpression),
    ColumnOrder(ColumnOrderExpression),
    Arithmetic(ArithmeticExpression),
    Primary(PrimaryExpression),
}

impl Expression {
    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        match self {
            Expression::Union(expr) => expr.accept(visitor),
            Expression::UnionSelect(expr) => expr.accept(visitor),
            Expression::Select(expr) => expr.accept(visitor),
            Expression::Column(expr) => expr.accept(visitor),
            Expression::Join(expr) => expr.accept(visitor),
            Expression::JoinCondition(expr) => expr.accept(visitor),
            Expression::Where(expr) => expr.accept(visitor),
            Expression::Comparison(expr) => expr.accept(visitor),
            Expression::GroupBy(expr) => expr.accept(visitor),
            Expression::OrderBy(expr) => expr.accept(visitor),
            Expression::ColumnOrder(expr) => expr.accept(visitor),
            Expression::Arithmetic(expr) => expr.accept(visitor),
            Expression::Primary(expr) => expr.accept(visitor),
        }
    }
}

/// Right side of a comparison, or the left side of an arithmetic step
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Primary(PrimaryExpression),
    Arithmetic(Box<ArithmeticExpression>),
}

impl Operand {
    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        match self {
            Operand::Primary(expr) => expr.accept(visitor),
            Operand::Arithmetic(expr) => expr.accept(visitor),
        }
    }
}

/// `select UNION [ALL] select ...`
#[derive(Debug, Clone, PartialEq)]
pub struct UnionExpression {
    selects: Vec<UnionSelectExpression>,
}

impl UnionExpression {
    pub fn new(selects: Vec<UnionSelectExpression>) -> Self {
        Self { selects }
    }

    pub fn selects(&self) -> &[UnionSelectExpression] {
        &self.selects
    }

    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_union(self)
    }
}

/// One branch of a union. `all` is the `ALL` token that preceded it, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct UnionSelectExpression {
    all: Option<Token>,
    select: SelectExpression,
}

impl UnionSelectExpression {
    pub fn new(all: Option<Token>, select: SelectExpression) -> Self {
        Self { all, select }
    }

    pub fn all(&self) -> Option<&Token> {
        self.all.as_ref()
    }

    pub fn is_all(&self) -> bool {
        self.all.is_some()
    }

    pub fn select(&self) -> &SelectExpression {
        &self.select
    }

    pub fn into_select(self) -> SelectExpression {
        self.select
    }

    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_union_select(self)
    }
}

/// SELECT expression representation
#[derive(Debug, Clone, PartialEq)]
pub struct SelectExpression {
    columns: Vec<ColumnExpression>,
    table: Token,
    joins: Vec<JoinExpression>,
    where_clause: Option<WhereExpression>,
    group_by: Option<GroupByExpression>,
    order_by: Option<OrderByExpression>,
}

impl SelectExpression {
    pub fn new(
        columns: Vec<ColumnExpression>,
        table: Token,
        joins: Vec<JoinExpression>,
        where_clause: Option<WhereExpression>,
        group_by: Option<GroupByExpression>,
        order_by: Option<OrderByExpression>,
    ) -> Self {
        Self {
            columns,
            table,
            joins,
            where_clause,
            group_by,
            order_by,
        }
    }

    pub fn columns(&self) -> &[ColumnExpression] {
        &self.columns
    }

    /// The `FROM` stream
    pub fn table(&self) -> &Token {
        &self.table
    }

    pub fn joins(&self) -> &[JoinExpression] {
        &self.joins
    }

    pub fn where_clause(&self) -> Option<&WhereExpression> {
        self.where_clause.as_ref()
    }

    pub fn group_by(&self) -> Option<&GroupByExpression> {
        self.group_by.as_ref()
    }

    pub fn order_by(&self) -> Option<&OrderByExpression> {
        self.order_by.as_ref()
    }

    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_select(self)
    }
}

/// What a selected column is computed from
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnSource {
    Column(Token),
    Arithmetic(ArithmeticExpression),
    Function(Token),
}

/// Column in a SELECT expression, with optional `AS "alias"`
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnExpression {
    source: ColumnSource,
    alias: Option<Token>,
}

impl ColumnExpression {
    pub fn new(source: ColumnSource, alias: Option<Token>) -> Self {
        Self { source, alias }
    }

    pub fn source(&self) -> &ColumnSource {
        &self.source
    }

    pub fn column(&self) -> Option<&Token> {
        match &self.source {
            ColumnSource::Column(token) => Some(token),
            _ => None,
        }
    }

    pub fn arithmetic(&self) -> Option<&ArithmeticExpression> {
        match &self.source {
            ColumnSource::Arithmetic(expr) => Some(expr),
            _ => None,
        }
    }

    pub fn function(&self) -> Option<&Token> {
        match &self.source {
            ColumnSource::Function(token) => Some(token),
            _ => None,
        }
    }

    pub fn alias(&self) -> Option<&Token> {
        self.alias.as_ref()
    }

    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_column(self)
    }
}

/// Join flavours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    Full,
}

/// `[INNER|LEFT|RIGHT|FULL] JOIN "table" ON cond [AND cond]*`
#[derive(Debug, Clone, PartialEq)]
pub struct JoinExpression {
    join_kind: Token,
    table: Token,
    conditions: Vec<JoinCondition>,
}

impl JoinExpression {
    /// `join_kind` is the INNER/LEFT/RIGHT/FULL keyword, or the JOIN keyword
    /// itself for a bare join
    pub fn new(join_kind: Token, table: Token, conditions: Vec<JoinCondition>) -> Self {
        Self {
            join_kind,
            table,
            conditions,
        }
    }

    pub fn join_kind(&self) -> &Token {
        &self.join_kind
    }

    pub fn kind(&self) -> JoinKind {
        match self.join_kind.kind {
            TokenKind::Left => JoinKind::Left,
            TokenKind::Right => JoinKind::Right,
            TokenKind::Full => JoinKind::Full,
            _ => JoinKind::Inner,
        }
    }

    pub fn table(&self) -> &Token {
        &self.table
    }

    pub fn conditions(&self) -> &[JoinCondition] {
        &self.conditions
    }

    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_join(self)
    }
}

/// `"a"."x" = "b"."y"`
#[derive(Debug, Clone, PartialEq)]
pub struct JoinCondition {
    left: Token,
    right: Token,
}

impl JoinCondition {
    pub fn new(left: Token, right: Token) -> Self {
        Self { left, right }
    }

    pub fn left(&self) -> &Token {
        &self.left
    }

    pub fn right(&self) -> &Token {
        &self.right
    }

    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_join_condition(self)
    }
}

/// Flat chain of comparisons. AND and OR share one level; consumers fold
/// the chain left to right.
#[derive(Debug, Clone, PartialEq)]
pub struct WhereExpression {
    comparisons: Vec<ComparisonExpression>,
}

impl WhereExpression {
    pub fn new(comparisons: Vec<ComparisonExpression>) -> Self {
        Self { comparisons }
    }

    pub fn comparisons(&self) -> &[ComparisonExpression] {
        &self.comparisons
    }

    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_where(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonExpression {
    logical_operator: Option<Token>,
    negated: Option<Token>,
    left: Token,
    comparator: Token,
    right: Operand,
}

impl ComparisonExpression {
    pub fn new(
        logical_operator: Option<Token>,
        negated: Option<Token>,
        left: Token,
        comparator: Token,
        right: Operand,
    ) -> Self {
        Self {
            logical_operator,
            negated,
            left,
            comparator,
            right,
        }
    }

    /// AND/OR joining this comparison to the previous one; `None` for the first
    pub fn logical_operator(&self) -> Option<&Token> {
        self.logical_operator.as_ref()
    }

    pub fn negated(&self) -> Option<&Token> {
        self.negated.as_ref()
    }

    pub fn is_negated(&self) -> bool {
        self.negated.is_some()
    }

    pub fn left(&self) -> &Token {
        &self.left
    }

    pub fn comparator(&self) -> &Token {
        &self.comparator
    }

    pub fn right(&self) -> &Operand {
        &self.right
    }

    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_comparison(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupByExpression {
    columns: Vec<Token>,
}

impl GroupByExpression {
    pub fn new(columns: Vec<Token>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[Token] {
        &self.columns
    }

    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_group_by(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderByExpression {
    column_orders: Vec<ColumnOrderExpression>,
}

impl OrderByExpression {
    pub fn new(column_orders: Vec<ColumnOrderExpression>) -> Self {
        Self { column_orders }
    }

    pub fn column_orders(&self) -> &[ColumnOrderExpression] {
        &self.column_orders
    }

    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_order_by(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnOrderExpression {
    column: Token,
    order: Token,
}

impl ColumnOrderExpression {
    pub fn new(column: Token, order: Token) -> Self {
        Self { column, order }
    }

    pub fn column(&self) -> &Token {
        &self.column
    }

    /// ASC or DESC
    pub fn order(&self) -> &Token {
        &self.order
    }

    pub fn is_descending(&self) -> bool {
        self.order.kind == TokenKind::Desc
    }

    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_column_order(self)
    }
}

/// Left-associative arithmetic: `a + b - c` is `((a + b) - c)`, the earlier
/// step sitting in `left`. A parenthesised lone operand has no operator.
#[derive(Debug, Clone, PartialEq)]
pub struct ArithmeticExpression {
    left: Operand,
    operator: Option<Token>,
    right: Option<PrimaryExpression>,
}

impl ArithmeticExpression {
    pub fn new(left: Operand, operator: Option<Token>, right: Option<PrimaryExpression>) -> Self {
        Self {
            left,
            operator,
            right,
        }
    }

    pub fn left(&self) -> &Operand {
        &self.left
    }

    pub fn operator(&self) -> Option<&Token> {
        self.operator.as_ref()
    }

    pub fn right(&self) -> Option<&PrimaryExpression> {
        self.right.as_ref()
    }

    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_arithmetic(self)
    }
}

/// Column, number or string terminal
#[derive(Debug, Clone, PartialEq)]
pub struct PrimaryExpression {
    token: Token,
}

impl PrimaryExpression {
    pub fn new(token: Token) -> Self {
        Self { token }
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_primary(self)
    }
}
