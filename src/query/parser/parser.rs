// EliQL Parser Implementation
//
// This module implements a recursive descent parser that converts the
// scanner's tokens into an Abstract Syntax Tree (AST). There is one method
// per grammar production:
//
//   expression      -> selectExpr (UNION ALL? selectExpr)* ";"?
//   selectExpr      -> SELECT columnExpr ("," columnExpr)* FROM TABLE
//                      joinExpr* whereExpr? groupByExpr? orderByExpr?
//   columnExpr      -> (FUNCTION | COLUMN | "(" arithmeticExpr) ("AS" TABLE)?
//   joinExpr        -> (INNER|LEFT|RIGHT|FULL)? JOIN TABLE ON joinCond (AND joinCond)*
//   whereExpr       -> WHERE comparisonExpr ((AND|OR) comparisonExpr)*
//   groupByExpr     -> GROUP BY COLUMN ("," COLUMN)*
//   orderByExpr     -> ORDER BY columnOrderExpr ("," columnOrderExpr)*
//   arithmeticExpr  -> primaryExpr (("/"|"-"|"+"|"*") primaryExpr)* ")"
//   joinCond        -> COLUMN "=" COLUMN
//   comparisonExpr  -> NOT? COLUMN (">"|">="|"="|"<"|"<=") (primaryExpr | "(" arithmeticExpr)
//   columnOrderExpr -> COLUMN (ASC|DESC)
//   primaryExpr     -> COLUMN | NUMBER | STRING

use log::debug;

use super::ast::*;
use super::error::{LexErrors, ParseError, ParseResult, Production, QueryError};
use super::lexer::Scanner;
use super::token::{Token, TokenKind};

/// Union branches parsed before the first error, for tooling that wants a
/// best-effort tree
#[derive(Debug, Clone, PartialEq)]
pub struct PartialParse {
    pub branches: Vec<UnionSelectExpression>,
    pub error: Option<ParseError>,
}

impl PartialParse {
    /// The tree built from the complete branches, if there are any
    pub fn root(self) -> Option<Expression> {
        if self.branches.is_empty() {
            None
        } else {
            Some(build_root(self.branches))
        }
    }
}

/// Scan and parse a query in one go
pub fn parse_query(source: &str) -> Result<Expression, QueryError> {
    let mut parser = Parser::from_query(source).map_err(QueryError::Lex)?;
    Ok(parser.parse()?)
}

/// EliQL parser for constructing an AST from tokens
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
}

impl Parser {
    /// Create a parser over a scanned token sequence
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(|t| t.is(TokenKind::Eof)) {
            let line = tokens.last().map_or(1, |t| t.line);
            tokens.push(Token::eof(line));
        }

        Parser { tokens, current: 0 }
    }

    /// Scan `input` and create a parser over its tokens
    pub fn from_query(input: &str) -> Result<Self, LexErrors> {
        let tokens = Scanner::new(input).scan_tokens().into_result()?;
        Ok(Parser::new(tokens))
    }

    /// Parse the whole token sequence into a `Select` or `Union` root
    pub fn parse(&mut self) -> ParseResult<Expression> {
        let mut branches = Vec::new();
        if let Err(err) = self.expression(&mut branches) {
            debug!("parse error: {}", err);
            return Err(err);
        }
        Ok(build_root(branches))
    }

    /// Parse, keeping every union branch completed before an error
    pub fn parse_partial(&mut self) -> PartialParse {
        let mut branches = Vec::new();
        let error = self.expression(&mut branches).err();
        if let Some(err) = &error {
            debug!("parse error after {} complete branch(es): {}", branches.len(), err);
        }
        PartialParse { branches, error }
    }

    fn expression(&mut self, branches: &mut Vec<UnionSelectExpression>) -> ParseResult<()> {
        let select = self.select_expr()?;
        branches.push(UnionSelectExpression::new(None, select));

        while self.match_kind(TokenKind::Union) {
            let all = self.match_token(TokenKind::All);
            let select = self.select_expr()?;
            branches.push(UnionSelectExpression::new(all, select));
        }

        self.match_kind(TokenKind::Semicolon);
        if !self.check(TokenKind::Eof) {
            return Err(self.error(Production::Expression, "end of query"));
        }
        Ok(())
    }

    fn select_expr(&mut self) -> ParseResult<SelectExpression> {
        self.consume(TokenKind::Select, Production::SelectExpr, "SELECT")?;

        let mut columns = vec![self.column_expr()?];
        while self.match_kind(TokenKind::Comma) {
            columns.push(self.column_expr()?);
        }

        self.consume(TokenKind::From, Production::SelectExpr, "FROM")?;
        let table = self.consume(TokenKind::Table, Production::SelectExpr, "stream name after FROM")?;

        let mut joins = Vec::new();
        while self.check_any(&[
            TokenKind::Inner,
            TokenKind::Left,
            TokenKind::Right,
            TokenKind::Full,
            TokenKind::Join,
        ]) {
            joins.push(self.join_expr()?);
        }

        let where_clause = if self.match_kind(TokenKind::Where) {
            Some(self.where_expr()?)
        } else {
            None
        };

        let group_by = if self.match_kind(TokenKind::Group) {
            Some(self.group_by_expr()?)
        } else {
            None
        };

        let order_by = if self.match_kind(TokenKind::Order) {
            Some(self.order_by_expr()?)
        } else {
            None
        };

        Ok(SelectExpression::new(
            columns,
            table,
            joins,
            where_clause,
            group_by,
            order_by,
        ))
    }

    fn column_expr(&mut self) -> ParseResult<ColumnExpression> {
        let source = if self.check(TokenKind::Column) {
            ColumnSource::Column(self.advance())
        } else if self.peek().kind.is_function() {
            ColumnSource::Function(self.advance())
        } else if self.match_kind(TokenKind::LeftParen) {
            ColumnSource::Arithmetic(self.arithmetic_expr()?)
        } else {
            return Err(self.error(Production::ColumnExpr, "column, function or '('"));
        };

        let alias = if self.match_kind(TokenKind::As) {
            Some(self.consume(TokenKind::Table, Production::ColumnExpr, "quoted alias after AS")?)
        } else {
            None
        };

        Ok(ColumnExpression::new(source, alias))
    }

    fn join_expr(&mut self) -> ParseResult<JoinExpression> {
        let join_kind = if self.check_any(&[
            TokenKind::Inner,
            TokenKind::Left,
            TokenKind::Right,
            TokenKind::Full,
        ]) {
            let kind = self.advance();
            self.consume(TokenKind::Join, Production::JoinExpr, "JOIN")?;
            kind
        } else {
            self.consume(TokenKind::Join, Production::JoinExpr, "JOIN")?
        };

        let table = self.consume(TokenKind::Table, Production::JoinExpr, "stream name after JOIN")?;
        self.consume(TokenKind::On, Production::JoinExpr, "ON")?;

        let mut conditions = vec![self.join_condition()?];
        while self.match_kind(TokenKind::And) {
            conditions.push(self.join_condition()?);
        }

        Ok(JoinExpression::new(join_kind, table, conditions))
    }

    fn join_condition(&mut self) -> ParseResult<JoinCondition> {
        let left = self.consume(TokenKind::Column, Production::JoinCondition, "column")?;
        self.consume(TokenKind::Equal, Production::JoinCondition, "'='")?;
        let right = self.consume(TokenKind::Column, Production::JoinCondition, "column")?;
        Ok(JoinCondition::new(left, right))
    }

    fn where_expr(&mut self) -> ParseResult<WhereExpression> {
        if !self.check_any(&[TokenKind::Not, TokenKind::Column]) {
            return Err(self.error(Production::WhereExpr, "comparison after WHERE"));
        }

        let mut comparisons = vec![self.comparison_expr(None)?];
        while self.check_any(&[TokenKind::And, TokenKind::Or]) {
            let logical_operator = self.advance();
            comparisons.push(self.comparison_expr(Some(logical_operator))?);
        }
        Ok(WhereExpression::new(comparisons))
    }

    fn comparison_expr(&mut self, logical_operator: Option<Token>) -> ParseResult<ComparisonExpression> {
        let negated = self.match_token(TokenKind::Not);
        let left = self.consume(TokenKind::Column, Production::ComparisonExpr, "column")?;

        if !self.peek().kind.is_comparator() {
            return Err(self.error(Production::ComparisonExpr, "comparison operator"));
        }
        let comparator = self.advance();

        let right = if self.match_kind(TokenKind::LeftParen) {
            Operand::Arithmetic(Box::new(self.arithmetic_expr()?))
        } else {
            Operand::Primary(self.primary_expr()?)
        };

        Ok(ComparisonExpression::new(
            logical_operator,
            negated,
            left,
            comparator,
            right,
        ))
    }

    fn group_by_expr(&mut self) -> ParseResult<GroupByExpression> {
        self.consume(TokenKind::By, Production::GroupByExpr, "BY")?;

        let mut columns = vec![self.consume(TokenKind::Column, Production::GroupByExpr, "column")?];
        while self.match_kind(TokenKind::Comma) {
            columns.push(self.consume(TokenKind::Column, Production::GroupByExpr, "column")?);
        }
        Ok(GroupByExpression::new(columns))
    }

    fn order_by_expr(&mut self) -> ParseResult<OrderByExpression> {
        self.consume(TokenKind::By, Production::OrderByExpr, "BY")?;

        let mut column_orders = vec![self.column_order_expr()?];
        while self.match_kind(TokenKind::Comma) {
            column_orders.push(self.column_order_expr()?);
        }
        Ok(OrderByExpression::new(column_orders))
    }

    fn column_order_expr(&mut self) -> ParseResult<ColumnOrderExpression> {
        let column = self.consume(TokenKind::Column, Production::ColumnOrderExpr, "column")?;
        if !self.check_any(&[TokenKind::Asc, TokenKind::Desc]) {
            return Err(self.error(Production::ColumnOrderExpr, "ASC or DESC"));
        }
        let order = self.advance();
        Ok(ColumnOrderExpression::new(column, order))
    }

    /// Called with the opening paren already consumed; consumes the closing one
    fn arithmetic_expr(&mut self) -> ParseResult<ArithmeticExpression> {
        let mut left = Operand::Primary(self.primary_expr()?);

        while self.peek().kind.is_arithmetic_operator() {
            let operator = self.advance();
            let right = self.primary_expr()?;
            let step = ArithmeticExpression::new(left, Some(operator), Some(right));
            left = Operand::Arithmetic(Box::new(step));
        }

        self.consume(TokenKind::RightParen, Production::ArithmeticExpr, "')'")?;

        Ok(match left {
            Operand::Arithmetic(step) => *step,
            primary => ArithmeticExpression::new(primary, None, None),
        })
    }

    fn primary_expr(&mut self) -> ParseResult<PrimaryExpression> {
        if self.check_any(&[TokenKind::Column, TokenKind::Number, TokenKind::String]) {
            Ok(PrimaryExpression::new(self.advance()))
        } else {
            Err(self.error(Production::PrimaryExpr, "column, number or string"))
        }
    }

    /// Current token; the sequence always ends with `Eof`, so this never runs off the end
    fn peek(&self) -> &Token {
        &self.tokens[self.current.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !token.is(TokenKind::Eof) {
            self.current += 1;
        }
        token
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().is(kind)
    }

    fn check_any(&self, kinds: &[TokenKind]) -> bool {
        kinds.iter().any(|kind| self.check(*kind))
    }

    fn match_kind(&mut self, kind: TokenKind) -> bool {
        self.match_token(kind).is_some()
    }

    fn match_token(&mut self, kind: TokenKind) -> Option<Token> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    fn consume(&mut self, kind: TokenKind, production: Production, expected: &'static str) -> ParseResult<Token> {
        match self.match_token(kind) {
            Some(token) => Ok(token),
            None => Err(self.error(production, expected)),
        }
    }

    fn error(&self, production: Production, expected: &'static str) -> ParseError {
        let found = self.peek().clone();
        ParseError {
            line: found.line,
            production,
            expected,
            found,
        }
    }
}

fn build_root(mut branches: Vec<UnionSelectExpression>) -> Expression {
    if branches.len() == 1 {
        Expression::Select(branches.remove(0).into_select())
    } else {
        Expression::Union(UnionExpression::new(branches))
    }
}
