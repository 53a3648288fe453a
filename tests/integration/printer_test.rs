use anyhow::Result;
use eliql::ast::*;
use eliql::{parse_query, AstPrinter, StreamCollector, Visitor};

#[path = "../common/mod.rs"]
mod common;
use common::render;

#[test]
fn test_render_is_deterministic() -> Result<()> {
    let query = "SELECT \"a\".\"x\", COUNT(\"a\".\"y\") FROM \"a\" \
                 INNER JOIN \"b\" ON \"a\".\"x\" = \"b\".\"x\" AND \"a\".\"y\" = \"b\".\"y\" \
                 WHERE \"a\".\"x\" <= (\"b\".\"z\" + 3) OR \"a\".\"y\" = 'q' \
                 ORDER BY \"a\".\"x\" DESC";
    let expr = parse_query(query)?;
    let mut printer = AstPrinter::new();

    let first = printer.print(&expr);
    for _ in 0..5 {
        assert_eq!(printer.print(&expr), first);
    }
    assert_eq!(render(query)?, first);
    assert_eq!(
        first,
        "(select (columns (column a.x) (column (count a.y))) (from a) \
         (inner-join b (= a.x b.x) (= a.y b.y)) \
         (where (<= a.x (+ b.z 3)) (or (= a.y 'q'))) (order-by (desc a.x)))"
    );
    Ok(())
}

/// Counts comparisons, exercising the visitor contract from outside the crate
struct ComparisonCounter;

impl Visitor for ComparisonCounter {
    type Output = usize;

    fn visit_union(&mut self, expr: &UnionExpression) -> usize {
        expr.selects().iter().map(|s| s.accept(self)).sum()
    }
    fn visit_union_select(&mut self, expr: &UnionSelectExpression) -> usize {
        expr.select().accept(self)
    }
    fn visit_select(&mut self, expr: &SelectExpression) -> usize {
        expr.where_clause().map_or(0, |w| w.accept(self))
    }
    fn visit_column(&mut self, _: &ColumnExpression) -> usize {
        0
    }
    fn visit_join(&mut self, _: &JoinExpression) -> usize {
        0
    }
    fn visit_join_condition(&mut self, _: &JoinCondition) -> usize {
        0
    }
    fn visit_where(&mut self, expr: &WhereExpression) -> usize {
        expr.comparisons().iter().map(|c| c.accept(self)).sum()
    }
    fn visit_comparison(&mut self, _: &ComparisonExpression) -> usize {
        1
    }
    fn visit_group_by(&mut self, _: &GroupByExpression) -> usize {
        0
    }
    fn visit_order_by(&mut self, _: &OrderByExpression) -> usize {
        0
    }
    fn visit_column_order(&mut self, _: &ColumnOrderExpression) -> usize {
        0
    }
    fn visit_arithmetic(&mut self, _: &ArithmeticExpression) -> usize {
        0
    }
    fn visit_primary(&mut self, _: &PrimaryExpression) -> usize {
        0
    }
}

#[test]
fn test_custom_visitor() -> Result<()> {
    let expr = parse_query(
        "SELECT \"a\".\"x\" FROM \"a\" WHERE \"a\".\"x\" = 1 AND \"a\".\"y\" = 2 \
         UNION ALL SELECT \"b\".\"x\" FROM \"b\" WHERE \"b\".\"x\" > 0",
    )?;
    assert_eq!(expr.accept(&mut ComparisonCounter), 3);
    assert_eq!(StreamCollector::collect(&expr), vec!["a", "b"]);
    Ok(())
}
