//! Property-based tests over small input ranges.

use proptest::prelude::*;
use vexpr::{compile, EmptyEnvironment, Value};

fn eval_number(src: &str) -> f64 {
    match compile(src).unwrap().evaluate(&EmptyEnvironment).unwrap() {
        Value::Number(n) => n,
        other => panic!("expected a number, got {other:?}"),
    }
}

proptest! {
    /// `a - b - c` is left-associative: `(a - b) - c`, not `a - (b - c)`.
    #[test]
    fn subtraction_chains_are_left_associative(a in -100i64..100, b in -100i64..100, c in -100i64..100) {
        let chained = eval_number(&format!("{a} - {b} - {c}"));
        let grouped = eval_number(&format!("({a} - {b}) - {c}"));
        prop_assert_eq!(chained, grouped);
    }

    /// `a / b * c` is left-associative: `(a / b) * c`, not `a / (b * c)`.
    #[test]
    fn division_and_multiplication_chain_left_associative(
        a in -100i64..100,
        b in 1i64..100,
        c in -100i64..100,
    ) {
        let chained = eval_number(&format!("{a} / {b} * {c}"));
        let grouped = eval_number(&format!("({a} / {b}) * {c}"));
        prop_assert_eq!(chained, grouped);
    }

    /// For a pure-arithmetic expression, replacing a sub-expression with
    /// its own evaluated constant must not change the top-level result.
    #[test]
    fn constant_folding_a_subexpression_preserves_the_result(
        a in -50i64..50,
        b in -50i64..50,
        c in -50i64..50,
    ) {
        let inner = format!("{b} + {c}");
        let whole = format!("{a} * ({inner})");
        let folded_value = eval_number(&inner);
        let folded = format!("{a} * {folded_value}");
        prop_assert_eq!(eval_number(&whole), eval_number(&folded));
    }

    /// A ternary always yields exactly its chosen branch's value, for any
    /// pair of distinct numeric literals.
    #[test]
    fn ternary_selects_the_matching_branch(cond in any::<bool>(), a in -1000i64..1000, b in -1000i64..1000) {
        let src = format!("{cond} ? {a} : {b}");
        let expected = if cond { a } else { b };
        prop_assert_eq!(eval_number(&src), expected as f64);
    }
}
