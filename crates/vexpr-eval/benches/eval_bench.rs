//! Evaluator throughput benchmarks.
//!
//! Run with `cargo bench --package vexpr-eval`.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use std::collections::HashMap;
use vexpr_eval::{Evaluator, MapEnvironment, Value};
use vexpr_lex::Lexer;
use vexpr_parse::{Node, Parser};

fn compile(source: &str) -> Node {
    Parser::parse(Lexer::scan(source).expect("benchmark inputs must lex"))
        .expect("benchmark inputs must parse")
}

fn bench_eval(c: &mut Criterion) {
    let mut group = c.benchmark_group("eval");

    let arithmetic = "1 - 2 + 3 * 4 / 5 % 6";
    let arithmetic_node = compile(arithmetic);
    group.throughput(Throughput::Bytes(arithmetic.len() as u64));
    group.bench_function("arithmetic", |b| {
        b.iter(|| Evaluator::eval(black_box(&arithmetic_node), &vexpr_eval::EmptyEnvironment).unwrap())
    });

    let ternary_chain = "1 > 2 ? 3 : 4 > 5 ? 6 : 7 == 8 ? 9 : 10";
    let ternary_node = compile(ternary_chain);
    group.throughput(Throughput::Bytes(ternary_chain.len() as u64));
    group.bench_function("nested_ternary_chain", |b| {
        b.iter(|| Evaluator::eval(black_box(&ternary_node), &vexpr_eval::EmptyEnvironment).unwrap())
    });

    let path = "param.Array[0].Next.Value";
    let path_node = compile(path);
    let mut next = HashMap::new();
    next.insert("Value".to_string(), Value::Number(42.0));
    let mut array_elem = HashMap::new();
    array_elem.insert("Next".to_string(), Value::Map(next));
    let env = MapEnvironment::new().insert(
        "param",
        Value::Map({
            let mut root = HashMap::new();
            root.insert("Array".to_string(), Value::Seq(vec![Value::Map(array_elem)]));
            root
        }),
    );
    group.throughput(Throughput::Bytes(path.len() as u64));
    group.bench_function("nested_path_resolution", |b| {
        b.iter(|| Evaluator::eval(black_box(&path_node), black_box(&env)).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_eval);
criterion_main!(benches);
