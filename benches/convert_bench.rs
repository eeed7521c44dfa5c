use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::{json, Value};

use querygen::{convert, ConvertOptions, QueryNode, QueryParser, Schema};

fn make_query(width: usize) -> Value {
    let operands: Vec<Value> = (0..width)
        .map(|i| {
            json!({
                "$operator": if i % 2 == 0 { "or" } else { "not" },
                "$operands": [
                    { "name": format!("user {}", i), "tags": ["rust", "search", "lucene"] },
                    { "age": { "$from": i, "$to": i + 10 }, "dob": 123456789 + i as i64 }
                ]
            })
        })
        .collect();
    json!({ "$operator": "and", "$operands": operands })
}

fn make_options() -> ConvertOptions {
    let schema: Schema = r#"{ "age": "int", "dob": "date" }"#.parse().unwrap();
    ConvertOptions::new(schema)
}

fn parse_all(queries: &[(usize, Value)]) -> Vec<(usize, QueryNode)> {
    queries
        .iter()
        .map(|(width, q)| (*width, QueryParser::parse(q).unwrap()))
        .collect()
}

fn bench_parse(c: &mut Criterion) {
    let widths = [10usize, 100, 1_000];
    let queries: Vec<(usize, Value)> = widths.iter().map(|&w| (w, make_query(w))).collect();

    let mut group = c.benchmark_group("parse");
    for (width, query) in queries.iter() {
        group.bench_with_input(BenchmarkId::from_parameter(width), query, |b, query| {
            b.iter(|| {
                black_box(QueryParser::parse(query).unwrap());
            });
        });
    }
    group.finish();
}

fn bench_convert(c: &mut Criterion) {
    let widths = [10usize, 100, 1_000];
    let queries: Vec<(usize, Value)> = widths.iter().map(|&w| (w, make_query(w))).collect();
    let nodes = parse_all(&queries);
    let options = make_options();

    let mut group = c.benchmark_group("convert");
    for (width, node) in nodes.iter() {
        group.bench_with_input(BenchmarkId::from_parameter(width), node, |b, node| {
            b.iter(|| {
                black_box(convert(node, &options).unwrap());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse, bench_convert);
criterion_main!(benches);
