//! Benchmarks for predicate parsing, compilation and rendering.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use sift::prelude::*;
use sift::query::{compile_key, predicate};

fn people() -> Model {
    Model::named("Person")
        .with_table("people")
        .with_column("id", ValueType::Int)
        .with_column("parent_id", ValueType::Int)
        .with_column("name", ValueType::String)
        .with_column("email", ValueType::String)
        .with_column("awesome", ValueType::Boolean)
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for key in ["awesome_eq", "name_not_null", "parent_id_not_cont", "name_bogus"] {
        group.bench_with_input(BenchmarkId::from_parameter(key), key, |b, key| {
            b.iter(|| black_box(predicate::parse(black_box(key)).is_ok()))
        });
    }
    group.finish();
}

fn bench_compile_and_render(c: &mut Criterion) {
    let model = people();
    let pg = Dialect::postgres();
    let mysql = Dialect::mysql();

    c.bench_function("compile_eq_boolean", |b| {
        let value = RawValue::from(true);
        b.iter(|| black_box(compile_key(&model, "awesome_eq", &value).unwrap()))
    });

    c.bench_function("compile_render_cont_escaped_pg", |b| {
        let value = RawValue::from(r"100%._\ sure");
        b.iter(|| {
            let condition = compile_key(&model, "name_cont", &value).unwrap();
            black_box(condition.render(&pg))
        })
    });

    c.bench_function("compile_render_present_mysql", |b| {
        let value = RawValue::from(false);
        b.iter(|| {
            let condition = compile_key(&model, "name_present", &value).unwrap();
            black_box(condition.render(&mysql))
        })
    });

    c.bench_function("compile_nil_suppressed", |b| {
        b.iter(|| black_box(compile_key(&model, "email_cont", &RawValue::Null).unwrap()))
    });
}

fn bench_search_scaling(c: &mut Criterion) {
    let model = people();
    let keys = ["name_cont", "email_start", "awesome_true", "parent_id_null", "id_gt"];
    let values = [
        RawValue::from("ric"),
        RawValue::from("admin"),
        RawValue::from(true),
        RawValue::from(false),
        RawValue::from(10),
    ];

    let mut group = c.benchmark_group("where_clause");
    for count in [1usize, 5, 25] {
        let mut search = Search::new(&model, Dialect::postgres());
        for i in 0..count {
            search.add(keys[i % keys.len()], values[i % values.len()].clone());
        }
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &search, |b, search| {
            b.iter(|| black_box(search.where_clause().unwrap()))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_parse,
    bench_compile_and_render,
    bench_search_scaling,
);
criterion_main!(benches);
