use criterion::{black_box, criterion_group, criterion_main, Criterion};
use typepath_ast::Expression;
use typepath_inference::Resolver;
use typepath_model::ModelDirectory;

const MODEL: &str = include_str!("../tests/fixtures/model.json");

fn resolve_simple_path(c: &mut Criterion) {
    let model = ModelDirectory::from_json_str(MODEL).unwrap();
    let expr = Expression::path("Patient.name.family");

    c.bench_function("resolve_simple_path", |b| {
        b.iter(|| {
            let resolver = Resolver::new(&model);
            resolver.resolve("Patient", ("string", black_box(&expr)), &[])
        })
    });
}

fn resolve_polymorphic_union(c: &mut Criterion) {
    let model = ModelDirectory::from_json_str(MODEL).unwrap();
    let expr = Expression::path("Condition.onset")
        .union(Expression::path("Condition.abatement"))
        .union(Expression::path("Observation.value").call("as", vec![Expression::string("Period")]));

    c.bench_function("resolve_polymorphic_union", |b| {
        b.iter(|| {
            let resolver = Resolver::new(&model);
            resolver.resolve("Condition", ("date", black_box(&expr)), &[])
        })
    });
}

fn resolve_composite(c: &mut Criterion) {
    let model = ModelDirectory::from_json_str(MODEL).unwrap();
    let primary = Expression::path("Observation.component");
    let code = Expression::path("code");
    let value = Expression::path("value").call("as", vec![Expression::string("Quantity")]);

    c.bench_function("resolve_composite", |b| {
        b.iter(|| {
            let resolver = Resolver::new(&model);
            resolver.resolve(
                "Observation",
                ("composite", black_box(&primary)),
                &[("token", &code), ("quantity", &value)],
            )
        })
    });
}

fn load_model(c: &mut Criterion) {
    c.bench_function("load_model", |b| {
        b.iter(|| ModelDirectory::from_json_str(black_box(MODEL)))
    });
}

criterion_group!(
    benches,
    resolve_simple_path,
    resolve_polymorphic_union,
    resolve_composite,
    load_model
);
criterion_main!(benches);
