use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

fn criterion_config() -> Criterion {
    Criterion::default().configure_from_args()
}

const QUERIES: &[(&str, &str)] = &[
    ("simple", "SELECT c FROM Customer c WHERE c.status = :stat"),
    (
        "joins",
        "SELECT o.quantity, o.cost * 1.08 AS taxedCost, a.zipcode \
         FROM Customer c JOIN c.orders o JOIN c.address a \
         WHERE a.state = 'CA' AND a.county = 'Santa Clara' \
         ORDER BY o.quantity, taxedCost, a.zipcode",
    ),
    (
        "cte_lateral",
        "WITH maxId AS (select max(sr.snapshot.id) snapshotId from SnapshotReference sr \
         where sr.id.selectionId = ?1 and sr.enabled group by sr.userId) \
         select sr from maxId m join SnapshotReference sr on sr.snapshot.id = m.snapshotId",
    ),
    (
        "case_nested",
        "select case when p.nickName is null then case when p.name is null \
         then '<no nick name>' else p.name end else p.nickName end from Person p",
    ),
];

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for (name, query) in QUERIES {
        group.bench_with_input(BenchmarkId::from_parameter(name), query, |b, q| {
            b.iter(|| oql_parser::parse(q).expect("benchmark query parses"));
        });
    }
    group.finish();
}

fn bench_roundtrip(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_and_render");
    for (name, query) in QUERIES {
        let stmt = oql_parser::parse(query).expect("benchmark query parses");
        group.bench_with_input(BenchmarkId::from_parameter(name), &stmt, |b, s| {
            b.iter(|| oql_ast::render(s));
        });
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = criterion_config();
    targets = bench_parse, bench_roundtrip
}
criterion_main!(benches);
