//! Parser/table-construction benchmarks.
//! Run with: `cargo bench --package tacc-par`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use tacc_lex::Lexer;
use tacc_par::{LrTable, Parser};

fn parse_source(parser: &Parser, source: &str) -> usize {
    let mut lexer = Lexer::new(source);
    let mut lines = 0usize;
    parser.parse(&mut lexer, |_| lines += 1);
    lines
}

fn bench_table_construction(c: &mut Criterion) {
    c.bench_function("table_build", |b| b.iter(|| black_box(LrTable::build())));
}

fn bench_parser_declarations(c: &mut Criterion) {
    let parser = Parser::new();
    parser.ensure_table();

    let mut group = c.benchmark_group("parser_declarations");
    let source = "{ int32 x; x = 1 + 2 * 3; }";
    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("decl_and_assign", |b| {
        b.iter(|| parse_source(&parser, black_box(source)))
    });

    group.finish();
}

fn bench_parser_control_flow(c: &mut Criterion) {
    let parser = Parser::new();
    parser.ensure_table();

    let mut group = c.benchmark_group("parser_control_flow");
    let source = r#"
        {
            int32 x;
            int32 total;
            x = 0;
            while ( x <= 10 ) {
                if ( x == 5 ) {
                    break;
                }
                total = total + x;
                x = x + 1;
            }
        }
    "#;
    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("nested_while_if", |b| {
        b.iter(|| parse_source(&parser, black_box(source)))
    });

    group.finish();
}

fn bench_parser_arrays(c: &mut Criterion) {
    let parser = Parser::new();
    parser.ensure_table();

    let mut group = c.benchmark_group("parser_arrays");
    let source = "{ int32 grid[4][4]; grid[1][2] = 7; }";
    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("two_dimensional_array", |b| {
        b.iter(|| parse_source(&parser, black_box(source)))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_table_construction,
    bench_parser_declarations,
    bench_parser_control_flow,
    bench_parser_arrays
);
criterion_main!(benches);
