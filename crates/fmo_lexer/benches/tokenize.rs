//! Tokenizer throughput for `fmo_lexer`.
//!
//! Drains both tokenizers over synthetic files of growing size. Tokens are
//! consumed in a tight loop, never collected.

use std::fmt::Write as _;
use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fmo_lexer::{CpfTokenizer, LogTokenizer, Tokenizer};

/// A CPF report with `n` fragments of three atoms each.
fn generate_cpf(n: usize) -> String {
    let atoms = n * 3;
    let mut out = String::from("CPF Ver.4.201\n");
    let _ = writeln!(out, "{atoms:>5}{n:>5}");
    for i in 1..=atoms {
        let _ = writeln!(out, "{i:>5} C {:>5} ATOM   0.000  0.000  0.000", i / 3 + 1);
    }
    for _ in 0..2 * n.div_ceil(16) {
        out.push_str("    6    6    6    6    6    6    6    6\n");
    }
    for i in 1..n {
        let _ = writeln!(out, "{i:>5}{:>5}", i + 1);
    }
    out.push_str("   0.123456789012345E+01 this line ends BINDING\n");
    for _ in 1..n * (n - 1) / 2 {
        out.push_str("   1.500000000000E+00\n");
    }
    for _ in 0..n {
        out.push_str("   0.100000E+00   0.200000E+00   0.300000E+00\n");
    }
    out.push_str("6-31G*\n-\nMP2\n");
    out.push_str("ao_pop_aprx=0.00000000 pc_aprx=0.00000000 dimer_es_aprx=2.0\n");
    out.push_str("  -1.0E+02\n  -2.0E+02\n  -3.0E+02\n");
    for i in 1..=n {
        let _ = writeln!(out, "{i:>5}  -1.0E+02");
    }
    for i in 1..n {
        let _ = writeln!(out, "{i:>5}{:>5}  -1.0E-02", i + 1);
    }
    out
}

/// A LOG transcript with `n` sections of a few body lines each.
fn generate_log(n: usize) -> String {
    let mut out = String::from(" ----\n  ABINIT-MP Ver. 1 Rev. 22\n ----\n");
    for i in 0..n {
        out.push_str(" ======================================================\n");
        let _ = writeln!(out, " ## SECTION {i}");
        out.push_str(" ======================================================\n");
        let _ = writeln!(out, " Fragment {i} converged.\n Energy = -{i}.0123\n");
    }
    out
}

fn drain<'a, T: Tokenizer<'a>>(tokenizer: &mut T, source: &'a [u8]) {
    tokenizer.reset(source);
    while let Ok(token) = tokenizer.next_token() {
        if token.is_eof() {
            break;
        }
        black_box(token);
    }
}

fn bench_cpf(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize/cpf");

    for fragments in [10, 50, 100, 500] {
        let source = generate_cpf(fragments);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(fragments), &source, |b, src| {
            b.iter(|| drain(&mut CpfTokenizer::new(), src.as_bytes()));
        });
    }

    group.finish();
}

fn bench_log(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize/log");

    for sections in [10, 100, 1000, 10_000] {
        let source = generate_log(sections);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(sections), &source, |b, src| {
            b.iter(|| drain(&mut LogTokenizer::new(), src.as_bytes()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_cpf, bench_log);
criterion_main!(benches);
