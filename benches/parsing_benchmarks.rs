use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tls_expiry_notifier::parsing::{parse_checker_output, parse_record_line};

fn checker_output(hosts: usize) -> String {
    let mut out = String::from("Host\tCN\tStatus\tDaysLeft\tExpire\n");
    for i in 0..hosts {
        out.push_str(&format!(
            "host{0}.example.com:443\thost{0}.example.com\tValid\t{1}\t2025-03-{2:02} 12:00:00 +0000 UTC\n",
            i,
            i % 120,
            i % 28 + 1
        ));
    }
    out
}

fn line_parsing_benchmark(c: &mut Criterion) {
    let lines = vec![
        "a.example.com\ta.example.com\tValid\t5\t2024-01-01",
        "  b.example.com \t\t b.example.com\t Valid \t\t90\t 2024-06-01 ",
        "c.example.com:8443\t*.example.com\tExpired\t-12\t2023-11-30 00:00:00 +0000 UTC",
    ];

    c.bench_function("parse_record_line", |b| {
        b.iter(|| {
            for line in &lines {
                let _ = black_box(parse_record_line(2, black_box(line)));
            }
        })
    });
}

fn output_parsing_benchmark(c: &mut Criterion) {
    let output = checker_output(500);

    c.bench_function("parse_checker_output_500_hosts", |b| {
        b.iter(|| black_box(parse_checker_output(black_box(&output))))
    });
}

criterion_group!(benches, line_parsing_benchmark, output_parsing_benchmark);
criterion_main!(benches);
