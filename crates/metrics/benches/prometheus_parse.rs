use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use hackerlearn_metrics::parse;

/// A scrape shaped like a Go service's default registry plus `n` labelled
/// HTTP series.
fn scrape(n: usize) -> String {
    let mut out = String::from(
        "# HELP go_goroutines Number of goroutines that currently exist.\n\
         # TYPE go_goroutines gauge\n\
         go_goroutines 42\n\
         # TYPE go_memstats_heap_alloc_bytes gauge\n\
         go_memstats_heap_alloc_bytes 4.194304e+06\n\
         # TYPE http_requests_total counter\n",
    );
    for i in 0..n {
        out.push_str(&format!(
            "http_requests_total{{method=\"GET\",path=\"/course/{i}\",code=\"200\"}} {i}\n"
        ));
    }
    out
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("prometheus_parse");
    for n in [10usize, 100, 1_000] {
        let text = scrape(n);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &text, |b, text| {
            b.iter(|| parse(black_box(text)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
