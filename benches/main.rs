use criterion::{BenchmarkId, Criterion};
use needlefind::topk::{ScoredMatch, TopK, MAX_RESULTS};
use needlefind_matcher::{CaseMatching, Matcher, MatcherConfig, Normalization, Pattern, Utf32Str};

const SMALL_LINE_COUNT: u32 = 1_000;
const MEDIUM_LINE_COUNT: u32 = 50_000;
const LARGE_LINE_COUNT: u32 = 500_000;

fn rerank_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("rerank");
    for line_count in [SMALL_LINE_COUNT, MEDIUM_LINE_COUNT, LARGE_LINE_COUNT] {
        let lines = random_lines(line_count);
        group.bench_with_input(BenchmarkId::new("score_and_topk", line_count), &lines, |b, lines| {
            b.iter(|| {
                let mut matcher = Matcher::new(MatcherConfig::DEFAULT);
                let pattern = Pattern::parse(CaseMatching::Smart, Normalization::Smart, "wor");
                let mut top_k = TopK::new(MAX_RESULTS);
                let mut indices = Vec::new();
                let mut char_buf = Vec::new();
                for (id, line) in lines.iter().enumerate() {
                    indices.clear();
                    char_buf.clear();
                    let haystack = Utf32Str::new(line, &mut char_buf);
                    if let Some(score) = pattern.indices(haystack, &mut matcher, &mut indices) {
                        top_k.consider(ScoredMatch { item_id: id as u32, score, indices: indices.clone() });
                    }
                }
                top_k.into_sorted()
            });
        });
    }
}

fn random_lines(count: u32) -> Vec<String> {
    let count = i64::from(count);
    (0..count).map(|_| fakeit::words::sentence(6)).collect()
}

criterion::criterion_group!(benches, rerank_throughput);
criterion::criterion_main!(benches);
