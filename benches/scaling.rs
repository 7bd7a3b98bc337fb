use criterion::{black_box, criterion_group, criterion_main, Criterion};

use rulekit::grammar::Triple;
use rulekit::KnowledgeBase;

/// Builds a knowledge base with `n` unrelated facts already installed, so
/// a bench can measure the cost of one more `tell` against a tree of that
/// size instead of the cost of building it.
fn kb_with_facts(n: usize) -> KnowledgeBase<Triple> {
  let mut kb = KnowledgeBase::new();
  for i in 0..n {
    kb.tell(Triple::new(format!("item{}", i), "has", format!("tag{}", i % 37)))
      .unwrap();
  }
  kb
}

fn criterion_benchmark(c: &mut Criterion) {
  let mut group = c.benchmark_group("tell one fact against a pre-populated tree");
  for &size in &[0usize, 100, 1_000, 10_000] {
    group.bench_function(format!("{size} facts"), |b| {
      b.iter_batched(
        || kb_with_facts(size),
        |mut kb| kb.tell(black_box(Triple::new("probe", "has", "tagX"))).unwrap(),
        criterion::BatchSize::LargeInput,
      )
    });
  }
  group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
