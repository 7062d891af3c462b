// SPDX-License-Identifier: MPL-2.0
use cat_gallery::api::Vote;
use cat_gallery::gallery::scores::build_score_map;
use cat_gallery::gallery::{top_votes, TOP_N};
use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use serde_json::json;
use std::hint::black_box;

/// Builds `count` votes spread over `images` distinct images.
fn sample_votes(count: usize, images: usize) -> Vec<Vote> {
    (0..count)
        .map(|i| {
            let image_id = format!("img{}", i % images);
            serde_json::from_value(json!({
                "id": i,
                "image_id": image_id,
                "value": (i * 7919) % 50,
                "image": { "id": image_id, "url": "https://cdn.example.test/cat.jpg" },
            }))
            .unwrap()
        })
        .collect()
}

fn ranking_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("ranking");

    for (count, images) in [(100, 40), (1_000, 200), (10_000, 2_000)] {
        let votes = sample_votes(count, images);

        group.bench_function(format!("top_votes_{count}"), |b| {
            b.iter_batched(
                || votes.clone(),
                |votes| black_box(top_votes(votes, TOP_N)),
                BatchSize::SmallInput,
            );
        });

        group.bench_function(format!("score_map_{count}"), |b| {
            b.iter(|| black_box(build_score_map(black_box(&votes))));
        });
    }

    group.finish();
}

criterion_group!(benches, ranking_benchmark);
criterion_main!(benches);
