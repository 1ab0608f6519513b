// Criterion benchmarks for Ember Core

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{NaiveDate, Offset, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use uuid::Uuid;

use ember_core::core::pace;
use ember_core::core::{haversine_distance, CandidateFinder};
use ember_core::models::{
    CommunicationStyle, DepthPreference, Gender, MessagingFrequency, PacePreferences, Profile,
    ProfileState, TimeToFirstDate,
};
use ember_core::time::SystemClock;

fn create_candidate(i: usize, lat: f64, lon: f64) -> Profile {
    let mut p = Profile::new(
        Uuid::new_v4(),
        format!("User {}", i),
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    );
    p.state = ProfileState::Active;
    p.gender = Some(if i % 2 == 0 { Gender::Female } else { Gender::Male });
    p.interested_in = [Gender::Male, Gender::Female].into_iter().collect();
    p.birth_date = NaiveDate::from_ymd_opt(1985 + (i % 15) as i32, 3, 1);
    p.lat = lat;
    p.lon = lon;
    p
}

fn create_seeker() -> Profile {
    let mut p = create_candidate(0, 40.7128, -74.0060);
    p.min_age = 21;
    p.max_age = 45;
    p.max_distance_km = 50;
    p
}

fn bench_haversine_distance(c: &mut Criterion) {
    c.bench_function("haversine_distance", |b| {
        b.iter(|| {
            haversine_distance(
                black_box(40.7128),
                black_box(-74.0060),
                black_box(40.72),
                black_box(-74.01),
            )
        });
    });
}

fn bench_candidate_finder(c: &mut Criterion) {
    let finder = CandidateFinder::new(Arc::new(SystemClock), Utc.fix());
    let seeker = create_seeker();
    let excluded = HashSet::new();

    let mut group = c.benchmark_group("find_candidates");

    for candidate_count in [10, 100, 1000].iter() {
        let candidates: Vec<Profile> = (1..=*candidate_count)
            .map(|i| {
                let lat_offset = (i as f64 * 0.001) % 0.5;
                let lon_offset = (i as f64 * 0.0007) % 0.5;
                create_candidate(i, 40.7128 + lat_offset, -74.0060 + lon_offset)
            })
            .collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| {
                    finder.find_candidates(
                        black_box(&seeker),
                        black_box(candidates.clone()),
                        black_box(&excluded),
                    )
                });
            },
        );
    }
    group.finish();
}

fn bench_pace_scoring(c: &mut Criterion) {
    let a = PacePreferences::new(
        MessagingFrequency::Often,
        TimeToFirstDate::FewDays,
        CommunicationStyle::TextOnly,
        DepthPreference::DeepChat,
    );
    let b_prefs = PacePreferences::new(
        MessagingFrequency::Constantly,
        TimeToFirstDate::Quickly,
        CommunicationStyle::MixOfEverything,
        DepthPreference::SmallTalk,
    );

    c.bench_function("pace_compatibility", |b| {
        b.iter(|| pace::compatibility(black_box(Some(&a)), black_box(Some(&b_prefs))));
    });
}

criterion_group!(
    benches,
    bench_haversine_distance,
    bench_candidate_finder,
    bench_pace_scoring
);
criterion_main!(benches);
