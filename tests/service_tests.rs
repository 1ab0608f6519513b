// Integration tests for the daily and undo services, run against the
// in-memory storage implementations with a controlled clock.

use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, Offset, TimeZone, Utc};
use uuid::Uuid;

use ember_core::models::{Gender, Match, Profile, ProfileState, Swipe};
use ember_core::services::daily::{format_duration, DailyConfig, DailyService, UNLIMITED};
use ember_core::services::undo::{UndoOutcome, UndoService};
use ember_core::storage::memory::{
    MemoryBlockStorage, MemoryDailyPickViewStorage, MemoryInteractionStorage, MemoryMatchStorage,
    MemoryProfileStorage,
};
use ember_core::storage::InteractionStorage;
use ember_core::time::{Clock, ManualClock};

struct Fixture {
    profiles: Arc<MemoryProfileStorage>,
    interactions: Arc<MemoryInteractionStorage>,
    blocks: Arc<MemoryBlockStorage>,
    views: Arc<MemoryDailyPickViewStorage>,
    clock: Arc<ManualClock>,
}

impl Fixture {
    fn new() -> Self {
        Self {
            profiles: Arc::new(MemoryProfileStorage::new()),
            interactions: Arc::new(MemoryInteractionStorage::new()),
            blocks: Arc::new(MemoryBlockStorage::new()),
            views: Arc::new(MemoryDailyPickViewStorage::new()),
            clock: Arc::new(ManualClock::new(
                Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
            )),
        }
    }

    fn daily_service(&self, config: DailyConfig) -> DailyService {
        DailyService::new(
            self.profiles.clone(),
            self.interactions.clone(),
            self.blocks.clone(),
            self.views.clone(),
            config,
            self.clock.clone(),
        )
    }

    fn active_profile(&self, name: &str) -> Profile {
        let mut p = Profile::new(
            Uuid::new_v4(),
            name,
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        );
        p.state = ProfileState::Active;
        p.gender = Some(Gender::Other);
        p.birth_date = NaiveDate::from_ymd_opt(1994, 1, 1);
        p.lat = 52.52;
        p.lon = 13.40;
        self.profiles.save(p.clone()).unwrap();
        p
    }

    fn record_likes(&self, user: Uuid, count: usize) {
        for _ in 0..count {
            let swipe = Swipe::like(user, Uuid::new_v4(), self.clock.now()).unwrap();
            self.interactions.save(swipe).unwrap();
        }
    }
}

fn capped_config(cap: u32) -> DailyConfig {
    DailyConfig {
        like_limit: cap,
        pass_limit: cap,
        unlimited_likes: false,
        unlimited_passes: false,
        timezone: Utc.fix(),
    }
}

#[test]
fn test_can_like_under_and_at_cap() {
    let fx = Fixture::new();
    let service = fx.daily_service(capped_config(20));
    let user = Uuid::new_v4();

    fx.record_likes(user, 18);
    assert!(service.can_like(user).unwrap());

    fx.record_likes(user, 2);
    assert!(!service.can_like(user).unwrap());
}

#[test]
fn test_unlimited_flag_short_circuits() {
    let fx = Fixture::new();
    let mut config = capped_config(1);
    config.unlimited_likes = true;
    let service = fx.daily_service(config);
    let user = Uuid::new_v4();

    fx.record_likes(user, 50);
    assert!(service.can_like(user).unwrap());

    let status = service.status(user).unwrap();
    assert_eq!(status.likes_remaining, UNLIMITED);
    assert!(status.has_unlimited_likes());
    assert!(!status.has_unlimited_passes());
}

#[test]
fn test_only_same_day_swipes_count() {
    let fx = Fixture::new();
    let service = fx.daily_service(capped_config(5));
    let user = Uuid::new_v4();

    // A like from yesterday evening does not count against today
    let yesterday = Utc.with_ymd_and_hms(2024, 5, 31, 23, 0, 0).unwrap();
    fx.interactions
        .save(Swipe::like(user, Uuid::new_v4(), yesterday).unwrap())
        .unwrap();
    fx.record_likes(user, 4);

    let status = service.status(user).unwrap();
    assert_eq!(status.likes_used, 4);
    assert_eq!(status.likes_remaining, 1);
    assert!(service.can_like(user).unwrap());
}

#[test]
fn test_status_reset_time_is_next_local_midnight() {
    let fx = Fixture::new();
    let service = fx.daily_service(capped_config(5));

    let status = service.status(Uuid::new_v4()).unwrap();
    assert_eq!(status.date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
    assert_eq!(status.resets_at, Utc.with_ymd_and_hms(2024, 6, 2, 0, 0, 0).unwrap());

    // 12 hours to midnight from the fixture clock
    let until_reset = service.time_until_reset();
    assert_eq!(until_reset.num_hours(), 12);
    assert_eq!(format_duration(until_reset), "12h 00m");
    assert_eq!(format_duration(chrono::Duration::minutes(42)), "42m");
}

#[test]
fn test_daily_pick_is_deterministic_within_a_day() {
    let fx = Fixture::new();
    let service = fx.daily_service(capped_config(50));
    let seeker = fx.active_profile("seeker");
    for i in 0..8 {
        fx.active_profile(&format!("candidate-{}", i));
    }

    let first = service.daily_pick(&seeker).unwrap().expect("pick available");
    let second = service.daily_pick(&seeker).unwrap().expect("pick available");

    assert_eq!(first.profile.id, second.profile.id);
    assert_eq!(first.reason, second.reason);
    assert_eq!(first.date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
}

#[test]
fn test_daily_pick_changes_are_possible_across_days() {
    let fx = Fixture::new();
    let service = fx.daily_service(capped_config(50));
    let seeker = fx.active_profile("seeker");
    for i in 0..20 {
        fx.active_profile(&format!("candidate-{}", i));
    }

    let today_pick = service.daily_pick(&seeker).unwrap().expect("pick available");

    // Not asserting inequality (a repeat is legal), only that the service
    // still produces a valid pick with the new seed
    fx.clock.advance(chrono::Duration::days(1));
    let tomorrow_pick = service.daily_pick(&seeker).unwrap().expect("pick available");
    assert_eq!(tomorrow_pick.date, NaiveDate::from_ymd_opt(2024, 6, 2).unwrap());
    assert_ne!(today_pick.date, tomorrow_pick.date);
}

#[test]
fn test_daily_pick_excludes_self_blocked_and_interacted() {
    let fx = Fixture::new();
    let service = fx.daily_service(capped_config(50));
    let seeker = fx.active_profile("seeker");
    let blocked = fx.active_profile("blocked");
    let liked = fx.active_profile("liked");
    let eligible = fx.active_profile("eligible");

    fx.blocks.block(blocked.id, seeker.id).unwrap();
    fx.interactions
        .save(Swipe::like(seeker.id, liked.id, fx.clock.now()).unwrap())
        .unwrap();

    for _ in 0..10 {
        let pick = service.daily_pick(&seeker).unwrap().expect("pick available");
        assert_eq!(pick.profile.id, eligible.id);
    }
}

#[test]
fn test_daily_pick_empty_pool_is_none() {
    let fx = Fixture::new();
    let service = fx.daily_service(capped_config(50));
    let seeker = fx.active_profile("seeker");

    assert!(service.daily_pick(&seeker).unwrap().is_none());
}

#[test]
fn test_daily_pick_viewed_flag_rides_along() {
    let fx = Fixture::new();
    let service = fx.daily_service(capped_config(50));
    let seeker = fx.active_profile("seeker");
    fx.active_profile("candidate");

    let before = service.daily_pick(&seeker).unwrap().expect("pick available");
    assert!(!before.already_viewed);
    assert!(!service.has_viewed_pick(seeker.id).unwrap());

    service.mark_pick_viewed(seeker.id).unwrap();

    let after = service.daily_pick(&seeker).unwrap().expect("pick available");
    assert!(after.already_viewed);
    // The viewed flag never changes the choice itself
    assert_eq!(before.profile.id, after.profile.id);
}

#[test]
fn test_undo_last_swipe_round_trip() {
    let fx = Fixture::new();
    let matches = Arc::new(MemoryMatchStorage::new());
    let service = UndoService::new(
        fx.interactions.clone(),
        matches.clone(),
        Duration::from_secs(30),
        fx.clock.clone(),
    );

    let user = Uuid::new_v4();
    let (first_target, second_target) = (Uuid::new_v4(), Uuid::new_v4());

    let s1 = Swipe::like(user, first_target, fx.clock.now()).unwrap();
    fx.interactions.save(s1.clone()).unwrap();
    service.record_swipe(user, s1, None);

    let s2 = Swipe::like(user, second_target, fx.clock.now()).unwrap();
    fx.interactions.save(s2.clone()).unwrap();
    let m = Match::new(user, second_target, fx.clock.now()).unwrap();
    matches.save(m.clone()).unwrap();
    service.record_swipe(user, s2.clone(), Some(m.id.clone()));

    // Only the latest swipe is reversible
    let outcome = service.undo(user);
    match outcome {
        UndoOutcome::Undone { swipe, match_removed } => {
            assert_eq!(swipe.id, s2.id);
            assert!(match_removed);
        }
        UndoOutcome::Failed { message } => panic!("undo failed: {}", message),
    }
    assert!(!fx.interactions.exists(user, second_target).unwrap());
    assert!(!matches.contains(&m.id).unwrap());
    assert!(fx.interactions.exists(user, first_target).unwrap());

    // A second undo has nothing to work on
    assert_eq!(service.undo(user).failure_message(), Some("No swipe to undo"));
}

#[test]
fn test_undo_window_expiry() {
    let fx = Fixture::new();
    let matches = Arc::new(MemoryMatchStorage::new());
    let service = UndoService::new(
        fx.interactions.clone(),
        matches,
        Duration::from_secs(30),
        fx.clock.clone(),
    );

    let user = Uuid::new_v4();
    let s = Swipe::pass(user, Uuid::new_v4(), fx.clock.now()).unwrap();
    fx.interactions.save(s.clone()).unwrap();
    service.record_swipe(user, s, None);

    assert!(service.can_undo(user));
    fx.clock.advance(chrono::Duration::seconds(29));
    assert!(service.can_undo(user));
    assert!(service.seconds_remaining(user) <= 1);

    fx.clock.advance(chrono::Duration::seconds(2));
    assert_eq!(service.undo(user).failure_message(), Some("Undo window expired"));
    assert!(!service.can_undo(user));
}
