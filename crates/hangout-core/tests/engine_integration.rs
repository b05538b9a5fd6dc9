//! End-to-end tests for recommendation generation.

use std::collections::HashSet;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use hangout_core::engine::{
    days_since, max_results, target_interval, FirstPick, SeededRandom, ACTIVITY_TABLE,
    DEFAULT_ACTIVITIES, NEVER_CONTACTED_DAYS,
};
use hangout_core::{Contact, ReasonKind, RecommendationEngine, SchedulingSettings};
use proptest::prelude::*;

// A Monday.
fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
}

fn seen(name: &str, closeness: u8, days_ago: i64) -> Contact {
    Contact::new(name, closeness).with_last_contact(today() - Duration::days(days_ago))
}

fn settings(target: u32, days: &[&str]) -> SchedulingSettings {
    SchedulingSettings {
        weekly_hangout_target: target,
        preferred_days: days.iter().map(|d| d.to_string()).collect(),
    }
}

#[test]
fn overdue_close_friend_beats_recent_distant_friend() {
    let a = seen("A", 9, 60);
    let b = seen("B", 2, 10);
    let mut engine = RecommendationEngine::with_rng(today(), SeededRandom::new(1));

    let recs = engine.generate(&[a, b], &[], &settings(2, &["Friday", "Saturday"]), false);

    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].contact.name, "A");
    assert_eq!(recs[0].reason_kind, ReasonKind::VeryOverdue);
    assert!(matches!(recs[0].date.weekday(), Weekday::Fri | Weekday::Sat));
    assert!(recs[0].date > today());
    // first Friday after Monday 2024-06-03
    assert_eq!(recs[0].date, NaiveDate::from_ymd_opt(2024, 6, 7).unwrap());
}

#[test]
fn forced_refresh_caps_five_due_contacts() {
    let contacts: Vec<_> = (0..5).map(|i| seen(&format!("c{i}"), 5, 40 + i)).collect();
    let mut engine = RecommendationEngine::with_rng(today(), SeededRandom::new(2));

    let recs = engine.generate(&contacts, &[], &settings(2, &["Saturday"]), true);

    assert!(recs.len() <= 4);
    let dates: HashSet<_> = recs.iter().map(|r| r.date).collect();
    assert_eq!(dates.len(), recs.len());
}

#[test]
fn forced_refresh_surfaces_contacts_that_are_not_due() {
    let contacts = vec![seen("fresh", 5, 1), seen("fresher", 6, 0)];
    let mut engine = RecommendationEngine::with_rng(today(), FirstPick);

    assert!(engine.generate(&contacts, &[], &settings(2, &[]), false).is_empty());

    let recs = engine.generate(&contacts, &[], &settings(2, &[]), true);
    assert_eq!(recs.len(), 2);
    assert!(recs.iter().all(|r| r.reason_kind == ReasonKind::ForcedRefresh));
}

#[test]
fn no_preferences_gets_default_activities_in_order() {
    let contact = Contact::new("Pat", 4);
    let mut engine = RecommendationEngine::with_rng(today(), SeededRandom::new(3));

    let recs = engine.generate(&[contact], &[], &settings(1, &[]), false);

    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].suggested_activities, DEFAULT_ACTIVITIES[..3].to_vec());
}

#[test]
fn more_overdue_contact_ranks_first() {
    let contacts = vec![seen("barely", 9, 8), seen("long-gone", 5, 90)];
    let mut engine = RecommendationEngine::with_rng(today(), FirstPick);

    let recs = engine.generate(&contacts, &[], &settings(3, &[]), false);

    let names: Vec<_> = recs.iter().map(|r| r.contact.name.as_str()).collect();
    assert_eq!(names, vec!["long-gone", "barely"]);
    assert!(recs[0].priority > recs[1].priority);
}

#[test]
fn weekly_target_limits_plain_generation() {
    let contacts: Vec<_> = (0..6).map(|i| seen(&format!("c{i}"), 9, 30 + i)).collect();
    let mut engine = RecommendationEngine::with_rng(today(), FirstPick);

    let recs = engine.generate(&contacts, &[], &settings(2, &[]), false);

    assert_eq!(recs.len(), 2);
}

#[test]
fn calls_do_not_share_allocated_dates() {
    let contacts = vec![seen("x", 9, 30)];
    let mut engine = RecommendationEngine::with_rng(today(), FirstPick);
    let first = engine.generate(&contacts, &[], &settings(1, &[]), false);
    let second = engine.generate(&contacts, &[], &settings(1, &[]), false);
    // Same input, fresh used-date set, same date.
    assert_eq!(first[0].date, second[0].date);
}

#[test]
fn never_contacted_is_maximally_urgent() {
    assert_eq!(days_since(None, today()), NEVER_CONTACTED_DAYS);
    let contacts = vec![seen("recent-overdue", 10, 10), Contact::new("stranger", 10)];
    let mut engine = RecommendationEngine::with_rng(today(), FirstPick);
    let recs = engine.generate(&contacts, &[], &settings(2, &[]), false);
    assert_eq!(recs[0].contact.name, "stranger");
}

#[test]
fn recommendation_json_shape() {
    let mut engine = RecommendationEngine::with_rng(today(), FirstPick);
    let recs = engine.generate(&[seen("J", 7, 20)], &[], &settings(1, &[]), false);
    let json = serde_json::to_value(&recs[0]).unwrap();
    assert_eq!(json["friend"]["name"], "J");
    assert_eq!(json["nextHangoutDate"], "2024-06-04");
    assert!(json["suggestedActivities"].is_array());
    assert_eq!(json["reasonKind"], "overdue");
}

fn contact_strategy() -> impl Strategy<Value = (u8, Option<i64>, Vec<usize>)> {
    (
        1u8..=10,
        proptest::option::of(0i64..200),
        proptest::collection::vec(0usize..ACTIVITY_TABLE.len() + 2, 0..4),
    )
}

proptest! {
    #[test]
    fn target_interval_never_increases(c in 1u8..10) {
        prop_assert!(target_interval(c + 1) <= target_interval(c));
    }

    #[test]
    fn generation_invariants(
        specs in proptest::collection::vec(contact_strategy(), 0..12),
        target in 1u32..=10,
        weekday_mask in 0u8..128,
        force in any::<bool>(),
        seed in any::<u64>(),
    ) {
        let contacts: Vec<_> = specs
            .iter()
            .enumerate()
            .map(|(i, (closeness, ago, prefs))| {
                // Indices past the table stand in for labels it doesn't know.
                let prefs = prefs.iter().map(|&p| {
                    ACTIVITY_TABLE.get(p).map_or_else(|| format!("Unknown {p}"), |(name, _)| name.to_string())
                });
                let c = Contact::new(format!("c{i}"), *closeness).with_preferences(prefs);
                match ago {
                    Some(days) => c.with_last_contact(today() - Duration::days(*days)),
                    None => c,
                }
            })
            .collect();
        let names = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"];
        let days: Vec<&str> = names
            .iter()
            .enumerate()
            .filter(|(i, _)| weekday_mask & (1 << i) != 0)
            .map(|(_, d)| *d)
            .collect();
        let settings = settings(target, &days);

        let mut engine = RecommendationEngine::with_rng(today(), SeededRandom::new(seed));
        let recs = engine.generate(&contacts, &[], &settings, force);

        prop_assert!(recs.len() <= max_results(target, force));

        let dates: HashSet<_> = recs.iter().map(|r| r.date).collect();
        prop_assert_eq!(dates.len(), recs.len());

        for rec in &recs {
            prop_assert!(rec.date > today());
            prop_assert!(rec.date <= today() + Duration::days(21));
            prop_assert!((2..=3).contains(&rec.suggested_activities.len()));
        }

        for pair in recs.windows(2) {
            prop_assert!(pair[0].priority >= pair[1].priority);
            if pair[0].priority == pair[1].priority {
                prop_assert!(pair[0].date < pair[1].date);
            }
        }

        if !force {
            let week_end = today() + Duration::days(7);
            let week1 = recs.iter().filter(|r| r.date <= week_end).count();
            let week2 = recs.len() - week1;
            prop_assert!(week1 <= target as usize);
            prop_assert!(week2 <= target as usize);
        }
    }
}
