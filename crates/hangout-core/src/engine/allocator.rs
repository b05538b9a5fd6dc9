//! Greedy date allocation.
//!
//! Scans forward from `start + 1` one day at a time and takes the first day
//! that fits, relaxing the fit in tiers:
//! 1. preferred weekday and unused (or just unused when no weekdays are preferred)
//! 2. any unused day in the window
//! 3. any unused day in the week after the window
//! 4. a random day in the window, which may collide with a used date
//!
//! Tiers 2 and 3 only run when weekdays are preferred. Without preferences a
//! full window goes straight to the random day.
//!
//! The allocator only reads `used`; the caller records the returned date.

use std::collections::HashSet;

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use super::random::RandomSource;

/// Days added past the window by the extended search.
pub const EXTENSION_DAYS: u32 = 7;

/// Which search tier produced a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationTier {
    /// First unused day matching a preferred weekday, or any unused day when
    /// there are no preferences.
    Preferred,
    /// Unused day in the window, ignoring weekday preferences.
    AnyDayInWindow,
    /// Unused day in the extension week past the window. Only reached when
    /// weekdays are preferred.
    Extended,
    /// Random day in the window; may already be taken.
    Random,
}

/// A chosen date and how it was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allocation {
    pub date: NaiveDate,
    pub tier: AllocationTier,
}

impl Allocation {
    /// Whether the date may collide with an earlier allocation.
    pub fn may_collide(&self) -> bool {
        self.tier == AllocationTier::Random
    }
}

/// Days ahead to search for a contact: one week for close friends, two otherwise.
pub fn search_window(closeness: u8) -> u32 {
    if closeness >= 7 {
        7
    } else {
        14
    }
}

/// Find the best date for one recommendation.
pub fn allocate_date(
    preferred: &[Weekday],
    start: NaiveDate,
    max_days: u32,
    used: &HashSet<NaiveDate>,
    rng: &mut dyn RandomSource,
) -> Allocation {
    let first_unused = |range: std::ops::RangeInclusive<u32>, want: &dyn Fn(NaiveDate) -> bool| {
        range
            .map(|offset| start + Duration::days(i64::from(offset)))
            .find(|date| !used.contains(date) && want(*date))
    };

    let window = 1..=max_days;

    let preferred_hit = if preferred.is_empty() {
        first_unused(window.clone(), &|_| true)
    } else {
        first_unused(window.clone(), &|date| preferred.contains(&date.weekday()))
    };
    if let Some(date) = preferred_hit {
        return Allocation {
            date,
            tier: AllocationTier::Preferred,
        };
    }

    // With no preferences the first tier already scanned every unused day.
    if !preferred.is_empty() {
        if let Some(date) = first_unused(window, &|_| true) {
            return Allocation {
                date,
                tier: AllocationTier::AnyDayInWindow,
            };
        }

        if let Some(date) = first_unused(max_days + 1..=max_days + EXTENSION_DAYS, &|_| true) {
            return Allocation {
                date,
                tier: AllocationTier::Extended,
            };
        }
    }

    let offset = rng.pick(max_days.max(1) as usize) as i64 + 1;
    let date = start + Duration::days(offset);
    tracing::warn!(%date, max_days, "date search exhausted, falling back to a random day");
    Allocation {
        date,
        tier: AllocationTier::Random,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::random::{FirstPick, SeededRandom};

    // 2024-06-03 is a Monday.
    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
    }

    fn days(n: i64) -> NaiveDate {
        monday() + Duration::days(n)
    }

    #[test]
    fn window_by_closeness() {
        assert_eq!(search_window(10), 7);
        assert_eq!(search_window(7), 7);
        assert_eq!(search_window(6), 14);
        assert_eq!(search_window(1), 14);
    }

    #[test]
    fn no_preferences_takes_next_day() {
        let got = allocate_date(&[], monday(), 7, &HashSet::new(), &mut FirstPick);
        assert_eq!(got.date, days(1));
        assert_eq!(got.tier, AllocationTier::Preferred);
    }

    #[test]
    fn never_returns_start_date() {
        let got = allocate_date(&[Weekday::Mon], monday(), 7, &HashSet::new(), &mut FirstPick);
        assert_eq!(got.date, days(7));
    }

    #[test]
    fn no_preferences_skips_used_days() {
        let used: HashSet<_> = [days(1), days(2)].into_iter().collect();
        let got = allocate_date(&[], monday(), 7, &used, &mut FirstPick);
        assert_eq!(got.date, days(3));
    }

    #[test]
    fn picks_first_preferred_weekday() {
        let got = allocate_date(
            &[Weekday::Fri, Weekday::Sat],
            monday(),
            7,
            &HashSet::new(),
            &mut FirstPick,
        );
        assert_eq!(got.date, days(4));
        assert_eq!(got.date.weekday(), Weekday::Fri);
    }

    #[test]
    fn skips_taken_preferred_day() {
        let used: HashSet<_> = [days(4)].into_iter().collect();
        let got = allocate_date(&[Weekday::Fri, Weekday::Sat], monday(), 7, &used, &mut FirstPick);
        assert_eq!(got.date, days(5));
        assert_eq!(got.tier, AllocationTier::Preferred);
    }

    #[test]
    fn falls_back_to_any_day_in_window() {
        let used: HashSet<_> = [days(4), days(5)].into_iter().collect();
        let got = allocate_date(&[Weekday::Fri, Weekday::Sat], monday(), 7, &used, &mut FirstPick);
        assert_eq!(got.date, days(1));
        assert_eq!(got.tier, AllocationTier::AnyDayInWindow);
    }

    #[test]
    fn extends_past_a_full_window() {
        let used: HashSet<_> = (1..=7).map(days).collect();
        let got = allocate_date(&[Weekday::Fri], monday(), 7, &used, &mut FirstPick);
        assert_eq!(got.date, days(8));
        assert_eq!(got.tier, AllocationTier::Extended);
    }

    #[test]
    fn no_preferences_never_extends() {
        let used: HashSet<_> = (1..=7).map(days).collect();
        let got = allocate_date(&[], monday(), 7, &used, &mut FirstPick);
        assert_eq!(got.tier, AllocationTier::Random);
        assert_eq!(got.date, days(1));
    }

    #[test]
    fn random_fallback_stays_in_window() {
        let used: HashSet<_> = (1..=14).map(days).collect();
        for seed in 0..25 {
            let got = allocate_date(&[], monday(), 7, &used, &mut SeededRandom::new(seed));
            assert_eq!(got.tier, AllocationTier::Random);
            assert!(got.may_collide());
            assert!(got.date >= days(1) && got.date <= days(7));
        }
    }
}
