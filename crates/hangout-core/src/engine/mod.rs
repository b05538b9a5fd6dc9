//! Hangout recommendation engine.
//!
//! One call to [`RecommendationEngine::generate`] runs the whole pipeline:
//! - pick the contacts that are due (or all of them on a forced refresh)
//! - suggest activities and allocate a distinct date for each
//! - rank by [`priority_score`], earlier dates first on ties
//! - keep the top entries that fit the two-week capacity
//!
//! Nothing survives between calls. The set of allocated dates lives on the
//! stack of a single `generate` call.

pub mod activities;
pub mod allocator;
pub mod priority;
pub mod random;
pub mod urgency;

use std::collections::HashSet;

use chrono::{Duration, Local, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

pub use activities::{adjust_for_closeness, suggest_activities, ACTIVITY_TABLE, DEFAULT_ACTIVITIES};
pub use allocator::{allocate_date, search_window, Allocation, AllocationTier};
pub use priority::priority_score;
pub use random::{FirstPick, RandomSource, SeededRandom, ThreadRandom};
pub use urgency::{days_since, next_hangout_date, target_interval, NEVER_CONTACTED_DAYS};

use crate::model::{Contact, HangoutLabel, SchedulingSettings};

/// Fraction of the target interval after which a contact counts as due soon.
pub const SOON_DUE_FRACTION: f64 = 0.7;
/// Hard cap on results for a forced refresh.
pub const FORCED_RESULT_CAP: usize = 8;
/// Dates up to this many days out count toward the first week.
pub const FIRST_WEEK_DAYS: i64 = 7;

/// Why a contact was recommended. Checked in declaration order; first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonKind {
    /// At least twice the target interval.
    VeryOverdue,
    /// At least the target interval.
    Overdue,
    /// Not overdue, surfaced by a forced refresh.
    ForcedRefresh,
    /// Closeness 8 and up.
    VeryClose,
    /// Closeness 6-7.
    Close,
    Casual,
}

impl ReasonKind {
    pub fn classify(days_since: i64, interval: i64, closeness: u8, force_refresh: bool) -> Self {
        if days_since >= interval * 2 {
            Self::VeryOverdue
        } else if days_since >= interval {
            Self::Overdue
        } else if force_refresh {
            Self::ForcedRefresh
        } else if closeness >= 8 {
            Self::VeryClose
        } else if closeness >= 6 {
            Self::Close
        } else {
            Self::Casual
        }
    }

    /// User-facing justification.
    pub fn describe(self, days_since: i64) -> String {
        match self {
            Self::VeryOverdue | Self::Overdue => format!(
                "It's been {days_since} days since you last hung out - time to reconnect!"
            ),
            Self::ForcedRefresh => format!(
                "It's been {days_since} days since you last hung out. A hangout would be nice!"
            ),
            Self::VeryClose => {
                "You're very close friends - regular hangouts keep the friendship strong!".to_string()
            }
            Self::Close => {
                "Based on your friendship level, it's a good time to catch up.".to_string()
            }
            Self::Casual => "A casual hangout would be nice to maintain your connection.".to_string(),
        }
    }
}

/// A suggested hangout. Built fresh by every `generate` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    #[serde(rename = "friend")]
    pub contact: Contact,
    pub suggested_activities: Vec<String>,
    #[serde(rename = "nextHangoutDate")]
    pub date: NaiveDate,
    pub reason: String,
    pub reason_kind: ReasonKind,
    pub priority: f64,
}

/// Upper bound on the number of recommendations one call returns.
pub fn max_results(weekly_target: u32, force_refresh: bool) -> usize {
    let target = weekly_target as usize;
    if force_refresh {
        (target * 2).min(FORCED_RESULT_CAP)
    } else {
        target.max(1)
    }
}

/// Keep the highest-ranked recommendations that fit the weekly target.
///
/// `ranked` must already be sorted. Each of the two weeks accepts up to
/// `weekly_target` entries. A forced refresh may overfill a week as long as
/// the overall cap from [`max_results`] is not reached.
pub fn apply_weekly_capacity(
    ranked: Vec<Recommendation>,
    today: NaiveDate,
    weekly_target: u32,
    force_refresh: bool,
) -> Vec<Recommendation> {
    let max_total = max_results(weekly_target, force_refresh);
    let per_week = weekly_target as usize;
    let first_week_end = today + Duration::days(FIRST_WEEK_DAYS);

    let mut accepted = Vec::with_capacity(max_total);
    let (mut week1, mut week2) = (0usize, 0usize);

    for rec in ranked {
        if accepted.len() >= max_total {
            break;
        }

        let in_first_week = rec.date <= first_week_end;
        let count = if in_first_week { &mut week1 } else { &mut week2 };

        if *count < per_week || force_refresh {
            *count += 1;
            accepted.push(rec);
        } else {
            tracing::debug!(contact = %rec.contact.name, date = %rec.date, "week is full, dropping");
        }
    }

    accepted
}

/// Copy of `contact` with its last hangout set to `date`.
pub fn update_last_contact(contact: &Contact, date: NaiveDate) -> Contact {
    Contact {
        last_contact: Some(date),
        ..contact.clone()
    }
}

/// Generate recommendations for today with the process random source.
pub fn generate_recommendations(
    contacts: &[Contact],
    labels: &[HangoutLabel],
    settings: &SchedulingSettings,
    force_refresh: bool,
) -> Vec<Recommendation> {
    RecommendationEngine::new().generate(contacts, labels, settings, force_refresh)
}

/// Recommendation pipeline bound to a date and a random source.
#[derive(Debug, Clone)]
pub struct RecommendationEngine<R = ThreadRandom> {
    today: NaiveDate,
    rng: R,
}

impl RecommendationEngine<ThreadRandom> {
    /// Engine for the local calendar date.
    pub fn new() -> Self {
        Self {
            today: Local::now().date_naive(),
            rng: ThreadRandom,
        }
    }
}

impl Default for RecommendationEngine<ThreadRandom> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RandomSource> RecommendationEngine<R> {
    pub fn with_rng(today: NaiveDate, rng: R) -> Self {
        Self { today, rng }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Whether a contact should get a recommendation this round.
    pub fn is_due(&self, contact: &Contact, force_refresh: bool) -> bool {
        if force_refresh {
            return true;
        }
        let since = days_since(contact.last_contact, self.today);
        let interval = target_interval(contact.closeness);
        since >= interval || since as f64 >= interval as f64 * SOON_DUE_FRACTION
    }

    /// Run the full pipeline over a snapshot of contacts, labels, and settings.
    pub fn generate(
        &mut self,
        contacts: &[Contact],
        labels: &[HangoutLabel],
        settings: &SchedulingSettings,
        force_refresh: bool,
    ) -> Vec<Recommendation> {
        let weekdays = settings.preferred_weekdays();
        log_unlabeled_preferences(contacts, labels);

        let mut used_dates = HashSet::new();
        let mut candidates = Vec::new();
        for contact in contacts {
            if !self.is_due(contact, force_refresh) {
                continue;
            }
            candidates.push(self.build_candidate(contact, &weekdays, &mut used_dates, force_refresh));
        }

        let due = candidates.len();
        candidates.sort_by(|a, b| {
            b.priority
                .total_cmp(&a.priority)
                .then_with(|| a.date.cmp(&b.date))
        });

        let accepted = apply_weekly_capacity(
            candidates,
            self.today,
            settings.weekly_hangout_target,
            force_refresh,
        );

        tracing::info!(
            contacts = contacts.len(),
            due,
            accepted = accepted.len(),
            force_refresh,
            "generated recommendations"
        );
        accepted
    }

    fn build_candidate(
        &mut self,
        contact: &Contact,
        weekdays: &[Weekday],
        used_dates: &mut HashSet<NaiveDate>,
        force_refresh: bool,
    ) -> Recommendation {
        let since = days_since(contact.last_contact, self.today);
        let interval = target_interval(contact.closeness);

        let suggested_activities = suggest_activities(contact, &mut self.rng);
        let allocation = allocate_date(
            weekdays,
            self.today,
            search_window(contact.closeness),
            used_dates,
            &mut self.rng,
        );
        used_dates.insert(allocation.date);

        let reason_kind = ReasonKind::classify(since, interval, contact.closeness, force_refresh);
        tracing::debug!(
            contact = %contact.name,
            date = %allocation.date,
            tier = ?allocation.tier,
            reason = ?reason_kind,
            "allocated hangout"
        );

        Recommendation {
            contact: contact.clone(),
            suggested_activities,
            date: allocation.date,
            reason: reason_kind.describe(since),
            reason_kind,
            priority: priority_score(contact, self.today),
        }
    }
}

fn log_unlabeled_preferences(contacts: &[Contact], labels: &[HangoutLabel]) {
    let known: HashSet<&str> = labels.iter().map(|l| l.name.as_str()).collect();
    for contact in contacts {
        for pref in contact.preferences.iter().filter(|p| !known.contains(p.as_str())) {
            tracing::debug!(contact = %contact.name, preference = %pref, "preference has no matching label");
        }
    }
}
