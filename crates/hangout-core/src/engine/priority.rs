//! Ranking score for candidate recommendations.
//!
//! `score = 0.7 * (days_since / target_interval) + 0.3 * (closeness / 10)`
//!
//! The overdue term is a ratio rather than a flag, so a contact far past
//! their interval outranks one that is barely past it.

use chrono::NaiveDate;

use super::urgency::{days_since, target_interval};
use crate::model::Contact;

/// Weight of the overdue ratio.
pub const OVERDUE_WEIGHT: f64 = 0.7;
/// Weight of normalized closeness.
pub const CLOSENESS_WEIGHT: f64 = 0.3;

/// Priority score for a contact. Higher is more urgent.
pub fn priority_score(contact: &Contact, today: NaiveDate) -> f64 {
    let overdue_ratio = days_since(contact.last_contact, today) as f64
        / target_interval(contact.closeness) as f64;
    let closeness = f64::from(contact.closeness) / 10.0;

    overdue_ratio * OVERDUE_WEIGHT + closeness * CLOSENESS_WEIGHT
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn seen_days_ago(closeness: u8, days: i64) -> Contact {
        Contact::new("x", closeness).with_last_contact(today() - Duration::days(days))
    }

    #[test]
    fn exact_weighting() {
        // 14 / 7 * 0.7 + 0.9 * 0.3
        let score = priority_score(&seen_days_ago(9, 14), today());
        assert!((score - (2.0 * 0.7 + 0.27)).abs() < 1e-9);
    }

    #[test]
    fn never_contacted_uses_sentinel() {
        let score = priority_score(&Contact::new("x", 1), today());
        assert!((score - (999.0 / 60.0 * 0.7 + 0.03)).abs() < 1e-9);
    }

    #[test]
    fn far_overdue_outranks_barely_overdue() {
        let far = priority_score(&seen_days_ago(5, 60), today());
        let barely = priority_score(&seen_days_ago(9, 8), today());
        assert!(far > barely);
    }

    #[test]
    fn closeness_breaks_equal_ratios() {
        let closer = priority_score(&seen_days_ago(10, 7), today());
        let less = priority_score(&seen_days_ago(9, 7), today());
        assert!(closer > less);
    }
}
