//! How long since a contact was seen, and how long is too long.

use chrono::{Duration, NaiveDate};

use super::random::RandomSource;
use crate::model::Contact;

/// Days-since value for a contact with no recorded hangout.
pub const NEVER_CONTACTED_DAYS: i64 = 999;

/// Whole days between `last` and `today`.
///
/// Returns [`NEVER_CONTACTED_DAYS`] when there is no last date. A last date
/// in the future counts as "seen today" (0).
pub fn days_since(last: Option<NaiveDate>, today: NaiveDate) -> i64 {
    let Some(last) = last else {
        return NEVER_CONTACTED_DAYS;
    };

    let days = (today - last).num_days();
    if days < 0 {
        tracing::warn!(%last, %today, "last hangout is in the future, treating as today");
        return 0;
    }
    days
}

/// Target days between hangouts for a closeness rating.
///
/// | closeness | interval |
/// |-----------|----------|
/// | 9-10      | 7        |
/// | 7-8       | 14       |
/// | 5-6       | 21       |
/// | 3-4       | 30       |
/// | 1-2       | 60       |
pub fn target_interval(closeness: u8) -> i64 {
    match closeness {
        c if c >= 9 => 7,
        c if c >= 7 => 14,
        c if c >= 5 => 21,
        c if c >= 3 => 30,
        _ => 60,
    }
}

/// Suggested date for the next hangout with a single contact.
///
/// Overdue contacts get a date 1 to 3 days out; everyone else gets
/// `last hangout + target interval`.
pub fn next_hangout_date(
    contact: &Contact,
    today: NaiveDate,
    rng: &mut dyn RandomSource,
) -> NaiveDate {
    let since = days_since(contact.last_contact, today);
    let interval = target_interval(contact.closeness);

    if since >= interval {
        let offset = rng.pick(3) as i64 + 1;
        return today + Duration::days(offset);
    }

    contact.last_contact.unwrap_or(today) + Duration::days(interval)
}
