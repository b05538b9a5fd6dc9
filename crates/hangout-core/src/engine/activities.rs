//! Activity suggestions from a contact's preferred hangout labels.
//!
//! The closeness adjustment is a wording heuristic keyed on English words in
//! the built-in table ("coffee", "walk", "afternoon", ...). Editing the table
//! text changes which suggestions get adjusted.

use super::random::RandomSource;
use crate::model::Contact;

/// Most suggestions returned for one contact.
pub const MAX_SUGGESTIONS: usize = 3;

/// Built-in activities per label name, in lookup order.
pub const ACTIVITY_TABLE: &[(&str, [&str; 5])] = &[
    (
        "Dining",
        [
            "Try that new restaurant you both wanted to visit",
            "Cook a meal together at home",
            "Explore a food market or food truck festival",
            "Have brunch at a cozy café",
            "Order from your favorite takeout and catch up",
        ],
    ),
    (
        "Museums",
        [
            "Visit the local art museum",
            "Check out a new exhibition downtown",
            "Explore a science or history museum",
            "Take a guided museum tour together",
            "Visit a small gallery in your neighborhood",
        ],
    ),
    (
        "Night Life",
        [
            "Go bar hopping in the entertainment district",
            "Try a new cocktail bar",
            "Attend a live music venue",
            "Check out a comedy show",
            "Go dancing at a fun club",
        ],
    ),
    (
        "Bars",
        [
            "Happy hour at your favorite spot",
            "Try a new brewery or distillery",
            "Rooftop bar with a view",
            "Sports bar to watch the game",
            "Quiet wine bar for good conversation",
        ],
    ),
    (
        "Neighborhood Walk",
        [
            "Take a long walk through the park",
            "Explore a new neighborhood together",
            "Walk along the waterfront or scenic route",
            "Stroll through downtown and window shop",
            "Take a nature walk or hiking trail",
        ],
    ),
    (
        "Coffee",
        [
            "Morning coffee at a new café",
            "Afternoon coffee and pastries",
            "Coffee shop with board games",
            "Outdoor café with people watching",
            "Cozy bookstore café",
        ],
    ),
    (
        "Movies",
        [
            "Movie night at home with snacks",
            "Catch the latest blockbuster",
            "Watch a classic film together",
            "Attend an outdoor movie screening",
            "Binge-watch a series together",
        ],
    ),
    (
        "Sports",
        [
            "Play tennis or basketball",
            "Go bowling or mini golf",
            "Watch a game at a sports bar",
            "Try a new fitness class together",
            "Go for a bike ride",
        ],
    ),
    (
        "Shopping",
        [
            "Browse the local farmers market",
            "Go thrift shopping or vintage hunting",
            "Mall trip with lunch",
            "Explore local boutiques",
            "Holiday or seasonal shopping",
        ],
    ),
    (
        "Concerts",
        [
            "Check out a local band",
            "Attend a concert at a nearby venue",
            "Music festival or outdoor concert",
            "Jazz club or intimate music venue",
            "Free concert in the park",
        ],
    ),
];

/// Suggestions for contacts without any preferred labels.
pub const DEFAULT_ACTIVITIES: [&str; 5] = [
    "Grab coffee and catch up",
    "Take a walk and chat",
    "Meet for lunch",
    "Visit a local park",
    "Try something new together",
];

/// Activities for a label name, if the table knows it.
pub fn activities_for(label: &str) -> Option<&'static [&'static str]> {
    ACTIVITY_TABLE
        .iter()
        .find(|(name, _)| *name == label)
        .map(|(_, activities)| activities.as_slice())
}

/// Pick 2-3 activity suggestions for a contact.
///
/// One random activity per known preference, topped up from labels the
/// contact didn't pick when fewer than two were found, then reworded for
/// the contact's closeness.
pub fn suggest_activities(contact: &Contact, rng: &mut dyn RandomSource) -> Vec<String> {
    if contact.preferences.is_empty() {
        return DEFAULT_ACTIVITIES[..MAX_SUGGESTIONS]
            .iter()
            .map(|s| s.to_string())
            .collect();
    }

    let mut suggestions: Vec<&str> = contact
        .preferences
        .iter()
        .filter_map(|pref| activities_for(pref))
        .map(|activities| activities[rng.pick(activities.len())])
        .collect();

    if suggestions.len() < 2 {
        let mut unused: Vec<&[&str]> = ACTIVITY_TABLE
            .iter()
            .filter(|(name, _)| !contact.preferences.iter().any(|p| p == name))
            .map(|(_, activities)| activities.as_slice())
            .collect();

        while suggestions.len() < MAX_SUGGESTIONS && !unused.is_empty() {
            let activities = unused.remove(rng.pick(unused.len()));
            suggestions.push(activities[rng.pick(activities.len())]);
        }
    }

    suggestions
        .into_iter()
        .map(|activity| adjust_for_closeness(activity, contact.closeness))
        .take(MAX_SUGGESTIONS)
        .collect()
}

/// Reword an activity for how close the contact is.
///
/// 8 and up stretches coffee, walks and restaurant visits; 6-7 leaves text
/// alone; below 6 shortens "afternoon" and "long" plans.
pub fn adjust_for_closeness(activity: &str, closeness: u8) -> String {
    if closeness >= 8 {
        if activity.contains("coffee") {
            return format!("{activity} and spend the whole afternoon together");
        }
        if activity.contains("walk") {
            return format!("{activity} and have deep conversations");
        }
        if activity.contains("restaurant") {
            return format!("{activity} and try the tasting menu");
        }
        activity.to_string()
    } else if closeness >= 6 {
        activity.to_string()
    } else if activity.contains("afternoon") {
        activity.replacen("afternoon", "quick", 1)
    } else if activity.contains("long") {
        activity.replacen("long", "short", 1)
    } else {
        activity.to_string()
    }
}
