use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// A bookable time-of-day with its 12-hour display label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotDefinition {
    /// "HH:MM", 24-hour. Lexicographic order equals time order.
    pub time: String,
    /// e.g. "5:00 PM"
    pub display: String,
}

impl SlotDefinition {
    fn at(time: NaiveTime) -> Self {
        SlotDefinition {
            time: time.format("%H:%M").to_string(),
            display: time.format("%-I:%M %p").to_string(),
        }
    }
}

/// 30-minute slots from `start` to `end` inclusive.
fn build_catalog(start: NaiveTime, end: NaiveTime) -> Vec<SlotDefinition> {
    let mut slots = Vec::new();
    let mut t = start;
    while t <= end {
        slots.push(SlotDefinition::at(t));
        let (next, wrapped) = t.overflowing_add_signed(chrono::Duration::minutes(30));
        if wrapped != 0 {
            break;
        }
        t = next;
    }
    slots
}

/// Evening window, Monday through Friday.
static WEEKDAY_SLOTS: LazyLock<Vec<SlotDefinition>> = LazyLock::new(|| {
    build_catalog(
        NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
        NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
    )
});

/// All-day window, Saturday and Sunday.
static WEEKEND_SLOTS: LazyLock<Vec<SlotDefinition>> = LazyLock::new(|| {
    build_catalog(
        NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
    )
});

/// The slot catalog for a calendar date. Pure function of day-of-week.
pub fn slots_for_date(date: NaiveDate) -> &'static [SlotDefinition] {
    match date.weekday() {
        Weekday::Sat | Weekday::Sun => &WEEKEND_SLOTS,
        _ => &WEEKDAY_SLOTS,
    }
}

pub fn slot_display(time: &str) -> String {
    NaiveTime::parse_from_str(time, "%H:%M")
        .map(|t| t.format("%-I:%M %p").to_string())
        .unwrap_or_else(|_| time.to_string())
}
