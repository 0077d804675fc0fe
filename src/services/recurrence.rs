use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::slot::{slot_display, slots_for_date};
use crate::models::{Booking, BookingRequest};

/// Preview truncation: single recurrence shows 4 occurrences, block
/// recurrence shows 2 weeks, then an "...and N more" line.
const SINGLE_PREVIEW_LIMIT: u32 = 4;
const BLOCK_PREVIEW_LIMIT: u32 = 2;

/// An inclusive time-of-day range selected by two grid clicks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: String,
    pub end: String,
}

impl TimeRange {
    /// Swaps endpoints if the user clicked them in descending order.
    pub fn normalized(&self) -> TimeRange {
        if self.start <= self.end {
            self.clone()
        } else {
            TimeRange {
                start: self.end.clone(),
                end: self.start.clone(),
            }
        }
    }

    pub fn contains(&self, time: &str) -> bool {
        self.start.as_str() <= time && time <= self.end.as_str()
    }
}

/// Repeats every tuple weekly for `weeks` occurrences. Week 0 is the tuple
/// itself; each later week shifts by 7 days, which preserves any day offset
/// a block tuple has relative to its anchor date.
pub fn expand_weekly(base: &[BookingRequest], weeks: u32) -> Vec<BookingRequest> {
    let mut out = Vec::with_capacity(base.len() * weeks as usize);
    for week in 0..weeks {
        for slot in base {
            out.push(BookingRequest {
                facility_id: slot.facility_id.clone(),
                date: slot.date + Duration::weeks(week as i64),
                time: slot.time.clone(),
            });
        }
    }
    out
}

/// All slots across the displayed dates whose time falls inside the range
/// and which are not already booked. Slots missing from a date's catalog
/// are excluded for that date only.
pub fn expand_block(
    facility_id: &str,
    dates: &[NaiveDate],
    range: &TimeRange,
    bookings: &[Booking],
) -> Vec<BookingRequest> {
    let range = range.normalized();
    let mut out = Vec::new();
    for &date in dates {
        for slot in slots_for_date(date) {
            if !range.contains(&slot.time) {
                continue;
            }
            if bookings.iter().any(|b| b.occupies(facility_id, date, &slot.time)) {
                continue;
            }
            out.push(BookingRequest {
                facility_id: facility_id.to_string(),
                date,
                time: slot.time.clone(),
            });
        }
    }
    out
}

/// Preview lines for a single recurring booking: "Mon, Jan 1 - 5:00 PM".
pub fn recurring_preview(anchor: NaiveDate, time: &str, weeks: u32) -> Vec<String> {
    let display = slot_display(time);
    let mut lines: Vec<String> = (0..weeks.min(SINGLE_PREVIEW_LIMIT))
        .map(|week| {
            let date = anchor + Duration::weeks(week as i64);
            format!("{} - {display}", date.format("%a, %b %-d"))
        })
        .collect();
    if weeks > SINGLE_PREVIEW_LIMIT {
        lines.push(format!("...and {} more", weeks - SINGLE_PREVIEW_LIMIT));
    }
    lines
}

/// Preview lines for a recurring block: "Week 1: Jan 1 - 3 slots".
pub fn block_preview(anchor: NaiveDate, block_size: usize, weeks: u32) -> Vec<String> {
    let mut lines: Vec<String> = (0..weeks.min(BLOCK_PREVIEW_LIMIT))
        .map(|week| {
            let date = anchor + Duration::weeks(week as i64);
            format!(
                "Week {}: {} - {block_size} slots",
                week + 1,
                date.format("%b %-d")
            )
        })
        .collect();
    if weeks > BLOCK_PREVIEW_LIMIT {
        lines.push(format!("...and {} more", weeks - BLOCK_PREVIEW_LIMIT));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn request(date: &str, time: &str) -> BookingRequest {
        BookingRequest {
            facility_id: "gym-1".to_string(),
            date: d(date),
            time: time.to_string(),
        }
    }

    fn booking(date: &str, time: &str) -> Booking {
        Booking {
            id: "b-1".to_string(),
            facility_id: "gym-1".to_string(),
            date: d(date),
            time: time.to_string(),
            client_name: "Alice".to_string(),
            client_phone: None,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    #[test]
    fn test_weekly_recurrence_four_mondays() {
        // 2024-01-01 is a Monday
        let expanded = expand_weekly(&[request("2024-01-01", "18:00")], 4);
        let dates: Vec<String> = expanded.iter().map(|r| r.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-01-01", "2024-01-08", "2024-01-15", "2024-01-22"]);
        assert!(expanded.iter().all(|r| r.time == "18:00"));
    }

    #[test]
    fn test_weekly_recurrence_preserves_block_offsets() {
        // Block spans Monday and Tuesday; both offsets must repeat weekly.
        let base = vec![request("2024-01-01", "18:00"), request("2024-01-02", "18:00")];
        let expanded = expand_weekly(&base, 2);
        let dates: Vec<String> = expanded.iter().map(|r| r.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-01-01", "2024-01-02", "2024-01-08", "2024-01-09"]);
    }

    #[test]
    fn test_block_expansion_inclusive_bounds() {
        let range = TimeRange {
            start: "18:00".to_string(),
            end: "19:00".to_string(),
        };
        let block = expand_block("gym-1", &[d("2024-01-01")], &range, &[]);
        let times: Vec<&str> = block.iter().map(|r| r.time.as_str()).collect();
        assert_eq!(times, vec!["18:00", "18:30", "19:00"]);
    }

    #[test]
    fn test_block_expansion_normalizes_reversed_range() {
        let range = TimeRange {
            start: "19:00".to_string(),
            end: "18:00".to_string(),
        };
        let block = expand_block("gym-1", &[d("2024-01-01")], &range, &[]);
        assert_eq!(block.len(), 3);
    }

    #[test]
    fn test_block_expansion_skips_booked_slots() {
        let range = TimeRange {
            start: "18:00".to_string(),
            end: "19:00".to_string(),
        };
        let existing = vec![booking("2024-01-01", "18:30")];
        let block = expand_block("gym-1", &[d("2024-01-01")], &range, &existing);
        let times: Vec<&str> = block.iter().map(|r| r.time.as_str()).collect();
        assert_eq!(times, vec!["18:00", "19:00"]);
    }

    #[test]
    fn test_block_expansion_excludes_slots_missing_from_catalog() {
        // 10:00 exists on Saturday (weekend catalog) but not Monday.
        let range = TimeRange {
            start: "10:00".to_string(),
            end: "10:00".to_string(),
        };
        let dates = [d("2024-01-01"), d("2024-01-06")];
        let block = expand_block("gym-1", &dates, &range, &[]);
        assert_eq!(block.len(), 1);
        assert_eq!(block[0].date, d("2024-01-06"));
    }

    #[test]
    fn test_recurring_preview_truncation() {
        let lines = recurring_preview(d("2024-01-01"), "17:00", 6);
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "Mon, Jan 1 - 5:00 PM");
        assert_eq!(lines[3], "Mon, Jan 22 - 5:00 PM");
        assert_eq!(lines[4], "...and 2 more");
    }

    #[test]
    fn test_recurring_preview_no_suffix_when_short() {
        let lines = recurring_preview(d("2024-01-01"), "17:00", 3);
        assert_eq!(lines.len(), 3);
        assert!(!lines.last().unwrap().starts_with("..."));
    }

    #[test]
    fn test_block_preview_truncation() {
        let lines = block_preview(d("2024-01-01"), 3, 4);
        assert_eq!(
            lines,
            vec![
                "Week 1: Jan 1 - 3 slots",
                "Week 2: Jan 8 - 3 slots",
                "...and 2 more",
            ]
        );
    }
}
