use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::slot::slots_for_date;
use crate::models::Booking;
use crate::services::recurrence::TimeRange;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    Available,
    Booked,
    Selected,
    Unavailable,
}

/// Client display data attached to a booked cell; `booking_id` is the
/// cancel affordance.
#[derive(Debug, Clone, Serialize)]
pub struct BookedCell {
    pub booking_id: String,
    pub client_name: String,
    pub client_phone: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GridCell {
    pub date: NaiveDate,
    pub status: SlotStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking: Option<BookedCell>,
}

/// One slot row across all displayed dates.
#[derive(Debug, Clone, Serialize)]
pub struct GridRow {
    pub time: String,
    pub display: String,
    pub cells: Vec<GridCell>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DayStats {
    pub date: NaiveDate,
    pub total_bookings: usize,
    pub available_slots: usize,
    pub occupancy_pct: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct AvailabilityGrid {
    pub facility_id: String,
    pub dates: Vec<NaiveDate>,
    pub rows: Vec<GridRow>,
    pub stats: Vec<DayStats>,
}

/// Builds the displayed grid for one facility over a set of dates.
///
/// Rows are the union of every slot appearing in any date's catalog, sorted
/// by time ascending. A slot missing from a given date's catalog renders as
/// `unavailable` for that date only.
pub fn build_grid(
    facility_id: &str,
    dates: &[NaiveDate],
    bookings: &[Booking],
    selection: Option<&TimeRange>,
) -> AvailabilityGrid {
    let selection = selection.map(|r| r.normalized());

    // time -> display label; BTreeMap keeps rows sorted by time.
    let mut union: BTreeMap<String, String> = BTreeMap::new();
    for &date in dates {
        for slot in slots_for_date(date) {
            union.entry(slot.time.clone()).or_insert_with(|| slot.display.clone());
        }
    }

    let rows: Vec<GridRow> = union
        .into_iter()
        .map(|(time, display)| {
            let cells = dates
                .iter()
                .map(|&date| {
                    let in_catalog = slots_for_date(date).iter().any(|s| s.time == time);
                    if !in_catalog {
                        return GridCell {
                            date,
                            status: SlotStatus::Unavailable,
                            booking: None,
                        };
                    }
                    if let Some(b) = bookings
                        .iter()
                        .find(|b| b.occupies(facility_id, date, &time))
                    {
                        return GridCell {
                            date,
                            status: SlotStatus::Booked,
                            booking: Some(BookedCell {
                                booking_id: b.id.clone(),
                                client_name: b.client_name.clone(),
                                client_phone: b.client_phone.clone(),
                            }),
                        };
                    }
                    let selected = selection.as_ref().is_some_and(|r| r.contains(&time));
                    GridCell {
                        date,
                        status: if selected {
                            SlotStatus::Selected
                        } else {
                            SlotStatus::Available
                        },
                        booking: None,
                    }
                })
                .collect();
            GridRow { time, display, cells }
        })
        .collect();

    let stats = dates
        .iter()
        .map(|&date| {
            let catalog_len = slots_for_date(date).len();
            let booked = bookings
                .iter()
                .filter(|b| b.facility_id == facility_id && b.date == date)
                .count();
            DayStats {
                date,
                total_bookings: booked,
                available_slots: catalog_len.saturating_sub(booked),
                occupancy_pct: if catalog_len == 0 {
                    0
                } else {
                    ((booked as f64 / catalog_len as f64) * 100.0).round() as u32
                },
            }
        })
        .collect();

    AvailabilityGrid {
        facility_id: facility_id.to_string(),
        dates: dates.to_vec(),
        rows,
        stats,
    }
}
