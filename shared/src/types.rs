//! Common types used across the planner

use chrono::{Month, NaiveDate};

/// Calendar months in order, January first
pub const MONTHS: std::ops::RangeInclusive<u32> = 1..=12;

/// Check a month number is in 1..=12
pub fn is_valid_month(month: u32) -> bool {
    MONTHS.contains(&month)
}

/// English month name, or an empty string for an invalid month number
pub fn month_name(month: u32) -> &'static str {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
        .unwrap_or("")
}

/// Last calendar day of a month
pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    if !is_valid_month(month) {
        return None;
    }
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}
