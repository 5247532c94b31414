use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use chrono_tz::Tz;

/// A block of days sharing the same opening hours, in whole local hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpeningHours {
    pub label: &'static str,
    pub days: &'static [Weekday],
    pub opens_at: u32,
    pub closes_at: u32,
}

pub fn is_open_at(schedule: &[OpeningHours], time_zone: Tz, instant: DateTime<Utc>) -> bool {
    let local = instant.with_timezone(&time_zone);
    let (weekday, hour) = (local.weekday(), local.hour());
    schedule
        .iter()
        .any(|block| block.days.contains(&weekday) && hour >= block.opens_at && hour < block.closes_at)
}

pub fn describe(schedule: &[OpeningHours], time_zone: Tz, instant: DateTime<Utc>) -> String {
    let abbreviation = instant.with_timezone(&time_zone).format("%Z");
    let labels: Vec<&str> = schedule.iter().map(|block| block.label).collect();
    format!("{} {}", labels.join(", "), abbreviation)
}
