//! Clock string conversions used for session windows and arrival estimates.
//!
//! Minute values are "minutes since midnight" of a single day. Formatting wraps
//! modulo 24 hours, so a value of 1500 renders as `1:00 AM`: converting back
//! yields 60, not 1500. Arrival estimates that run past midnight rely on that
//! wrap and are only meaningful within one session window.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serializer};
use thiserror::Error;

pub const MINUTES_PER_DAY: u32 = 24 * 60;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClockError {
    #[error("Invalid clock string {0:?}, expected HH:MM")]
    Malformed(String),

    #[error("Clock string {0:?} is outside 00:00-23:59")]
    OutOfRange(String),
}

/// Parse `"HH:MM"` (one or two hour digits) into a [`NaiveTime`].
pub fn parse_clock(value: &str) -> Result<NaiveTime, ClockError> {
    let trimmed = value.trim();
    let (hours, minutes) = trimmed
        .split_once(':')
        .ok_or_else(|| ClockError::Malformed(value.to_string()))?;

    if hours.is_empty() || hours.len() > 2 || minutes.len() != 2 {
        return Err(ClockError::Malformed(value.to_string()));
    }

    let hours: u32 = hours
        .parse()
        .map_err(|_| ClockError::Malformed(value.to_string()))?;
    let minutes: u32 = minutes
        .parse()
        .map_err(|_| ClockError::Malformed(value.to_string()))?;

    NaiveTime::from_hms_opt(hours, minutes, 0)
        .ok_or_else(|| ClockError::OutOfRange(value.to_string()))
}

pub fn time_to_minutes(value: &str) -> Result<u32, ClockError> {
    parse_clock(value).map(clock_minutes)
}

pub fn clock_minutes(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Render minutes since midnight as a 12-hour clock, e.g. `9:05 AM`.
pub fn minutes_to_time(minutes: u32) -> String {
    let hours = (minutes / 60) % 24;
    let mins = minutes % 60;
    let meridiem = if hours >= 12 { "PM" } else { "AM" };
    let hours_12 = match hours % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:{:02} {}", hours_12, mins, meridiem)
}

/// Serde adapter storing a [`NaiveTime`] as `"HH:MM"`.
pub mod hh_mm {
    use super::*;

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_clock(&raw).map_err(serde::de::Error::custom)
    }
}
