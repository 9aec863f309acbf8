//! Deterministic calendar cycles: planetary hours and lunar phase.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// Classical planets in Chaldean order (slowest first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Planet {
    Saturn,
    Jupiter,
    Mars,
    Sun,
    Venus,
    Mercury,
    Moon,
}

impl Planet {
    pub const CHALDEAN: [Planet; 7] = [
        Self::Saturn,
        Self::Jupiter,
        Self::Mars,
        Self::Sun,
        Self::Venus,
        Self::Mercury,
        Self::Moon,
    ];

    /// Position in the Chaldean cycle, 0..7.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Ruler of the first hour of the day.
    pub fn day_ruler(day: Weekday) -> Self {
        match day {
            Weekday::Sun => Self::Sun,
            Weekday::Mon => Self::Moon,
            Weekday::Tue => Self::Mars,
            Weekday::Wed => Self::Mercury,
            Weekday::Thu => Self::Jupiter,
            Weekday::Fri => Self::Venus,
            Weekday::Sat => Self::Saturn,
        }
    }

    /// Strength bonus of the hour ruler.
    pub fn hour_bonus(self) -> f64 {
        match self {
            Self::Jupiter => 20.0,
            Self::Venus => 15.0,
            Self::Sun => 12.0,
            Self::Moon => 10.0,
            Self::Mercury => 8.0,
            Self::Mars => 5.0,
            Self::Saturn => 3.0,
        }
    }
}

/// Planetary days begin at this hour; hours are equal-length.
const DAY_START_HOUR: u32 = 6;

/// Ruler of the planetary hour containing `hour` on `date`.
/// Hours before dawn belong to the previous planetary day.
pub fn planetary_hour(date: NaiveDate, hour: u32) -> Planet {
    let hour = hour % 24;
    let (day, offset) = if hour >= DAY_START_HOUR {
        (date.weekday(), hour - DAY_START_HOUR)
    } else {
        (date.weekday().pred(), hour + 24 - DAY_START_HOUR)
    };
    let start = Planet::day_ruler(day).index();
    Planet::CHALDEAN[(start + offset as usize) % 7]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoonPhase {
    New,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    Full,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl MoonPhase {
    const ORDER: [MoonPhase; 8] = [
        Self::New,
        Self::WaxingCrescent,
        Self::FirstQuarter,
        Self::WaxingGibbous,
        Self::Full,
        Self::WaningGibbous,
        Self::LastQuarter,
        Self::WaningCrescent,
    ];

    pub fn bonus(self) -> f64 {
        match self {
            Self::New | Self::Full => 15.0,
            Self::FirstQuarter | Self::LastQuarter => 8.0,
            _ => 5.0,
        }
    }
}

pub const SYNODIC_MONTH_DAYS: f64 = 29.530_588_853;

fn reference_new_moon() -> NaiveDateTime {
    // 2000-01-06 18:14 UTC
    NaiveDate::from_ymd_opt(2000, 1, 6)
        .and_then(|d| d.and_hms_opt(18, 14, 0))
        .unwrap_or_default()
}

/// Days since the last new moon, in `[0, SYNODIC_MONTH_DAYS)`.
pub fn moon_age(at: NaiveDateTime) -> f64 {
    let elapsed = (at - reference_new_moon()).num_seconds() as f64 / 86_400.0;
    elapsed.rem_euclid(SYNODIC_MONTH_DAYS)
}

pub fn moon_phase(at: NaiveDateTime) -> MoonPhase {
    let octant = (moon_age(at) / SYNODIC_MONTH_DAYS * 8.0 + 0.5).floor() as usize % 8;
    MoonPhase::ORDER[octant]
}

/// Illuminated fraction in `[0, 1]`.
pub fn moon_illumination(at: NaiveDateTime) -> f64 {
    let angle = moon_age(at) / SYNODIC_MONTH_DAYS * std::f64::consts::TAU;
    (1.0 - angle.cos()) / 2.0
}

pub fn at_hour(date: NaiveDate, hour: u32) -> NaiveDateTime {
    date.and_time(NaiveTime::from_hms_opt(hour % 24, 0, 0).unwrap_or(NaiveTime::MIN))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn first_hour_is_ruled_by_the_day_ruler() {
        // 2025-01-09 is a Thursday.
        assert_eq!(planetary_hour(d(2025, 1, 9), 6), Planet::Jupiter);
        // Next hour follows the Chaldean sequence.
        assert_eq!(planetary_hour(d(2025, 1, 9), 7), Planet::Mars);
    }

    #[test]
    fn hours_before_dawn_belong_to_previous_day() {
        // Friday 02:00 is the 20th hour of Thursday.
        assert_eq!(
            planetary_hour(d(2025, 1, 10), 2),
            Planet::CHALDEAN[(Planet::Jupiter.index() + 20) % 7]
        );
    }

    #[test]
    fn next_day_ruler_follows_after_24_hours() {
        // 24 hours after a Thursday dawn is Friday dawn, ruled by Venus.
        assert_eq!(
            Planet::CHALDEAN[(Planet::Jupiter.index() + 24) % 7],
            Planet::Venus
        );
    }

    #[test]
    fn known_lunations() {
        // 2024-04-08 eclipse new moon, 2024-04-23 full moon.
        assert_eq!(moon_phase(at_hour(d(2024, 4, 8), 18)), MoonPhase::New);
        assert_eq!(moon_phase(at_hour(d(2024, 4, 23), 23)), MoonPhase::Full);
        assert!(moon_illumination(at_hour(d(2024, 4, 23), 23)) > 0.95);
        assert!(moon_illumination(at_hour(d(2024, 4, 8), 18)) < 0.05);
    }
}
