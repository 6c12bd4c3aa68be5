//! Flip clock face

use chrono::{DateTime, Local, TimeZone, Timelike};
use serde::Serialize;

/// Digits shown on the flip cards for one moment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockFace {
    pub hours: String,
    pub minutes: String,
    pub hour_digits: [char; 2],
    pub minute_digits: [char; 2],
    /// Hour cards flip on even seconds, minute cards on odd ones
    pub flip_hours: bool,
}

impl ClockFace {
    pub fn at<Tz: TimeZone>(time: &DateTime<Tz>) -> Self {
        let hour = time.hour();
        let minute = time.minute();
        Self {
            hours: format!("{:02}", hour),
            minutes: format!("{:02}", minute),
            hour_digits: two_digits(hour),
            minute_digits: two_digits(minute),
            flip_hours: time.second() % 2 == 0,
        }
    }

    pub fn now() -> Self {
        Self::at(&Local::now())
    }
}

fn two_digits(value: u32) -> [char; 2] {
    let tens = char::from_digit(value / 10 % 10, 10).unwrap_or('0');
    let ones = char::from_digit(value % 10, 10).unwrap_or('0');
    [tens, ones]
}
