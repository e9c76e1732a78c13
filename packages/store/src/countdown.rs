//! Countdown arithmetic for the anniversary widget.
//!
//! [`TimeLeft::until`] is a pure function of a target and the current time,
//! both as naive local date-times. Once the target has passed the result is
//! all zeros.

use std::time::Duration;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Smallest unit a countdown shows; also decides how often it refreshes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    #[default]
    Seconds,
    Minutes,
}

impl Precision {
    pub fn tick(self) -> Duration {
        match self {
            Precision::Seconds => Duration::from_secs(1),
            Precision::Minutes => Duration::from_secs(60),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TimeLeft {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl TimeLeft {
    pub fn until(target: NaiveDateTime, now: NaiveDateTime) -> Self {
        Self::until_with(target, now, Precision::Seconds)
    }

    pub fn until_with(target: NaiveDateTime, now: NaiveDateTime, precision: Precision) -> Self {
        let total = (target - now).num_seconds();
        if total <= 0 {
            return Self::default();
        }
        let seconds = match precision {
            Precision::Seconds => total % 60,
            Precision::Minutes => 0,
        };
        Self {
            days: total / 86_400,
            hours: (total / 3_600) % 24,
            minutes: (total / 60) % 60,
            seconds,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    /// Labelled, zero-padded fields in display order.
    pub fn fields(&self, precision: Precision) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("Days", format!("{:02}", self.days)),
            ("Hours", format!("{:02}", self.hours)),
            ("Mins", format!("{:02}", self.minutes)),
        ];
        if precision == Precision::Seconds {
            fields.push(("Secs", format!("{:02}", self.seconds)));
        }
        fields
    }
}
