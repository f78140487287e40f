use chrono::Datelike;
use regex::Regex;
use std::sync::OnceLock;

use crate::domain::models::Deadline;

/// Turns free-text deadline strings such as `"~ 02/09(일)"` into
/// `YYYY-MM-DD`.
///
/// A bare `MM/DD` is always stamped with the configured year, even when that
/// day has already passed. Day-of-week suffixes are ignored and month/day
/// values are not range-checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateNormalizer {
    year: i32,
}

impl DateNormalizer {
    pub fn new(year: i32) -> Self {
        Self { year }
    }

    /// Normalizer stamping the current local year.
    pub fn current() -> Self {
        Self::new(chrono::Local::now().year())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn normalize(&self, text: &str) -> Deadline {
        static FULL_DATE: OnceLock<Regex> = OnceLock::new();
        static MONTH_DAY: OnceLock<Regex> = OnceLock::new();
        let full_date = FULL_DATE
            .get_or_init(|| Regex::new(r"(\d{4})[./-](\d{1,2})[./-](\d{1,2})").unwrap());
        let month_day = MONTH_DAY.get_or_init(|| Regex::new(r"(\d{2})/(\d{2})").unwrap());

        // API timestamps carry their own year
        if let Some(caps) = full_date.captures(text) {
            return Deadline::On(format!(
                "{}-{:0>2}-{:0>2}",
                &caps[1], &caps[2], &caps[3]
            ));
        }

        match month_day.captures(text) {
            Some(caps) => Deadline::On(format!("{}-{}-{}", self.year, &caps[1], &caps[2])),
            None => Deadline::Unknown,
        }
    }

    pub fn normalize_opt(&self, text: Option<&str>) -> Deadline {
        text.map(|t| self.normalize(t)).unwrap_or(Deadline::Unknown)
    }
}

impl Default for DateNormalizer {
    fn default() -> Self {
        Self::current()
    }
}
