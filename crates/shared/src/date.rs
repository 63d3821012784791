use chrono::{Local, NaiveDate};

pub const DAYS_IN_PLAN: usize = 7;

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Seven consecutive calendar days starting at `start`.
pub fn week_from(start: NaiveDate) -> Vec<NaiveDate> {
    start
        .iter_days()
        .take(DAYS_IN_PLAN)
        .collect()
}

pub fn parse_iso_date(value: &str) -> crate::Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| crate::Error::Unknown(anyhow::anyhow!("invalid date '{value}': {e}")))
}

pub fn days_until(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}
