//! Date handling for the date-scoped endpoints
//!
//! The backend keys words by `D/M/YYYY` with no zero padding, e.g. `6/7/2024`.

use chrono::{Datelike, NaiveDate};

use crate::error::{Error, Result};

pub fn format_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.day(), date.month(), date.year())
}

/// Parse `D/M/YYYY`; zero-padded input is accepted too.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%d/%m/%Y")
        .map_err(|_| Error::Validation(format!("Invalid date '{}', expected D/M/YYYY", input.trim())))
}

/// Parse a comma-separated date list such as `6/7/2024, 8/7/2024`
pub fn parse_date_list(input: &str) -> Result<Vec<NaiveDate>> {
    let dates: Vec<NaiveDate> = input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(parse_date)
        .collect::<Result<_>>()?;

    if dates.is_empty() {
        return Err(Error::Validation("Please enter at least one date".to_string()));
    }
    Ok(dates)
}

/// Month number as sent to `/words/month/{M}`
pub fn validate_month(month: u32) -> Result<u32> {
    if (1..=12).contains(&month) {
        Ok(month)
    } else {
        Err(Error::Validation(format!("Invalid month {}, expected 1-12", month)))
    }
}
