use thiserror::Error;
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

#[derive(Debug, Error)]
pub enum DateError {
    #[error("invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate { value: String },
}

pub fn parse_iso_date(value: &str) -> Result<Date, DateError> {
    Date::parse(value.trim(), ISO_DATE).map_err(|_| DateError::InvalidDate {
        value: value.to_string(),
    })
}

pub fn format_iso_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

pub fn today_utc() -> Date {
    OffsetDateTime::now_utc().date()
}

pub fn now_utc_rfc3339() -> Result<String, time::error::Format> {
    OffsetDateTime::now_utc().format(&Rfc3339)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_iso_date_accepts_calendar_dates() {
        let date = parse_iso_date("2024-06-01").expect("valid date");
        assert_eq!(format_iso_date(date), "2024-06-01");
    }

    #[test]
    fn parse_iso_date_trims_surrounding_whitespace() {
        let date = parse_iso_date(" 2024-06-01 ").expect("valid date");
        assert_eq!(format_iso_date(date), "2024-06-01");
    }

    #[test]
    fn parse_iso_date_rejects_malformed_input() {
        assert!(parse_iso_date("01/06/2024").is_err());
        assert!(parse_iso_date("2024-13-01").is_err());
        assert!(parse_iso_date("tomorrow").is_err());
        assert!(parse_iso_date("").is_err());
    }

    #[test]
    fn format_iso_date_zero_pads_components() {
        let date = parse_iso_date("2026-01-05").expect("valid date");
        assert_eq!(format_iso_date(date), "2026-01-05");
    }

    #[test]
    fn now_utc_rfc3339_formats_timestamp() {
        let value = now_utc_rfc3339().expect("timestamp");
        assert!(value.ends_with('Z'));
        assert!(value.contains('T'));
    }
}
