//! Date and status formatting for display

use billed_config::Locale;
use chrono::{DateTime, Datelike, NaiveDate};

use crate::error::{CoreError, CoreResult};
use crate::types::BillStatus;

const FR_MONTHS: [&str; 12] = [
    "Jan", "Fév", "Mar", "Avr", "Mai", "Jui", "Jui", "Aoû", "Sep", "Oct", "Nov", "Déc",
];

const EN_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Parse a bill date. Accepts `YYYY-MM-DD` and RFC 3339 timestamps.
pub fn parse_bill_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|d| d.date_naive()))
}

/// Short month name, capitalized and cut to three characters
pub fn short_month(month: u32, locale: Locale) -> &'static str {
    let months = match locale {
        Locale::Fr => &FR_MONTHS,
        Locale::En => &EN_MONTHS,
    };
    months[(month.clamp(1, 12) - 1) as usize]
}

/// Format a date in the short form used by the bills table: `4 Avr. 04`
pub fn format_naive_date(date: NaiveDate, locale: Locale) -> String {
    format!(
        "{} {}. {:02}",
        date.day(),
        short_month(date.month(), locale),
        date.year().rem_euclid(100)
    )
}

/// Format a raw bill date, failing when it is not a calendar date
pub fn format_date(raw: &str, locale: Locale) -> CoreResult<String> {
    parse_bill_date(raw)
        .map(|date| format_naive_date(date, locale))
        .ok_or_else(|| CoreError::InvalidFormat {
            message: format!("not a date: {:?}", raw),
        })
}

/// Localized status label
pub fn format_status(status: BillStatus, locale: Locale) -> &'static str {
    match (locale, status) {
        (Locale::Fr, BillStatus::Pending) => "En attente",
        (Locale::Fr, BillStatus::Accepted) => "Accepté",
        (Locale::Fr, BillStatus::Refused) => "Refusé",
        (Locale::En, BillStatus::Pending) => "Pending",
        (Locale::En, BillStatus::Accepted) => "Accepted",
        (Locale::En, BillStatus::Refused) => "Refused",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date_french() {
        assert_eq!(format_date("2004-04-04", Locale::Fr).unwrap(), "4 Avr. 04");
        assert_eq!(format_date("2002-02-02", Locale::Fr).unwrap(), "2 Fév. 02");
        assert_eq!(format_date("2021-12-25", Locale::Fr).unwrap(), "25 Déc. 21");
    }

    #[test]
    fn test_format_date_english() {
        assert_eq!(format_date("2004-04-04", Locale::En).unwrap(), "4 Apr. 04");
        assert_eq!(format_date("1999-08-10", Locale::En).unwrap(), "10 Aug. 99");
    }

    #[test]
    fn test_format_date_rfc3339() {
        assert_eq!(format_date("2003-03-03T10:00:00Z", Locale::Fr).unwrap(), "3 Mar. 03");
    }

    #[test]
    fn test_format_date_invalid() {
        assert!(format_date("wrong_date_example", Locale::Fr).is_err());
        assert!(format_date("2004-02-30", Locale::Fr).is_err());
        assert!(format_date("", Locale::Fr).is_err());
    }

    #[test]
    fn test_format_status() {
        assert_eq!(format_status(BillStatus::Pending, Locale::Fr), "En attente");
        assert_eq!(format_status(BillStatus::Accepted, Locale::Fr), "Accepté");
        assert_eq!(format_status(BillStatus::Refused, Locale::Fr), "Refusé");
        assert_eq!(format_status(BillStatus::Refused, Locale::En), "Refused");
    }
}
