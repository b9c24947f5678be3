use chrono::{Datelike, NaiveDate};

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

const MONTHS: [&str; 12] = [
    "января",
    "февраля",
    "марта",
    "апреля",
    "мая",
    "июня",
    "июля",
    "августа",
    "сентября",
    "октября",
    "ноября",
    "декабря",
];

/// Formats an ISO date as `25 мая 2023 г.`.
///
/// Blank input yields an empty string rather than a placeholder. Input that
/// is not an ISO date is returned trimmed but otherwise untouched.
pub fn format_long_date(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    match NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT) {
        Ok(date) => format!(
            "{} {} {} г.",
            date.day(),
            MONTHS[date.month0() as usize],
            date.year()
        ),
        Err(_) => trimmed.to_string(),
    }
}
