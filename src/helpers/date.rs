//! Date helper functions

use chrono::{DateTime, Datelike, FixedOffset};

/// Placeholder rendered when a document has no publication date
pub const MISSING_DATE: &str = "Invalid Date";

/// Abbreviated month names, January first
const MONTHS_EN: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const MONTHS_PT: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

/// Format a publication date as locale-aware day-month-year ("15 Mar 2021")
pub fn format_date(date: &DateTime<FixedOffset>, language: &str) -> String {
    let months = match language {
        "pt" | "pt-br" | "pt-BR" => &MONTHS_PT,
        _ => &MONTHS_EN,
    };
    let month = months[date.month0() as usize];
    format!("{:02} {} {}", date.day(), month, date.year())
}

/// Format an optional publication date, falling back to a placeholder
///
/// An absent date is tolerated rather than treated as an error: the page
/// still renders, with the placeholder where the date would be.
pub fn format_publication_date(date: Option<&DateTime<FixedOffset>>, language: &str) -> String {
    match date {
        Some(date) => format_date(date, language),
        None => MISSING_DATE.to_string(),
    }
}
