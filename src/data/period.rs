use chrono::{DateTime, Month, NaiveDate, NaiveDateTime};

/// Year given to labels that name a month but no year (`Jan`, `february`).
pub const DEFAULT_BARE_MONTH_YEAR: i32 = 2000;

/// Date-time formats, tried before the date-only ones.
pub const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
];

/// Date formats. Month-first before day-first, like the browser `Date` parser.
pub const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%Y/%m/%d",
    "%m-%d-%Y",
    "%d-%m-%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
];

/// Month-granularity formats; the label is pinned to the 1st of the month.
/// `%b` only takes abbreviations, so every name format has a `%B` twin.
/// Two-digit years go first so `Jan-24` is not read as the year 24.
pub const MONTH_FORMATS: &[&str] = &[
    "%Y-%m", "%Y/%m", "%m/%Y", "%m-%Y", "%b-%y", "%B-%y", "%b %y", "%B %y", "%b-%Y", "%B-%Y",
    "%b %Y", "%B %Y",
];

/// Sort key for a period label: dated labels first, chronologically, then
/// unparsable labels in lexical order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum PeriodOrder {
    Dated(NaiveDate),
    Unparsed(String),
}

/// Interprets free-text period labels as calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodCalendar {
    bare_month_year: i32,
}

impl Default for PeriodCalendar {
    fn default() -> Self {
        Self::new(DEFAULT_BARE_MONTH_YEAR)
    }
}

impl PeriodCalendar {
    pub fn new(bare_month_year: i32) -> Self {
        Self { bare_month_year }
    }

    /// Parse a period label to a date, or `None` if no known format matches.
    pub fn parse(&self, label: &str) -> Option<NaiveDate> {
        let s = label.trim();
        if s.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.date_naive());
        }
        for &fmt in DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
                return Some(dt.date());
            }
        }
        for &fmt in DATE_FORMATS {
            if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
                return Some(d);
            }
        }

        // chrono needs a day to build a date
        let pinned = format!("1 {s}");
        for &fmt in MONTH_FORMATS {
            if let Ok(d) = NaiveDate::parse_from_str(&pinned, &format!("%d {fmt}")) {
                return Some(d);
            }
        }

        let month = s.parse::<Month>().ok()?;
        NaiveDate::from_ymd_opt(self.bare_month_year, month.number_from_month(), 1)
    }

    pub fn order_key(&self, label: &str) -> PeriodOrder {
        match self.parse(label) {
            Some(date) => PeriodOrder::Dated(date),
            None => PeriodOrder::Unparsed(label.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_full_dates_and_timestamps() {
        let cal = PeriodCalendar::default();
        assert_eq!(cal.parse("2024-03-15"), Some(ymd(2024, 3, 15)));
        assert_eq!(cal.parse("2024-03-15T10:00:00Z"), Some(ymd(2024, 3, 15)));
        assert_eq!(cal.parse("2024-03-15 08:30:00"), Some(ymd(2024, 3, 15)));
        assert_eq!(cal.parse("03/04/2024"), Some(ymd(2024, 3, 4)));
        assert_eq!(cal.parse("25/04/2024"), Some(ymd(2024, 4, 25)));
        assert_eq!(cal.parse("March 15, 2024"), Some(ymd(2024, 3, 15)));
        assert_eq!(cal.parse("Mar 15, 2024"), Some(ymd(2024, 3, 15)));
        assert_eq!(cal.parse("15 February 2024"), Some(ymd(2024, 2, 15)));
    }

    #[test]
    fn parses_month_granularity_labels() {
        let cal = PeriodCalendar::default();
        assert_eq!(cal.parse("2024-03"), Some(ymd(2024, 3, 1)));
        assert_eq!(cal.parse("Mar 2024"), Some(ymd(2024, 3, 1)));
        assert_eq!(cal.parse("March 2024"), Some(ymd(2024, 3, 1)));
        assert_eq!(cal.parse("January-2024"), Some(ymd(2024, 1, 1)));
        assert_eq!(cal.parse("Jan-24"), Some(ymd(2024, 1, 1)));
        assert_eq!(cal.parse("11/2023"), Some(ymd(2023, 11, 1)));
    }

    #[test]
    fn bare_month_uses_configured_year() {
        assert_eq!(PeriodCalendar::default().parse("Feb"), Some(ymd(2000, 2, 1)));
        assert_eq!(PeriodCalendar::new(2023).parse(" december "), Some(ymd(2023, 12, 1)));
    }

    #[test]
    fn unknown_labels_do_not_parse() {
        let cal = PeriodCalendar::default();
        assert_eq!(cal.parse("Q1"), None);
        assert_eq!(cal.parse(""), None);
        assert_eq!(cal.parse("Total"), None);
    }

    #[test]
    fn unparsed_labels_sort_after_dated_ones_lexically() {
        let cal = PeriodCalendar::default();
        let mut labels = vec!["Total", "Feb", "Q1", "Jan"];
        labels.sort_by_key(|l| cal.order_key(l));
        assert_eq!(labels, vec!["Jan", "Feb", "Q1", "Total"]);
    }
}
