//! Presentation-neutral engine options.
//!
//! The engine has no global state. Anything that varies between callers
//! (which day a week starts on, which language month labels use) is passed
//! in explicitly through [`CalendarOptions`].

use serde::{Deserialize, Serialize};

/// Which day begins a week in the calendar grid and weekday offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStartDay {
    /// ISO 8601 (Monday = column 0).
    #[default]
    Monday,
    /// US/Canada convention (Sunday = column 0).
    Sunday,
}

/// Language used for month labels in per-month output groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonthLocale {
    #[default]
    #[serde(alias = "de")]
    German,
    #[serde(alias = "en")]
    English,
}

const MONTHS_DE: [&str; 12] = [
    "Januar",
    "Februar",
    "März",
    "April",
    "Mai",
    "Juni",
    "Juli",
    "August",
    "September",
    "Oktober",
    "November",
    "Dezember",
];

const MONTHS_EN: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

impl MonthLocale {
    /// Month label for a zero-based month index. Out-of-range indices wrap.
    pub fn month_name(self, month_index: u32) -> &'static str {
        let table = match self {
            MonthLocale::German => &MONTHS_DE,
            MonthLocale::English => &MONTHS_EN,
        };
        table[(month_index % 12) as usize]
    }

    /// Reverse lookup of [`MonthLocale::month_name`], case-insensitive.
    pub fn month_index(self, name: &str) -> Option<u32> {
        let table = match self {
            MonthLocale::German => &MONTHS_DE,
            MonthLocale::English => &MONTHS_EN,
        };
        let name = name.trim().to_lowercase();
        table
            .iter()
            .position(|m| m.to_lowercase() == name)
            .map(|i| i as u32)
    }
}

/// Options threaded through grid layout and labelled span output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarOptions {
    pub week_start: WeekStartDay,
    pub locale: MonthLocale,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_are_monday_german() {
        let opts = CalendarOptions::default();
        assert_eq!(opts.week_start, WeekStartDay::Monday);
        assert_eq!(opts.locale, MonthLocale::German);
    }

    #[test]
    fn test_month_names() {
        assert_eq!(MonthLocale::German.month_name(2), "März");
        assert_eq!(MonthLocale::English.month_name(2), "March");
        assert_eq!(MonthLocale::German.month_name(11), "Dezember");
    }

    #[test]
    fn test_month_index_lookup() {
        assert_eq!(MonthLocale::German.month_index("april"), Some(3));
        assert_eq!(MonthLocale::German.month_index("MÄRZ"), Some(2));
        assert_eq!(MonthLocale::English.month_index("December"), Some(11));
        assert_eq!(MonthLocale::English.month_index("Smarch"), None);
    }

    #[test]
    fn test_locale_serde_aliases() {
        let locale: MonthLocale = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(locale, MonthLocale::English);
        let week: WeekStartDay = serde_json::from_str("\"sunday\"").unwrap();
        assert_eq!(week, WeekStartDay::Sunday);
    }
}
