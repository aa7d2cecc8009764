//! Calendar arithmetic over naive Gregorian months.
//!
//! Everything in this module is pure: no clock access, no timezones. A
//! requested span (start month + 1 or 2 months) is expanded into an ordered
//! list of [`MonthWindow`] values, and each window knows how many days it has
//! and on which weekday it starts.
//!
//! # Functions
//!
//! - [`days_in_month`] — 28..=31, leap-year aware
//! - [`first_weekday_offset`] — column of the 1st in a Monday-first week
//! - [`resolve_span`] — start + duration → chronological `MonthWindow`s
//! - [`end_of_span`] — last window of a span, used to bound paging

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::{MonthLocale, WeekStartDay};
use crate::error::{EngineError, Result};

const DAYS_PER_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Gregorian leap year rule.
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in a month (zero-based `month_index`).
///
/// # Errors
///
/// Returns [`EngineError::InvalidMonth`] if `month_index > 11`.
///
/// # Examples
///
/// ```
/// use birdlie_engine::window::days_in_month;
///
/// assert_eq!(days_in_month(1, 2024).unwrap(), 29);
/// assert_eq!(days_in_month(1, 1900).unwrap(), 28);
/// assert_eq!(days_in_month(3, 2025).unwrap(), 30);
/// ```
pub fn days_in_month(month_index: u32, year: i32) -> Result<u32> {
    if month_index > 11 {
        return Err(EngineError::InvalidMonth(month_index));
    }
    if month_index == 1 && is_leap_year(year) {
        return Ok(29);
    }
    Ok(DAYS_PER_MONTH[month_index as usize])
}

/// Column (0..=6) of the 1st of the month in a Monday-first week.
///
/// 0 = Monday … 6 = Sunday. See [`MonthWindow::first_weekday_offset`] for a
/// configurable week start.
pub fn first_weekday_offset(month_index: u32, year: i32) -> Result<u32> {
    Ok(MonthWindow::new(month_index, year)?.first_weekday_offset(WeekStartDay::Monday))
}

/// Expand a start month and duration into chronological month windows.
///
/// December rolls over into January of the following year.
///
/// # Errors
///
/// [`EngineError::InvalidMonth`] for a bad start month,
/// [`EngineError::InvalidDuration`] unless `duration_months` is 1 or 2.
///
/// # Examples
///
/// ```
/// use birdlie_engine::window::resolve_span;
///
/// let windows = resolve_span(11, 2025, 2).unwrap();
/// assert_eq!(windows[0].month_index(), 11);
/// assert_eq!(windows[1].month_index(), 0);
/// assert_eq!(windows[1].year(), 2026);
/// ```
pub fn resolve_span(
    start_month_index: u32,
    start_year: i32,
    duration_months: u32,
) -> Result<Vec<MonthWindow>> {
    let duration = SpanDuration::from_months(duration_months)?;
    Ok(Span::new(start_month_index, start_year, duration)?.windows())
}

/// The last month window of a span.
pub fn end_of_span(
    start_month_index: u32,
    start_year: i32,
    duration_months: u32,
) -> Result<MonthWindow> {
    Ok(Span::new(start_month_index, start_year, SpanDuration::from_months(duration_months)?)?.end())
}

// ── MonthWindow ─────────────────────────────────────────────────────────────

/// One concrete month: zero-based month index plus year.
///
/// Ordered chronologically. Construct through [`MonthWindow::new`], which
/// rejects month indices above 11.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawMonthWindow")]
pub struct MonthWindow {
    // Field order drives the derived `Ord`: year first, then month.
    year: i32,
    month_index: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMonthWindow {
    year: i32,
    month_index: u32,
}

impl TryFrom<RawMonthWindow> for MonthWindow {
    type Error = EngineError;

    fn try_from(raw: RawMonthWindow) -> Result<Self> {
        MonthWindow::new(raw.month_index, raw.year)
    }
}

impl MonthWindow {
    pub fn new(month_index: u32, year: i32) -> Result<Self> {
        if month_index > 11 {
            return Err(EngineError::InvalidMonth(month_index));
        }
        // chrono bounds the representable years; stay inside them so the
        // weekday lookup never fails.
        if NaiveDate::from_ymd_opt(year, month_index + 1, 1).is_none()
            || NaiveDate::from_ymd_opt(year, month_index + 1, days_in_month(month_index, year)?)
                .is_none()
        {
            return Err(EngineError::InvalidYear(year));
        }
        Ok(Self { year, month_index })
    }

    pub fn month_index(&self) -> u32 {
        self.month_index
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn days_in_month(&self) -> u32 {
        if self.month_index == 1 && is_leap_year(self.year) {
            29
        } else {
            DAYS_PER_MONTH[self.month_index as usize]
        }
    }

    /// Day numbers `1..=days_in_month`.
    pub fn days(&self) -> RangeInclusive<u32> {
        1..=self.days_in_month()
    }

    pub fn contains_day(&self, day: u32) -> bool {
        self.days().contains(&day)
    }

    /// Validate `day` against this month and return it as a coordinate.
    pub fn coordinate(&self, day: u32) -> Result<DayCoordinate> {
        if !self.contains_day(day) {
            return Err(EngineError::InvalidDay {
                month_index: self.month_index,
                year: self.year,
                day,
            });
        }
        Ok(DayCoordinate {
            month_index: self.month_index,
            day,
        })
    }

    fn first_day(&self) -> NaiveDate {
        // Representable by construction.
        NaiveDate::from_ymd_opt(self.year, self.month_index + 1, 1).unwrap_or_default()
    }

    /// Column (0..=6) of the 1st of this month for the given week start.
    pub fn first_weekday_offset(&self, week_start: WeekStartDay) -> u32 {
        let weekday = self.first_day().weekday();
        match week_start {
            WeekStartDay::Monday => weekday.num_days_from_monday(),
            WeekStartDay::Sunday => weekday.num_days_from_sunday(),
        }
    }

    pub fn label(&self, locale: MonthLocale) -> &'static str {
        locale.month_name(self.month_index)
    }

    /// `"DD.MM"` display string for a day of this month.
    pub fn date_label(&self, day: u32) -> String {
        format!("{:02}.{:02}", day, self.month_index + 1)
    }

    /// The following month, rolling December into January.
    pub fn next(&self) -> Option<MonthWindow> {
        if self.month_index == 11 {
            MonthWindow::new(0, self.year.checked_add(1)?).ok()
        } else {
            MonthWindow::new(self.month_index + 1, self.year).ok()
        }
    }

    /// The preceding month, rolling January back into December.
    pub fn prev(&self) -> Option<MonthWindow> {
        if self.month_index == 0 {
            MonthWindow::new(11, self.year.checked_sub(1)?).ok()
        } else {
            MonthWindow::new(self.month_index - 1, self.year).ok()
        }
    }
}

impl fmt::Display for MonthWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month_index + 1)
    }
}

/// A day within a month, keyed the way calendar entries are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCoordinate {
    pub month_index: u32,
    pub day: u32,
}

// ── Span ────────────────────────────────────────────────────────────────────

/// Number of consecutive months under consideration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SpanDuration {
    #[default]
    OneMonth,
    TwoMonths,
}

impl SpanDuration {
    pub fn from_months(months: u32) -> Result<Self> {
        match months {
            1 => Ok(SpanDuration::OneMonth),
            2 => Ok(SpanDuration::TwoMonths),
            other => Err(EngineError::InvalidDuration(other)),
        }
    }

    /// Parse `"1 Monat"`, `"2 Monate"`, `"1 month"`, `"2 months"`, `"1"` or `"2"`.
    pub fn parse_label(label: &str) -> Result<Self> {
        let normalized = label.trim().to_lowercase();
        let mut parts = normalized.split_whitespace();
        let count = parts.next();
        let unit = parts.next();
        if parts.next().is_some() {
            return Err(EngineError::InvalidSpanLabel(label.to_string()));
        }
        let months: u32 = count
            .and_then(|c| c.parse().ok())
            .ok_or_else(|| EngineError::InvalidSpanLabel(label.to_string()))?;
        match (months, unit) {
            (_, None) => {}
            (1, Some("monat" | "month")) => {}
            (2, Some("monate" | "months")) => {}
            _ => return Err(EngineError::InvalidSpanLabel(label.to_string())),
        }
        SpanDuration::from_months(months)
    }

    pub fn months(self) -> u32 {
        match self {
            SpanDuration::OneMonth => 1,
            SpanDuration::TwoMonths => 2,
        }
    }
}

impl FromStr for SpanDuration {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        SpanDuration::parse_label(s)
    }
}

/// Paging direction for calendar navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Backward,
    Forward,
}

/// A resolved span of one or two consecutive months.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    start: MonthWindow,
    duration: SpanDuration,
}

impl Span {
    pub fn new(start_month_index: u32, start_year: i32, duration: SpanDuration) -> Result<Self> {
        let start = MonthWindow::new(start_month_index, start_year)?;
        let span = Span { start, duration };
        // The second month must be representable too.
        if duration == SpanDuration::TwoMonths && start.next().is_none() {
            return Err(EngineError::InvalidYear(start_year));
        }
        Ok(span)
    }

    pub fn start(&self) -> MonthWindow {
        self.start
    }

    pub fn duration(&self) -> SpanDuration {
        self.duration
    }

    /// Chronological month windows of the span.
    pub fn windows(&self) -> Vec<MonthWindow> {
        let mut windows = vec![self.start];
        if self.duration == SpanDuration::TwoMonths {
            windows.extend(self.start.next());
        }
        windows
    }

    pub fn end(&self) -> MonthWindow {
        match self.duration {
            SpanDuration::OneMonth => self.start,
            SpanDuration::TwoMonths => self.start.next().unwrap_or(self.start),
        }
    }

    pub fn contains(&self, window: MonthWindow) -> bool {
        window >= self.start && window <= self.end()
    }

    /// The neighbouring month in `direction`, or `None` when paging would
    /// leave the span.
    pub fn step(&self, current: MonthWindow, direction: Direction) -> Option<MonthWindow> {
        if !self.contains(current) {
            return None;
        }
        let target = match direction {
            Direction::Backward => current.prev()?,
            Direction::Forward => current.next()?,
        };
        self.contains(target).then_some(target)
    }
}
