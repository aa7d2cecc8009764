//! Best-day selection: the days on which the most members are fully free.
//!
//! Stricter than highlighting in [`crate::aggregate`]: only
//! [`DayStatus::Free`] counts, partial availability does not.

use serde::Serialize;

use crate::config::CalendarOptions;
use crate::group::Group;
use crate::model::DayStatus;
use crate::window::{MonthWindow, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BestDay {
    pub day: u32,
    pub count: usize,
}

/// Best days of one month, labelled for display. An empty `best_days`
/// means no member is free on any day of the month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthBestDays {
    pub month: &'static str,
    pub month_index: u32,
    pub year: i32,
    pub best_days: Vec<BestDay>,
}

impl MonthBestDays {
    pub fn has_consensus(&self) -> bool {
        !self.best_days.is_empty()
    }
}

/// Number of listed members whose status on `day` is `Free`.
pub fn free_count(group: &Group, month_index: u32, day: u32) -> usize {
    group
        .members()
        .iter()
        .filter(|m| group.get_status(m, month_index, day) == DayStatus::Free)
        .count()
}

/// All days tied at the month's highest free count, ascending by day.
/// Empty when nobody is free on any day.
pub fn compute_best_days(group: &Group, window: MonthWindow) -> Vec<BestDay> {
    let month_index = window.month_index();
    let counts: Vec<BestDay> = window
        .days()
        .map(|day| BestDay {
            day,
            count: free_count(group, month_index, day),
        })
        .collect();

    let max_count = counts.iter().map(|c| c.count).max().unwrap_or(0);
    if max_count == 0 {
        tracing::debug!(month = %window, "no consensus");
        return Vec::new();
    }
    // `window.days()` is ascending, so the filtered list is too.
    counts.into_iter().filter(|c| c.count == max_count).collect()
}

/// Best days for every month of a span, with German month labels.
pub fn compute_span_best_days(group: &Group, span: &Span) -> Vec<MonthBestDays> {
    compute_span_best_days_with_options(group, span, &CalendarOptions::default())
}

/// Best days for every month of a span, in chronological order.
pub fn compute_span_best_days_with_options(
    group: &Group,
    span: &Span,
    options: &CalendarOptions,
) -> Vec<MonthBestDays> {
    span.windows()
        .into_iter()
        .map(|window| MonthBestDays {
            month: window.label(options.locale),
            month_index: window.month_index(),
            year: window.year(),
            best_days: compute_best_days(group, window),
        })
        .collect()
}
