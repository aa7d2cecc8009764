//! Week-by-week layout of a month.

use serde::Serialize;

use crate::config::WeekStartDay;
use crate::window::MonthWindow;

/// Seven cells, `None` for padding before the 1st and after the last day.
pub type Week = [Option<u32>; 7];

/// A month laid out as rows of weeks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthGrid {
    pub window: MonthWindow,
    pub week_start: WeekStartDay,
    pub weeks: Vec<Week>,
}

/// Lay `window` out as weeks. Leading cells are blank up to the first
/// weekday offset; the last week is padded with blanks to seven cells.
pub fn month_grid(window: MonthWindow, week_start: WeekStartDay) -> MonthGrid {
    let offset = window.first_weekday_offset(week_start) as usize;
    let mut weeks = Vec::with_capacity(6);
    let mut week: Week = [None; 7];
    let mut column = offset;

    for day in window.days() {
        week[column] = Some(day);
        column += 1;
        if column == 7 {
            weeks.push(week);
            week = [None; 7];
            column = 0;
        }
    }
    if column > 0 {
        weeks.push(week);
    }

    MonthGrid {
        window,
        week_start,
        weeks,
    }
}
