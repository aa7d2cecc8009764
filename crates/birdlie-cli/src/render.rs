//! Text and JSON rendering of engine output.

use std::fmt::Write;

use anyhow::Result;
use birdlie_engine::{
    CalendarOptions, Group, MemberId, MonthBestDays, MonthGrid, MonthLocale, MonthStats, Span,
    WeekStartDay,
};
use clap::ValueEnum;
use serde::Serialize;

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

fn json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(format!("{}\n", serde_json::to_string_pretty(value)?))
}

fn names(group: &Group, members: &[MemberId]) -> String {
    members
        .iter()
        .map(|m| group.display_name(m))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn stats(group: &Group, months: &[MonthStats], format: Format) -> Result<String> {
    if format == Format::Json {
        return json(months);
    }
    let mut out = String::new();
    for month in months {
        writeln!(out, "{} {}", month.month, month.year)?;
        let mut any = false;
        for stat in &month.stats {
            if stat.voted_percentage == 0 && stat.notes.is_empty() {
                continue;
            }
            any = true;
            let marker = if stat.is_highlighted { "*" } else { " " };
            write!(out, "  {} {:>3}% {}", stat.date, stat.voted_percentage, marker)?;
            if !stat.free_members.is_empty() {
                write!(out, "  free: {}", names(group, &stat.free_members))?;
            }
            if !stat.partial_members.is_empty() {
                write!(out, "  partial: {}", names(group, &stat.partial_members))?;
            }
            writeln!(out)?;
            for note in &stat.notes {
                writeln!(
                    out,
                    "      [{}] {}: {}",
                    note.timestamp,
                    group.display_name(&note.user),
                    note.text
                )?;
            }
        }
        if !any {
            writeln!(out, "  no votes")?;
        }
    }
    Ok(out)
}

pub fn best_days(months: &[MonthBestDays], format: Format) -> Result<String> {
    if format == Format::Json {
        return json(months);
    }
    let mut out = String::new();
    for month in months {
        match month.best_days.first() {
            None => writeln!(out, "{} {}: no consensus", month.month, month.year)?,
            Some(first) => {
                let days = month
                    .best_days
                    .iter()
                    .map(|b| b.day.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                writeln!(
                    out,
                    "{} {}: {} ({} free)",
                    month.month, month.year, days, first.count
                )?;
            }
        }
    }
    Ok(out)
}

fn weekday_header(options: &CalendarOptions) -> [&'static str; 7] {
    let monday_first = match options.locale {
        MonthLocale::German => ["Mo", "Di", "Mi", "Do", "Fr", "Sa", "So"],
        MonthLocale::English => ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"],
    };
    match options.week_start {
        WeekStartDay::Monday => monday_first,
        WeekStartDay::Sunday => {
            let mut rotated = monday_first;
            rotated.rotate_right(1);
            rotated
        }
    }
}

pub fn grid(grid: &MonthGrid, options: &CalendarOptions, format: Format) -> Result<String> {
    if format == Format::Json {
        return json(grid);
    }
    let mut out = String::new();
    writeln!(
        out,
        "{} {}",
        grid.window.label(options.locale),
        grid.window.year()
    )?;
    writeln!(out, "{}", weekday_header(options).join(" "))?;
    for week in &grid.weeks {
        let cells: Vec<String> = week
            .iter()
            .map(|cell| cell.map_or_else(|| "  ".to_string(), |d| format!("{d:>2}")))
            .collect();
        writeln!(out, "{}", cells.join(" ").trim_end())?;
    }
    Ok(out)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SpanMonth {
    month: &'static str,
    month_index: u32,
    year: i32,
    days: u32,
}

pub fn span(span: &Span, options: &CalendarOptions, format: Format) -> Result<String> {
    let months: Vec<SpanMonth> = span
        .windows()
        .into_iter()
        .map(|w| SpanMonth {
            month: w.label(options.locale),
            month_index: w.month_index(),
            year: w.year(),
            days: w.days_in_month(),
        })
        .collect();
    if format == Format::Json {
        return json(&months);
    }
    let mut out = String::new();
    for m in &months {
        writeln!(out, "{} {} ({} days)", m.month, m.year, m.days)?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use birdlie_engine::{compute_span_best_days, month_grid, MonthWindow, SpanDuration};

    #[test]
    fn test_weekday_header_sunday_start() {
        let options = CalendarOptions {
            week_start: WeekStartDay::Sunday,
            locale: MonthLocale::English,
        };
        assert_eq!(weekday_header(&options)[0], "Su");
        assert_eq!(weekday_header(&options)[1], "Mo");
    }

    #[test]
    fn test_grid_text_rows() {
        let window = MonthWindow::new(3, 2025).unwrap();
        let text = grid(
            &month_grid(window, WeekStartDay::Monday),
            &CalendarOptions::default(),
            Format::Text,
        )
        .unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "April 2025");
        assert_eq!(lines[1], "Mo Di Mi Do Fr Sa So");
        assert_eq!(lines[2], "    1  2  3  4  5  6");
        assert_eq!(lines.last().copied(), Some("28 29 30"));
    }

    #[test]
    fn test_best_days_text_no_consensus() {
        let group = Group::new("G", ["Ana"]).unwrap();
        let span = Span::new(3, 2025, SpanDuration::OneMonth).unwrap();
        let text = best_days(&compute_span_best_days(&group, &span), Format::Text).unwrap();
        assert_eq!(text, "April 2025: no consensus\n");
    }
}
