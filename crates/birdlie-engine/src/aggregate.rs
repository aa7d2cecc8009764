//! Per-day vote aggregation across a group.
//!
//! [`compute_day_stats`] folds every member's calendar over one month and
//! reports, for each day, who is free, who is partially free, the share of
//! members who voted at all, and the merged note list. Days tied at the
//! month's highest percentage are highlighted.
//!
//! Months are always evaluated independently: in a two-month span each
//! month has its own maximum.

use std::collections::HashSet;

use serde::Serialize;

use crate::config::CalendarOptions;
use crate::group::Group;
use crate::model::{DayStatus, MemberId, NoteEntry};
use crate::window::{MonthWindow, Span};

/// Aggregated view of one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayStat {
    pub day: u32,
    /// `"DD.MM"`.
    pub date: String,
    pub free_members: Vec<MemberId>,
    pub partial_members: Vec<MemberId>,
    /// 0..=100.
    pub voted_percentage: u8,
    pub is_highlighted: bool,
    pub notes: Vec<NoteEntry>,
}

/// Day stats of one month, labelled for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthStats {
    pub month: &'static str,
    pub month_index: u32,
    pub year: i32,
    pub stats: Vec<DayStat>,
}

/// One day of a single member's calendar as shown to that member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDay {
    pub day: u32,
    pub status: DayStatus,
    pub user: Option<MemberId>,
    /// Notes from the whole group, merged.
    pub notes: Vec<NoteEntry>,
}

/// Share of members with any vote, rounded half up. `0` for an empty group.
///
/// # Examples
///
/// ```
/// use birdlie_engine::aggregate::voted_percentage;
///
/// assert_eq!(voted_percentage(3, 4), 75);
/// assert_eq!(voted_percentage(1, 8), 13);
/// assert_eq!(voted_percentage(0, 0), 0);
/// ```
pub fn voted_percentage(votes: usize, members: usize) -> u8 {
    if members == 0 {
        return 0;
    }
    let votes = votes.min(members);
    ((200 * votes + members) / (2 * members)) as u8
}

/// Notes for a day from every listed member, deduplicated on
/// `(text, timestamp, user)` and kept in first-seen order.
pub fn merged_notes(group: &Group, month_index: u32, day: u32) -> Vec<NoteEntry> {
    let mut seen = HashSet::new();
    let mut notes = Vec::new();
    for member in group.members() {
        for note in group.calendar(member).notes_on(month_index, day) {
            if seen.insert(note.dedup_key()) {
                notes.push(note.clone());
            }
        }
    }
    notes
}

/// Aggregate one month, one [`DayStat`] per day in ascending order.
pub fn compute_day_stats(group: &Group, window: MonthWindow) -> Vec<DayStat> {
    let month_index = window.month_index();
    let member_count = group.members().len();

    let mut stats: Vec<DayStat> = window
        .days()
        .map(|day| {
            let mut free_members = Vec::new();
            let mut partial_members = Vec::new();
            for member in group.members() {
                match group.get_status(member, month_index, day) {
                    DayStatus::Free => free_members.push(member.clone()),
                    DayStatus::Partial => partial_members.push(member.clone()),
                    DayStatus::None => {}
                }
            }
            let votes = free_members.len() + partial_members.len();
            DayStat {
                day,
                date: window.date_label(day),
                free_members,
                partial_members,
                voted_percentage: voted_percentage(votes, member_count),
                is_highlighted: false,
                notes: merged_notes(group, month_index, day),
            }
        })
        .collect();

    let max_percentage = stats.iter().map(|s| s.voted_percentage).max().unwrap_or(0);
    if max_percentage > 0 {
        for stat in &mut stats {
            stat.is_highlighted = stat.voted_percentage == max_percentage;
        }
    }
    tracing::debug!(month = %window, max_percentage, "computed day stats");
    stats
}

/// Aggregate every month of a span, in chronological order, with German
/// month labels. See [`compute_span_stats_with_options`].
pub fn compute_span_stats(group: &Group, span: &Span) -> Vec<MonthStats> {
    compute_span_stats_with_options(group, span, &CalendarOptions::default())
}

/// Aggregate every month of a span, in chronological order.
pub fn compute_span_stats_with_options(
    group: &Group,
    span: &Span,
    options: &CalendarOptions,
) -> Vec<MonthStats> {
    span.windows()
        .into_iter()
        .map(|window| MonthStats {
            month: window.label(options.locale),
            month_index: window.month_index(),
            year: window.year(),
            stats: compute_day_stats(group, window),
        })
        .collect()
}

/// One member's own statuses for a month, each day carrying the group's
/// merged notes.
pub fn member_day_view(group: &Group, member: &MemberId, window: MonthWindow) -> Vec<MemberDay> {
    let calendar = group.calendar(member);
    let month_index = window.month_index();
    window
        .days()
        .map(|day| {
            let entry = calendar.entry(month_index, day);
            MemberDay {
                day,
                status: entry.map_or(DayStatus::None, |e| e.status),
                user: entry.and_then(|e| e.user.clone()),
                notes: merged_notes(group, month_index, day),
            }
        })
        .collect()
}
