//! # birdlie-engine
//!
//! Deterministic availability calendar for trip-planning groups.
//!
//! Each member marks days of a one- or two-month span as free, partially
//! free, or unset, and can attach notes to days. The engine takes a snapshot
//! of the whole group and computes which days have the most agreement. It
//! performs no I/O and reads no clock: fetching and persisting the snapshot
//! is the caller's job.
//!
//! ## Modules
//!
//! - [`window`] — Month lengths, weekday offsets, span resolution and paging
//! - [`grid`] — Week-by-week month layout
//! - [`model`] — Day status cycle, day entries, notes, per-member calendars
//! - [`group`] — Group snapshot and member mutation requests
//! - [`aggregate`] — Per-day votes, percentages, highlights and merged notes
//! - [`best_days`] — Days with the most fully free members
//! - [`snapshot`] — JSON form of the group record
//! - [`config`] — Week start and month label options
//! - [`error`] — Error types

pub mod aggregate;
pub mod best_days;
pub mod config;
pub mod error;
pub mod grid;
pub mod group;
pub mod model;
pub mod snapshot;
pub mod window;

pub use aggregate::{
    compute_day_stats, compute_span_stats, compute_span_stats_with_options, member_day_view,
    merged_notes, voted_percentage, DayStat, MemberDay, MonthStats,
};
pub use best_days::{
    compute_best_days, compute_span_best_days, compute_span_best_days_with_options, BestDay,
    MonthBestDays,
};
pub use config::{CalendarOptions, MonthLocale, WeekStartDay};
pub use error::EngineError;
pub use grid::{month_grid, MonthGrid};
pub use group::{Group, Mutation};
pub use model::{note_timestamp, DayEntry, DayStatus, MemberCalendar, MemberId, NoteEntry};
pub use window::{
    days_in_month, end_of_span, first_weekday_offset, resolve_span, DayCoordinate, Direction,
    MonthWindow, Span, SpanDuration,
};
