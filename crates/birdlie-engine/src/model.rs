//! Per-member calendar state: day statuses and free-text notes.
//!
//! A [`MemberCalendar`] holds at most one [`DayEntry`] per `(month_index, day)`
//! and any number of [`NoteEntry`] values. Days without an entry read as
//! [`DayStatus::None`]; resetting a day to `None` removes its entry.
//!
//! The only user-facing status transition is [`DayStatus::next`], a fixed
//! three-state cycle `none → free → partial → none`.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{EngineError, Result};
use crate::window::MonthWindow;

// ── MemberId ────────────────────────────────────────────────────────────────

/// Stable key of a group member.
///
/// Calendars, notes and vote lists are keyed by this value. A human-facing
/// display name is kept separately on the group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(String);

impl MemberId {
    pub fn new(id: impl Into<String>) -> Self {
        MemberId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MemberId {
    fn from(s: &str) -> Self {
        MemberId(s.to_string())
    }
}

impl From<String> for MemberId {
    fn from(s: String) -> Self {
        MemberId(s)
    }
}

// ── DayStatus ───────────────────────────────────────────────────────────────

/// A member's availability on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    #[default]
    None,
    Free,
    Partial,
}

impl DayStatus {
    /// The "activate" transition: `None → Free → Partial → None`.
    pub fn next(self) -> DayStatus {
        match self {
            DayStatus::None => DayStatus::Free,
            DayStatus::Free => DayStatus::Partial,
            DayStatus::Partial => DayStatus::None,
        }
    }

    /// Free or partially free.
    pub fn is_available(self) -> bool {
        !matches!(self, DayStatus::None)
    }
}

// ── Entries ─────────────────────────────────────────────────────────────────

/// Status of one day in one member's calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayEntry {
    pub month_index: u32,
    pub day: u32,
    #[serde(default)]
    pub status: DayStatus,
    /// Member who set a non-`none` status. Stored as `""` when unset.
    #[serde(default, with = "owner_field")]
    pub user: Option<MemberId>,
}

/// A free-text note attached to a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteEntry {
    pub month_index: u32,
    pub day: u32,
    pub text: String,
    #[serde(default)]
    pub timestamp: String,
    pub user: MemberId,
}

impl NoteEntry {
    /// Identity used when merging notes from several calendars.
    pub fn dedup_key(&self) -> (&str, &str, &str) {
        (&self.text, &self.timestamp, self.user.as_str())
    }
}

/// Timestamp format used for notes: `"dd.mm.yyyy, HH:MM"`.
pub fn note_timestamp(at: NaiveDateTime) -> String {
    at.format("%d.%m.%Y, %H:%M").to_string()
}

mod owner_field {
    use super::*;

    pub fn serialize<S: Serializer>(
        user: &Option<MemberId>,
        s: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        s.serialize_str(user.as_ref().map_or("", MemberId::as_str))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        d: D,
    ) -> std::result::Result<Option<MemberId>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        Ok(raw.filter(|s| !s.is_empty()).map(MemberId))
    }
}

// ── MemberCalendar ──────────────────────────────────────────────────────────

/// Calendar state owned by exactly one member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawMemberCalendar")]
pub struct MemberCalendar {
    days: Vec<DayEntry>,
    notes: Vec<NoteEntry>,
}

#[derive(Deserialize)]
struct RawMemberCalendar {
    #[serde(default)]
    days: Vec<DayEntry>,
    #[serde(default)]
    notes: Vec<NoteEntry>,
}

impl From<RawMemberCalendar> for MemberCalendar {
    /// Normalise stored data: later day entries replace earlier ones for the
    /// same coordinate, `none` entries and blank notes are dropped.
    fn from(raw: RawMemberCalendar) -> Self {
        let mut calendar = MemberCalendar::default();
        for entry in raw.days {
            calendar.upsert(entry);
        }
        let before = raw.notes.len();
        calendar.notes = raw
            .notes
            .into_iter()
            .filter(|n| !n.text.trim().is_empty())
            .collect();
        if calendar.notes.len() != before {
            tracing::debug!(
                dropped = before - calendar.notes.len(),
                "dropped blank notes from snapshot"
            );
        }
        calendar
    }
}

/// Shared empty calendar for members without stored data.
pub(crate) static EMPTY_CALENDAR: MemberCalendar = MemberCalendar {
    days: Vec::new(),
    notes: Vec::new(),
};

impl MemberCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn days(&self) -> &[DayEntry] {
        &self.days
    }

    pub fn notes(&self) -> &[NoteEntry] {
        &self.notes
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty() && self.notes.is_empty()
    }

    pub fn entry(&self, month_index: u32, day: u32) -> Option<&DayEntry> {
        self.days
            .iter()
            .find(|e| e.month_index == month_index && e.day == day)
    }

    /// Status at a coordinate; `None` when absent or out of range.
    pub fn status(&self, month_index: u32, day: u32) -> DayStatus {
        self.entry(month_index, day).map_or(DayStatus::None, |e| e.status)
    }

    /// This calendar's notes for one day, in insertion order.
    pub fn notes_on(&self, month_index: u32, day: u32) -> impl Iterator<Item = &NoteEntry> {
        self.notes
            .iter()
            .filter(move |n| n.month_index == month_index && n.day == day)
    }

    fn upsert(&mut self, entry: DayEntry) {
        let pos = self
            .days
            .iter()
            .position(|e| e.month_index == entry.month_index && e.day == entry.day);
        match (pos, entry.status) {
            (Some(i), DayStatus::None) => {
                self.days.remove(i);
            }
            (None, DayStatus::None) => {}
            (Some(i), _) => self.days[i] = entry,
            (None, _) => self.days.push(entry),
        }
    }

    /// Set the status of a day. `owner` is recorded for `Free`/`Partial` and
    /// the entry is removed for `None`.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidDay`] if `day` is outside `window`; nothing is
    /// changed in that case.
    pub fn set_status(
        &mut self,
        owner: &MemberId,
        window: MonthWindow,
        day: u32,
        status: DayStatus,
    ) -> Result<()> {
        let coord = window.coordinate(day)?;
        let user = status.is_available().then(|| owner.clone());
        self.upsert(DayEntry {
            month_index: coord.month_index,
            day: coord.day,
            status,
            user,
        });
        tracing::debug!(member = %owner, month = %window, day, ?status, "status set");
        Ok(())
    }

    /// Advance a day through the status cycle and return the new status.
    pub fn cycle_status(
        &mut self,
        owner: &MemberId,
        window: MonthWindow,
        day: u32,
    ) -> Result<DayStatus> {
        let next = self.status(window.month_index(), day).next();
        self.set_status(owner, window, day, next)?;
        Ok(next)
    }

    /// Append a note authored by `owner`.
    ///
    /// # Errors
    ///
    /// [`EngineError::EmptyNote`] for empty or whitespace-only text,
    /// [`EngineError::InvalidDay`] if `day` is outside `window`.
    pub fn add_note(
        &mut self,
        owner: &MemberId,
        window: MonthWindow,
        day: u32,
        text: &str,
        timestamp: &str,
    ) -> Result<&NoteEntry> {
        if text.trim().is_empty() {
            tracing::debug!(member = %owner, month = %window, day, "rejected empty note");
            return Err(EngineError::EmptyNote);
        }
        let coord = window.coordinate(day)?;
        self.notes.push(NoteEntry {
            month_index: coord.month_index,
            day: coord.day,
            text: text.to_string(),
            timestamp: timestamp.to_string(),
            user: owner.clone(),
        });
        tracing::debug!(member = %owner, month = %window, day, "note added");
        Ok(&self.notes[self.notes.len() - 1])
    }

    /// Remove the `note_index`-th note of a day and return it. The index
    /// counts this calendar's own notes for that day; [`Group::remove_note`]
    /// takes the group-wide merged position instead.
    ///
    /// [`Group::remove_note`]: crate::group::Group::remove_note
    ///
    /// # Errors
    ///
    /// [`EngineError::NoteIndexOutOfRange`] if there is no such note,
    /// [`EngineError::InvalidDay`] if `day` is outside `window`.
    pub fn remove_note(
        &mut self,
        window: MonthWindow,
        day: u32,
        note_index: usize,
    ) -> Result<NoteEntry> {
        let coord = window.coordinate(day)?;
        let positions: Vec<usize> = self
            .notes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.month_index == coord.month_index && n.day == coord.day)
            .map(|(i, _)| i)
            .collect();
        let Some(&pos) = positions.get(note_index) else {
            tracing::debug!(month = %window, day, note_index, "note index out of range");
            return Err(EngineError::NoteIndexOutOfRange {
                index: note_index,
                len: positions.len(),
            });
        };
        tracing::debug!(month = %window, day, note_index, "note removed");
        Ok(self.notes.remove(pos))
    }
}
