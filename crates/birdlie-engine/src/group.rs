//! The group record and the mutation requests accepted from callers.

use std::collections::{BTreeMap, BTreeSet};

use crate::aggregate::merged_notes;
use crate::error::{EngineError, Result};
use crate::model::{DayStatus, MemberCalendar, MemberId, EMPTY_CALENDAR};
use crate::window::MonthWindow;

/// Snapshot of a trip-planning group.
///
/// `members` fixes both the vote denominator and the order in which members
/// appear in aggregated output. Members without a stored calendar read as
/// empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Group {
    code: String,
    members: Vec<MemberId>,
    calendars: BTreeMap<MemberId, MemberCalendar>,
    display_names: BTreeMap<MemberId, String>,
}

/// A change requested by one member on their own calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    CycleStatus {
        window: MonthWindow,
        day: u32,
    },
    AddNote {
        window: MonthWindow,
        day: u32,
        text: String,
        timestamp: String,
    },
    /// `note_index` is the position in the day's merged note list, as
    /// shown by [`crate::aggregate::member_day_view`].
    RemoveNote {
        window: MonthWindow,
        day: u32,
        note_index: usize,
    },
}

impl Group {
    /// Create a group with no calendar data.
    ///
    /// # Errors
    ///
    /// [`EngineError::DuplicateMember`] if a member is listed twice.
    pub fn new<I, M>(code: impl Into<String>, members: I) -> Result<Self>
    where
        I: IntoIterator<Item = M>,
        M: Into<MemberId>,
    {
        let members: Vec<MemberId> = members.into_iter().map(Into::into).collect();
        check_unique(&members)?;
        Ok(Group {
            code: code.into(),
            members,
            calendars: BTreeMap::new(),
            display_names: BTreeMap::new(),
        })
    }

    pub(crate) fn from_parts(
        code: String,
        members: Vec<MemberId>,
        calendars: BTreeMap<MemberId, MemberCalendar>,
        display_names: BTreeMap<MemberId, String>,
    ) -> Result<Self> {
        check_unique(&members)?;
        Ok(Group {
            code,
            members,
            calendars,
            display_names,
        })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn members(&self) -> &[MemberId] {
        &self.members
    }

    pub fn is_member(&self, member: &MemberId) -> bool {
        self.members.contains(member)
    }

    /// Stored calendars, including any for ids not in `members`.
    pub fn calendars(&self) -> &BTreeMap<MemberId, MemberCalendar> {
        &self.calendars
    }

    pub(crate) fn display_names(&self) -> &BTreeMap<MemberId, String> {
        &self.display_names
    }

    /// Attach a presentation name to a member id.
    pub fn set_display_name(&mut self, member: &MemberId, name: impl Into<String>) -> Result<()> {
        self.require_member(member)?;
        self.display_names.insert(member.clone(), name.into());
        Ok(())
    }

    /// Presentation name, falling back to the id itself.
    pub fn display_name<'a>(&'a self, member: &'a MemberId) -> &'a str {
        self.display_names
            .get(member)
            .map_or(member.as_str(), String::as_str)
    }

    /// A member's calendar; empty when nothing is stored.
    pub fn calendar(&self, member: &MemberId) -> &MemberCalendar {
        self.calendars.get(member).unwrap_or(&EMPTY_CALENDAR)
    }

    fn require_member(&self, member: &MemberId) -> Result<()> {
        if self.is_member(member) {
            Ok(())
        } else {
            Err(EngineError::UnknownMember(member.to_string()))
        }
    }

    /// Run `op` on a member's calendar. A calendar is only inserted into the
    /// group when `op` succeeds and leaves it non-empty.
    fn update_calendar<T>(
        &mut self,
        member: &MemberId,
        op: impl FnOnce(&mut MemberCalendar) -> Result<T>,
    ) -> Result<T> {
        self.require_member(member)?;
        if let Some(calendar) = self.calendars.get_mut(member) {
            return op(calendar);
        }
        let mut calendar = MemberCalendar::new();
        let out = op(&mut calendar)?;
        if !calendar.is_empty() {
            self.calendars.insert(member.clone(), calendar);
        }
        Ok(out)
    }

    // ── CalendarModel operations ────────────────────────────────────────

    pub fn get_status(&self, member: &MemberId, month_index: u32, day: u32) -> DayStatus {
        self.calendar(member).status(month_index, day)
    }

    pub fn set_status(
        &mut self,
        member: &MemberId,
        window: MonthWindow,
        day: u32,
        status: DayStatus,
    ) -> Result<&MemberCalendar> {
        self.update_calendar(member, |c| c.set_status(member, window, day, status))?;
        Ok(self.calendar(member))
    }

    pub fn cycle_status(
        &mut self,
        member: &MemberId,
        window: MonthWindow,
        day: u32,
    ) -> Result<DayStatus> {
        self.update_calendar(member, |c| c.cycle_status(member, window, day))
    }

    pub fn add_note(
        &mut self,
        member: &MemberId,
        window: MonthWindow,
        day: u32,
        text: &str,
        timestamp: &str,
    ) -> Result<&MemberCalendar> {
        self.update_calendar(member, |c| {
            c.add_note(member, window, day, text, timestamp).map(|_| ())
        })?;
        Ok(self.calendar(member))
    }

    /// Remove a note by its position in the day's merged note list (the
    /// list [`crate::aggregate::merged_notes`] returns). Members may only
    /// remove notes stored in their own calendar.
    ///
    /// # Errors
    ///
    /// [`EngineError::NoteIndexOutOfRange`] if the merged list has no such
    /// position, [`EngineError::NoteNotOwned`] if the note is not in
    /// `member`'s calendar.
    pub fn remove_note(
        &mut self,
        member: &MemberId,
        window: MonthWindow,
        day: u32,
        note_index: usize,
    ) -> Result<&MemberCalendar> {
        self.require_member(member)?;
        let coord = window.coordinate(day)?;
        let merged = merged_notes(self, coord.month_index, coord.day);
        let Some(target) = merged.get(note_index) else {
            return Err(EngineError::NoteIndexOutOfRange {
                index: note_index,
                len: merged.len(),
            });
        };
        let own_index = self
            .calendar(member)
            .notes_on(coord.month_index, coord.day)
            .position(|n| n.user == *member && n.dedup_key() == target.dedup_key());
        let Some(own_index) = own_index else {
            tracing::debug!(member = %member, note_index, owner = %target.user, "note not owned");
            return Err(EngineError::NoteNotOwned {
                index: note_index,
                owner: target.user.to_string(),
            });
        };
        self.update_calendar(member, |c| c.remove_note(window, day, own_index))?;
        Ok(self.calendar(member))
    }

    /// Apply a mutation request and return the member's updated calendar for
    /// the caller to persist. On error nothing is changed.
    pub fn apply(&mut self, member: &MemberId, mutation: Mutation) -> Result<&MemberCalendar> {
        match mutation {
            Mutation::CycleStatus { window, day } => {
                self.cycle_status(member, window, day)?;
                Ok(self.calendar(member))
            }
            Mutation::AddNote {
                window,
                day,
                text,
                timestamp,
            } => self.add_note(member, window, day, &text, &timestamp),
            Mutation::RemoveNote {
                window,
                day,
                note_index,
            } => self.remove_note(member, window, day, note_index),
        }
    }
}

fn check_unique(members: &[MemberId]) -> Result<()> {
    let mut seen = BTreeSet::new();
    for member in members {
        if !seen.insert(member) {
            return Err(EngineError::DuplicateMember(member.to_string()));
        }
    }
    Ok(())
}
