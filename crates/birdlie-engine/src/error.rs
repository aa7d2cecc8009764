//! Error types for birdlie-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid month index: {0} (expected 0..=11)")]
    InvalidMonth(u32),

    #[error("Invalid year: {0}")]
    InvalidYear(i32),

    #[error("Invalid span duration: {0} month(s) (expected 1 or 2)")]
    InvalidDuration(u32),

    #[error("Invalid span label: '{0}'")]
    InvalidSpanLabel(String),

    #[error("Invalid day: {day} is outside month {month_index} of {year}")]
    InvalidDay { month_index: u32, year: i32, day: u32 },

    #[error("Note text must not be empty")]
    EmptyNote,

    #[error("Note index {index} out of range ({len} note(s) on that day)")]
    NoteIndexOutOfRange { index: usize, len: usize },

    #[error("Note {index} on that day belongs to {owner}")]
    NoteNotOwned { index: usize, owner: String },

    #[error("Unknown member: {0}")]
    UnknownMember(String),

    #[error("Duplicate member: {0}")]
    DuplicateMember(String),

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
