//! JSON form of the group record.
//!
//! The record shape is the one the storage layer hands out:
//!
//! ```json
//! {
//!   "code": "K7Q2",
//!   "members": ["Ana", "Ben"],
//!   "calendar": {
//!     "Ana": {
//!       "days":  [{ "monthIndex": 3, "day": 5, "status": "free", "user": "Ana" }],
//!       "notes": [{ "monthIndex": 3, "day": 5, "text": "Zug?", "timestamp": "01.03.2025, 10:00", "user": "Ana" }]
//!     }
//!   },
//!   "displayNames": { "Ana": "Ana Lima" }
//! }
//! ```
//!
//! Every field is optional. Calendars for members that are not listed are
//! kept but never aggregated.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::group::Group;
use crate::model::{MemberCalendar, MemberId};

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroupRecord {
    #[serde(default)]
    code: String,
    #[serde(default)]
    members: Vec<MemberId>,
    #[serde(default)]
    calendar: BTreeMap<MemberId, MemberCalendar>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    display_names: BTreeMap<MemberId, String>,
}

impl Group {
    /// Parse a group record.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidSnapshot`] for malformed JSON,
    /// [`EngineError::DuplicateMember`] if a member is listed twice.
    pub fn from_json(json: &str) -> Result<Self> {
        let record: GroupRecord =
            serde_json::from_str(json).map_err(|e| EngineError::InvalidSnapshot(e.to_string()))?;
        Group::from_record(record)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let record: GroupRecord =
            serde_json::from_value(value).map_err(|e| EngineError::InvalidSnapshot(e.to_string()))?;
        Group::from_record(record)
    }

    fn from_record(record: GroupRecord) -> Result<Self> {
        let group = Group::from_parts(
            record.code,
            record.members,
            record.calendar,
            record.display_names,
        )?;
        tracing::debug!(
            code = group.code(),
            members = group.members().len(),
            calendars = group.calendars().len(),
            "loaded group snapshot"
        );
        Ok(group)
    }

    fn to_record(&self) -> GroupRecord {
        GroupRecord {
            code: self.code().to_string(),
            members: self.members().to_vec(),
            calendar: self.calendars().clone(),
            display_names: self.display_names().clone(),
        }
    }

    pub fn to_value(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self.to_record()).map_err(serialization_error)
    }

    /// Serialize the group record.
    ///
    /// # Errors
    ///
    /// [`EngineError::Serialization`] if the record cannot be encoded.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(&self.to_record()).map_err(serialization_error)
    }
}

fn serialization_error(e: serde_json::Error) -> EngineError {
    EngineError::Serialization(e.to_string())
}
