use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::data::Priority;
use crate::internal_error::InternalError;

pub type RoadmapItemID = i64;
pub type TopicID = i64;

/// Calendar quarter, only ever 1 to 4.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "i64", into = "u8")]
pub struct Quarter(u8);

impl Quarter {
    pub const ALL: [Quarter; 4] = [Quarter(1), Quarter(2), Quarter(3), Quarter(4)];

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Quarter {
    type Error = InternalError;

    fn try_from(value: i64) -> Result<Quarter, InternalError> {
        match value {
            1..=4 => Ok(Quarter(value as u8)),
            _ => Err(InternalError::QuarterOutOfRange(value)),
        }
    }
}

impl From<Quarter> for u8 {
    fn from(quarter: Quarter) -> u8 {
        quarter.0
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Q{}", self.0)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Planned,
    InProgress,
    Completed,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Planned, Status::InProgress, Status::Completed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Planned => "planned",
            Status::InProgress => "in-progress",
            Status::Completed => "completed",
        }
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::Planned
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = InternalError;

    fn from_str(s: &str) -> Result<Status, InternalError> {
        Status::ALL
            .iter()
            .find(|status| status.as_str() == s)
            .copied()
            .ok_or_else(|| InternalError::invalid("status", s))
    }
}

/// `progress` is a percentage but the record itself does not bound it; forms reject
/// values outside 0..=100 and the progress widget clamps whatever it is given.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RoadmapItem {
    pub id: RoadmapItemID,
    pub title: String,
    pub description: String,
    pub quarter: Quarter,
    pub year: i32,
    pub topic: String,
    pub status: Status,
    pub priority: Priority,
    pub progress: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub id: TopicID,
    pub name: String,
    pub description: String,
    pub color: String,
}
