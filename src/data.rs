use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use crate::internal_error::InternalError;
use crate::root::shell::Shell;

pub type SharedShell = Arc<Mutex<Shell>>;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = InternalError;

    fn from_str(s: &str) -> Result<Priority, InternalError> {
        Priority::ALL
            .iter()
            .find(|p| p.as_str() == s)
            .copied()
            .ok_or_else(|| InternalError::invalid("priority", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_accepts_only_the_closed_set() {
        assert_eq!("low".parse::<Priority>().unwrap(), Priority::Low);
        assert_eq!("high".parse::<Priority>().unwrap(), Priority::High);

        for bad in ["urgent", "", "Low", "MEDIUM", " high"] {
            assert!(bad.parse::<Priority>().is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn priority_rejects_unknown_values_when_deserialized() {
        assert!(serde_json::from_str::<Priority>("\"urgent\"").is_err());
        assert_eq!(
            serde_json::from_str::<Priority>("\"medium\"").unwrap(),
            Priority::Medium
        );
    }
}
