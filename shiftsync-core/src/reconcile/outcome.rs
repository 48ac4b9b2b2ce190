use std::fmt;

use serde::{Deserialize, Serialize};

/// What reconciliation did for one shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Inserted,
    Updated,
    Renamed,
}

impl Outcome {
    pub fn symbol(&self) -> &'static str {
        match self {
            Outcome::Inserted => "+",
            Outcome::Updated => "~",
            Outcome::Renamed => "»",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Inserted => write!(f, "inserted"),
            Outcome::Updated => write!(f, "updated"),
            Outcome::Renamed => write!(f, "renamed"),
        }
    }
}
