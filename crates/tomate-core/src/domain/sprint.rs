use serde::{Deserialize, Serialize};

/// Position of the current sprint inside a loop.
///
/// ```text
/// |0          |1          |2          |3
/// |task, break|task, break|task, break|task, long break (task + break time)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Sprint(u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("sprint index out of range: {0}")]
pub struct InvalidSprint(pub u8);

impl Sprint {
    pub const COUNT: u8 = 4;
    pub const FIRST: Sprint = Sprint(0);
    pub const LAST: Sprint = Sprint(Self::COUNT - 1);

    pub fn new(index: u8) -> Result<Self, InvalidSprint> {
        if index < Self::COUNT {
            Ok(Self(index))
        } else {
            Err(InvalidSprint(index))
        }
    }

    pub fn index(&self) -> u8 {
        self.0
    }

    pub fn next(&self) -> Self {
        Self((self.0 + 1) % Self::COUNT)
    }

    pub fn is_first(&self) -> bool {
        *self == Self::FIRST
    }

    /// The last sprint of a loop ends with the long break.
    pub fn is_last(&self) -> bool {
        *self == Self::LAST
    }
}

impl TryFrom<u8> for Sprint {
    type Error = InvalidSprint;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Sprint> for u8 {
    fn from(sprint: Sprint) -> Self {
        sprint.0
    }
}

impl std::fmt::Display for Sprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
