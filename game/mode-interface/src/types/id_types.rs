use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::id_gen::IdGeneratorIdType;

/// The short, per-session id of a connected participant.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Copy, Clone, Hash, PartialOrd, Ord)]
pub struct ParticipantId(IdGeneratorIdType);

impl From<IdGeneratorIdType> for ParticipantId {
    fn from(value: IdGeneratorIdType) -> Self {
        Self(value)
    }
}

impl Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// The long-lived unique id of a participant.
///
/// Unlike [`ParticipantId`] this survives reconnects and is what
/// per-participant metadata keys are derived from.
#[derive(
    Debug, Serialize, Deserialize, PartialEq, Eq, Copy, Clone, Hash, PartialOrd, Ord, Default,
)]
pub struct ParticipantUniqueId(u64);

impl ParticipantUniqueId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

impl Display for ParticipantUniqueId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ParticipantUniqueId {
    type Err = <u64 as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}
