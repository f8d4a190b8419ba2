use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A participant's team.
///
/// Teams are never stored independently; they are derived from the
/// per-participant metadata entry, with `None` (unassigned) as the
/// lenient default for absent or malformed values.
#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Team {
    #[default]
    None,
    A,
    B,
}

impl Team {
    /// The opposing team; unassigned stays unassigned.
    pub fn opposite(&self) -> Self {
        match self {
            Self::None => Self::None,
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }

    /// Human readable team name for notifications.
    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "Invalid Team",
            Self::A => "Team A",
            Self::B => "Team B",
        }
    }
}

#[derive(Debug, Error)]
#[error("not a known team tag")]
pub struct InvalidTeamTag;

impl FromStr for Team {
    type Err = InvalidTeamTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "None" => Ok(Self::None),
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            _ => Err(InvalidTeamTag),
        }
    }
}

impl Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::None => "None",
            Self::A => "A",
            Self::B => "B",
        })
    }
}

#[cfg(test)]
mod test {
    use super::Team;

    #[test]
    fn tags_round_trip_and_unknown_tags_fail() {
        assert_eq!("B".parse::<Team>().unwrap(), Team::B);
        assert_eq!(Team::A.to_string().parse::<Team>().unwrap(), Team::A);
        assert!("a".parse::<Team>().is_err());
        assert!("C".parse::<Team>().is_err());
    }

    #[test]
    fn opposite_keeps_unassigned_unassigned() {
        assert_eq!(Team::A.opposite(), Team::B);
        assert_eq!(Team::B.opposite(), Team::A);
        assert_eq!(Team::None.opposite(), Team::None);
    }
}
