use serde::{Deserialize, Serialize};

pub const MIN_ROUND_MINS: u32 = 2;
pub const MAX_ROUND_MINS: u32 = 60;
pub const DEFAULT_ROUND_MINS: u32 = 3;

fn default_round_mins() -> u32 {
    DEFAULT_ROUND_MINS
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfigTdm {
    /// Round length in minutes.
    ///
    /// Values outside of `[MIN_ROUND_MINS, MAX_ROUND_MINS]` are
    /// clamped when the round length is applied.
    #[serde(default = "default_round_mins")]
    pub round_mins: u32,
}

impl Default for ConfigTdm {
    fn default() -> Self {
        Self {
            round_mins: DEFAULT_ROUND_MINS,
        }
    }
}

impl ConfigTdm {
    pub fn clamped_round_mins(&self) -> u32 {
        self.round_mins.clamp(MIN_ROUND_MINS, MAX_ROUND_MINS)
    }
}
