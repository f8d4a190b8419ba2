use std::num::NonZeroU64;

use serde::{Deserialize, Serialize};

pub type GameTickType = u64;

/// A tick based cooldown.
///
/// `0` (or `None`) means no cooldown is running.
#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct GameTickCooldown(Option<NonZeroU64>);

impl GameTickCooldown {
    pub fn get(&self) -> Option<NonZeroU64> {
        self.0
    }

    pub fn is_none(&self) -> bool {
        self.0.is_none()
    }

    /// Advances the cooldown by one tick.
    ///
    /// Returns `None` if no cooldown is running, `Some(true)` exactly
    /// in the tick the cooldown ran out.
    pub fn tick(&mut self) -> Option<bool> {
        let cur = self.0?;
        self.0 = NonZeroU64::new(cur.get() - 1);
        Some(self.0.is_none())
    }
}

impl From<GameTickType> for GameTickCooldown {
    fn from(value: GameTickType) -> Self {
        Self(NonZeroU64::new(value))
    }
}

#[cfg(test)]
mod test {
    use super::GameTickCooldown;

    #[test]
    fn cooldown_fires_exactly_once() {
        let mut cd: GameTickCooldown = 2.into();
        assert_eq!(cd.tick(), Some(false));
        assert_eq!(cd.tick(), Some(true));
        assert_eq!(cd.tick(), None);

        let mut none: GameTickCooldown = 0.into();
        assert!(none.is_none());
        assert_eq!(none.tick(), None);
    }
}
