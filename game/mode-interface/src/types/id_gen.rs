use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// This represents the id of any kind of identifiable resource.
#[derive(
    Debug, Serialize, Deserialize, PartialEq, Eq, Copy, Clone, Hash, PartialOrd, Ord, Default,
)]
pub struct IdGeneratorIdType(u64);

impl Display for IdGeneratorIdType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for IdGeneratorIdType {
    type Err = <u64 as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

#[derive(Debug, Default)]
pub struct IdGenerator {
    cur_id: IdGeneratorIdType,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// generate the next unique id of this generator
    pub fn next_id<T: From<IdGeneratorIdType>>(&mut self) -> T {
        let cur = self.cur_id;
        self.cur_id.0 += 1;
        cur.into()
    }
}
