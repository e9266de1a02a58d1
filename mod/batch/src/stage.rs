use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A lifecycle checkpoint: `Stage-1` … `Stage-8`. `Stage-8` marks a
/// batch as ready for outdoor hardening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Stage(u8);

pub const STAGE_COUNT: u8 = 8;

impl Stage {
    pub fn new(n: u8) -> Option<Self> {
        (1..=STAGE_COUNT).contains(&n).then_some(Stage(n))
    }

    pub fn number(self) -> u8 {
        self.0
    }

    /// All eight stages, in order. Every one is a selectable transition
    /// target — the ledger never enforced ordering and the screens
    /// offer the full list unconditionally.
    pub fn all() -> [Stage; STAGE_COUNT as usize] {
        [
            Stage(1),
            Stage(2),
            Stage(3),
            Stage(4),
            Stage(5),
            Stage(6),
            Stage(7),
            Stage(8),
        ]
    }

    pub fn next(self) -> Option<Stage> {
        Stage::new(self.0 + 1)
    }

    /// A `Stage-8` batch is done indoors.
    pub fn is_final(self) -> bool {
        self.0 == STAGE_COUNT
    }
}

impl Default for Stage {
    fn default() -> Self {
        Stage(1)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Stage-{}", self.0)
    }
}

impl FromStr for Stage {
    type Err = String;

    /// Accepts "Stage-3" and the loose "Stage 3" spelling some older
    /// rows carry.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s
            .trim()
            .strip_prefix("Stage")
            .map(|r| r.trim_start_matches(['-', ' ']))
            .unwrap_or(s.trim());
        rest.parse::<u8>()
            .ok()
            .and_then(Stage::new)
            .ok_or_else(|| format!("not a stage: {s:?}"))
    }
}

impl TryFrom<String> for Stage {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Stage> for String {
    fn from(stage: Stage) -> String {
        stage.to_string()
    }
}
