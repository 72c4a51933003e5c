use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// Which half of the field a combatant stands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub fn to_index(self) -> usize {
        match self {
            Side::Player => 0,
            Side::Enemy => 1,
        }
    }

    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Player => write!(f, "player"),
            Side::Enemy => write!(f, "enemy"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleType {
    Wild,
    Trainer,
}

/// Where the battle script currently is. Only the selection phases accept input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattlePhase {
    ActionSelection,
    MoveSelection,
    PartyScreen,
    AboutToUseSwitch,
    MoveToForget,
    RunningTurn,
    Busy,
    BattleOver,
}

impl BattlePhase {
    pub fn accepts_input(self) -> bool {
        !matches!(
            self,
            BattlePhase::RunningTurn | BattlePhase::Busy | BattlePhase::BattleOver
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOutcome {
    PlayerWon,
    PlayerLost,
    Escaped,
    Captured,
}

impl fmt::Display for BattleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleOutcome::PlayerWon => write!(f, "Player won"),
            BattleOutcome::PlayerLost => write!(f, "Player lost"),
            BattleOutcome::Escaped => write!(f, "Escaped"),
            BattleOutcome::Captured => write!(f, "Captured"),
        }
    }
}

enum RngSource {
    Random(StdRng),
    Scripted { outcomes: Vec<u32>, index: usize },
}

/// Source of every random draw in a battle.
///
/// Scripted outcomes are replayed in order and clamped into whatever range the
/// caller asks for, so a script of `1`s always lands on the low end of each draw.
pub struct TurnRng {
    source: RngSource,
}

impl TurnRng {
    pub fn new_random() -> Self {
        Self {
            source: RngSource::Random(StdRng::from_os_rng()),
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            source: RngSource::Random(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn new_for_test(outcomes: Vec<u32>) -> Self {
        Self {
            source: RngSource::Scripted { outcomes, index: 0 },
        }
    }

    /// Uniform draw in `range`, inclusive on both ends.
    pub fn next_in_range(&mut self, reason: &str, range: RangeInclusive<u32>) -> u32 {
        let outcome = match &mut self.source {
            RngSource::Random(rng) => rng.random_range(range),
            RngSource::Scripted { outcomes, index } => {
                let Some(&raw) = outcomes.get(*index) else {
                    panic!(
                        "TurnRng exhausted! Tried to get a value for: '{}'. Need more random values.",
                        reason
                    );
                };
                *index += 1;
                raw.clamp(*range.start(), *range.end())
            }
        };
        tracing::trace!(reason, outcome, "rng draw");
        outcome
    }

    /// True on a 1-in-`n` draw.
    pub fn chance_one_in(&mut self, reason: &str, n: u32) -> bool {
        if n <= 1 {
            return true;
        }
        self.next_in_range(reason, 1..=n) == 1
    }

    /// Uniform draw in 1..=100.
    pub fn percent(&mut self, reason: &str) -> u32 {
        self.next_in_range(reason, 1..=100)
    }

    /// Uniform index into a non-empty slice of length `len`.
    pub fn pick_index(&mut self, reason: &str, len: usize) -> usize {
        let last = len.saturating_sub(1) as u32;
        self.next_in_range(reason, 0..=last) as usize
    }
}

impl fmt::Debug for TurnRng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            RngSource::Random(_) => write!(f, "TurnRng::Random"),
            RngSource::Scripted { outcomes, index } => {
                write!(f, "TurnRng::Scripted({}/{})", index, outcomes.len())
            }
        }
    }
}
