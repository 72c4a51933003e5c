use crate::{MoveCategory, PokemonType, StatType, StatusType, Target, VolatileType};
use serde::{Deserialize, Serialize};

/// A signed change to one stat's boost stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBoost {
    pub stat: StatType,
    pub stages: i8,
}

/// The payload a move applies: any mix of boosts, a persistent status and a volatile status.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MoveEffects {
    #[serde(default)]
    pub boosts: Vec<StatBoost>,
    #[serde(default)]
    pub status: Option<StatusType>,
    #[serde(default)]
    pub volatile_status: Option<VolatileType>,
}

/// An extra effect rolled independently after a damaging move lands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecondaryEffect {
    /// Trigger chance in percent, 1..=100.
    pub chance: u8,
    #[serde(default)]
    pub target: Target,
    pub effects: MoveEffects,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MultiHit {
    /// Always strikes exactly this many times.
    Fixed(u8),
    /// Strikes a uniform 2..=max times.
    Range { max: u8 },
}

impl Default for MultiHit {
    fn default() -> Self {
        MultiHit::Fixed(1)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveData {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub move_type: PokemonType,
    pub category: MoveCategory,
    #[serde(default)]
    pub target: Target,
    #[serde(default)]
    pub power: u16,
    /// `None` never misses.
    #[serde(default)]
    pub accuracy: Option<u8>,
    #[serde(default)]
    pub priority: i8,
    pub max_pp: u8,
    #[serde(default)]
    pub hits: MultiHit,
    #[serde(default)]
    pub effects: MoveEffects,
    #[serde(default)]
    pub secondaries: Vec<SecondaryEffect>,
    /// Share of damage dealt that bounces back to the user, in percent.
    #[serde(default)]
    pub recoil_percent: u8,
}
