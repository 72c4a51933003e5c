use crate::{GrowthRate, PokemonType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u8,
    pub attack: u8,
    pub defense: u8,
    pub sp_attack: u8,
    pub sp_defense: u8,
    pub speed: u8,
}

/// A move a species unlocks at a given level, referenced by move name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnsetEntry {
    pub level: u8,
    #[serde(rename = "move")]
    pub move_name: String,
}

/// Species definition as it is stored on disk. Move names are resolved at load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonSpecies {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub primary_type: PokemonType,
    #[serde(default)]
    pub secondary_type: Option<PokemonType>,
    pub base_stats: BaseStats,
    pub exp_yield: u16,
    pub growth_rate: GrowthRate,
    pub catch_rate: u8,
    #[serde(default)]
    pub learnset: Vec<LearnsetEntry>,
}
