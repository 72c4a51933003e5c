use schema::{BaseStats, GrowthRate, MoveData, PokemonType};
use std::sync::Arc;

/// Highest level a combatant can reach.
pub const MAX_LEVEL: u8 = 100;

/// Number of moves a combatant can know at once.
pub const MAX_MOVES: usize = 4;

/// A move unlocked by a species at a given level.
#[derive(Debug, Clone, PartialEq)]
pub struct LearnableMove {
    pub move_data: Arc<MoveData>,
    pub level: u8,
}

/// Immutable species definition shared by every instance of that species.
#[derive(Debug, Clone, PartialEq)]
pub struct Species {
    pub name: String,
    pub description: String,
    pub primary_type: PokemonType,
    pub secondary_type: Option<PokemonType>,
    pub base_stats: BaseStats,
    pub exp_yield: u16,
    pub growth_rate: GrowthRate,
    pub catch_rate: u8,
    /// Sorted by unlock level.
    pub learnable_moves: Vec<LearnableMove>,
}

impl Species {
    pub fn has_type(&self, pokemon_type: PokemonType) -> bool {
        self.primary_type == pokemon_type || self.secondary_type == Some(pokemon_type)
    }

    pub fn exp_for_level(&self, level: u8) -> u32 {
        self.growth_rate.exp_for_level(level)
    }

    /// Moves unlocked at exactly `level`, in learnset order.
    pub fn moves_learned_at_level(&self, level: u8) -> Vec<Arc<MoveData>> {
        self.learnable_moves
            .iter()
            .filter(|entry| entry.level == level)
            .map(|entry| Arc::clone(&entry.move_data))
            .collect()
    }

    /// The most recently unlocked moves at or below `level`, at most `MAX_MOVES` of them.
    pub fn starting_moves(&self, level: u8) -> Vec<Arc<MoveData>> {
        let unlocked: Vec<_> = self
            .learnable_moves
            .iter()
            .filter(|entry| entry.level <= level)
            .collect();
        let skip = unlocked.len().saturating_sub(MAX_MOVES);
        unlocked
            .into_iter()
            .skip(skip)
            .map(|entry| Arc::clone(&entry.move_data))
            .collect()
    }
}
