//! A module for defining AI behaviors for battle opponents.

use crate::battle::state::TurnRng;
use crate::moves::MoveChoice;
use crate::pokemon::PokemonInst;

/// A trait for any system that can pick a move for a computer-controlled combatant.
pub trait Behavior: Send + Sync {
    fn choose_move(&self, pokemon: &PokemonInst, rng: &mut TurnRng) -> MoveChoice;
}

/// Picks uniformly among moves that still have PP.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomBehavior;

impl Behavior for RandomBehavior {
    fn choose_move(&self, pokemon: &PokemonInst, rng: &mut TurnRng) -> MoveChoice {
        pokemon.get_random_move(rng)
    }
}
