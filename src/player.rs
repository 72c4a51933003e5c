use crate::battle::state::Side;
use crate::errors::{ActionError, BattleStateError};
use crate::party::Party;
use crate::pokemon::PokemonInst;

/// One side of a battle: who owns it, their party, and which member is out.
#[derive(Debug, Clone)]
pub struct BattlePlayer {
    pub name: String,
    pub side: Side,
    pub party: Party,
    // Always points at an existing member of `party`.
    active_index: usize,
}

impl BattlePlayer {
    /// Puts the first healthy member forward. Fails if nobody can battle.
    pub fn new(name: impl Into<String>, side: Side, party: Party) -> Result<Self, BattleStateError> {
        let name = name.into();
        let active_index = party
            .healthy_index()
            .ok_or_else(|| BattleStateError::NoHealthyPokemon(name.clone()))?;
        Ok(Self {
            name,
            side,
            party,
            active_index,
        })
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn active_pokemon(&self) -> &PokemonInst {
        &self.party[self.active_index]
    }

    pub fn active_pokemon_mut(&mut self) -> &mut PokemonInst {
        &mut self.party[self.active_index]
    }

    pub fn has_healthy_reserve(&self) -> bool {
        self.party.healthy_index().is_some()
    }

    /// Check that `index` names a member who can be sent out right now.
    pub fn validate_switch(&self, index: usize) -> Result<(), ActionError> {
        let pokemon = self
            .party
            .get(index)
            .ok_or(ActionError::InvalidPokemonIndex(index))?;
        if pokemon.is_fainted() {
            return Err(ActionError::PokemonFainted);
        }
        if index == self.active_index {
            return Err(ActionError::AlreadyActive(pokemon.name().to_string()));
        }
        Ok(())
    }

    /// Bring `index` forward. Callers validate first.
    pub fn set_active(&mut self, index: usize) {
        if index < self.party.len() {
            self.active_index = index;
        }
    }
}
