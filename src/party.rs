use crate::errors::{ActionError, BattleStateError};
use crate::pokemon::PokemonInst;
use std::ops::{Index, IndexMut};

/// Largest number of members a party can hold.
pub const MAX_PARTY_SIZE: usize = 6;

/// An ordered team of up to six combatants.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Party {
    members: Vec<PokemonInst>,
}

impl Party {
    pub fn new(members: Vec<PokemonInst>) -> Result<Self, BattleStateError> {
        if members.len() > MAX_PARTY_SIZE {
            return Err(BattleStateError::PartyTooLarge(members.len()));
        }
        Ok(Self { members })
    }

    pub fn members(&self) -> &[PokemonInst] {
        &self.members
    }

    pub fn get(&self, index: usize) -> Option<&PokemonInst> {
        self.members.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut PokemonInst> {
        self.members.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.members.len() >= MAX_PARTY_SIZE
    }

    /// First member still able to battle.
    pub fn healthy_pokemon(&self) -> Option<&PokemonInst> {
        self.members.iter().find(|p| !p.is_fainted())
    }

    pub fn healthy_index(&self) -> Option<usize> {
        self.members.iter().position(|p| !p.is_fainted())
    }

    pub fn add_pokemon(&mut self, pokemon: PokemonInst) -> Result<(), ActionError> {
        if self.is_full() {
            return Err(ActionError::PartyFull);
        }
        self.members.push(pokemon);
        Ok(())
    }

    /// Full HP, no status, full PP for every member.
    pub fn heal_all(&mut self) {
        for pokemon in &mut self.members {
            pokemon.full_heal();
        }
    }

    pub fn on_battle_over(&mut self) {
        for pokemon in &mut self.members {
            pokemon.on_battle_over();
        }
    }
}

impl Index<usize> for Party {
    type Output = PokemonInst;

    fn index(&self, index: usize) -> &Self::Output {
        &self.members[index]
    }
}

impl IndexMut<usize> for Party {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.members[index]
    }
}
