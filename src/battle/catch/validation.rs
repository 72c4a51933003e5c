use crate::battle::state::BattleType;
use crate::errors::ActionError;
use crate::party::Party;
use crate::pokemon::PokemonInst;

/// Check whether the player may throw a ball at `target` right now.
pub fn can_attempt_catch(
    battle_type: BattleType,
    party: &Party,
    target: &PokemonInst,
) -> Result<(), ActionError> {
    if battle_type == BattleType::Trainer {
        return Err(ActionError::CannotCatchTrainerPokemon);
    }
    if party.is_full() {
        return Err(ActionError::PartyFull);
    }
    if target.is_fainted() {
        return Err(ActionError::NoCatchTarget);
    }
    Ok(())
}
