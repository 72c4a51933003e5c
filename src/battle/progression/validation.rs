use crate::pokemon::PokemonInst;
use crate::species::MAX_LEVEL;

/// Reasons a combatant cannot take experience right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressionError {
    Fainted,
    MaxLevel,
}

pub fn can_receive_experience(pokemon: &PokemonInst) -> Result<(), ProgressionError> {
    if pokemon.is_fainted() {
        return Err(ProgressionError::Fainted);
    }
    if pokemon.level >= MAX_LEVEL {
        return Err(ProgressionError::MaxLevel);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::tests::common::TestPokemonBuilder;

    #[test]
    fn test_can_receive_experience() {
        let healthy = TestPokemonBuilder::new("Rattata", 10).build();
        let fainted = TestPokemonBuilder::new("Rattata", 10).with_hp(0).build();
        let capped = TestPokemonBuilder::new("Rattata", 100).build();

        assert_eq!(can_receive_experience(&healthy), Ok(()));
        assert_eq!(can_receive_experience(&fainted), Err(ProgressionError::Fainted));
        assert_eq!(can_receive_experience(&capped), Err(ProgressionError::MaxLevel));
    }
}
