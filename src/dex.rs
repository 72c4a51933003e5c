//! Move and species definitions, loaded from RON.
//!
//! A dex file holds two lists, `moves` and `species`. Learnsets name their
//! moves, and those names are resolved into shared definitions when the dex is
//! built. Anything malformed is rejected at load time.

use crate::errors::{
    BattleResult, ConfigError, MoveDataError, MoveDataResult, SpeciesDataError,
    SpeciesDataResult,
};
use crate::battle::state::TurnRng;
use crate::pokemon::PokemonInst;
use crate::species::{LearnableMove, Species, MAX_LEVEL};
use schema::{MoveData, MultiHit, PokemonSpecies};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;
use std::sync::Arc;

static BUNDLED_DEX: &str = include_str!("../data/dex.ron");

#[derive(Debug, Deserialize)]
struct DexFile {
    #[serde(default)]
    moves: Vec<MoveData>,
    #[serde(default)]
    species: Vec<PokemonSpecies>,
}

#[derive(Debug, Clone, Default)]
pub struct Dex {
    moves: HashMap<String, Arc<MoveData>>,
    species: HashMap<String, Arc<Species>>,
}

fn key(name: &str) -> String {
    name.to_uppercase()
}

impl Dex {
    /// The data set shipped with the crate.
    pub fn bundled() -> BattleResult<Self> {
        Self::from_ron_str(BUNDLED_DEX)
    }

    pub fn from_ron_str(source: &str) -> BattleResult<Self> {
        let file: DexFile = ron::from_str(source).map_err(ConfigError::from)?;
        Self::from_definitions(file.moves, file.species)
    }

    pub fn load(path: impl AsRef<Path>) -> BattleResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_ron_str(&content)
    }

    pub fn from_definitions(
        moves: Vec<MoveData>,
        species: Vec<PokemonSpecies>,
    ) -> BattleResult<Self> {
        let mut dex = Dex::default();

        for move_data in moves {
            validate_move(&move_data)?;
            let name = move_data.name.clone();
            if dex.moves.insert(key(&name), Arc::new(move_data)).is_some() {
                return Err(MoveDataError::DuplicateMove(name).into());
            }
        }

        for definition in species {
            let name = definition.name.clone();
            let built = dex.build_species(definition)?;
            if dex.species.insert(key(&name), Arc::new(built)).is_some() {
                return Err(SpeciesDataError::DuplicateSpecies(name).into());
            }
        }

        tracing::debug!(
            moves = dex.moves.len(),
            species = dex.species.len(),
            "dex loaded"
        );
        Ok(dex)
    }

    fn build_species(&self, definition: PokemonSpecies) -> SpeciesDataResult<Species> {
        if definition.catch_rate == 0 {
            return Err(SpeciesDataError::MalformedData {
                name: definition.name,
                reason: "catch_rate must be within 1..=255".to_string(),
            });
        }

        let mut learnable_moves = Vec::with_capacity(definition.learnset.len());
        for entry in &definition.learnset {
            let move_data = self.moves.get(&key(&entry.move_name)).ok_or_else(|| {
                SpeciesDataError::UnknownLearnsetMove {
                    species: definition.name.clone(),
                    move_name: entry.move_name.clone(),
                }
            })?;
            if entry.level == 0 || entry.level > MAX_LEVEL {
                return Err(SpeciesDataError::MalformedData {
                    name: definition.name.clone(),
                    reason: format!("{} is learned at invalid level {}", entry.move_name, entry.level),
                });
            }
            learnable_moves.push(LearnableMove {
                move_data: Arc::clone(move_data),
                level: entry.level,
            });
        }
        // Stable sort keeps file order for moves unlocked at the same level
        learnable_moves.sort_by_key(|entry| entry.level);

        Ok(Species {
            name: definition.name,
            description: definition.description,
            primary_type: definition.primary_type,
            secondary_type: definition.secondary_type,
            base_stats: definition.base_stats,
            exp_yield: definition.exp_yield,
            growth_rate: definition.growth_rate,
            catch_rate: definition.catch_rate,
            learnable_moves,
        })
    }

    pub fn move_data(&self, name: &str) -> MoveDataResult<Arc<MoveData>> {
        self.moves
            .get(&key(name))
            .cloned()
            .ok_or_else(|| MoveDataError::MoveNotFound(name.to_string()))
    }

    pub fn species(&self, name: &str) -> SpeciesDataResult<Arc<Species>> {
        self.species
            .get(&key(name))
            .cloned()
            .ok_or_else(|| SpeciesDataError::SpeciesNotFound(name.to_string()))
    }

    /// A fresh combatant of `species` at `level` with its default moves.
    pub fn create_pokemon(&self, species: &str, level: u8) -> SpeciesDataResult<PokemonInst> {
        if level == 0 || level > MAX_LEVEL {
            return Err(SpeciesDataError::InvalidLevel(level));
        }
        Ok(PokemonInst::new(self.species(species)?, level))
    }

    /// A combatant of a uniformly drawn species, at a level drawn from `levels`.
    pub fn random_pokemon(
        &self,
        levels: RangeInclusive<u8>,
        rng: &mut TurnRng,
    ) -> SpeciesDataResult<PokemonInst> {
        let names = self.species_names();
        if names.is_empty() {
            return Err(SpeciesDataError::NoSpecies);
        }
        if levels.is_empty() {
            return Err(SpeciesDataError::InvalidLevel(*levels.start()));
        }
        let species = names[rng.pick_index("wild species", names.len())];
        let level = rng.next_in_range("wild level", *levels.start() as u32..=*levels.end() as u32);
        self.create_pokemon(species, level as u8)
    }

    pub fn species_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.species.values().map(|s| s.name.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn move_count(&self) -> usize {
        self.moves.len()
    }
}

fn validate_move(move_data: &MoveData) -> MoveDataResult<()> {
    let malformed = |reason: String| MoveDataError::MalformedData {
        name: move_data.name.clone(),
        reason,
    };

    if move_data.max_pp == 0 {
        return Err(malformed("max_pp must be at least 1".to_string()));
    }
    if let Some(accuracy) = move_data.accuracy {
        if accuracy == 0 || accuracy > 100 {
            return Err(malformed(format!("accuracy {} is outside 1..=100", accuracy)));
        }
    }
    match move_data.hits {
        MultiHit::Fixed(0) => return Err(malformed("a move must hit at least once".to_string())),
        MultiHit::Range { max } if max < 2 => {
            return Err(malformed(format!("multi-hit maximum {} is below 2", max)))
        }
        _ => {}
    }
    for secondary in &move_data.secondaries {
        if secondary.chance == 0 || secondary.chance > 100 {
            return Err(malformed(format!(
                "secondary chance {} is outside 1..=100",
                secondary.chance
            )));
        }
    }
    if move_data.recoil_percent > 100 {
        return Err(malformed(format!("recoil {}% is above 100", move_data.recoil_percent)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::BattleEngineError;
    use schema::{MoveCategory, StatType, StatusType};

    #[test]
    fn test_random_pokemon_from_an_empty_dex_is_an_error() {
        let dex = Dex::default();
        let mut rng = TurnRng::new_for_test(vec![]);
        let result = dex.random_pokemon(3..=7, &mut rng);
        assert!(matches!(result, Err(SpeciesDataError::NoSpecies)));
    }

    #[test]
    fn test_random_pokemon_draws_species_then_level() {
        let dex = Dex::bundled().expect("bundled dex should be valid");
        let first = dex.species_names()[0].to_string();

        // Both draws clamp into range: the first species, the top level
        let mut rng = TurnRng::new_for_test(vec![0, 99]);
        let pokemon = dex.random_pokemon(3..=7, &mut rng).expect("dex has species");
        assert_eq!(pokemon.name(), first);
        assert_eq!(pokemon.level, 7);
    }

    #[test]
    fn test_bundled_dex_loads() {
        let dex = Dex::bundled().expect("bundled dex should be valid");
        assert!(dex.move_count() > 10);
        assert!(dex.species_names().contains(&"Pikachu"));

        let thunder_wave = dex.move_data("thunder wave").expect("case-insensitive lookup");
        assert_eq!(thunder_wave.category, MoveCategory::Status);
        assert_eq!(thunder_wave.effects.status, Some(StatusType::Paralysis));

        let growl = dex.move_data("Growl").expect("Growl exists");
        assert_eq!(growl.effects.boosts[0].stat, StatType::Atk);
        assert_eq!(growl.effects.boosts[0].stages, -1);
    }

    #[test]
    fn test_learnsets_are_sorted_by_level() {
        let dex = Dex::bundled().expect("bundled dex should be valid");
        for name in dex.species_names() {
            let species = dex.species(name).expect("listed species exists");
            let levels: Vec<u8> = species.learnable_moves.iter().map(|m| m.level).collect();
            let mut sorted = levels.clone();
            sorted.sort();
            assert_eq!(levels, sorted, "{name} learnset out of order");
        }
    }

    #[test]
    fn test_unknown_learnset_move_is_rejected() {
        let source = r#"(
            moves: [],
            species: [(
                name: "Missingno",
                primary_type: Normal,
                base_stats: (hp: 33, attack: 136, defense: 0, sp_attack: 6, sp_defense: 6, speed: 29),
                exp_yield: 1,
                growth_rate: MediumFast,
                catch_rate: 3,
                learnset: [(level: 1, move: "Water Gun")],
            )],
        )"#;

        let result = Dex::from_ron_str(source);
        assert!(matches!(
            result,
            Err(BattleEngineError::SpeciesData(SpeciesDataError::UnknownLearnsetMove { .. }))
        ));
    }

    #[test]
    fn test_malformed_move_is_rejected() {
        let source = r#"(
            moves: [(
                name: "Broken",
                move_type: Normal,
                category: Physical,
                power: 40,
                accuracy: Some(120),
                max_pp: 10,
            )],
        )"#;

        let result = Dex::from_ron_str(source);
        assert!(matches!(
            result,
            Err(BattleEngineError::MoveData(MoveDataError::MalformedData { .. }))
        ));
    }

    #[test]
    fn test_unparseable_source_is_a_config_error() {
        let result = Dex::from_ron_str("(moves: [(name: 12)])");
        assert!(matches!(result, Err(BattleEngineError::Config(ConfigError::Parse(_)))));
    }

    #[test]
    fn test_create_pokemon_rejects_bad_level() {
        let dex = Dex::bundled().expect("bundled dex should be valid");
        assert!(matches!(
            dex.create_pokemon("Pikachu", 0),
            Err(SpeciesDataError::InvalidLevel(0))
        ));
        assert!(matches!(
            dex.create_pokemon("Agumon", 5),
            Err(SpeciesDataError::SpeciesNotFound(_))
        ));
    }
}
