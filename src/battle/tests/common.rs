use crate::battle::conditions::StatusCondition;
use crate::battle::engine::{input_channel, BattleInput, BattleSession};
use crate::battle::presentation::RecordingPresenter;
use crate::battle::state::{Side, TurnRng};
use crate::config::BattleConfig;
use crate::dex::Dex;
use crate::errors::BattleResult;
use crate::party::Party;
use crate::player::BattlePlayer;
use crate::pokemon::PokemonInst;
use std::sync::{Arc, LazyLock};
use tokio::sync::mpsc::UnboundedReceiver;

static TEST_DEX: LazyLock<Dex> = LazyLock::new(|| match Dex::bundled() {
    Ok(dex) => dex,
    Err(err) => panic!("Bundled dex failed to load: {}", err),
});

/// The bundled dex, loaded once per test binary.
pub fn test_dex() -> &'static Dex {
    &TEST_DEX
}

/// A builder for creating test Pokemon instances with common defaults.
///
/// # Example
/// ```ignore
/// let pokemon = TestPokemonBuilder::new("Pikachu", 25)
///     .with_moves(vec!["Tackle"])
///     .with_status(StatusCondition::Paralysis)
///     .build();
/// ```
pub struct TestPokemonBuilder {
    species: String,
    level: u8,
    moves: Option<Vec<String>>,
    status: Option<StatusCondition>,
    current_hp: Option<u16>,
}

impl TestPokemonBuilder {
    /// Creates a new builder for a given species and level.
    pub fn new(species: &str, level: u8) -> Self {
        Self {
            species: species.to_string(),
            level,
            moves: None,
            status: None,
            current_hp: None,
        }
    }

    /// Sets the moves for the test Pokemon.
    pub fn with_moves(mut self, moves: Vec<&str>) -> Self {
        self.moves = Some(moves.into_iter().map(str::to_string).collect());
        self
    }

    /// Sets the status condition for the test Pokemon.
    pub fn with_status(mut self, status: StatusCondition) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the current HP for the test Pokemon. If not set, HP will be max.
    pub fn with_hp(mut self, hp: u16) -> Self {
        self.current_hp = Some(hp);
        self
    }

    /// Builds the `PokemonInst`.
    pub fn build(self) -> PokemonInst {
        let dex = test_dex();
        let species = match dex.species(&self.species) {
            Ok(species) => species,
            Err(err) => panic!("Failed to load species data for {}: {}", self.species, err),
        };

        let mut pokemon = match self.moves {
            Some(names) => {
                let moves = names
                    .iter()
                    .map(|name| match dex.move_data(name) {
                        Ok(data) => data,
                        Err(err) => panic!("Failed to load move data for {}: {}", name, err),
                    })
                    .collect();
                PokemonInst::with_moves(species, self.level, moves)
            }
            None => PokemonInst::new(species, self.level),
        };

        pokemon.status = self.status;

        if let Some(hp) = self.current_hp {
            pokemon.set_hp(hp);
        } else {
            pokemon.set_hp_to_max();
        }

        pokemon
    }
}

/// Creates a `TurnRng` instance with a long list of default values (50).
///
/// Clamped into each draw's range, 50 means: no critical hits, the lowest damage
/// roll, every move with accuracy of at least 50 connects, no secondary effects,
/// and the opponent picks its last usable move.
pub fn predictable_rng() -> TurnRng {
    TurnRng::new_for_test(vec![50; 200])
}

/// Helper function to assert that a Result is Ok and return the value.
pub fn assert_ok<T>(result: BattleResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("Expected Ok but got error: {}", err),
    }
}

/// An input channel preloaded with `inputs`. It closes once they are consumed.
pub fn scripted_inputs(inputs: Vec<BattleInput>) -> UnboundedReceiver<BattleInput> {
    let (sender, receiver) = input_channel();
    for input in inputs {
        if sender.send(input).is_err() {
            panic!("input channel closed while scripting");
        }
    }
    receiver
}

pub fn create_test_player(name: &str, side: Side, members: Vec<PokemonInst>) -> BattlePlayer {
    let party = match Party::new(members) {
        Ok(party) => party,
        Err(err) => panic!("Invalid test party: {}", err),
    };
    match BattlePlayer::new(name, side, party) {
        Ok(player) => player,
        Err(err) => panic!("Invalid test player: {}", err),
    }
}

/// A wild battle for "Red" with instant pacing and a recording front end.
pub fn create_wild_session(
    party: Vec<PokemonInst>,
    wild: PokemonInst,
    inputs: Vec<BattleInput>,
    rng: TurnRng,
) -> (BattleSession<Arc<RecordingPresenter>>, Arc<RecordingPresenter>) {
    let presenter = Arc::new(RecordingPresenter::new());
    let player = create_test_player("Red", Side::Player, party);
    let session = assert_ok(BattleSession::wild(
        player,
        wild,
        Arc::clone(&presenter),
        scripted_inputs(inputs),
    ))
    .with_rng(rng)
    .with_config(BattleConfig::instant());
    (session, presenter)
}

/// A battle between "Red" and trainer "Blue" with instant pacing and a recording front end.
pub fn create_trainer_session(
    party: Vec<PokemonInst>,
    trainer_party: Vec<PokemonInst>,
    inputs: Vec<BattleInput>,
    rng: TurnRng,
) -> (BattleSession<Arc<RecordingPresenter>>, Arc<RecordingPresenter>) {
    let presenter = Arc::new(RecordingPresenter::new());
    let player = create_test_player("Red", Side::Player, party);
    let trainer = create_test_player("Blue", Side::Enemy, trainer_party);
    let session = assert_ok(BattleSession::trainer(
        player,
        trainer,
        Arc::clone(&presenter),
        scripted_inputs(inputs),
    ))
    .with_rng(rng)
    .with_config(BattleConfig::instant());
    (session, presenter)
}
