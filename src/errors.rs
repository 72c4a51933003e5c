use thiserror::Error;

/// Main error type for the battle engine
#[derive(Debug, Error)]
pub enum BattleEngineError {
    /// Error related to move data lookup or processing
    #[error("Move data error: {0}")]
    MoveData(#[from] MoveDataError),
    /// Error related to species data lookup or processing
    #[error("Species data error: {0}")]
    SpeciesData(#[from] SpeciesDataError),
    /// Error loading or validating the battle configuration
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    /// Error related to invalid battle state
    #[error("Battle state error: {0}")]
    BattleState(#[from] BattleStateError),
    /// Error related to invalid player actions
    #[error("Action error: {0}")]
    Action(#[from] ActionError),
    /// The input channel closed while the battle was waiting on a selection
    #[error("Input channel closed before the battle finished")]
    InputClosed,
}

/// Errors related to move data operations
#[derive(Debug, Error)]
pub enum MoveDataError {
    /// The specified move was not found in the dex
    #[error("Move '{0}' not found")]
    MoveNotFound(String),
    /// Two move entries share a name
    #[error("Move '{0}' is defined more than once")]
    DuplicateMove(String),
    /// Move data is malformed or incomplete
    #[error("Move '{name}' is malformed: {reason}")]
    MalformedData { name: String, reason: String },
}

/// Errors related to species data operations
#[derive(Debug, Error)]
pub enum SpeciesDataError {
    /// The specified species was not found in the dex
    #[error("Species '{0}' not found")]
    SpeciesNotFound(String),
    /// Two species entries share a name
    #[error("Species '{0}' is defined more than once")]
    DuplicateSpecies(String),
    /// A learnset references a move the dex does not define
    #[error("Species '{species}' learns unknown move '{move_name}'")]
    UnknownLearnsetMove { species: String, move_name: String },
    /// Species data is malformed or incomplete
    #[error("Species '{name}' is malformed: {reason}")]
    MalformedData { name: String, reason: String },
    /// A random species was requested from a dex that defines none
    #[error("The dex defines no species")]
    NoSpecies,
    /// Requested level is outside 1..=100
    #[error("Level {0} is out of range")]
    InvalidLevel(u8),
}

/// Errors raised while reading RON data or configuration from disk or memory
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse RON: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Errors related to battle state validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BattleStateError {
    /// A side entered battle with nobody able to fight
    #[error("{0} has no Pokémon able to battle")]
    NoHealthyPokemon(String),
    /// A party exceeded the six-member limit
    #[error("A party can hold at most 6 Pokémon, got {0}")]
    PartyTooLarge(usize),
}

/// Selections rejected by the battle. The display text is shown to the player as-is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("There is no move in that slot!")]
    InvalidMoveIndex(usize),
    #[error("There's no PP left for this move!")]
    NoPpRemaining,
    #[error("There is no Pokémon in that slot!")]
    InvalidPokemonIndex(usize),
    #[error("You can't send out a fainted Pokémon!")]
    PokemonFainted,
    #[error("{0} is already in battle!")]
    AlreadyActive(String),
    #[error("You can't run from trainer battles!")]
    CannotEscapeTrainerBattle,
    #[error("You can't steal the trainer's Pokémon!")]
    CannotCatchTrainerPokemon,
    #[error("Your party is full!")]
    PartyFull,
    #[error("There is nothing to catch!")]
    NoCatchTarget,
}

/// Result type alias for battle engine operations
pub type BattleResult<T> = Result<T, BattleEngineError>;

/// Result type alias for move data operations
pub type MoveDataResult<T> = Result<T, MoveDataError>;

/// Result type alias for species data operations
pub type SpeciesDataResult<T> = Result<T, SpeciesDataError>;

/// Result type alias for config loading
pub type ConfigResult<T> = Result<T, ConfigError>;
