//! Creature Battle Engine
//!
//! A turn-based battle engine for creature collection games: type matchups,
//! status conditions, move resolution, turn ordering, capture, escape and
//! experience, driven as an async script against a pluggable presentation layer.

// --- MODULE DECLARATIONS ---
// This declares the module hierarchy for the crate.
pub mod battle;
pub mod config;
pub mod dex;
pub mod errors;
pub mod moves;
pub mod party;
pub mod player;
pub mod pokemon;
pub mod species;

// --- PUBLIC API RE-EXPORTS ---
// The types most callers need, importable from the crate root.

// --- From the `schema` crate ---
pub use schema::{
    // Supporting Types & Enums
    BaseStats,
    GrowthRate,
    LearnsetEntry,
    MoveCategory,
    MoveEffects,
    MultiHit,
    SecondaryEffect,
    StatBoost,
    StatType,
    StatusType,
    Target,
    VolatileType,
    // Core Data Structs
    MoveData,
    PokemonSpecies,
    PokemonType,
};

// --- From this crate's modules (`src/`) ---

// The battle session and its collaborators.
pub use battle::ai::{Behavior, RandomBehavior};
pub use battle::engine::{input_channel, BattleInput, BattleReport, BattleSession};
pub use battle::presentation::{Cue, PresentationEvent, PresentationPort, RecordingPresenter};
pub use battle::state::{BattleOutcome, BattlePhase, BattleType, Side, TurnRng};

// Core runtime types for a battle.
pub use battle::conditions::{StatusCondition, VolatileCondition};
pub use moves::{MoveChoice, MoveInstance};
pub use party::Party;
pub use player::BattlePlayer;
pub use pokemon::PokemonInst;
pub use species::Species;

// Data and configuration.
pub use config::{BattleConfig, Pacing, SpeedTiePolicy};
pub use dex::Dex;

// Crate-specific error and result types.
pub use errors::{
    ActionError, BattleEngineError, BattleResult, BattleStateError, ConfigError, MoveDataError,
    MoveDataResult, SpeciesDataError, SpeciesDataResult,
};
