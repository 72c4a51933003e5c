// Battle Schema - Shared type definitions
// This crate contains the core enums and on-disk data shapes shared by the
// battle engine and any tooling that reads or writes its RON data files.

// Re-export the main types
pub use move_data::*;
pub use move_types::*;
pub use pokemon_types::*;
pub use species_data::*;

pub mod move_data;
pub mod move_types;
pub mod pokemon_types;
pub mod species_data;
