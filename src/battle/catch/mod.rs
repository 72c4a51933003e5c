pub mod calculation;
pub mod commands;
pub mod validation;

pub use calculation::*;
pub use validation::*;
