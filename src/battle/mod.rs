pub mod ai;
pub mod calculators;
pub mod catch;
pub mod conditions;
pub mod engine;
pub mod presentation;
pub mod progression;
pub mod resolver;
pub mod state;
pub mod stats;
pub mod turn_orchestrator;

#[cfg(test)]
pub mod tests;
