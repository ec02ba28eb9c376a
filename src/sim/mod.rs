pub mod engine;
pub mod kpi;
/// Seeded arrival and departure generation.
pub mod traffic;
pub mod types;
