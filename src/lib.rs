//! Multi-level parking lot model with a traffic simulator on top.

pub mod cli;
pub mod config;
/// Scripted walkthrough of the lot operations.
pub mod demo;
pub mod error;
/// CSV export of simulation results and lot snapshots.
pub mod io;
/// Spots, levels, and the lot itself.
pub mod lot;
/// Traffic generation, step engine, and KPIs.
pub mod sim;
pub mod vehicle;

#[cfg(feature = "api")]
pub mod api;

#[cfg(feature = "tui")]
pub mod tui;
