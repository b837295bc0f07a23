//! # ks_core - Deterministic Kabaddi Raid Simulation Engine
//!
//! Turn-based raiding with a real-time pressure layer: two sides alternate
//! raids into each other's half while stamina drain, a raid clock, and the
//! opponent's think loop tick against the raider. Contested moments suspend
//! the clocks and hand control to a skill-check mini-game whose single
//! boolean outcome is routed back through a tagged context.
//!
//! ## Features
//! - 100% deterministic simulation (same seed + same inputs = same game)
//! - Explicit state machine with silent no-op guards on every public action
//! - Serializable full-state snapshots for any front end
//!
//! The engine is headless. A front end renders snapshots, captures
//! mini-game input, and calls back with `handle_qte_outcome`; `ks_cli` in
//! this workspace is the reference driver.

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod formation;
pub mod logbook;
pub mod models;

pub use api::GameSnapshot;
pub use config::RaidConfig;
pub use engine::{
    GamePhase, GamePlan, GameSim, MatchWinner, MultiKillDecision, OutQueue, QteContext,
    QteDescriptor, QteInput, RaidAction, RaidContext,
};
pub use error::{GameError, Result};
pub use formation::{formation_positions, FeintDirection, Lane};
pub use logbook::{GameLog, LogEntry};
pub use models::{FieldPos, Player, PlayerId, PlayerStats, Squad, TeamSide};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;
