pub mod ai;
pub mod game;
pub mod out_queue;
pub mod qte;
pub mod raid;
pub mod timers;

#[cfg(test)]
mod scenario_tests;
#[cfg(test)]
pub(crate) mod test_support;

pub use game::{GamePhase, GamePlan, GameSim, MatchWinner};
pub use out_queue::OutQueue;
pub use qte::{QteContext, QteDescriptor, QteInput};
pub use raid::{MultiKillDecision, RaidAction, RaidContext};
