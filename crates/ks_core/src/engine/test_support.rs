//! Shared fixtures for engine tests.
//!
//! Rosters rolled at game start have random attributes; these helpers pin
//! them down so contested branches resolve the way a test expects.

use crate::config::RaidConfig;
use crate::engine::game::{GamePlan, GameSim};
use crate::models::{PlayerId, TeamSide};

/// A started game with the given rules.
pub(crate) fn sim_with(config: RaidConfig, seed: u64) -> GameSim {
    let mut sim = GameSim::new(GamePlan { seed, config }).expect("test config is valid");
    sim.start_game();
    sim
}

pub(crate) fn set_stats(sim: &mut GameSim, id: PlayerId, strength: u8, agility: u8, reflex: u8) {
    let player = sim.squad_mut(id.side).get_mut(id).expect("player exists");
    player.stats.strength = strength;
    player.stats.agility = agility;
    player.stats.reflex = reflex;
}

/// Pin every player on a side to the same attribute line.
pub(crate) fn set_side_stats(sim: &mut GameSim, side: TeamSide, strength: u8, agility: u8, reflex: u8) {
    let ids: Vec<PlayerId> = sim.squad(side).players.iter().map(|p| p.id).collect();
    for id in ids {
        set_stats(sim, id, strength, agility, reflex);
    }
}
