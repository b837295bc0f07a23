//! Read-Only State Snapshot
//!
//! The presentation layer never touches the simulation's internals: it
//! renders from a serializable snapshot and dispatches the public actions.
//! The snapshot is a full copy, cheap at this scale, so a front end can
//! keep the previous frame around and diff against it.

use serde::Serialize;

use crate::engine::game::{GamePhase, GameSim, MatchWinner};
use crate::engine::raid::RaidContext;
use crate::error::Result;
use crate::models::{PlayerId, Squad, TeamSide};

#[derive(Debug, Clone, Serialize)]
pub struct GameSnapshot {
    pub schema_version: u8,
    pub phase: GamePhase,
    pub raid_count: u32,
    pub player_score: u32,
    pub ai_score: u32,
    pub player_empty_raids: u32,
    pub ai_empty_raids: u32,
    pub is_do_or_die: bool,
    pub last_raid_by: Option<TeamSide>,
    pub current_raider: Option<PlayerId>,
    pub winner: Option<MatchWinner>,
    pub player_squad: Squad,
    pub ai_squad: Squad,
    pub player_out: Vec<PlayerId>,
    pub ai_out: Vec<PlayerId>,
    pub raid: Option<RaidContext>,
}

impl GameSim {
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            schema_version: crate::SCHEMA_VERSION,
            phase: self.phase,
            raid_count: self.raid_count,
            player_score: self.player_score,
            ai_score: self.ai_score,
            player_empty_raids: self.player_empty_raids,
            ai_empty_raids: self.ai_empty_raids,
            is_do_or_die: self.is_do_or_die,
            last_raid_by: self.last_raid_by,
            current_raider: self.current_raider,
            winner: self.winner,
            player_squad: self.player_squad.clone(),
            ai_squad: self.ai_squad.clone(),
            player_out: self.player_out.ids(),
            ai_out: self.ai_out.ids(),
            raid: self.raid.clone(),
        }
    }

    pub fn snapshot_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.snapshot())?)
    }
}
