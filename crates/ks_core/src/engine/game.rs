//! Game Flow Controller
//!
//! `GameSim` is the single owner of all match state: rosters, scores,
//! queues, the active raid, the timer handles, and the rng. Every public
//! action is guarded by the state machine below; a call that arrives in the
//! wrong state is a silent no-op, never a panic and never a half-applied
//! transition.
//!
//! State machine:
//!
//! ```text
//! PRE_GAME -> SELECT_RAIDER -> PLAYER_RAID <-> QTE_ACTIVE
//!                              PLAYER_RAID <-> RAID_DECISION
//!              PLAYER_RAID / AI_RAID -> RAID_END -> (AI_RAID | SELECT_RAIDER)
//!                                    -> ... -> GAME_OVER
//! ```
//!
//! `QTE_ACTIVE` always returns to whichever raid state dispatched it.

use std::fmt;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::config::RaidConfig;
use crate::engine::out_queue::OutQueue;
use crate::engine::raid::RaidContext;
use crate::engine::timers::{RaidTimers, TimerKind};
use crate::error::Result;
use crate::formation::{formation_positions, Lane};
use crate::logbook::GameLog;
use crate::models::{FieldPos, PlayerId, Squad, TeamSide};

/// Top-level game states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GamePhase {
    PreGame,
    SelectRaider,
    PlayerRaid,
    RaidDecision,
    AiRaid,
    QteActive,
    RaidEnd,
    GameOver,
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GamePhase::PreGame => "PRE_GAME",
            GamePhase::SelectRaider => "SELECT_RAIDER",
            GamePhase::PlayerRaid => "PLAYER_RAID",
            GamePhase::RaidDecision => "RAID_DECISION",
            GamePhase::AiRaid => "AI_RAID",
            GamePhase::QteActive => "QTE_ACTIVE",
            GamePhase::RaidEnd => "RAID_END",
            GamePhase::GameOver => "GAME_OVER",
        };
        f.write_str(name)
    }
}

/// Final result once the phase reaches `GameOver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchWinner {
    Player,
    Ai,
    Draw,
}

/// Everything needed to build a reproducible simulation.
#[derive(Debug, Clone)]
pub struct GamePlan {
    pub seed: u64,
    pub config: RaidConfig,
}

pub struct GameSim {
    pub(crate) config: RaidConfig,
    pub(crate) rng: ChaCha8Rng,
    pub(crate) phase: GamePhase,
    pub(crate) player_squad: Squad,
    pub(crate) ai_squad: Squad,
    pub(crate) player_score: u32,
    pub(crate) ai_score: u32,
    pub(crate) player_empty_raids: u32,
    pub(crate) ai_empty_raids: u32,
    pub(crate) player_out: OutQueue,
    pub(crate) ai_out: OutQueue,
    pub(crate) raid_count: u32,
    pub(crate) last_raid_by: Option<TeamSide>,
    pub(crate) current_raider: Option<PlayerId>,
    pub(crate) is_do_or_die: bool,
    pub(crate) raid: Option<RaidContext>,
    pub(crate) timers: RaidTimers,
    pub(crate) tick_count: u64,
    pub(crate) logbook: GameLog,
    pub(crate) winner: Option<MatchWinner>,
}

impl GameSim {
    pub fn new(plan: GamePlan) -> Result<Self> {
        plan.config.validate()?;
        Ok(Self {
            rng: ChaCha8Rng::seed_from_u64(plan.seed),
            phase: GamePhase::PreGame,
            player_squad: Squad::empty(TeamSide::Player),
            ai_squad: Squad::empty(TeamSide::Ai),
            player_score: 0,
            ai_score: 0,
            player_empty_raids: 0,
            ai_empty_raids: 0,
            player_out: OutQueue::default(),
            ai_out: OutQueue::default(),
            raid_count: 0,
            last_raid_by: None,
            current_raider: None,
            is_do_or_die: false,
            raid: None,
            timers: RaidTimers::default(),
            tick_count: 0,
            logbook: GameLog::default(),
            winner: None,
            config: plan.config,
        })
    }

    /// A simulation with the default rules.
    pub fn with_seed(seed: u64) -> Self {
        Self::new(GamePlan { seed, config: RaidConfig::default() })
            .expect("default config is valid")
    }

    // ========================
    // Read access
    // ========================

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn config(&self) -> &RaidConfig {
        &self.config
    }

    pub fn player_squad(&self) -> &Squad {
        &self.player_squad
    }

    pub fn ai_squad(&self) -> &Squad {
        &self.ai_squad
    }

    pub fn squad(&self, side: TeamSide) -> &Squad {
        match side {
            TeamSide::Player => &self.player_squad,
            TeamSide::Ai => &self.ai_squad,
        }
    }

    pub(crate) fn squad_mut(&mut self, side: TeamSide) -> &mut Squad {
        match side {
            TeamSide::Player => &mut self.player_squad,
            TeamSide::Ai => &mut self.ai_squad,
        }
    }

    pub fn score(&self, side: TeamSide) -> u32 {
        match side {
            TeamSide::Player => self.player_score,
            TeamSide::Ai => self.ai_score,
        }
    }

    pub fn empty_raids(&self, side: TeamSide) -> u32 {
        match side {
            TeamSide::Player => self.player_empty_raids,
            TeamSide::Ai => self.ai_empty_raids,
        }
    }

    pub fn out_queue(&self, side: TeamSide) -> &OutQueue {
        match side {
            TeamSide::Player => &self.player_out,
            TeamSide::Ai => &self.ai_out,
        }
    }

    pub fn raid(&self) -> Option<&RaidContext> {
        self.raid.as_ref()
    }

    pub fn current_raider(&self) -> Option<PlayerId> {
        self.current_raider
    }

    pub fn is_do_or_die(&self) -> bool {
        self.is_do_or_die
    }

    pub fn raid_count(&self) -> u32 {
        self.raid_count
    }

    pub fn last_raid_by(&self) -> Option<TeamSide> {
        self.last_raid_by
    }

    pub fn winner(&self) -> Option<MatchWinner> {
        self.winner
    }

    pub fn log(&self) -> &GameLog {
        &self.logbook
    }

    pub fn ticks(&self) -> u64 {
        self.tick_count
    }

    // ========================
    // Game lifecycle
    // ========================

    /// Reset everything and roll two fresh rosters.
    pub fn start_game(&mut self) {
        let size = self.config.team_size;
        self.player_squad = Squad::generate(TeamSide::Player, size, &mut self.rng);
        self.ai_squad = Squad::generate(TeamSide::Ai, size, &mut self.rng);
        self.player_score = 0;
        self.ai_score = 0;
        self.player_empty_raids = 0;
        self.ai_empty_raids = 0;
        self.player_out.clear();
        self.ai_out.clear();
        self.raid_count = 0;
        self.last_raid_by = None;
        self.current_raider = None;
        self.is_do_or_die = false;
        self.raid = None;
        self.winner = None;
        self.timers.cancel_all();
        self.logbook.clear();
        self.push_log("A new game has started.".to_string());
        self.reset_formations(Lane::Center);
        self.set_phase(GamePhase::SelectRaider);
    }

    /// Advance the turn after a raid has fully ended.
    pub fn next_turn(&mut self) {
        if self.phase != GamePhase::RaidEnd {
            return;
        }
        match self.last_raid_by {
            Some(TeamSide::Player) => {
                self.set_phase(GamePhase::AiRaid);
                self.start_ai_raid();
            }
            _ => {
                // The raider id survives end-of-raid bookkeeping and is only
                // released once the turn fully comes back to selection.
                self.current_raider = None;
                self.set_phase(GamePhase::SelectRaider);
            }
        }
    }

    /// Advance the simulation one engine tick (0.5 s of game time).
    pub fn tick(&mut self) {
        self.tick_count += 1;
        for kind in self.timers.advance() {
            // An earlier handler this tick may have cancelled the rest.
            if !self.timers.is_armed(kind) {
                continue;
            }
            match kind {
                TimerKind::Stamina => self.on_stamina_tick(),
                TimerKind::Clock => self.on_clock_tick(),
                TimerKind::AiThink => self.on_ai_think(),
            }
        }
    }

    // ========================
    // Raid bookkeeping
    // ========================

    /// Close out the active raid. Exactly one call ends any raid: the guard
    /// on `self.raid` makes a second call for the same raid a no-op.
    pub(crate) fn end_raid(&mut self, raider_id: PlayerId, points: u32, successful: bool) {
        if self.raid.is_none() {
            return;
        }
        self.timers.cancel_all();
        let side = raider_id.side;
        self.last_raid_by = Some(side);

        if successful {
            self.push_log(format!("{} raid ends with {} point(s).", side.label(), points));
        } else {
            self.push_log(format!("{} raid fails.", side.label()));
        }

        // Empty-raid accounting keys on points, not on the success flag: a
        // clean but scoreless retreat still counts toward do-or-die.
        if points > 0 {
            match side {
                TeamSide::Player => {
                    self.player_score += points;
                    self.player_empty_raids = 0;
                }
                TeamSide::Ai => {
                    self.ai_score += points;
                    self.ai_empty_raids = 0;
                }
            }
            self.revive_for(side, points);
        } else {
            match side {
                TeamSide::Player => self.player_empty_raids += 1,
                TeamSide::Ai => self.ai_empty_raids += 1,
            }
        }

        self.is_do_or_die = false;
        self.raid = None;
        self.raid_count += 1;
        self.push_log(format!("Raid {} is over.", self.raid_count));

        if self.check_all_out() {
            return;
        }
        self.set_raider_post_raid_position();
        if self.check_for_game_end() {
            return;
        }
        self.set_phase(GamePhase::RaidEnd);
        self.reset_formations(Lane::Center);
    }

    /// Flag a player out, queue them for revival, log why.
    pub(crate) fn mark_out(&mut self, id: PlayerId, reason: &str) {
        let Some(player) = self.squad_mut(id.side).get_mut(id) else {
            return;
        };
        if player.is_out {
            return;
        }
        player.is_out = true;
        match id.side {
            TeamSide::Player => self.player_out.push(id),
            TeamSide::Ai => self.ai_out.push(id),
        };
        self.push_log(format!("{} is out ({}).", id, reason));
    }

    /// A scoring raid revives the raiding team's own earliest eliminations.
    fn revive_for(&mut self, side: TeamSide, points: u32) {
        let revived = match side {
            TeamSide::Player => self.player_out.revive(points as usize),
            TeamSide::Ai => self.ai_out.revive(points as usize),
        };
        if revived.is_empty() {
            return;
        }
        for id in &revived {
            if let Some(p) = self.squad_mut(side).get_mut(*id) {
                p.is_out = false;
            }
        }
        self.push_log(format!("{} side revives {} teammate(s).", side.label(), revived.len()));
    }

    /// An empty roster ends the game on the spot for the other side.
    fn check_all_out(&mut self) -> bool {
        if self.player_squad.is_all_out() {
            self.push_log("The whole player side is out. The AI wins!".to_string());
            self.finish(MatchWinner::Ai);
            true
        } else if self.ai_squad.is_all_out() {
            self.push_log("The whole AI side is out. The player wins!".to_string());
            self.finish(MatchWinner::Player);
            true
        } else {
            false
        }
    }

    /// After the raid limit, the higher score takes the match.
    fn check_for_game_end(&mut self) -> bool {
        if self.raid_count < self.config.max_raids {
            return false;
        }
        self.push_log("Raid limit reached.".to_string());
        let (p, a) = (self.player_score, self.ai_score);
        let winner = if p > a {
            self.push_log(format!("The player wins {}-{}!", p, a));
            MatchWinner::Player
        } else if a > p {
            self.push_log(format!("The AI wins {}-{}!", a, p));
            MatchWinner::Ai
        } else {
            self.push_log(format!("The game ends in a draw, {}-{}.", p, a));
            MatchWinner::Draw
        };
        self.finish(winner);
        true
    }

    fn finish(&mut self, winner: MatchWinner) {
        self.winner = Some(winner);
        self.timers.cancel_all();
        self.set_phase(GamePhase::GameOver);
    }

    // ========================
    // Shared helpers
    // ========================

    pub(crate) fn set_phase(&mut self, phase: GamePhase) {
        if self.phase == phase {
            return;
        }
        self.phase = phase;
        self.push_log(format!("Game state -> {}", phase));
    }

    pub(crate) fn push_log(&mut self, message: String) {
        self.logbook.push(self.tick_count, message);
    }

    /// Re-seat one side's standing defenders (minus the raider) on the
    /// formation arc for `lane`. The AI half mirrors x.
    pub(crate) fn position_squad(&mut self, side: TeamSide, lane: Lane) {
        let raider = self.current_raider;
        let mirror = side == TeamSide::Ai;
        let squad = self.squad_mut(side);
        let count = squad
            .players
            .iter()
            .filter(|p| !p.is_out && Some(p.id) != raider)
            .count();
        let table = formation_positions(count, lane);
        let mut slot = 0usize;
        for p in squad.players.iter_mut() {
            if p.is_out || Some(p.id) == raider {
                continue;
            }
            let base = table.get(slot).copied().unwrap_or(FieldPos::new(50.0, 50.0));
            slot += 1;
            p.pos = if mirror { FieldPos::new(100.0 - base.x, base.y) } else { base };
        }
    }

    pub(crate) fn reset_formations(&mut self, lane: Lane) {
        self.position_squad(TeamSide::Player, lane);
        self.position_squad(TeamSide::Ai, lane);
    }

    /// Move only the side defending against the current raider.
    pub(crate) fn update_defender_formation(&mut self, lane: Lane) {
        let Some(raider) = self.current_raider else {
            return;
        };
        self.position_squad(raider.side.opponent(), lane);
    }

    fn set_raider_post_raid_position(&mut self) {
        let Some(raider) = self.current_raider else {
            return;
        };
        let home = match raider.side {
            TeamSide::Player => FieldPos::new(5.0, 50.0),
            TeamSide::Ai => FieldPos::new(95.0, 50.0),
        };
        if let Some(p) = self.squad_mut(raider.side).get_mut(raider) {
            p.pos = home;
        }
    }
}
