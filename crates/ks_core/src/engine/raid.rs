//! Raid Resolution Engine
//!
//! Drives one raid end to end: lane feints, touch/bonus/retreat resolution,
//! QTE dispatch and outcome routing, chained multi-point presses, and the
//! three raid timers. Every state-ending path funnels through
//! `GameSim::end_raid`, which cancels all timers before anything else, so
//! no timer can observe a half-closed raid.

use rand::Rng;
use serde::Serialize;

use crate::config::RaidConfig;
use crate::engine::ai::{self, AiAction, AiContext};
use crate::engine::game::{GamePhase, GameSim};
use crate::engine::qte::{QteContext, QteDescriptor, QteInput};
use crate::formation::{FeintDirection, Lane};
use crate::models::{FieldPos, PlayerId, PlayerStats, TeamSide};

/// Public raid actions the presentation (or the AI loop) can dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaidAction {
    Touch,
    Retreat,
    Bonus,
}

/// Choice offered while the defense is reeling mid-chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiKillDecision {
    Press,
    Retreat,
}

/// Per-raid state, created at raid start and dropped at raid end. Exactly
/// one raid is active at a time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RaidContext {
    pub lane: Lane,
    pub points: u32,
    pub must_retreat: bool,
    pub multi_kill_count: u32,
    /// Seconds left on the raid clock.
    pub clock_remaining: u32,
    /// Drains one per second; zero eliminates the raider.
    pub stamina: u32,
    /// Present only while the game is in `QTE_ACTIVE`.
    pub active_qte: Option<QteDescriptor>,
}

impl RaidContext {
    pub(crate) fn new(config: &RaidConfig) -> Self {
        Self {
            lane: Lane::Center,
            points: 0,
            must_retreat: false,
            multi_kill_count: 0,
            clock_remaining: config.raid_clock_s,
            stamina: config.stamina_start,
            active_qte: None,
        }
    }
}

impl GameSim {
    // ========================
    // Raid lifecycle
    // ========================

    /// Send a chosen player over the line. Valid only from raider selection.
    pub fn start_player_raid(&mut self, raider_id: PlayerId) {
        if self.phase != GamePhase::SelectRaider {
            return;
        }
        if raider_id.side != TeamSide::Player {
            return;
        }
        match self.player_squad.get(raider_id) {
            Some(p) if !p.is_out => {}
            _ => return,
        }
        self.begin_raid(raider_id, FieldPos::new(10.0, 50.0), GamePhase::PlayerRaid);
    }

    /// Let the opponent pick its raider and cross over. Valid only once the
    /// turn has advanced into the AI raid state.
    pub fn start_ai_raid(&mut self) {
        if self.phase != GamePhase::AiRaid || self.raid.is_some() {
            return;
        }
        let Some(raider_id) = ai::select_raider(&self.ai_squad) else {
            return;
        };
        self.begin_raid(raider_id, FieldPos::new(90.0, 50.0), GamePhase::AiRaid);
    }

    fn begin_raid(&mut self, raider_id: PlayerId, start_pos: FieldPos, raid_phase: GamePhase) {
        self.current_raider = Some(raider_id);
        // Do-or-die is decided the moment the raid starts, from the raiding
        // team's own run of scoreless raids.
        self.is_do_or_die = self.empty_raids(raider_id.side) >= self.config.do_or_die_after;
        if let Some(p) = self.squad_mut(raider_id.side).get_mut(raider_id) {
            p.pos = start_pos;
        }
        self.raid = Some(RaidContext::new(&self.config));
        self.push_log(format!("{} raid started by {}.", raider_id.side.label(), raider_id));
        if self.is_do_or_die {
            self.push_log("This raid is do-or-die!".to_string());
        }
        self.set_phase(raid_phase);
        self.timers.arm_raid();
        if raid_phase == GamePhase::AiRaid {
            self.timers.arm_ai();
        }
    }

    // ========================
    // Timer callbacks
    // ========================

    /// Stamina drain, 1 Hz. Tolerates stray fires: state first, act second.
    pub(crate) fn on_stamina_tick(&mut self) {
        if !matches!(self.phase, GamePhase::PlayerRaid | GamePhase::AiRaid) {
            return;
        }
        let Some(raider_id) = self.current_raider else {
            return;
        };
        let depleted = match self.raid.as_mut() {
            Some(raid) => {
                raid.stamina = raid.stamina.saturating_sub(1);
                raid.stamina == 0
            }
            None => return,
        };
        if depleted {
            self.push_log("The raider is completely spent!".to_string());
            self.mark_out(raider_id, "Stamina depleted");
            self.end_raid(raider_id, 0, false);
        }
    }

    /// Raid clock, 1 Hz. Expiry is handled exactly like stamina depletion.
    pub(crate) fn on_clock_tick(&mut self) {
        if !matches!(self.phase, GamePhase::PlayerRaid | GamePhase::AiRaid) {
            return;
        }
        let Some(raider_id) = self.current_raider else {
            return;
        };
        let expired = match self.raid.as_mut() {
            Some(raid) => {
                raid.clock_remaining = raid.clock_remaining.saturating_sub(1);
                raid.clock_remaining == 0
            }
            None => return,
        };
        if expired {
            self.push_log("The raid clock runs out!".to_string());
            self.mark_out(raider_id, "Raid clock expired");
            self.end_raid(raider_id, 0, false);
        }
    }

    /// One opponent decision. The loop dies the moment the phase leaves the
    /// AI raid state, checked before acting; rescheduling is implicit in
    /// the timer handle and stops when the handle is cancelled.
    pub(crate) fn on_ai_think(&mut self) {
        if self.phase != GamePhase::AiRaid {
            self.timers.cancel_ai();
            return;
        }
        let Some(raider_id) = self.current_raider else {
            return;
        };
        let view = match &self.raid {
            Some(raid) => AiContext {
                stamina: raid.stamina,
                clock_remaining: raid.clock_remaining,
                is_do_or_die: self.is_do_or_die,
                points_scored: raid.points,
                must_retreat: raid.must_retreat,
                active_defenders: self.squad(raider_id.side.opponent()).active_count(),
            },
            None => return,
        };
        let action = ai::choose_action(&view, &self.config, &mut self.rng);
        match action {
            AiAction::Retreat => self.handle_raid_action(RaidAction::Retreat, None),
            AiAction::Bonus => self.handle_raid_action(RaidAction::Bonus, None),
            AiAction::Touch => {
                let lane = self.raid.as_ref().map(|r| r.lane).unwrap_or(Lane::Center);
                let target = ai::select_target(self.squad(raider_id.side.opponent()), lane);
                match target {
                    Some(t) => self.handle_raid_action(RaidAction::Touch, Some(t)),
                    None => self.handle_raid_action(RaidAction::Retreat, None),
                }
            }
            AiAction::Feint => {
                let lane = self.raid.as_ref().map(|r| r.lane).unwrap_or(Lane::Center);
                let direction = match lane {
                    Lane::Top => FeintDirection::Down,
                    Lane::Bottom => FeintDirection::Up,
                    Lane::Center => {
                        if self.rng.gen_bool(0.5) {
                            FeintDirection::Up
                        } else {
                            FeintDirection::Down
                        }
                    }
                };
                self.apply_feint(direction);
            }
        }
    }

    // ========================
    // Raider actions
    // ========================

    /// Shift the raider one lane. Public entry point, player raids only;
    /// the AI think loop reaches the same lane-change path internally.
    pub fn feint(&mut self, direction: FeintDirection) {
        if self.phase != GamePhase::PlayerRaid
            || self.raid.is_none()
            || self.current_raider.is_none()
        {
            return;
        }
        self.apply_feint(direction);
    }

    fn apply_feint(&mut self, direction: FeintDirection) {
        let Some(raider_id) = self.current_raider else {
            return;
        };
        let (old_lane, new_lane) = match &self.raid {
            Some(raid) => (raid.lane, raid.lane.shift(direction)),
            None => return,
        };
        if new_lane == old_lane {
            // Clamped at the edge of the board.
            return;
        }
        if let Some(raid) = self.raid.as_mut() {
            raid.lane = new_lane;
        }
        self.push_log(format!("The raider feints to the {} lane.", new_lane));
        self.update_raider_lane_position(new_lane);
        self.update_defender_formation(new_lane);

        let agility = self
            .squad(raider_id.side)
            .get(raider_id)
            .map(|p| p.stats.agility)
            .unwrap_or(0);
        let defenders = match raider_id.side.opponent() {
            TeamSide::Player => &self.player_squad,
            TeamSide::Ai => &self.ai_squad,
        };
        let baited = ai::bait_check(defenders, new_lane, agility, &self.config, &mut self.rng);
        if let Some(defender) = baited {
            self.push_log(format!("{} takes the bait!", defender));
            let input = QteInput::Mash { target: self.config.mash_target };
            self.trigger_qte(QteDescriptor { input, context: QteContext::FeintStruggle { defender } });
        }
    }

    /// Dispatch a raid action. No-op without an active raid; touch and
    /// bonus are also refused once the raider is committed to retreating.
    pub fn handle_raid_action(&mut self, action: RaidAction, target: Option<PlayerId>) {
        if self.raid.is_none() || !matches!(self.phase, GamePhase::PlayerRaid | GamePhase::AiRaid) {
            return;
        }
        let Some(raider_id) = self.current_raider else {
            return;
        };
        let must_retreat = self.raid.as_ref().map(|r| r.must_retreat).unwrap_or(false);
        match action {
            RaidAction::Touch => {
                if must_retreat {
                    return;
                }
                let Some(target_id) = target else {
                    return;
                };
                if target_id.side != raider_id.side.opponent() {
                    return;
                }
                match self.squad(target_id.side).get(target_id) {
                    Some(p) if !p.is_out => {}
                    _ => return,
                }
                self.push_log(format!("{} attempts a touch on {}.", raider_id, target_id));
                self.resolve_tackle(target_id, false);
            }
            RaidAction::Retreat => {
                self.resolve_retreat();
            }
            RaidAction::Bonus => {
                if must_retreat {
                    return;
                }
                self.push_log(format!("{} goes for the bonus.", raider_id));
                self.resolve_bonus();
            }
        }
    }

    /// Touch contest: agility against reflex decides who holds the
    /// advantage; the QTE outcome decides the point.
    fn resolve_tackle(&mut self, defender_id: PlayerId, chained: bool) {
        let Some((raider_id, raider_stats)) = self.raider_stats() else {
            return;
        };
        let Some(defender_stats) = self.squad(defender_id.side).get(defender_id).map(|p| p.stats)
        else {
            return;
        };
        let zone = self.config.timing_success_zone;
        if raider_stats.agility > defender_stats.reflex {
            self.push_log(format!("{} has the edge on {}!", raider_id, defender_id));
            let input = QteInput::Timing { success_zone: zone };
            self.trigger_qte(QteDescriptor {
                input,
                context: QteContext::TackleScore { defender: defender_id },
            });
        } else {
            self.push_log(format!("{} initiates a tackle!", defender_id));
            let input = if raider_id.side == TeamSide::Player {
                QteInput::Mash { target: self.config.mash_target }
            } else {
                QteInput::Timing { success_zone: zone }
            };
            let context = if chained {
                QteContext::MultiTackle { defender: defender_id }
            } else {
                QteContext::TackleEscape { defender: defender_id }
            };
            self.trigger_qte(QteDescriptor { input, context });
        }
    }

    /// Bonus attempt: sometimes free, sometimes contested, contested more
    /// often when a defender has already bitten on a feint.
    fn resolve_bonus(&mut self) {
        let Some((raider_id, raider_stats)) = self.raider_stats() else {
            return;
        };
        let lane = match &self.raid {
            Some(raid) => raid.lane,
            None => return,
        };
        let defenders = match raider_id.side.opponent() {
            TeamSide::Player => &self.player_squad,
            TeamSide::Ai => &self.ai_squad,
        };
        let baited =
            ai::bait_check(defenders, lane, raider_stats.agility, &self.config, &mut self.rng);
        let contest_chance = if baited.is_some() {
            self.config.bonus_contest_baited_chance
        } else {
            self.config.bonus_contest_chance
        };
        let contested = self.rng.gen_bool(contest_chance);
        let challenger = baited.or_else(|| self.nearest_defender());
        match (contested, challenger) {
            (true, Some(defender)) => {
                let (lo, hi) = (self.config.bonus_mash_min, self.config.bonus_mash_max);
                let target = self.rng.gen_range(lo..=hi);
                self.push_log(format!("{} contests the bonus!", defender));
                self.trigger_qte(QteDescriptor {
                    input: QteInput::Mash { target },
                    context: QteContext::BonusStruggle { defender },
                });
            }
            _ => {
                if let Some(raid) = self.raid.as_mut() {
                    raid.points += 1;
                    raid.must_retreat = true;
                }
                self.push_log("Bonus point! The raider must turn back.".to_string());
            }
        }
    }

    /// Retreat attempt. A scoreless do-or-die raid skips the block roll:
    /// the raider is simply out.
    fn resolve_retreat(&mut self) {
        let Some(raider_id) = self.current_raider else {
            return;
        };
        let points = match &self.raid {
            Some(raid) => raid.points,
            None => return,
        };
        if self.is_do_or_die && points == 0 {
            self.push_log("The do-or-die raid comes up empty!".to_string());
            self.mark_out(raider_id, "Failed do-or-die");
            self.end_raid(raider_id, 0, false);
            return;
        }
        self.push_log("The raider is retreating...".to_string());
        let defenders_left = self.squad(raider_id.side.opponent()).active_count();
        let block_chance = self.config.retreat_block_chance;
        let blocked = defenders_left > 0 && self.rng.gen_bool(block_chance);
        if blocked {
            self.push_log("The retreat is blocked!".to_string());
            let input = QteInput::Timing { success_zone: self.config.timing_success_zone };
            self.trigger_qte(QteDescriptor { input, context: QteContext::RetreatEscape });
        } else {
            self.push_log("The retreat is clean.".to_string());
            self.end_raid(raider_id, points, true);
        }
    }

    // ========================
    // QTE dispatch and routing
    // ========================

    /// Park the raid, store the descriptor, hand control to the input
    /// surface. Real-time pressure is suspended while a QTE runs.
    fn trigger_qte(&mut self, descriptor: QteDescriptor) {
        self.timers.cancel_raid();
        self.timers.cancel_ai();
        let Some(raid) = self.raid.as_mut() else {
            return;
        };
        raid.active_qte = Some(descriptor);
        self.push_log(format!("{} begins.", descriptor));
        self.set_phase(GamePhase::QteActive);
    }

    /// Route the single boolean the input surface reports back. The stored
    /// context is read before the descriptor is cleared; the raid state is
    /// restored to whichever side was raiding.
    ///
    /// During a player raid the boolean is the raider's result. During an
    /// AI raid the human was defending, so the boolean favours the defense.
    pub fn handle_qte_outcome(&mut self, success: bool) {
        if self.phase != GamePhase::QteActive {
            return;
        }
        let Some(raider_id) = self.current_raider else {
            return;
        };
        let Some(descriptor) = self.raid.as_mut().and_then(|r| r.active_qte.take()) else {
            return;
        };
        let context = descriptor.context;
        let raid_phase = match raider_id.side {
            TeamSide::Player => GamePhase::PlayerRaid,
            TeamSide::Ai => GamePhase::AiRaid,
        };
        self.set_phase(raid_phase);
        match raider_id.side {
            TeamSide::Player => {
                if success {
                    self.on_raider_qte_success(raider_id, context);
                } else {
                    self.on_raider_qte_failure(raider_id, context);
                }
            }
            TeamSide::Ai => self.on_defense_qte_outcome(raider_id, context, success),
        }
    }

    fn on_raider_qte_success(&mut self, raider_id: PlayerId, context: QteContext) {
        match context {
            QteContext::TackleScore { defender } => {
                self.push_log(format!("Touch lands on {}!", defender));
                self.score_touch(raider_id, defender);
            }
            QteContext::TackleEscape { .. } | QteContext::MultiTackle { .. } => {
                let points = self.raid.as_ref().map(|r| r.points).unwrap_or(0);
                if self.is_do_or_die && points == 0 {
                    self.push_log(
                        "Free of the tackle, but the do-or-die raid has failed!".to_string(),
                    );
                    self.mark_out(raider_id, "Failed do-or-die");
                    self.end_raid(raider_id, 0, false);
                } else {
                    self.push_log("The raider breaks free!".to_string());
                    if let Some(raid) = self.raid.as_mut() {
                        raid.must_retreat = true;
                    }
                    self.resume_raid_timers();
                }
            }
            QteContext::FeintStruggle { defender } => {
                self.struggle_point(defender);
                self.maybe_escalate(self.config.feint_escalate_chance);
            }
            QteContext::BonusStruggle { defender } => {
                self.struggle_point(defender);
                if let Some(raid) = self.raid.as_mut() {
                    raid.must_retreat = true;
                }
                self.push_log("Bonus secured the hard way. Time to go home.".to_string());
                self.resume_raid_timers();
            }
            QteContext::MultiStruggle2 { defender } => {
                self.struggle_point(defender);
                self.maybe_escalate(self.config.multi_struggle_escalate_chance);
            }
            QteContext::MultiStruggle3 { defender } => {
                self.struggle_point(defender);
                if let Some(raid) = self.raid.as_mut() {
                    raid.must_retreat = true;
                }
                self.push_log("Three points in one raid. The raider has to come home.".to_string());
                self.resume_raid_timers();
            }
            QteContext::RetreatEscape => {
                let points = self.raid.as_ref().map(|r| r.points).unwrap_or(0);
                self.push_log("The raider slips the block!".to_string());
                self.end_raid(raider_id, points, true);
            }
        }
    }

    fn on_raider_qte_failure(&mut self, raider_id: PlayerId, context: QteContext) {
        match context {
            QteContext::TackleScore { .. } => {
                self.push_log("The touch is blocked.".to_string());
                self.resume_raid_timers();
            }
            QteContext::TackleEscape { .. } | QteContext::MultiTackle { .. } => {
                self.mark_out(raider_id, "Tackled");
                self.end_raid(raider_id, 0, false);
            }
            QteContext::FeintStruggle { .. }
            | QteContext::BonusStruggle { .. }
            | QteContext::MultiStruggle2 { .. }
            | QteContext::MultiStruggle3 { .. } => {
                self.mark_out(raider_id, "Beaten in the struggle");
                self.end_raid(raider_id, 0, false);
            }
            QteContext::RetreatEscape => {
                self.mark_out(raider_id, "Caught during retreat");
                self.end_raid(raider_id, 0, false);
            }
        }
    }

    /// AI raid: the human played defense, so outcomes flip sides. A failed
    /// defense costs the defending player and hands the AI a walk-home
    /// point; this asymmetry is intended.
    fn on_defense_qte_outcome(
        &mut self,
        raider_id: PlayerId,
        context: QteContext,
        defense_won: bool,
    ) {
        match context {
            QteContext::TackleScore { defender } => {
                if defense_won {
                    self.push_log(format!("{} dodges the touch!", defender));
                    self.resume_raid_timers();
                } else {
                    self.push_log(format!("Touch lands on {}!", defender));
                    self.score_touch(raider_id, defender);
                }
            }
            QteContext::TackleEscape { defender } | QteContext::MultiTackle { defender } => {
                if defense_won {
                    self.push_log(format!("{} brings the raider down!", defender));
                    self.mark_out(raider_id, "Tackled");
                    self.end_raid(raider_id, 0, false);
                } else {
                    self.defense_collapse(raider_id, defender, "Failed the tackle");
                }
            }
            QteContext::FeintStruggle { defender }
            | QteContext::BonusStruggle { defender }
            | QteContext::MultiStruggle2 { defender }
            | QteContext::MultiStruggle3 { defender } => {
                if defense_won {
                    self.push_log(format!("{} wins the struggle!", defender));
                    self.mark_out(raider_id, "Thrown in the struggle");
                    self.end_raid(raider_id, 0, false);
                } else {
                    self.defense_collapse(raider_id, defender, "Lost the struggle");
                }
            }
            QteContext::RetreatEscape => {
                if defense_won {
                    self.mark_out(raider_id, "Caught during retreat");
                    self.end_raid(raider_id, 0, false);
                } else {
                    let points = self.raid.as_ref().map(|r| r.points).unwrap_or(0);
                    self.push_log("The raider slips away!".to_string());
                    self.end_raid(raider_id, points, true);
                }
            }
        }
    }

    /// A tagged defender, a point, and possibly a chained follow-up touch.
    fn score_touch(&mut self, raider_id: PlayerId, defender_id: PlayerId) {
        self.mark_out(defender_id, "Tagged by the raider");
        let count = match self.raid.as_mut() {
            Some(raid) => {
                raid.points += 1;
                raid.multi_kill_count += 1;
                raid.multi_kill_count
            }
            None => return,
        };
        if count >= self.config.multi_kill_cap {
            self.push_log("The chain is capped. The raider turns back.".to_string());
            if let Some(raid) = self.raid.as_mut() {
                raid.must_retreat = true;
            }
            self.resume_raid_timers();
            return;
        }
        let chain_chance = if count == 1 {
            self.config.multi_kill_chain_p2
        } else {
            self.config.multi_kill_chain_p3
        };
        if let Some(next) = self.nearest_defender() {
            if self.rng.gen_bool(chain_chance) {
                self.push_log("The raider keeps pressing!".to_string());
                self.resolve_tackle(next, true);
                return;
            }
        }
        if let Some(raid) = self.raid.as_mut() {
            raid.must_retreat = true;
        }
        self.push_log("The chain ends. Time to come home.".to_string());
        self.resume_raid_timers();
    }

    /// Eliminate a struggle opponent and bank the point.
    fn struggle_point(&mut self, defender_id: PlayerId) {
        self.mark_out(defender_id, "Lost the struggle");
        if let Some(raid) = self.raid.as_mut() {
            raid.points += 1;
        }
    }

    /// Either open a press-or-retreat decision or let the raid roll on.
    fn maybe_escalate(&mut self, chance: f64) {
        let has_defender = self
            .current_raider
            .map(|r| self.squad(r.side.opponent()).active_count() > 0)
            .unwrap_or(false);
        if has_defender && self.rng.gen_bool(chance) {
            self.push_log("The defense is reeling. Press or retreat?".to_string());
            self.set_phase(GamePhase::RaidDecision);
            // Timers stay parked until the decision resolves.
        } else {
            self.resume_raid_timers();
        }
    }

    /// The asymmetric AI-raid branch: the beaten defender goes out, the AI
    /// banks one point and retreats untouched.
    fn defense_collapse(&mut self, raider_id: PlayerId, defender_id: PlayerId, reason: &str) {
        self.mark_out(defender_id, reason);
        if let Some(raid) = self.raid.as_mut() {
            raid.points += 1;
        }
        let points = self.raid.as_ref().map(|r| r.points).unwrap_or(1);
        self.push_log("The raider powers through and heads home!".to_string());
        self.end_raid(raider_id, points, true);
    }

    /// Answer the press-or-retreat decision. Valid only from the decision
    /// state.
    pub fn resolve_multi_kill(&mut self, decision: MultiKillDecision) {
        if self.phase != GamePhase::RaidDecision || self.raid.is_none() {
            return;
        }
        let Some(raider_id) = self.current_raider else {
            return;
        };
        let raid_phase = match raider_id.side {
            TeamSide::Player => GamePhase::PlayerRaid,
            TeamSide::Ai => GamePhase::AiRaid,
        };
        match decision {
            MultiKillDecision::Retreat => {
                self.push_log("The raider settles for what they have.".to_string());
                if let Some(raid) = self.raid.as_mut() {
                    raid.must_retreat = true;
                }
                self.set_phase(raid_phase);
                self.resume_raid_timers();
            }
            MultiKillDecision::Press => {
                let Some(next) = self.nearest_defender() else {
                    // Nobody left to press against.
                    if let Some(raid) = self.raid.as_mut() {
                        raid.must_retreat = true;
                    }
                    self.set_phase(raid_phase);
                    self.resume_raid_timers();
                    return;
                };
                self.set_phase(raid_phase);
                let points = self.raid.as_ref().map(|r| r.points).unwrap_or(0);
                let context = if points >= 2 {
                    QteContext::MultiStruggle3 { defender: next }
                } else {
                    QteContext::MultiStruggle2 { defender: next }
                };
                self.push_log(format!("The raider presses toward {}!", next));
                let input = QteInput::Mash { target: self.config.mash_target };
                self.trigger_qte(QteDescriptor { input, context });
            }
        }
    }

    // ========================
    // Helpers
    // ========================

    fn raider_stats(&self) -> Option<(PlayerId, PlayerStats)> {
        let id = self.current_raider?;
        let player = self.squad(id.side).get(id)?;
        Some((id, player.stats))
    }

    /// Closest standing defender by vertical distance to the raider; ties
    /// go to roster order.
    pub(crate) fn nearest_defender(&self) -> Option<PlayerId> {
        let raider_id = self.current_raider?;
        let raider_y = self.squad(raider_id.side).get(raider_id)?.pos.y;
        self.squad(raider_id.side.opponent())
            .actives()
            .min_by(|a, b| {
                let da = (a.pos.y - raider_y).abs();
                let db = (b.pos.y - raider_y).abs();
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|p| p.id)
    }

    fn update_raider_lane_position(&mut self, lane: Lane) {
        let Some(raider_id) = self.current_raider else {
            return;
        };
        let y = match lane {
            Lane::Top => 25.0,
            Lane::Center => 50.0,
            Lane::Bottom => 75.0,
        };
        match raider_id.side {
            TeamSide::Player => {
                let x = if lane == Lane::Center { 40.0 } else { 50.0 };
                if let Some(p) = self.squad_mut(raider_id.side).get_mut(raider_id) {
                    p.pos = FieldPos::new(x, y);
                }
            }
            TeamSide::Ai => {
                // The AI raider only slides vertically.
                if let Some(p) = self.squad_mut(raider_id.side).get_mut(raider_id) {
                    p.pos.y = y;
                }
            }
        }
    }

    /// Restart the real-time pressure after a QTE or decision resolves in
    /// favour of the raid continuing.
    fn resume_raid_timers(&mut self) {
        if self.raid.is_none() {
            return;
        }
        match self.phase {
            GamePhase::PlayerRaid => self.timers.arm_raid(),
            GamePhase::AiRaid => {
                self.timers.arm_raid();
                self.timers.arm_ai();
            }
            _ => {}
        }
    }
}
