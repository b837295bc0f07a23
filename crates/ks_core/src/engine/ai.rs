//! Opponent Decision Brain
//!
//! Pure decision functions polled by the raid engine. They read state and a
//! shared rng but never mutate the game; whatever they return is executed
//! (or ignored, if a guard says no) by the caller. Keeping them free of
//! state mutation means the same brain can drive either side.

use rand::Rng;

use crate::config::RaidConfig;
use crate::formation::Lane;
use crate::models::{PlayerId, Squad};

/// What the brain wants to do this think tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiAction {
    Feint,
    Touch,
    Bonus,
    Retreat,
}

/// The slice of raid state the action policy looks at.
#[derive(Debug, Clone, Copy)]
pub struct AiContext {
    pub stamina: u32,
    pub clock_remaining: u32,
    pub is_do_or_die: bool,
    pub points_scored: u32,
    pub must_retreat: bool,
    pub active_defenders: usize,
}

/// Pick the raider: highest combined agility + strength still standing.
pub fn select_raider(squad: &Squad) -> Option<PlayerId> {
    squad
        .actives()
        .max_by_key(|p| p.stats.agility as u16 + p.stats.strength as u16)
        .map(|p| p.id)
}

/// Score every standing defender and pick the weakest reachable one.
///
/// Low reflex is worth up to 10 - ref points; sharing the raider's lane is
/// worth a flat 10 more. Ties go to roster order.
pub fn select_target(defenders: &Squad, lane: Lane) -> Option<PlayerId> {
    let mut best: Option<(i32, PlayerId)> = None;
    for p in defenders.actives() {
        let proximity = if lane.contains_y(p.pos.y) { 10 } else { 0 };
        let score = (10 - p.stats.reflex as i32) + proximity;
        if best.map_or(true, |(top, _)| score > top) {
            best = Some((score, p.id));
        }
    }
    best.map(|(_, id)| id)
}

/// One decision per think tick, priority ordered; the first rule that
/// matches wins.
pub fn choose_action(ctx: &AiContext, config: &RaidConfig, rng: &mut impl Rng) -> AiAction {
    // A raider already committed to coming home does exactly that.
    if ctx.must_retreat {
        return AiAction::Retreat;
    }

    // Survival: low stamina or a dying clock means go home now.
    if ctx.stamina < config.ai_low_stamina || ctx.clock_remaining < config.ai_low_clock {
        return AiAction::Retreat;
    }

    // A scoreless do-or-die raid is desperate for any touch.
    if ctx.is_do_or_die && ctx.points_scored == 0 {
        return if rng.gen_bool(config.ai_desperate_touch_chance) {
            AiAction::Touch
        } else {
            AiAction::Feint
        };
    }

    // A crowded court plus a point in the bag invites a bonus attempt.
    if ctx.active_defenders >= config.ai_bonus_min_defenders
        && ctx.points_scored > 0
        && rng.gen_bool(config.ai_bonus_chance)
    {
        return AiAction::Bonus;
    }

    // Roaming: probe with feints, commit with touches.
    if rng.gen_bool(config.ai_feint_chance) {
        AiAction::Feint
    } else {
        AiAction::Touch
    }
}

/// Did a feint bait anyone? Every standing defender in the raider's lane
/// gets an independent draw; the first to bite (roster order) is returned.
pub fn bait_check(
    defenders: &Squad,
    lane: Lane,
    raider_agility: u8,
    config: &RaidConfig,
    rng: &mut impl Rng,
) -> Option<PlayerId> {
    for p in defenders.actives() {
        if !lane.contains_y(p.pos.y) {
            continue;
        }
        let edge = raider_agility as f64 - p.stats.reflex as f64;
        let chance = (config.bait_base_chance + (edge * config.bait_per_agility_edge).max(0.0))
            .clamp(0.0, 1.0);
        if rng.gen_bool(chance) {
            return Some(p.id);
        }
    }
    None
}
