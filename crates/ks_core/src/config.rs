//! Raid Tuning Configuration
//!
//! Every fixed probability and threshold of the raid game in one place.

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

/// Raid simulation parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaidConfig {
    // === Match Structure ===
    /// Roster size per side (default: 7)
    pub team_size: usize,
    /// Raids before the final whistle (default: 20)
    pub max_raids: u32,
    /// Consecutive scoreless raids before a do-or-die raid (default: 3)
    pub do_or_die_after: u32,

    // === Raid Pressure ===
    /// Seconds on the raid clock (default: 30)
    pub raid_clock_s: u32,
    /// Raider stamina at raid start, drains 1/s (default: 100)
    pub stamina_start: u32,

    // === Contest Odds ===
    /// Chance an unforced retreat is blocked (default: 0.5)
    pub retreat_block_chance: f64,
    /// Chance a bonus attempt is contested (default: 0.4)
    pub bonus_contest_chance: f64,
    /// Contest chance when a defender took the bait first (default: 0.75)
    pub bonus_contest_baited_chance: f64,
    /// Chance to offer a second chained point after a clean touch (default: 0.30)
    pub multi_kill_chain_p2: f64,
    /// Chance to offer a third chained point (default: 0.15)
    pub multi_kill_chain_p3: f64,
    /// Hard cap on chained touch points per raid (default: 3)
    pub multi_kill_cap: u32,
    /// Chance a won feint struggle opens a press decision (default: 0.30)
    pub feint_escalate_chance: f64,
    /// Chance a won second-point struggle opens another press (default: 0.15)
    pub multi_struggle_escalate_chance: f64,

    // === Bait Model ===
    /// Base chance an in-lane defender bites on a feint (default: 0.10)
    pub bait_base_chance: f64,
    /// Extra bait chance per point of agility edge over reflex (default: 0.01)
    pub bait_per_agility_edge: f64,

    // === Mini-Game Parameters ===
    /// Standard mash goal for struggles and escapes (default: 10)
    pub mash_target: u32,
    /// Mash goal range for contested bonus attempts (default: 12..=16)
    pub bonus_mash_min: u32,
    pub bonus_mash_max: u32,
    /// Width of the timing mini-game success window (default: 0.5)
    pub timing_success_zone: f32,

    // === Opponent Brain ===
    /// Stamina floor that sends the AI raider home (default: 20)
    pub ai_low_stamina: u32,
    /// Clock floor that sends the AI raider home (default: 5)
    pub ai_low_clock: u32,
    /// Touch chance on a scoreless do-or-die raid (default: 0.8)
    pub ai_desperate_touch_chance: f64,
    /// Defenders required before the AI eyes a bonus (default: 6)
    pub ai_bonus_min_defenders: usize,
    /// Chance the AI goes for that bonus (default: 0.2)
    pub ai_bonus_chance: f64,
    /// Roaming feint-over-touch chance (default: 0.6)
    pub ai_feint_chance: f64,
}

impl Default for RaidConfig {
    fn default() -> Self {
        Self {
            team_size: 7,
            max_raids: 20,
            do_or_die_after: 3,

            raid_clock_s: 30,
            stamina_start: 100,

            retreat_block_chance: 0.5,
            bonus_contest_chance: 0.4,
            bonus_contest_baited_chance: 0.75,
            multi_kill_chain_p2: 0.30,
            multi_kill_chain_p3: 0.15,
            multi_kill_cap: 3,
            feint_escalate_chance: 0.30,
            multi_struggle_escalate_chance: 0.15,

            bait_base_chance: 0.10,
            bait_per_agility_edge: 0.01,

            mash_target: 10,
            bonus_mash_min: 12,
            bonus_mash_max: 16,
            timing_success_zone: 0.5,

            ai_low_stamina: 20,
            ai_low_clock: 5,
            ai_desperate_touch_chance: 0.8,
            ai_bonus_min_defenders: 6,
            ai_bonus_chance: 0.2,
            ai_feint_chance: 0.6,
        }
    }
}

impl RaidConfig {
    /// Reject configurations the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        let probabilities = [
            ("retreat_block_chance", self.retreat_block_chance),
            ("bonus_contest_chance", self.bonus_contest_chance),
            ("bonus_contest_baited_chance", self.bonus_contest_baited_chance),
            ("multi_kill_chain_p2", self.multi_kill_chain_p2),
            ("multi_kill_chain_p3", self.multi_kill_chain_p3),
            ("feint_escalate_chance", self.feint_escalate_chance),
            ("multi_struggle_escalate_chance", self.multi_struggle_escalate_chance),
            ("bait_base_chance", self.bait_base_chance),
            ("ai_desperate_touch_chance", self.ai_desperate_touch_chance),
            ("ai_bonus_chance", self.ai_bonus_chance),
            ("ai_feint_chance", self.ai_feint_chance),
        ];
        for (name, p) in probabilities {
            if !(0.0..=1.0).contains(&p) {
                return Err(GameError::InvalidConfig(format!(
                    "{} must be within [0, 1], got {}",
                    name, p
                )));
            }
        }
        if self.team_size < 2 {
            return Err(GameError::InvalidConfig(format!(
                "team_size must be at least 2, got {}",
                self.team_size
            )));
        }
        if self.raid_clock_s == 0 || self.stamina_start == 0 {
            return Err(GameError::InvalidConfig(
                "raid_clock_s and stamina_start must be positive".to_string(),
            ));
        }
        if self.bonus_mash_min > self.bonus_mash_max {
            return Err(GameError::InvalidConfig(format!(
                "bonus mash range is inverted: {}..={}",
                self.bonus_mash_min, self.bonus_mash_max
            )));
        }
        if self.multi_kill_cap == 0 {
            return Err(GameError::InvalidConfig(
                "multi_kill_cap must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.timing_success_zone) {
            return Err(GameError::InvalidConfig(format!(
                "timing_success_zone must be within [0, 1], got {}",
                self.timing_success_zone
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(RaidConfig::default().validate().is_ok());
    }

    #[test]
    fn test_probability_out_of_range_rejected() {
        let mut config = RaidConfig::default();
        config.retreat_block_chance = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_mash_range_rejected() {
        let mut config = RaidConfig::default();
        config.bonus_mash_min = 20;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_tiny_team_rejected() {
        let mut config = RaidConfig::default();
        config.team_size = 1;
        assert!(config.validate().is_err());
    }
}
