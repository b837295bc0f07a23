//! Player and team-side primitives.
//!
//! Players are created once per game, owned by their squad, and only ever
//! mutated in place: `is_out` and `pos` change over a match, `stats` never do.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Attribute floor/ceiling used when rolling a fresh roster.
pub const STAT_MIN: u8 = 3;
pub const STAT_MAX: u8 = 7;

/// The two sides of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamSide {
    Player,
    Ai,
}

impl TeamSide {
    pub fn opponent(self) -> Self {
        match self {
            TeamSide::Player => TeamSide::Ai,
            TeamSide::Ai => TeamSide::Player,
        }
    }

    /// Human-readable side label for logs and roster names.
    pub fn label(self) -> &'static str {
        match self {
            TeamSide::Player => "Player",
            TeamSide::Ai => "AI",
        }
    }
}

/// Player identifier within a match: side + roster slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId {
    pub side: TeamSide,
    pub index: u8,
}

impl PlayerId {
    pub fn new(side: TeamSide, index: u8) -> Self {
        Self { side, index }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.side {
            TeamSide::Player => 'P',
            TeamSide::Ai => 'A',
        };
        write!(f, "{}{}", tag, self.index + 1)
    }
}

/// Fixed attributes, rolled once at roster creation.
///
/// Strength drives mash mini-games, agility drives touch attempts and
/// escapes, reflex drives defensive tackles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub strength: u8,
    pub agility: u8,
    pub reflex: u8,
}

impl PlayerStats {
    /// Roll uniform attributes in `[STAT_MIN, STAT_MAX]`.
    pub fn roll(rng: &mut impl Rng) -> Self {
        Self {
            strength: rng.gen_range(STAT_MIN..=STAT_MAX),
            agility: rng.gen_range(STAT_MIN..=STAT_MAX),
            reflex: rng.gen_range(STAT_MIN..=STAT_MAX),
        }
    }
}

/// 2D position on the 0-100 board.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldPos {
    pub x: f32,
    pub y: f32,
}

impl FieldPos {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub pos: FieldPos,
    pub is_out: bool,
    pub stats: PlayerStats,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_stats_roll_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..100 {
            let stats = PlayerStats::roll(&mut rng);
            assert!((STAT_MIN..=STAT_MAX).contains(&stats.strength));
            assert!((STAT_MIN..=STAT_MAX).contains(&stats.agility));
            assert!((STAT_MIN..=STAT_MAX).contains(&stats.reflex));
        }
    }

    #[test]
    fn test_player_id_display() {
        assert_eq!(PlayerId::new(TeamSide::Player, 0).to_string(), "P1");
        assert_eq!(PlayerId::new(TeamSide::Ai, 6).to_string(), "A7");
    }

    #[test]
    fn test_opponent_is_involutive() {
        assert_eq!(TeamSide::Player.opponent(), TeamSide::Ai);
        assert_eq!(TeamSide::Ai.opponent().opponent(), TeamSide::Ai);
    }
}
