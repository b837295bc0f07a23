use rand::Rng;
use serde::{Deserialize, Serialize};

use super::player::{FieldPos, Player, PlayerId, PlayerStats, TeamSide};

/// One side's roster. Fixed size for a whole match, insertion order is
/// display order; eliminated players stay in place with `is_out` set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Squad {
    pub side: TeamSide,
    pub players: Vec<Player>,
}

impl Squad {
    /// An empty roster, used before the first game starts.
    pub fn empty(side: TeamSide) -> Self {
        Self { side, players: Vec::new() }
    }

    /// Roll a fresh roster of `size` players with random attributes.
    pub fn generate(side: TeamSide, size: usize, rng: &mut impl Rng) -> Self {
        let players = (0..size)
            .map(|i| {
                let id = PlayerId::new(side, i as u8);
                Player {
                    id,
                    name: format!("{} {}", side.label(), i + 1),
                    pos: FieldPos::new(0.0, 0.0),
                    is_out: false,
                    stats: PlayerStats::roll(rng),
                }
            })
            .collect();
        Self { side, players }
    }

    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        if id.side != self.side {
            return None;
        }
        self.players.get(id.index as usize)
    }

    pub fn get_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        if id.side != self.side {
            return None;
        }
        self.players.get_mut(id.index as usize)
    }

    /// Players still standing.
    pub fn actives(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| !p.is_out)
    }

    pub fn active_count(&self) -> usize {
        self.actives().count()
    }

    pub fn first_active(&self) -> Option<PlayerId> {
        self.actives().next().map(|p| p.id)
    }

    pub fn is_all_out(&self) -> bool {
        !self.players.is_empty() && self.active_count() == 0
    }
}
