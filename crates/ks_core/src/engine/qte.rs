//! Quick-Time Event Descriptors
//!
//! A QTE is dispatched by the raid engine, resolved by the input surface
//! (key mash, moving marker), and reported back as a single boolean. The
//! engine never sees the inputs; it only needs the descriptor it stored at
//! dispatch to route the outcome. Each contested situation is its own
//! variant carrying exactly the fields its resolution needs, so the outcome
//! router is an exhaustive match instead of optional-field probing.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::PlayerId;

/// Which mini-game the input surface should run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum QteInput {
    /// Hammer a key until `target` presses land in time.
    Mash { target: u32 },
    /// Stop a moving marker inside a window of `success_zone` width.
    Timing { success_zone: f32 },
}

/// The contested situation a QTE decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "context", rename_all = "snake_case")]
pub enum QteContext {
    /// The raider got the jump on a defender; win to tag them out.
    TackleScore { defender: PlayerId },
    /// A defender got hold of the raider; win to break free.
    TackleEscape { defender: PlayerId },
    /// A second defender piles on mid-chain; win to break free.
    MultiTackle { defender: PlayerId },
    /// A feint baited a defender into lunging.
    FeintStruggle { defender: PlayerId },
    /// A defender contests the bonus attempt.
    BonusStruggle { defender: PlayerId },
    /// Pressing for the second chained point.
    #[serde(rename = "multi_struggle_2")]
    MultiStruggle2 { defender: PlayerId },
    /// Pressing for the third and final chained point.
    #[serde(rename = "multi_struggle_3")]
    MultiStruggle3 { defender: PlayerId },
    /// The retreat is blocked at the line.
    RetreatEscape,
}

impl QteContext {
    /// The defender named by this situation, if any.
    pub fn defender(&self) -> Option<PlayerId> {
        match *self {
            QteContext::TackleScore { defender }
            | QteContext::TackleEscape { defender }
            | QteContext::MultiTackle { defender }
            | QteContext::FeintStruggle { defender }
            | QteContext::BonusStruggle { defender }
            | QteContext::MultiStruggle2 { defender }
            | QteContext::MultiStruggle3 { defender } => Some(defender),
            QteContext::RetreatEscape => None,
        }
    }
}

/// Everything the input surface needs, stored from dispatch to resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QteDescriptor {
    pub input: QteInput,
    pub context: QteContext,
}

impl fmt::Display for QteDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.input {
            QteInput::Mash { target } => write!(f, "mash QTE (target {})", target),
            QteInput::Timing { success_zone } => {
                write!(f, "timing QTE (zone {:.2})", success_zone)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TeamSide;

    #[test]
    fn test_defender_accessor() {
        let a3 = PlayerId::new(TeamSide::Ai, 2);
        assert_eq!(QteContext::TackleScore { defender: a3 }.defender(), Some(a3));
        assert_eq!(QteContext::MultiStruggle3 { defender: a3 }.defender(), Some(a3));
        assert_eq!(QteContext::RetreatEscape.defender(), None);
    }

    #[test]
    fn test_descriptor_serializes_with_tags() {
        let desc = QteDescriptor {
            input: QteInput::Mash { target: 14 },
            context: QteContext::RetreatEscape,
        };
        let json = serde_json::to_string(&desc).unwrap();
        assert!(json.contains("\"kind\":\"mash\""));
        assert!(json.contains("\"context\":\"retreat_escape\""));
    }
}
