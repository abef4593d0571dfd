//! Living Spiral phase sequence.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The four stops of a council session.
///
/// Phases only ever move forward through this sequence; the single backward
/// transition is the explicit reset to `Waiting` after session completion.
/// The UI names the same sequence the "Living Spiral"
/// (collapse/council/synthesis/rebirth).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpiralPhase {
    /// No deliberation in flight.
    Waiting,
    /// Archetypes are producing their individual responses.
    Deliberating,
    /// The council is combining perspectives into one answer.
    Synthesizing,
    /// The synthesized answer is available.
    Complete,
}

impl SpiralPhase {
    /// Wire/state name of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            SpiralPhase::Waiting => "waiting",
            SpiralPhase::Deliberating => "deliberating",
            SpiralPhase::Synthesizing => "synthesizing",
            SpiralPhase::Complete => "complete",
        }
    }

    /// The Living Spiral display name for this phase.
    pub fn spiral_name(&self) -> &'static str {
        match self {
            SpiralPhase::Waiting => "collapse",
            SpiralPhase::Deliberating => "council",
            SpiralPhase::Synthesizing => "synthesis",
            SpiralPhase::Complete => "rebirth",
        }
    }

    /// Whether moving to `next` is a forward step in the fixed sequence.
    pub fn can_advance_to(&self, next: SpiralPhase) -> bool {
        next > *self
    }
}

impl fmt::Display for SpiralPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_order_forward_only() {
        assert!(SpiralPhase::Waiting.can_advance_to(SpiralPhase::Deliberating));
        assert!(SpiralPhase::Deliberating.can_advance_to(SpiralPhase::Complete));
        assert!(!SpiralPhase::Complete.can_advance_to(SpiralPhase::Waiting));
        assert!(!SpiralPhase::Synthesizing.can_advance_to(SpiralPhase::Synthesizing));
    }

    #[test]
    fn spiral_names_match_ui_vocabulary() {
        assert_eq!(SpiralPhase::Waiting.spiral_name(), "collapse");
        assert_eq!(SpiralPhase::Deliberating.spiral_name(), "council");
        assert_eq!(SpiralPhase::Synthesizing.spiral_name(), "synthesis");
        assert_eq!(SpiralPhase::Complete.spiral_name(), "rebirth");
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&SpiralPhase::Deliberating).unwrap();
        assert_eq!(json, "\"deliberating\"");
    }
}
