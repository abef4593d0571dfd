//! Archetype domain model.
//!
//! Represents the AI teaching personas that participate in council sessions.
//! Each archetype has a fixed identity and display metadata; behavior lives
//! entirely on the backend, so from the client's perspective an archetype is
//! a labeled response source.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SirajError;

/// Identifier for one of the seven council teaching archetypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchetypeId {
    Socratic,
    Constructivist,
    Storyteller,
    Synthesizer,
    Challenger,
    Mentor,
    Analyst,
}

impl ArchetypeId {
    /// All archetypes, in registry order.
    pub const ALL: [ArchetypeId; 7] = [
        ArchetypeId::Socratic,
        ArchetypeId::Constructivist,
        ArchetypeId::Storyteller,
        ArchetypeId::Synthesizer,
        ArchetypeId::Challenger,
        ArchetypeId::Mentor,
        ArchetypeId::Analyst,
    ];

    /// The wire identifier for this archetype.
    pub fn as_str(&self) -> &'static str {
        match self {
            ArchetypeId::Socratic => "socratic",
            ArchetypeId::Constructivist => "constructivist",
            ArchetypeId::Storyteller => "storyteller",
            ArchetypeId::Synthesizer => "synthesizer",
            ArchetypeId::Challenger => "challenger",
            ArchetypeId::Mentor => "mentor",
            ArchetypeId::Analyst => "analyst",
        }
    }
}

impl fmt::Display for ArchetypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArchetypeId {
    type Err = SirajError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| SirajError::parse(format!("Unknown archetype: {s}")))
    }
}

/// Display metadata for a council archetype.
///
/// Pure data with no behavior; the deliberation itself happens on the
/// backend. The metadata here drives client-side rendering and archetype
/// selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Archetype {
    /// Stable identifier, matching the backend's wire names
    pub id: ArchetypeId,
    /// Display name of the archetype
    pub name: String,
    /// Emoji shown alongside the name
    pub emoji: String,
    /// Display color (hex)
    pub color: String,
    /// One-line personality summary
    pub personality: String,
    /// How this archetype approaches teaching
    pub approach: String,
    /// Teaching strengths, for display and selection hints
    pub strengths: Vec<String>,
    /// Voice register used by the archetype
    pub voice: String,
}
