use anyhow::{Context, Result};
use colored::Colorize;

use siraj_client::{ClientConfig, SirajApiClient};
use siraj_core::archetype::{self, ArchetypeId, GradeLevel, LearningObjective};

pub fn api_client() -> Result<SirajApiClient> {
    let config = ClientConfig::load().context("Failed to load client configuration")?;
    SirajApiClient::new(&config).context("Failed to build API client")
}

/// The council lineup for a command: the explicit selection when given,
/// otherwise the recommendation for the grade and objective.
pub fn lineup(
    selected: Vec<ArchetypeId>,
    grade: GradeLevel,
    objective: Option<LearningObjective>,
) -> Vec<ArchetypeId> {
    if !selected.is_empty() {
        return selected;
    }
    archetype::recommend(
        grade,
        objective.unwrap_or(LearningObjective::Understand),
        3,
    )
}

/// Prints one archetype's voice as an emoji-tagged block.
pub fn print_voice(archetype_id: &str, content: &str) {
    let header = match archetype_id.parse::<ArchetypeId>() {
        Ok(id) => {
            let preset = archetype::get(id);
            format!("{} {}", preset.emoji, preset.name)
        }
        Err(_) => archetype_id.to_string(),
    };
    println!("\n{}", header.bold());
    println!("{content}");
}
