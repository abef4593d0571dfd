use anyhow::Result;
use colored::Colorize;

use siraj_core::archetype::{self, GradeLevel, LearningObjective};

pub fn list() -> Result<()> {
    for preset in archetype::presets() {
        println!(
            "{} {} ({})",
            preset.emoji,
            preset.name.bold(),
            preset.id.as_str()
        );
        println!("  {}", preset.personality);
        println!("  {} {}", "approach:".dimmed(), preset.approach);
        println!("  {} {}", "strengths:".dimmed(), preset.strengths.join(", "));
    }
    Ok(())
}

pub fn recommend(grade: GradeLevel, objective: LearningObjective, count: usize) -> Result<()> {
    println!(
        "Recommended council for {} / {}:",
        grade.as_str().bold(),
        objective.as_str().bold()
    );
    for id in archetype::recommend(grade, objective, count) {
        let preset = archetype::get(id);
        println!("  {} {} - {}", preset.emoji, preset.name, preset.voice);
    }
    Ok(())
}
