use anyhow::Result;
use colored::Colorize;

use siraj_client::types::CurriculumRequest;
use siraj_core::archetype::GradeLevel;

use super::utils;

pub async fn standards() -> Result<()> {
    let client = utils::api_client()?;
    let standards = client.curriculum_standards().await?;

    let mut keys: Vec<_> = standards.keys().collect();
    keys.sort();
    for key in keys {
        let standard = &standards[key];
        println!("{} ({})", standard.name.bold(), key);
        if !standard.grades.is_empty() {
            println!("  {} {}", "grades:".dimmed(), standard.grades.join(", "));
        }
        if !standard.subjects.is_empty() {
            println!("  {} {}", "subjects:".dimmed(), standard.subjects.join(", "));
        }
    }
    Ok(())
}

pub async fn align(
    standard: String,
    subject: String,
    grade: GradeLevel,
    objectives: Vec<String>,
) -> Result<()> {
    let client = utils::api_client()?;
    let request = CurriculumRequest::new(standard, grade, subject, objectives);
    let alignment = client.align_curriculum(&request).await?;

    if let Some(session_id) = &alignment.session_id {
        println!("{}", format!("Alignment session {session_id}").dimmed());
    }
    println!("{}", serde_json::to_string_pretty(&alignment.alignment)?);
    Ok(())
}
