use std::io::Write;

use anyhow::{Context, Result};
use colored::Colorize;
use uuid::Uuid;

use siraj_client::types::EducationalRequest;
use siraj_client::{ClientConfig, CouncilStreamClient, SessionUpdate};
use siraj_core::archetype::{self, ArchetypeId, GradeLevel, LearningObjective};
use siraj_core::session::CouncilEvent;

use super::utils;

pub async fn run(
    topic: String,
    grade: GradeLevel,
    objective: Option<LearningObjective>,
    archetypes: Vec<ArchetypeId>,
    session_id: Option<String>,
) -> Result<()> {
    let config = ClientConfig::load().context("Failed to load client configuration")?;
    let session_id = session_id.unwrap_or_else(|| Uuid::new_v4().to_string());
    let lineup = utils::lineup(archetypes, grade, objective);

    let (client, mut updates) = CouncilStreamClient::new(&config);
    client
        .connect(&session_id)
        .await
        .context("Failed to open the council stream")?;

    let mut request = EducationalRequest::new(&topic, grade, lineup).streamed();
    if let Some(objective) = objective {
        request = request.with_objective(objective);
    }
    client
        .send_request(&request)
        .await
        .context("Failed to send the question")?;

    println!("{}", format!("Council session {session_id}").dimmed());

    let mut stdout = std::io::stdout();
    while let Some(update) = updates.recv().await {
        match update {
            SessionUpdate::Event(event) => match event {
                CouncilEvent::SessionStart => {
                    println!("{}", "The council deliberates...".dimmed());
                }
                CouncilEvent::ArchetypeStart { archetype } => {
                    print_speaker_header(&archetype);
                }
                CouncilEvent::ArchetypeChunk { chunk, .. } => {
                    print!("{chunk}");
                    stdout.flush()?;
                }
                CouncilEvent::ArchetypeComplete { .. } => {
                    println!();
                }
                CouncilEvent::SynthesisStart => {
                    println!("\n{}", "🌀 Synthesis".bright_cyan().bold());
                }
                CouncilEvent::SynthesisChunk { chunk } => {
                    print!("{chunk}");
                    stdout.flush()?;
                }
                CouncilEvent::SynthesisComplete { .. } => {
                    println!();
                }
                CouncilEvent::SessionComplete => {
                    println!("\n{}", "Session complete.".green());
                    break;
                }
                CouncilEvent::Error { message } => {
                    eprintln!("\n{}", format!("Council error: {message}").red());
                    break;
                }
            },
            SessionUpdate::Reset => {}
            SessionUpdate::Disconnected => {
                eprintln!("{}", "Connection to the council was lost".red());
                break;
            }
        }
    }

    client.disconnect().await;
    Ok(())
}

fn print_speaker_header(archetype_id: &str) {
    match archetype_id.parse::<ArchetypeId>() {
        Ok(id) => {
            let preset = archetype::get(id);
            println!("\n{} {}", preset.emoji, preset.name.bold());
        }
        Err(_) => println!("\n{}", archetype_id.bold()),
    }
}
