use anyhow::Result;
use colored::Colorize;

use siraj_client::types::AnalyticsRequest;

use super::utils;

pub async fn analytics(timeframe: String) -> Result<()> {
    let client = utils::api_client()?;
    let request = AnalyticsRequest {
        timeframe,
        ..AnalyticsRequest::default()
    };
    let report = client.fetch_analytics(&request).await?;

    if let Some(timeframe) = &report.timeframe {
        println!("Analytics for the last {}", timeframe.bold());
    }
    println!("{} sessions", report.sessions.len());
    if !report.archetype_effectiveness.is_empty() {
        println!("\n{}", "Archetype effectiveness".bold());
        let mut entries: Vec<_> = report.archetype_effectiveness.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        for (archetype_id, value) in entries {
            println!("  {archetype_id}: {value}");
        }
    }
    Ok(())
}

pub async fn student(student_id: String, timeframe: String) -> Result<()> {
    let client = utils::api_client()?;
    let report = client.student_progress(&student_id, &timeframe).await?;

    println!(
        "{} over the last {}",
        report.student_id.bold(),
        report.timeframe
    );
    println!("Overall mastery: {:.0}%", report.overall_mastery * 100.0);
    if !report.preferred_archetypes.is_empty() {
        println!(
            "Preferred archetypes: {}",
            report.preferred_archetypes.join(", ")
        );
    }
    for insight in &report.learning_insights {
        println!("  {} {insight}", "insight:".dimmed());
    }
    for step in &report.recommended_next_steps {
        println!("  {} {step}", "next:".dimmed());
    }
    Ok(())
}
