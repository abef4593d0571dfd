use anyhow::Result;
use colored::Colorize;

use siraj_client::types::{EducationalRequest, HomeworkSubmission};
use siraj_core::archetype::{ArchetypeId, GradeLevel, LearningObjective};

use super::utils;

pub async fn run(
    topic: String,
    grade: GradeLevel,
    objective: Option<LearningObjective>,
    archetypes: Vec<ArchetypeId>,
    context: Option<String>,
) -> Result<()> {
    let client = utils::api_client()?;
    let lineup = utils::lineup(archetypes, grade, objective);

    let mut request = EducationalRequest::new(&topic, grade, lineup);
    if let Some(objective) = objective {
        request = request.with_objective(objective);
    }
    if let Some(context) = context {
        request = request.with_context(context);
    }

    println!("{}", "Convening the council...".dimmed());
    let response = client.process_question(&request).await?;

    for (archetype_id, answer) in &response.responses {
        if answer.success {
            utils::print_voice(archetype_id, &answer.content);
        } else {
            println!(
                "\n{}",
                format!("{archetype_id} did not answer").yellow()
            );
        }
    }

    if let Some(synthesis) = &response.synthesis {
        println!("\n{}", "Synthesis".bright_cyan().bold());
        println!("{synthesis}");
    }
    if let Some(rate) = response.success_rate {
        println!(
            "\n{}",
            format!(
                "{} archetypes, {:.0}% answered",
                response.council_size,
                rate * 100.0
            )
            .dimmed()
        );
    }
    Ok(())
}

pub async fn homework(
    assignment: String,
    response: String,
    subject: String,
    grade: GradeLevel,
    archetypes: Vec<ArchetypeId>,
    rubric: Option<String>,
) -> Result<()> {
    let client = utils::api_client()?;
    let lineup = utils::lineup(archetypes, grade, None);

    let submission = HomeworkSubmission {
        assignment,
        student_response: response,
        subject,
        grade_level: grade.as_str().to_string(),
        selected_archetypes: lineup.iter().map(|id| id.as_str().to_string()).collect(),
        rubric,
    };

    println!("{}", "Gathering feedback...".dimmed());
    let feedback = client.submit_homework(&submission).await?;

    for (archetype_id, answer) in &feedback.feedback {
        utils::print_voice(archetype_id, &answer.content);
    }
    if let Some(synthesis) = &feedback.synthesis {
        println!("\n{}", "Synthesis".bright_cyan().bold());
        println!("{synthesis}");
    }
    Ok(())
}
