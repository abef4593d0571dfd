use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use siraj_core::archetype::{ArchetypeId, GradeLevel, LearningObjective};

mod commands;

#[derive(Parser)]
#[command(name = "siraj")]
#[command(about = "SIRAJ CLI - Educational AI council client", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the teaching archetypes in the council registry
    Archetypes,
    /// Recommend a council lineup for a grade level and learning objective
    Recommend {
        /// Grade band: elementary, middle, high, university
        grade: GradeLevel,
        /// Bloom objective: remember, understand, apply, analyze, evaluate, create
        objective: LearningObjective,
        /// Number of archetypes in the lineup
        #[arg(short, long, default_value_t = 3)]
        count: usize,
    },
    /// Ask the council a question in one shot
    Ask {
        /// The question or topic to explore
        topic: String,
        #[arg(short, long, default_value = "middle")]
        grade: GradeLevel,
        #[arg(short, long)]
        objective: Option<LearningObjective>,
        /// Archetypes to convene; defaults to the recommended lineup
        #[arg(short, long, value_delimiter = ',')]
        archetypes: Vec<ArchetypeId>,
        /// Extra context for the council
        #[arg(long)]
        context: Option<String>,
    },
    /// Submit homework for multi-archetype feedback
    Homework {
        /// The assignment prompt
        assignment: String,
        /// The student's answer
        response: String,
        #[arg(short, long, default_value = "general")]
        subject: String,
        #[arg(short, long, default_value = "middle")]
        grade: GradeLevel,
        /// Archetypes to review the work; defaults to the recommended lineup
        #[arg(short, long, value_delimiter = ',')]
        archetypes: Vec<ArchetypeId>,
        /// Grading rubric to apply
        #[arg(long)]
        rubric: Option<String>,
    },
    /// Run a live streamed council session
    Council {
        /// The question or topic to explore
        topic: String,
        #[arg(short, long, default_value = "middle")]
        grade: GradeLevel,
        #[arg(short, long)]
        objective: Option<LearningObjective>,
        /// Archetypes to convene; defaults to the recommended lineup
        #[arg(short, long, value_delimiter = ',')]
        archetypes: Vec<ArchetypeId>,
        /// Session id to join; a fresh one is generated when omitted
        #[arg(long)]
        session_id: Option<String>,
    },
    /// Curriculum standards and alignment
    Curriculum {
        #[command(subcommand)]
        action: CurriculumAction,
    },
    /// Learning analytics and student progress
    Progress {
        #[command(subcommand)]
        action: ProgressAction,
    },
    /// Check backend health
    Health,
}

#[derive(Subcommand)]
enum CurriculumAction {
    /// List the curriculum standards the backend supports
    Standards,
    /// Align a topic with a curriculum standard
    Align {
        /// Standard key, e.g. common-core-math
        standard: String,
        subject: String,
        #[arg(short, long, default_value = "middle")]
        grade: GradeLevel,
        /// Learning objectives to align against
        #[arg(short, long, value_delimiter = ',')]
        objectives: Vec<String>,
    },
}

#[derive(Subcommand)]
enum ProgressAction {
    /// Fetch aggregate learning analytics
    Analytics {
        /// Time range: 7d, 30d, 90d, 1y
        #[arg(short, long, default_value = "30d")]
        timeframe: String,
    },
    /// Fetch one student's progress report
    Student {
        student_id: String,
        #[arg(short, long, default_value = "30d")]
        timeframe: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Archetypes => commands::archetypes::list(),
        Commands::Recommend {
            grade,
            objective,
            count,
        } => commands::archetypes::recommend(grade, objective, count),
        Commands::Ask {
            topic,
            grade,
            objective,
            archetypes,
            context,
        } => commands::ask::run(topic, grade, objective, archetypes, context).await,
        Commands::Homework {
            assignment,
            response,
            subject,
            grade,
            archetypes,
            rubric,
        } => commands::ask::homework(assignment, response, subject, grade, archetypes, rubric).await,
        Commands::Council {
            topic,
            grade,
            objective,
            archetypes,
            session_id,
        } => commands::council::run(topic, grade, objective, archetypes, session_id).await,
        Commands::Curriculum { action } => match action {
            CurriculumAction::Standards => commands::curriculum::standards().await,
            CurriculumAction::Align {
                standard,
                subject,
                grade,
                objectives,
            } => commands::curriculum::align(standard, subject, grade, objectives).await,
        },
        Commands::Progress { action } => match action {
            ProgressAction::Analytics { timeframe } => {
                commands::progress::analytics(timeframe).await
            }
            ProgressAction::Student {
                student_id,
                timeframe,
            } => commands::progress::student(student_id, timeframe).await,
        },
        Commands::Health => commands::status::health().await,
    }
}
