//! Council recommendation by grade level and learning objective.
//!
//! Combines grade-level and Bloom-taxonomy preference lists into a suggested
//! council lineup. Padding beyond the preference lists follows the fixed
//! registry order, so the same inputs always produce the same council.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::model::ArchetypeId;
use crate::error::SirajError;

/// Grade bands recognized by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradeLevel {
    Elementary,
    Middle,
    High,
    University,
}

impl GradeLevel {
    /// Wire name for this grade band.
    pub fn as_str(&self) -> &'static str {
        match self {
            GradeLevel::Elementary => "elementary",
            GradeLevel::Middle => "middle",
            GradeLevel::High => "high",
            GradeLevel::University => "university",
        }
    }

    fn preferences(&self) -> [ArchetypeId; 3] {
        use ArchetypeId::*;
        match self {
            GradeLevel::Elementary => [Storyteller, Mentor, Constructivist],
            GradeLevel::Middle => [Socratic, Constructivist, Mentor],
            GradeLevel::High => [Socratic, Challenger, Analyst],
            GradeLevel::University => [Challenger, Synthesizer, Analyst],
        }
    }
}

impl FromStr for GradeLevel {
    type Err = SirajError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "elementary" => Ok(GradeLevel::Elementary),
            "middle" => Ok(GradeLevel::Middle),
            "high" => Ok(GradeLevel::High),
            "university" => Ok(GradeLevel::University),
            other => Err(SirajError::parse(format!("Unknown grade level: {other}"))),
        }
    }
}

/// Bloom-taxonomy learning objectives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearningObjective {
    Remember,
    Understand,
    Apply,
    Analyze,
    Evaluate,
    Create,
}

impl LearningObjective {
    /// Wire name for this objective.
    pub fn as_str(&self) -> &'static str {
        match self {
            LearningObjective::Remember => "remember",
            LearningObjective::Understand => "understand",
            LearningObjective::Apply => "apply",
            LearningObjective::Analyze => "analyze",
            LearningObjective::Evaluate => "evaluate",
            LearningObjective::Create => "create",
        }
    }

    fn preferences(&self) -> [ArchetypeId; 3] {
        use ArchetypeId::*;
        match self {
            LearningObjective::Remember => [Mentor, Storyteller, Analyst],
            LearningObjective::Understand => [Socratic, Synthesizer, Storyteller],
            LearningObjective::Apply => [Constructivist, Mentor, Analyst],
            LearningObjective::Analyze => [Socratic, Challenger, Analyst],
            LearningObjective::Evaluate => [Challenger, Synthesizer, Socratic],
            LearningObjective::Create => [Constructivist, Synthesizer, Challenger],
        }
    }
}

impl FromStr for LearningObjective {
    type Err = SirajError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "remember" => Ok(LearningObjective::Remember),
            "understand" => Ok(LearningObjective::Understand),
            "apply" => Ok(LearningObjective::Apply),
            "analyze" => Ok(LearningObjective::Analyze),
            "evaluate" => Ok(LearningObjective::Evaluate),
            "create" => Ok(LearningObjective::Create),
            other => Err(SirajError::parse(format!(
                "Unknown learning objective: {other}"
            ))),
        }
    }
}

/// Suggests a council lineup for the given grade band and objective.
///
/// Grade preferences come first, then objective preferences, deduplicated in
/// that order. If fewer than `count` distinct archetypes result, the lineup
/// is padded from the registry order.
pub fn recommend(grade: GradeLevel, objective: LearningObjective, count: usize) -> Vec<ArchetypeId> {
    let count = count.min(ArchetypeId::ALL.len());
    let mut result: Vec<ArchetypeId> = Vec::with_capacity(count);

    let preferred = grade
        .preferences()
        .into_iter()
        .chain(objective.preferences());
    for id in preferred.chain(ArchetypeId::ALL) {
        if result.len() == count {
            break;
        }
        if !result.contains(&id) {
            result.push(id);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use ArchetypeId::*;

    #[test]
    fn grade_preferences_lead_the_lineup() {
        let council = recommend(GradeLevel::Elementary, LearningObjective::Understand, 3);
        assert_eq!(council, vec![Storyteller, Mentor, Constructivist]);
    }

    #[test]
    fn objective_preferences_fill_after_grade() {
        let council = recommend(GradeLevel::High, LearningObjective::Create, 5);
        assert_eq!(
            council,
            vec![Socratic, Challenger, Analyst, Constructivist, Synthesizer]
        );
    }

    #[test]
    fn padding_is_deterministic() {
        let a = recommend(GradeLevel::Middle, LearningObjective::Apply, 7);
        let b = recommend(GradeLevel::Middle, LearningObjective::Apply, 7);
        assert_eq!(a, b);
        assert_eq!(a.len(), 7);
    }

    #[test]
    fn count_is_capped_at_registry_size() {
        let council = recommend(GradeLevel::University, LearningObjective::Evaluate, 20);
        assert_eq!(council.len(), ArchetypeId::ALL.len());
    }

    #[test]
    fn wire_names_round_trip() {
        assert_eq!("university".parse::<GradeLevel>().unwrap().as_str(), "university");
        assert_eq!(
            "evaluate".parse::<LearningObjective>().unwrap().as_str(),
            "evaluate"
        );
        assert!("kindergarten".parse::<GradeLevel>().is_err());
    }

    #[test]
    fn no_duplicates_in_lineup() {
        let council = recommend(GradeLevel::High, LearningObjective::Analyze, 6);
        let mut deduped = council.clone();
        deduped.dedup();
        assert_eq!(council.len(), 6);
        assert_eq!(council, deduped);
    }
}
