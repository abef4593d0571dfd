//! Wire types for the SIRAJ backend.
//!
//! Request shapes mirror the backend's pydantic models exactly; response
//! shapes decode the fields the client uses and default everything else, so
//! additive server changes never break decoding.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use siraj_core::archetype::{ArchetypeId, GradeLevel, LearningObjective};

/// A question for the council, used for both the one-shot endpoint and the
/// streaming `educational_request` message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationalRequest {
    /// Free-text topic or question.
    pub topic: String,
    /// Grade band, wire-named (`elementary`/`middle`/`high`/`university`).
    pub grade_level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learning_objective: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// Archetypes invited to this council.
    pub selected_archetypes: Vec<String>,
    /// Whether the caller wants a streamed council session.
    pub streaming: bool,
}

impl EducationalRequest {
    /// Builds a request for the given topic, grade band, and council lineup.
    pub fn new(
        topic: impl Into<String>,
        grade: GradeLevel,
        archetypes: impl IntoIterator<Item = ArchetypeId>,
    ) -> Self {
        Self {
            topic: topic.into(),
            grade_level: grade.as_str().to_string(),
            learning_objective: None,
            context: None,
            session_id: None,
            selected_archetypes: archetypes
                .into_iter()
                .map(|id| id.as_str().to_string())
                .collect(),
            streaming: false,
        }
    }

    /// Sets the Bloom learning objective.
    pub fn with_objective(mut self, objective: LearningObjective) -> Self {
        self.learning_objective = Some(objective.as_str().to_string());
        self
    }

    /// Attaches free-text context for the council.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Ties the request to a council session id.
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Marks the request for streamed delivery.
    pub fn streamed(mut self) -> Self {
        self.streaming = true;
        self
    }
}

/// One archetype's answer inside a one-shot council response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArchetypeAnswer {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub success: bool,
    /// Which backend instance produced this answer, when reported.
    #[serde(default)]
    pub instance: Option<String>,
}

/// Response from `POST /api/education/process`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EducationalResponse {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub responses: HashMap<String, ArchetypeAnswer>,
    #[serde(default)]
    pub synthesis: Option<String>,
    #[serde(default)]
    pub council_size: usize,
    #[serde(default)]
    pub success_rate: Option<f64>,
}

/// Homework submitted for multi-archetype feedback.
#[derive(Debug, Clone, Serialize)]
pub struct HomeworkSubmission {
    pub assignment: String,
    pub student_response: String,
    pub subject: String,
    pub grade_level: String,
    pub selected_archetypes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rubric: Option<String>,
}

/// Feedback returned from `POST /api/education/homework`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HomeworkFeedback {
    #[serde(default)]
    pub session_id: Option<String>,
    /// Per-archetype feedback, keyed by archetype id.
    #[serde(default)]
    pub feedback: HashMap<String, ArchetypeAnswer>,
    #[serde(default)]
    pub synthesis: Option<String>,
}

/// Request for `POST /api/analytics/fetch`.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsRequest {
    /// Time range, e.g. `7d`, `30d`, `90d`, `1y`.
    pub timeframe: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archetypes: Option<Vec<String>>,
    pub include_spiral_audit: bool,
    pub include_council_decisions: bool,
}

impl Default for AnalyticsRequest {
    fn default() -> Self {
        Self {
            timeframe: "30d".to_string(),
            archetypes: None,
            include_spiral_audit: true,
            include_council_decisions: true,
        }
    }
}

/// Analytics report from the backend. The report body varies with the
/// requested audit flags, so it is kept loosely typed beyond the fields the
/// client renders.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyticsReport {
    #[serde(default)]
    pub timeframe: Option<String>,
    #[serde(default)]
    pub sessions: Vec<Value>,
    #[serde(default)]
    pub archetype_effectiveness: HashMap<String, Value>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Request for `POST /api/curriculum/align`.
#[derive(Debug, Clone, Serialize)]
pub struct CurriculumRequest {
    /// Curriculum standard key, e.g. `common-core-math`.
    pub standard: String,
    pub grade_level: String,
    pub subject: String,
    pub learning_objectives: Vec<String>,
    pub selected_archetypes: Vec<String>,
    pub methodology: String,
}

impl CurriculumRequest {
    /// Builds an alignment request with the backend's default council
    /// lineup and methodology.
    pub fn new(
        standard: impl Into<String>,
        grade: GradeLevel,
        subject: impl Into<String>,
        learning_objectives: Vec<String>,
    ) -> Self {
        Self {
            standard: standard.into(),
            grade_level: grade.as_str().to_string(),
            subject: subject.into(),
            learning_objectives,
            selected_archetypes: vec![
                ArchetypeId::Socratic.as_str().to_string(),
                ArchetypeId::Constructivist.as_str().to_string(),
                ArchetypeId::Analyst.as_str().to_string(),
            ],
            methodology: "living-spiral".to_string(),
        }
    }
}

/// Alignment produced by `POST /api/curriculum/align`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CurriculumAlignment {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub alignment: Value,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// One curriculum standard from `GET /api/curriculum/standards`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CurriculumStandard {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub grades: Vec<String>,
    #[serde(default)]
    pub subjects: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct StandardsEnvelope {
    #[serde(default)]
    pub standards: HashMap<String, CurriculumStandard>,
}

/// Progress update for `POST /api/progress/update`.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressUpdate {
    pub session_id: String,
    pub objective_id: String,
    /// Mastery level in `[0, 1]`.
    pub mastery_level: f64,
    pub archetype_effectiveness: HashMap<String, f64>,
    pub learning_insights: Vec<String>,
    pub next_recommendations: Vec<String>,
}

/// Acknowledgement from `POST /api/progress/update`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProgressAck {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub adaptive_strategies: Vec<String>,
    #[serde(default)]
    pub recommended_archetypes: Vec<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Student report from `GET /api/progress/student/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentProgressReport {
    #[serde(default)]
    pub student_id: String,
    #[serde(default)]
    pub timeframe: String,
    #[serde(default)]
    pub overall_mastery: f64,
    #[serde(default)]
    pub preferred_archetypes: Vec<String>,
    #[serde(default)]
    pub learning_insights: Vec<String>,
    #[serde(default)]
    pub recommended_next_steps: Vec<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Response from `GET /health`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SystemHealth {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub active_sessions: u32,
}

impl SystemHealth {
    /// Whether the council backend reports itself healthy.
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Response from `GET /council/archetypes`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArchetypeCatalog {
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub archetypes: Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn educational_request_matches_backend_wire_shape() {
        let request = EducationalRequest::new(
            "Why is the sky blue?",
            GradeLevel::Middle,
            [ArchetypeId::Socratic, ArchetypeId::Mentor],
        )
        .with_session_id("s-42")
        .streamed();

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "topic": "Why is the sky blue?",
                "grade_level": "middle",
                "session_id": "s-42",
                "selected_archetypes": ["socratic", "mentor"],
                "streaming": true,
            })
        );
    }

    #[test]
    fn optional_fields_are_omitted_when_unset() {
        let request = EducationalRequest::new("Fractions", GradeLevel::Elementary, []);
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("learning_objective").is_none());
        assert!(json.get("context").is_none());
        assert!(json.get("session_id").is_none());
    }

    #[test]
    fn analytics_request_defaults_match_frontend_behavior() {
        let json = serde_json::to_value(AnalyticsRequest::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "timeframe": "30d",
                "include_spiral_audit": true,
                "include_council_decisions": true,
            })
        );
    }

    #[test]
    fn curriculum_request_uses_default_council_and_methodology() {
        let request = CurriculumRequest::new(
            "common-core-math",
            GradeLevel::High,
            "mathematics",
            vec!["solve linear equations".to_string()],
        );
        assert_eq!(
            request.selected_archetypes,
            vec!["socratic", "constructivist", "analyst"]
        );
        assert_eq!(request.methodology, "living-spiral");
    }

    #[test]
    fn educational_response_tolerates_missing_fields() {
        let response: EducationalResponse = serde_json::from_str(
            r#"{"responses":{"socratic":{"content":"Why do you think?","success":true}}}"#,
        )
        .unwrap();
        assert_eq!(response.responses["socratic"].content, "Why do you think?");
        assert!(response.synthesis.is_none());
        assert_eq!(response.council_size, 0);
    }

    #[test]
    fn standards_envelope_decodes_backend_catalog() {
        let envelope: StandardsEnvelope = serde_json::from_str(
            r#"{"standards":{"ngss":{"name":"Next Generation Science Standards","grades":["K","1"],"subjects":["earth-science"]}}}"#,
        )
        .unwrap();
        assert_eq!(envelope.standards["ngss"].name, "Next Generation Science Standards");
    }

    #[test]
    fn health_check_reads_status() {
        let health: SystemHealth =
            serde_json::from_str(r#"{"status":"healthy","version":"8.1.0","active_sessions":3}"#)
                .unwrap();
        assert!(health.is_healthy());
        assert_eq!(health.active_sessions, 3);
    }
}
