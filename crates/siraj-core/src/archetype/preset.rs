//! The council archetype registry.
//!
//! Provides the seven system-defined teaching archetypes available in every
//! council session.

use super::model::{Archetype, ArchetypeId};

/// Returns the full council registry, in fixed order.
///
/// These archetypes are system-defined and cover the council's teaching
/// styles, from Socratic questioning through data-driven analysis.
pub fn presets() -> Vec<Archetype> {
    vec![
        Archetype {
            id: ArchetypeId::Socratic,
            name: "Socratic Teacher".to_string(),
            emoji: "🦉".to_string(),
            color: "#8B4513".to_string(),
            personality: "Questioning & Analytical".to_string(),
            approach: "Guides through strategic questions and critical thinking".to_string(),
            strengths: vec![
                "Critical Analysis".to_string(),
                "Problem Decomposition".to_string(),
                "Logical Reasoning".to_string(),
            ],
            voice: "thoughtful".to_string(),
        },
        Archetype {
            id: ArchetypeId::Constructivist,
            name: "Constructivist Teacher".to_string(),
            emoji: "🧱".to_string(),
            color: "#FF6B35".to_string(),
            personality: "Hands-on & Experimental".to_string(),
            approach: "Promotes learning through building and experimentation".to_string(),
            strengths: vec![
                "Practical Application".to_string(),
                "Project-Based Learning".to_string(),
                "Skill Building".to_string(),
            ],
            voice: "encouraging".to_string(),
        },
        Archetype {
            id: ArchetypeId::Storyteller,
            name: "Storyteller Teacher".to_string(),
            emoji: "📖".to_string(),
            color: "#4ECDC4".to_string(),
            personality: "Narrative & Contextual".to_string(),
            approach: "Teaches through stories, metaphors, and engaging narratives".to_string(),
            strengths: vec![
                "Context Building".to_string(),
                "Memory Aids".to_string(),
                "Cultural Connections".to_string(),
            ],
            voice: "engaging".to_string(),
        },
        Archetype {
            id: ArchetypeId::Synthesizer,
            name: "Synthesizer Teacher".to_string(),
            emoji: "🌀".to_string(),
            color: "#A8E6CF".to_string(),
            personality: "Integrative & Holistic".to_string(),
            approach: "Connects multiple perspectives into unified understanding".to_string(),
            strengths: vec![
                "Pattern Recognition".to_string(),
                "Knowledge Integration".to_string(),
                "System Thinking".to_string(),
            ],
            voice: "unifying".to_string(),
        },
        Archetype {
            id: ArchetypeId::Challenger,
            name: "Challenger Teacher".to_string(),
            emoji: "⚡".to_string(),
            color: "#FFD93D".to_string(),
            personality: "Provocative & Critical".to_string(),
            approach: "Pushes boundaries and questions assumptions critically".to_string(),
            strengths: vec![
                "Assumption Challenging".to_string(),
                "Edge Case Analysis".to_string(),
                "Critical Evaluation".to_string(),
            ],
            voice: "provocative".to_string(),
        },
        Archetype {
            id: ArchetypeId::Mentor,
            name: "Mentor Teacher".to_string(),
            emoji: "🌱".to_string(),
            color: "#95E1D3".to_string(),
            personality: "Supportive & Nurturing".to_string(),
            approach: "Provides encouragement, support, and emotional guidance".to_string(),
            strengths: vec![
                "Emotional Support".to_string(),
                "Confidence Building".to_string(),
                "Growth Mindset".to_string(),
            ],
            voice: "supportive".to_string(),
        },
        Archetype {
            id: ArchetypeId::Analyst,
            name: "Analyst Teacher".to_string(),
            emoji: "🔬".to_string(),
            color: "#FF8B94".to_string(),
            personality: "Logical & Data-Driven".to_string(),
            approach: "Breaks down problems with systematic, data-driven analysis".to_string(),
            strengths: vec![
                "Data Analysis".to_string(),
                "Systematic Breakdown".to_string(),
                "Evidence-Based Reasoning".to_string(),
            ],
            voice: "analytical".to_string(),
        },
    ]
}

/// Looks up the registry entry for one archetype.
pub fn get(id: ArchetypeId) -> Archetype {
    presets()
        .into_iter()
        .find(|a| a.id == id)
        .expect("registry covers every ArchetypeId")
}
