//! Council archetype registry and recommendation.

pub mod model;
pub mod preset;
pub mod recommend;

pub use model::{Archetype, ArchetypeId};
pub use preset::{get, presets};
pub use recommend::{GradeLevel, LearningObjective, recommend};
