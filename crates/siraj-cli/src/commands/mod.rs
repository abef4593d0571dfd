pub mod archetypes;
pub mod ask;
pub mod council;
pub mod curriculum;
pub mod progress;
pub mod status;
pub mod utils;
