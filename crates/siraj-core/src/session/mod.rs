//! Council session domain: phases, inbound events, and the event fold.

pub mod event;
pub mod model;
pub mod phase;

pub use event::{CouncilEvent, InboundEvent, parse_inbound};
pub use model::{ArchetypeResponse, CouncilSession, FoldEffect};
pub use phase::SpiralPhase;
