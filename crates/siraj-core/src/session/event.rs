//! Inbound council events.
//!
//! The backend pushes a sequence of JSON events over the council WebSocket,
//! each discriminated by a `type` field. Known kinds are decoded into
//! [`CouncilEvent`]; unrecognized kinds are surfaced as
//! [`InboundEvent::Unknown`] so the caller can drop them without treating
//! forward-compatible additions as errors.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, SirajError};

/// A typed event from the council backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CouncilEvent {
    /// Deliberation has begun; prior session state is stale.
    SessionStart,
    /// An archetype is about to speak (UI highlight only).
    ArchetypeStart { archetype: String },
    /// A text fragment of one archetype's in-progress response.
    ///
    /// `seq` is optional defensive sequencing: when present, fragments must
    /// arrive with strictly increasing values or they are dropped.
    ArchetypeChunk {
        archetype: String,
        chunk: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        seq: Option<u64>,
    },
    /// An archetype finished; `full_response` is the authoritative text and
    /// replaces whatever chunks accumulated.
    ArchetypeComplete {
        archetype: String,
        full_response: String,
    },
    /// The council started combining perspectives.
    SynthesisStart,
    /// A fragment of the in-progress synthesis.
    SynthesisChunk { chunk: String },
    /// The final synthesized answer.
    SynthesisComplete { synthesis: String },
    /// The session is over; the client schedules its auto-reset.
    SessionComplete,
    /// Server-signaled failure; halts session progression.
    Error { message: String },
}

impl CouncilEvent {
    const KNOWN_TYPES: [&'static str; 9] = [
        "session_start",
        "archetype_start",
        "archetype_chunk",
        "archetype_complete",
        "synthesis_start",
        "synthesis_chunk",
        "synthesis_complete",
        "session_complete",
        "error",
    ];
}

/// Decoded form of one raw inbound frame.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    /// A recognized council event.
    Known(CouncilEvent),
    /// An event kind this client does not understand, carrying its tag.
    /// Policy: ignore, never error.
    Unknown(String),
}

/// Parses one raw text frame from the council stream.
///
/// # Errors
///
/// Returns a parse error when the frame is not JSON, is missing the `type`
/// discriminator, or carries a known `type` with a malformed payload.
pub fn parse_inbound(raw: &str) -> Result<InboundEvent> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| SirajError::parse(format!("Malformed council event: {e}")))?;

    let tag = value
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| SirajError::parse("Council event is missing a type field"))?
        .to_string();

    if !CouncilEvent::KNOWN_TYPES.contains(&tag.as_str()) {
        return Ok(InboundEvent::Unknown(tag));
    }

    let event = serde_json::from_value(value)
        .map_err(|e| SirajError::parse(format!("Malformed {tag} event: {e}")))?;
    Ok(InboundEvent::Known(event))
}
