//! Council session state and the event fold.
//!
//! A [`CouncilSession`] is mutated exclusively by folding inbound
//! [`CouncilEvent`]s through [`CouncilSession::apply`]. The fold is pure
//! state manipulation with no I/O, so every invariant of the session
//! lifecycle is unit-testable without a transport.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::event::CouncilEvent;
use super::phase::SpiralPhase;

/// One archetype's accumulated response within a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeResponse {
    /// Accumulated text. Append-only until an `archetype_complete` event
    /// replaces it wholesale with the server's authoritative full text.
    pub content: String,
    /// Whether chunks are still arriving for this archetype.
    pub is_streaming: bool,
    /// Whether the authoritative full response has been received.
    pub completed: bool,
    /// Highest applied chunk sequence number, when the server sends them.
    #[serde(skip)]
    last_seq: Option<u64>,
}

/// What a fold step did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldEffect {
    /// State changed.
    Updated,
    /// The event did not apply in the current state and was dropped.
    Ignored,
    /// The server declared the session over; the owner should schedule the
    /// auto-reset back to `Waiting`.
    SessionEnded,
    /// A server-signaled error halted the session.
    Faulted,
}

/// A single question/response exchange with the council.
///
/// Created when a question is submitted and a connection opened; mutated
/// exclusively by inbound server events; discarded via [`reset`] either a
/// fixed delay after completion or when a new question supersedes it.
///
/// [`reset`]: CouncilSession::reset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouncilSession {
    /// Caller-assigned opaque session identifier.
    pub id: String,
    /// Current Living Spiral phase.
    pub phase: SpiralPhase,
    /// Timestamp of the last `session_start` (ISO 8601 format).
    pub started_at: Option<String>,
    /// The archetype currently speaking, for UI highlight only.
    pub current_speaker: Option<String>,
    /// Per-archetype accumulated responses, keyed by archetype id.
    pub archetype_responses: HashMap<String, ArchetypeResponse>,
    /// Synthesis text still being streamed, kept apart from the final text.
    pub synthesis_buffer: String,
    /// Final synthesized answer. Set at most once per session lifecycle.
    pub synthesis: Option<String>,
    /// Server-signaled error message, if any.
    pub error: Option<String>,
    /// Set by an `error` event; blocks all further progression until reset.
    #[serde(skip)]
    halted: bool,
}

impl CouncilSession {
    /// Creates an empty session in the `Waiting` phase.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            phase: SpiralPhase::Waiting,
            started_at: None,
            current_speaker: None,
            archetype_responses: HashMap::new(),
            synthesis_buffer: String::new(),
            synthesis: None,
            error: None,
            halted: false,
        }
    }

    /// Whether an `error` event has halted this session.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Drops all accumulated state and returns to `Waiting`, keeping only
    /// the session id. The one sanctioned backward phase transition.
    pub fn reset(&mut self) {
        let id = std::mem::take(&mut self.id);
        *self = Self::new(id);
    }

    /// Folds one inbound event into the session.
    ///
    /// Events are applied strictly in arrival order; the fold enforces the
    /// forward-only phase sequence and drops anything that does not apply in
    /// the current state. After an `error` event only a reset (or
    /// disconnect/reconnect) revives the session.
    pub fn apply(&mut self, event: &CouncilEvent) -> FoldEffect {
        if self.halted && !matches!(event, CouncilEvent::Error { .. }) {
            return FoldEffect::Ignored;
        }

        match event {
            CouncilEvent::SessionStart => {
                if self.phase != SpiralPhase::Waiting {
                    return FoldEffect::Ignored;
                }
                self.phase = SpiralPhase::Deliberating;
                self.started_at = Some(chrono::Utc::now().to_rfc3339());
                self.current_speaker = None;
                self.archetype_responses.clear();
                self.synthesis_buffer.clear();
                self.synthesis = None;
                FoldEffect::Updated
            }

            CouncilEvent::ArchetypeStart { archetype } => {
                if self.phase != SpiralPhase::Deliberating {
                    return FoldEffect::Ignored;
                }
                self.current_speaker = Some(archetype.clone());
                FoldEffect::Updated
            }

            CouncilEvent::ArchetypeChunk {
                archetype,
                chunk,
                seq,
            } => {
                if self.phase != SpiralPhase::Deliberating {
                    return FoldEffect::Ignored;
                }
                let entry = self.archetype_responses.entry(archetype.clone()).or_default();
                if entry.completed {
                    // The authoritative text already landed; a late chunk
                    // must not corrupt it.
                    return FoldEffect::Ignored;
                }
                if let Some(seq) = seq {
                    if entry.last_seq.is_some_and(|last| *seq <= last) {
                        return FoldEffect::Ignored;
                    }
                    entry.last_seq = Some(*seq);
                }
                entry.content.push_str(chunk);
                entry.is_streaming = true;
                FoldEffect::Updated
            }

            CouncilEvent::ArchetypeComplete {
                archetype,
                full_response,
            } => {
                if !matches!(
                    self.phase,
                    SpiralPhase::Deliberating | SpiralPhase::Synthesizing
                ) {
                    return FoldEffect::Ignored;
                }
                let entry = self.archetype_responses.entry(archetype.clone()).or_default();
                entry.content = full_response.clone();
                entry.completed = true;
                entry.is_streaming = false;
                if self.current_speaker.as_deref() == Some(archetype.as_str()) {
                    self.current_speaker = None;
                }
                FoldEffect::Updated
            }

            CouncilEvent::SynthesisStart => {
                if self.phase != SpiralPhase::Deliberating {
                    return FoldEffect::Ignored;
                }
                self.phase = SpiralPhase::Synthesizing;
                FoldEffect::Updated
            }

            CouncilEvent::SynthesisChunk { chunk } => {
                if self.phase != SpiralPhase::Synthesizing {
                    return FoldEffect::Ignored;
                }
                self.synthesis_buffer.push_str(chunk);
                FoldEffect::Updated
            }

            CouncilEvent::SynthesisComplete { synthesis } => {
                // The server's completion is authoritative even when no
                // synthesis_start preceded it, but it never rewinds a
                // finished session and never sets the synthesis twice.
                if self.synthesis.is_some()
                    || !matches!(
                        self.phase,
                        SpiralPhase::Deliberating | SpiralPhase::Synthesizing
                    )
                {
                    return FoldEffect::Ignored;
                }
                self.phase = SpiralPhase::Complete;
                self.synthesis = Some(synthesis.clone());
                self.current_speaker = None;
                FoldEffect::Updated
            }

            CouncilEvent::SessionComplete => {
                self.current_speaker = None;
                for entry in self.archetype_responses.values_mut() {
                    entry.is_streaming = false;
                }
                FoldEffect::SessionEnded
            }

            CouncilEvent::Error { message } => {
                self.error = Some(message.clone());
                self.halted = true;
                self.current_speaker = None;
                for entry in self.archetype_responses.values_mut() {
                    entry.is_streaming = false;
                }
                FoldEffect::Faulted
            }
        }
    }

    /// Convenience accessor for one archetype's accumulated response.
    pub fn response(&self, archetype: &str) -> Option<&ArchetypeResponse> {
        self.archetype_responses.get(archetype)
    }
}
