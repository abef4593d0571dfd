//! Streaming council session client.
//!
//! Maintains at most one logical WebSocket connection, keyed by the most
//! recent session id passed to [`CouncilStreamClient::connect`]. Inbound
//! events are folded into an owned [`CouncilSession`] in strict arrival
//! order; callers read snapshots and receive [`SessionUpdate`]s, and mutate
//! only through `connect`/`disconnect`/`send_request`.
//!
//! After a `session_complete` event the session auto-resets to `Waiting`
//! after a fixed delay. The pending reset is cancellable: any subsequent
//! `send_request`, `connect`, or `disconnect` aborts it, so a rapid
//! follow-up question can never race against a stale reset.

use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use std::sync::Mutex as StdMutex;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock, mpsc};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use siraj_core::error::{Result, SirajError};
use siraj_core::session::{CouncilEvent, CouncilSession, FoldEffect, InboundEvent, parse_inbound};

use crate::config::ClientConfig;
use crate::types::EducationalRequest;

/// Delay between `session_complete` and the automatic reset to `Waiting`.
pub const AUTO_RESET_DELAY: Duration = Duration::from_millis(3000);

/// Notifications delivered to the subscriber as the stream progresses.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionUpdate {
    /// An inbound event was applied by the fold. Events the fold drops
    /// (wrong phase, stale sequence) are never forwarded.
    Event(CouncilEvent),
    /// The post-completion timer fired and the session returned to `Waiting`.
    Reset,
    /// The transport dropped; the caller decides whether to reconnect.
    Disconnected,
}

/// One live WebSocket connection.
struct Connection {
    session_id: String,
    outbound: mpsc::UnboundedSender<Message>,
    cancel: CancellationToken,
}

/// Folds inbound frames into the shared session and manages the
/// cancellable auto-reset timer. Shared between the client handle and the
/// reader task.
#[derive(Clone)]
struct EventDriver {
    session: Arc<RwLock<CouncilSession>>,
    last_error: Arc<RwLock<Option<SirajError>>>,
    updates: mpsc::UnboundedSender<SessionUpdate>,
    reset_delay: Duration,
    pending_reset: Arc<StdMutex<Option<CancellationToken>>>,
}

impl EventDriver {
    async fn handle_frame(&self, raw: &str) {
        match parse_inbound(raw) {
            Ok(InboundEvent::Known(event)) => self.handle_event(event).await,
            Ok(InboundEvent::Unknown(kind)) => {
                debug!(kind, "Ignoring unknown council event kind");
            }
            Err(err) => {
                warn!(%err, "Dropping undecodable council frame");
                *self.last_error.write().await = Some(err);
            }
        }
    }

    async fn handle_event(&self, event: CouncilEvent) {
        let effect = self.session.write().await.apply(&event);
        match effect {
            FoldEffect::SessionEnded => self.schedule_reset(),
            FoldEffect::Faulted => {
                if let CouncilEvent::Error { message } = &event {
                    *self.last_error.write().await = Some(SirajError::council(message.clone()));
                }
            }
            FoldEffect::Ignored => {
                // Dropped events never reach the subscriber; a renderer
                // must only see what the session state actually absorbed.
                debug!(?event, "Event did not apply in the current phase");
                return;
            }
            FoldEffect::Updated => {}
        }
        let _ = self.updates.send(SessionUpdate::Event(event));
    }

    async fn transport_dropped(&self, reason: String) {
        warn!(reason, "Council stream dropped");
        *self.last_error.write().await = Some(SirajError::connection(reason));
        let _ = self.updates.send(SessionUpdate::Disconnected);
    }

    /// Cancels a pending auto-reset, if one is scheduled.
    fn cancel_pending_reset(&self) {
        if let Some(token) = self.pending_reset.lock().expect("reset slot poisoned").take() {
            token.cancel();
        }
    }

    /// Schedules the post-completion reset, replacing any prior timer.
    fn schedule_reset(&self) {
        let token = CancellationToken::new();
        if let Some(prev) = self
            .pending_reset
            .lock()
            .expect("reset slot poisoned")
            .replace(token.clone())
        {
            prev.cancel();
        }

        let driver = self.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(driver.reset_delay) => {
                    driver.finish_reset(&token).await;
                }
            }
        });
    }

    /// Performs the scheduled reset, unless the timer lost a photo finish
    /// against a cancellation: `select!` may pick the elapsed-sleep branch
    /// even when the token was cancelled in the same instant.
    async fn finish_reset(&self, token: &CancellationToken) {
        if token.is_cancelled() {
            return;
        }
        self.session.write().await.reset();
        self.pending_reset.lock().expect("reset slot poisoned").take();
        let _ = self.updates.send(SessionUpdate::Reset);
    }
}

/// Client for streamed council sessions.
pub struct CouncilStreamClient {
    ws_url: String,
    driver: EventDriver,
    connection: Mutex<Option<Connection>>,
}

impl CouncilStreamClient {
    /// Creates a client and the update receiver its subscriber reads from.
    ///
    /// The receiver is handed out once and survives reconnects; updates from
    /// every connection of this client flow through it.
    pub fn new(config: &ClientConfig) -> (Self, mpsc::UnboundedReceiver<SessionUpdate>) {
        Self::with_reset_delay(config, AUTO_RESET_DELAY)
    }

    /// Same as [`new`](Self::new) with a custom auto-reset delay.
    pub fn with_reset_delay(
        config: &ClientConfig,
        reset_delay: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<SessionUpdate>) {
        let (updates_tx, updates_rx) = mpsc::unbounded_channel();
        let driver = EventDriver {
            session: Arc::new(RwLock::new(CouncilSession::new(String::new()))),
            last_error: Arc::new(RwLock::new(None)),
            updates: updates_tx,
            reset_delay,
            pending_reset: Arc::new(StdMutex::new(None)),
        };
        let client = Self {
            ws_url: config.ws_url.trim_end_matches('/').to_string(),
            driver,
            connection: Mutex::new(None),
        };
        (client, updates_rx)
    }

    /// Opens the council stream for `session_id`.
    ///
    /// A no-op when already connected for the same id. A live connection to
    /// a different id is torn down first; the client holds at most one
    /// connection, tied to the most recent id. On transport failure the
    /// error is recorded, the client stays disconnected, and no retry is
    /// attempted.
    pub async fn connect(&self, session_id: &str) -> Result<()> {
        let mut slot = self.connection.lock().await;
        if let Some(existing) = slot.as_ref() {
            if existing.session_id == session_id && !existing.cancel.is_cancelled() {
                return Ok(());
            }
            existing.cancel.cancel();
            *slot = None;
        }

        self.driver.cancel_pending_reset();
        *self.driver.session.write().await = CouncilSession::new(session_id);
        *self.driver.last_error.write().await = None;

        let url = format!("{}/ws/council/{}", self.ws_url, session_id);
        info!(url, "Connecting council stream");
        let stream = match connect_async(url.as_str()).await {
            Ok((stream, _)) => stream,
            Err(e) => {
                let err = SirajError::connection(format!("Failed to open council stream: {e}"));
                *self.driver.last_error.write().await = Some(err.clone());
                return Err(err);
            }
        };

        let (mut sink, mut source) = stream.split();
        let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<Message>();
        let cancel = CancellationToken::new();

        let writer_cancel = cancel.clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = writer_cancel.cancelled() => {
                        let _ = sink.send(Message::Close(None)).await;
                        break;
                    }
                    msg = outbound_rx.recv() => match msg {
                        Some(msg) => {
                            if sink.send(msg).await.is_err() {
                                break;
                            }
                        }
                        None => break,
                    }
                }
            }
        });

        let driver = self.driver.clone();
        let reader_cancel = cancel.clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = reader_cancel.cancelled() => break,
                    frame = source.next() => match frame {
                        Some(Ok(Message::Text(text))) => driver.handle_frame(&text).await,
                        Some(Ok(Message::Close(_))) | None => {
                            driver
                                .transport_dropped("Council stream closed by server".to_string())
                                .await;
                            break;
                        }
                        Some(Ok(_)) => {}
                        Some(Err(e)) => {
                            driver
                                .transport_dropped(format!("Council stream failed: {e}"))
                                .await;
                            break;
                        }
                    }
                }
            }
            reader_cancel.cancel();
        });

        *slot = Some(Connection {
            session_id: session_id.to_string(),
            outbound: outbound_tx,
            cancel,
        });
        Ok(())
    }

    /// Closes the transport, cancels any pending auto-reset, and resets all
    /// session-local state. Idempotent.
    pub async fn disconnect(&self) {
        if let Some(existing) = self.connection.lock().await.take() {
            info!(session_id = existing.session_id, "Disconnecting council stream");
            existing.cancel.cancel();
        }
        self.driver.cancel_pending_reset();
        self.driver.session.write().await.reset();
        *self.driver.last_error.write().await = None;
    }

    /// Sends a question over the open connection.
    ///
    /// Fails without queueing when the connection is not open. A successful
    /// send supersedes the previous exchange: the pending auto-reset (if
    /// any) is cancelled and the session returns to a fresh `Waiting` state
    /// so the prior synthesis can never leak into the new answer.
    pub async fn send_request(&self, request: &EducationalRequest) -> Result<()> {
        let slot = self.connection.lock().await;
        let Some(connection) = slot.as_ref().filter(|c| !c.cancel.is_cancelled()) else {
            let err = SirajError::send("Council stream is not connected");
            *self.driver.last_error.write().await = Some(err.clone());
            return Err(err);
        };

        self.driver.cancel_pending_reset();
        self.driver.session.write().await.reset();

        let envelope = serde_json::json!({
            "type": "educational_request",
            "request": request,
        });
        let text = serde_json::to_string(&envelope)?;
        if connection.outbound.send(Message::Text(text)).is_err() {
            let err = SirajError::send("Council stream writer is gone");
            *self.driver.last_error.write().await = Some(err.clone());
            return Err(err);
        }
        Ok(())
    }

    /// A snapshot of the current session state.
    pub async fn session(&self) -> CouncilSession {
        self.driver.session.read().await.clone()
    }

    /// Whether a connection is currently open.
    pub async fn is_connected(&self) -> bool {
        self.connection
            .lock()
            .await
            .as_ref()
            .is_some_and(|c| !c.cancel.is_cancelled())
    }

    /// The most recent error, if any.
    pub async fn last_error(&self) -> Option<SirajError> {
        self.driver.last_error.read().await.clone()
    }
}
