//! End-to-end streaming tests against a scripted loopback WebSocket server.

use std::time::Duration;

use futures::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;

use siraj_client::{ClientConfig, CouncilStreamClient, SessionUpdate};
use siraj_client::types::EducationalRequest;
use siraj_core::archetype::{ArchetypeId, GradeLevel};
use siraj_core::session::{CouncilEvent, SpiralPhase};

/// Spawns a server that, for every connection, waits for one request
/// message and then replays the scripted events.
async fn spawn_script_server(script: Vec<&'static str>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                break;
            };
            let script = script.clone();
            tokio::spawn(async move {
                let mut ws = accept_async(stream).await.unwrap();
                while let Some(Ok(msg)) = ws.next().await {
                    if msg.is_text() {
                        break;
                    }
                }
                for frame in script {
                    ws.send(Message::Text(frame.to_string())).await.unwrap();
                }
                // Hold the connection open until the client goes away.
                while let Some(Ok(_)) = ws.next().await {}
            });
        }
    });
    format!("ws://{}", addr)
}

fn question() -> EducationalRequest {
    EducationalRequest::new(
        "Why is the sky blue?",
        GradeLevel::Middle,
        [ArchetypeId::Socratic, ArchetypeId::Mentor],
    )
    .streamed()
}

async fn next_event(rx: &mut tokio::sync::mpsc::UnboundedReceiver<SessionUpdate>) -> CouncilEvent {
    loop {
        match tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("timed out waiting for update")
            .expect("update stream ended")
        {
            SessionUpdate::Event(event) => return event,
            SessionUpdate::Reset | SessionUpdate::Disconnected => continue,
        }
    }
}

#[tokio::test]
async fn chunks_accumulate_and_complete_replaces() {
    let ws_url = spawn_script_server(vec![
        r#"{"type":"session_start"}"#,
        r#"{"type":"archetype_start","archetype":"socratic"}"#,
        r#"{"type":"archetype_chunk","archetype":"socratic","chunk":"Hello"}"#,
        r#"{"type":"archetype_chunk","archetype":"socratic","chunk":" world"}"#,
        r#"{"type":"archetype_complete","archetype":"socratic","full_response":"Hello there"}"#,
        r#"{"type":"synthesis_start"}"#,
        r#"{"type":"synthesis_complete","synthesis":"Final answer"}"#,
        r#"{"type":"session_complete"}"#,
    ])
    .await;

    let config = ClientConfig {
        ws_url,
        ..ClientConfig::default()
    };
    let (client, mut rx) = CouncilStreamClient::new(&config);

    client.connect("session-1").await.unwrap();
    assert!(client.is_connected().await);
    client.send_request(&question()).await.unwrap();

    assert_eq!(next_event(&mut rx).await, CouncilEvent::SessionStart);
    assert!(matches!(
        next_event(&mut rx).await,
        CouncilEvent::ArchetypeStart { .. }
    ));

    // Both chunks reach the subscriber in order. The session snapshot is
    // not inspected here: the reader may fold later frames before these
    // updates are drained.
    for expected in ["Hello", " world"] {
        match next_event(&mut rx).await {
            CouncilEvent::ArchetypeChunk { archetype, chunk, .. } => {
                assert_eq!(archetype, "socratic");
                assert_eq!(chunk, expected);
            }
            other => panic!("expected a chunk, got {other:?}"),
        }
    }

    // The authoritative full response replaces the accumulation.
    assert!(matches!(
        next_event(&mut rx).await,
        CouncilEvent::ArchetypeComplete { .. }
    ));
    let session = client.session().await;
    let socratic = session.response("socratic").unwrap();
    assert_eq!(socratic.content, "Hello there");
    assert!(socratic.completed);

    assert_eq!(next_event(&mut rx).await, CouncilEvent::SynthesisStart);
    assert_eq!(
        next_event(&mut rx).await,
        CouncilEvent::SynthesisComplete {
            synthesis: "Final answer".to_string()
        }
    );
    let session = client.session().await;
    assert_eq!(session.phase, SpiralPhase::Complete);
    assert_eq!(session.synthesis.as_deref(), Some("Final answer"));

    assert_eq!(next_event(&mut rx).await, CouncilEvent::SessionComplete);
    client.disconnect().await;
}

#[tokio::test]
async fn session_auto_resets_after_completion() {
    let ws_url = spawn_script_server(vec![
        r#"{"type":"session_start"}"#,
        r#"{"type":"archetype_chunk","archetype":"mentor","chunk":"You can"}"#,
        r#"{"type":"synthesis_complete","synthesis":"Done"}"#,
        r#"{"type":"session_complete"}"#,
    ])
    .await;

    let config = ClientConfig {
        ws_url,
        ..ClientConfig::default()
    };
    let (client, mut rx) =
        CouncilStreamClient::with_reset_delay(&config, Duration::from_millis(100));

    client.connect("session-2").await.unwrap();
    client.send_request(&question()).await.unwrap();

    while next_event(&mut rx).await != CouncilEvent::SessionComplete {}
    assert_eq!(client.session().await.phase, SpiralPhase::Complete);

    let update = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for reset")
        .unwrap();
    assert_eq!(update, SessionUpdate::Reset);

    let session = client.session().await;
    assert_eq!(session.phase, SpiralPhase::Waiting);
    assert!(session.archetype_responses.is_empty());
    assert_eq!(session.synthesis, None);
    client.disconnect().await;
}

#[tokio::test]
async fn reconnect_restores_initial_empty_state() {
    let ws_url = spawn_script_server(vec![
        r#"{"type":"session_start"}"#,
        r#"{"type":"archetype_chunk","archetype":"socratic","chunk":"residue"}"#,
    ])
    .await;

    let config = ClientConfig {
        ws_url,
        ..ClientConfig::default()
    };
    let (client, mut rx) = CouncilStreamClient::new(&config);

    client.connect("session-3").await.unwrap();
    client.send_request(&question()).await.unwrap();
    next_event(&mut rx).await;
    next_event(&mut rx).await;
    assert!(!client.session().await.archetype_responses.is_empty());

    client.disconnect().await;
    assert!(!client.is_connected().await);

    client.connect("session-3").await.unwrap();
    let session = client.session().await;
    assert_eq!(session.phase, SpiralPhase::Waiting);
    assert!(session.archetype_responses.is_empty());
    assert_eq!(session.synthesis, None);
    assert_eq!(session.error, None);
    client.disconnect().await;
}

#[tokio::test]
async fn server_error_event_surfaces_and_halts() {
    let ws_url = spawn_script_server(vec![
        r#"{"type":"session_start"}"#,
        r#"{"type":"error","message":"model overloaded"}"#,
        r#"{"type":"synthesis_start"}"#,
    ])
    .await;

    let config = ClientConfig {
        ws_url,
        ..ClientConfig::default()
    };
    let (client, mut rx) = CouncilStreamClient::new(&config);

    client.connect("session-4").await.unwrap();
    client.send_request(&question()).await.unwrap();

    next_event(&mut rx).await;
    assert!(matches!(
        next_event(&mut rx).await,
        CouncilEvent::Error { .. }
    ));
    // The trailing synthesis_start is dropped by the halted fold and never
    // reaches the subscriber.
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(rx.try_recv().is_err());

    let session = client.session().await;
    assert_eq!(session.phase, SpiralPhase::Deliberating);
    assert_eq!(session.error.as_deref(), Some("model overloaded"));
    assert!(client.last_error().await.unwrap().is_council());
    client.disconnect().await;
}

#[tokio::test]
async fn transport_drop_is_surfaced_to_the_subscriber() {
    // A server that closes immediately after the handshake.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let ws = accept_async(stream).await.unwrap();
        drop(ws);
    });

    let config = ClientConfig {
        ws_url: format!("ws://{}", addr),
        ..ClientConfig::default()
    };
    let (client, mut rx) = CouncilStreamClient::new(&config);
    client.connect("session-5").await.unwrap();

    let update = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for disconnect")
        .unwrap();
    assert_eq!(update, SessionUpdate::Disconnected);
    assert!(client.last_error().await.unwrap().is_connection());
}
