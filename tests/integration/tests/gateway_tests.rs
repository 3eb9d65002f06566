//! Gateway behavior tests
//!
//! Drives the event dispatcher over the in-memory store and asserts the
//! core guarantees: presence edges, direct-room resolution, the membership
//! gate, fan-out shape, receipts, and validation.
//!
//! Run with: cargo test -p integration-tests --test gateway_tests

use integration_tests::{client_event, MemoryStore, TestHarness};
use rtc_core::value_objects::UserId;
use rtc_gateway::protocol::ServerMessage;
use rtc_service::{DirectRoomService, MessageService};
use serde_json::{json, Value};

fn user_value(user_id: UserId) -> Value {
    serde_json::to_value(user_id).unwrap()
}

fn acks(messages: &[ServerMessage], ack: u64) -> Vec<&ServerMessage> {
    messages
        .iter()
        .filter(|m| m.event == "ack" && m.ack == Some(ack))
        .collect()
}

// ============================================================================
// Presence
// ============================================================================

#[tokio::test]
async fn test_presence_single_edge_per_user() {
    let harness = TestHarness::new();
    let alice = UserId::generate();
    let bob = UserId::generate();

    let mut watcher = harness.connect(bob).await;
    watcher.drain();

    // Three opens and two closes for the same user.
    let c1 = harness.connect(alice).await;
    let c2 = harness.connect(alice).await;
    let _c3 = harness.connect(alice).await;
    harness.disconnect(&c1).await;
    harness.disconnect(&c2).await;

    let updates: Vec<_> = watcher
        .drain()
        .into_iter()
        .filter(|m| m.event == "presence:update" && m.data["userId"] == user_value(alice))
        .collect();

    assert_eq!(updates.len(), 1, "exactly one announcement for three opens");
    assert_eq!(updates[0].data["online"], json!(true));
}

#[tokio::test]
async fn test_presence_offline_edge_on_last_disconnect() {
    let harness = TestHarness::new();
    let alice = UserId::generate();
    let bob = UserId::generate();

    let mut watcher = harness.connect(bob).await;
    let c1 = harness.connect(alice).await;
    let c2 = harness.connect(alice).await;
    watcher.drain();

    harness.disconnect(&c1).await;
    assert!(watcher.drain().is_empty(), "not the last connection yet");

    harness.disconnect(&c2).await;
    let updates = watcher.drain();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].event, "presence:update");
    assert_eq!(updates[0].data["online"], json!(false));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_presence_edges_stay_ordered_under_concurrent_churn() {
    let harness = std::sync::Arc::new(TestHarness::new());
    let alice = UserId::generate();
    let bob = UserId::generate();

    let mut watcher = harness.connect(bob).await;
    watcher.drain();

    // Two tasks open and close connections for the same user; a connect
    // racing a last disconnect must never invert the announced order.
    let mut tasks = Vec::new();
    for _ in 0..2 {
        let harness = harness.clone();
        tasks.push(tokio::spawn(async move {
            for _ in 0..20 {
                let client = harness.connect(alice).await;
                harness.disconnect(&client).await;
            }
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    let edges: Vec<bool> = watcher
        .drain()
        .into_iter()
        .filter(|m| m.event == "presence:update" && m.data["userId"] == user_value(alice))
        .map(|m| m.data["online"].as_bool().unwrap())
        .collect();

    assert!(!edges.is_empty());
    assert!(edges[0], "first announced edge is online");
    for pair in edges.windows(2) {
        assert_ne!(pair[0], pair[1], "announcements alternate strictly");
    }
    assert_eq!(edges.len() % 2, 0, "churn ends with the user offline");
}

#[tokio::test]
async fn test_presence_state_is_the_registry_snapshot() {
    let harness = TestHarness::new();
    let alice = UserId::generate();
    let bob = UserId::generate();

    let _alice_conn = harness.connect(alice).await;
    let mut bob_conn = harness.connect(bob).await;

    let state = bob_conn
        .drain()
        .into_iter()
        .find(|m| m.event == "presence:state")
        .expect("new socket receives the snapshot");

    let online = state.data["onlineUserIds"].as_array().unwrap();
    assert_eq!(online.len(), 2);
    assert!(online.contains(&user_value(alice)));
    assert!(online.contains(&user_value(bob)));
}

// ============================================================================
// Direct rooms
// ============================================================================

#[tokio::test]
async fn test_ensure_direct_room_is_idempotent() {
    let store = MemoryStore::new();
    let alice = UserId::generate();
    let bob = UserId::generate();

    let first = DirectRoomService::ensure_direct_room(store.as_ref(), alice, bob)
        .await
        .unwrap();
    let second = DirectRoomService::ensure_direct_room(store.as_ref(), alice, bob)
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(store.room_count(), 1);
}

#[tokio::test]
async fn test_ensure_direct_room_is_symmetric() {
    let store = MemoryStore::new();
    let alice = UserId::generate();
    let bob = UserId::generate();

    let forward = DirectRoomService::ensure_direct_room(store.as_ref(), alice, bob)
        .await
        .unwrap();
    let backward = DirectRoomService::ensure_direct_room(store.as_ref(), bob, alice)
        .await
        .unwrap();

    assert_eq!(forward, backward);
    assert_eq!(store.room_count(), 1);
}

#[tokio::test]
async fn test_dm_ensure_over_the_wire() {
    let harness = TestHarness::new();
    let alice = UserId::generate();
    let bob = UserId::generate();

    let mut conn = harness.connect(alice).await;
    conn.drain();

    harness
        .send(
            &conn,
            client_event("rooms:dm:ensure", json!({ "otherUserId": bob }), Some(1)),
        )
        .await;

    let messages = conn.drain();
    let acked = acks(&messages, 1);
    assert_eq!(acked.len(), 1);
    assert!(acked[0].data["roomId"].is_string());
    assert_eq!(harness.store.room_count(), 1);
}

#[tokio::test]
async fn test_dm_ensure_attaches_resolver_to_room_group() {
    let harness = TestHarness::new();
    let alice = UserId::generate();
    let bob = UserId::generate();

    let mut alice_conn = harness.connect(alice).await;
    harness
        .send(
            &alice_conn,
            client_event("rooms:dm:ensure", json!({ "otherUserId": bob }), Some(1)),
        )
        .await;
    let room_id = {
        let messages = alice_conn.drain();
        acks(&messages, 1)[0].data["roomId"].clone()
    };

    let bob_conn = harness.connect(bob).await;
    harness
        .send(
            &bob_conn,
            client_event("rooms:dm:ensure", json!({ "otherUserId": alice }), Some(1)),
        )
        .await;
    alice_conn.drain();

    // Resolving the room is enough to start receiving its traffic.
    harness
        .send(
            &bob_conn,
            client_event(
                "messages:send",
                json!({ "roomId": room_id, "content": "hey" }),
                None,
            ),
        )
        .await;

    let received: Vec<_> = alice_conn
        .drain()
        .into_iter()
        .filter(|m| m.event == "messages:new")
        .collect();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].data["content"], json!("hey"));
}

#[tokio::test]
async fn test_dm_with_self_is_rejected() {
    let harness = TestHarness::new();
    let alice = UserId::generate();

    let mut conn = harness.connect(alice).await;
    conn.drain();

    harness
        .send(
            &conn,
            client_event("rooms:dm:ensure", json!({ "otherUserId": alice }), Some(2)),
        )
        .await;

    let messages = conn.drain();
    let acked = acks(&messages, 2);
    assert_eq!(acked.len(), 1);
    assert_eq!(acked[0].data["code"], json!("SELF_DM"));
    assert_eq!(harness.store.room_count(), 0);
}

// ============================================================================
// Membership gate
// ============================================================================

#[tokio::test]
async fn test_non_member_send_persists_and_broadcasts_nothing() {
    let harness = TestHarness::new();
    let alice = UserId::generate();
    let bob = UserId::generate();
    let carol = UserId::generate();

    let room_id = harness.store.seed_group_room(bob, &[bob, carol]);

    let mut bob_conn = harness.connect(bob).await;
    harness
        .send(
            &bob_conn,
            client_event("rooms:join", json!({ "roomId": room_id }), None),
        )
        .await;
    bob_conn.drain();

    // Alice is not a member of the room.
    let mut alice_conn = harness.connect(alice).await;
    bob_conn.drain();
    alice_conn.drain();

    harness
        .send(
            &alice_conn,
            client_event(
                "messages:send",
                json!({ "roomId": room_id, "content": "hi" }),
                Some(5),
            ),
        )
        .await;

    assert_eq!(harness.store.message_count(), 0);
    assert!(bob_conn.drain().is_empty(), "no fan-out to the room");

    let messages = alice_conn.drain();
    let acked = acks(&messages, 5);
    assert_eq!(acked.len(), 1);
    assert_eq!(acked[0].data["code"], json!("FORBIDDEN"));
}

#[tokio::test]
async fn test_store_failure_denies_access() {
    let harness = TestHarness::new();
    let bob = UserId::generate();
    let room_id = harness.store.seed_group_room(bob, &[bob]);

    let mut conn = harness.connect(bob).await;
    conn.drain();

    harness.store.set_failing(true);
    harness
        .send(
            &conn,
            client_event("rooms:join", json!({ "roomId": room_id }), Some(9)),
        )
        .await;

    let messages = conn.drain();
    let acked = acks(&messages, 9);
    assert_eq!(acked.len(), 1, "member is denied while the store is down");
    assert_eq!(acked[0].data["code"], json!("FORBIDDEN"));
}

// ============================================================================
// Typing fan-out
// ============================================================================

#[tokio::test]
async fn test_typing_excludes_sender_reaches_everyone_else() {
    let harness = TestHarness::new();
    let alice = UserId::generate();
    let bob = UserId::generate();
    let carol = UserId::generate();

    let room_id = harness.store.seed_group_room(alice, &[alice, bob, carol]);

    let mut alice_conn = harness.connect(alice).await;
    let mut bob_conn = harness.connect(bob).await;
    let mut carol_conn = harness.connect(carol).await;

    for conn in [&alice_conn, &bob_conn, &carol_conn] {
        harness
            .send(
                conn,
                client_event("rooms:join", json!({ "roomId": room_id }), None),
            )
            .await;
    }
    alice_conn.drain();
    bob_conn.drain();
    carol_conn.drain();

    harness
        .send(
            &alice_conn,
            client_event(
                "typing",
                json!({ "roomId": room_id, "isTyping": true }),
                None,
            ),
        )
        .await;

    assert!(
        alice_conn.drain().is_empty(),
        "sender never hears its own typing"
    );

    for conn in [&mut bob_conn, &mut carol_conn] {
        let messages = conn.drain();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].event, "typing");
        assert_eq!(messages[0].data["userId"], user_value(alice));
        assert_eq!(messages[0].data["isTyping"], json!(true));
    }
}

// ============================================================================
// Message relay
// ============================================================================

#[tokio::test]
async fn test_send_reaches_whole_room_including_sender() {
    let harness = TestHarness::new();
    let alice = UserId::generate();
    let bob = UserId::generate();

    let room_id = harness.store.seed_group_room(alice, &[alice, bob]);

    let mut alice_conn = harness.connect(alice).await;
    let mut bob_conn = harness.connect(bob).await;
    for conn in [&alice_conn, &bob_conn] {
        harness
            .send(
                conn,
                client_event("rooms:join", json!({ "roomId": room_id }), None),
            )
            .await;
    }
    alice_conn.drain();
    bob_conn.drain();

    harness
        .send(
            &alice_conn,
            client_event(
                "messages:send",
                json!({ "roomId": room_id, "content": "hello", "clientId": "c-42" }),
                None,
            ),
        )
        .await;

    assert_eq!(harness.store.message_count(), 1);

    for conn in [&mut alice_conn, &mut bob_conn] {
        let messages = conn.drain();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].event, "messages:new");
        assert_eq!(messages[0].data["content"], json!("hello"));
        assert_eq!(messages[0].data["senderId"], user_value(alice));
    }
}

#[tokio::test]
async fn test_client_id_is_echoed() {
    let harness = TestHarness::new();
    let alice = UserId::generate();
    let room_id = harness.store.seed_group_room(alice, &[alice]);

    let mut conn = harness.connect(alice).await;
    harness
        .send(
            &conn,
            client_event("rooms:join", json!({ "roomId": room_id }), None),
        )
        .await;
    conn.drain();

    harness
        .send(
            &conn,
            client_event(
                "messages:send",
                json!({ "roomId": room_id, "content": "ping", "clientId": "local-7" }),
                None,
            ),
        )
        .await;

    let messages = conn.drain();
    assert_eq!(messages[0].data["clientId"], json!("local-7"));
}

#[tokio::test]
async fn test_empty_send_persists_and_broadcasts_nothing() {
    let harness = TestHarness::new();
    let alice = UserId::generate();
    let room_id = harness.store.seed_group_room(alice, &[alice]);

    let mut conn = harness.connect(alice).await;
    harness
        .send(
            &conn,
            client_event("rooms:join", json!({ "roomId": room_id }), None),
        )
        .await;
    conn.drain();

    harness
        .send(
            &conn,
            client_event(
                "messages:send",
                json!({ "roomId": room_id, "content": "   " }),
                Some(3),
            ),
        )
        .await;

    assert_eq!(harness.store.message_count(), 0);

    let messages = conn.drain();
    assert_eq!(messages.len(), 1, "only the error ack, no broadcast");
    let acked = acks(&messages, 3);
    assert_eq!(acked[0].data["code"], json!("VALIDATION_ERROR"));
}

#[tokio::test]
async fn test_send_with_both_content_and_file_url_is_rejected() {
    let harness = TestHarness::new();
    let alice = UserId::generate();
    let room_id = harness.store.seed_group_room(alice, &[alice]);

    let mut conn = harness.connect(alice).await;
    harness
        .send(
            &conn,
            client_event("rooms:join", json!({ "roomId": room_id }), None),
        )
        .await;
    conn.drain();

    harness
        .send(
            &conn,
            client_event(
                "messages:send",
                json!({
                    "roomId": room_id,
                    "content": "look",
                    "fileUrl": "https://files.example/a.png"
                }),
                Some(7),
            ),
        )
        .await;

    assert_eq!(harness.store.message_count(), 0);

    let messages = conn.drain();
    assert_eq!(messages.len(), 1, "only the error ack, no broadcast");
    let acked = acks(&messages, 7);
    assert_eq!(acked[0].data["code"], json!("VALIDATION_ERROR"));
}

// ============================================================================
// Read receipts
// ============================================================================

#[tokio::test]
async fn test_seen_is_idempotent_and_refreshes_read_at() {
    let harness = TestHarness::new();
    let alice = UserId::generate();
    let bob = UserId::generate();
    let room_id = harness.store.seed_group_room(alice, &[alice, bob]);

    let message = MessageService::send_message(
        harness.store.as_ref(),
        room_id,
        alice,
        Some("read me".to_string()),
        None,
    )
    .await
    .unwrap();

    let mut bob_conn = harness.connect(bob).await;
    harness
        .send(
            &bob_conn,
            client_event("rooms:join", json!({ "roomId": room_id }), None),
        )
        .await;
    bob_conn.drain();

    let seen = json!({ "roomId": room_id, "messageId": message.id });
    harness
        .send(&bob_conn, client_event("messages:seen", seen.clone(), None))
        .await;
    let first = harness.store.read_receipt(message.id, bob).unwrap();

    harness
        .send(&bob_conn, client_event("messages:seen", seen, None))
        .await;
    let second = harness.store.read_receipt(message.id, bob).unwrap();

    assert_eq!(harness.store.read_count(), 1, "one row per (message, user)");
    assert!(second.read_at >= first.read_at);

    let membership = harness.store.membership_row(room_id, bob).unwrap();
    assert_eq!(membership.last_seen_at, Some(second.read_at));

    let broadcasts: Vec<_> = bob_conn
        .drain()
        .into_iter()
        .filter(|m| m.event == "messages:seen")
        .collect();
    assert_eq!(broadcasts.len(), 2);
    assert_eq!(broadcasts[0].data["userId"], user_value(bob));
}

#[tokio::test]
async fn test_seen_for_message_in_other_room_is_not_found() {
    let harness = TestHarness::new();
    let alice = UserId::generate();
    let room_a = harness.store.seed_group_room(alice, &[alice]);
    let room_b = harness.store.seed_group_room(alice, &[alice]);

    let message = MessageService::send_message(
        harness.store.as_ref(),
        room_a,
        alice,
        Some("elsewhere".to_string()),
        None,
    )
    .await
    .unwrap();

    let mut conn = harness.connect(alice).await;
    conn.drain();

    harness
        .send(
            &conn,
            client_event(
                "messages:seen",
                json!({ "roomId": room_b, "messageId": message.id }),
                Some(4),
            ),
        )
        .await;

    let messages = conn.drain();
    let acked = acks(&messages, 4);
    assert_eq!(acked[0].data["code"], json!("NOT_FOUND"));
    assert_eq!(harness.store.read_count(), 0);
}

// ============================================================================
// Envelope handling
// ============================================================================

#[tokio::test]
async fn test_unknown_event_is_dropped() {
    let harness = TestHarness::new();
    let alice = UserId::generate();

    let mut conn = harness.connect(alice).await;
    conn.drain();

    harness
        .send(&conn, client_event("rooms:explode", json!({}), Some(8)))
        .await;

    assert!(conn.drain().is_empty(), "no ack, no broadcast, no close");
    assert!(harness.state.connection_manager().has_connection(conn.connection.id()));
}

#[tokio::test]
async fn test_malformed_payload_is_acked_as_validation_error() {
    let harness = TestHarness::new();
    let alice = UserId::generate();

    let mut conn = harness.connect(alice).await;
    conn.drain();

    harness
        .send(
            &conn,
            client_event("rooms:join", json!({ "roomId": 17 }), Some(6)),
        )
        .await;

    let messages = conn.drain();
    let acked = acks(&messages, 6);
    assert_eq!(acked.len(), 1);
    assert_eq!(acked[0].data["code"], json!("VALIDATION_ERROR"));
}
