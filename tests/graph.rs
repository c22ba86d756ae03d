//! Tests for the block graph: connection legality, wiring round-trips,
//! removal cascades, duplication and the interactive wiring state machine.
mod common;
use common::*;
use tsumiki::prelude::*;

fn two_operators(scene: &mut Scene) -> (BlockId, BlockId) {
    let left = add_operator(scene, "Add", "{a} + {b}");
    let right = add_operator(scene, "Multiply", "{a} * {b}");
    (left, right)
}

#[test]
fn test_can_connect_rejects_self_and_same_block() {
    let mut scene = Scene::new();
    let (left, _) = two_operators(&mut scene);

    let a = SocketRef::new(left.clone(), "a");
    let result = SocketRef::new(left.clone(), "result");

    assert!(!scene.can_connect(&a, &a));
    // Opposite directions but the same owning block.
    assert!(!scene.can_connect(&a, &result));
}

#[test]
fn test_can_connect_rejects_same_direction() {
    let mut scene = Scene::new();
    let (left, right) = two_operators(&mut scene);

    let a = SocketRef::new(left, "a");
    let b = SocketRef::new(right, "b");
    assert!(!scene.can_connect(&a, &b));
}

#[test]
fn test_can_connect_type_rules() {
    let mut scene = Scene::new();
    let numbers = add_operator(&mut scene, "Add", "{a} + {b}");
    let mixed = scene.add_block(
        BlockSpec::new(BlockType::Function, "Print")
            .with_template("print({message})")
            .with_sockets(vec![
                SocketSpec::value("message", SocketDirection::Input, DataType::String),
                SocketSpec::value("anything", SocketDirection::Input, DataType::Any),
            ]),
    );

    let result = SocketRef::new(numbers, "result");
    let message = SocketRef::new(mixed.clone(), "message");
    let anything = SocketRef::new(mixed, "anything");

    // Concrete types that differ are rejected; `any` matches everything.
    assert!(!scene.can_connect(&result, &message));
    assert!(scene.can_connect(&result, &anything));
}

#[test]
fn test_can_connect_is_symmetric() {
    let mut scene = Scene::new();
    let (left, right) = two_operators(&mut scene);

    let out = SocketRef::new(left, "result");
    let input = SocketRef::new(right, "a");

    assert_eq!(scene.can_connect(&out, &input), scene.can_connect(&input, &out));
    assert!(scene.can_connect(&out, &input));
}

#[test]
fn test_connect_disconnect_round_trip() {
    let mut scene = Scene::new();
    let (left, right) = two_operators(&mut scene);

    let out = SocketRef::new(left, "result");
    let input = SocketRef::new(right, "a");

    let id = scene.connect(&out, &input).expect("Failed to connect");
    assert_eq!(scene.peer_of(&out), Some(input.clone()));
    assert_eq!(scene.peer_of(&input), Some(out.clone()));

    let record = scene.connection(id).expect("Missing connection record");
    assert_eq!(record.from, out);
    assert_eq!(record.to, input);

    assert!(scene.disconnect(&out));
    assert_eq!(scene.peer_of(&out), None);
    assert_eq!(scene.peer_of(&input), None);

    // Idempotent: a second disconnect is a no-op.
    assert!(!scene.disconnect(&out));
    assert_eq!(scene.connection_count(), 0);
}

#[test]
fn test_illegal_connect_is_a_no_op() {
    let mut scene = Scene::new();
    let (left, right) = two_operators(&mut scene);

    let a = SocketRef::new(left, "a");
    let b = SocketRef::new(right, "b");

    assert!(scene.connect(&a, &b).is_none());
    assert_eq!(scene.connection_count(), 0);
    assert_eq!(scene.peer_of(&a), None);
}

#[test]
fn test_last_connect_wins() {
    let mut scene = Scene::new();
    let first = add_operator(&mut scene, "Add", "{a} + {b}");
    let second = add_operator(&mut scene, "Subtract", "{a} - {b}");
    let sink = add_operator(&mut scene, "Multiply", "{a} * {b}");

    let first_out = SocketRef::new(first, "result");
    let second_out = SocketRef::new(second, "result");
    let input = SocketRef::new(sink, "a");

    scene.connect(&first_out, &input).expect("Failed to connect");
    scene.connect(&second_out, &input).expect("Failed to rewire");

    // The old wire is fully severed, no half-link survives.
    assert_eq!(scene.peer_of(&input), Some(second_out.clone()));
    assert_eq!(scene.peer_of(&first_out), None);
    assert_eq!(scene.connection_count(), 1);
}

#[test]
fn test_remove_block_cascades() {
    let mut scene = Scene::new();
    let hub = add_operator(&mut scene, "Add", "{a} + {b}");
    let upstream = add_operator(&mut scene, "Multiply", "{a} * {b}");
    let downstream = add_operator(&mut scene, "Subtract", "{a} - {b}");

    scene
        .connect(
            &SocketRef::new(upstream.clone(), "result"),
            &SocketRef::new(hub.clone(), "a"),
        )
        .expect("Failed to wire upstream");
    scene
        .connect(
            &SocketRef::new(hub.clone(), "result"),
            &SocketRef::new(downstream.clone(), "a"),
        )
        .expect("Failed to wire downstream");

    assert!(scene.remove_block(&hub));

    assert_eq!(scene.block_count(), 2);
    assert_eq!(scene.connection_count(), 0);
    // No dangling references anywhere in the graph.
    assert_eq!(scene.peer_of(&SocketRef::new(upstream, "result")), None);
    assert_eq!(scene.peer_of(&SocketRef::new(downstream, "a")), None);
}

#[test]
fn test_duplicate_block_is_isolated() {
    let mut scene = Scene::new();
    let original = add_operator(&mut scene, "Add", "{a} + {b}");
    let feeder = add_operator(&mut scene, "Multiply", "{a} * {b}");
    scene
        .connect(
            &SocketRef::new(feeder, "result"),
            &SocketRef::new(original.clone(), "a"),
        )
        .expect("Failed to connect");
    scene
        .block_mut(&original)
        .unwrap()
        .data
        .insert("note".to_string(), serde_json::json!("keep me"));

    let copy = scene
        .duplicate_block(&original)
        .expect("Failed to duplicate");

    let original_block = scene.block(&original).unwrap();
    let copy_block = scene.block(&copy).unwrap();

    assert_eq!(copy_block.title, "Add (Copy)");
    assert_eq!(copy_block.template, original_block.template);
    assert_eq!(copy_block.data.get("note"), original_block.data.get("note"));
    assert_eq!(copy_block.position.x, original_block.position.x + 30.0);
    assert_eq!(copy_block.position.y, original_block.position.y + 30.0);

    // Socket set matches by (name, direction, data type)...
    for (a, b) in original_block.sockets().zip(copy_block.sockets()) {
        assert_eq!(a.name, b.name);
        assert_eq!(a.direction, b.direction);
        assert_eq!(a.data_type, b.data_type);
    }
    // ...but the duplicate starts wholly unconnected, even though the
    // original's `a` is wired.
    assert!(copy_block.sockets().all(|s| !s.is_connected()));
}

#[test]
fn test_default_position_and_sockets() {
    let mut scene = Scene::new();
    let event = scene.add_block(BlockSpec::new(BlockType::Event, "On Start"));
    let control = scene.add_block(BlockSpec::new(BlockType::Control, "If-Then"));

    let event_block = scene.block(&event).unwrap();
    assert_eq!(event_block.position, Position::new(100.0, 100.0));
    assert!(event_block.socket("trigger").is_some());

    let control_block = scene.block(&control).unwrap();
    let names: Vec<&str> = control_block.sockets().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["condition", "then_out", "else_out"]);
    assert_eq!(
        control_block.socket("condition").unwrap().data_type,
        DataType::Boolean
    );
}

#[test]
fn test_duplicate_socket_name_rejected() {
    let mut scene = Scene::new();
    let id = add_operator(&mut scene, "Add", "{a} + {b}");
    let block = scene.block_mut(&id).unwrap();

    assert!(!block.add_socket(SocketSpec::value(
        "a",
        SocketDirection::Input,
        DataType::String
    )));
    // The original socket is untouched.
    assert_eq!(block.socket("a").unwrap().data_type, DataType::Number);
    assert_eq!(block.socket_count(), 3);
}

#[test]
fn test_pick_socket_completes_a_wire() {
    let mut scene = Scene::new();
    let (left, right) = two_operators(&mut scene);
    let out = SocketRef::new(left, "result");
    let input = SocketRef::new(right, "a");

    assert_eq!(scene.pick_socket(&out), PickOutcome::Started);
    assert_eq!(scene.pending(), &PendingConnection::AwaitingPeer(out.clone()));

    match scene.pick_socket(&input) {
        PickOutcome::Connected(_) => {}
        other => panic!("Expected Connected, got {:?}", other),
    }
    assert_eq!(scene.pending(), &PendingConnection::Idle);
    assert_eq!(scene.peer_of(&out), Some(input));
}

#[test]
fn test_pick_socket_abandons_illegal_pair() {
    let mut scene = Scene::new();
    let (left, right) = two_operators(&mut scene);
    let a = SocketRef::new(left, "a");
    let b = SocketRef::new(right, "b");

    assert_eq!(scene.pick_socket(&a), PickOutcome::Started);
    assert_eq!(scene.pick_socket(&b), PickOutcome::Rejected);

    // The attempt is gone: picking again starts fresh.
    assert_eq!(scene.pending(), &PendingConnection::Idle);
    assert_eq!(scene.connection_count(), 0);
}

#[test]
fn test_cancel_pending_has_no_side_effects() {
    let mut scene = Scene::new();
    let (left, _) = two_operators(&mut scene);
    let out = SocketRef::new(left, "result");

    scene.pick_socket(&out);
    scene.cancel_pending();

    assert_eq!(scene.pending(), &PendingConnection::Idle);
    assert_eq!(scene.connection_count(), 0);
}

#[test]
fn test_clear_resets_everything() {
    let mut scene = Scene::new();
    let (left, right) = two_operators(&mut scene);
    scene
        .connect(
            &SocketRef::new(left.clone(), "result"),
            &SocketRef::new(right, "a"),
        )
        .expect("Failed to connect");
    scene.pick_socket(&SocketRef::new(left, "a"));

    scene.clear();

    assert!(scene.is_empty());
    assert_eq!(scene.connection_count(), 0);
    assert_eq!(scene.pending(), &PendingConnection::Idle);
}
