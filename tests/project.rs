//! Tests for the project document boundary: round-trips, tolerant loading
//! of sparse documents, loud failure on structural damage, and export
//! headers.
mod common;
use common::*;
use tsumiki::prelude::*;

fn varied_scene() -> (Scene, BlockId, BlockId) {
    let mut scene = Scene::new();
    let event = scene.add_block(
        on_start_spec()
            .with_position(40.0, 80.0)
            .with_data("note", serde_json::json!("entry point")),
    );
    let operator = add_operator(&mut scene, "Add", "{a} + {b}");
    scene
        .connect(
            &SocketRef::new(event.clone(), "trigger"),
            &SocketRef::new(operator.clone(), "a"),
        )
        .expect("Failed to wire scene");
    (scene, event, operator)
}

#[test]
fn test_document_round_trip_preserves_blocks() {
    let (scene, event, operator) = varied_scene();
    let settings = EngineSettings {
        engine: Engine::Luajit,
        memory_limit: 512,
        enable_jit: false,
        debug_mode: true,
    };

    let document = ProjectDocument::from_scene(&scene, "roundtrip", &settings);
    let json = document.to_json().expect("Failed to serialize");
    let reloaded = ProjectDocument::from_json(&json).expect("Failed to parse");

    assert_eq!(reloaded.version, "2.0");
    assert_eq!(reloaded.engine_settings, settings);
    assert_eq!(reloaded.metadata.name, "roundtrip");
    assert_eq!(reloaded.metadata.blocks_count, 2);
    assert_eq!(reloaded.metadata.engine, Engine::Luajit);

    let restored = reloaded.into_scene();
    assert_eq!(restored.block_count(), 2);

    for id in [&event, &operator] {
        let original = scene.block(id).expect("original block");
        let loaded = restored.block(id).expect("restored block lost its id");
        assert_eq!(loaded.block_type, original.block_type);
        assert_eq!(loaded.title, original.title);
        assert_eq!(loaded.description, original.description);
        assert_eq!(loaded.template, original.template);
        assert_eq!(loaded.template_key(), original.template_key());
        assert_eq!(loaded.position, original.position);
        assert_eq!(loaded.data, original.data);

        let original_sockets: Vec<_> = original
            .sockets()
            .map(|s| (s.name.clone(), s.direction, s.data_type))
            .collect();
        let loaded_sockets: Vec<_> = loaded
            .sockets()
            .map(|s| (s.name.clone(), s.direction, s.data_type))
            .collect();
        assert_eq!(loaded_sockets, original_sockets);
    }
}

#[test]
fn test_document_round_trip_restores_wiring() {
    let (scene, event, operator) = varied_scene();
    let document = ProjectDocument::from_scene(&scene, "wired", &EngineSettings::default());
    let restored = document.into_scene();

    assert_eq!(restored.connection_count(), 1);
    assert_eq!(
        restored.peer_of(&SocketRef::new(event, "trigger")),
        Some(SocketRef::new(operator, "a"))
    );
}

#[test]
fn test_legacy_document_without_connections_loads_unwired() {
    let json = r#"{
        "version": "2.0",
        "blocks": [{
            "type": "event",
            "id": "aaaa1111",
            "title": "On Start",
            "description": "Executes when program starts",
            "position": {"x": 0.0, "y": 0.0},
            "sockets": {
                "trigger": {"type": "execution", "direction": "output", "data_type": "any"}
            },
            "lua_code": "print(\"Program started\")",
            "data": {}
        }],
        "engine_settings": {
            "engine": "lua",
            "memory_limit": 256,
            "enable_jit": true,
            "debug_mode": false
        },
        "metadata": {"name": "legacy", "created": "2026-02-01"}
    }"#;

    let scene = ProjectDocument::from_json(json)
        .expect("Failed to parse legacy document")
        .into_scene();
    assert_eq!(scene.block_count(), 1);
    assert_eq!(scene.connection_count(), 0);
    assert_eq!(
        scene
            .peer_of(&SocketRef::new(BlockId::from("aaaa1111"), "trigger")),
        None
    );
}

#[test]
fn test_sparse_block_entry_gets_defaults() {
    // Only the required fields: everything else substitutes a default, and
    // the missing socket map recreates the type's default sockets.
    let json = r#"{
        "version": "2.0",
        "blocks": [{"type": "event", "id": "bbbb2222", "title": "On Start"}]
    }"#;

    let document = ProjectDocument::from_json(json).expect("Failed to parse sparse document");
    assert_eq!(document.engine_settings, EngineSettings::default());

    let scene = document.into_scene();
    let block = scene.block(&BlockId::from("bbbb2222")).expect("block");
    assert_eq!(block.description, "");
    assert_eq!(block.template, "");
    assert!(block.data.is_empty());
    assert!(block.socket("trigger").is_some());
}

#[test]
fn test_saved_socket_set_wins_over_defaults() {
    // An event whose trigger was removed in the editor must not get it back
    // on load: a present socket map is used exactly.
    let json = r#"{
        "version": "2.0",
        "blocks": [{
            "type": "event",
            "id": "cccc3333",
            "title": "On Start",
            "sockets": {}
        }]
    }"#;

    let scene = ProjectDocument::from_json(json)
        .expect("Failed to parse")
        .into_scene();
    let block = scene.block(&BlockId::from("cccc3333")).expect("block");
    assert_eq!(block.socket_count(), 0);
}

#[test]
fn test_stale_persisted_connection_is_skipped() {
    let json = r#"{
        "version": "2.0",
        "blocks": [{"type": "event", "id": "dddd4444", "title": "On Start"}],
        "connections": [{
            "from": {"block": "gone0000", "socket": "result"},
            "to": {"block": "dddd4444", "socket": "trigger"}
        }]
    }"#;

    let scene = ProjectDocument::from_json(json)
        .expect("Failed to parse")
        .into_scene();
    assert_eq!(scene.block_count(), 1);
    assert_eq!(scene.connection_count(), 0);
}

#[test]
fn test_malformed_json_fails_loudly() {
    let result = ProjectDocument::from_json("{not valid json");
    match result {
        Err(ProjectError::Json(message)) => assert!(!message.is_empty()),
        other => panic!("Expected Json error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_missing_blocks_array_fails_loudly() {
    let result = ProjectDocument::from_json(r#"{"version": "2.0"}"#);
    assert!(matches!(result, Err(ProjectError::Json(_))));
}

#[test]
fn test_missing_file_reports_io_error() {
    let result = ProjectDocument::from_file("/nonexistent/project.blockproj");
    assert!(matches!(result, Err(ProjectError::Io { .. })));
}

#[test]
fn test_engine_headers() {
    use tsumiki::project::export::engine_header;

    let lua = engine_header(Engine::Lua, fixed_timestamp());
    assert!(lua.starts_with("-- Lua Code"));
    assert!(lua.contains("-- Engine: Lua 5.4"));
    assert!(lua.contains("-- Generated: 2026-02-01 12:00:00"));

    let luajit = engine_header(Engine::Luajit, fixed_timestamp());
    assert!(luajit.starts_with("-- LuaJIT Code"));
    assert!(luajit.contains("jit.on()"));
    assert!(luajit.contains("LuaJIT JIT compiler enabled"));
}

#[test]
fn test_exporter_writes_headered_file() {
    let dir = std::env::temp_dir().join(format!("tsumiki-export-{}", uuid::Uuid::new_v4()));
    let exporter = ScriptExporter::new(&dir);

    let path = exporter
        .export("print(\"hi\")", "demo.lua", Engine::Lua)
        .expect("Failed to export");

    assert!(path.starts_with(dir.join("lua")));
    let written = std::fs::read_to_string(&path).expect("Failed to read export");
    assert!(written.starts_with("-- Lua Code"));
    assert!(written.ends_with("print(\"hi\")"));

    std::fs::remove_dir_all(&dir).expect("Failed to clean up");
}

#[test]
fn test_save_and_reload_from_disk() {
    let (scene, _, _) = varied_scene();
    let document = ProjectDocument::from_scene(&scene, "disk", &EngineSettings::default());

    let path = std::env::temp_dir().join(format!("tsumiki-{}.blockproj", uuid::Uuid::new_v4()));
    document.save(&path).expect("Failed to save");

    let reloaded = ProjectDocument::from_file(&path).expect("Failed to reload");
    assert_eq!(reloaded.blocks.len(), 2);
    assert_eq!(reloaded.connections.len(), 1);

    std::fs::remove_file(&path).expect("Failed to clean up");
}
