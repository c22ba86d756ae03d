//! Common test utilities for building scenes and blocks.
use chrono::{DateTime, TimeZone, Utc};
use tsumiki::prelude::*;

/// Creates the standard "On Start" event spec used by most scenarios.
#[allow(dead_code)]
pub fn on_start_spec() -> BlockSpec {
    BlockSpec::new(BlockType::Event, "On Start")
        .with_description("Executes when program starts")
        .with_template("print(\"Program started\")")
}

/// Adds a binary number operator with `a`/`b` inputs and a `result` output.
#[allow(dead_code)]
pub fn add_operator(scene: &mut Scene, title: &str, template: &str) -> BlockId {
    scene.add_block(
        BlockSpec::new(BlockType::Operator, title)
            .with_template(template)
            .with_sockets(vec![
                SocketSpec::value("a", SocketDirection::Input, DataType::Number),
                SocketSpec::value("b", SocketDirection::Input, DataType::Number),
                SocketSpec::value("result", SocketDirection::Output, DataType::Number),
            ]),
    )
}

/// A scene holding a single "On Start" event block.
#[allow(dead_code)]
pub fn simple_scene() -> (Scene, BlockId) {
    let mut scene = Scene::new();
    let id = scene.add_block(on_start_spec());
    (scene, id)
}

/// A fixed timestamp so generated headers are byte-stable.
#[allow(dead_code)]
pub fn fixed_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0).unwrap()
}

/// Builds a generator over the scene with the fixed timestamp applied.
#[allow(dead_code)]
pub fn generator<'a>(scene: &'a Scene, name: &str) -> CodeGenerator<'a> {
    CodeGenerator::builder(scene)
        .project_name(name)
        .timestamp(fixed_timestamp())
        .build()
}
