//! # Tsumiki - Block Graph and Lua Code Generation Engine
//!
//! **Tsumiki** is the core of a drag-and-drop block editor: the data model
//! for typed blocks, sockets and connections, the rules governing which
//! sockets may be wired together, and the engine that walks the resulting
//! graph to emit a complete, runnable Lua document. Rendering, menus and the
//! actual script engine are host concerns; this crate only deals in graph
//! structure and generated text.
//!
//! ## Core Workflow
//!
//! 1.  **Instantiate blocks**: Pick entries from the [`BlockLibrary`]
//!     catalog (or build a [`graph::BlockSpec`] by hand) and add them to a
//!     [`graph::Scene`].
//! 2.  **Wire sockets**: Connect output sockets to input sockets through the
//!     scene, which validates every pair and owns the connection registry.
//! 3.  **Generate**: Use [`codegen::CodeGenerator::builder`] to produce the
//!     full Lua document - header, ordered sections, `main` wrapper and
//!     error-handling epilogue.
//! 4.  **Persist or run**: Snapshot the scene into a
//!     [`project::ProjectDocument`], export the text with an engine header,
//!     or hand it to a host [`runner::ScriptRunner`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tsumiki::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut scene = Scene::new();
//!
//!     // 1. Instantiate a catalog entry and a hand-built operator block.
//!     let start = BlockLibrary::find("On Start").expect("catalog entry");
//!     scene.add_block(BlockSpec::from(&start));
//!
//!     let add_id = scene.add_block(
//!         BlockSpec::new(BlockType::Operator, "Add")
//!             .with_template("{a} + {b}")
//!             .with_sockets(vec![
//!                 SocketSpec::value("a", SocketDirection::Input, DataType::Number),
//!                 SocketSpec::value("b", SocketDirection::Input, DataType::Number),
//!                 SocketSpec::value("result", SocketDirection::Output, DataType::Number),
//!             ]),
//!     );
//!
//!     let check_id = scene.add_block(
//!         BlockSpec::new(BlockType::Operator, "Greater")
//!             .with_template("{x} > {y}")
//!             .with_sockets(vec![
//!                 SocketSpec::value("x", SocketDirection::Input, DataType::Number),
//!                 SocketSpec::value("y", SocketDirection::Input, DataType::Number),
//!                 SocketSpec::value("result", SocketDirection::Output, DataType::Boolean),
//!             ]),
//!     );
//!
//!     // 2. Wire the sum into the comparison. The remaining inputs stay
//!     //    unwired and substitute their type defaults at generation time.
//!     scene.connect(
//!         &SocketRef::new(add_id.clone(), "result"),
//!         &SocketRef::new(check_id.clone(), "x"),
//!     );
//!
//!     // 3. Generate the complete document.
//!     let code = CodeGenerator::builder(&scene)
//!         .project_name("demo")
//!         .build()
//!         .generate()?;
//!     println!("{}", code);
//!
//!     // 4. Persist the scene for the next session.
//!     let document = ProjectDocument::from_scene(&scene, "demo", &EngineSettings::default());
//!     document.save("demo.blockproj")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Failure model
//!
//! Graph mutation never panics and never raises for valid input: illegal
//! edits (bad connection pairs, duplicate socket names) are rejected as
//! no-ops with a `bool`/`Option` result. Generation substitutes documented
//! defaults for every structural gap and only fails on a missing entry
//! point (non-preview mode) or a cyclic connection graph. Only the project
//! document boundary surfaces structured errors.

pub mod codegen;
pub mod error;
pub mod graph;
pub mod library;
pub mod prelude;
pub mod project;
pub mod runner;
