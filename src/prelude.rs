//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types from the tsumiki
//! crate. Import this module to get access to the core functionality without
//! having to import each type individually.
//!
//! # Example
//!
//! ```rust,no_run
//! // Use the prelude to get easy access to all the core types.
//! use tsumiki::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! // Load a saved project and regenerate its code
//! let document = ProjectDocument::from_file("path/to/project.blockproj")?;
//! let settings = document.engine_settings;
//! let scene = document.into_scene();
//!
//! let code = CodeGenerator::builder(&scene)
//!     .project_name("demo")
//!     .engine_settings(settings)
//!     .build()
//!     .generate()?;
//!
//! println!("{}", code);
//! # Ok(())
//! # }
//! ```

// Graph model
pub use crate::graph::{
    Block, BlockId, BlockSpec, BlockType, Connection, ConnectionId, DataType, PendingConnection,
    PickOutcome, Position, Scene, Socket, SocketDirection, SocketRef, SocketSpec,
};

// Code generation
pub use crate::codegen::{BucketCounts, CodeGenerator, CodeGeneratorBuilder, TemplateKey};

// Library catalog
pub use crate::library::{BlockCategory, BlockLibrary, BlockTemplate};

// Project document and export
pub use crate::project::{
    Engine, EngineSettings, ProjectDocument, ProjectMetadata, ScriptExporter,
};

// Runner boundary
pub use crate::runner::{RunOutcome, ScriptExecutor, ScriptRunner};

// Error types
pub use crate::error::{GenerateError, ProjectError};

// Standard library re-exports commonly used with this crate
pub use std::path::Path;

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
