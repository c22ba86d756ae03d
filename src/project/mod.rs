//! The persisted project document: a JSON-shaped snapshot of the scene plus
//! engine settings and metadata, tolerant of missing optional fields and
//! loud about structural damage.

use crate::codegen::TemplateKey;
use crate::error::ProjectError;
use crate::graph::{
    Block, BlockId, BlockSpec, BlockType, DataType, Position, Scene, SocketDirection, SocketRef,
    SocketSpec,
};
use ahash::AHashMap;
use chrono::Utc;
use indexmap::IndexMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

pub mod export;

pub use export::ScriptExporter;

/// Schema version written by this crate.
pub const DOCUMENT_VERSION: &str = "2.0";

/// The script engine generated code targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    #[default]
    Lua,
    Luajit,
}

impl Engine {
    pub fn name(&self) -> &'static str {
        match self {
            Engine::Lua => "lua",
            Engine::Luajit => "luajit",
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn default_memory_limit() -> u32 {
    256
}

fn default_enable_jit() -> bool {
    true
}

/// Engine configuration persisted with the project and echoed into the
/// generated document header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSettings {
    #[serde(default)]
    pub engine: Engine,
    /// Memory limit in MB.
    #[serde(default = "default_memory_limit")]
    pub memory_limit: u32,
    #[serde(default = "default_enable_jit")]
    pub enable_jit: bool,
    #[serde(default)]
    pub debug_mode: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            engine: Engine::Lua,
            memory_limit: 256,
            enable_jit: true,
            debug_mode: false,
        }
    }
}

/// Descriptive project metadata. Informational only; nothing is derived
/// from it on load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    #[serde(default)]
    pub name: String,
    /// Creation stamp as written, not parsed: older documents carry bare
    /// dates, newer ones RFC 3339.
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub blocks_count: usize,
    #[serde(default)]
    pub engine: Engine,
}

/// One socket in the document, keyed by name in the enclosing map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocketDocument {
    #[serde(rename = "type")]
    pub socket_type: String,
    pub direction: SocketDirection,
    pub data_type: DataType,
}

/// One block in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockDocument {
    #[serde(rename = "type")]
    pub block_type: BlockType,
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub position: Position,
    /// Missing map: the block is rebuilt with its default sockets. Present
    /// map: used exactly, defaults are not re-added.
    #[serde(default)]
    pub sockets: Option<IndexMap<String, SocketDocument>>,
    #[serde(rename = "lua_code", default)]
    pub template: String,
    /// Schema extension: persists the immutable template tag. Absent in
    /// documents written by older versions; re-derived from the title then.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_key: Option<TemplateKey>,
    #[serde(default)]
    pub data: AHashMap<String, serde_json::Value>,
}

/// One persisted wire. Schema extension: older documents carry no
/// `connections` array and load with all sockets unwired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionDocument {
    pub from: SocketRef,
    pub to: SocketRef,
}

/// The complete serialized project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectDocument {
    pub version: String,
    pub blocks: Vec<BlockDocument>,
    #[serde(default)]
    pub engine_settings: EngineSettings,
    #[serde(default)]
    pub metadata: ProjectMetadata,
    #[serde(default)]
    pub connections: Vec<ConnectionDocument>,
}

impl ProjectDocument {
    /// Snapshots a scene into the document schema.
    pub fn from_scene(scene: &Scene, name: &str, settings: &EngineSettings) -> Self {
        let blocks = scene.blocks().map(block_document).collect::<Vec<_>>();
        // The registry iterates in hash order; sort for stable output.
        let connections: Vec<ConnectionDocument> = scene
            .connections()
            .map(|c| ConnectionDocument {
                from: c.from.clone(),
                to: c.to.clone(),
            })
            .sorted_by_key(|c| (c.from.block.to_string(), c.from.socket.clone()))
            .collect();

        Self {
            version: DOCUMENT_VERSION.to_string(),
            metadata: ProjectMetadata {
                name: name.to_string(),
                created: Utc::now().to_rfc3339(),
                blocks_count: blocks.len(),
                engine: settings.engine,
            },
            blocks,
            engine_settings: *settings,
            connections,
        }
    }

    /// Rebuilds a scene from the document. Blocks keep their persisted ids;
    /// persisted wires that no longer validate (missing endpoint, illegal
    /// pair) are skipped with a log line rather than failing the load.
    pub fn into_scene(self) -> Scene {
        let mut scene = Scene::new();
        for doc in self.blocks {
            let id = BlockId::from(doc.id.clone());
            scene.insert_restored(Block::restore(id, block_spec(doc)));
        }
        for wire in self.connections {
            if scene.connect(&wire.from, &wire.to).is_none() {
                tracing::warn!(from = %wire.from, to = %wire.to, "skipping stale persisted connection");
            }
        }
        scene
    }

    pub fn from_json(json: &str) -> Result<Self, ProjectError> {
        serde_json::from_str(json).map_err(|e| ProjectError::Json(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, ProjectError> {
        serde_json::to_string_pretty(self).map_err(|e| ProjectError::Json(e.to_string()))
    }

    /// Loads a document from a `.blockproj` file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ProjectError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| ProjectError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&json)
    }

    /// Writes the document to a `.blockproj` file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ProjectError> {
        let path = path.as_ref();
        let json = self.to_json()?;
        fs::write(path, json).map_err(|e| ProjectError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

fn block_document(block: &Block) -> BlockDocument {
    BlockDocument {
        block_type: block.block_type,
        id: block.id().to_string(),
        title: block.title.clone(),
        description: block.description.clone(),
        position: block.position,
        sockets: Some(
            block
                .sockets()
                .map(|s| {
                    (
                        s.name.clone(),
                        SocketDocument {
                            socket_type: s.socket_type.clone(),
                            direction: s.direction,
                            data_type: s.data_type,
                        },
                    )
                })
                .collect(),
        ),
        template: block.template.clone(),
        template_key: Some(block.template_key()),
        data: block.data.clone(),
    }
}

fn block_spec(doc: BlockDocument) -> BlockSpec {
    BlockSpec {
        block_type: doc.block_type,
        title: doc.title,
        description: doc.description,
        template: doc.template,
        template_key: doc.template_key,
        position: Some(doc.position),
        sockets: doc.sockets.map(|sockets| {
            sockets
                .into_iter()
                .map(|(name, s)| SocketSpec::new(name, s.socket_type, s.direction, s.data_type))
                .collect()
        }),
        data: doc.data,
    }
}
