use super::socket::{DataType, Socket, SocketDirection, SocketSpec};
use crate::codegen::templates::TemplateKey;
use ahash::AHashMap;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque block identifier, generated at creation and stable across
/// save/load. Short form of a v4 UUID, eight hex characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    pub(crate) fn generate() -> Self {
        let mut hex = Uuid::new_v4().simple().to_string();
        hex.truncate(8);
        Self(hex)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for BlockId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for BlockId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// The semantic category of a block, which decides its section in the
/// generated document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    Event,
    Action,
    Control,
    Variable,
    Function,
    Operator,
    Value,
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BlockType::Event => "event",
            BlockType::Action => "action",
            BlockType::Control => "control",
            BlockType::Variable => "variable",
            BlockType::Function => "function",
            BlockType::Operator => "operator",
            BlockType::Value => "value",
        };
        write!(f, "{}", name)
    }
}

/// Canvas position. Presentation-only: persisted with the block, ignored by
/// code generation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Position assigned to a block added without one.
pub(crate) const DEFAULT_POSITION: Position = Position { x: 100.0, y: 100.0 };

/// Canvas offset between an original and its duplicate.
const DUPLICATE_OFFSET: f64 = 30.0;

/// The declarative form of a block, consumed by [`Scene::add_block`] and
/// produced by the library catalog.
///
/// [`Scene::add_block`]: super::Scene::add_block
#[derive(Debug, Clone)]
pub struct BlockSpec {
    pub block_type: BlockType,
    pub title: String,
    pub description: String,
    /// Lua text with `{socket_name}` placeholders. Empty means "derive a
    /// default from the template key at generation time".
    pub template: String,
    /// Explicit template tag. When absent, the tag is derived once from the
    /// title at creation time and never changes afterwards.
    pub template_key: Option<TemplateKey>,
    pub position: Option<Position>,
    /// Prebuilt socket set. When absent, the block receives the default
    /// sockets for its type and template tag.
    pub sockets: Option<Vec<SocketSpec>>,
    pub data: AHashMap<String, serde_json::Value>,
}

impl BlockSpec {
    pub fn new(block_type: BlockType, title: impl Into<String>) -> Self {
        Self {
            block_type,
            title: title.into(),
            description: String::new(),
            template: String::new(),
            template_key: None,
            position: None,
            sockets: None,
            data: AHashMap::new(),
        }
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    pub fn with_template_key(mut self, key: TemplateKey) -> Self {
        self.template_key = Some(key);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.position = Some(Position::new(x, y));
        self
    }

    pub fn with_sockets(mut self, sockets: Vec<SocketSpec>) -> Self {
        self.sockets = Some(sockets);
        self
    }

    pub fn with_data(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.data.insert(key.into(), value);
        self
    }
}

/// A node in the program graph representing one unit of generated code.
///
/// Blocks own their sockets exclusively; socket names are unique within a
/// block and their insertion order is the visual order. The open `data`
/// side-table carries per-type auxiliary metadata. Known keys are
/// conventions, not guarantees: function blocks may set `function_name`,
/// `parameters` and `is_main`.
#[derive(Debug, Clone)]
pub struct Block {
    id: BlockId,
    pub block_type: BlockType,
    pub title: String,
    pub description: String,
    /// Lua text with `{socket_name}` placeholders.
    pub template: String,
    template_key: TemplateKey,
    sockets: IndexMap<String, Socket>,
    pub data: AHashMap<String, serde_json::Value>,
    pub position: Position,
}

impl Block {
    pub(crate) fn new(spec: BlockSpec) -> Self {
        Self::build(BlockId::generate(), spec)
    }

    /// Rebuilds a block with a known id, used when loading a document.
    pub(crate) fn restore(id: BlockId, spec: BlockSpec) -> Self {
        Self::build(id, spec)
    }

    fn build(id: BlockId, spec: BlockSpec) -> Self {
        let block_type = spec.block_type;
        let template_key = spec
            .template_key
            .unwrap_or_else(|| TemplateKey::from_title(block_type, &spec.title));

        let socket_specs = spec
            .sockets
            .unwrap_or_else(|| default_sockets(block_type, template_key));

        let mut block = Self {
            id,
            block_type,
            title: spec.title,
            description: spec.description,
            template: spec.template,
            template_key,
            sockets: IndexMap::new(),
            data: spec.data,
            position: spec.position.unwrap_or(DEFAULT_POSITION),
        };
        for socket_spec in socket_specs {
            block.add_socket(socket_spec);
        }
        block
    }

    pub fn id(&self) -> &BlockId {
        &self.id
    }

    /// The immutable template tag fixed at creation. Retitling a block never
    /// changes which default template it generates.
    pub fn template_key(&self) -> TemplateKey {
        self.template_key
    }

    /// Adds a socket. Rejected as a no-op when the name is already taken.
    pub fn add_socket(&mut self, spec: SocketSpec) -> bool {
        if self.sockets.contains_key(&spec.name) {
            return false;
        }
        let socket = Socket::new(spec.name, spec.socket_type, spec.direction, spec.data_type);
        self.sockets.insert(socket.name.clone(), socket);
        true
    }

    pub fn socket(&self, name: &str) -> Option<&Socket> {
        self.sockets.get(name)
    }

    pub(crate) fn socket_mut(&mut self, name: &str) -> Option<&mut Socket> {
        self.sockets.get_mut(name)
    }

    /// All sockets in insertion (visual) order.
    pub fn sockets(&self) -> impl Iterator<Item = &Socket> {
        self.sockets.values()
    }

    pub fn input_sockets(&self) -> impl Iterator<Item = &Socket> {
        self.sockets
            .values()
            .filter(|s| s.direction == SocketDirection::Input)
    }

    pub fn socket_count(&self) -> usize {
        self.sockets.len()
    }

    /// The spec for this block's duplicate: same type, suffixed title,
    /// identical socket set, shallow `data` copy, offset position. The
    /// duplicate starts wholly unconnected.
    pub(crate) fn duplicate_spec(&self) -> BlockSpec {
        BlockSpec {
            block_type: self.block_type,
            title: format!("{} (Copy)", self.title),
            description: self.description.clone(),
            template: self.template.clone(),
            template_key: Some(self.template_key),
            position: Some(Position::new(
                self.position.x + DUPLICATE_OFFSET,
                self.position.y + DUPLICATE_OFFSET,
            )),
            sockets: Some(self.sockets.values().map(SocketSpec::from).collect()),
            data: self.data.clone(),
        }
    }

    /// Convention key `function_name`, falling back to a name derived from
    /// the block id.
    pub fn function_name(&self) -> String {
        self.data
            .get("function_name")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| format!("block_{}", self.id))
    }

    /// Convention key `parameters`: the raw parameter list text for the
    /// function wrapper.
    pub fn parameters(&self) -> String {
        self.data
            .get("parameters")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string()
    }

    /// Convention key `is_main`: whether the function wrapper also emits an
    /// invocation line.
    pub fn is_main(&self) -> bool {
        self.data
            .get("is_main")
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    }
}

/// The default socket set for a block created without prebuilt sockets.
///
/// Mirrors the canvas defaults: events expose a trigger, actions thread
/// execution through, if-family controls get a condition plus both branch
/// outputs, loop-family controls a condition plus the loop body output, and
/// functions a result. Everything else starts socketless.
fn default_sockets(block_type: BlockType, key: TemplateKey) -> Vec<SocketSpec> {
    use SocketDirection::{Input, Output};

    match block_type {
        BlockType::Event => vec![SocketSpec::execution("trigger", Output)],
        BlockType::Action => vec![
            SocketSpec::execution("exec_in", Input),
            SocketSpec::execution("exec_out", Output),
        ],
        BlockType::Control => match key {
            TemplateKey::IfThen | TemplateKey::IfElse => vec![
                SocketSpec::value("condition", Input, DataType::Boolean),
                SocketSpec::execution("then_out", Output),
                SocketSpec::execution("else_out", Output),
            ],
            TemplateKey::ForLoop | TemplateKey::WhileLoop => vec![
                SocketSpec::value("condition", Input, DataType::Boolean),
                SocketSpec::execution("loop_out", Output),
            ],
            _ => Vec::new(),
        },
        BlockType::Function => vec![SocketSpec::value("result", Output, DataType::Any)],
        _ => Vec::new(),
    }
}
