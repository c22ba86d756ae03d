use super::block::BlockId;
use super::connection::ConnectionId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of a block a socket sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocketDirection {
    Input,
    Output,
}

impl fmt::Display for SocketDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SocketDirection::Input => write!(f, "input"),
            SocketDirection::Output => write!(f, "output"),
        }
    }
}

/// The value classification carried by a socket.
///
/// `Any` is the wildcard: it connects to every other type, and an unwired
/// `Any` input substitutes `nil`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    #[default]
    Any,
    Number,
    String,
    Boolean,
    Table,
    Function,
}

impl DataType {
    /// The Lua literal substituted for an unwired input socket of this type.
    pub fn default_literal(&self) -> &'static str {
        match self {
            DataType::Number => "0",
            DataType::String => "\"\"",
            DataType::Boolean => "false",
            DataType::Table => "{}",
            DataType::Function => "function() end",
            DataType::Any => "nil",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::Any => "any",
            DataType::Number => "number",
            DataType::String => "string",
            DataType::Boolean => "boolean",
            DataType::Table => "table",
            DataType::Function => "function",
        };
        write!(f, "{}", name)
    }
}

/// A named, typed, directional attachment point on a block.
///
/// A socket never stores a reference to its peer. It holds at most one
/// [`ConnectionId`] into the scene's connection registry; the scene is the
/// only authority that creates or destroys those records, so the two
/// endpoints of a wire can never disagree about being connected.
#[derive(Debug, Clone)]
pub struct Socket {
    pub name: String,
    /// Free-form classification, `"execution"` or `"value"` by convention.
    pub socket_type: String,
    pub direction: SocketDirection,
    pub data_type: DataType,
    pub(crate) connection: Option<ConnectionId>,
}

impl Socket {
    pub fn new(
        name: impl Into<String>,
        socket_type: impl Into<String>,
        direction: SocketDirection,
        data_type: DataType,
    ) -> Self {
        Self {
            name: name.into(),
            socket_type: socket_type.into(),
            direction,
            data_type,
            connection: None,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    /// The registry key of the wire on this socket, if any.
    pub fn connection(&self) -> Option<ConnectionId> {
        self.connection
    }

    /// Pairwise compatibility: opposite directions and matching data types
    /// (either side being `Any` matches everything). The identity checks
    /// (`a != b`, different blocks) live on the scene, which knows ownership.
    pub fn compatible_with(&self, other: &Socket) -> bool {
        if self.direction == other.direction {
            return false;
        }
        if self.data_type != DataType::Any
            && other.data_type != DataType::Any
            && self.data_type != other.data_type
        {
            return false;
        }
        true
    }
}

/// Addresses one socket on one block, the key form used by the connection
/// registry and the interactive wiring state machine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SocketRef {
    pub block: BlockId,
    pub socket: String,
}

impl SocketRef {
    pub fn new(block: BlockId, socket: impl Into<String>) -> Self {
        Self {
            block,
            socket: socket.into(),
        }
    }
}

impl fmt::Display for SocketRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.block, self.socket)
    }
}

/// The declarative form of a socket, used by block specs and duplication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocketSpec {
    pub name: String,
    pub socket_type: String,
    pub direction: SocketDirection,
    pub data_type: DataType,
}

impl SocketSpec {
    pub fn new(
        name: impl Into<String>,
        socket_type: impl Into<String>,
        direction: SocketDirection,
        data_type: DataType,
    ) -> Self {
        Self {
            name: name.into(),
            socket_type: socket_type.into(),
            direction,
            data_type,
        }
    }

    /// An `"execution"` socket; execution flow is untyped.
    pub fn execution(name: impl Into<String>, direction: SocketDirection) -> Self {
        Self::new(name, "execution", direction, DataType::Any)
    }

    /// A `"value"` socket of the given data type.
    pub fn value(name: impl Into<String>, direction: SocketDirection, data_type: DataType) -> Self {
        Self::new(name, "value", direction, data_type)
    }
}

impl From<&Socket> for SocketSpec {
    fn from(socket: &Socket) -> Self {
        Self {
            name: socket.name.clone(),
            socket_type: socket.socket_type.clone(),
            direction: socket.direction,
            data_type: socket.data_type,
        }
    }
}
