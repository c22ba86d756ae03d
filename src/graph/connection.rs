use super::socket::SocketRef;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Registry key for a connection record, issued by the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(pub(crate) u64);

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An edge wiring one output socket to one input socket.
///
/// A connection is purely a relationship: no state beyond its two endpoints.
/// Records live in the scene's registry; the scene creates them after
/// validation and destroys them on disconnect or block removal, so a record
/// is only ever observed with both endpoints present in the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    id: ConnectionId,
    /// The output endpoint the wire starts from.
    pub from: SocketRef,
    /// The input endpoint the wire feeds.
    pub to: SocketRef,
}

impl Connection {
    pub(crate) fn new(id: ConnectionId, from: SocketRef, to: SocketRef) -> Self {
        Self { id, from, to }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// The endpoint opposite `socket`, if `socket` is one of the two.
    pub fn peer_of(&self, socket: &SocketRef) -> Option<&SocketRef> {
        if &self.from == socket {
            Some(&self.to)
        } else if &self.to == socket {
            Some(&self.from)
        } else {
            None
        }
    }

    pub fn touches_block(&self, block: &super::block::BlockId) -> bool {
        &self.from.block == block || &self.to.block == block
    }
}
