use super::block::{Block, BlockId, BlockSpec};
use super::connection::{Connection, ConnectionId};
use super::socket::{Socket, SocketDirection, SocketRef};
use ahash::AHashMap;
use indexmap::IndexMap;

/// State of the interactive wiring gesture.
///
/// Two picks make a wire: the first pick moves the machine to
/// `AwaitingPeer`, the second attempts the connection and always returns to
/// `Idle`, whether or not the pair was legal. Cancelling clears the pending
/// pick without side effects.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PendingConnection {
    #[default]
    Idle,
    AwaitingPeer(SocketRef),
}

/// What a call to [`Scene::pick_socket`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    /// The pick opened a wiring attempt from this socket.
    Started,
    /// The pick completed a wire from the previously picked socket.
    Connected(ConnectionId),
    /// The attempt was abandoned (unknown socket or illegal pair).
    Rejected,
}

/// The full set of blocks and connections for one project.
///
/// The scene is the only mutator of block and socket membership and the sole
/// authority over connection records: sockets hold registry keys, never
/// peers, so wiring can never be observed half-linked. All operations are
/// synchronous in-memory edits; a multi-threaded host must serialize access
/// behind a single mutex.
#[derive(Debug, Default)]
pub struct Scene {
    blocks: IndexMap<BlockId, Block>,
    connections: AHashMap<ConnectionId, Connection>,
    next_connection_id: u64,
    pending: PendingConnection,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Instantiates a block from a spec and registers it.
    pub fn add_block(&mut self, spec: BlockSpec) -> BlockId {
        let block = Block::new(spec);
        let id = block.id().clone();
        tracing::debug!(block = %id, title = %block.title, "block added");
        self.blocks.insert(id.clone(), block);
        id
    }

    pub(crate) fn insert_restored(&mut self, block: Block) -> BlockId {
        let id = block.id().clone();
        self.blocks.insert(id.clone(), block);
        id
    }

    /// Removes a block, severing all of its connections first so no socket
    /// anywhere is left pointing at a dead record.
    pub fn remove_block(&mut self, id: &BlockId) -> bool {
        let Some(block) = self.blocks.get(id) else {
            return false;
        };
        let socket_refs: Vec<SocketRef> = block
            .sockets()
            .map(|s| SocketRef::new(id.clone(), s.name.clone()))
            .collect();
        for socket_ref in &socket_refs {
            self.disconnect(socket_ref);
        }
        self.blocks.shift_remove(id);
        tracing::info!(block = %id, "block removed");
        true
    }

    /// Creates an unconnected copy of a block: same type and socket set,
    /// `" (Copy)"` title suffix, shallow `data` copy, position offset so the
    /// duplicate is visually distinguishable. Existing wiring is not copied.
    pub fn duplicate_block(&mut self, id: &BlockId) -> Option<BlockId> {
        let spec = self.blocks.get(id)?.duplicate_spec();
        Some(self.add_block(spec))
    }

    pub fn block(&self, id: &BlockId) -> Option<&Block> {
        self.blocks.get(id)
    }

    pub fn block_mut(&mut self, id: &BlockId) -> Option<&mut Block> {
        self.blocks.get_mut(id)
    }

    /// All blocks in insertion order.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.values()
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Clears blocks, connections and any pending wiring gesture.
    pub fn clear(&mut self) {
        self.blocks.clear();
        self.connections.clear();
        self.pending = PendingConnection::Idle;
    }

    pub fn socket(&self, socket_ref: &SocketRef) -> Option<&Socket> {
        self.blocks.get(&socket_ref.block)?.socket(&socket_ref.socket)
    }

    fn socket_mut(&mut self, socket_ref: &SocketRef) -> Option<&mut Socket> {
        self.blocks
            .get_mut(&socket_ref.block)?
            .socket_mut(&socket_ref.socket)
    }

    /// Connection legality. Symmetric: `can_connect(a, b) == can_connect(b, a)`.
    ///
    /// A pair is legal when the sockets are distinct, owned by distinct
    /// blocks, of opposite directions, and type-compatible (both concrete
    /// data types must match; `any` matches everything).
    pub fn can_connect(&self, a: &SocketRef, b: &SocketRef) -> bool {
        if a == b || a.block == b.block {
            return false;
        }
        match (self.socket(a), self.socket(b)) {
            (Some(sa), Some(sb)) => sa.compatible_with(sb),
            _ => false,
        }
    }

    /// Wires two sockets after validation. Last-connect-wins: an existing
    /// connection on either endpoint is disconnected first, so no socket
    /// ever carries more than one wire and no half-link survives. Returns
    /// `None` on an illegal pair, leaving the graph untouched.
    pub fn connect(&mut self, a: &SocketRef, b: &SocketRef) -> Option<ConnectionId> {
        if !self.can_connect(a, b) {
            tracing::debug!(from = %a, to = %b, "connection rejected");
            return None;
        }

        self.disconnect(a);
        self.disconnect(b);

        // Normalize so the record always runs output -> input.
        let (from, to) = match self.socket(a).map(|s| s.direction) {
            Some(SocketDirection::Output) => (a.clone(), b.clone()),
            _ => (b.clone(), a.clone()),
        };

        let id = ConnectionId(self.next_connection_id);
        self.next_connection_id += 1;
        self.connections
            .insert(id, Connection::new(id, from.clone(), to.clone()));
        if let Some(socket) = self.socket_mut(a) {
            socket.connection = Some(id);
        }
        if let Some(socket) = self.socket_mut(b) {
            socket.connection = Some(id);
        }
        tracing::debug!(%from, %to, connection = %id, "sockets connected");
        Some(id)
    }

    /// Severs the wire on a socket. Idempotent: returns `false` when the
    /// socket is unknown or already unwired.
    pub fn disconnect(&mut self, socket_ref: &SocketRef) -> bool {
        let Some(id) = self.socket(socket_ref).and_then(Socket::connection) else {
            return false;
        };
        let Some(record) = self.connections.remove(&id) else {
            return false;
        };
        for end in [record.from, record.to] {
            if let Some(socket) = self.socket_mut(&end) {
                socket.connection = None;
            }
        }
        true
    }

    /// The socket on the far side of this socket's wire, if wired.
    pub fn peer_of(&self, socket_ref: &SocketRef) -> Option<SocketRef> {
        let id = self.socket(socket_ref)?.connection()?;
        self.connections
            .get(&id)
            .and_then(|c| c.peer_of(socket_ref))
            .cloned()
    }

    pub fn connection(&self, id: ConnectionId) -> Option<&Connection> {
        self.connections.get(&id)
    }

    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.connections.values()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// One step of the two-pick wiring gesture.
    pub fn pick_socket(&mut self, socket_ref: &SocketRef) -> PickOutcome {
        match std::mem::take(&mut self.pending) {
            PendingConnection::Idle => {
                if self.socket(socket_ref).is_none() {
                    return PickOutcome::Rejected;
                }
                self.pending = PendingConnection::AwaitingPeer(socket_ref.clone());
                PickOutcome::Started
            }
            PendingConnection::AwaitingPeer(source) => match self.connect(&source, socket_ref) {
                Some(id) => PickOutcome::Connected(id),
                None => PickOutcome::Rejected,
            },
        }
    }

    /// Abandons a pending wiring gesture without side effects.
    pub fn cancel_pending(&mut self) {
        self.pending = PendingConnection::Idle;
    }

    pub fn pending(&self) -> &PendingConnection {
        &self.pending
    }
}
