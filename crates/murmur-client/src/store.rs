use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;

use murmur_types::{BlockList, Message, Resource, UserList};

/// Sequence number handed out when a read is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub resource: Resource,
    pub seq: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Updated,
    /// The slot already holds the answer to a newer request; `latest` is
    /// that request's sequence number.
    Superseded { latest: u64 },
}

struct Snapshot<T> {
    seq: u64,
    value: T,
}

/// Cached copy of one resource.
///
/// Reads are tagged with a ticket when issued. A response replaces the value
/// only if its ticket is newer than the one already applied, so a slow
/// response can never overwrite a newer one, while a response that lands
/// before a later request answers still updates the cache.
pub struct Slot<T> {
    resource: Resource,
    issued: AtomicU64,
    state: RwLock<Snapshot<T>>,
}

impl<T: Clone + Default> Slot<T> {
    pub fn new(resource: Resource) -> Self {
        Self {
            resource,
            issued: AtomicU64::new(0),
            state: RwLock::new(Snapshot {
                seq: 0,
                value: T::default(),
            }),
        }
    }

    pub fn resource(&self) -> Resource {
        self.resource
    }

    pub fn issue(&self) -> Ticket {
        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        Ticket {
            resource: self.resource,
            seq,
        }
    }

    pub async fn apply(&self, ticket: Ticket, value: T) -> Applied {
        debug_assert_eq!(ticket.resource, self.resource);
        let mut state = self.state.write().await;
        if ticket.seq <= state.seq {
            return Applied::Superseded { latest: state.seq };
        }
        state.seq = ticket.seq;
        state.value = value;
        Applied::Updated
    }

    pub async fn get(&self) -> T {
        self.state.read().await.value.clone()
    }

    /// Sequence number of the value currently held; 0 before the first update.
    pub async fn version(&self) -> u64 {
        self.state.read().await.seq
    }
}

/// Per-resource caches shared by the views.
pub struct Store {
    pub users: Slot<UserList>,
    pub messages: Slot<Vec<Message>>,
    pub blocks: Slot<BlockList>,
}

impl Store {
    pub fn new() -> Self {
        Self {
            users: Slot::new(Resource::Users),
            messages: Slot::new(Resource::Messages),
            blocks: Slot::new(Resource::Blocks),
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
