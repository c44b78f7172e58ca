use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};

use crate::{
    core::{id::Id, traits::Contact},
    router::{Config, RoutingTable},
};

#[cfg_attr(doc_cfg, doc(cfg(feature = "sync")))]
#[derive(Debug)]
/// A routing table implementation suitable for concurrent use.
///
/// It wraps [`RoutingTable`] in a single reader/writer lock: inserts take the lock exclusively,
/// queries share it. The lock is only ever held for in-memory work. Clones are cheap and share
/// the same table.
pub struct SyncRoutingTable<C> {
    routing_table: Arc<RwLock<RoutingTable<C>>>,
}

impl<C> Clone for SyncRoutingTable<C> {
    fn clone(&self) -> Self {
        Self {
            routing_table: Arc::clone(&self.routing_table),
        }
    }
}

impl<C: Contact + Clone> Default for SyncRoutingTable<C> {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl<C: Contact + Clone> From<RoutingTable<C>> for SyncRoutingTable<C> {
    fn from(routing_table: RoutingTable<C>) -> Self {
        Self {
            routing_table: Arc::new(RwLock::new(routing_table)),
        }
    }
}

impl<C: Contact + Clone> SyncRoutingTable<C> {
    pub fn new(config: Config) -> Self {
        RoutingTable::new(config).into()
    }

    /// See [`RoutingTable::put`].
    pub fn put(&self, contact: C) {
        self.routing_table.write().put(contact)
    }

    /// See [`RoutingTable::put_home_id`].
    pub fn put_home_id(&self, id: Id) {
        self.routing_table.write().put_home_id(id)
    }

    /// See [`RoutingTable::closest_contacts`].
    pub fn closest_contacts(&self, id: &Id, n: usize) -> Vec<C> {
        self.routing_table.read().closest_contacts(id, n)
    }

    pub fn contains(&self, id: &Id) -> bool {
        self.routing_table.read().contains(id)
    }

    pub fn len(&self) -> usize {
        self.routing_table.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.routing_table.read().is_empty()
    }

    /// Locks the table for reading, e.g. to inspect several properties consistently.
    ///
    /// Writers are blocked until the guard is dropped.
    pub fn read(&self) -> RwLockReadGuard<'_, RoutingTable<C>> {
        self.routing_table.read()
    }
}
