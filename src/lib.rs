//! A dynamically splitting [Kademlia](https://pdos.csail.mit.edu/~petar/papers/maymounkov-kademlia-lncs.pdf)
//! routing table.
//!
//! The table partitions an `N`-bit keyspace into an ordered sequence of buckets, each covering a
//! contiguous range of identifiers and holding up to `k` contacts. Full buckets are split in half
//! when they cover one of the node's own identifiers, or when the identifiers they hold don't
//! yet share a number of leading bits that is a multiple of the split level `b`. Buckets far
//! away from the node's own identifiers therefore stop splitting and simply stay full.
//!
//! The crate is only the data structure: it performs no I/O, doesn't ping or evict contacts, and
//! never fails. Contacts that can't be placed are dropped silently.
//!
//! Notable differences with the paper:
//!
//! 1. [`RoutingTable::closest_contacts`] gathers contacts from the buckets adjacent to the target
//!    and orders them by identifier value, not by XOR distance to the target.
//! 2. A node can own several identifiers, any bucket covering one of them may always split.
//!
//! ```
//! use kadtable::{Config, Id, RoutingTable};
//!
//! let mut rt = RoutingTable::new(Config::default().with_home_id(Id::from(1)));
//!
//! rt.put(Id::from(42));
//! rt.put(Id::from(1));
//!
//! assert_eq!(rt.closest_contacts(&Id::from(40), 8), vec![Id::from(42)]);
//! ```

#![cfg_attr(doc_cfg, feature(doc_cfg))]

mod core;
mod error;
mod router;

pub use crate::{
    core::{bits, bucket::Bucket, id::Id, map::IdMap, traits::Contact},
    error::{Error, Result},
    router::{Config, RoutingTable, DEFAULT_BUCKET_SIZE, DEFAULT_SIZE, DEFAULT_SPLIT_LEVEL},
};

#[cfg(feature = "sync")]
#[cfg_attr(doc_cfg, doc(cfg(feature = "sync")))]
pub use crate::router::SyncRoutingTable;
