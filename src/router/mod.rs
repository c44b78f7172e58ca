//! Core routing table implementation.

use tracing::{debug, trace};

use crate::core::{bits::bit_mask, bucket::Bucket, id::Id, map::IdMap, traits::Contact};

#[cfg(feature = "sync")]
mod sync;
#[cfg(feature = "sync")]
#[cfg_attr(doc_cfg, doc(cfg(feature = "sync")))]
pub use sync::SyncRoutingTable;

/// The default width of the keyspace in bits.
pub const DEFAULT_SIZE: usize = 160;
/// The default maximum number of contacts in a bucket before a split is attempted.
pub const DEFAULT_BUCKET_SIZE: usize = 8;
/// The default split level.
pub const DEFAULT_SPLIT_LEVEL: usize = 5;

/// Routing table configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// The width of the keyspace in bits, identifiers range over `[0, 2^size - 1]`.
    ///
    /// Defaults to [DEFAULT_SIZE].
    pub size: usize,
    /// The maximum number of contacts in a bucket, `None` for unbounded buckets.
    ///
    /// Defaults to [DEFAULT_BUCKET_SIZE].
    pub bucket_size: Option<usize>,
    /// A full bucket that doesn't cover a home identifier is only split if its depth isn't a
    /// multiple of the split level. A split level of `0` lets every full bucket split.
    ///
    /// Defaults to [DEFAULT_SPLIT_LEVEL].
    pub split_level: usize,
    /// The local node's own identifiers.
    ///
    /// Defaults to none.
    pub home_ids: Vec<Id>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            bucket_size: Some(DEFAULT_BUCKET_SIZE),
            split_level: DEFAULT_SPLIT_LEVEL,
            home_ids: Vec::new(),
        }
    }
}

impl Config {
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    pub fn with_bucket_size(mut self, bucket_size: usize) -> Self {
        self.bucket_size = Some(bucket_size);
        self
    }

    /// Lifts the limit on the number of contacts per bucket.
    pub fn unbounded_buckets(mut self) -> Self {
        self.bucket_size = None;
        self
    }

    pub fn with_split_level(mut self, split_level: usize) -> Self {
        self.split_level = split_level;
        self
    }

    /// Adds one of the local node's identifiers.
    pub fn with_home_id(mut self, id: Id) -> Self {
        self.home_ids.push(id);
        self
    }
}

/// A dynamically sized Kademlia routing table.
///
/// The keyspace is partitioned into an ordered sequence of buckets covering `[0, 2^size - 1]`
/// without gaps or overlaps. Buckets split in half when they fill up, as long as they cover one
/// of the local node's identifiers or haven't reached a depth multiple of the split level.
#[derive(Debug, Clone)]
pub struct RoutingTable<C> {
    // The width of the keyspace in bits.
    size: usize,
    // The inclusive upper bound of the keyspace.
    max: Id,
    // The maximum number of contacts in a bucket (unbounded if `None`).
    bucket_size: Option<usize>,
    // Full buckets stop splitting at depths that are multiples of this.
    split_level: usize,
    // The local node's identifiers, never routed to.
    home_ids: IdMap<()>,
    // Ordered by range, created on the first insert.
    buckets: Vec<Bucket<C>>,
}

impl<C: Contact + Clone> Default for RoutingTable<C> {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl<C: Contact + Clone> RoutingTable<C> {
    /// Creates a new, empty routing table.
    pub fn new(config: Config) -> Self {
        let mut home_ids = IdMap::new();
        for id in config.home_ids {
            home_ids.set(id, ());
        }

        Self {
            size: config.size,
            max: bit_mask(config.size),
            bucket_size: config.bucket_size,
            split_level: config.split_level,
            home_ids,
            buckets: Vec::new(),
        }
    }

    /// Returns the width of the keyspace in bits.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the largest identifier in the keyspace.
    pub fn keyspace_max(&self) -> &Id {
        &self.max
    }

    pub fn bucket_size(&self) -> Option<usize> {
        self.bucket_size
    }

    pub fn split_level(&self) -> usize {
        self.split_level
    }

    /// Registers one of the local node's identifiers.
    ///
    /// Contacts already stored under that identifier are kept, later inserts are rejected.
    pub fn put_home_id(&mut self, id: Id) {
        debug!(%id, "registering home identifier");
        self.home_ids.set(id, ());
    }

    /// Returns `true` if the identifier belongs to the local node.
    pub fn is_home_id(&self, id: &Id) -> bool {
        self.home_ids.contains(id)
    }

    /// Returns an iterator over the local node's identifiers.
    pub fn home_ids(&self) -> impl Iterator<Item = &Id> {
        self.home_ids.iter().map(|(id, _)| id)
    }

    /// Returns the number of contacts in the table.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Bucket::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Bucket::is_empty)
    }

    /// Returns `true` if a contact with this identifier is stored in the table.
    pub fn contains(&self, id: &Id) -> bool {
        self.search(id).is_some_and(|i| self.buckets[i].contains(id))
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Returns an iterator over the buckets, ordered by range.
    pub fn buckets(&self) -> impl Iterator<Item = &Bucket<C>> {
        self.buckets.iter()
    }

    /// Attempts to add a contact to the table.
    ///
    /// Contacts outside the keyspace or carrying a home identifier are ignored, as are contacts
    /// whose bucket is full and can't be split. Re-inserting a known identifier keeps the
    /// contact stored first.
    pub fn put(&mut self, contact: C) {
        let id = contact.id().clone();

        if id > self.max {
            trace!(%id, "ignoring contact outside of the keyspace");
            return;
        }

        if self.is_home_id(&id) {
            trace!(%id, "ignoring contact with a home identifier");
            return;
        }

        if self.buckets.is_empty() {
            self.buckets.push(Bucket::new(Id::zero(), self.max.clone()));
        }

        let Some(i) = self.search(&id) else {
            return;
        };

        let contact = match self.buckets[i].put(contact, self.bucket_size) {
            Ok(()) => return,
            Err(contact) => contact,
        };

        let bucket = &self.buckets[i];
        let depth = bucket.depth();

        // Try to split the bucket if its range contains one of the node's own identifiers or its
        // depth d in the routing tree satisfies d ≢ 0 (mod b).
        if !self.covers_home_id(bucket) && !self.is_splittable_depth(depth) {
            trace!(%id, depth, "bucket is full, dropping contact");
            return;
        }

        let Some((mut lo, mut hi)) = bucket.split() else {
            trace!(
                %id,
                from = %bucket.start(),
                to = %bucket.end(),
                "bucket is too small to split, dropping contact"
            );
            return;
        };

        debug!(
            from = %bucket.start(),
            mid = %lo.end(),
            to = %bucket.end(),
            depth,
            "splitting bucket"
        );

        let half = if lo.in_range(&id) { &mut lo } else { &mut hi };
        if half.put(contact, self.bucket_size).is_err() {
            trace!(%id, "split bucket is still full, dropping contact");
        }

        // The split is committed whether or not the contact made it in.
        self.buckets[i] = lo;
        self.buckets.insert(i + 1, hi);
    }

    /// Returns up to `n` contacts gathered from the buckets nearest to the identifier, sorted by
    /// ascending identifier.
    ///
    /// Buckets are visited outwards from the one covering the identifier until at least `n`
    /// contacts have been collected. The result is ordered by identifier value rather than by
    /// XOR distance to `id`.
    pub fn closest_contacts(&self, id: &Id, n: usize) -> Vec<C> {
        let mut closest = Vec::new();

        let Some(start) = self.search(id) else {
            return closest;
        };

        // Buckets are traversed in descending and ascending order alternately.
        let mut lower = Some(start);
        let mut upper = start + 1;
        while lower.is_some() || upper < self.buckets.len() {
            if let Some(i) = lower {
                closest.extend(self.buckets[i].contacts().cloned());
                lower = i.checked_sub(1);
            }

            if let Some(bucket) = self.buckets.get(upper) {
                closest.extend(bucket.contacts().cloned());
            }
            upper += 1;

            // Have we visited enough contacts?
            if closest.len() >= n {
                break;
            }
        }

        // Identifiers are unique within the table.
        closest.sort_unstable_by(|a, b| a.id().cmp(b.id()));
        closest.truncate(n);

        closest
    }

    // Returns the index of the bucket covering the identifier, `None` if it lies outside the
    // keyspace (or the table has no buckets yet).
    fn search(&self, id: &Id) -> Option<usize> {
        let i = self
            .buckets
            .partition_point(|bucket| bucket.cmp_id(id) == std::cmp::Ordering::Greater);

        (i < self.buckets.len()).then_some(i)
    }

    fn covers_home_id(&self, bucket: &Bucket<C>) -> bool {
        self.home_ids().any(|id| bucket.in_range(id))
    }

    fn is_splittable_depth(&self, depth: usize) -> bool {
        // A split level of zero never stops splitting.
        depth.checked_rem(self.split_level).map_or(true, |r| r != 0)
    }
}
