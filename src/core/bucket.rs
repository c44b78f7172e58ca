use std::cmp::Ordering;

use num_bigint::BigUint;

use crate::core::{bits::bit_align, id::Id, map::IdMap, traits::Contact};

/// The alignment applied to bit lengths when computing a bucket's depth.
const DEPTH_ALIGNMENT: usize = 8;

/// A contiguous, inclusive range of the keyspace and the contacts whose identifiers fall in it.
#[derive(Debug, Clone)]
pub struct Bucket<C> {
    // The lowest identifier in range.
    from: Id,
    // The highest identifier in range.
    to: Id,
    // The contacts keyed by identifier, all in `[from, to]`.
    contacts: IdMap<C>,
}

impl<C: Contact> Bucket<C> {
    /// Creates an empty bucket covering `[from, to]`.
    pub fn new(from: Id, to: Id) -> Self {
        debug_assert!(from <= to);

        Self {
            from,
            to,
            contacts: IdMap::new(),
        }
    }

    /// Returns the lowest identifier in the bucket's range.
    pub fn start(&self) -> &Id {
        &self.from
    }

    /// Returns the highest identifier in the bucket's range.
    pub fn end(&self) -> &Id {
        &self.to
    }

    /// Returns the position of the identifier relative to the bucket's range: `Less` if it is
    /// below the range, `Greater` if it is above it and `Equal` if the range contains it.
    pub fn cmp_id(&self, id: &Id) -> Ordering {
        if id < &self.from {
            Ordering::Less
        } else if id > &self.to {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }

    /// Returns `true` if the identifier is in the bucket's range.
    pub fn in_range(&self, id: &Id) -> bool {
        self.cmp_id(id) == Ordering::Equal
    }

    /// Returns the number of contacts in the bucket.
    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Returns `true` if a contact with this identifier is stored in the bucket.
    pub fn contains(&self, id: &Id) -> bool {
        self.contacts.contains(id)
    }

    pub fn get(&self, id: &Id) -> Option<&C> {
        self.contacts.get(id)
    }

    /// Returns an iterator over the bucket's contacts in an unspecified order.
    pub fn contacts(&self) -> impl Iterator<Item = &C> {
        self.contacts.values()
    }

    /// Attempts to insert a contact, handing it back if the bucket is full.
    ///
    /// A `capacity` of `None` means the bucket is unbounded. Re-inserting a known identifier is
    /// accepted but keeps the contact that was stored first.
    pub fn put(&mut self, contact: C, capacity: Option<usize>) -> Result<(), C> {
        debug_assert!(self.in_range(contact.id()));

        if self.contacts.contains(contact.id()) {
            return Ok(());
        }

        match capacity {
            Some(k) if !self.contacts.is_empty() && self.contacts.len() >= k => Err(contact),
            _ => {
                self.contacts.set(contact.id().clone(), contact);
                Ok(())
            }
        }
    }

    /// Splits the bucket's range in half, returning the lower and upper halves with the contacts
    /// partitioned between them.
    ///
    /// Returns `None` if the range is too small to yield two non-empty halves. The bucket itself
    /// is left untouched.
    pub fn split(&self) -> Option<(Self, Self)>
    where
        C: Clone,
    {
        let mid: BigUint = (self.from.as_biguint() + self.to.as_biguint()) / 2u8;
        if mid.bits() == 0 {
            return None;
        }

        let next = &mid + 1u8;
        if &next >= self.to.as_biguint() {
            return None;
        }

        let mut lo = Self::new(self.from.clone(), Id::new(mid));
        let mut hi = Self::new(Id::new(next), self.to.clone());

        for (id, contact) in &self.contacts {
            let half = if hi.in_range(id) { &mut hi } else { &mut lo };
            half.contacts.set(id.clone(), contact.clone());
        }

        Some((lo, hi))
    }

    /// Returns the number of leading bits the bucket's identifiers share, measured against the
    /// byte-aligned width of the largest identifier.
    pub fn depth(&self) -> usize {
        let mut ids = self.contacts.iter().map(|(id, _)| id);

        let Some(first) = ids.next() else {
            return 0;
        };

        // A single linear scan for the extremal identifiers.
        let (min, max) = ids.fold((first, first), |(min, max), id| {
            if id < min {
                (id, max)
            } else if id > max {
                (min, id)
            } else {
                (min, max)
            }
        });

        let width = bit_align(max.bits() as usize, DEPTH_ALIGNMENT);
        width - max.distance(min).bits() as usize
    }
}
