use std::net::{Ipv4Addr, SocketAddr};

use kadtable::{bits::bit_mask, Contact, Id, RoutingTable};
use tracing_subscriber::{fmt, EnvFilter};

#[allow(dead_code)]
pub fn enable_tracing() {
    let _ = fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

/// A remote peer as a networking layer would track it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Peer {
    pub id: Id,
    pub addr: SocketAddr,
}

impl Peer {
    #[allow(dead_code)]
    pub fn new(id: Id, port: u16) -> Self {
        Self {
            id,
            addr: SocketAddr::from((Ipv4Addr::LOCALHOST, port)),
        }
    }
}

impl Contact for Peer {
    fn id(&self) -> &Id {
        &self.id
    }
}

/// Asserts the buckets cover `[0, 2^size - 1]` in order, without gaps or overlaps, and that every
/// contact lies within its bucket's range.
#[allow(dead_code)]
pub fn assert_partition<C: Contact + Clone>(rt: &RoutingTable<C>) {
    let buckets: Vec<_> = rt.buckets().collect();
    if buckets.is_empty() {
        return;
    }

    assert_eq!(buckets[0].start(), &Id::zero());
    assert_eq!(buckets[buckets.len() - 1].end(), &bit_mask(rt.size()));

    for pair in buckets.windows(2) {
        let next = Id::new(pair[0].end().as_biguint() + 1u8);
        assert_eq!(&next, pair[1].start(), "gap or overlap between buckets");
    }

    for bucket in &buckets {
        assert!(bucket.start() <= bucket.end());
        assert!(bucket.contacts().all(|c| bucket.in_range(c.id())));
    }
}
