//! Foundational and often-reused types.

pub mod bits;
pub(crate) mod bucket;
pub(crate) mod id;
pub(crate) mod map;
pub(crate) mod traits;
