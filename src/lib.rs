#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod error;
mod hash_table;
mod int_key;

/// An integer-keyed hash map using open addressing.
///
/// This module provides [`IntMap`] along with its entry and iterator types.
pub mod hash_map;

/// An integer set built on [`IntMap`].
pub mod hash_set;

#[cfg(test)]
mod proptests;

pub use error::TryReserveError;
pub use hash_map::Entry;
pub use hash_map::IntMap;
pub use hash_set::IntSet;
#[cfg(feature = "stats")]
pub use hash_table::DebugStats;
pub use int_key::GOLDEN_RATIO;
pub use int_key::IntKey;
