#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

/// A key-value map over the separately chained HashTable.
///
/// This module provides a `HashMap` that wraps the `HashTable` and provides
/// a standard key-value map interface with configurable hashers.
pub mod hash_map;

/// The separately chained table underlying the map.
pub mod hash_table;

pub use hash_map::HashMap;
pub use hash_table::HashTable;

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        /// Hasher builder used by map constructors that do not take an
        /// explicit one.
        pub type DefaultHashBuilder = foldhash::fast::RandomState;
    } else if #[cfg(feature = "std")] {
        /// Hasher builder used by map constructors that do not take an
        /// explicit one.
        pub type DefaultHashBuilder = std::collections::hash_map::RandomState;
    } else {
        /// Placeholder hasher builder. Enable the `foldhash` or `std`
        /// feature to get a usable default, or construct maps through the
        /// `*_with_hasher` constructors.
        #[derive(Clone, Debug)]
        pub enum DefaultHashBuilder {}
    }
}

/// Faults raised by container misuse.
///
/// One umbrella type covers every fault the containers raise, so callers can
/// handle container misuse generically or match a specific kind for precise
/// recovery. Operations that report an outcome as a boolean (`insert`,
/// `erase`, `contains_key`) never raise; absence is a normal result there.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The two-sequence constructor was handed sequences of different
    /// lengths. No map is constructed.
    #[error("keys and values sequences differ in length ({keys} != {values})")]
    MismatchedLengths {
        /// Number of keys supplied.
        keys: usize,
        /// Number of values supplied.
        values: usize,
    },

    /// A keyed accessor (`at`, `bucket_size`, `bucket_index`) was asked about
    /// a key the map does not hold.
    #[error("key not found in the map")]
    KeyNotFound,

    /// An iterator positioned at end was dereferenced.
    #[error("iterator dereferenced past the end of the table")]
    OutOfRange,
}
