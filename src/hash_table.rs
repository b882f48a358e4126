use alloc::vec::Vec;
use core::fmt::Debug;

use crate::Error;

/// Number of buckets a freshly created table starts with.
const DEFAULT_CAPACITY: usize = 16;

/// Load factor above which the bucket array doubles.
const MAX_LOAD_FACTOR: f64 = 0.75;

/// Load factor below which the bucket array halves, down to a single bucket.
const MIN_LOAD_FACTOR: f64 = 0.25;

const CHANGE_FACTOR: usize = 2;

/// A chain of elements sharing a reduced hash value. Elements keep their full
/// 64-bit hash next to them so a rehash only re-masks, never re-hashes.
type Bucket<V> = Vec<(u64, V)>;

/// A hash table using separate chaining over a power-of-two bucket array.
///
/// `HashTable<V>` stores values of type `V` and resolves collisions by
/// appending to a per-bucket chain. Like standard raw tables, this
/// implementation requires you to provide both the hash value and an equality
/// predicate for each operation; [`HashMap`](crate::HashMap) layers key
/// semantics on top.
///
/// The bucket array always holds a power of two number of buckets (at least
/// one), so reducing a hash to a bucket index is a bitmask. The array doubles
/// when the load factor exceeds 0.75 and halves when it drops below 0.25,
/// checked after every mutation that lands or removes an element.
///
/// ## Example
///
/// ```rust
/// use std::collections::hash_map::RandomState;
/// use std::hash::BuildHasher;
///
/// use chain_hash::HashTable;
///
/// let state = RandomState::new();
/// let mut table: HashTable<(String, u32)> = HashTable::new();
///
/// let hash = state.hash_one("tuna");
/// table.insert(hash, ("tuna".to_string(), 4));
///
/// let found = table.find(hash, |(name, _)| name == "tuna");
/// assert_eq!(found, Some(&("tuna".to_string(), 4)));
/// ```
#[derive(Clone)]
pub struct HashTable<V> {
    buckets: Vec<Bucket<V>>,
    populated: usize,
}

impl<V> HashTable<V> {
    /// Creates an empty table with the default number of buckets.
    pub fn new() -> Self {
        Self::with_buckets(DEFAULT_CAPACITY)
    }

    /// Creates an empty table sized so `entries` elements fit without
    /// triggering a grow.
    pub fn with_capacity(entries: usize) -> Self {
        let mut capacity = DEFAULT_CAPACITY;
        while capacity <= entries || entries as f64 / capacity as f64 > MAX_LOAD_FACTOR {
            capacity *= CHANGE_FACTOR;
        }
        Self::with_buckets(capacity)
    }

    fn with_buckets(count: usize) -> Self {
        debug_assert!(count.is_power_of_two());
        let mut buckets = Vec::with_capacity(count);
        buckets.resize_with(count, Vec::new);
        Self {
            buckets,
            populated: 0,
        }
    }

    /// Returns the number of elements in the table.
    pub fn len(&self) -> usize {
        self.populated
    }

    /// Returns `true` if the table contains no elements.
    pub fn is_empty(&self) -> bool {
        self.populated == 0
    }

    /// Returns the number of buckets. Always a power of two, at least one.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the ratio of elements to buckets.
    pub fn load_factor(&self) -> f64 {
        self.populated as f64 / self.buckets.len() as f64
    }

    /// Returns the bucket index the given hash reduces to.
    pub fn bucket_index(&self, hash: u64) -> usize {
        // Capacity is a power of two, so masking is the modulo.
        (hash & (self.buckets.len() as u64 - 1)) as usize
    }

    /// Returns the chain length of the bucket the given hash reduces to.
    pub fn bucket_len(&self, hash: u64) -> usize {
        self.buckets[self.bucket_index(hash)].len()
    }

    /// Returns a reference to the element matching `hash` and `eq`, if any.
    pub fn find(&self, hash: u64, mut eq: impl FnMut(&V) -> bool) -> Option<&V> {
        self.buckets[self.bucket_index(hash)]
            .iter()
            .find(|(h, v)| *h == hash && eq(v))
            .map(|(_, v)| v)
    }

    /// Returns a mutable reference to the element matching `hash` and `eq`,
    /// if any.
    pub fn find_mut(&mut self, hash: u64, mut eq: impl FnMut(&V) -> bool) -> Option<&mut V> {
        let index = self.bucket_index(hash);
        self.buckets[index]
            .iter_mut()
            .find(|(h, v)| *h == hash && eq(v))
            .map(|(_, v)| v)
    }

    /// Appends an element to the chain its hash reduces to, then doubles the
    /// bucket array if the load factor has crossed 0.75.
    ///
    /// The caller must ensure no equal element is already present; the table
    /// performs no duplicate check of its own.
    pub fn insert(&mut self, hash: u64, value: V) {
        let index = self.bucket_index(hash);
        self.buckets[index].push((hash, value));
        self.populated += 1;
        if self.load_factor() > MAX_LOAD_FACTOR {
            self.rehash(self.buckets.len() * CHANGE_FACTOR);
        }
    }

    /// Removes and returns the element matching `hash` and `eq`, then halves
    /// the bucket array if the load factor has dropped below 0.25 and more
    /// than one bucket remains.
    ///
    /// Removal swaps the last chain element into the vacated slot, so the
    /// order of the remaining chain is not preserved.
    pub fn remove(&mut self, hash: u64, mut eq: impl FnMut(&V) -> bool) -> Option<V> {
        let index = self.bucket_index(hash);
        let bucket = &mut self.buckets[index];
        let slot = bucket.iter().position(|(h, v)| *h == hash && eq(v))?;
        let (_, value) = bucket.swap_remove(slot);
        self.populated -= 1;
        if self.load_factor() < MIN_LOAD_FACTOR && self.buckets.len() > 1 {
            self.rehash(self.buckets.len() / CHANGE_FACTOR);
        }
        Some(value)
    }

    /// Drops every element. The bucket array keeps its current size.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.populated = 0;
    }

    /// Returns a [bucket-scan iterator](Iter) over the table's elements.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(&self.buckets)
    }

    // Rebuilds the bucket array at the new size, moving every element to the
    // chain its re-masked hash selects.
    fn rehash(&mut self, new_capacity: usize) {
        debug_assert!(new_capacity.is_power_of_two());
        let mask = new_capacity as u64 - 1;
        let mut next: Vec<Bucket<V>> = Vec::with_capacity(new_capacity);
        next.resize_with(new_capacity, Vec::new);
        for bucket in self.buckets.drain(..) {
            for entry in bucket {
                next[(entry.0 & mask) as usize].push(entry);
            }
        }
        self.buckets = next;
    }
}

impl<V> Default for HashTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Debug> Debug for HashTable<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, V> IntoIterator for &'a HashTable<V> {
    type Item = &'a V;
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A forward, read-only iterator over a table's elements.
///
/// The iterator walks the bucket array in index order and each chain in
/// element order, skipping empty buckets. Its position is a `(bucket, slot)`
/// pair; the end state is `bucket == capacity`.
///
/// The iterator borrows the table, so any operation that could reallocate or
/// drop the bucket array (an insert or remove that rehashes, `clear`,
/// dropping the table) cannot be called while it is alive.
#[derive(Debug)]
pub struct Iter<'a, V> {
    buckets: &'a [Bucket<V>],
    bucket: usize,
    slot: usize,
}

impl<'a, V> Iter<'a, V> {
    fn new(buckets: &'a [Bucket<V>]) -> Self {
        let mut iter = Iter {
            buckets,
            bucket: 0,
            slot: 0,
        };
        // Begin on the first occupied bucket, or directly at end.
        while iter.bucket < iter.buckets.len() && iter.buckets[iter.bucket].is_empty() {
            iter.bucket += 1;
        }
        iter
    }

    /// Returns the element at the iterator's position.
    ///
    /// Unlike [`next`](Iterator::next), this does not advance, and reports an
    /// iterator positioned at end as [`Error::OutOfRange`].
    pub fn current(&self) -> Result<&'a V, Error> {
        match self.buckets.get(self.bucket) {
            Some(bucket) => Ok(&bucket[self.slot].1),
            None => Err(Error::OutOfRange),
        }
    }

    fn advance(&mut self) {
        self.slot += 1;
        if self.slot >= self.buckets[self.bucket].len() {
            self.slot = 0;
            self.bucket += 1;
            while self.bucket < self.buckets.len() && self.buckets[self.bucket].is_empty() {
                self.bucket += 1;
            }
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        let bucket = self.buckets.get(self.bucket)?;
        let entry = &bucket[self.slot].1;
        self.advance();
        Some(entry)
    }
}

impl<V> Clone for Iter<'_, V> {
    fn clone(&self) -> Self {
        Iter {
            buckets: self.buckets,
            bucket: self.bucket,
            slot: self.slot,
        }
    }
}

/// Two iterators are equal when they walk the same table (by identity, not
/// contents) and sit at the same position.
impl<V> PartialEq for Iter<'_, V> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.buckets.as_ptr(), other.buckets.as_ptr())
            && self.bucket == other.bucket
            && self.slot == other.slot
    }
}

impl<V> Eq for Iter<'_, V> {}
