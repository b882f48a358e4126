use alloc::vec::Vec;
use core::cell::OnceCell;
use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;
use core::ops::Index;
use core::ops::IndexMut;

use crate::DefaultHashBuilder;
use crate::Error;
use crate::hash_table::HashTable;

/// A hash map implemented over the separately chained [`HashTable`].
///
/// `HashMap<K, V, S>` stores key-value pairs where keys implement
/// `Hash + Eq` and uses a configurable hasher builder `S` to hash keys. Each
/// pair lives in the chain its key hashes to; a key appears in at most one
/// pair across the whole table.
///
/// Unlike the standard library map, [`insert`](HashMap::insert) refuses to
/// overwrite and reports the outcome as a boolean, and the keyed accessors
/// [`at`](HashMap::at), [`bucket_size`](HashMap::bucket_size) and
/// [`bucket_index`](HashMap::bucket_index) report a missing key as
/// [`Error::KeyNotFound`] instead of `None`. Presence checks and removal
/// stay boolean; a missing key is a normal outcome there, not a fault.
///
/// # Examples
///
/// ```rust
/// use chain_hash::HashMap;
///
/// let mut map: HashMap<&str, i32> = HashMap::new();
/// assert!(map.insert("white", 25));
/// assert!(map.insert("yellow", 76));
/// assert!(!map.insert("white", 0));
///
/// assert_eq!(map.at(&"white"), Ok(&25));
/// assert_eq!(map.len(), 2);
/// ```
#[derive(Clone)]
pub struct HashMap<K, V, S = DefaultHashBuilder> {
    table: HashTable<(K, V)>,
    hash_builder: S,
    fallback: OnceCell<V>,
}

impl<K, V, S> Debug for HashMap<K, V, S>
where
    K: Debug + Hash + Eq,
    V: Debug,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut map = f.debug_map();
        for (k, v) in self.iter() {
            map.entry(k, v);
        }
        map.finish()
    }
}

impl<K, V, S> HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Creates an empty map with the given hasher builder.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self {
            table: HashTable::new(),
            hash_builder,
            fallback: OnceCell::new(),
        }
    }

    /// Creates an empty map with the given hasher builder, sized so
    /// `capacity` entries fit without rehashing.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            table: HashTable::with_capacity(capacity),
            hash_builder,
            fallback: OnceCell::new(),
        }
    }

    /// Builds a map from a sequence of keys and a sequence of values, paired
    /// up in order.
    ///
    /// A key appearing more than once keeps the value paired with its last
    /// occurrence, so the resulting size is the number of distinct keys.
    ///
    /// # Errors
    ///
    /// [`Error::MismatchedLengths`] if the sequences differ in length; no map
    /// is constructed.
    pub fn from_keys_and_values_with_hasher(
        keys: Vec<K>,
        values: Vec<V>,
        hash_builder: S,
    ) -> Result<Self, Error> {
        if keys.len() != values.len() {
            return Err(Error::MismatchedLengths {
                keys: keys.len(),
                values: values.len(),
            });
        }
        let mut map = Self::with_capacity_and_hasher(keys.len(), hash_builder);
        for (key, value) in keys.into_iter().zip(values) {
            map.put(key, value);
        }
        Ok(map)
    }

    /// Returns the number of entries in the map.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the map contains no entries.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the number of buckets. Always a power of two, at least one.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Returns the ratio of entries to buckets.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashMap;
    ///
    /// let mut map: HashMap<i32, i32> = HashMap::new();
    /// for i in 0..4 {
    ///     map.insert(i, i);
    /// }
    /// assert_eq!(map.load_factor(), 0.25);
    /// ```
    pub fn load_factor(&self) -> f64 {
        self.table.load_factor()
    }

    /// Inserts a key-value pair, returning `true` on success.
    ///
    /// Insertion fails, returning `false` and leaving the map untouched, when
    /// the key is already present. A successful insert may double the bucket
    /// array once the load factor crosses 0.75.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashMap;
    ///
    /// let mut map: HashMap<&str, i32> = HashMap::new();
    /// assert!(map.insert("a", 1));
    /// assert!(!map.insert("a", 2));
    /// assert_eq!(map.at(&"a"), Ok(&1));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> bool {
        let hash = self.hash_builder.hash_one(&key);
        if self.table.find(hash, |(k, _)| k == &key).is_some() {
            return false;
        }
        self.table.insert(hash, (key, value));
        true
    }

    /// Returns `true` if the map contains the given key.
    pub fn contains_key(&self, key: &K) -> bool {
        let hash = self.hash_builder.hash_one(key);
        self.table.find(hash, |(k, _)| k == key).is_some()
    }

    /// Returns a reference to the value paired with the given key.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if the key is absent. The map is unmodified.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::Error;
    /// use chain_hash::HashMap;
    ///
    /// let mut map: HashMap<&str, i32> = HashMap::new();
    /// map.insert("a", 1);
    /// assert_eq!(map.at(&"a"), Ok(&1));
    /// assert_eq!(map.at(&"b"), Err(Error::KeyNotFound));
    /// ```
    pub fn at(&self, key: &K) -> Result<&V, Error> {
        let hash = self.hash_builder.hash_one(key);
        self.table
            .find(hash, |(k, _)| k == key)
            .map(|(_, v)| v)
            .ok_or(Error::KeyNotFound)
    }

    /// Returns a mutable reference to the value paired with the given key.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if the key is absent. The map is unmodified.
    pub fn at_mut(&mut self, key: &K) -> Result<&mut V, Error> {
        let hash = self.hash_builder.hash_one(key);
        self.table
            .find_mut(hash, |(k, _)| k == key)
            .map(|(_, v)| v)
            .ok_or(Error::KeyNotFound)
    }

    /// Removes the entry for the given key, returning `true` if one existed.
    ///
    /// Removal swaps the chain's last entry into the vacated slot, so the
    /// order of the remaining chain is not preserved. A successful erase may
    /// halve the bucket array once the load factor drops below 0.25.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashMap;
    ///
    /// let mut map: HashMap<&str, i32> = HashMap::new();
    /// map.insert("a", 1);
    /// assert!(map.erase(&"a"));
    /// assert!(!map.erase(&"a"));
    /// assert!(!map.contains_key(&"a"));
    /// ```
    pub fn erase(&mut self, key: &K) -> bool {
        let hash = self.hash_builder.hash_one(key);
        self.table.remove(hash, |(k, _)| k == key).is_some()
    }

    /// Returns the chain length of the bucket holding the given key.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if the key is absent.
    pub fn bucket_size(&self, key: &K) -> Result<usize, Error> {
        let hash = self.hash_builder.hash_one(key);
        if self.table.find(hash, |(k, _)| k == key).is_none() {
            return Err(Error::KeyNotFound);
        }
        Ok(self.table.bucket_len(hash))
    }

    /// Returns the index of the bucket holding the given key.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if the key is absent.
    pub fn bucket_index(&self, key: &K) -> Result<usize, Error> {
        let hash = self.hash_builder.hash_one(key);
        if self.table.find(hash, |(k, _)| k == key).is_none() {
            return Err(Error::KeyNotFound);
        }
        Ok(self.table.bucket_index(hash))
    }

    /// Drops every entry. The bucket array keeps its current size.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Returns an iterator over the map's key-value pairs.
    ///
    /// Pairs are yielded in bucket order and, within a bucket, chain order.
    /// Neither is meaningful to callers; see the equality semantics for what
    /// is actually guaranteed about entry order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashMap;
    ///
    /// let mut map: HashMap<&str, i32> = HashMap::new();
    /// map.insert("a", 1);
    /// map.insert("b", 2);
    ///
    /// let mut total = 0;
    /// for (_, value) in map.iter() {
    ///     total += value;
    /// }
    /// assert_eq!(total, 3);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// Returns an iterator over the map's keys.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the map's values.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    // Insert-or-overwrite used by the sequence-pair constructor.
    fn put(&mut self, key: K, value: V) {
        let hash = self.hash_builder.hash_one(&key);
        if let Some(entry) = self.table.find_mut(hash, |(k, _)| k == &key) {
            entry.1 = value;
            return;
        }
        self.table.insert(hash, (key, value));
    }
}

impl<K, V, S> HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    /// Creates an empty map using the default hasher builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashMap;
    ///
    /// let map: HashMap<i32, String> = HashMap::new();
    /// assert!(map.is_empty());
    /// assert_eq!(map.capacity(), 16);
    /// ```
    pub fn new() -> Self {
        Self::with_hasher(S::default())
    }

    /// Creates an empty map using the default hasher builder, sized so
    /// `capacity` entries fit without rehashing.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, S::default())
    }

    /// Builds a map from a sequence of keys and a sequence of values, paired
    /// up in order, using the default hasher builder.
    ///
    /// A key appearing more than once keeps the value paired with its last
    /// occurrence, so the resulting size is the number of distinct keys.
    ///
    /// # Errors
    ///
    /// [`Error::MismatchedLengths`] if the sequences differ in length; no map
    /// is constructed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashMap;
    ///
    /// let map: HashMap<&str, i32> = HashMap::from_keys_and_values(vec!["a", "a"], vec![1, 2]).unwrap();
    /// assert_eq!(map.len(), 1);
    /// assert_eq!(map.at(&"a"), Ok(&2));
    ///
    /// assert!(HashMap::<&str, i32>::from_keys_and_values(vec!["a"], vec![]).is_err());
    /// ```
    pub fn from_keys_and_values(keys: Vec<K>, values: Vec<V>) -> Result<Self, Error> {
        Self::from_keys_and_values_with_hasher(keys, values, S::default())
    }
}

impl<K, V, S> Default for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Two maps are equal when they hold the same size and every entry of one has
/// an equal-valued counterpart in the other. Entry order and bucket capacity
/// play no part.
impl<K, V, S> PartialEq for HashMap<K, V, S>
where
    K: Hash + Eq,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter().all(|(k, v)| other.at(k) == Ok(v))
    }
}

impl<K, V, S> Eq for HashMap<K, V, S>
where
    K: Hash + Eq,
    V: Eq,
    S: BuildHasher,
{
}

/// Read-only indexing.
///
/// Unlike [`at`](HashMap::at), a missing key is not a fault: the returned
/// reference points at a shared default-value sentinel owned by the map. The
/// sentinel is not an entry; it does not track later inserts of the key, so
/// resolve the reference before mutating the map again.
impl<K, V, S> Index<&K> for HashMap<K, V, S>
where
    K: Hash + Eq,
    V: Default,
    S: BuildHasher,
{
    type Output = V;

    fn index(&self, key: &K) -> &V {
        match self.at(key) {
            Ok(value) => value,
            Err(_) => self.fallback.get_or_init(V::default),
        }
    }
}

/// Mutable indexing.
///
/// A missing key is inserted with a default value (growing the bucket array
/// like [`insert`](HashMap::insert) would) and a reference to the fresh value
/// is returned.
///
/// # Examples
///
/// ```rust
/// use chain_hash::HashMap;
///
/// let mut map: HashMap<&str, u32> = HashMap::new();
/// map[&"seen"] += 1;
/// map[&"seen"] += 1;
/// assert_eq!(map.at(&"seen"), Ok(&2));
/// ```
impl<K, V, S> IndexMut<&K> for HashMap<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Default,
    S: BuildHasher,
{
    fn index_mut(&mut self, key: &K) -> &mut V {
        let hash = self.hash_builder.hash_one(key);
        if self.table.find(hash, |(k, _)| k == key).is_none() {
            self.table.insert(hash, (key.clone(), V::default()));
        }
        match self.table.find_mut(hash, |(k, _)| k == key) {
            Some((_, value)) => value,
            None => unreachable!("default value inserted for missing key"),
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the key-value pairs of a [`HashMap`].
///
/// This wraps the table's [bucket-scan iterator](crate::hash_table::Iter) and
/// shares its traversal order, position semantics and borrow behavior.
#[derive(Debug)]
pub struct Iter<'a, K, V> {
    inner: crate::hash_table::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iter<'a, K, V> {
    /// Returns the pair at the iterator's position.
    ///
    /// Unlike [`next`](Iterator::next), this does not advance, and reports an
    /// iterator positioned at end as [`Error::OutOfRange`].
    pub fn current(&self) -> Result<(&'a K, &'a V), Error> {
        self.inner.current().map(|(k, v)| (k, v))
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k, v))
    }
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

/// Two iterators are equal when they walk the same map (by identity, not
/// contents) and sit at the same position.
impl<K, V> PartialEq for Iter<'_, K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<K, V> Eq for Iter<'_, K, V> {}

/// An iterator over the keys of a [`HashMap`].
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }
}

/// An iterator over the values of a [`HashMap`].
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::string::ToString;
    use alloc::vec;
    use core::hash::BuildHasher;

    use rand::TryRngCore;
    use rand::rngs::OsRng;
    use siphasher::sip::SipHasher;

    use super::*;

    #[derive(Clone)]
    struct SipHashBuilder {
        k1: u64,
        k2: u64,
    }

    impl BuildHasher for SipHashBuilder {
        type Hasher = SipHasher;

        fn build_hasher(&self) -> Self::Hasher {
            SipHasher::new_with_keys(self.k1, self.k2)
        }
    }

    impl Default for SipHashBuilder {
        fn default() -> Self {
            let mut rng = OsRng;
            Self {
                k1: rng.try_next_u64().unwrap_or(0),
                k2: rng.try_next_u64().unwrap_or(0),
            }
        }
    }

    #[test]
    fn test_new_and_with_hasher() {
        let map: HashMap<i32, String, SipHashBuilder> = HashMap::new();
        assert!(map.is_empty());
        assert_eq!(map.len(), 0);
        assert_eq!(map.capacity(), 16);

        let map2 = HashMap::<i32, String, _>::with_hasher(SipHashBuilder::default());
        assert!(map2.is_empty());
        assert_eq!(map2.load_factor(), 0.0);
    }

    #[test]
    fn test_with_capacity() {
        let map: HashMap<i32, String, SipHashBuilder> = HashMap::with_capacity(100);
        assert!(map.capacity() > 100);
        assert!(map.capacity().is_power_of_two());
        assert!(map.is_empty());
    }

    #[test]
    fn test_insert_and_at() {
        let mut map = HashMap::with_hasher(SipHashBuilder::default());

        assert!(map.insert(1, "hello".to_string()));
        assert_eq!(map.len(), 1);
        assert!(!map.is_empty());

        assert_eq!(map.at(&1), Ok(&"hello".to_string()));
        assert_eq!(map.at(&2), Err(Error::KeyNotFound));
    }

    #[test]
    fn test_insert_existing_key_fails() {
        let mut map = HashMap::with_hasher(SipHashBuilder::default());

        assert!(map.insert(1, "hello".to_string()));
        assert!(!map.insert(1, "world".to_string()));
        assert_eq!(map.len(), 1);
        assert_eq!(map.at(&1), Ok(&"hello".to_string()));
    }

    #[test]
    fn test_at_mut() {
        let mut map = HashMap::with_hasher(SipHashBuilder::default());
        map.insert(1, "hello".to_string());

        map.at_mut(&1).unwrap().push_str(" world");
        assert_eq!(map.at(&1), Ok(&"hello world".to_string()));

        assert_eq!(map.at_mut(&2), Err(Error::KeyNotFound));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_contains_key() {
        let mut map = HashMap::with_hasher(SipHashBuilder::default());
        assert!(!map.contains_key(&1));

        map.insert(1, "value".to_string());
        assert!(map.contains_key(&1));
        assert!(!map.contains_key(&2));
    }

    #[test]
    fn test_erase() {
        let mut map = HashMap::with_hasher(SipHashBuilder::default());
        map.insert(1, "hello".to_string());
        map.insert(2, "world".to_string());

        assert!(map.erase(&1));
        assert_eq!(map.len(), 1);
        assert!(!map.contains_key(&1));
        assert!(map.contains_key(&2));

        assert!(!map.erase(&1));
        assert!(!map.erase(&3));
    }

    #[test]
    fn test_erase_absent_changes_nothing() {
        let mut map = HashMap::with_hasher(SipHashBuilder::default());
        for i in 0..10 {
            map.insert(i, i * 2);
        }
        let before = map.clone();
        let capacity = map.capacity();

        assert!(!map.erase(&999));
        assert_eq!(map.len(), 10);
        assert_eq!(map.capacity(), capacity);
        assert_eq!(map, before);
    }

    #[test]
    fn test_grow_and_shrink_capacity() {
        let mut map = HashMap::with_hasher(SipHashBuilder::default());
        assert_eq!(map.capacity(), 16);

        // Crossing 0.75 doubles: the thirteenth entry tips 16 buckets over.
        for i in 0..12 {
            map.insert(i, i);
            assert_eq!(map.capacity(), 16);
        }
        map.insert(12, 12);
        assert_eq!(map.capacity(), 32);

        // Dropping below 0.25 halves: 7 of 32 is the first to tip under.
        for i in 8..13 {
            assert!(map.erase(&i));
            assert_eq!(map.capacity(), 32);
        }
        assert!(map.erase(&7));
        assert_eq!(map.capacity(), 16);

        for i in 0..7 {
            assert!(map.erase(&i));
        }
        assert!(map.is_empty());
        assert_eq!(map.capacity(), 2);
        assert!(map.capacity().is_power_of_two());
    }

    #[test]
    fn test_from_keys_and_values() {
        let map = HashMap::<String, i32, SipHashBuilder>::from_keys_and_values(
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
            vec![1, 2, 3],
        )
        .unwrap();

        assert_eq!(map.len(), 3);
        assert_eq!(map.at(&"a".to_string()), Ok(&1));
        assert_eq!(map.at(&"b".to_string()), Ok(&2));
        assert_eq!(map.at(&"c".to_string()), Ok(&3));
    }

    #[test]
    fn test_from_keys_and_values_duplicates_keep_last() {
        let map = HashMap::<String, i32, SipHashBuilder>::from_keys_and_values(
            vec!["a".to_string(), "a".to_string()],
            vec![1, 2],
        )
        .unwrap();

        assert_eq!(map.len(), 1);
        assert_eq!(map.at(&"a".to_string()), Ok(&2));
    }

    #[test]
    fn test_from_keys_and_values_mismatched_lengths() {
        let result = HashMap::<i32, i32, SipHashBuilder>::from_keys_and_values(
            vec![1, 2],
            vec![10, 20, 30],
        );
        assert_eq!(
            result.unwrap_err(),
            Error::MismatchedLengths { keys: 2, values: 3 }
        );
    }

    #[test]
    fn test_from_keys_and_values_presizes() {
        let keys: Vec<i32> = (0..100).collect();
        let values: Vec<i32> = (0..100).collect();
        let map =
            HashMap::<i32, i32, SipHashBuilder>::from_keys_and_values(keys, values).unwrap();

        assert_eq!(map.len(), 100);
        assert!(map.capacity().is_power_of_two());
        assert!(map.load_factor() <= 0.75);
    }

    #[test]
    fn test_bucket_size_and_index() {
        let mut map = HashMap::with_hasher(SipHashBuilder::default());
        map.insert("carp".to_string(), 1);

        let index = map.bucket_size(&"carp".to_string());
        assert!(index.unwrap() >= 1);
        let index = map.bucket_index(&"carp".to_string()).unwrap();
        assert!(index < map.capacity());

        assert_eq!(
            map.bucket_size(&"missing".to_string()),
            Err(Error::KeyNotFound)
        );
        assert_eq!(
            map.bucket_index(&"missing".to_string()),
            Err(Error::KeyNotFound)
        );
    }

    #[test]
    fn test_clear() {
        let mut map = HashMap::with_hasher(SipHashBuilder::default());
        map.insert(1, "hello".to_string());
        map.insert(2, "world".to_string());
        let capacity = map.capacity();

        map.clear();
        assert_eq!(map.len(), 0);
        assert!(map.is_empty());
        assert_eq!(map.capacity(), capacity);
        assert!(!map.contains_key(&1));
        assert!(!map.contains_key(&2));
    }

    #[test]
    fn test_equality_ignores_order() {
        let mut a = HashMap::with_hasher(SipHashBuilder::default());
        a.insert("x".to_string(), 1);
        a.insert("y".to_string(), 2);

        let mut b = HashMap::with_hasher(SipHashBuilder::default());
        b.insert("y".to_string(), 2);
        b.insert("x".to_string(), 1);

        assert_eq!(a, b);

        b.at_mut(&"y".to_string()).map(|v| *v = 9).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_equality_ignores_capacity() {
        let mut a = HashMap::with_hasher(SipHashBuilder::default());
        let mut b = HashMap::with_capacity_and_hasher(100, SipHashBuilder::default());
        assert_ne!(a.capacity(), b.capacity());

        a.insert(1, "one".to_string());
        b.insert(1, "one".to_string());
        assert_eq!(a, b);

        b.insert(2, "two".to_string());
        assert_ne!(a, b);
    }

    #[test]
    fn test_clone_is_deep() {
        let mut map = HashMap::with_hasher(SipHashBuilder::default());
        for i in 0..20 {
            map.insert(i, i.to_string());
        }

        let copy = map.clone();
        assert_eq!(copy, map);
        assert_eq!(copy.capacity(), map.capacity());

        map.at_mut(&3).unwrap().push_str("-changed");
        assert_eq!(copy.at(&3), Ok(&"3".to_string()));
        assert_ne!(copy, map);
    }

    #[test]
    fn test_index_returns_sentinel_for_missing() {
        let mut map: HashMap<String, i32, SipHashBuilder> = HashMap::new();
        map.insert("a".to_string(), 5);

        assert_eq!(map[&"a".to_string()], 5);
        assert_eq!(map[&"zz".to_string()], 0);
        // The sentinel read is not an insert.
        assert_eq!(map.len(), 1);
        assert!(!map.contains_key(&"zz".to_string()));
    }

    #[test]
    fn test_index_mut_inserts_default() {
        let mut map: HashMap<String, i32, SipHashBuilder> = HashMap::new();

        map[&"hits".to_string()] += 1;
        map[&"hits".to_string()] += 1;
        assert_eq!(map.len(), 1);
        assert_eq!(map.at(&"hits".to_string()), Ok(&2));

        map[&"other".to_string()] -= 3;
        assert_eq!(map.len(), 2);
        assert_eq!(map.at(&"other".to_string()), Ok(&-3));
    }

    #[test]
    fn test_index_mut_grows_the_table() {
        let mut map: HashMap<i32, i32, SipHashBuilder> = HashMap::new();
        for i in 0..13 {
            map[&i] = i;
        }
        assert_eq!(map.len(), 13);
        assert_eq!(map.capacity(), 32);
    }

    #[test]
    fn test_iterators() {
        let mut map = HashMap::with_hasher(SipHashBuilder::default());
        map.insert(1, "one".to_string());
        map.insert(2, "two".to_string());
        map.insert(3, "three".to_string());

        let pairs: std::collections::HashMap<i32, String> =
            map.iter().map(|(k, v)| (*k, v.clone())).collect();
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs.get(&1), Some(&"one".to_string()));
        assert_eq!(pairs.get(&2), Some(&"two".to_string()));
        assert_eq!(pairs.get(&3), Some(&"three".to_string()));

        let keys: std::collections::HashSet<i32> = map.keys().copied().collect();
        assert_eq!(keys.len(), 3);

        let values: std::collections::HashSet<String> = map.values().cloned().collect();
        assert!(values.contains("one"));
        assert!(values.contains("two"));
        assert!(values.contains("three"));

        let borrowed: Vec<(&i32, &String)> = (&map).into_iter().collect();
        assert_eq!(borrowed.len(), 3);
    }

    #[test]
    fn test_iterator_completeness_after_churn() {
        let mut map = HashMap::with_hasher(SipHashBuilder::default());
        for i in 0..100 {
            map.insert(i, i);
        }
        for i in 0..60 {
            assert!(map.erase(&i));
        }
        for i in 100..130 {
            map.insert(i, i);
        }

        let mut seen = vec![false; 130];
        let mut count = 0;
        for (k, v) in map.iter() {
            assert_eq!(k, v);
            assert!(!seen[*k as usize], "duplicate {}", k);
            seen[*k as usize] = true;
            count += 1;
        }
        assert_eq!(count, map.len());
        for k in (60..100).chain(100..130) {
            assert!(seen[k as usize], "missing {}", k);
        }
    }

    #[test]
    fn test_iterator_current_and_equality() {
        let mut map = HashMap::with_hasher(SipHashBuilder::default());
        map.insert(1, "one".to_string());

        let mut iter = map.iter();
        let other = map.iter();
        assert_eq!(iter, other);
        assert_eq!(iter.current(), Ok((&1, &"one".to_string())));

        iter.next();
        assert_ne!(iter, other);
        assert_eq!(iter.current(), Err(Error::OutOfRange));
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_default_trait() {
        let map: HashMap<i32, String, SipHashBuilder> = HashMap::default();
        assert!(map.is_empty());
    }

    #[test]
    fn test_string_keys_with_collisions_survive_rehash() {
        let mut map = HashMap::with_hasher(SipHashBuilder::default());
        for i in 0..500 {
            assert!(map.insert(format!("key-{i}"), i));
        }
        assert_eq!(map.len(), 500);
        assert!(map.load_factor() <= 0.75);

        for i in 0..500 {
            assert_eq!(map.at(&format!("key-{i}")), Ok(&i));
        }
    }

    #[test]
    fn test_keyword_scoring_scenario() {
        let database = HashMap::<String, u32, SipHashBuilder>::from_keys_and_values(
            vec!["free money".to_string(), "click here".to_string()],
            vec![5, 3],
        )
        .unwrap();

        let score = |message: &str| -> u32 {
            let mut line = message.to_ascii_lowercase();
            let mut total = 0;
            for (phrase, points) in database.iter() {
                while let Some(found) = line.find(phrase.as_str()) {
                    line.replace_range(found..found + phrase.len(), ",");
                    total += points;
                }
            }
            total
        };

        let spam = score("Free money now, click here");
        assert_eq!(spam, 8);
        assert!(spam >= 8, "boundary threshold is inclusive");

        let ham = score("please click here");
        assert_eq!(ham, 3);
        assert!(ham < 4);
    }
}
