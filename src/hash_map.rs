use core::fmt::Debug;
use core::iter::FusedIterator;

use crate::error::TryReserveError;
use crate::hash_table::IntTable;
use crate::hash_table::Slot;
use crate::int_key::IntKey;

/// A hash map from integer keys to values, using open addressing.
///
/// `IntMap<K, V>` keeps keys and values in two parallel arrays indexed by
/// [`IntKey::mix`] masked to the power-of-two capacity. Collisions are
/// resolved by linear probing; removals shift later entries of the cluster
/// backward instead of leaving tombstones. The key zero, which marks free
/// slots, is stored in a dedicated side slot and is a fully supported key.
///
/// A map built with [`IntMap::new`] owns no storage until the first non-zero
/// key is inserted. Such a map behaves as an empty map for every read.
///
/// The map does no internal synchronization. Mutation requires `&mut self`,
/// so a map cannot change while an iterator or [`IntMap::for_each`] borrows
/// it; sharing across threads needs external locking for writers.
///
/// # Performance Characteristics
///
/// - **Memory**: `size_of::<K>() + size_of::<V>()` per slot, no per-entry
///   allocation. At most 70% of the slots are occupied with the default
///   density.
/// - **Iteration order**: zero key first, then storage order, which changes
///   whenever the map grows.
///
/// # Examples
///
/// ```rust
/// use intmap::IntMap;
///
/// let mut map = IntMap::new();
/// for k in 1..=10u32 {
///     map.insert(k, k);
/// }
/// assert_eq!(map.len(), 10);
///
/// assert_eq!(map.remove(5), Some(5));
/// assert_eq!(map.len(), 9);
/// assert_eq!(map.get(5), None);
/// assert_eq!(map.get(6), Some(&6));
///
/// map.insert(0, 42);
/// assert_eq!(map.len(), 10);
/// assert_eq!(map.get(0), Some(&42));
/// ```
#[derive(Clone)]
pub struct IntMap<K: IntKey, V> {
    table: IntTable<K, V>,
}

impl<K, V> Debug for IntMap<K, V>
where
    K: IntKey + Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: IntKey, V: PartialEq> PartialEq for IntMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K: IntKey, V: Eq> Eq for IntMap<K, V> {}

impl<K: IntKey, V> IntMap<K, V> {
    /// Creates an empty map without allocating.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use intmap::IntMap;
    ///
    /// let map: IntMap<u64, &str> = IntMap::new();
    /// assert!(map.is_empty());
    /// assert_eq!(map.capacity(), 0);
    /// ```
    pub const fn new() -> Self {
        Self {
            table: IntTable::new(),
        }
    }

    /// Creates a map that holds at least `capacity` entries before growing.
    ///
    /// The hint is advisory. The slot count is rounded up to a power of two
    /// (at least 2). A hint that overflows or cannot be allocated falls back
    /// to the minimum size rather than failing; use
    /// [`IntMap::try_with_capacity`] to observe the failure instead.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use intmap::IntMap;
    ///
    /// let mut map: IntMap<u32, u32> = IntMap::with_capacity(100);
    /// let capacity = map.capacity();
    /// for k in 1..=100 {
    ///     map.insert(k, k);
    /// }
    /// assert_eq!(map.capacity(), capacity);
    ///
    /// let huge: IntMap<u32, u32> = IntMap::with_capacity(usize::MAX);
    /// assert_eq!(huge.capacity(), 2);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            table: IntTable::with_capacity(capacity),
        }
    }

    /// Fallible version of [`IntMap::with_capacity`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use intmap::IntMap;
    /// use intmap::TryReserveError;
    ///
    /// assert!(IntMap::<u8, ()>::try_with_capacity(16).is_ok());
    /// assert_eq!(
    ///     IntMap::<u8, ()>::try_with_capacity(usize::MAX).unwrap_err(),
    ///     TryReserveError::CapacityOverflow
    /// );
    /// ```
    pub fn try_with_capacity(capacity: usize) -> Result<Self, TryReserveError> {
        Ok(Self {
            table: IntTable::try_with_capacity(capacity)?,
        })
    }

    /// Returns the number of entries in the map, the zero key included.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the map contains no entries.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the number of slots in the backing arrays.
    ///
    /// Always zero or a power of two. The map grows (doubles) once the
    /// non-zero keys reach the load-factor threshold of this many slots.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Returns a reference to the value stored for `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use intmap::IntMap;
    ///
    /// let mut map = IntMap::new();
    /// map.insert(1i64, "a");
    /// assert_eq!(map.get(1), Some(&"a"));
    /// assert_eq!(map.get(2), None);
    /// ```
    pub fn get(&self, key: K) -> Option<&V> {
        self.table.find(key)
    }

    /// Returns a mutable reference to the value stored for `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use intmap::IntMap;
    ///
    /// let mut map = IntMap::new();
    /// map.insert(1u16, 10);
    /// if let Some(v) = map.get_mut(1) {
    ///     *v += 1;
    /// }
    /// assert_eq!(map.get(1), Some(&11));
    /// ```
    pub fn get_mut(&mut self, key: K) -> Option<&mut V> {
        self.table.find_mut(key)
    }

    /// Returns `true` if the map contains `key`.
    pub fn contains_key(&self, key: K) -> bool {
        self.table.contains(key)
    }

    /// Inserts a key-value pair into the map.
    ///
    /// Returns the previous value if `key` was present. The map may grow
    /// after a new non-zero key is stored; the new entry is always retained.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use intmap::IntMap;
    ///
    /// let mut map = IntMap::new();
    /// assert_eq!(map.insert(37u32, "a"), None);
    /// assert_eq!(map.insert(37, "b"), Some("a"));
    /// assert_eq!(map.get(37), Some(&"b"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.table.insert(key, value)
    }

    /// Inserts `value` only if `key` is absent, probing the table once.
    ///
    /// Returns the stored value together with `true` if `key` already
    /// existed (the map is unchanged), or the newly stored `value` together
    /// with `false`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use intmap::IntMap;
    ///
    /// let mut map = IntMap::new();
    /// assert_eq!(map.insert_if_absent(3u8, 30), (&mut 30, false));
    /// assert_eq!(map.insert_if_absent(3, 99), (&mut 30, true));
    /// assert_eq!(map.get(3), Some(&30));
    /// ```
    pub fn insert_if_absent(&mut self, key: K, value: V) -> (&mut V, bool) {
        match self.entry(key) {
            Entry::Occupied(entry) => (entry.into_mut(), true),
            Entry::Vacant(entry) => (entry.insert(value), false),
        }
    }

    /// Removes `key` from the map, returning its value if it was present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use intmap::IntMap;
    ///
    /// let mut map = IntMap::new();
    /// map.insert(1u32, "a");
    /// assert_eq!(map.remove(1), Some("a"));
    /// assert_eq!(map.remove(1), None);
    /// ```
    pub fn remove(&mut self, key: K) -> Option<V> {
        self.table.remove(key)
    }

    /// Removes `key` from the map, returning the stored key and value.
    pub fn remove_entry(&mut self, key: K) -> Option<(K, V)> {
        self.table.remove(key).map(|v| (key, v))
    }

    /// Gets the entry for `key` for in-place manipulation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use intmap::IntMap;
    ///
    /// let mut counts: IntMap<u64, usize> = IntMap::new();
    /// for k in [3, 1, 3, 0, 3] {
    ///     *counts.entry(k).or_insert(0) += 1;
    /// }
    /// assert_eq!(counts.get(3), Some(&3));
    /// assert_eq!(counts.get(0), Some(&1));
    /// ```
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V> {
        let (slot, occupied) = self.table.locate(key);
        if occupied {
            Entry::Occupied(OccupiedEntry {
                table: &mut self.table,
                key,
                slot,
            })
        } else {
            Entry::Vacant(VacantEntry {
                table: &mut self.table,
                key,
                slot,
            })
        }
    }

    /// Calls `visit` for each entry until it returns `false`.
    ///
    /// The zero key is visited first, then the remaining entries in storage
    /// order. Once `visit` returns `false` no further entry is visited.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use intmap::IntMap;
    ///
    /// let map: IntMap<u32, u32> = (1..=100).map(|k| (k, k)).collect();
    /// let mut seen = 0;
    /// map.for_each(|_, _| {
    ///     seen += 1;
    ///     seen < 10
    /// });
    /// assert_eq!(seen, 10);
    /// ```
    pub fn for_each(&self, mut visit: impl FnMut(K, &V) -> bool) {
        for (k, v) in self.iter() {
            if !visit(k, v) {
                break;
            }
        }
    }

    /// Returns an iterator over `(key, &value)` pairs.
    ///
    /// Each call starts a fresh traversal: the zero key first, then storage
    /// order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// Returns an iterator over `(key, &mut value)` pairs.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            inner: self.table.iter_mut(),
        }
    }

    /// Returns an iterator over the keys.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use intmap::IntMap;
    ///
    /// let map: IntMap<i32, ()> = [(-1, ()), (0, ()), (1, ())].into_iter().collect();
    /// let mut keys: Vec<i32> = map.keys().collect();
    /// keys.sort();
    /// assert_eq!(keys, [-1, 0, 1]);
    /// ```
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the values.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Returns an iterator over mutable references to the values.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.iter_mut(),
        }
    }

    /// Removes every entry, returning them as an iterator.
    ///
    /// The allocation is kept. Entries not consumed are dropped when the
    /// iterator is dropped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use intmap::IntMap;
    ///
    /// let mut map: IntMap<u32, u32> = (0..8).map(|k| (k, k * k)).collect();
    /// let total: u32 = map.drain().map(|(_, v)| v).sum();
    /// assert_eq!(total, 140);
    /// assert!(map.is_empty());
    /// ```
    pub fn drain(&mut self) -> Drain<'_, K, V> {
        Drain {
            inner: self.table.drain(),
        }
    }

    /// Removes all entries, keeping the allocated capacity.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Reserves room for at least `additional` more non-zero keys.
    ///
    /// # Panics
    ///
    /// Panics if the required capacity overflows `usize`.
    pub fn reserve(&mut self, additional: usize) {
        self.table.reserve(additional);
    }

    /// Fallible version of [`IntMap::reserve`].
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.table.try_reserve(additional)
    }

    /// Shrinks the backing arrays to the smallest capacity that holds the
    /// current entries. An empty map releases its allocation entirely.
    ///
    /// The map never shrinks on its own.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use intmap::IntMap;
    ///
    /// let mut map: IntMap<u32, ()> = (1..=1000).map(|k| (k, ())).collect();
    /// for k in 3..=1000 {
    ///     map.remove(k);
    /// }
    /// map.shrink_to_fit();
    /// assert!(map.capacity() <= 8);
    /// assert!(map.contains_key(2));
    /// ```
    pub fn shrink_to_fit(&mut self) {
        self.table.shrink_to_fit();
    }

    /// Returns how many non-zero keys sit at each distance from their home
    /// slot: index `d` counts keys stored `d` slots past it.
    ///
    /// Available with the `stats` feature.
    #[cfg(feature = "stats")]
    pub fn probe_histogram(&self) -> alloc::vec::Vec<usize> {
        self.table.probe_histogram()
    }

    /// Returns probe and occupancy statistics.
    ///
    /// Available with the `stats` feature.
    #[cfg(feature = "stats")]
    pub fn debug_stats(&self) -> crate::DebugStats {
        self.table.debug_stats()
    }

    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        self.table.assert_invariants();
    }
}

impl<K: IntKey, V> Default for IntMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: IntKey, V> FromIterator<(K, V)> for IntMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: IntKey, V> Extend<(K, V)> for IntMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        self.reserve(lower);
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K: IntKey, V> IntoIterator for &'a IntMap<K, V> {
    type Item = (K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K: IntKey, V> IntoIterator for &'a mut IntMap<K, V> {
    type Item = (K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K: IntKey, V> IntoIterator for IntMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.table.into_entries(),
        }
    }
}

/// A view into a single entry in the map, which may be vacant or occupied.
///
/// This enum is constructed from the [`entry`] method on [`IntMap`].
///
/// [`entry`]: IntMap::entry
pub enum Entry<'a, K: IntKey, V> {
    /// A vacant entry.
    Vacant(VacantEntry<'a, K, V>),
    /// An occupied entry.
    Occupied(OccupiedEntry<'a, K, V>),
}

impl<'a, K: IntKey, V> Entry<'a, K, V> {
    /// Inserts `default` if the entry is vacant and returns a mutable
    /// reference to the value.
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Inserts the result of `default` if the entry is vacant and returns a
    /// mutable reference to the value.
    pub fn or_insert_with<F>(self, default: F) -> &'a mut V
    where
        F: FnOnce() -> V,
    {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Applies `f` to the value if the entry is occupied.
    pub fn and_modify<F>(self, f: F) -> Self
    where
        F: FnOnce(&mut V),
    {
        match self {
            Entry::Occupied(mut entry) => {
                f(entry.get_mut());
                Entry::Occupied(entry)
            }
            Entry::Vacant(entry) => Entry::Vacant(entry),
        }
    }

    /// Returns the key of this entry.
    pub fn key(&self) -> K {
        match self {
            Entry::Occupied(entry) => entry.key(),
            Entry::Vacant(entry) => entry.key(),
        }
    }
}

impl<'a, K: IntKey, V: Default> Entry<'a, K, V> {
    /// Inserts `V::default()` if the entry is vacant and returns a mutable
    /// reference to the value.
    pub fn or_default(self) -> &'a mut V {
        self.or_insert_with(V::default)
    }
}

/// A vacant entry in an [`IntMap`].
pub struct VacantEntry<'a, K: IntKey, V> {
    table: &'a mut IntTable<K, V>,
    key: K,
    slot: Slot,
}

impl<'a, K: IntKey, V> VacantEntry<'a, K, V> {
    /// Returns the key that would be inserted.
    pub fn key(&self) -> K {
        self.key
    }

    /// Inserts `value` and returns a mutable reference to it.
    ///
    /// The map may grow as part of the insertion.
    pub fn insert(self, value: V) -> &'a mut V {
        let VacantEntry { table, key, slot } = self;
        let slot = table.fill_slot(slot, key, value);
        // SAFETY: `fill_slot` returns the slot now holding the entry.
        unsafe { table.slot_mut(slot) }
    }
}

/// An occupied entry in an [`IntMap`].
pub struct OccupiedEntry<'a, K: IntKey, V> {
    table: &'a mut IntTable<K, V>,
    key: K,
    slot: Slot,
}

impl<'a, K: IntKey, V> OccupiedEntry<'a, K, V> {
    /// Returns the key of this entry.
    pub fn key(&self) -> K {
        self.key
    }

    /// Returns a reference to the value.
    pub fn get(&self) -> &V {
        // SAFETY: occupied entries are only built from occupied slots, and
        // the entry borrows the table exclusively.
        unsafe { self.table.slot_ref(self.slot) }
    }

    /// Returns a mutable reference to the value.
    pub fn get_mut(&mut self) -> &mut V {
        // SAFETY: see `get`.
        unsafe { self.table.slot_mut(self.slot) }
    }

    /// Converts the entry into a mutable reference bound to the map.
    pub fn into_mut(self) -> &'a mut V {
        let OccupiedEntry { table, slot, .. } = self;
        // SAFETY: see `get`.
        unsafe { table.slot_mut(slot) }
    }

    /// Replaces the value, returning the old one.
    pub fn insert(&mut self, value: V) -> V {
        core::mem::replace(self.get_mut(), value)
    }

    /// Removes the entry from the map and returns its value.
    pub fn remove(self) -> V {
        // SAFETY: see `get`.
        unsafe { self.table.take_slot(self.slot) }
    }

    /// Removes the entry from the map and returns the key and value.
    pub fn remove_entry(self) -> (K, V) {
        let key = self.key;
        (key, self.remove())
    }
}

/// An iterator over the entries of an [`IntMap`].
pub struct Iter<'a, K, V> {
    inner: crate::hash_table::Iter<'a, K, V>,
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K: IntKey, V> Iterator for Iter<'a, K, V> {
    type Item = (K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K: IntKey, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K: IntKey, V> FusedIterator for Iter<'_, K, V> {}

/// A mutable iterator over the entries of an [`IntMap`].
pub struct IterMut<'a, K, V> {
    inner: crate::hash_table::IterMut<'a, K, V>,
}

impl<'a, K: IntKey, V> Iterator for IterMut<'a, K, V> {
    type Item = (K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K: IntKey, V> ExactSizeIterator for IterMut<'_, K, V> {}

impl<K: IntKey, V> FusedIterator for IterMut<'_, K, V> {}

/// An iterator over the keys of an [`IntMap`].
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<K: IntKey, V> Iterator for Keys<'_, K, V> {
    type Item = K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K: IntKey, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K: IntKey, V> FusedIterator for Keys<'_, K, V> {}

/// An iterator over the values of an [`IntMap`].
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K: IntKey, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K: IntKey, V> ExactSizeIterator for Values<'_, K, V> {}

impl<K: IntKey, V> FusedIterator for Values<'_, K, V> {}

/// A mutable iterator over the values of an [`IntMap`].
pub struct ValuesMut<'a, K, V> {
    inner: IterMut<'a, K, V>,
}

impl<'a, K: IntKey, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K: IntKey, V> ExactSizeIterator for ValuesMut<'_, K, V> {}

impl<K: IntKey, V> FusedIterator for ValuesMut<'_, K, V> {}

/// A draining iterator over the entries of an [`IntMap`].
pub struct Drain<'a, K: IntKey, V> {
    inner: crate::hash_table::Drain<'a, K, V>,
}

impl<K: IntKey, V> Iterator for Drain<'_, K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K: IntKey, V> ExactSizeIterator for Drain<'_, K, V> {}

impl<K: IntKey, V> FusedIterator for Drain<'_, K, V> {}

/// An owning iterator over the entries of an [`IntMap`].
pub struct IntoIter<K: IntKey, V> {
    inner: crate::hash_table::IntoIter<K, V>,
}

impl<K: IntKey, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K: IntKey, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K: IntKey, V> FusedIterator for IntoIter<K, V> {}

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::string::String;
    use alloc::string::ToString;
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn test_end_to_end() {
        let mut map = IntMap::new();
        for k in 1..=10i64 {
            map.insert(k, k);
        }
        assert_eq!(map.len(), 10);

        assert_eq!(map.remove(5), Some(5));
        assert_eq!(map.len(), 9);
        assert_eq!(map.get(5), None);
        assert_eq!(map.get(6), Some(&6));

        map.insert(0, 42);
        assert_eq!(map.len(), 10);
        assert_eq!(map.get(0), Some(&42));
        map.assert_invariants();
    }

    #[test]
    fn test_new_map_reads_as_empty() {
        let map: IntMap<i32, i32> = IntMap::new();
        assert_eq!(map.len(), 0);
        assert!(map.is_empty());
        assert!(!map.contains_key(0));
        assert!(!map.contains_key(1));
        assert_eq!(map.get(0), None);
        assert_eq!(map.get(1), None);

        let mut calls = 0;
        map.for_each(|_, _| {
            calls += 1;
            true
        });
        assert_eq!(calls, 0);
        assert_eq!(map.iter().count(), 0);
        assert_eq!(map.keys().count(), 0);
        assert_eq!(map.values().count(), 0);

        let map: IntMap<i32, i32> = IntMap::default();
        assert_eq!(map.capacity(), 0);
    }

    #[test]
    fn test_pairs_with_and_without_capacity() {
        type Pairs = &'static [(i64, i64)];
        let cases: &[(&str, Pairs)] = &[
            ("empty", &[]),
            ("one", &[(1, 2)]),
            ("one_zero", &[(0, 2)]),
            ("two", &[(1, 2), (3, 4)]),
            ("two_zero", &[(1, 2), (0, 4)]),
            (
                "ten",
                &[(1, 1), (2, 2), (3, 3), (4, 4), (5, 5), (6, 6), (7, 7), (8, 8), (9, 9), (10, 10)],
            ),
            (
                "ten_zero",
                &[
                    (1, 1),
                    (2, 2),
                    (3, 3),
                    (4, 4),
                    (5, 5),
                    (6, 6),
                    (7, 7),
                    (8, 8),
                    (9, 9),
                    (10, 10),
                    (0, 11),
                ],
            ),
        ];

        for (name, pairs) in cases {
            for mut map in [IntMap::with_capacity(0), IntMap::with_capacity(pairs.len())] {
                for (i, &(k, v)) in pairs.iter().enumerate() {
                    map.insert(k, v);
                    assert_eq!(map.len(), i + 1, "{name}");
                }
                for &(k, v) in pairs.iter() {
                    assert_eq!(map.get(k), Some(&v), "{name}: key {k}");
                }
                map.assert_invariants();
            }
        }
    }

    #[test]
    fn test_insert_and_get() {
        let mut map = IntMap::new();

        assert_eq!(map.insert(1u32, "hello".to_string()), None);
        assert_eq!(map.len(), 1);
        assert!(!map.is_empty());

        assert_eq!(map.get(1), Some(&"hello".to_string()));
        assert_eq!(map.get(2), None);

        assert_eq!(
            map.insert(1, "world".to_string()),
            Some("hello".to_string())
        );
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(1), Some(&"world".to_string()));
    }

    #[test]
    fn test_zero_key_is_a_regular_key() {
        let mut map: IntMap<u64, u64> = IntMap::new();
        map.insert(0, 7);
        assert_eq!(map.get(0), Some(&7));
        assert_eq!(map.get(1), None);
        assert!(map.contains_key(0));

        for k in 1..100 {
            map.insert(k, k);
        }
        assert_eq!(map.get(0), Some(&7));
        assert_eq!(map.len(), 100);

        assert_eq!(map.remove(0), Some(7));
        assert_eq!(map.get(0), None);
        assert_eq!(map.remove(0), None);
        assert_eq!(map.len(), 99);
        map.assert_invariants();
    }

    #[test]
    fn test_get_mut() {
        let mut map = IntMap::new();
        map.insert(1u8, "hello".to_string());

        if let Some(value) = map.get_mut(1) {
            value.push_str(" world");
        }

        assert_eq!(map.get(1), Some(&"hello world".to_string()));
        assert_eq!(map.get_mut(2), None);
    }

    #[test]
    fn test_remove() {
        let mut map: IntMap<i32, i32> = IntMap::with_capacity(10);
        for i in 0..100 {
            map.insert(i, -i);
        }
        assert_eq!(map.len(), 100);

        for i in 0..100 {
            assert_eq!(map.remove(i), Some(-i), "deleted key should have been there: {i}");
            assert_eq!(map.len(), (100 - i - 1) as usize);
            assert_eq!(map.remove(i), None, "deleted key should not be there: {i}");
        }
        assert!(map.is_empty());
    }

    #[test]
    fn test_remove_entry() {
        let mut map = IntMap::new();
        map.insert(-4i16, 'x');
        assert_eq!(map.remove_entry(-4), Some((-4, 'x')));
        assert_eq!(map.remove_entry(-4), None);
    }

    #[test]
    fn test_contains_key() {
        let mut map: IntMap<i32, i32> = IntMap::with_capacity(10);
        for i in 0..100 {
            map.insert(i, -i);
        }

        for i in 0..100 {
            assert!(map.contains_key(i), "key should have been there: {i}");
            assert!(!map.contains_key(i + 100), "key should not be there: {}", i + 100);
        }
    }

    #[test]
    fn test_insert_if_absent() {
        let mut map: IntMap<i32, i32> = IntMap::with_capacity(10);
        for i in 0..100 {
            map.insert(i, -i);
        }

        for i in 0..100 {
            let (value, existed) = map.insert_if_absent(i, i + 100);
            assert!(existed, "key should have been there: {i}");
            assert_eq!(*value, -i);
        }
        assert_eq!(map.len(), 100);

        for i in 100..200 {
            let (value, existed) = map.insert_if_absent(i, i + 100);
            assert!(!existed);
            assert_eq!(*value, i + 100);
        }
        assert_eq!(map.len(), 200);
        for i in 100..200 {
            assert_eq!(map.get(i), Some(&(i + 100)));
        }
        map.assert_invariants();
    }

    #[test]
    fn test_insert_if_absent_zero_key() {
        let mut map: IntMap<u32, &str> = IntMap::new();
        assert_eq!(map.insert_if_absent(0, "first"), (&mut "first", false));
        assert_eq!(map.insert_if_absent(0, "second"), (&mut "first", true));
        assert_eq!(map.len(), 1);
        assert_eq!(map.capacity(), 0);
    }

    #[test]
    fn test_for_each_stops_early() {
        let mut map: IntMap<i32, i32> = IntMap::with_capacity(10);
        for i in 0..100 {
            map.insert(i, -i);
        }

        let mut count = 0;
        map.for_each(|_, _| {
            count += 1;
            count < 50
        });
        assert_eq!(count, 50);

        let mut count = 0;
        map.for_each(|_, _| {
            count += 1;
            false
        });
        assert_eq!(count, 1);

        let mut count = 0;
        map.for_each(|_, _| {
            count += 1;
            true
        });
        assert_eq!(count, 100);
    }

    #[test]
    fn test_for_each_visits_zero_first() {
        let mut map: IntMap<u64, u64> = (1..20).map(|k| (k, k)).collect();
        map.insert(0, 0);

        let mut first = None;
        map.for_each(|k, _| {
            first = Some(k);
            false
        });
        assert_eq!(first, Some(0));
    }

    #[test]
    fn test_growth_is_transparent() {
        let mut map: IntMap<u64, u64> = IntMap::with_capacity(2);
        let initial = map.capacity();
        for k in 1..=10_000u64 {
            map.insert(k * 7919, k);
            assert_eq!(map.len(), k as usize);
        }
        assert!(map.capacity() > initial);
        for k in 1..=10_000u64 {
            assert_eq!(map.get(k * 7919), Some(&k));
        }
        map.assert_invariants();
    }

    #[test]
    fn test_clear() {
        let mut map: IntMap<u32, u32> = (0..50).map(|k| (k, k)).collect();
        let capacity = map.capacity();

        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.capacity(), capacity);
        assert!(!map.contains_key(0));
        assert!(!map.contains_key(1));

        map.insert(1, 1);
        assert_eq!(map.get(1), Some(&1));
        map.assert_invariants();
    }

    #[test]
    fn test_reserve() {
        let mut map: IntMap<u64, u64> = IntMap::new();
        map.reserve(500);
        let capacity = map.capacity();
        for k in 1..=500 {
            map.insert(k, k);
        }
        assert_eq!(map.capacity(), capacity);
        assert_eq!(
            map.try_reserve(usize::MAX),
            Err(TryReserveError::CapacityOverflow)
        );
    }

    #[test]
    fn test_shrink_to_fit() {
        let mut map: IntMap<u64, u64> = (0..1000).map(|k| (k, k)).collect();
        for k in 4..1000 {
            map.remove(k);
        }
        map.shrink_to_fit();
        assert!(map.capacity() <= 8);
        for k in 0..4 {
            assert_eq!(map.get(k), Some(&k));
        }

        map.clear();
        map.shrink_to_fit();
        assert_eq!(map.capacity(), 0);
    }

    #[test]
    fn test_entry_api() {
        let mut map: IntMap<u32, i32> = IntMap::new();

        *map.entry(1).or_insert(10) += 1;
        assert_eq!(map.get(1), Some(&11));

        *map.entry(1).or_insert(100) += 1;
        assert_eq!(map.get(1), Some(&12));

        map.entry(2).and_modify(|v| *v += 1).or_insert(5);
        assert_eq!(map.get(2), Some(&5));
        map.entry(2).and_modify(|v| *v += 1).or_insert(5);
        assert_eq!(map.get(2), Some(&6));

        assert_eq!(map.entry(3).key(), 3);
        let value = map.entry(3).or_insert_with(|| 30);
        assert_eq!(*value, 30);
    }

    #[test]
    fn test_entry_or_default() {
        let mut map: IntMap<i64, Vec<i64>> = IntMap::new();
        map.entry(-1).or_default().push(1);
        map.entry(-1).or_default().push(2);
        map.entry(0).or_default().push(3);
        assert_eq!(map.get(-1), Some(&alloc::vec![1, 2]));
        assert_eq!(map.get(0), Some(&alloc::vec![3]));
    }

    #[test]
    fn test_occupied_entry() {
        let mut map: IntMap<u64, String> = IntMap::new();
        map.insert(5, "five".to_string());
        map.insert(0, "zero".to_string());

        for key in [5, 0] {
            match map.entry(key) {
                Entry::Occupied(mut entry) => {
                    assert_eq!(entry.key(), key);
                    let old = entry.get().clone();
                    assert_eq!(entry.insert("new".to_string()), old);
                    entry.get_mut().push('!');
                    assert_eq!(entry.get(), "new!");
                }
                Entry::Vacant(_) => panic!("key {key} should be present"),
            }
        }

        match map.entry(5) {
            Entry::Occupied(entry) => assert_eq!(entry.remove_entry(), (5, "new!".to_string())),
            Entry::Vacant(_) => panic!("key should be present"),
        }
        match map.entry(0) {
            Entry::Occupied(entry) => assert_eq!(entry.remove(), "new!"),
            Entry::Vacant(_) => panic!("key should be present"),
        }
        assert!(map.is_empty());
    }

    #[test]
    fn test_vacant_entry_through_growth() {
        let mut map: IntMap<u32, u32> = IntMap::new();
        for k in 1..=300u32 {
            match map.entry(k) {
                Entry::Vacant(entry) => {
                    assert_eq!(entry.key(), k);
                    let value = entry.insert(k * 3);
                    assert_eq!(*value, k * 3);
                    *value += 1;
                }
                Entry::Occupied(_) => panic!("key {k} should be vacant"),
            }
        }
        for k in 1..=300u32 {
            assert_eq!(map.get(k), Some(&(k * 3 + 1)));
        }
        map.assert_invariants();
    }

    #[test]
    fn test_occupied_entry_remove_repairs_cluster() {
        let mut map: IntMap<u64, u64> = (1..=500).map(|k| (k, k)).collect();
        for k in (1..=500).step_by(3) {
            match map.entry(k) {
                Entry::Occupied(entry) => assert_eq!(entry.remove(), k),
                Entry::Vacant(_) => panic!("key {k} should be present"),
            }
        }
        map.assert_invariants();
        for k in 1..=500u64 {
            assert_eq!(map.contains_key(k), (k - 1) % 3 != 0);
        }
    }

    #[test]
    fn test_iterators() {
        let mut map: IntMap<u32, u32> = IntMap::new();
        for k in 0..10 {
            map.insert(k, k * 10);
        }

        let mut pairs: Vec<(u32, u32)> = map.iter().map(|(k, v)| (k, *v)).collect();
        pairs.sort_unstable();
        assert_eq!(pairs, (0..10).map(|k| (k, k * 10)).collect::<Vec<_>>());

        let mut keys: Vec<u32> = map.keys().collect();
        keys.sort_unstable();
        assert_eq!(keys, (0..10).collect::<Vec<_>>());

        let mut values: Vec<u32> = map.values().copied().collect();
        values.sort_unstable();
        assert_eq!(values, (0..10).map(|k| k * 10).collect::<Vec<_>>());

        assert_eq!(map.iter().len(), 10);
        assert_eq!(map.keys().len(), 10);

        // Each accessor call starts over.
        let first: Vec<u32> = map.keys().collect();
        let second: Vec<u32> = map.keys().collect();
        assert_eq!(first, second);

        for v in map.values_mut() {
            *v += 1;
        }
        for (k, v) in &mut map {
            *v += k;
        }
        for (k, v) in &map {
            assert_eq!(*v, k * 11 + 1);
        }
    }

    #[test]
    fn test_drain() {
        let mut map: IntMap<i32, String> = IntMap::new();
        for i in -5..5 {
            map.insert(i, i.to_string());
        }
        let capacity = map.capacity();

        let mut drained: Vec<(i32, String)> = map.drain().collect();
        drained.sort_unstable();
        assert_eq!(drained.len(), 10);
        assert_eq!(drained[0], (-5, "-5".to_string()));
        assert!(map.is_empty());
        assert_eq!(map.capacity(), capacity);

        map.insert(1, "one".to_string());
        assert_eq!(map.get(1), Some(&"one".to_string()));
    }

    #[test]
    fn test_into_iter() {
        let map: IntMap<u8, String> = (0..=255u8).map(|k| (k, k.to_string())).collect();
        let mut owned: Vec<(u8, String)> = map.into_iter().collect();
        owned.sort_unstable();
        assert_eq!(owned.len(), 256);
        assert_eq!(owned[0], (0, "0".to_string()));
        assert_eq!(owned[255], (255, "255".to_string()));

        let map: IntMap<u8, String> = (0..10u8).map(|k| (k, k.to_string())).collect();
        let mut iter = map.into_iter();
        assert_eq!(iter.len(), 10);
        iter.next();
        drop(iter);
    }

    #[test]
    fn test_debug_format() {
        let mut map: IntMap<u32, &str> = IntMap::new();
        assert_eq!(format!("{map:?}"), "{}");
        map.insert(0, "zero");
        assert_eq!(format!("{map:?}"), "{0: \"zero\"}");
        map.insert(7, "seven");
        assert_eq!(format!("{map:?}"), "{0: \"zero\", 7: \"seven\"}");
    }

    #[test]
    fn test_equality_ignores_layout() {
        let a: IntMap<u64, u64> = (0..100).map(|k| (k, k)).collect();
        let mut b: IntMap<u64, u64> = IntMap::with_capacity(1000);
        for k in (0..100).rev() {
            b.insert(k, k);
        }
        assert_ne!(a.capacity(), b.capacity());
        assert_eq!(a, b);

        b.insert(3, 4);
        assert_ne!(a, b);
        b.insert(3, 3);
        b.remove(0);
        assert_ne!(a, b);
    }

    #[test]
    fn test_clone() {
        let mut map: IntMap<i64, String> = (-50..50).map(|k| (k, k.to_string())).collect();
        let cloned = map.clone();
        map.insert(1000, "x".to_string());
        map.remove(0);

        assert_eq!(cloned.len(), 100);
        assert_eq!(cloned.get(0), Some(&"0".to_string()));
        assert_eq!(cloned.get(1000), None);
        cloned.assert_invariants();
    }

    #[test]
    fn test_extend() {
        let mut map: IntMap<u32, u32> = IntMap::new();
        map.extend((0..100).map(|k| (k, k)));
        map.extend([(5, 50), (200, 200)]);
        assert_eq!(map.len(), 101);
        assert_eq!(map.get(5), Some(&50));
    }

    #[test]
    fn test_all_key_widths() {
        fn exercise<K: IntKey + core::fmt::Debug>(keys: &[K]) {
            let mut map = IntMap::new();
            for (i, &k) in keys.iter().enumerate() {
                map.insert(k, i);
            }
            assert_eq!(map.len(), keys.len());
            for (i, &k) in keys.iter().enumerate() {
                assert_eq!(map.get(k), Some(&i), "{k:?}");
            }
            for &k in keys {
                assert!(map.remove(k).is_some());
            }
            assert!(map.is_empty());
        }

        exercise(&[0u8, 1, 2, 127, 128, 255]);
        exercise(&[0i8, -1, 1, i8::MIN, i8::MAX]);
        exercise(&[0u16, 1, 256, u16::MAX]);
        exercise(&[0i16, -256, i16::MIN, i16::MAX]);
        exercise(&[0u32, 1 << 16, 1 << 31, u32::MAX]);
        exercise(&[0i32, -1, i32::MIN, i32::MAX]);
        exercise(&[0u64, 1 << 32, 1 << 63, u64::MAX]);
        exercise(&[0i64, -1, i64::MIN, i64::MAX]);
        exercise(&[0u128, 1 << 64, 1 << 127, u128::MAX]);
        exercise(&[0i128, -1, i128::MIN, i128::MAX]);
        exercise(&[0usize, 1, usize::MAX]);
        exercise(&[0isize, -1, isize::MIN, isize::MAX]);
    }

    #[test]
    fn test_full_u8_key_space() {
        let mut map: IntMap<u8, u16> = IntMap::new();
        for k in 0..=255u8 {
            map.insert(k, u16::from(k) * 2);
        }
        assert_eq!(map.len(), 256);
        for k in 0..=255u8 {
            assert_eq!(map.get(k), Some(&(u16::from(k) * 2)));
        }
        for k in (0..=255u8).step_by(2) {
            map.remove(k);
        }
        map.assert_invariants();
        assert_eq!(map.len(), 128);
    }

    #[test]
    fn test_power_of_two_biased_keys() {
        let mut map: IntMap<u64, u32> = IntMap::new();
        for shift in 0..64u32 {
            map.insert(1u64 << shift, shift);
        }
        for k in (1..=1000u64).map(|k| k << 12) {
            map.insert(k, 0);
        }
        map.assert_invariants();
        for shift in 0..64u32 {
            assert!(map.contains_key(1u64 << shift));
        }
    }
}
