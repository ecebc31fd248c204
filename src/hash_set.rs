use core::fmt::Debug;
use core::iter::FusedIterator;

use crate::error::TryReserveError;
use crate::hash_map;
use crate::hash_map::Entry;
use crate::hash_map::IntMap;
use crate::int_key::IntKey;

/// A set of integers backed by an [`IntMap`] with unit values.
///
/// Like the map, a set built with [`IntSet::new`] allocates nothing until the
/// first non-zero element arrives, and every read on it behaves as on an
/// empty set. Zero is an ordinary element.
///
/// # Examples
///
/// ```rust
/// use intmap::IntSet;
///
/// let mut set = IntSet::new();
/// assert!(set.insert(1u32));
/// assert!(!set.insert(1));
/// assert!(set.insert(2));
/// assert!(set.contains(1) && set.contains(2));
///
/// let mut sum = 0;
/// set.for_each(|k| {
///     sum += k;
///     true
/// });
/// assert_eq!(sum, 3);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct IntSet<K: IntKey> {
    map: IntMap<K, ()>,
}

impl<K: IntKey + Debug> Debug for IntSet<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K: IntKey> IntSet<K> {
    /// Creates an empty set without allocating.
    pub const fn new() -> Self {
        Self { map: IntMap::new() }
    }

    /// Creates a set that holds at least `capacity` elements before growing.
    ///
    /// See [`IntMap::with_capacity`] for how the hint is rounded.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: IntMap::with_capacity(capacity),
        }
    }

    /// Fallible version of [`IntSet::with_capacity`].
    pub fn try_with_capacity(capacity: usize) -> Result<Self, TryReserveError> {
        Ok(Self {
            map: IntMap::try_with_capacity(capacity)?,
        })
    }

    /// Returns the number of elements in the set.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the set contains no elements.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns the number of slots in the backing array.
    pub fn capacity(&self) -> usize {
        self.map.capacity()
    }

    /// Adds `key` to the set.
    ///
    /// Returns `true` if the element was not already present.
    pub fn insert(&mut self, key: K) -> bool {
        match self.map.entry(key) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(());
                true
            }
        }
    }

    /// Returns `true` if `key` is in the set.
    pub fn contains(&self, key: K) -> bool {
        self.map.contains_key(key)
    }

    /// Removes `key` from the set, returning whether it was present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use intmap::IntSet;
    ///
    /// let mut set: IntSet<i32> = [1, 2].into_iter().collect();
    /// assert!(!set.remove(27));
    /// assert!(set.remove(2));
    /// assert!(!set.remove(2));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn remove(&mut self, key: K) -> bool {
        self.map.remove(key).is_some()
    }

    /// Calls `visit` for each element until it returns `false`.
    pub fn for_each(&self, mut visit: impl FnMut(K) -> bool) {
        self.map.for_each(|k, _| visit(k));
    }

    /// Returns an iterator over the elements: zero first, then storage order.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            inner: self.map.keys(),
        }
    }

    /// Removes every element, returning them as an iterator.
    ///
    /// The allocation is kept.
    pub fn drain(&mut self) -> Drain<'_, K> {
        Drain {
            inner: self.map.drain(),
        }
    }

    /// Removes all elements, keeping the allocated capacity.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Reserves room for at least `additional` more elements.
    pub fn reserve(&mut self, additional: usize) {
        self.map.reserve(additional);
    }

    /// Fallible version of [`IntSet::reserve`].
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.map.try_reserve(additional)
    }

    /// Shrinks the backing array to the smallest capacity that holds the
    /// current elements.
    pub fn shrink_to_fit(&mut self) {
        self.map.shrink_to_fit();
    }
}

impl<K: IntKey> Default for IntSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: IntKey> FromIterator<K> for IntSet<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<K: IntKey> Extend<K> for IntSet<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        self.map.extend(iter.into_iter().map(|k| (k, ())));
    }
}

impl<'a, K: IntKey> IntoIterator for &'a IntSet<K> {
    type Item = K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: IntKey> IntoIterator for IntSet<K> {
    type Item = K;
    type IntoIter = IntoIter<K>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.map.into_iter(),
        }
    }
}

/// An iterator over the elements of an [`IntSet`].
pub struct Iter<'a, K> {
    inner: hash_map::Keys<'a, K, ()>,
}

impl<K: IntKey> Iterator for Iter<'_, K> {
    type Item = K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K: IntKey> ExactSizeIterator for Iter<'_, K> {}

impl<K: IntKey> FusedIterator for Iter<'_, K> {}

/// A draining iterator over the elements of an [`IntSet`].
pub struct Drain<'a, K: IntKey> {
    inner: hash_map::Drain<'a, K, ()>,
}

impl<K: IntKey> Iterator for Drain<'_, K> {
    type Item = K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K: IntKey> ExactSizeIterator for Drain<'_, K> {}

impl<K: IntKey> FusedIterator for Drain<'_, K> {}

/// An owning iterator over the elements of an [`IntSet`].
pub struct IntoIter<K: IntKey> {
    inner: hash_map::IntoIter<K, ()>,
}

impl<K: IntKey> Iterator for IntoIter<K> {
    type Item = K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K: IntKey> ExactSizeIterator for IntoIter<K> {}

impl<K: IntKey> FusedIterator for IntoIter<K> {}
