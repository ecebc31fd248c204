use alloc::alloc::handle_alloc_error;
use alloc::vec::Vec;
use core::alloc::Layout;
use core::fmt::Debug;
use core::iter::FusedIterator;
use core::iter::Zip;
use core::mem::MaybeUninit;
use core::slice;

use crate::error::TryReserveError;
use crate::int_key::IntKey;

cfg_if::cfg_if! {
    if #[cfg(feature = "density-fifty")] {
        const LOAD_NUMERATOR: usize = 1;
        const LOAD_DENOMINATOR: usize = 2;
    } else if #[cfg(feature = "density-seventy")] {
        const LOAD_NUMERATOR: usize = 7;
        const LOAD_DENOMINATOR: usize = 10;
    } else if #[cfg(feature = "density-eighty-seven-point-five")] {
        const LOAD_NUMERATOR: usize = 7;
        const LOAD_DENOMINATOR: usize = 8;
    } else {
        const LOAD_NUMERATOR: usize = 7;
        const LOAD_DENOMINATOR: usize = 10;
    }
}

/// Smallest slot count of an allocated table.
const MIN_SLOTS: usize = 2;

/// Number of non-zero keys at which a table with `slots` slots grows.
///
/// Always strictly less than `slots` for `slots >= MIN_SLOTS`, so at least
/// one free slot remains and every probe terminates.
#[inline(always)]
fn grow_threshold(slots: usize) -> usize {
    ((slots as u128 * LOAD_NUMERATOR as u128) / LOAD_DENOMINATOR as u128) as usize
}

/// Slot count needed to hold `len` non-zero keys without growing.
fn slots_for(len: usize) -> Option<usize> {
    let required = (len as u128 + 1) * LOAD_DENOMINATOR as u128;
    let required = usize::try_from(required.div_ceil(LOAD_NUMERATOR as u128)).ok()?;
    required
        .checked_next_power_of_two()
        .map(|slots| slots.max(MIN_SLOTS))
}

type Storage<K, V> = (Vec<K>, Vec<MaybeUninit<V>>);

fn allocate<K: IntKey, V>(slots: usize) -> Result<Storage<K, V>, TryReserveError> {
    let keys_layout = Layout::array::<K>(slots).map_err(|_| TryReserveError::CapacityOverflow)?;
    let values_layout =
        Layout::array::<V>(slots).map_err(|_| TryReserveError::CapacityOverflow)?;

    let mut keys = Vec::new();
    keys.try_reserve_exact(slots)
        .map_err(|_| TryReserveError::AllocError {
            layout: keys_layout,
        })?;
    keys.resize(slots, K::ZERO);

    let mut values = Vec::new();
    values
        .try_reserve_exact(slots)
        .map_err(|_| TryReserveError::AllocError {
            layout: values_layout,
        })?;
    values.resize_with(slots, MaybeUninit::uninit);

    Ok((keys, values))
}

fn infallible<T>(result: Result<T, TryReserveError>) -> T {
    match result {
        Ok(value) => value,
        Err(TryReserveError::CapacityOverflow) => panic!("capacity overflow"),
        Err(TryReserveError::AllocError { layout }) => handle_alloc_error(layout),
    }
}

/// Outcome of a linear probe for a non-zero key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Probe {
    Occupied(usize),
    Vacant(usize),
}

/// Location of an entry: the zero-key side channel or an array slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Slot {
    Zero,
    Index(usize),
}

/// Probe-length statistics for a table.
///
/// Available with the `stats` feature.
#[cfg(any(test, feature = "stats"))]
#[derive(Debug, Clone, PartialEq)]
pub struct DebugStats {
    /// Number of entries, including the zero key.
    pub len: usize,
    /// Number of slots in the backing arrays.
    pub capacity: usize,
    /// Number of array slots holding a non-zero key.
    pub occupied_slots: usize,
    /// `occupied_slots / capacity`, or zero for an unallocated table.
    pub load_factor: f64,
    /// Largest distance of any key from its home slot.
    pub max_probe: usize,
    /// Mean distance of keys from their home slot.
    pub mean_probe: f64,
}

#[cfg(any(test, feature = "stats"))]
impl DebugStats {
    /// Pretty-print the statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        std::println!("=== Int Map Debug Statistics ===");
        std::println!("Entries: {}", self.len);
        std::println!(
            "Slot Usage: {}/{} ({:.2}% load factor)",
            self.occupied_slots,
            self.capacity,
            self.load_factor * 100.0
        );
        std::println!(
            "Probe distance: max {}, mean {:.3}",
            self.max_probe,
            self.mean_probe
        );
    }
}

/// Open-addressing storage for integer keys.
///
/// Keys and values live in two parallel arrays of power-of-two length. A slot
/// is occupied iff its key is non-zero; the zero key is stored out of band in
/// `zero`. Collisions are resolved by linear probing and deletions repair the
/// cluster by shifting later entries backward, so no tombstones exist.
///
/// An unallocated table (no slots) is a valid empty table for every read.
pub(crate) struct IntTable<K: IntKey, V> {
    keys: Vec<K>,
    values: Vec<MaybeUninit<V>>,
    zero: Option<V>,

    populated: usize,
    grow_at: usize,
}

impl<K: IntKey, V> Debug for IntTable<K, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("IntTable")
            .field("populated", &self.populated)
            .field("capacity", &self.keys.len())
            .field("grow_at", &self.grow_at)
            .field("has_zero_key", &self.zero.is_some())
            .finish()
    }
}

impl<K: IntKey, V: Clone> Clone for IntTable<K, V> {
    fn clone(&self) -> Self {
        let mut table = Self::new();
        if !self.keys.is_empty() {
            infallible(table.resize(self.keys.len()));
        }

        // Same capacity, same positions: probe chains carry over unchanged.
        for (index, key) in self.keys.iter().enumerate() {
            if key.is_zero() {
                continue;
            }

            // SAFETY: a non-zero key marks an initialized value.
            let value = unsafe { self.values[index].assume_init_ref() }.clone();
            table.values[index] = MaybeUninit::new(value);
            table.keys[index] = *key;
            table.populated += 1;
        }
        table.zero = self.zero.clone();

        debug_assert_eq!(table.populated, self.populated);
        table
    }
}

impl<K: IntKey, V> Drop for IntTable<K, V> {
    fn drop(&mut self) {
        if core::mem::needs_drop::<V>() && self.populated > 0 {
            for (key, value) in self.keys.iter().zip(self.values.iter_mut()) {
                if !key.is_zero() {
                    // SAFETY: a non-zero key marks an initialized value, and
                    // each value is dropped exactly once here.
                    unsafe { value.assume_init_drop() };
                }
            }
        }
    }
}

impl<K: IntKey, V> IntTable<K, V> {
    pub(crate) const fn new() -> Self {
        Self {
            keys: Vec::new(),
            values: Vec::new(),
            zero: None,
            populated: 0,
            grow_at: 0,
        }
    }

    /// Creates a table able to hold `capacity` non-zero keys without growing.
    ///
    /// The hint is advisory: if the requested size overflows or cannot be
    /// allocated, the table starts at the minimum size instead.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self::try_with_capacity(capacity).unwrap_or_else(|_| {
            let mut table = Self::new();
            infallible(table.resize(MIN_SLOTS));
            table
        })
    }

    pub(crate) fn try_with_capacity(capacity: usize) -> Result<Self, TryReserveError> {
        let slots = slots_for(capacity).ok_or(TryReserveError::CapacityOverflow)?;
        let mut table = Self::new();
        table.resize(slots)?;
        Ok(table)
    }

    #[inline(always)]
    fn mask(&self) -> usize {
        self.keys.len().wrapping_sub(1)
    }

    pub(crate) fn len(&self) -> usize {
        self.populated + usize::from(self.zero.is_some())
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn capacity(&self) -> usize {
        self.keys.len()
    }

    /// Walks the cluster starting at `key`'s home slot.
    ///
    /// Requires an allocated table and a non-zero key.
    #[inline]
    fn probe(&self, key: K) -> Probe {
        debug_assert!(!key.is_zero());
        debug_assert!(!self.keys.is_empty());

        let mask = self.mask();
        let mut index = key.mix() & mask;
        loop {
            let slot = self.keys[index];
            if slot == key {
                return Probe::Occupied(index);
            }
            if slot.is_zero() {
                return Probe::Vacant(index);
            }
            index = (index + 1) & mask;
        }
    }

    pub(crate) fn find(&self, key: K) -> Option<&V> {
        if key.is_zero() {
            return self.zero.as_ref();
        }
        if self.keys.is_empty() {
            return None;
        }

        match self.probe(key) {
            // SAFETY: the probe only reports slots holding `key`, which is
            // non-zero, so the value is initialized.
            Probe::Occupied(index) => Some(unsafe { self.values[index].assume_init_ref() }),
            Probe::Vacant(_) => None,
        }
    }

    pub(crate) fn find_mut(&mut self, key: K) -> Option<&mut V> {
        if key.is_zero() {
            return self.zero.as_mut();
        }
        if self.keys.is_empty() {
            return None;
        }

        match self.probe(key) {
            // SAFETY: see `find`.
            Probe::Occupied(index) => Some(unsafe { self.values[index].assume_init_mut() }),
            Probe::Vacant(_) => None,
        }
    }

    pub(crate) fn contains(&self, key: K) -> bool {
        if key.is_zero() {
            return self.zero.is_some();
        }

        !self.keys.is_empty() && matches!(self.probe(key), Probe::Occupied(_))
    }

    pub(crate) fn insert(&mut self, key: K, value: V) -> Option<V> {
        if key.is_zero() {
            return self.zero.replace(value);
        }
        self.ensure_allocated();

        match self.probe(key) {
            Probe::Occupied(index) => {
                // SAFETY: occupied slot, see `find`.
                let slot = unsafe { self.values[index].assume_init_mut() };
                Some(core::mem::replace(slot, value))
            }
            Probe::Vacant(index) => {
                self.fill_vacant(index, key, value);
                None
            }
        }
    }

    pub(crate) fn remove(&mut self, key: K) -> Option<V> {
        if key.is_zero() {
            return self.zero.take();
        }
        if self.keys.is_empty() {
            return None;
        }

        match self.probe(key) {
            Probe::Occupied(index) => Some(self.remove_at(index)),
            Probe::Vacant(_) => None,
        }
    }

    /// Resolves `key` to a slot with a single probe, allocating the arrays
    /// if a non-zero key needs them. Returns whether the slot is occupied.
    pub(crate) fn locate(&mut self, key: K) -> (Slot, bool) {
        if key.is_zero() {
            return (Slot::Zero, self.zero.is_some());
        }
        self.ensure_allocated();

        match self.probe(key) {
            Probe::Occupied(index) => (Slot::Index(index), true),
            Probe::Vacant(index) => (Slot::Index(index), false),
        }
    }

    /// # Safety
    ///
    /// `slot` must come from [`IntTable::locate`] (or [`IntTable::fill_slot`])
    /// on this table with no mutation in between, and must be occupied.
    pub(crate) unsafe fn slot_ref(&self, slot: Slot) -> &V {
        // SAFETY: the caller guarantees the slot is occupied.
        unsafe {
            match slot {
                Slot::Zero => self.zero.as_ref().unwrap_unchecked(),
                Slot::Index(index) => self.values.get_unchecked(index).assume_init_ref(),
            }
        }
    }

    /// # Safety
    ///
    /// Same contract as [`IntTable::slot_ref`].
    pub(crate) unsafe fn slot_mut(&mut self, slot: Slot) -> &mut V {
        // SAFETY: the caller guarantees the slot is occupied.
        unsafe {
            match slot {
                Slot::Zero => self.zero.as_mut().unwrap_unchecked(),
                Slot::Index(index) => self.values.get_unchecked_mut(index).assume_init_mut(),
            }
        }
    }

    /// Removes the entry at an occupied slot.
    ///
    /// # Safety
    ///
    /// Same contract as [`IntTable::slot_ref`].
    pub(crate) unsafe fn take_slot(&mut self, slot: Slot) -> V {
        match slot {
            // SAFETY: the caller guarantees the zero key is present.
            Slot::Zero => unsafe { self.zero.take().unwrap_unchecked() },
            Slot::Index(index) => self.remove_at(index),
        }
    }

    /// Stores `key` and `value` in a vacant slot reported by
    /// [`IntTable::locate`] and returns where the entry ended up, which
    /// differs from `slot` when the insertion triggered growth.
    pub(crate) fn fill_slot(&mut self, slot: Slot, key: K, value: V) -> Slot {
        match slot {
            Slot::Zero => {
                debug_assert!(self.zero.is_none());
                self.zero = Some(value);
                Slot::Zero
            }
            Slot::Index(index) => Slot::Index(self.fill_vacant(index, key, value)),
        }
    }

    fn fill_vacant(&mut self, index: usize, key: K, value: V) -> usize {
        debug_assert!(self.keys[index].is_zero());

        self.keys[index] = key;
        self.values[index] = MaybeUninit::new(value);
        self.populated += 1;

        if self.populated < self.grow_at {
            return index;
        }

        self.grow();
        match self.probe(key) {
            Probe::Occupied(index) => index,
            Probe::Vacant(_) => unreachable!("rehashed key must stay reachable"),
        }
    }

    fn remove_at(&mut self, index: usize) -> V {
        debug_assert!(!self.keys[index].is_zero());

        let value = core::mem::replace(&mut self.values[index], MaybeUninit::uninit());
        self.keys[index] = K::ZERO;
        self.populated -= 1;
        self.backward_shift(index);

        // SAFETY: the slot held a non-zero key, so its value was initialized,
        // and the slot has been marked free so it is never read again.
        unsafe { value.assume_init() }
    }

    /// Closes the hole left at `hole` by a removal.
    ///
    /// Scans the rest of the cluster and moves each entry whose probe path
    /// passes through the hole into it; the vacated slot becomes the new
    /// hole. The scan ends at the first free slot, so every remaining key
    /// stays reachable from its home slot without crossing a free slot.
    fn backward_shift(&mut self, mut hole: usize) {
        let mask = self.mask();
        let mut index = hole;
        loop {
            index = (index + 1) & mask;
            let key = self.keys[index];
            if key.is_zero() {
                return;
            }

            // The hole lies on this entry's probe path iff it is cyclically
            // within [home, index).
            let home = key.mix() & mask;
            if index.wrapping_sub(home) & mask >= index.wrapping_sub(hole) & mask {
                self.keys[hole] = key;
                self.keys[index] = K::ZERO;
                self.values[hole] =
                    core::mem::replace(&mut self.values[index], MaybeUninit::uninit());
                hole = index;
            }
        }
    }

    fn ensure_allocated(&mut self) {
        if self.keys.is_empty() {
            infallible(self.resize(slots_for(1).unwrap_or(MIN_SLOTS)));
        }
    }

    #[cold]
    #[inline(never)]
    fn grow(&mut self) {
        let slots = self
            .keys
            .len()
            .checked_mul(2)
            .ok_or(TryReserveError::CapacityOverflow);
        infallible(slots.and_then(|slots| self.resize(slots)));
    }

    /// Moves every non-zero entry into fresh arrays of `slots` slots.
    ///
    /// `slots` must be a power of two greater than the populated count. The
    /// zero key is untouched.
    fn resize(&mut self, slots: usize) -> Result<(), TryReserveError> {
        debug_assert!(slots.is_power_of_two());
        debug_assert!(slots > self.populated);

        let (keys, values) = allocate::<K, V>(slots)?;
        let old_keys = core::mem::replace(&mut self.keys, keys);
        let mut old_values = core::mem::replace(&mut self.values, values);
        self.grow_at = grow_threshold(slots);

        let mask = self.mask();
        for (key, value) in old_keys.into_iter().zip(old_values.iter_mut()) {
            if key.is_zero() {
                continue;
            }

            let mut index = key.mix() & mask;
            while !self.keys[index].is_zero() {
                index = (index + 1) & mask;
            }
            self.keys[index] = key;
            self.values[index] = core::mem::replace(value, MaybeUninit::uninit());
        }

        Ok(())
    }

    pub(crate) fn clear(&mut self) {
        self.zero = None;
        if self.populated == 0 {
            return;
        }

        for (key, value) in self.keys.iter_mut().zip(self.values.iter_mut()) {
            if key.is_zero() {
                continue;
            }

            *key = K::ZERO;
            self.populated -= 1;
            // SAFETY: the key was non-zero, so the value is initialized; the
            // slot is already marked free.
            unsafe { value.assume_init_drop() };
        }
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        infallible(self.try_reserve(additional));
    }

    pub(crate) fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        let required = self
            .populated
            .checked_add(additional)
            .ok_or(TryReserveError::CapacityOverflow)?;
        if additional == 0 || required < self.grow_at {
            return Ok(());
        }

        let slots = slots_for(required).ok_or(TryReserveError::CapacityOverflow)?;
        if slots > self.keys.len() {
            self.resize(slots)?;
        }
        Ok(())
    }

    pub(crate) fn shrink_to_fit(&mut self) {
        if self.populated == 0 {
            self.keys = Vec::new();
            self.values = Vec::new();
            self.grow_at = 0;
            return;
        }

        if let Some(slots) = slots_for(self.populated)
            && slots < self.keys.len()
        {
            infallible(self.resize(slots));
        }
    }

    pub(crate) fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            zero: self.zero.as_ref(),
            slots: self.keys.iter().zip(self.values.iter()),
            remaining: self.len(),
        }
    }

    pub(crate) fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        let remaining = self.len();
        IterMut {
            zero: self.zero.as_mut(),
            slots: self.keys.iter().zip(self.values.iter_mut()),
            remaining,
        }
    }

    /// Moves every entry out, leaving an unallocated table behind.
    fn take_entries(&mut self) -> IntoIter<K, V> {
        let remaining = self.len();
        self.populated = 0;
        self.grow_at = 0;

        IntoIter {
            keys: core::mem::take(&mut self.keys),
            values: core::mem::take(&mut self.values),
            zero: self.zero.take(),
            index: 0,
            remaining,
        }
    }

    pub(crate) fn drain(&mut self) -> Drain<'_, K, V> {
        let inner = self.take_entries();
        Drain { table: self, inner }
    }

    pub(crate) fn into_entries(mut self) -> IntoIter<K, V> {
        self.take_entries()
    }

    /// Returns the distance of every non-zero key from its home slot,
    /// bucketed by distance.
    #[cfg(any(test, feature = "stats"))]
    pub(crate) fn probe_histogram(&self) -> Vec<usize> {
        let mut hist = Vec::new();
        let mask = self.mask();
        for (index, key) in self.keys.iter().enumerate() {
            if key.is_zero() {
                continue;
            }

            let distance = index.wrapping_sub(key.mix() & mask) & mask;
            if hist.len() <= distance {
                hist.resize(distance + 1, 0);
            }
            hist[distance] += 1;
        }
        hist
    }

    #[cfg(any(test, feature = "stats"))]
    pub(crate) fn debug_stats(&self) -> DebugStats {
        let hist = self.probe_histogram();
        let total_distance: usize = hist
            .iter()
            .enumerate()
            .map(|(distance, count)| distance * count)
            .sum();

        DebugStats {
            len: self.len(),
            capacity: self.keys.len(),
            occupied_slots: self.populated,
            load_factor: if self.keys.is_empty() {
                0.0
            } else {
                self.populated as f64 / self.keys.len() as f64
            },
            max_probe: hist.len().saturating_sub(1),
            mean_probe: if self.populated == 0 {
                0.0
            } else {
                total_distance as f64 / self.populated as f64
            },
        }
    }

    /// Asserts the structural invariants: the populated count matches the
    /// occupied slots, the load stays under the growth threshold, and every
    /// key is reachable from its home slot without crossing a free slot.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        if self.keys.is_empty() {
            assert_eq!(self.populated, 0);
            assert_eq!(self.grow_at, 0);
            return;
        }

        assert!(self.keys.len().is_power_of_two());
        assert_eq!(self.keys.len(), self.values.len());
        assert!(self.populated < self.grow_at || self.populated == 0);

        let occupied = self.keys.iter().filter(|k| !k.is_zero()).count();
        assert_eq!(occupied, self.populated);

        let mask = self.mask();
        for (index, &key) in self.keys.iter().enumerate() {
            if key.is_zero() {
                continue;
            }

            let mut probe = key.mix() & mask;
            while probe != index {
                assert!(
                    !self.keys[probe].is_zero(),
                    "free slot {probe} breaks the probe chain of {index} ({:#?})",
                    self
                );
                probe = (probe + 1) & mask;
            }
        }
    }
}

/// Borrowing iterator: the zero key first, then slots in storage order.
pub(crate) struct Iter<'a, K, V> {
    zero: Option<&'a V>,
    slots: Zip<slice::Iter<'a, K>, slice::Iter<'a, MaybeUninit<V>>>,
    remaining: usize,
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            zero: self.zero,
            slots: self.slots.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, K: IntKey, V> Iterator for Iter<'a, K, V> {
    type Item = (K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(value) = self.zero.take() {
            self.remaining -= 1;
            return Some((K::ZERO, value));
        }
        if self.remaining == 0 {
            return None;
        }

        for (key, value) in self.slots.by_ref() {
            if !key.is_zero() {
                self.remaining -= 1;
                // SAFETY: a non-zero key marks an initialized value.
                return Some((*key, unsafe { value.assume_init_ref() }));
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K: IntKey, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K: IntKey, V> FusedIterator for Iter<'_, K, V> {}

/// Mutable counterpart of [`Iter`].
pub(crate) struct IterMut<'a, K, V> {
    zero: Option<&'a mut V>,
    slots: Zip<slice::Iter<'a, K>, slice::IterMut<'a, MaybeUninit<V>>>,
    remaining: usize,
}

impl<'a, K: IntKey, V> Iterator for IterMut<'a, K, V> {
    type Item = (K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(value) = self.zero.take() {
            self.remaining -= 1;
            return Some((K::ZERO, value));
        }
        if self.remaining == 0 {
            return None;
        }

        for (key, value) in self.slots.by_ref() {
            if !key.is_zero() {
                self.remaining -= 1;
                // SAFETY: a non-zero key marks an initialized value.
                return Some((*key, unsafe { value.assume_init_mut() }));
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K: IntKey, V> ExactSizeIterator for IterMut<'_, K, V> {}

impl<K: IntKey, V> FusedIterator for IterMut<'_, K, V> {}

/// Owning iterator over entries moved out of a table.
pub(crate) struct IntoIter<K: IntKey, V> {
    keys: Vec<K>,
    values: Vec<MaybeUninit<V>>,
    zero: Option<V>,
    index: usize,
    remaining: usize,
}

impl<K: IntKey, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(value) = self.zero.take() {
            self.remaining -= 1;
            return Some((K::ZERO, value));
        }

        while self.remaining > 0 && self.index < self.keys.len() {
            let index = self.index;
            self.index += 1;

            let key = core::mem::replace(&mut self.keys[index], K::ZERO);
            if key.is_zero() {
                continue;
            }

            self.remaining -= 1;
            let value = core::mem::replace(&mut self.values[index], MaybeUninit::uninit());
            // SAFETY: the key was non-zero, so the value is initialized; the
            // slot is already marked free.
            return Some((key, unsafe { value.assume_init() }));
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K: IntKey, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K: IntKey, V> FusedIterator for IntoIter<K, V> {}

impl<K: IntKey, V> Drop for IntoIter<K, V> {
    fn drop(&mut self) {
        for _ in &mut *self {}
    }
}

/// Draining iterator.
///
/// The table's arrays are moved into the iterator up front, so the table is
/// empty even if the iterator is leaked. Dropping the iterator drops any
/// entries not yet yielded and hands the cleared arrays back to the table.
pub(crate) struct Drain<'a, K: IntKey, V> {
    table: &'a mut IntTable<K, V>,
    inner: IntoIter<K, V>,
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

impl<K: IntKey, V> Drop for Drain<'_, K, V> {
    fn drop(&mut self) {
        for _ in &mut self.inner {}

        if !self.inner.keys.is_empty() {
            self.table.grow_at = grow_threshold(self.inner.keys.len());
            self.table.keys = core::mem::take(&mut self.inner.keys);
            self.table.values = core::mem::take(&mut self.inner.values);
        }
    }
}
