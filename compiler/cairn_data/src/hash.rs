//! Open-addressing hash table.
//!
//! Layout:
//! - `meta`: one byte per slot. [`EMPTY`] and [`DELETED`] have the high bit
//!   set; a full slot stores the low 7 bits of the key's hash.
//! - `slots`: per-slot value plus the index of its key.
//! - `keys`: append-only key list in insertion order.
//!
//! The probe starts at `(hash >> 7) & (cap - 1)` and walks linearly. The
//! table doubles before an insert once `load` exceeds half the capacity.
//!
//! `unset` leaves a tombstone and does not lower `load`, so a table that
//! churns through many distinct keys resizes more often than its live
//! length alone would suggest. A resize drops every tombstone.

use std::borrow::Borrow;

use crate::fnv::{fnv_1a_64, fnv_1a_64_str};
use crate::iter::IterationResult;

const EMPTY: u8 = 0x80;
const DELETED: u8 = 0xfe;
const MIN_CAPACITY: usize = 8;

#[inline]
fn is_full(meta: u8) -> bool {
    meta & 0x80 == 0
}

/// Keys usable in a [`Hash`].
///
/// Strings hash their bytes up to the first NUL; fixed-size keys hash
/// their raw little-endian bytes.
pub trait HashKey {
    fn fnv(&self) -> u64;
}

impl HashKey for str {
    #[inline]
    fn fnv(&self) -> u64 {
        fnv_1a_64_str(self)
    }
}

impl HashKey for String {
    #[inline]
    fn fnv(&self) -> u64 {
        fnv_1a_64_str(self)
    }
}

impl HashKey for Box<str> {
    #[inline]
    fn fnv(&self) -> u64 {
        fnv_1a_64_str(self)
    }
}

impl<T: HashKey + ?Sized> HashKey for &T {
    #[inline]
    fn fnv(&self) -> u64 {
        (**self).fnv()
    }
}

macro_rules! int_hash_key {
    ($($ty:ty),*) => {$(
        impl HashKey for $ty {
            #[inline]
            fn fnv(&self) -> u64 {
                fnv_1a_64(&self.to_le_bytes())
            }
        }
    )*};
}

int_hash_key!(u8, u16, u32, u64, i32, i64);

impl<const N: usize> HashKey for [u8; N] {
    #[inline]
    fn fnv(&self) -> u64 {
        fnv_1a_64(self)
    }
}

#[derive(Copy, Clone, Debug, Default)]
struct Slot<V> {
    val: V,
    keyi: u32,
}

/// Open-addressing map from `K` to small copyable values.
#[derive(Clone, Debug)]
pub struct Hash<K, V> {
    meta: Vec<u8>,
    slots: Vec<Slot<V>>,
    keys: Vec<K>,
    len: usize,
    load: usize,
}

impl<K, V> Default for Hash<K, V>
where
    K: HashKey + Eq,
    V: Copy + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Hash<K, V>
where
    K: HashKey + Eq,
    V: Copy + Default,
{
    /// Table with the minimum capacity.
    pub fn new() -> Self {
        Self::with_capacity(MIN_CAPACITY)
    }

    /// Table with `cap` slots.
    ///
    /// # Panics
    /// If `cap` is not a power of two, or is below 8.
    pub fn with_capacity(cap: usize) -> Self {
        assert!(
            cap.is_power_of_two() && cap >= MIN_CAPACITY,
            "hash capacity must be a power of two >= {MIN_CAPACITY}, got {cap}"
        );
        Hash {
            meta: vec![EMPTY; cap],
            slots: vec![Slot::default(); cap],
            keys: Vec::with_capacity(cap >> 1),
            len: 0,
            load: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.meta.len()
    }

    /// Occupied plus tombstoned slots.
    #[inline]
    pub fn load(&self) -> usize {
        self.load
    }

    #[inline]
    fn max_load(&self) -> usize {
        self.capacity() >> 1
    }

    /// Slot where `key` lives, or the empty slot that ends its probe.
    fn probe<Q>(&self, key: &Q) -> (usize, u8)
    where
        K: Borrow<Q>,
        Q: HashKey + Eq + ?Sized,
    {
        let hv = key.fnv();
        let capm = self.capacity() - 1;
        let frag = (hv & 0x7f) as u8;
        #[expect(clippy::cast_possible_truncation, reason = "masked by capacity - 1")]
        let mut i = (hv >> 7) as usize & capm;

        loop {
            let m = self.meta[i];
            if m == EMPTY {
                break;
            }
            if is_full(m)
                && m == frag
                && Borrow::<Q>::borrow(&self.keys[self.slots[i].keyi as usize]) == key
            {
                break;
            }
            i = (i + 1) & capm;
        }

        (i, frag)
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: HashKey + Eq + ?Sized,
    {
        let (i, _) = self.probe(key);
        is_full(self.meta[i]).then(|| &self.slots[i].val)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: HashKey + Eq + ?Sized,
    {
        let (i, _) = self.probe(key);
        if is_full(self.meta[i]) {
            Some(&mut self.slots[i].val)
        } else {
            None
        }
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: HashKey + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Insert or overwrite.
    pub fn set(&mut self, key: K, val: V) {
        if self.load > self.max_load() {
            self.resize(self.capacity() << 1);
        }

        let (i, frag) = self.probe(&key);
        if is_full(self.meta[i]) {
            self.slots[i].val = val;
            return;
        }

        let keyi = u32::try_from(self.keys.len())
            .unwrap_or_else(|_| crate::fatal::unrecoverable("hash key overflow"));
        self.keys.push(key);
        self.meta[i] = frag;
        self.slots[i] = Slot { val, keyi };
        self.len += 1;
        self.load += 1;
    }

    /// Remove `key` if present, leaving a tombstone.
    pub fn unset<Q>(&mut self, key: &Q)
    where
        K: Borrow<Q>,
        Q: HashKey + Eq + ?Sized,
    {
        let (i, _) = self.probe(key);
        if is_full(self.meta[i]) {
            self.meta[i] = DELETED;
            self.len -= 1;
        }
        debug_assert!(self.get(key).is_none());
    }

    /// Remove every entry and key, keeping the capacity.
    pub fn clear(&mut self) {
        self.meta.fill(EMPTY);
        self.keys.clear();
        self.len = 0;
        self.load = 0;
    }

    fn resize(&mut self, newcap: usize) {
        debug_assert!(newcap.is_power_of_two());
        let old_meta = std::mem::replace(&mut self.meta, vec![EMPTY; newcap]);
        let old_slots = std::mem::replace(&mut self.slots, vec![Slot::default(); newcap]);

        for (m, slot) in old_meta.into_iter().zip(old_slots) {
            if !is_full(m) {
                continue;
            }
            let key = &self.keys[slot.keyi as usize];
            let (i, frag) = self.probe(key);
            self.meta[i] = frag;
            self.slots[i] = slot;
        }

        self.load = self.len;
        tracing::trace!(capacity = newcap, len = self.len, "hash resized");
    }

    /// Visit every live value in slot order.
    pub fn for_each(&self, mut f: impl FnMut(&V) -> IterationResult) -> IterationResult {
        self.for_each_with_keys(|_, v| f(v))
    }

    /// Visit every live key/value pair in slot order.
    pub fn for_each_with_keys(
        &self,
        mut f: impl FnMut(&K, &V) -> IterationResult,
    ) -> IterationResult {
        for (m, slot) in self.meta.iter().zip(&self.slots) {
            if !is_full(*m) {
                continue;
            }
            match f(&self.keys[slot.keyi as usize], &slot.val) {
                IterationResult::Continue => {}
                stop => return stop,
            }
        }
        IterationResult::Continue
    }

    /// Every live key/value pair in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.meta
            .iter()
            .zip(&self.slots)
            .filter(|(m, _)| is_full(**m))
            .map(|(_, slot)| (&self.keys[slot.keyi as usize], &slot.val))
    }
}
