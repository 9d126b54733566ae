//! String table addressed by [`Str`] handles.
//!
//! Short strings live in shared [`ByteBuckets`]; strings longer than a
//! bucket are "big" and own their bytes. Handle `0` is always the empty
//! string. Contents are always valid UTF-8 because every entry point takes
//! `&str`.

use crate::bucket_array::{BucketArray, ByteBuckets, ByteLoc};
use crate::fatal::unrecoverable;

/// Handle to a string in a [`StrStore`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Str(u32);

impl Str {
    /// The pre-allocated empty string.
    pub const EMPTY: Str = Str(0);

    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone)]
enum StrData {
    Small(ByteLoc),
    Big(String),
}

#[derive(Debug, Clone)]
struct StrEntry {
    data: StrData,
    len: u32,
}

/// Owner of every string created during evaluation.
#[derive(Debug, Clone)]
pub struct StrStore {
    chrs: ByteBuckets,
    strs: BucketArray<StrEntry>,
}

impl StrStore {
    pub fn new(chr_bucket_size: u32, str_bucket_size: u32) -> Self {
        let mut store = StrStore {
            chrs: ByteBuckets::new(chr_bucket_size),
            strs: BucketArray::new(str_bucket_size),
        };
        let empty = store.strs.push(StrEntry {
            data: StrData::Big(String::new()),
            len: 0,
        });
        debug_assert_eq!(empty, Str::EMPTY.0);
        store
    }

    fn checked_len(len: usize) -> u32 {
        match u32::try_from(len) {
            Ok(l) if l < crate::MAX_HANDLES => l,
            _ => unrecoverable("string overflow"),
        }
    }

    /// Store a copy of `s`.
    pub fn push(&mut self, s: &str) -> Str {
        if s.is_empty() {
            return Str::EMPTY;
        }
        let len = Self::checked_len(s.len());
        let data = if self.chrs.fits(s.len()) {
            StrData::Small(self.chrs.push_many(s.as_bytes()))
        } else {
            StrData::Big(s.to_owned())
        };
        Str(self.strs.push(StrEntry { data, len }))
    }

    /// Contents of `s`.
    pub fn get(&self, s: Str) -> &str {
        let entry = self.strs.get(s.0);
        match &entry.data {
            StrData::Big(owned) => owned,
            StrData::Small(loc) => match std::str::from_utf8(self.chrs.slice(*loc, entry.len as usize)) {
                Ok(text) => text,
                Err(_) => unrecoverable("string store corrupted"),
            },
        }
    }

    #[inline]
    pub fn len(&self, s: Str) -> usize {
        self.strs.get(s.0).len as usize
    }

    /// Whether `s` is stored out of line.
    pub fn is_big(&self, s: Str) -> bool {
        matches!(self.strs.get(s.0).data, StrData::Big(_))
    }

    /// Number of handles issued, including the empty string.
    #[inline]
    pub fn count(&self) -> u32 {
        self.strs.len()
    }

    /// Append `more` to `s` in place.
    ///
    /// Extends the bytes where they sit when `s` is the most recent run in
    /// its bucket and the bucket has room; otherwise the contents are copied
    /// to a new run, or promoted to a big string once they outgrow a bucket.
    /// The handle keeps referring to the grown string either way.
    ///
    /// # Panics
    /// When called on [`Str::EMPTY`], which is shared and immutable.
    pub fn append(&mut self, s: Str, more: &str) {
        assert_ne!(s, Str::EMPTY, "cannot append to the shared empty string");
        if more.is_empty() {
            return;
        }

        let old_len = self.len(s);
        let new_len = Self::checked_len(old_len + more.len());
        let data = self.strs.get(s.0).data.clone();

        let new_data = match data {
            StrData::Big(mut owned) => {
                owned.push_str(more);
                StrData::Big(owned)
            }
            StrData::Small(loc) => {
                if self.chrs.try_extend_in_place(loc, old_len, more.as_bytes()) {
                    StrData::Small(loc)
                } else {
                    let mut grown = String::with_capacity(new_len as usize);
                    grown.push_str(self.get(s));
                    grown.push_str(more);
                    if self.chrs.fits(grown.len()) {
                        StrData::Small(self.chrs.push_many(grown.as_bytes()))
                    } else {
                        StrData::Big(grown)
                    }
                }
            }
        };

        let entry = self.strs.get_mut(s.0);
        entry.data = new_data;
        entry.len = new_len;
    }

    /// New string holding `a` followed by `b`.
    pub fn concat(&mut self, a: &str, b: &str) -> Str {
        let mut joined = String::with_capacity(a.len() + b.len());
        joined.push_str(a);
        joined.push_str(b);
        self.push(&joined)
    }

    /// New string with the same contents as `s`.
    pub fn dup(&mut self, s: Str) -> Str {
        if s == Str::EMPTY {
            return s;
        }
        let owned = self.get(s).to_owned();
        self.push(&owned)
    }
}

#[cfg(test)]
mod tests;
