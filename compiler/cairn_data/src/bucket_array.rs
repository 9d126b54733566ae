//! Chunked arenas with stable handles.
//!
//! Elements are stored in fixed-capacity buckets. A full bucket is never
//! reallocated; growth appends a fresh bucket. Handles are the element's
//! global position and fit in 31 bits.

use crate::fatal::unrecoverable;

/// Exclusive upper bound on handles issued by any arena in this crate.
pub const MAX_HANDLES: u32 = u32::MAX >> 1;

/// Arena of `T` addressed by `u32` handles.
///
/// Every bucket except the last is full, so a handle maps to
/// `(handle / bucket_size, handle % bucket_size)`.
#[derive(Debug, Clone)]
pub struct BucketArray<T> {
    buckets: Vec<Vec<T>>,
    bucket_size: u32,
    len: u32,
}

impl<T> BucketArray<T> {
    /// Create an empty arena whose buckets hold `bucket_size` elements.
    pub fn new(bucket_size: u32) -> Self {
        assert!(bucket_size > 0, "bucket size must be non-zero");
        BucketArray {
            buckets: Vec::new(),
            bucket_size,
            len: 0,
        }
    }

    /// Append `item`, returning its handle.
    ///
    /// Aborts the process once the handle space is exhausted.
    pub fn push(&mut self, item: T) -> u32 {
        if self.len >= MAX_HANDLES {
            unrecoverable("bucket array overflow");
        }

        let bucket_size = self.bucket_size as usize;
        match self.buckets.last_mut() {
            Some(bucket) if bucket.len() < bucket_size => bucket.push(item),
            _ => {
                let mut bucket = Vec::with_capacity(bucket_size);
                bucket.push(item);
                self.buckets.push(bucket);
            }
        }

        let handle = self.len;
        self.len += 1;
        handle
    }

    #[inline]
    fn locate(&self, handle: u32) -> (usize, usize) {
        assert!(
            handle < self.len,
            "handle {handle} out of bounds (len {})",
            self.len
        );
        (
            (handle / self.bucket_size) as usize,
            (handle % self.bucket_size) as usize,
        )
    }

    /// Element behind `handle`.
    ///
    /// # Panics
    /// If `handle` was not issued by this arena.
    #[inline]
    pub fn get(&self, handle: u32) -> &T {
        let (b, i) = self.locate(handle);
        &self.buckets[b][i]
    }

    #[inline]
    pub fn get_mut(&mut self, handle: u32) -> &mut T {
        let (b, i) = self.locate(handle);
        &mut self.buckets[b][i]
    }

    #[inline]
    pub fn len(&self) -> u32 {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Drop every element while keeping the first bucket's allocation.
    pub fn clear(&mut self) {
        self.buckets.truncate(1);
        if let Some(first) = self.buckets.first_mut() {
            first.clear();
        }
        self.len = 0;
    }

    /// Iterate over every element in handle order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buckets.iter().flatten()
    }
}

/// Position of a run of bytes inside [`ByteBuckets`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ByteLoc {
    bucket: u32,
    offset: u32,
}

/// Chunked byte storage.
///
/// A run never straddles two buckets. Runs longer than the bucket size
/// are rejected; callers store those out of line.
#[derive(Debug, Clone)]
pub struct ByteBuckets {
    buckets: Vec<Vec<u8>>,
    bucket_size: usize,
}

impl ByteBuckets {
    pub fn new(bucket_size: u32) -> Self {
        assert!(bucket_size > 0, "bucket size must be non-zero");
        ByteBuckets {
            buckets: Vec::new(),
            bucket_size: bucket_size as usize,
        }
    }

    #[inline]
    pub fn bucket_size(&self) -> usize {
        self.bucket_size
    }

    /// Whether a run of `len` bytes fits in a single bucket.
    #[inline]
    pub fn fits(&self, len: usize) -> bool {
        len <= self.bucket_size
    }

    /// Bulk-append `data`, opening a new bucket only when the current one
    /// cannot hold all of it.
    pub fn push_many(&mut self, data: &[u8]) -> ByteLoc {
        assert!(self.fits(data.len()), "run larger than bucket size");

        let need_bucket = match self.buckets.last() {
            Some(bucket) => bucket.len() + data.len() > self.bucket_size,
            None => true,
        };
        if need_bucket {
            if self.buckets.len() >= MAX_HANDLES as usize {
                unrecoverable("byte bucket overflow");
            }
            self.buckets.push(Vec::with_capacity(self.bucket_size));
        }

        let bucket_idx = self.buckets.len() - 1;
        let bucket = &mut self.buckets[bucket_idx];
        let offset = bucket.len();
        bucket.extend_from_slice(data);

        ByteLoc {
            bucket: u32::try_from(bucket_idx).unwrap_or_else(|_| unrecoverable("byte bucket overflow")),
            offset: u32::try_from(offset).unwrap_or_else(|_| unrecoverable("byte bucket overflow")),
        }
    }

    /// Bytes of the run at `loc` spanning `len` bytes.
    #[inline]
    pub fn slice(&self, loc: ByteLoc, len: usize) -> &[u8] {
        let start = loc.offset as usize;
        &self.buckets[loc.bucket as usize][start..start + len]
    }

    /// Extend the run at `loc` in place.
    ///
    /// Succeeds only when the run is the last occupant of its bucket and the
    /// bucket has room for `more`. Returns `false` without modifying anything
    /// otherwise.
    pub fn try_extend_in_place(&mut self, loc: ByteLoc, len: usize, more: &[u8]) -> bool {
        let bucket_size = self.bucket_size;
        let bucket = &mut self.buckets[loc.bucket as usize];
        let end = loc.offset as usize + len;
        if bucket.len() != end || end + more.len() > bucket_size {
            return false;
        }
        bucket.extend_from_slice(more);
        true
    }

    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }
}
