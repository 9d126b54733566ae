//! Cairn Data - storage primitives for the evaluator
//!
//! This crate contains the low-level containers every evaluation value
//! lives in:
//! - [`BucketArray`]: chunked arena with stable, 32-bit element handles
//! - [`ByteBuckets`]: chunked byte storage backing small strings
//! - [`StrStore`]: string table addressed by [`Str`] handles
//! - [`Hash`]: open-addressing hash table with a one-byte metadata array
//!
//! # Design Philosophy
//!
//! - **Handles, not pointers**: values are addressed by `u32` indices that
//!   stay valid for the lifetime of their container.
//! - **No reallocation of live buckets**: growth adds buckets instead of
//!   moving existing elements.
//! - **Insertion order**: hash iteration visits entries in slot order, and
//!   keys are kept in an append-only list.

mod bucket_array;
mod fatal;
mod fnv;
mod hash;
mod iter;
mod str_store;

pub use bucket_array::{BucketArray, ByteBuckets, ByteLoc, MAX_HANDLES};
pub use fatal::unrecoverable;
pub use fnv::{fnv_1a_64, fnv_1a_64_str};
pub use hash::{Hash, HashKey};
pub use iter::IterationResult;
pub use str_store::{Str, StrStore};
