use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn store() -> StrStore {
    StrStore::new(16, 8)
}

#[test]
fn empty_string_is_handle_zero() {
    let mut s = store();
    assert_eq!(s.get(Str::EMPTY), "");
    assert_eq!(s.push(""), Str::EMPTY);
    assert_eq!(s.count(), 1);
}

#[test]
fn push_and_get() {
    let mut s = store();
    let a = s.push("hello");
    let b = s.push("world");
    assert_ne!(a, b);
    assert_eq!(s.get(a), "hello");
    assert_eq!(s.get(b), "world");
    assert_eq!(s.len(a), 5);
}

#[test]
fn long_strings_are_big() {
    let mut s = store();
    let long = "x".repeat(40);
    let h = s.push(&long);
    assert!(s.is_big(h));
    assert_eq!(s.get(h), long);

    let short = s.push("tiny");
    assert!(!s.is_big(short));
}

#[test]
fn append_to_latest_string_stays_in_place() {
    let mut s = store();
    let h = s.push("ab");
    s.append(h, "cd");
    assert_eq!(s.get(h), "abcd");
    assert!(!s.is_big(h));
}

#[test]
fn append_after_other_strings_copies() {
    let mut s = store();
    let a = s.push("ab");
    let b = s.push("xy");
    s.append(a, "cd");
    assert_eq!(s.get(a), "abcd");
    assert_eq!(s.get(b), "xy");
}

#[test]
fn append_past_bucket_promotes_to_big() {
    let mut s = store();
    let h = s.push("0123456789");
    s.append(h, "abcdefghij");
    assert!(s.is_big(h));
    assert_eq!(s.get(h), "0123456789abcdefghij");
    s.append(h, "!");
    assert_eq!(s.get(h), "0123456789abcdefghij!");
}

#[test]
fn dup_is_independent() {
    let mut s = store();
    let a = s.push("base");
    let b = s.dup(a);
    s.append(b, "-copy");
    assert_eq!(s.get(a), "base");
    assert_eq!(s.get(b), "base-copy");
}

#[test]
#[should_panic(expected = "shared empty string")]
fn append_to_empty_panics() {
    let mut s = store();
    s.append(Str::EMPTY, "x");
}

proptest! {
    #[test]
    fn appends_match_string_concatenation(
        base in "[a-z]{1,12}",
        parts in proptest::collection::vec("[a-z0-9]{0,9}", 0..8),
        noise in proptest::collection::vec("[A-Z]{1,5}", 0..4),
    ) {
        let mut s = store();
        let h = s.push(&base);
        let mut expected = base.clone();
        for (i, part) in parts.iter().enumerate() {
            if let Some(n) = noise.get(i) {
                s.push(n);
            }
            s.append(h, part);
            expected.push_str(part);
        }
        prop_assert_eq!(s.get(h), expected.as_str());
        prop_assert_eq!(s.len(h), expected.len());
    }
}
