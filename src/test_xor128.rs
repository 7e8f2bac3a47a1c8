#![cfg(test)]

use std::hash::Hasher;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::error::Error;
use crate::hash::*;
use crate::merkle::FixedSizeTree;
use crate::test_common::{get_full_tree, get_leafs, reference_root, Item, XOR128};

#[test]
fn test_hasher_light() {
    let mut h = XOR128::new();
    h.write(b"1234567812345678");
    assert_eq!(format!("{:#X}", h), "0x31323334353637383132333435363738");
    h.write(b"1234567812345678");
    assert_eq!(format!("{:#X}", h), "0x00000000000000000000000000000000");
    h.reset();
    assert_eq!(h.leaf(b"1234567812345678"), *b"1234567812345678");
}

#[test]
fn test_from_slice() {
    let mut a = XOR128::new();
    for width in 1..40 {
        let t = get_full_tree(width);
        assert_eq!(t.width(), width);
        assert_eq!(t.assigned(), width);
        assert!(t.is_complete());
        assert_eq!(t.hash(), Some(reference_root(&mut a, &get_leafs(width))));
    }
}

#[test]
fn test_single_leaf_root() {
    let mut a = XOR128::new();
    let mut t = FixedSizeTree::new(1, XOR128::new()).unwrap();
    assert_eq!(t.height(), 1);
    assert_eq!(t.hash(), None);
    t.set(0, b"hello").unwrap();
    assert_eq!(t.hash(), Some(a.leaf(b"hello")));
}

#[test]
fn test_invalid_width() {
    let t = FixedSizeTree::<Item, _>::new(0, XOR128::new());
    assert_eq!(t.unwrap_err(), Error::InvalidWidth { width: 0 });
}

#[test]
fn test_hash_unresolved_until_last_leaf() {
    let leafs = get_leafs(9);
    let mut t = FixedSizeTree::new(9, XOR128::new()).unwrap();
    for i in (0..9).rev() {
        assert_eq!(t.hash(), None);
        t.set(i, &leafs[i]).unwrap();
    }

    let root = t.hash();
    assert!(root.is_some());
    assert_eq!(
        t.set(3, b"again"),
        Err(Error::DuplicateAssignment { index: 3 })
    );
    assert_eq!(t.hash(), root);
}

#[test]
fn test_out_of_range_keeps_state() {
    let leafs = get_leafs(4);
    let mut t = FixedSizeTree::new(4, XOR128::new()).unwrap();
    t.set(1, &leafs[1]).unwrap();

    assert_eq!(
        t.set(4, b"x"),
        Err(Error::IndexOutOfRange { index: 4, width: 4 })
    );
    // -1 from a signed caller
    assert_eq!(
        t.set(-1i64 as usize, b"x"),
        Err(Error::IndexOutOfRange {
            index: usize::MAX,
            width: 4
        })
    );
    assert_eq!(t.assigned(), 1);

    t.set(0, &leafs[0]).unwrap();
    t.set(2, &leafs[2]).unwrap();
    t.set(3, &leafs[3]).unwrap();
    let mut a = XOR128::new();
    assert_eq!(t.hash(), Some(reference_root(&mut a, &leafs)));
}

#[test]
fn test_duplicate_after_pair_resolved() {
    let mut t = FixedSizeTree::new(8, XOR128::new()).unwrap();
    t.set(0, b"asdf").unwrap();
    t.set(1, b"asdf").unwrap();
    assert_eq!(
        t.set(0, b"asdf"),
        Err(Error::DuplicateAssignment { index: 0 })
    );
    assert!(t.is_assigned(0));
    assert!(!t.is_assigned(2));
}

#[test]
fn test_callback_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let c = calls.clone();
    let leafs = get_leafs(6);
    let mut t = FixedSizeTree::with_callback(6, XOR128::new(), move |_: &Item| {
        c.fetch_add(1, Ordering::SeqCst);
    })
    .unwrap();

    for &i in &[5, 3, 2, 0, 1] {
        t.set(i, &leafs[i]).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
    t.set(4, &leafs[4]).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    assert!(t.set(4, &leafs[4]).is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_set_digest_matches_set() {
    let mut a = XOR128::new();
    let leafs = get_leafs(5);
    let mut t = FixedSizeTree::new(5, XOR128::new()).unwrap();
    for (i, x) in leafs.iter().enumerate() {
        if i % 2 == 0 {
            t.set_digest(i, a.leaf(x)).unwrap();
        } else {
            t.set(i, x).unwrap();
        }
    }
    assert_eq!(t.hash(), get_full_tree(5).hash());
}
