#![cfg(test)]

use std::cell::Cell;
use std::rc::Rc;

use crate::growable::GrowableBinaryTree;
use crate::hash::{Algorithm, FnAlgorithm};
use crate::merkle::FixedSizeTree;

/// Hash that spells the tree out: `H(x) = "(" x ")"`.
fn paren(data: &[u8]) -> String {
    format!("({})", String::from_utf8_lossy(data))
}

#[test]
fn test_fn_algorithm() {
    let mut a = FnAlgorithm::new(paren);
    assert_eq!(a.leaf(b"a"), "(a)");
    assert_eq!(a.node(&"(a)".to_string(), &"(b)".to_string()), "((a)(b))");
    assert_eq!(format!("{:?}", a), "FnAlgorithm { buffered: 6 }");
}

#[test]
fn test_shape_and_duplication() {
    let cases = vec![
        (vec!["a"], "(a)"),
        (vec!["a", "b"], "((a)(b))"),
        (vec!["a", "b", "c"], "(((a)(b))((c)(c)))"),
        (vec!["a", "b", "c", "d"], "(((a)(b))((c)(d)))"),
        (
            vec!["a", "b", "c", "d", "e"],
            "((((a)(b))((c)(d)))(((e)(e))((e)(e))))",
        ),
        (
            vec!["a", "b", "c", "d", "e", "f"],
            "((((a)(b))((c)(d)))(((e)(f))((e)(f))))",
        ),
    ];

    for (leafs, expected) in cases {
        let mut t = FixedSizeTree::new(leafs.len(), FnAlgorithm::new(paren)).unwrap();
        // reversed, so that every pair is completed from its left side
        for (i, x) in leafs.iter().enumerate().rev() {
            t.set(i, x).unwrap();
        }
        assert_eq!(t.hash().as_deref(), Some(expected));
    }
}

#[test]
fn test_hash_calls() {
    let calls = Rc::new(Cell::new(0));
    let c = calls.clone();
    let alg = FnAlgorithm::new(move |data: &[u8]| {
        c.set(c.get() + 1);
        data.to_vec()
    });

    // 6 leafs, 3 + 2 + 1 interior nodes
    let mut t = FixedSizeTree::new(6, alg).unwrap();
    for i in 0..6 {
        t.set(i, [i as u8]).unwrap();
    }
    assert_eq!(calls.get(), 12);
    assert_eq!(t.hash(), Some(vec![0, 1, 2, 3, 4, 5, 4, 5]));
}

#[test]
fn test_growable_with_closure() {
    let mut t = GrowableBinaryTree::new(FnAlgorithm::new(paren));
    t.add_leaf_node().unwrap();
    t.add_leaf_node().unwrap();
    t.add_leaf_node().unwrap();
    t.set_data(2, "c").unwrap();

    // c has no sibling yet, its parent stays degenerate
    assert_eq!(t.level(0)[2].digest().map(String::as_str), Some("(c)"));
    assert!(t.level(1)[1].digest().is_none());

    t.add_leaf_node().unwrap();
    t.lock();
    t.set_data(0, "a").unwrap();
    t.set_data(1, "b").unwrap();
    assert_eq!(t.root(), None);
    assert_eq!(
        t.set_data(3, "d").unwrap().as_deref(),
        Some("(((a)(b))((c)(d)))")
    );
}
