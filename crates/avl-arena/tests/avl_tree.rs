use std::collections::{BTreeSet, HashMap};

use avl_arena::{AvlTree, Direction, TreeError};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

#[test]
fn empty_tree() {
    let tree: AvlTree<i32> = AvlTree::new();
    assert_eq!(tree.len(), 0);
    assert!(tree.is_empty());
    assert_eq!(tree.first(), None);
    assert_eq!(tree.last(), None);
    assert_eq!(tree.find(&42), None);

    let mut iter = tree.iter(Direction::Forward);
    assert_eq!(iter.first(), None);
    assert_eq!(iter.next(), None);
    assert_eq!(iter.get(), None);

    tree.assert_valid().unwrap();
}

#[test]
fn ordered_iteration_both_directions() {
    let mut tree = AvlTree::new();
    for v in [5, 3, 8, 1, 4, 7, 9] {
        tree.insert(v);
        tree.assert_valid().unwrap();
    }
    assert_eq!(tree.len(), 7);

    let forward: Vec<i32> = tree.iter(Direction::Forward).map(|n| *tree.value(n)).collect();
    assert_eq!(forward, vec![1, 3, 4, 5, 7, 8, 9]);

    let backward: Vec<i32> = tree.iter(Direction::Backward).map(|n| *tree.value(n)).collect();
    assert_eq!(backward, vec![9, 8, 7, 5, 4, 3, 1]);

    let five = tree.find(&5).unwrap();
    assert_eq!(tree.remove(five), Ok(5));
    tree.assert_valid().unwrap();
    assert_eq!(tree.find(&5), None);
    assert_eq!(tree.len(), 6);

    let forward: Vec<i32> = tree.iter(Direction::Forward).map(|n| *tree.value(n)).collect();
    assert_eq!(forward, vec![1, 3, 4, 7, 8, 9]);
}

#[test]
fn first_and_last() {
    let mut tree = AvlTree::new();
    tree.insert(10);
    tree.insert(5);
    tree.insert(20);
    assert_eq!(tree.first().map(|n| *tree.value(n)), Some(5));
    assert_eq!(tree.last().map(|n| *tree.value(n)), Some(20));
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Pair(i32, i32);

fn pair_key_comparator(a: &Pair, b: &Pair) -> i32 {
    a.0 - b.0
}

#[test]
fn idempotent_insert_keeps_existing_entry() {
    let mut tree = AvlTree::with_comparator(pair_key_comparator);
    let first = tree.insert(Pair(1, 10));
    let second = tree.insert(Pair(1, 999));

    assert_eq!(first, second);
    assert_eq!(tree.len(), 1);
    // The stored payload is the original one; the rejected value was dropped.
    assert_eq!(tree.value(first), &Pair(1, 10));
    tree.assert_valid().unwrap();
}

#[test]
fn custom_comparator_ordering() {
    let cmp = |a: &Pair, b: &Pair| {
        let dx = a.0 - b.0;
        if dx == 0 {
            a.1 - b.1
        } else {
            dx
        }
    };
    let mut tree = AvlTree::with_comparator(cmp);
    tree.insert(Pair(0, 0));
    tree.insert(Pair(0, 1));
    tree.insert(Pair(2, 3));
    tree.insert(Pair(3, 3));
    assert_eq!(tree.len(), 4);

    let order: Vec<Pair> = tree
        .iter(Direction::Forward)
        .map(|n| tree.value(n).clone())
        .collect();
    assert_eq!(order, vec![Pair(0, 0), Pair(0, 1), Pair(2, 3), Pair(3, 3)]);

    let zero = tree.find(&Pair(0, 0)).unwrap();
    assert_eq!(tree.remove(zero), Ok(Pair(0, 0)));
    assert_eq!(tree.find(&Pair(0, 0)), None);
    assert!(tree.find(&Pair(0, 1)).is_some());
    tree.assert_valid().unwrap();
}

#[test]
fn reverse_comparator() {
    let mut tree = AvlTree::with_comparator(|a: &i32, b: &i32| b - a);
    for v in [1, 2, 3, 4] {
        tree.insert(v);
    }
    let order: Vec<i32> = tree.iter(Direction::Forward).map(|n| *tree.value(n)).collect();
    assert_eq!(order, vec![4, 3, 2, 1]);
    tree.assert_valid().unwrap();
}

#[test]
fn two_child_removal_keeps_passed_handle_live() {
    let mut tree = AvlTree::new();
    let two = tree.insert(2);
    tree.insert(1);
    tree.insert(4);
    let three = tree.insert(3);
    tree.insert(5);
    tree.assert_valid().unwrap();

    // 2 has both children; its in-order successor 3 donates its payload.
    assert_eq!(tree.remove(two), Ok(2));
    tree.assert_valid().unwrap();
    assert_eq!(tree.len(), 4);

    // The passed handle survived and now holds the successor's payload.
    assert_eq!(tree.value(two), &3);
    assert_eq!(tree.find(&3), Some(two));
    // The successor's own handle is the one that went stale.
    assert_eq!(tree.remove(three), Err(TreeError::StaleNode));
}

#[test]
fn remove_rejects_stale_and_foreign_handles() {
    let mut tree = AvlTree::new();
    let node = tree.insert(7);
    assert_eq!(tree.remove(node), Ok(7));
    assert_eq!(tree.remove(node), Err(TreeError::StaleNode));

    let mut big = AvlTree::new();
    big.insert(1);
    big.insert(2);
    let third = big.insert(3);

    let mut small = AvlTree::new();
    small.insert(10);
    assert_eq!(small.remove(third), Err(TreeError::OutOfBounds));
    assert_eq!(small.len(), 1);
}

#[test]
fn removal_reclaims_slots() {
    let mut tree = AvlTree::new();
    let a = tree.insert(1);
    tree.insert(2);

    assert_eq!(tree.remove(a), Ok(1));
    // The vacated slot is reused, so the old handle now aliases the new
    // entry. This is the documented hazard of retaining removed handles.
    let c = tree.insert(3);
    assert_eq!(c, a);
    assert_eq!(tree.value(a), &3);
    assert_eq!(tree.len(), 2);
    tree.assert_valid().unwrap();
}

#[test]
fn bound_queries() {
    let mut tree = AvlTree::new();
    assert_eq!(tree.get_or_next_lower(&10), None);

    let five = tree.insert(5);
    let ten = tree.insert(10);
    let twenty = tree.insert(20);

    assert_eq!(tree.get_or_next_lower(&4), None);
    assert_eq!(tree.get_or_next_lower(&5), Some(five));
    assert_eq!(tree.get_or_next_lower(&19), Some(ten));
    assert_eq!(tree.get_or_next_lower(&25), Some(twenty));
}

#[test]
fn value_mut_rewrites_payload() {
    let mut tree = AvlTree::with_comparator(pair_key_comparator);
    let node = tree.insert(Pair(1, 10));
    tree.insert(Pair(2, 20));

    // Only the comparator-irrelevant half may change.
    tree.value_mut(node).1 = 99;
    assert_eq!(tree.value(node), &Pair(1, 99));
    assert_eq!(tree.find(&Pair(1, 0)), Some(node));
    tree.assert_valid().unwrap();
}

#[test]
fn clear_resets_the_tree() {
    let mut tree = AvlTree::new();
    for v in 0..32 {
        tree.insert(v);
    }
    tree.clear();
    assert!(tree.is_empty());
    assert_eq!(tree.first(), None);
    tree.assert_valid().unwrap();

    tree.insert(7);
    assert_eq!(tree.len(), 1);
    tree.assert_valid().unwrap();
}

#[test]
fn cursor_semantics() {
    let mut tree = AvlTree::new();
    for v in [2, 1, 3] {
        tree.insert(v);
    }

    let mut iter = tree.iter(Direction::Forward);
    assert_eq!(iter.get(), None);

    // A fresh cursor's next() starts at the first entry.
    let first = iter.next().unwrap();
    assert_eq!(tree.value(first), &1);
    assert_eq!(iter.get(), Some(first));
    assert_eq!(iter.get(), Some(first));

    assert_eq!(iter.next().map(|n| *tree.value(n)), Some(2));
    assert_eq!(iter.next().map(|n| *tree.value(n)), Some(3));
    assert_eq!(iter.next(), None);
    assert_eq!(iter.next(), None);
    assert_eq!(iter.get(), None);

    // first() rewinds an exhausted cursor.
    assert_eq!(iter.first().map(|n| *tree.value(n)), Some(1));
    assert_eq!(iter.direction(), Direction::Forward);

    let mut back = tree.iter(Direction::Backward);
    assert_eq!(back.first().map(|n| *tree.value(n)), Some(3));
    assert_eq!(back.next().map(|n| *tree.value(n)), Some(2));
    assert_eq!(back.next().map(|n| *tree.value(n)), Some(1));
    assert_eq!(back.next(), None);
}

#[test]
fn random_insert_find_iterate_remove() {
    const NR_ENTRIES: usize = 1024;
    let mut rng = Xoshiro256StarStar::seed_from_u64(0x5eed_cafe);

    let mut values: BTreeSet<i64> = BTreeSet::new();
    while values.len() < NR_ENTRIES {
        values.insert(rng.gen::<i64>());
    }

    let mut tree = AvlTree::new();
    let mut handles: HashMap<i64, _> = HashMap::new();
    for &v in &values {
        handles.insert(v, tree.insert(v));
        tree.assert_valid().unwrap();
    }
    assert_eq!(tree.len(), NR_ENTRIES);

    for (&v, &node) in &handles {
        assert_eq!(tree.find(&v), Some(node));
        assert_eq!(tree.value(node), &v);
    }

    let in_order: Vec<i64> = values.iter().copied().collect();

    let mut iter = tree.iter(Direction::Forward);
    let mut visited = 0;
    let mut node = iter.first();
    while let Some(n) = node {
        assert_eq!(*tree.value(n), in_order[visited]);
        assert_eq!(iter.get(), Some(n));
        visited += 1;
        node = iter.next();
    }
    assert_eq!(visited, NR_ENTRIES);

    let mut iter = tree.iter(Direction::Backward);
    let mut visited = 0;
    let mut node = iter.first();
    while let Some(n) = node {
        assert_eq!(*tree.value(n), in_order[NR_ENTRIES - 1 - visited]);
        assert_eq!(iter.get(), Some(n));
        visited += 1;
        node = iter.next();
    }
    assert_eq!(visited, NR_ENTRIES);

    let mut order = in_order.clone();
    order.shuffle(&mut rng);
    for (i, v) in order.iter().enumerate() {
        let node = tree.find(v).expect("entry still present");
        assert_eq!(tree.value(node), v);
        assert_eq!(tree.remove(node), Ok(*v));
        tree.assert_valid().unwrap();
        assert_eq!(tree.len(), NR_ENTRIES - (i + 1));
        assert_eq!(tree.find(v), None);
    }
    assert_eq!(tree.len(), 0);
}
