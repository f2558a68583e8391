//! Randomized checks of the sequence invariants.

use crate::SimpleVec;
use proptest::collection::vec as arb_items;
use proptest::prelude::*;

fn build(items: &[i32]) -> SimpleVec<i32> {
    let mut v = SimpleVec::new();
    for &item in items {
        v.push_back(item);
    }
    v
}

proptest! {
    #[test]
    fn with_len_is_all_default(n in 0usize..200) {
        let v = SimpleVec::<i64>::with_len(n);
        prop_assert_eq!(n, v.len());
        prop_assert_eq!(n, v.capacity());
        prop_assert!(v.iter().all(|&x| x == 0));
    }

    #[test]
    fn from_elem_is_all_value(n in 0usize..200, value in any::<i32>()) {
        let v = SimpleVec::from_elem(n, &value);
        prop_assert_eq!(n, v.len());
        prop_assert!(v.iter().all(|&x| x == value));
    }

    #[test]
    fn push_grows_by_doubling(items in arb_items(any::<i32>(), 0..100)) {
        let mut v = SimpleVec::new();
        for &item in &items {
            let before = v.capacity();
            let ptr = v.as_ptr();
            v.push_back(item);
            if v.len() <= before {
                prop_assert_eq!(before, v.capacity());
                prop_assert_eq!(ptr, v.as_ptr());
            } else {
                prop_assert_eq!(std::cmp::max(1, before * 2), v.capacity());
            }
        }
        prop_assert_eq!(&items[..], v.as_slice());
    }

    #[test]
    fn erase_undoes_insert(
        items in arb_items(any::<i32>(), 0..50),
        at in any::<prop::sample::Index>(),
        value in any::<i32>(),
    ) {
        let mut v = build(&items);
        let pos = at.index(items.len() + 1);
        let inserted = v.insert(pos, value);
        prop_assert_eq!(value, v[inserted]);
        prop_assert_eq!(items.len() + 1, v.len());
        v.erase(inserted);
        prop_assert_eq!(&items[..], v.as_slice());
    }

    #[test]
    fn resize_round_trip_keeps_prefix(
        items in arb_items(any::<i32>(), 0..50),
        at in any::<prop::sample::Index>(),
    ) {
        let mut v = build(&items);
        let keep = at.index(items.len() + 1);
        v.resize(keep);
        v.resize(items.len());
        prop_assert_eq!(items.len(), v.len());
        prop_assert_eq!(&items[..keep], &v[..keep]);
    }

    #[test]
    fn reserve_only_grows(items in arb_items(any::<i32>(), 0..50), request in 0usize..200) {
        let mut v = build(&items);
        let before = v.capacity();
        v.reserve(request);
        prop_assert_eq!(std::cmp::max(before, request), v.capacity());
        prop_assert_eq!(&items[..], v.as_slice());
    }

    #[test]
    fn clear_then_push_matches_fresh(
        old in arb_items(any::<i32>(), 0..50),
        new in arb_items(any::<i32>(), 0..50),
    ) {
        let mut v = build(&old);
        let capacity = v.capacity();
        v.clear();
        prop_assert_eq!(capacity, v.capacity());
        for &item in &new {
            v.push_back(item);
        }
        prop_assert_eq!(build(&new), v);
    }

    #[test]
    fn equality_is_an_equivalence(
        a in arb_items(0i32..3, 0..4),
        b in arb_items(0i32..3, 0..4),
        c in arb_items(0i32..3, 0..4),
    ) {
        let (a, b, c) = (build(&a), SimpleVec::from_slice(&b), build(&c));
        prop_assert!(a == a);
        prop_assert_eq!(a == b, b == a);
        if a == b && b == c {
            prop_assert!(a == c);
        }
    }

    #[test]
    fn ordering_matches_slices(a in arb_items(0i32..3, 0..5), b in arb_items(0i32..3, 0..5)) {
        let (va, vb) = (build(&a), build(&b));
        prop_assert_eq!(a.cmp(&b), va.cmp(&vb));
        prop_assert_eq!(a < b, va < vb);
        prop_assert_eq!(a <= b, va <= vb);
        prop_assert_eq!(a > b, va > vb);
        prop_assert_eq!(a >= b, va >= vb);
    }
}
