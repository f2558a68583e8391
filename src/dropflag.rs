//! This module is for testing only

use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub type DropFlag<T> = Rc<RefCell<T>>;

/// Adds one to its flag on every drop. Default instances carry no flag.
#[derive(Debug, Default)]
pub struct Counted {
    pub value: i32,
    pub dropflag: Option<DropFlag<i32>>,
}

impl Counted {
    pub fn new(value: i32, dropflag: &DropFlag<i32>) -> Counted {
        Counted { value, dropflag: Some(dropflag.clone()) }
    }
}

impl Clone for Counted {
    fn clone(&self) -> Self {
        Counted { value: self.value, dropflag: self.dropflag.clone() }
    }
}

impl PartialEq for Counted {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Drop for Counted {
    fn drop(&mut self) {
        if let Some(flag) = &self.dropflag {
            *flag.borrow_mut() += 1;
        }
    }
}

thread_local! {
    static CONSTRUCTIONS_LEFT: Cell<Option<usize>> = Cell::new(None);
}

/// Makes `Fragile` construction panic once `budget` more constructions have happened on this
/// thread. Construction is unlimited again when the returned guard drops.
pub fn arm_fragile(budget: usize) -> FragileGuard {
    CONSTRUCTIONS_LEFT.with(|left| left.set(Some(budget)));
    FragileGuard
}

pub struct FragileGuard;

impl Drop for FragileGuard {
    fn drop(&mut self) {
        CONSTRUCTIONS_LEFT.with(|left| left.set(None));
    }
}

fn spend_construction() {
    CONSTRUCTIONS_LEFT.with(|left| match left.get() {
        Some(0) => panic!("fragile construction failed"),
        Some(n) => left.set(Some(n - 1)),
        None => {}
    });
}

/// An element whose `Default` and `Clone` can be made to fail with `arm_fragile`.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Fragile(pub i32);

impl Default for Fragile {
    fn default() -> Self {
        spend_construction();
        Fragile(0)
    }
}

impl Clone for Fragile {
    fn clone(&self) -> Self {
        spend_construction();
        Fragile(self.0)
    }
}

#[test]
fn dropflag() {
    let flag = DropFlag::new(RefCell::new(0));
    let counted = Counted::new(7, &flag);
    let copy = counted.clone();
    assert_eq!(0, *flag.borrow());
    std::mem::drop(counted);
    assert_eq!(1, *flag.borrow());
    std::mem::drop(copy);
    assert_eq!(2, *flag.borrow());
}

#[test]
fn fragile_fails_after_budget() {
    let _guard = arm_fragile(1);
    let _first = Fragile::default();
    let result = std::panic::catch_unwind(|| Fragile::default());
    assert!(result.is_err());
}
