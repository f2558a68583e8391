use crate::{ArrayBuf, SimpleVec};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;
use std::mem::ManuallyDrop;

impl<T: PartialEq> PartialEq for SimpleVec<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: Eq> Eq for SimpleVec<T> {}

/// Lexicographic order built on element `<` alone: pairs where neither side is less are
/// skipped, so incomparable items (`NaN`) do not make the whole comparison fail.
impl<T: PartialOrd> PartialOrd for SimpleVec<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }

    fn lt(&self, other: &Self) -> bool {
        for (a, b) in self.iter().zip(other.iter()) {
            if a < b {
                return true;
            }
            if b < a {
                return false;
            }
        }
        self.len() < other.len()
    }

    fn le(&self, other: &Self) -> bool {
        self.lt(other) || self.eq(other)
    }

    fn gt(&self, other: &Self) -> bool {
        other.lt(self)
    }

    fn ge(&self, other: &Self) -> bool {
        !self.lt(other)
    }
}

impl<T: Ord> Ord for SimpleVec<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T: Hash> Hash for SimpleVec<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state)
    }
}

impl<T> std::fmt::Debug for SimpleVec<T> where T: std::fmt::Debug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_list();
        for item in self.iter() {
            list.entry(item);
        }
        list.finish()
    }
}

impl<T, const N: usize> From<[T; N]> for SimpleVec<T> {
    /// Moves the items in order; capacity is exactly `N`.
    fn from(items: [T; N]) -> Self {
        let items = ManuallyDrop::new(items);
        let source = items.as_ptr();
        let buf = ArrayBuf::from_fn(N, |i| unsafe { std::ptr::read(source.add(i)) });
        SimpleVec::from_buf(buf, N)
    }
}

impl<T: Clone> From<&[T]> for SimpleVec<T> {
    fn from(items: &[T]) -> Self {
        SimpleVec::from_slice(items)
    }
}

impl<T: Default> FromIterator<T> for SimpleVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut vec = SimpleVec::new();
        vec.extend(iter);
        vec
    }
}

impl<T: Default> Extend<T> for SimpleVec<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        self.reserve(self.len().saturating_add(lower));
        for item in iter {
            self.push_back(item);
        }
    }
}
