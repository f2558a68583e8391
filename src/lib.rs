#[macro_use]
mod logging;
mod error;
mod buffer;
mod vector;
mod traits;

pub use error::VecError;
pub use buffer::ArrayBuf;
pub use vector::{SimpleVec, ReserveProxy, reserve};

/// Creates a `SimpleVec` from a list of items, or from `value; count` copies.
#[macro_export]
macro_rules! simple_vec {
    () => (
        $crate::SimpleVec::new()
    );
    ($value:expr; $count:expr) => (
        $crate::SimpleVec::from_elem($count, &$value)
    );
    ($($item:expr),+ $(,)?) => (
        $crate::SimpleVec::from([$($item),+])
    );
}

#[cfg(test)]
pub mod dropflag;

#[cfg(test)]
mod properties;
