use std::alloc::Layout;
use std::error::Error;
use std::fmt;

/// Errors reported by buffer allocation and checked element access.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VecError {
    /// Checked access at an index not below the logical size.
    OutOfRange {
        index: usize,
        len: usize,
    },
    /// The requested element count does not fit in the address space.
    CapacityOverflow {
        requested: usize,
    },
    /// The global allocator could not satisfy the request.
    AllocFailed {
        layout: Layout,
    },
}

impl VecError {
    /// Turns the error into the standard library's reaction to it: allocation failures go to
    /// `handle_alloc_error`, everything else panics.
    pub fn fail(self) -> ! {
        match self {
            VecError::AllocFailed { layout } => std::alloc::handle_alloc_error(layout),
            other => panic!("{}", other),
        }
    }
}

impl fmt::Display for VecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VecError::OutOfRange { index, len } => {
                write!(f, "index {} is out of range for length {}", index, len)
            }
            VecError::CapacityOverflow { requested } => {
                write!(f, "capacity overflow: {} items requested", requested)
            }
            VecError::AllocFailed { layout } => write!(
                f,
                "failed to allocate {} bytes aligned to {}",
                layout.size(),
                layout.align()
            ),
        }
    }
}

impl Error for VecError {}
