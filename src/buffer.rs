use crate::VecError;
use std::alloc::{self, Layout};
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};
use std::ptr::{self, null, NonNull};

/// Sole owner of one contiguous heap allocation holding `len` initialized items.
///
/// The item count is fixed when the buffer is created. Every slot holds a live `T` for the whole
/// lifetime of the buffer, and all of them are dropped together with the allocation. The buffer
/// can be moved out of (`take`) or given up (`release`), but never duplicated.
pub struct ArrayBuf<T> {
    _ptr: *const T,
    _len: usize,
    _marker: PhantomData<T>,
}

unsafe impl<T: Send> Send for ArrayBuf<T> {}
unsafe impl<T: Sync> Sync for ArrayBuf<T> {}

impl<T> ArrayBuf<T> {
    /// Buffer that holds no allocation.
    pub const fn empty() -> ArrayBuf<T> {
        ArrayBuf {
            _ptr: null(),
            _len: 0,
            _marker: PhantomData,
        }
    }

    /// Allocates `len` slots and initializes slot `i` with `init(i)`, in order.
    ///
    /// Zero `len` allocates nothing. If `init` panics, the items written so far are dropped and
    /// the allocation is returned before the panic continues.
    pub fn try_from_fn(len: usize, mut init: impl FnMut(usize) -> T) -> Result<ArrayBuf<T>, VecError> {
        if len == 0 {
            return Ok(ArrayBuf::empty());
        }
        let layout = Layout::array::<T>(len).map_err(|_| VecError::CapacityOverflow { requested: len })?;
        let ptr = if layout.size() == 0 {
            NonNull::<T>::dangling().as_ptr()
        } else {
            let raw = unsafe { alloc::alloc(layout) } as *mut T;
            if raw.is_null() {
                return Err(VecError::AllocFailed { layout });
            }
            raw
        };
        trace!("alloc {} items ({} bytes) at {:?}", len, layout.size(), ptr);

        let mut partial = PartialInit { ptr, layout, initialized: 0 };
        while partial.initialized < len {
            let item = init(partial.initialized);
            unsafe { ptr::write(ptr.add(partial.initialized), item) };
            partial.initialized += 1;
        }
        std::mem::forget(partial);

        Ok(ArrayBuf {
            _ptr: ptr,
            _len: len,
            _marker: PhantomData,
        })
    }

    /// Same as `try_from_fn`, but allocation failures are fatal.
    pub fn from_fn(len: usize, init: impl FnMut(usize) -> T) -> ArrayBuf<T> {
        match ArrayBuf::try_from_fn(len, init) {
            Ok(buf) => buf,
            Err(e) => e.fail(),
        }
    }

    /// Adopts a buffer previously given up with `release`.
    ///
    /// # Safety
    ///
    /// `ptr` and `len` must be exactly a pair returned by `ArrayBuf::release` that has not been
    /// adopted since, or a null pointer with zero `len`. For zero-sized `T` any dangling non-null
    /// pointer will do, since there is no memory behind it.
    pub unsafe fn from_raw_parts(ptr: *mut T, len: usize) -> ArrayBuf<T> {
        debug_assert!(!ptr.is_null() || len == 0, "null buffer must have zero len");
        ArrayBuf {
            _ptr: ptr,
            _len: len,
            _marker: PhantomData,
        }
    }

    /// Gives up ownership of the allocation and returns it without dropping anything.
    ///
    /// The buffer is empty afterwards. The caller is responsible for the returned items and
    /// memory, normally by passing them back to `from_raw_parts`.
    #[must_use]
    pub fn release(&mut self) -> (*mut T, usize) {
        let parts = (self._ptr as *mut T, self._len);
        self._ptr = null();
        self._len = 0;
        parts
    }

    /// Moves the allocation out into a new buffer and leaves this one empty.
    pub fn take(&mut self) -> ArrayBuf<T> {
        std::mem::replace(self, ArrayBuf::empty())
    }

    /// Exchanges allocations with `other` without touching any items.
    #[inline(always)]
    pub fn swap(&mut self, other: &mut ArrayBuf<T>) {
        std::mem::swap(self, other);
    }

    /// Number of slots in the allocation.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self._len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self._len == 0
    }

    /// Returns true if the buffer owns heap memory. Zero-sized items never need any, so this is
    /// false for them even when `len() > 0`.
    #[inline(always)]
    pub fn is_allocated(&self) -> bool {
        !self._ptr.is_null() && std::mem::size_of::<T>() != 0
    }

    /// Raw pointer to the first slot, null for an empty buffer. Ownership stays here.
    #[inline(always)]
    pub fn as_ptr(&self) -> *const T {
        self._ptr
    }

    #[inline(always)]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self._ptr as *mut T
    }

    /// # Safety
    ///
    /// `index` must be below `len()`.
    #[inline(always)]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self._len, "get_unchecked: index {} >= len {}", index, self._len);
        &*self._ptr.add(index)
    }

    /// # Safety
    ///
    /// `index` must be below `len()`.
    #[inline(always)]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self._len, "get_unchecked_mut: index {} >= len {}", index, self._len);
        &mut *(self._ptr as *mut T).add(index)
    }

    fn data(&self) -> *mut T {
        if self._ptr.is_null() {
            NonNull::dangling().as_ptr()
        } else {
            self._ptr as *mut T
        }
    }
}

impl<T: Default> ArrayBuf<T> {
    /// Allocates `len` slots filled with `T::default()`.
    pub fn try_new(len: usize) -> Result<ArrayBuf<T>, VecError> {
        ArrayBuf::try_from_fn(len, |_| T::default())
    }

    pub fn new(len: usize) -> ArrayBuf<T> {
        ArrayBuf::from_fn(len, |_| T::default())
    }
}

impl<T> Default for ArrayBuf<T> {
    fn default() -> Self {
        ArrayBuf::empty()
    }
}

impl<T> Deref for ArrayBuf<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        unsafe { std::slice::from_raw_parts(self.data(), self._len) }
    }
}

impl<T> DerefMut for ArrayBuf<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        unsafe { std::slice::from_raw_parts_mut(self.data(), self._len) }
    }
}

impl<T> Drop for ArrayBuf<T> {
    fn drop(&mut self) {
        if self._ptr.is_null() {
            return;
        }
        let (ptr, len) = self.release();
        trace!("free {} items at {:?}", len, ptr);
        unsafe { free_items(ptr, len) };
    }
}

impl<T> std::fmt::Debug for ArrayBuf<T> where T: std::fmt::Debug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Drops `len` items at `ptr` and returns their memory.
unsafe fn free_items<T>(ptr: *mut T, len: usize) {
    ptr::drop_in_place(ptr::slice_from_raw_parts_mut(ptr, len));
    if let Ok(layout) = Layout::array::<T>(len) {
        if layout.size() != 0 {
            alloc::dealloc(ptr as *mut u8, layout);
        }
    }
}

/// Owns a fresh allocation while its prefix is being initialized.
struct PartialInit<T> {
    ptr: *mut T,
    layout: Layout,
    initialized: usize,
}

impl<T> Drop for PartialInit<T> {
    fn drop(&mut self) {
        trace!("abandon allocation at {:?} after {} items", self.ptr, self.initialized);
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.ptr, self.initialized));
            if self.layout.size() != 0 {
                alloc::dealloc(self.ptr as *mut u8, self.layout);
            }
        }
    }
}
