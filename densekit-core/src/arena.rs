//! Local heap: a bump arena for kernel scratch memory.
//!
//! Factorization utilities need temporaries (the eliminated block of a
//! Schur complement, the work copy of an eigenproblem). They draw them from
//! a caller-owned `LocalHeap` sized once up front, so the hot path never
//! reaches the global allocator.
//!
//! # Design
//!
//! - One 64-byte aligned allocation, made at construction
//! - Every slice handed out starts on a 64-byte boundary
//! - `alloc` takes `&self` and returns disjoint `&mut [f64]` regions, so
//!   several temporaries can be live at once
//! - Rewinding (`reset`, `release`, `scope`) takes `&mut self`, which the
//!   borrow checker only grants once every handed-out slice is dead
//!
//! # Example
//!
//! ```
//! use densekit_core::LocalHeap;
//!
//! let mut heap = LocalHeap::with_capacity(1024);
//! {
//!     let a = heap.alloc(100).unwrap();
//!     let b = heap.alloc(100).unwrap();
//!     a.fill(1.0);
//!     b.fill(2.0);
//! }
//! heap.reset();
//! assert_eq!(heap.used(), 0);
//! ```

use std::alloc;
use std::cell::Cell;
use std::ptr::NonNull;

use crate::error::{Error, Result};

/// Alignment for all heap allocations, in bytes (one cache line).
const ALIGNMENT: usize = 64;
/// Alignment expressed in f64 elements.
const ALIGN_ELEMS: usize = ALIGNMENT / std::mem::size_of::<f64>();

/// Position in a [`LocalHeap`] to rewind to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeapMark(usize);

/// Bump arena of `f64` scratch memory.
///
/// `LocalHeap` is `Send` but not `Sync`: give each worker thread its own.
pub struct LocalHeap {
    ptr: NonNull<f64>,
    capacity: usize,
    used: Cell<usize>,
    layout: alloc::Layout,
}

// SAFETY: the heap exclusively owns its allocation; moving it to another
// thread moves that ownership. `Cell` keeps it `!Sync`.
unsafe impl Send for LocalHeap {}

impl LocalHeap {
    /// Arena holding `capacity` f64 elements, zero-initialized.
    pub fn with_capacity(capacity: usize) -> Self {
        let byte_len = capacity * std::mem::size_of::<f64>();
        let layout = match alloc::Layout::from_size_align(byte_len.max(1), ALIGNMENT) {
            Ok(layout) => layout,
            Err(_) => panic!("LocalHeap: capacity {capacity} overflows the address space"),
        };

        let ptr = if byte_len == 0 {
            NonNull::dangling()
        } else {
            // SAFETY: layout has non-zero size.
            let p = unsafe { alloc::alloc_zeroed(layout) } as *mut f64;
            match NonNull::new(p) {
                Some(p) => p,
                None => alloc::handle_alloc_error(layout),
            }
        };

        Self {
            ptr,
            capacity,
            used: Cell::new(0),
            layout,
        }
    }

    /// Total capacity in elements.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Elements consumed so far, alignment padding included.
    #[inline]
    pub fn used(&self) -> usize {
        self.used.get()
    }

    /// Elements still available (before alignment padding).
    #[inline]
    pub fn available(&self) -> usize {
        self.capacity - self.used.get()
    }

    /// Hand out `len` elements. Contents are whatever the previous user of
    /// that region left behind (zero on first use).
    #[allow(clippy::mut_from_ref)] // Disjoint regions; rewinding requires &mut self.
    pub fn alloc(&self, len: usize) -> Result<&mut [f64]> {
        // Empty requests neither pad nor fail.
        if len == 0 {
            return Ok(&mut []);
        }
        let start = self.used.get().next_multiple_of(ALIGN_ELEMS);
        let end = start.checked_add(len).filter(|&end| end <= self.capacity);
        let Some(end) = end else {
            return Err(Error::HeapExhausted {
                requested: len,
                available: self.capacity.saturating_sub(start),
            });
        };
        self.used.set(end);
        // SAFETY: [start, end) lies inside the allocation, was initialized by
        // alloc_zeroed, and no other live slice overlaps it: `used` only grows
        // while shared borrows exist.
        Ok(unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr().add(start), len) })
    }

    /// Like [`alloc`](Self::alloc), with the slice cleared to zero.
    #[allow(clippy::mut_from_ref)]
    pub fn alloc_zeroed(&self, len: usize) -> Result<&mut [f64]> {
        let buf = self.alloc(len)?;
        buf.fill(0.0);
        Ok(buf)
    }

    /// Current position, for a later [`release`](Self::release).
    #[inline]
    pub fn mark(&self) -> HeapMark {
        HeapMark(self.used.get())
    }

    /// Rewind to `mark`, freeing everything allocated after it.
    #[inline]
    pub fn release(&mut self, mark: HeapMark) {
        debug_assert!(mark.0 <= self.used.get());
        self.used.set(mark.0);
    }

    /// Free everything.
    #[inline]
    pub fn reset(&mut self) {
        self.used.set(0);
    }

    /// Run `f` and free whatever it allocated.
    pub fn scope<R>(&mut self, f: impl FnOnce(&LocalHeap) -> R) -> R {
        let mark = self.mark();
        let out = f(self);
        self.release(mark);
        out
    }
}

impl Drop for LocalHeap {
    fn drop(&mut self) {
        if self.capacity > 0 {
            // SAFETY: allocated in `with_capacity` with this exact layout.
            unsafe { alloc::dealloc(self.ptr.as_ptr() as *mut u8, self.layout) };
        }
    }
}

impl std::fmt::Debug for LocalHeap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalHeap")
            .field("capacity", &self.capacity)
            .field("used", &self.used.get())
            .finish()
    }
}
