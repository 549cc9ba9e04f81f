//! Bit masks selecting index subsets.
//!
//! Kernels only see the [`Mask`] trait. [`BitArray`] is the stock
//! implementation: a fixed-size bit vector packed into 64-bit words, inline
//! for masks up to 256 bits.

use smallvec::SmallVec;

/// Read-only index mask consumed by the masked kernels and the Schur
/// complement.
pub trait Mask {
    /// Whether index `i` is selected. `i` must be below [`Mask::len`].
    fn test(&self, i: usize) -> bool;

    /// Number of indices the mask covers.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of selected indices.
    fn count_ones(&self) -> usize {
        (0..self.len()).filter(|&i| self.test(i)).count()
    }
}

const WORD_BITS: usize = 64;

/// Fixed-size bit vector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitArray {
    words: SmallVec<[u64; 4]>,
    len: usize,
}

impl BitArray {
    /// A mask of `len` bits, all clear.
    pub fn new(len: usize) -> Self {
        let mut words = SmallVec::new();
        words.resize(len.div_ceil(WORD_BITS), 0);
        Self { words, len }
    }

    /// A mask of `len` bits with exactly `indices` set.
    pub fn from_indices(len: usize, indices: &[usize]) -> Self {
        let mut mask = Self::new(len);
        for &i in indices {
            mask.set(i);
        }
        mask
    }

    #[inline]
    pub fn set(&mut self, i: usize) {
        debug_assert!(i < self.len, "bit {} out of range for mask of {}", i, self.len);
        self.words[i / WORD_BITS] |= 1u64 << (i % WORD_BITS);
    }

    #[inline]
    pub fn clear(&mut self, i: usize) {
        debug_assert!(i < self.len, "bit {} out of range for mask of {}", i, self.len);
        self.words[i / WORD_BITS] &= !(1u64 << (i % WORD_BITS));
    }

    /// Set every bit.
    pub fn set_all(&mut self) {
        self.words.iter_mut().for_each(|w| *w = u64::MAX);
        self.mask_tail();
    }

    /// Clear every bit.
    pub fn clear_all(&mut self) {
        self.words.iter_mut().for_each(|w| *w = 0);
    }

    /// Flip every bit.
    pub fn invert(&mut self) {
        self.words.iter_mut().for_each(|w| *w = !*w);
        self.mask_tail();
    }

    // Keep bits past `len` clear so popcounts stay exact.
    fn mask_tail(&mut self) {
        let rem = self.len % WORD_BITS;
        if rem != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= (1u64 << rem) - 1;
            }
        }
    }
}

impl Mask for BitArray {
    #[inline(always)]
    fn test(&self, i: usize) -> bool {
        debug_assert!(i < self.len, "bit {} out of range for mask of {}", i, self.len);
        (self.words[i / WORD_BITS] >> (i % WORD_BITS)) & 1 != 0
    }

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }
}

impl<M: Mask + ?Sized> Mask for &M {
    #[inline(always)]
    fn test(&self, i: usize) -> bool {
        (**self).test(i)
    }

    #[inline]
    fn len(&self) -> usize {
        (**self).len()
    }

    fn count_ones(&self) -> usize {
        (**self).count_ones()
    }
}

/// A `bool` slice is a mask too.
impl Mask for [bool] {
    #[inline(always)]
    fn test(&self, i: usize) -> bool {
        self[i]
    }

    #[inline]
    fn len(&self) -> usize {
        <[bool]>::len(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_clear_test() {
        let mut m = BitArray::new(70);
        m.set(3);
        m.set(64);
        m.set(69);
        assert!(m.test(3) && m.test(64) && m.test(69));
        assert!(!m.test(4));
        m.clear(64);
        assert!(!m.test(64));
        assert_eq!(m.count_ones(), 2);
    }

    #[test]
    fn test_set_all_respects_len() {
        let mut m = BitArray::new(70);
        m.set_all();
        assert_eq!(m.count_ones(), 70);
        m.invert();
        assert_eq!(m.count_ones(), 0);
        m.set(5);
        m.invert();
        assert_eq!(m.count_ones(), 69);
        m.clear_all();
        assert_eq!(m.count_ones(), 0);
    }

    #[test]
    fn test_from_indices_and_bool_slice() {
        let m = BitArray::from_indices(8, &[1, 3, 5]);
        let b = [false, true, false, true, false, true, false, false];
        for i in 0..8 {
            assert_eq!(m.test(i), b[..].test(i));
        }
        assert_eq!(Mask::count_ones(&b[..]), 3);
        assert_eq!(Mask::len(&m), 8);
    }

    #[test]
    fn test_empty_mask() {
        let m = BitArray::new(0);
        assert!(Mask::is_empty(&m));
        assert_eq!(m.count_ones(), 0);
    }
}
