//! Row-major matrix views over `Complex64` buffers.
//!
//! The complex kernels only ever see row-major operands, so these views
//! carry no order marker. Shape validation is shared with the real views.

use num_complex::Complex64;

use crate::error::Result;
use crate::layout::{Order, RowMajor};
use crate::view::validate_matrix;

/// Read-only row-major complex matrix view.
#[derive(Debug, Clone, Copy)]
pub struct ZMatRef<'a> {
    data: &'a [Complex64],
    rows: usize,
    cols: usize,
    ld: usize,
}

impl<'a> ZMatRef<'a> {
    pub fn try_new(data: &'a [Complex64], rows: usize, cols: usize, ld: usize) -> Result<Self> {
        validate_matrix::<RowMajor>(data.len(), rows, cols, ld)?;
        Ok(Self {
            data,
            rows,
            cols,
            ld,
        })
    }

    /// # Panics
    /// If `ld` is too small or the buffer cannot hold the view.
    pub fn new(data: &'a [Complex64], rows: usize, cols: usize, ld: usize) -> Self {
        match Self::try_new(data, rows, cols, ld) {
            Ok(view) => view,
            Err(e) => panic!("ZMatRef: {e}"),
        }
    }

    pub fn from_slice(data: &'a [Complex64], rows: usize, cols: usize) -> Self {
        Self::new(data, rows, cols, cols)
    }

    #[inline(always)]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline(always)]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline(always)]
    pub fn at(&self, i: usize, j: usize) -> Complex64 {
        debug_assert!(i < self.rows && j < self.cols);
        self.data[RowMajor::index(i, j, self.ld)]
    }

    /// Row `i` as a contiguous slice.
    #[inline]
    pub fn row(&self, i: usize) -> &'a [Complex64] {
        if self.cols == 0 {
            return &[];
        }
        let start = i * self.ld;
        &self.data[start..start + self.cols]
    }
}

/// Mutable row-major complex matrix view.
#[derive(Debug)]
pub struct ZMatMut<'a> {
    data: &'a mut [Complex64],
    rows: usize,
    cols: usize,
    ld: usize,
}

impl<'a> ZMatMut<'a> {
    pub fn try_new(
        data: &'a mut [Complex64],
        rows: usize,
        cols: usize,
        ld: usize,
    ) -> Result<Self> {
        validate_matrix::<RowMajor>(data.len(), rows, cols, ld)?;
        Ok(Self {
            data,
            rows,
            cols,
            ld,
        })
    }

    /// # Panics
    /// If `ld` is too small or the buffer cannot hold the view.
    pub fn new(data: &'a mut [Complex64], rows: usize, cols: usize, ld: usize) -> Self {
        match Self::try_new(data, rows, cols, ld) {
            Ok(view) => view,
            Err(e) => panic!("ZMatMut: {e}"),
        }
    }

    pub fn from_slice(data: &'a mut [Complex64], rows: usize, cols: usize) -> Self {
        Self::new(data, rows, cols, cols)
    }

    #[inline(always)]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline(always)]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline(always)]
    pub fn at(&self, i: usize, j: usize) -> Complex64 {
        debug_assert!(i < self.rows && j < self.cols);
        self.data[RowMajor::index(i, j, self.ld)]
    }

    #[inline(always)]
    pub fn set(&mut self, i: usize, j: usize, value: Complex64) {
        debug_assert!(i < self.rows && j < self.cols);
        self.data[RowMajor::index(i, j, self.ld)] = value;
    }

    #[inline]
    pub fn rb(&self) -> ZMatRef<'_> {
        ZMatRef {
            data: &*self.data,
            rows: self.rows,
            cols: self.cols,
            ld: self.ld,
        }
    }

    /// Row `i` as a contiguous mutable slice.
    #[inline]
    pub fn row_mut(&mut self, i: usize) -> &mut [Complex64] {
        if self.cols == 0 {
            return &mut [];
        }
        let start = i * self.ld;
        &mut self.data[start..start + self.cols]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_padded_rows() {
        let data: Vec<Complex64> =
            (0..6).map(|k| Complex64::new(k as f64, -(k as f64))).collect();
        let a = ZMatRef::new(&data, 2, 2, 3);
        assert_eq!(a.at(1, 0), Complex64::new(3.0, -3.0));
        assert_eq!(a.row(1).len(), 2);
    }

    #[test]
    fn test_rejects_short_buffer() {
        let mut data = [Complex64::new(0.0, 0.0); 5];
        assert!(matches!(
            ZMatMut::try_new(&mut data, 2, 3, 3),
            Err(Error::BufferTooSmall { .. })
        ));
    }
}
