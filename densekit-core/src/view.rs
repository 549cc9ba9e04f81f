//! Non-owning dense views over caller buffers.
//!
//! Vectors come in two flavors: flat (`&[f64]`, unit stride) and
//! [`SliceVec`] / [`SliceVecMut`] (arbitrary stride). Matrices come as
//! *checked* views ([`MatRef`], [`MatMut`]) that know their shape and were
//! validated against the buffer once at construction, and *bare* views
//! ([`BareMat`], [`BareMatMut`]) that only know their leading dimension.
//! Kernels take bare views plus explicit dimensions.
//!
//! Every view borrows; nothing here copies element data. [`MatRef::trans`]
//! and friends swap the row/column roles and the storage order marker
//! without touching memory.

use std::marker::PhantomData;

use crate::error::{Error, Result};
use crate::layout::{Order, RowMajor};

#[inline(always)]
fn strided_extent(count: usize, stride: usize) -> usize {
    if count == 0 {
        0
    } else {
        (count - 1) * stride + 1
    }
}

pub(crate) fn validate_matrix<O: Order>(len: usize, rows: usize, cols: usize, ld: usize) -> Result<()> {
    if rows > 0 && cols > 0 {
        let required = O::inner(rows, cols);
        if ld < required {
            return Err(Error::LeadingDimension { ld, required });
        }
    }
    if len < O::extent(rows, cols, ld) {
        return Err(Error::BufferTooSmall {
            len,
            rows,
            cols,
            ld,
        });
    }
    Ok(())
}

// ============================================================================
// Strided vectors
// ============================================================================

/// Read-only strided vector view: entry `i` is `data[i * stride]`.
#[derive(Debug, Clone, Copy)]
pub struct SliceVec<'a> {
    data: &'a [f64],
    len: usize,
    stride: usize,
}

impl<'a> SliceVec<'a> {
    /// Strided view over `data`, validated against the buffer length.
    pub fn try_new(data: &'a [f64], len: usize, stride: usize) -> Result<Self> {
        if data.len() < strided_extent(len, stride) {
            return Err(Error::StrideOutOfBounds {
                len: data.len(),
                count: len,
                stride,
            });
        }
        Ok(Self { data, len, stride })
    }

    /// Strided view over `data`.
    ///
    /// # Panics
    /// If `(len - 1) * stride` is out of bounds for `data`.
    pub fn new(data: &'a [f64], len: usize, stride: usize) -> Self {
        assert!(
            data.len() >= strided_extent(len, stride),
            "SliceVec: buffer of {} elements cannot hold {} entries with stride {}",
            data.len(),
            len,
            stride
        );
        Self { data, len, stride }
    }

    /// Unit-stride view over the whole slice.
    #[inline]
    pub fn from_flat(data: &'a [f64]) -> Self {
        Self {
            data,
            len: data.len(),
            stride: 1,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline(always)]
    pub fn get(&self, i: usize) -> f64 {
        self.data[i * self.stride]
    }

    /// The contiguous slice behind a unit-stride view.
    #[inline]
    pub fn as_flat(&self) -> Option<&'a [f64]> {
        (self.stride == 1).then(|| &self.data[..self.len])
    }

    /// Sub-vector of `len` entries starting at entry `start`.
    pub fn range(self, start: usize, len: usize) -> Self {
        debug_assert!(start + len <= self.len);
        let offset = (start * self.stride).min(self.data.len());
        Self {
            data: &self.data[offset..],
            len,
            stride: self.stride,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + 'a {
        let data = self.data;
        let stride = self.stride;
        (0..self.len).map(move |i| data[i * stride])
    }
}

impl<'a> From<&'a [f64]> for SliceVec<'a> {
    fn from(data: &'a [f64]) -> Self {
        Self::from_flat(data)
    }
}

/// Mutable strided vector view.
#[derive(Debug)]
pub struct SliceVecMut<'a> {
    data: &'a mut [f64],
    len: usize,
    stride: usize,
}

impl<'a> SliceVecMut<'a> {
    pub fn try_new(data: &'a mut [f64], len: usize, stride: usize) -> Result<Self> {
        if data.len() < strided_extent(len, stride) {
            return Err(Error::StrideOutOfBounds {
                len: data.len(),
                count: len,
                stride,
            });
        }
        Ok(Self { data, len, stride })
    }

    /// # Panics
    /// If `(len - 1) * stride` is out of bounds for `data`.
    pub fn new(data: &'a mut [f64], len: usize, stride: usize) -> Self {
        assert!(
            data.len() >= strided_extent(len, stride),
            "SliceVecMut: buffer of {} elements cannot hold {} entries with stride {}",
            data.len(),
            len,
            stride
        );
        Self { data, len, stride }
    }

    #[inline]
    pub fn from_flat(data: &'a mut [f64]) -> Self {
        let len = data.len();
        Self {
            data,
            len,
            stride: 1,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline(always)]
    pub fn get(&self, i: usize) -> f64 {
        self.data[i * self.stride]
    }

    #[inline(always)]
    pub fn get_mut(&mut self, i: usize) -> &mut f64 {
        &mut self.data[i * self.stride]
    }

    #[inline(always)]
    pub fn set(&mut self, i: usize, value: f64) {
        self.data[i * self.stride] = value;
    }

    #[inline]
    pub fn rb(&self) -> SliceVec<'_> {
        SliceVec {
            data: &*self.data,
            len: self.len,
            stride: self.stride,
        }
    }

    #[inline]
    pub fn rb_mut(&mut self) -> SliceVecMut<'_> {
        SliceVecMut {
            data: &mut *self.data,
            len: self.len,
            stride: self.stride,
        }
    }

    pub fn as_flat_mut(&mut self) -> Option<&mut [f64]> {
        if self.stride == 1 {
            Some(&mut self.data[..self.len])
        } else {
            None
        }
    }
}

impl<'a> From<&'a mut [f64]> for SliceVecMut<'a> {
    fn from(data: &'a mut [f64]) -> Self {
        Self::from_flat(data)
    }
}

// ============================================================================
// Bare matrices: data + leading dimension, shape supplied by the caller
// ============================================================================

/// Read-only matrix view without shape metadata.
///
/// The caller guarantees every `(i, j)` it touches is inside the buffer.
#[derive(Debug)]
pub struct BareMat<'a, O: Order = RowMajor> {
    data: &'a [f64],
    ld: usize,
    _order: PhantomData<O>,
}

impl<O: Order> Clone for BareMat<'_, O> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<O: Order> Copy for BareMat<'_, O> {}

impl<'a, O: Order> BareMat<'a, O> {
    #[inline]
    pub fn new(data: &'a [f64], ld: usize) -> Self {
        Self {
            data,
            ld,
            _order: PhantomData,
        }
    }

    #[inline(always)]
    pub fn ld(&self) -> usize {
        self.ld
    }

    #[inline(always)]
    pub fn data(&self) -> &'a [f64] {
        self.data
    }

    #[inline(always)]
    pub fn at(&self, i: usize, j: usize) -> f64 {
        self.data[O::index(i, j, self.ld)]
    }

    /// The bare view starting at element `(i, j)`.
    #[inline]
    pub fn offset(self, i: usize, j: usize) -> Self {
        let start = O::index(i, j, self.ld).min(self.data.len());
        Self::new(&self.data[start..], self.ld)
    }

    #[inline]
    pub fn trans(self) -> BareMat<'a, O::Trans> {
        BareMat::new(self.data, self.ld)
    }

    /// Attach a shape. Extent is checked in debug builds only.
    #[inline]
    pub fn with_dims(self, rows: usize, cols: usize) -> MatRef<'a, O> {
        debug_assert!(validate_matrix::<O>(self.data.len(), rows, cols, self.ld).is_ok());
        MatRef::from_parts(self.data, rows, cols, self.ld)
    }
}

impl<'a> BareMat<'a, RowMajor> {
    /// `len` contiguous entries of row `i`. Empty rows never touch the
    /// buffer, so a zero-width view may sit past its end.
    #[inline(always)]
    pub fn row(&self, i: usize, len: usize) -> &'a [f64] {
        if len == 0 {
            return &[];
        }
        let start = i * self.ld;
        &self.data[start..start + len]
    }
}

/// Mutable matrix view without shape metadata.
#[derive(Debug)]
pub struct BareMatMut<'a, O: Order = RowMajor> {
    data: &'a mut [f64],
    ld: usize,
    _order: PhantomData<O>,
}

impl<'a, O: Order> BareMatMut<'a, O> {
    #[inline]
    pub fn new(data: &'a mut [f64], ld: usize) -> Self {
        Self {
            data,
            ld,
            _order: PhantomData,
        }
    }

    #[inline(always)]
    pub fn ld(&self) -> usize {
        self.ld
    }

    #[inline(always)]
    pub fn at(&self, i: usize, j: usize) -> f64 {
        self.data[O::index(i, j, self.ld)]
    }

    #[inline(always)]
    pub fn at_mut(&mut self, i: usize, j: usize) -> &mut f64 {
        &mut self.data[O::index(i, j, self.ld)]
    }

    #[inline(always)]
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        self.data[O::index(i, j, self.ld)] = value;
    }

    #[inline]
    pub fn rb(&self) -> BareMat<'_, O> {
        BareMat::new(&*self.data, self.ld)
    }

    #[inline]
    pub fn rb_mut(&mut self) -> BareMatMut<'_, O> {
        BareMatMut::new(&mut *self.data, self.ld)
    }

    #[inline]
    pub fn offset_mut(self, i: usize, j: usize) -> Self {
        let ld = self.ld;
        let data = self.data;
        let start = O::index(i, j, ld).min(data.len());
        Self::new(&mut data[start..], ld)
    }

    #[inline]
    pub fn trans(self) -> BareMatMut<'a, O::Trans> {
        BareMatMut::new(self.data, self.ld)
    }

    #[inline]
    pub fn with_dims(self, rows: usize, cols: usize) -> MatMut<'a, O> {
        debug_assert!(validate_matrix::<O>(self.data.len(), rows, cols, self.ld).is_ok());
        MatMut::from_parts(self.data, rows, cols, self.ld)
    }
}

impl<'a> BareMatMut<'a, RowMajor> {
    #[inline(always)]
    pub fn row_mut(&mut self, i: usize, len: usize) -> &mut [f64] {
        if len == 0 {
            return &mut [];
        }
        let start = i * self.ld;
        &mut self.data[start..start + len]
    }
}

// ============================================================================
// Checked matrices
// ============================================================================

/// Read-only matrix view with shape, validated once at construction.
#[derive(Debug)]
pub struct MatRef<'a, O: Order = RowMajor> {
    data: &'a [f64],
    rows: usize,
    cols: usize,
    ld: usize,
    _order: PhantomData<O>,
}

impl<O: Order> Clone for MatRef<'_, O> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<O: Order> Copy for MatRef<'_, O> {}

impl<'a, O: Order> MatRef<'a, O> {
    #[inline(always)]
    fn from_parts(data: &'a [f64], rows: usize, cols: usize, ld: usize) -> Self {
        Self {
            data,
            rows,
            cols,
            ld,
            _order: PhantomData,
        }
    }

    /// Checked view of a `rows x cols` matrix with leading dimension `ld`.
    pub fn try_new(data: &'a [f64], rows: usize, cols: usize, ld: usize) -> Result<Self> {
        validate_matrix::<O>(data.len(), rows, cols, ld)?;
        Ok(Self::from_parts(data, rows, cols, ld))
    }

    /// # Panics
    /// If `ld` is too small or the buffer cannot hold the view.
    pub fn new(data: &'a [f64], rows: usize, cols: usize, ld: usize) -> Self {
        if let Err(e) = validate_matrix::<O>(data.len(), rows, cols, ld) {
            panic!("MatRef: {e}");
        }
        Self::from_parts(data, rows, cols, ld)
    }

    /// Densely packed view (`ld` equal to the contiguous dimension).
    pub fn from_slice(data: &'a [f64], rows: usize, cols: usize) -> Self {
        Self::new(data, rows, cols, O::inner(rows, cols))
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
    pub fn ld(&self) -> usize {
        self.ld
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    #[inline(always)]
    pub fn data(&self) -> &'a [f64] {
        self.data
    }

    #[inline(always)]
    pub fn at(&self, i: usize, j: usize) -> f64 {
        debug_assert!(i < self.rows && j < self.cols);
        self.data[O::index(i, j, self.ld)]
    }

    #[inline(always)]
    pub fn bare(self) -> BareMat<'a, O> {
        BareMat::new(self.data, self.ld)
    }

    /// Logical transpose: same memory, swapped shape and order.
    #[inline(always)]
    pub fn trans(self) -> MatRef<'a, O::Trans> {
        MatRef::from_parts(self.data, self.cols, self.rows, self.ld)
    }

    /// `nrows x ncols` sub-matrix starting at `(r0, c0)`.
    pub fn block(self, r0: usize, c0: usize, nrows: usize, ncols: usize) -> Self {
        debug_assert!(r0 + nrows <= self.rows && c0 + ncols <= self.cols);
        let start = O::index(r0, c0, self.ld).min(self.data.len());
        Self::from_parts(&self.data[start..], nrows, ncols, self.ld)
    }

    pub fn sub_rows(self, r0: usize, nrows: usize) -> Self {
        let cols = self.cols;
        self.block(r0, 0, nrows, cols)
    }

    pub fn sub_cols(self, c0: usize, ncols: usize) -> Self {
        let rows = self.rows;
        self.block(0, c0, rows, ncols)
    }

    /// Row `i` as a strided vector.
    pub fn row(self, i: usize) -> SliceVec<'a> {
        let start = O::index(i, 0, self.ld).min(self.data.len());
        SliceVec::new(&self.data[start..], self.cols, O::index(0, 1, self.ld))
    }

    /// Column `j` as a strided vector.
    pub fn col(self, j: usize) -> SliceVec<'a> {
        self.trans().row(j)
    }

    /// Strided view of the main diagonal.
    pub fn diag(self) -> SliceVec<'a> {
        let n = self.rows.min(self.cols);
        SliceVec::new(self.data, n, self.ld + 1)
    }
}

/// Mutable matrix view with shape.
#[derive(Debug)]
pub struct MatMut<'a, O: Order = RowMajor> {
    data: &'a mut [f64],
    rows: usize,
    cols: usize,
    ld: usize,
    _order: PhantomData<O>,
}

impl<'a, O: Order> MatMut<'a, O> {
    #[inline(always)]
    fn from_parts(data: &'a mut [f64], rows: usize, cols: usize, ld: usize) -> Self {
        Self {
            data,
            rows,
            cols,
            ld,
            _order: PhantomData,
        }
    }

    pub fn try_new(data: &'a mut [f64], rows: usize, cols: usize, ld: usize) -> Result<Self> {
        validate_matrix::<O>(data.len(), rows, cols, ld)?;
        Ok(Self::from_parts(data, rows, cols, ld))
    }

    /// # Panics
    /// If `ld` is too small or the buffer cannot hold the view.
    pub fn new(data: &'a mut [f64], rows: usize, cols: usize, ld: usize) -> Self {
        if let Err(e) = validate_matrix::<O>(data.len(), rows, cols, ld) {
            panic!("MatMut: {e}");
        }
        Self::from_parts(data, rows, cols, ld)
    }

    pub fn from_slice(data: &'a mut [f64], rows: usize, cols: usize) -> Self {
        Self::new(data, rows, cols, O::inner(rows, cols))
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
    pub fn ld(&self) -> usize {
        self.ld
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    #[inline(always)]
    pub fn at(&self, i: usize, j: usize) -> f64 {
        debug_assert!(i < self.rows && j < self.cols);
        self.data[O::index(i, j, self.ld)]
    }

    #[inline(always)]
    pub fn at_mut(&mut self, i: usize, j: usize) -> &mut f64 {
        debug_assert!(i < self.rows && j < self.cols);
        &mut self.data[O::index(i, j, self.ld)]
    }

    #[inline(always)]
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        *self.at_mut(i, j) = value;
    }

    #[inline]
    pub fn rb(&self) -> MatRef<'_, O> {
        MatRef::from_parts(&*self.data, self.rows, self.cols, self.ld)
    }

    #[inline]
    pub fn rb_mut(&mut self) -> MatMut<'_, O> {
        MatMut::from_parts(&mut *self.data, self.rows, self.cols, self.ld)
    }

    #[inline]
    pub fn into_ref(self) -> MatRef<'a, O> {
        MatRef::from_parts(self.data, self.rows, self.cols, self.ld)
    }

    #[inline(always)]
    pub fn bare_mut(self) -> BareMatMut<'a, O> {
        BareMatMut::new(self.data, self.ld)
    }

    #[inline(always)]
    pub fn trans(self) -> MatMut<'a, O::Trans> {
        MatMut::from_parts(self.data, self.cols, self.rows, self.ld)
    }

    pub fn block_mut(self, r0: usize, c0: usize, nrows: usize, ncols: usize) -> Self {
        debug_assert!(r0 + nrows <= self.rows && c0 + ncols <= self.cols);
        let ld = self.ld;
        let data = self.data;
        let start = O::index(r0, c0, ld).min(data.len());
        Self::from_parts(&mut data[start..], nrows, ncols, ld)
    }

    pub fn sub_rows_mut(self, r0: usize, nrows: usize) -> Self {
        let cols = self.cols;
        self.block_mut(r0, 0, nrows, cols)
    }

    pub fn sub_cols_mut(self, c0: usize, ncols: usize) -> Self {
        let rows = self.rows;
        self.block_mut(0, c0, rows, ncols)
    }

    pub fn row_mut(&mut self, i: usize) -> SliceVecMut<'_> {
        let start = O::index(i, 0, self.ld).min(self.data.len());
        let stride = O::index(0, 1, self.ld);
        SliceVecMut::new(&mut self.data[start..], self.cols, stride)
    }

    pub fn col_mut(&mut self, j: usize) -> SliceVecMut<'_> {
        let start = O::index(0, j, self.ld).min(self.data.len());
        let stride = O::index(1, 0, self.ld);
        SliceVecMut::new(&mut self.data[start..], self.rows, stride)
    }

    /// Set every element of the view (not the gaps between rows).
    pub fn fill(&mut self, value: f64) {
        for i in 0..self.rows {
            for j in 0..self.cols {
                self.data[O::index(i, j, self.ld)] = value;
            }
        }
    }
}
