//! Storage orders.
//!
//! A runtime [`Layout`] tag plus the zero-sized [`RowMajor`] / [`ColMajor`]
//! markers that views carry as a type parameter. Kernels are monomorphized
//! over the marker, so the order never becomes a branch in an inner loop.

/// Memory layout tag for matrices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// Row-major (C-style): elements in a row are contiguous.
    #[default]
    RowMajor,
    /// Column-major (Fortran-style): elements in a column are contiguous.
    ColMajor,
}

impl Layout {
    /// Smallest legal leading dimension for an M x N matrix.
    #[inline(always)]
    pub fn leading_dim(self, rows: usize, cols: usize) -> usize {
        match self {
            Layout::RowMajor => cols,
            Layout::ColMajor => rows,
        }
    }
}

/// Compile-time storage order carried by matrix views.
///
/// `Trans` is the order of the transposed view; transposing twice returns
/// the original order.
pub trait Order: Copy + Default + Send + Sync + 'static {
    /// Order of the transposed view over the same memory.
    type Trans: Order<Trans = Self>;

    /// Runtime tag for this order.
    const LAYOUT: Layout;

    /// Linear index of element (i, j) with leading dimension `ld`.
    fn index(i: usize, j: usize, ld: usize) -> usize;

    /// Number of buffer elements a `rows x cols` view with leading dimension
    /// `ld` spans. Zero for empty views.
    #[inline(always)]
    fn extent(rows: usize, cols: usize, ld: usize) -> usize {
        if rows == 0 || cols == 0 {
            0
        } else {
            Self::index(rows - 1, cols - 1, ld) + 1
        }
    }

    /// Length of the contiguous dimension (the one `ld` must cover).
    #[inline(always)]
    fn inner(rows: usize, cols: usize) -> usize {
        Self::LAYOUT.leading_dim(rows, cols)
    }
}

/// Row-major marker: element (i, j) lives at `i * ld + j`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowMajor;

/// Column-major marker: element (i, j) lives at `j * ld + i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColMajor;

impl Order for RowMajor {
    type Trans = ColMajor;
    const LAYOUT: Layout = Layout::RowMajor;

    #[inline(always)]
    fn index(i: usize, j: usize, ld: usize) -> usize {
        i * ld + j
    }
}

impl Order for ColMajor {
    type Trans = RowMajor;
    const LAYOUT: Layout = Layout::ColMajor;

    #[inline(always)]
    fn index(i: usize, j: usize, ld: usize) -> usize {
        j * ld + i
    }
}
