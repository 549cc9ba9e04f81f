//! Diagonal scaling: `A ← A·diag(d)` and `A ← diag(d)·A`.

use densekit_blas::scale_vector;
use densekit_core::{check_dims, Layout, MatMut, Order, SliceVec};

/// `A ← A·diag(d)`: column `j` of `A` is multiplied by `d[j]`.
///
/// Column-major views scale one contiguous column at a time; row-major
/// views walk each row against `d`.
pub fn scale_cols<O: Order>(mut a: MatMut<'_, O>, diag: SliceVec<'_>) {
    check_dims!(
        diag.len() >= a.cols(),
        "scale_cols: A has {} columns, diag has {}",
        a.cols(),
        diag.len()
    );
    match O::LAYOUT {
        Layout::ColMajor => {
            for j in 0..a.cols() {
                let dj = diag.get(j);
                let mut col = a.col_mut(j);
                match col.as_flat_mut() {
                    Some(flat) => scale_vector(dj, flat),
                    None => {
                        for i in 0..col.len() {
                            *col.get_mut(i) *= dj;
                        }
                    }
                }
            }
        }
        Layout::RowMajor => {
            for i in 0..a.rows() {
                let mut row = a.row_mut(i);
                for j in 0..row.len() {
                    *row.get_mut(j) *= diag.get(j);
                }
            }
        }
    }
}

/// `A ← diag(d)·A`, the column scaling of `Aᵗ`.
#[inline]
pub fn scale_rows<O: Order>(a: MatMut<'_, O>, diag: SliceVec<'_>) {
    scale_cols(a.trans(), diag)
}
