//! Size-indexed kernel dispatch.
//!
//! Each operation family owns a [`DispatchTable`]: an array of kernel entry
//! points indexed by `min(d, N - 1)`, where `d` is the family's governing
//! dimension. Entries `0..N-1` are exact-size specializations (const-generic
//! kernels the compiler fully unrolls), entry `N - 1` is the generic fallback
//! that is valid for every size. Clamping is the only routing rule.
//!
//! All tables live in one [`KernelTables`] value, built on the first call to
//! [`init`] or [`tables`] and published through a `OnceLock`. After that it
//! is shared read-only by every thread until process exit. This is the only
//! process-wide state in the workspace.
//!
//! ```text
//!   mult_mat_vec(A, x, y)
//!        │ d = x.len()
//!        ▼
//!   tables().mat_vec.select(d)  ──►  [k0, k1, … k24, fallback]
//!                                      exact sizes   │  d ≥ 25
//! ```

use std::sync::OnceLock;

use densekit_core::{BareMat, BareMatMut, SliceVec, SliceVecMut};

use crate::matmat::{
    ab_fallback, ab_fixed, abt_fallback, abt_fixed, atb_fallback, atb_fixed,
};
use crate::matvec::{
    add_mat_trans_vec_fallback, add_mat_trans_vec_fixed, add_mat_vec_fallback,
    add_mat_vec_fixed, indirect_fallback, indirect_fixed, mat_trans_vec_fallback,
    mat_trans_vec_fixed, mat_vec_fallback, mat_vec_fixed,
};
use crate::update::{AddTo, Assign, AssignNeg, SubFrom, Update, UPDATE_SLOTS};
use crate::vector::{
    add_fallback, add_fixed, add_slice_fallback, add_slice_fixed, copy_fallback, copy_fixed,
    copy_slice_fallback, copy_slice_fixed,
};

// ============================================================================
// Table sizes (tuning parameters; results never depend on them)
// ============================================================================

/// Flat and strided vector copy, indexed by length.
pub const COPY_TABLE: usize = 16;
/// Flat and strided `y += α·x`, indexed by length.
pub const ADD_TABLE: usize = 16;
/// `y = A·x`, indexed by `x.len()`.
pub const MAT_VEC_TABLE: usize = 26;
/// `y += s·A·x`, indexed by `x.len()`.
pub const ADD_MAT_VEC_TABLE: usize = 25;
/// `y = Aᵗ·x`, indexed by `x.len()`.
pub const MAT_TRANS_VEC_TABLE: usize = 13;
/// `y += s·Aᵗ·x`, indexed by `x.len()`.
pub const ADD_MAT_TRANS_VEC_TABLE: usize = 13;
/// Row-indirect `y += s·Aᵗ·x`, indexed by `y.len()`.
pub const INDIRECT_TABLE: usize = 25;
/// `C {=,=−,+=,−=} A·B`, indexed by the contraction length.
pub const AB_TABLE: usize = 14;
/// `C {=,=−,+=,−=} Aᵗ·B`, indexed by the row count of `C`.
pub const ATB_TABLE: usize = 14;
/// `C {=,=−,+=,−=} A·Bᵗ`, indexed by the contraction length.
pub const ABT_TABLE: usize = 25;

// ============================================================================
// Kernel signatures
// ============================================================================

/// `y = x`
pub type CopyFn = for<'a, 'b> fn(&'a [f64], &'b mut [f64]);
/// `y = x`, strided
pub type CopySliceFn = for<'a, 'b> fn(SliceVec<'a>, SliceVecMut<'b>);
/// `y += alpha·x`
pub type AddFn = for<'a, 'b> fn(f64, &'a [f64], &'b mut [f64]);
/// `y += alpha·x`, strided
pub type AddSliceFn = for<'a, 'b> fn(f64, SliceVec<'a>, SliceVecMut<'b>);
/// `y = A·x` or `y = Aᵗ·x`
pub type MatVecFn = for<'a, 'b, 'c> fn(BareMat<'a>, &'b [f64], &'c mut [f64]);
/// `y += s·A·x` or `y += s·Aᵗ·x`
pub type AddMatVecFn = for<'a, 'b, 'c> fn(f64, BareMat<'a>, &'b [f64], &'c mut [f64]);
/// `y[j] += s·Σₖ A[ind[k], j]·x[k]`
pub type IndirectFn =
    for<'a, 'b, 'c, 'd> fn(f64, BareMat<'a>, &'b [f64], &'c [usize], &'d mut [f64]);
/// Matrix-matrix kernel taking `(m, n, k, a, b, c)`; `C` is `m x n`.
pub type MatMatFn =
    for<'a, 'b, 'c> fn(usize, usize, usize, BareMat<'a>, BareMat<'b>, BareMatMut<'c>);

// ============================================================================
// DispatchTable
// ============================================================================

/// Fixed-size array of kernels indexed by clamped operand size.
#[derive(Clone, Copy)]
pub struct DispatchTable<F: Copy, const N: usize> {
    entries: [F; N],
}

impl<F: Copy, const N: usize> DispatchTable<F, N> {
    /// Table from its entries; the last one must handle every size.
    pub fn new(entries: [F; N]) -> Self {
        assert!(N > 0, "dispatch table needs at least the fallback entry");
        Self { entries }
    }

    /// Kernel for governing dimension `d`.
    #[inline(always)]
    pub fn select(&self, d: usize) -> F {
        self.entries[d.min(N - 1)]
    }

    /// The generic kernel, valid for every size.
    #[inline]
    pub fn fallback(&self) -> F {
        self.entries[N - 1]
    }

    /// Number of entries, fallback included.
    #[inline]
    pub const fn len(&self) -> usize {
        N
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        N == 0
    }
}

impl<F: Copy, const N: usize> std::fmt::Debug for DispatchTable<F, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatchTable").field("len", &N).finish()
    }
}

/// Table whose entries `0..` are `$fixed::<k>` for the listed sizes, with
/// `$fallback` last. The listed sizes must be `0..=N-2`.
macro_rules! dispatch_table {
    ($fn_ty:ty; $fixed:ident, $fallback:ident; $($k:literal),+ $(,)?) => {
        DispatchTable::new([$($fixed::<$k> as $fn_ty,)+ $fallback as $fn_ty])
    };
    ($fn_ty:ty; $fixed:ident, $fallback:ident, $u:ty; $($k:literal),+ $(,)?) => {
        DispatchTable::new([$($fixed::<$u, $k> as $fn_ty,)+ $fallback::<$u> as $fn_ty])
    };
}

// ============================================================================
// KernelTables
// ============================================================================

/// Every dispatch table of the workspace.
#[derive(Debug)]
pub struct KernelTables {
    pub copy: DispatchTable<CopyFn, COPY_TABLE>,
    pub copy_slice: DispatchTable<CopySliceFn, COPY_TABLE>,
    pub add: DispatchTable<AddFn, ADD_TABLE>,
    pub add_slice: DispatchTable<AddSliceFn, ADD_TABLE>,
    pub mat_vec: DispatchTable<MatVecFn, MAT_VEC_TABLE>,
    pub add_mat_vec: DispatchTable<AddMatVecFn, ADD_MAT_VEC_TABLE>,
    pub mat_trans_vec: DispatchTable<MatVecFn, MAT_TRANS_VEC_TABLE>,
    pub add_mat_trans_vec: DispatchTable<AddMatVecFn, ADD_MAT_TRANS_VEC_TABLE>,
    pub add_mat_trans_vec_indirect: DispatchTable<IndirectFn, INDIRECT_TABLE>,
    ab_tables: [DispatchTable<MatMatFn, AB_TABLE>; UPDATE_SLOTS],
    atb_tables: [DispatchTable<MatMatFn, ATB_TABLE>; UPDATE_SLOTS],
    abt_tables: [DispatchTable<MatMatFn, ABT_TABLE>; UPDATE_SLOTS],
}

fn ab_table<U: Update>() -> DispatchTable<MatMatFn, AB_TABLE> {
    dispatch_table!(MatMatFn; ab_fixed, ab_fallback, U;
        0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12)
}

fn atb_table<U: Update>() -> DispatchTable<MatMatFn, ATB_TABLE> {
    dispatch_table!(MatMatFn; atb_fixed, atb_fallback, U;
        0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12)
}

fn abt_table<U: Update>() -> DispatchTable<MatMatFn, ABT_TABLE> {
    dispatch_table!(MatMatFn; abt_fixed, abt_fallback, U;
        0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23)
}

impl KernelTables {
    fn build() -> Self {
        Self {
            copy: dispatch_table!(CopyFn; copy_fixed, copy_fallback;
                0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14),
            copy_slice: dispatch_table!(CopySliceFn; copy_slice_fixed, copy_slice_fallback;
                0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14),
            add: dispatch_table!(AddFn; add_fixed, add_fallback;
                0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14),
            add_slice: dispatch_table!(AddSliceFn; add_slice_fixed, add_slice_fallback;
                0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14),
            mat_vec: dispatch_table!(MatVecFn; mat_vec_fixed, mat_vec_fallback;
                0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22,
                23, 24),
            add_mat_vec: dispatch_table!(AddMatVecFn; add_mat_vec_fixed, add_mat_vec_fallback;
                0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22,
                23),
            mat_trans_vec: dispatch_table!(MatVecFn; mat_trans_vec_fixed, mat_trans_vec_fallback;
                0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11),
            add_mat_trans_vec: dispatch_table!(AddMatVecFn;
                add_mat_trans_vec_fixed, add_mat_trans_vec_fallback;
                0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11),
            add_mat_trans_vec_indirect: dispatch_table!(IndirectFn;
                indirect_fixed, indirect_fallback;
                0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22,
                23),
            ab_tables: [
                ab_table::<Assign>(),
                ab_table::<AssignNeg>(),
                ab_table::<AddTo>(),
                ab_table::<SubFrom>(),
            ],
            atb_tables: [
                atb_table::<Assign>(),
                atb_table::<AssignNeg>(),
                atb_table::<AddTo>(),
                atb_table::<SubFrom>(),
            ],
            abt_tables: [
                abt_table::<Assign>(),
                abt_table::<AssignNeg>(),
                abt_table::<AddTo>(),
                abt_table::<SubFrom>(),
            ],
        }
    }

    /// `C {U} A·B` table.
    #[inline(always)]
    pub fn ab<U: Update>(&self) -> &DispatchTable<MatMatFn, AB_TABLE> {
        &self.ab_tables[U::SLOT]
    }

    /// `C {U} Aᵗ·B` table.
    #[inline(always)]
    pub fn atb<U: Update>(&self) -> &DispatchTable<MatMatFn, ATB_TABLE> {
        &self.atb_tables[U::SLOT]
    }

    /// `C {U} A·Bᵗ` table.
    #[inline(always)]
    pub fn abt<U: Update>(&self) -> &DispatchTable<MatMatFn, ABT_TABLE> {
        &self.abt_tables[U::SLOT]
    }
}

static TABLES: OnceLock<KernelTables> = OnceLock::new();

/// Build and publish the dispatch tables.
///
/// Idempotent. Call it from the application's startup path to keep table
/// construction off the first kernel call; every entry point falls back to
/// building on first use otherwise.
pub fn init() -> &'static KernelTables {
    tables()
}

/// The published dispatch tables.
#[inline]
pub fn tables() -> &'static KernelTables {
    TABLES.get_or_init(|| {
        let t = KernelTables::build();
        log::debug!(
            "densekit dispatch tables published: copy={} add={} mat_vec={} add_mat_vec={} \
             mat_trans_vec={} add_mat_trans_vec={} indirect={} ab={}x{} atb={}x{} abt={}x{}",
            t.copy.len(),
            t.add.len(),
            t.mat_vec.len(),
            t.add_mat_vec.len(),
            t.mat_trans_vec.len(),
            t.add_mat_trans_vec.len(),
            t.add_mat_trans_vec_indirect.len(),
            UPDATE_SLOTS,
            AB_TABLE,
            UPDATE_SLOTS,
            ATB_TABLE,
            UPDATE_SLOTS,
            ABT_TABLE,
        );
        t
    })
}
