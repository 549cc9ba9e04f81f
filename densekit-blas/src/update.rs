//! Accumulate/sign semantics of the product kernels.
//!
//! Every matrix-matrix kernel is generic over an [`Update`], a zero-sized
//! type that decides how the computed product lands in the destination:
//!
//! | type          | accumulate  | sign     | effect       |
//! |---------------|-------------|----------|--------------|
//! | [`Assign`]    | overwrite   | positive | `C = A·B`    |
//! | [`AssignNeg`] | overwrite   | negate   | `C = −A·B`   |
//! | [`AddTo`]     | add         | positive | `C += A·B`   |
//! | [`SubFrom`]   | add         | negate   | `C −= A·B`   |
//!
//! The choice is monomorphized, so `store` inlines to a single move or
//! fused add. Callers that only know the semantics at run time go through
//! [`Accumulate`] / [`Sign`] and the `*_dyn` wrappers, which branch once per
//! call.

/// Whether the product overwrites or adds to the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Accumulate {
    #[default]
    Overwrite,
    Add,
}

/// Whether the product is used as is or negated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sign {
    #[default]
    Positive,
    Negate,
}

impl Sign {
    /// `1.0` or `-1.0`.
    #[inline(always)]
    pub fn factor(self) -> f64 {
        match self {
            Sign::Positive => 1.0,
            Sign::Negate => -1.0,
        }
    }
}

/// Compile-time accumulate/sign selection.
pub trait Update: Copy + Default + Send + Sync + 'static {
    const ACCUMULATE: Accumulate;
    const SIGN: Sign;
    /// Index of this update in the per-update dispatch tables.
    const SLOT: usize;

    /// Write `val` (the unsigned product entry) into `dst`.
    fn store(dst: &mut f64, val: f64);

    /// True when a product with contraction length `k` must leave the
    /// destination untouched: accumulating an empty sum is a no-op, while
    /// assigning one writes zeros.
    #[inline(always)]
    fn is_noop(k: usize) -> bool {
        k == 0 && Self::ACCUMULATE == Accumulate::Add
    }
}

/// `C = A·B`
#[derive(Debug, Clone, Copy, Default)]
pub struct Assign;

/// `C = −A·B`
#[derive(Debug, Clone, Copy, Default)]
pub struct AssignNeg;

/// `C += A·B`
#[derive(Debug, Clone, Copy, Default)]
pub struct AddTo;

/// `C −= A·B`
#[derive(Debug, Clone, Copy, Default)]
pub struct SubFrom;

impl Update for Assign {
    const ACCUMULATE: Accumulate = Accumulate::Overwrite;
    const SIGN: Sign = Sign::Positive;
    const SLOT: usize = 0;

    #[inline(always)]
    fn store(dst: &mut f64, val: f64) {
        *dst = val;
    }
}

impl Update for AssignNeg {
    const ACCUMULATE: Accumulate = Accumulate::Overwrite;
    const SIGN: Sign = Sign::Negate;
    const SLOT: usize = 1;

    #[inline(always)]
    fn store(dst: &mut f64, val: f64) {
        *dst = -val;
    }
}

impl Update for AddTo {
    const ACCUMULATE: Accumulate = Accumulate::Add;
    const SIGN: Sign = Sign::Positive;
    const SLOT: usize = 2;

    #[inline(always)]
    fn store(dst: &mut f64, val: f64) {
        *dst += val;
    }
}

impl Update for SubFrom {
    const ACCUMULATE: Accumulate = Accumulate::Add;
    const SIGN: Sign = Sign::Negate;
    const SLOT: usize = 3;

    #[inline(always)]
    fn store(dst: &mut f64, val: f64) {
        *dst -= val;
    }
}

/// Number of [`Update`] implementors, i.e. per-update table slots.
pub const UPDATE_SLOTS: usize = 4;
