//! Error types for densekit.
//!
//! Kernels themselves never return errors: dimension mismatches on the hot
//! path are preconditions (see [`check_dims!`](crate::check_dims)). These
//! variants cover the fallible edges: building checked views from caller
//! buffers and drawing scratch memory from a [`LocalHeap`](crate::LocalHeap).

use thiserror::Error;

/// Result type alias using densekit's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised outside the kernel inner loops.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The buffer is shorter than the span of the requested view.
    #[error("buffer of {len} elements cannot hold a {rows}x{cols} view with leading dimension {ld}")]
    BufferTooSmall {
        /// Buffer length in elements
        len: usize,
        /// Requested rows
        rows: usize,
        /// Requested columns
        cols: usize,
        /// Requested leading dimension
        ld: usize,
    },

    /// The leading dimension does not cover the contiguous dimension.
    #[error("leading dimension {ld} is smaller than the contiguous extent {required}")]
    LeadingDimension {
        /// Requested leading dimension
        ld: usize,
        /// Minimum legal leading dimension
        required: usize,
    },

    /// Strided vector does not fit in its buffer.
    #[error("buffer of {len} elements cannot hold {count} entries with stride {stride}")]
    StrideOutOfBounds {
        /// Buffer length in elements
        len: usize,
        /// Requested entry count
        count: usize,
        /// Requested stride
        stride: usize,
    },

    /// Operand shapes are inconsistent.
    #[error("dimension mismatch in {op}: expected {expected:?}, got {got:?}")]
    DimensionMismatch {
        /// Operation name
        op: &'static str,
        /// Expected (rows, cols)
        expected: (usize, usize),
        /// Actual (rows, cols)
        got: (usize, usize),
    },

    /// The local heap has no room for the requested scratch buffer.
    #[error("local heap exhausted: requested {requested} elements, {available} available")]
    HeapExhausted {
        /// Requested element count
        requested: usize,
        /// Remaining element count
        available: usize,
    },
}

impl Error {
    /// `Ok` when `got == expected`, otherwise [`Error::DimensionMismatch`].
    /// For fallible entry points off the kernel hot path.
    pub fn check_shape(
        op: &'static str,
        expected: (usize, usize),
        got: (usize, usize),
    ) -> Result<()> {
        if expected == got {
            Ok(())
        } else {
            Err(Error::DimensionMismatch { op, expected, got })
        }
    }
}

/// Check operand dimensions at a kernel call boundary.
///
/// Compiles to `debug_assert!` unless the `checked` feature is enabled, in
/// which case the check survives into release builds.
#[macro_export]
macro_rules! check_dims {
    ($cond:expr, $($arg:tt)+) => {
        if cfg!(any(debug_assertions, feature = "checked")) {
            assert!($cond, $($arg)+);
        }
    };
}
