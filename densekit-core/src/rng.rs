//! Deterministic PRNG for reproducible tests and benchmarks.
//!
//! `SplitMix64` is a fast 64-bit PRNG with a single word of state. Test
//! suites and benches across the workspace draw their matrices from it so a
//! failing case can be replayed from its seed.

/// SplitMix64 PRNG: deterministic, fast, statistically strong.
///
/// Period: 2^64. Passes BigCrush. Single u64 state.
///
/// # Example
/// ```
/// use densekit_core::SplitMix64;
///
/// let mut rng = SplitMix64::new(42);
/// let a = rng.symmetric(4);
/// assert_eq!(a[1], a[4]);
/// ```
pub struct SplitMix64(u64);

impl SplitMix64 {
    #[inline]
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E3779B97F4A7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }

    /// Uniform f64 in [0, 1), from the top 53 bits.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform f64 in [lo, hi).
    #[inline]
    pub fn next_range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    /// Uniform integer in [lo, hi] (inclusive), returned as f64 so integer
    /// valued matrices multiply exactly.
    #[inline]
    pub fn next_int(&mut self, lo: i32, hi: i32) -> f64 {
        let range = (hi as i64 - lo as i64 + 1) as u64;
        (lo as i64 + (self.next_u64() % range) as i64) as f64
    }

    /// Fill `out` with uniform values in [-1, 1).
    pub fn fill_uniform(&mut self, out: &mut [f64]) {
        for v in out.iter_mut() {
            *v = self.next_range(-1.0, 1.0);
        }
    }

    /// `len` uniform values in [-1, 1).
    pub fn vector(&mut self, len: usize) -> Vec<f64> {
        let mut v = vec![0.0; len];
        self.fill_uniform(&mut v);
        v
    }

    /// Dense symmetric `n x n` matrix with entries in [-1, 1).
    pub fn symmetric(&mut self, n: usize) -> Vec<f64> {
        let mut a = vec![0.0; n * n];
        for i in 0..n {
            for j in 0..=i {
                let v = self.next_range(-1.0, 1.0);
                a[i * n + j] = v;
                a[j * n + i] = v;
            }
        }
        a
    }

    /// Symmetric positive definite `n x n` matrix: `Bᵗ·B + n·I`.
    pub fn spd(&mut self, n: usize) -> Vec<f64> {
        let b = self.vector(n * n);
        let mut a = vec![0.0; n * n];
        for i in 0..n {
            for j in 0..n {
                let mut sum = 0.0;
                for k in 0..n {
                    sum += b[k * n + i] * b[k * n + j];
                }
                a[i * n + j] = sum;
            }
            a[i * n + i] += n as f64;
        }
        a
    }
}
