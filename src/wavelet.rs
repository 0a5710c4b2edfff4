use crate::error::{Error, Result};
use num_traits::Float;

/// Boundary extension policy for samples outside `[0, N)`.
///
/// See the module-level documentation in `crate::convolution` for the exact
/// per-mode index/value rules; this enum only carries the tag, the
/// extension arithmetic lives inlined at the convolution region boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Virtual samples outside the signal are zero.
    ZeroPad,
    /// Whole-sample symmetric reflection without repeating the edge sample.
    Symmetric,
    /// Virtual samples repeat the nearest edge sample.
    ConstantEdge,
    /// Linear extrapolation using the boundary slope.
    Smooth,
    /// Virtual samples wrap periodically: `x[i mod N]`.
    Periodic,
    /// Pad to a multiple of the decimation step by repeating the last
    /// sample, then wrap periodically. Produces a half-length output.
    Periodization,
}

/// Selects which decomposition/reconstruction filter pair a call uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Coefficient {
    /// Low-pass filter output (approximation coefficients).
    Approx,
    /// High-pass filter output (detail coefficients).
    Detail,
}

/// Decomposition/reconstruction filter bank for one wavelet.
///
/// Owns the four filter arrays. `dec_len`/`rec_len` are redundant with the
/// corresponding `Vec` lengths but kept as explicit fields to mirror the
/// `Wavelet` struct this crate's operations are grounded on, where callers
/// pass the length alongside the pointer.
#[derive(Debug, Clone)]
pub struct Wavelet<T> {
    pub dec_len: usize,
    pub rec_len: usize,
    pub dec_lo: Vec<T>,
    pub dec_hi: Vec<T>,
    pub rec_lo: Vec<T>,
    pub rec_hi: Vec<T>,
}

impl<T: Float> Wavelet<T> {
    /// Build a filter bank, validating that the four arrays agree with the
    /// declared lengths.
    pub fn new(dec_lo: Vec<T>, dec_hi: Vec<T>, rec_lo: Vec<T>, rec_hi: Vec<T>) -> Result<Self> {
        let dec_len = dec_lo.len();
        let rec_len = rec_lo.len();
        if dec_hi.len() != dec_len || rec_hi.len() != rec_len {
            return Err(Error::ValidationFailure);
        }
        Ok(Wavelet {
            dec_len,
            rec_len,
            dec_lo,
            dec_hi,
            rec_lo,
            rec_hi,
        })
    }

    /// Orthogonal Haar filter bank, useful as a minimal test fixture.
    pub fn haar() -> Self {
        let c = T::from(std::f64::consts::FRAC_1_SQRT_2).unwrap();
        let dec_lo = vec![c, c];
        let dec_hi = vec![-c, c];
        let rec_lo = vec![c, c];
        let rec_hi = vec![c, -c];
        Wavelet {
            dec_len: 2,
            rec_len: 2,
            dec_lo,
            dec_hi,
            rec_lo,
            rec_hi,
        }
    }

    pub(crate) fn decomposition_filter(&self, coef: Coefficient) -> &[T] {
        match coef {
            Coefficient::Approx => &self.dec_lo,
            Coefficient::Detail => &self.dec_hi,
        }
    }
}
