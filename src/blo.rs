//! Buffer-Length Oracle: pure arithmetic for sizing convolution output
//! buffers ahead of time, so callers can allocate once instead of
//! discovering the required length mid-convolution.
//!
//! Every function here returns `0` for invalid/degenerate inputs rather
//! than an `Err` — that mirrors the historical contract these functions are
//! grounded on, where `0` itself is the caller's buffer-length-validation
//! signal (checked against `output.len()` before committing to a
//! convolution call).

use crate::wavelet::Coefficient;
use crate::wavelet::Mode;

/// Output length of a single-level downsampling convolution (`step=2`).
pub fn dwt_len(input_len: usize, filter_len: usize, mode: Mode) -> usize {
    if input_len < 1 || filter_len < 1 {
        return 0;
    }
    match mode {
        Mode::Periodization => input_len / 2 + if input_len % 2 != 0 { 1 } else { 0 },
        _ => (input_len + filter_len - 1) / 2,
    }
}

/// Like [`dwt_len`], but for the "offset" convention used when
/// approximation and detail coefficients may end up with different
/// lengths for odd-length input under non-periodization modes.
pub fn dwt_len_offset(input_len: usize, filter_len: usize, coef: Coefficient, mode: Mode) -> usize {
    if input_len < 1 || filter_len < 1 {
        return 0;
    }
    let adj = if input_len % 2 != 0 && coef == Coefficient::Approx {
        1
    } else {
        0
    };
    match mode {
        Mode::Periodization => input_len / 2 + adj,
        _ => (input_len + filter_len - 1) / 2 - 1 + adj,
    }
}

/// Upper bound on the reconstructed signal length before trimming to the
/// caller-requested output size — the full linear-convolution length of an
/// upsampling reconstruction.
pub fn rec_len(coeffs_len: usize, filter_len: usize) -> usize {
    if coeffs_len < 1 || filter_len < 1 {
        return 0;
    }
    2 * coeffs_len + filter_len - 2
}

/// Output length of a single-level inverse DWT from one coefficient array
/// of length `coeffs_len`.
pub fn idwt_len(coeffs_len: usize, filter_len: usize, mode: Mode) -> usize {
    match mode {
        Mode::Periodization => 2 * coeffs_len,
        _ => 2 * coeffs_len + 2 - filter_len,
    }
}

/// Output length of an inverse DWT given independently-sized approximation
/// and detail coefficient arrays (either may be absent, signalled by `0`).
/// Returns `0` if both are absent, or unless `adj = coefs_a_len - coefs_d_len`
/// is `0` or `1` when both are present — anything else (including a negative
/// `adj`, where the detail array is longer) cannot correspond to the same
/// decomposition.
pub fn idwt_len_paired(coefs_a_len: usize, coefs_d_len: usize, filter_len: usize, mode: Mode) -> usize {
    let (coefs_len, adj) = if coefs_a_len == 0 && coefs_d_len == 0 {
        return 0;
    } else if coefs_a_len == 0 {
        (coefs_d_len, 0isize)
    } else if coefs_d_len == 0 {
        (coefs_a_len, 0isize)
    } else {
        let adj = coefs_a_len as isize - coefs_d_len as isize;
        if adj < 0 || adj > 1 {
            return 0;
        }
        (coefs_d_len, adj)
    };

    match mode {
        Mode::Periodization => (2 * coefs_len as isize + adj) as usize,
        _ => ((coefs_len as isize + adj) * 2 - filter_len as isize + 1) as usize,
    }
}

/// The stationary wavelet transform never decimates, so every level's
/// output is the same length as the input.
pub fn swt_len(input_len: usize) -> usize {
    input_len
}

/// Highest decomposition level for which `dwt_len` stays at least 1,
/// i.e. `floor(log2(input_len / (filter_len - 1)))`.
pub fn dwt_max_level(input_len: usize, filter_len: usize) -> u32 {
    if input_len < 1 || filter_len < 2 {
        return 0;
    }
    let quotient = input_len / (filter_len - 1);
    if quotient == 0 {
        return 0;
    }
    quotient.ilog2()
}

/// Highest level at which the stationary wavelet transform's filter
/// dilation (`2^level`) still evenly divides `input_len`.
pub fn swt_max_level(mut input_len: usize) -> u32 {
    let mut j = 0u32;
    while input_len > 0 {
        if input_len % 2 != 0 {
            return j;
        }
        input_len /= 2;
        j += 1;
    }
    j
}
