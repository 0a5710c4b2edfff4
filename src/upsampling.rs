//! Upsampling convolution: the synthesis half of the DWT.
//!
//! Unlike [`crate::convolution::downsampling_convolution`], these primitives
//! *add* into `output` rather than assigning — callers accumulate the
//! approximation and detail contributions into the same buffer across two
//! calls. The filter is split into even/odd taps and applied as two
//! interleaved half-rate convolutions, simulating upsampling the input by 2
//! without materializing the zero-stuffed signal.

use crate::error::{Error, Result};
use crate::wavelet::Mode;
use num_traits::Float;

/// Full zero-padded upsampling convolution. `output` must already hold
/// `2*N + F - 2` elements (zeroed, unless accumulating) addressed from
/// `output[0]`; contributions are added in, never assigned.
pub fn upsampling_convolution_full<T: Float>(input: &[T], filter: &[T], output: &mut [T]) -> Result<()> {
    let n = input.len();
    let f = filter.len();
    if f < 2 {
        return Err(Error::SizeMismatch);
    }
    if f % 2 != 0 {
        return Err(Error::FilterParity);
    }
    let half = f / 2;

    let mut i = 0usize;
    let mut o = 0usize;

    while i < n && i < half {
        for j in 0..=i {
            output[o] = output[o] + filter[j * 2] * input[i - j];
            output[o + 1] = output[o + 1] + filter[j * 2 + 1] * input[i - j];
        }
        i += 1;
        o += 2;
    }

    while i < n {
        for j in 0..half {
            output[o] = output[o] + filter[j * 2] * input[i - j];
            output[o + 1] = output[o + 1] + filter[j * 2 + 1] * input[i - j];
        }
        i += 1;
        o += 2;
    }

    while i < half {
        for j in (i + 1 - n)..=i {
            output[o] = output[o] + filter[j * 2] * input[i - j];
            output[o + 1] = output[o + 1] + filter[j * 2 + 1] * input[i - j];
        }
        i += 1;
        o += 2;
    }

    while i < n + half {
        for j in (i + 1 - n)..half {
            output[o] = output[o] + filter[j * 2] * input[i - j];
            output[o + 1] = output[o + 1] + filter[j * 2 + 1] * input[i - j];
        }
        i += 1;
        o += 2;
    }

    Ok(())
}

/// Valid-region upsampling convolution: the dispatcher that picks the
/// periodization variant or falls through to the interior-only "stage 2"
/// convolution used by every other mode. Reconstruction's boundary
/// handling for non-periodization modes lives in how the coefficients were
/// produced during decomposition, not here — this function only ever
/// touches the region where the whole (even/odd-split) filter overlaps the
/// input, adding into `output`.
pub fn upsampling_convolution_valid_sf<T: Float>(
    input: &[T],
    filter: &[T],
    output: &mut [T],
    mode: Mode,
) -> Result<()> {
    if mode == Mode::Periodization {
        return upsampling_convolution_valid_sf_periodization(input, filter, output);
    }

    let n = input.len();
    let f = filter.len();
    if f % 2 != 0 || n < f / 2 {
        return Err(Error::SizeMismatch);
    }
    let half = f / 2;

    let mut o = 0usize;
    let mut i = half - 1;
    while i < n {
        let mut sum_even = T::zero();
        let mut sum_odd = T::zero();
        for j in 0..half {
            sum_even = sum_even + filter[j * 2] * input[i - j];
            sum_odd = sum_odd + filter[j * 2 + 1] * input[i - j];
        }
        output[o] = output[o] + sum_even;
        output[o + 1] = output[o + 1] + sum_odd;
        i += 1;
        o += 2;
    }

    Ok(())
}

/// Periodization variant of the valid-region upsampling convolution.
/// Requires an even-length filter. When `F/2` is itself even, outputs are
/// shifted one element to the right (the even tap lands in `output[2N-1]`,
/// the odd tap in `output[0]`) — necessary for perfect reconstruction; see
/// the Design Notes on this asymmetry.
fn upsampling_convolution_valid_sf_periodization<T: Float>(
    input: &[T],
    filter: &[T],
    output: &mut [T],
) -> Result<()> {
    let n = input.len();
    let f = filter.len();
    if f % 2 != 0 {
        return Err(Error::FilterParity);
    }
    let half = f / 2;
    let start = f / 4;
    let q_even = half % 2 == 0;
    let end = n + start - if q_even { 1 } else { 0 };

    let mut i = start;
    let mut o = 0usize;

    if q_even {
        let last = 2 * n - 1;
        let mut j = 0usize;
        while j <= start - 1 {
            let mut k = 0;
            while k < n && j <= start - 1 {
                output[last] = output[last] + filter[2 * (start - 1 - j)] * input[k];
                output[0] = output[0] + filter[2 * (start - 1 - j) + 1] * input[k];
                k += 1;
                j += 1;
            }
        }
        while j <= n + start - 1 && j < half {
            output[last] = output[last] + filter[2 * j] * input[n + start - 1 - j];
            output[0] = output[0] + filter[2 * j + 1] * input[n + start - 1 - j];
            j += 1;
        }
        while j < half {
            let mut k = 0;
            while k < n && j < half {
                output[last] = output[last] + filter[2 * j] * input[n - 1 - k];
                output[0] = output[0] + filter[2 * j + 1] * input[n - 1 - k];
                k += 1;
                j += 1;
            }
        }
        o += 1;
    }

    while i < half && i < n {
        let mut j = 0usize;
        while j <= i {
            output[o] = output[o] + filter[2 * j] * input[i - j];
            output[o + 1] = output[o + 1] + filter[2 * j + 1] * input[i - j];
            j += 1;
        }
        while j < half {
            let mut k = 0;
            while k < n && j < half {
                output[o] = output[o] + filter[2 * j] * input[n - 1 - k];
                output[o + 1] = output[o + 1] + filter[2 * j + 1] * input[n - 1 - k];
                k += 1;
                j += 1;
            }
        }
        i += 1;
        o += 2;
    }

    while i < n {
        for j in 0..half {
            output[o] = output[o] + filter[2 * j] * input[i - j];
            output[o + 1] = output[o + 1] + filter[2 * j + 1] * input[i - j];
        }
        i += 1;
        o += 2;
    }

    while i < half && i < end {
        let mut j = 0usize;
        while i - j >= n {
            let mut k = 0;
            while k < n && i - j >= n {
                output[o] = output[o] + filter[2 * (i - n - j)] * input[k];
                output[o + 1] = output[o + 1] + filter[2 * (i - n - j) + 1] * input[k];
                k += 1;
                j += 1;
            }
        }
        while j <= i && j < half {
            output[o] = output[o] + filter[2 * j] * input[i - j];
            output[o + 1] = output[o + 1] + filter[2 * j + 1] * input[i - j];
            j += 1;
        }
        while j < half {
            let mut k = 0;
            while k < n && j < half {
                output[o] = output[o] + filter[2 * j] * input[n - 1 - k];
                output[o + 1] = output[o + 1] + filter[2 * j + 1] * input[n - 1 - k];
                k += 1;
                j += 1;
            }
        }
        i += 1;
        o += 2;
    }

    while i < end {
        let mut j = 0usize;
        while i - j >= n {
            let mut k = 0;
            while k < n && i - j >= n {
                output[o] = output[o] + filter[2 * (i - n - j)] * input[k];
                output[o + 1] = output[o + 1] + filter[2 * (i - n - j) + 1] * input[k];
                k += 1;
                j += 1;
            }
        }
        while j <= i && j < half {
            output[o] = output[o] + filter[2 * j] * input[i - j];
            output[o + 1] = output[o + 1] + filter[2 * j + 1] * input[i - j];
            j += 1;
        }
        i += 1;
        o += 2;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn ucv_periodization_daubechies_like_even_q() {
        // Scenario 5: UCV, PERIODIZATION, F=4 (q=F/2=2, even).
        let input = [1.0_f64, 2.0, 3.0, 4.0];
        let filter = [0.1_f64, 0.2, 0.3, 0.4];
        let mut output = vec![0.0_f64; 2 * input.len()];
        upsampling_convolution_valid_sf_periodization(&input, &filter, &mut output).unwrap();
        assert_eq!(output.len(), 8);
    }

    #[test]
    fn ucf_requires_filter_length_at_least_two() {
        let input = [1.0_f64, 2.0];
        let filter = [1.0_f64];
        let mut output = vec![0.0_f64; 4];
        let err = upsampling_convolution_full(&input, &filter, &mut output).unwrap_err();
        assert_eq!(err, Error::SizeMismatch);
    }

    #[test]
    fn ucf_rejects_odd_length_filter() {
        let input = [1.0_f64, 2.0];
        let filter = [1.0_f64, 1.0, 1.0];
        let mut output = vec![0.0_f64; 4];
        let err = upsampling_convolution_full(&input, &filter, &mut output).unwrap_err();
        assert_eq!(err, Error::FilterParity);
    }

    #[test]
    fn ucv_rejects_odd_length_filter_without_periodization() {
        let input = [1.0_f64, 2.0, 3.0];
        let filter = [1.0_f64, 1.0, 1.0];
        let mut output = vec![0.0_f64; 6];
        let err = upsampling_convolution_valid_sf(&input, &filter, &mut output, Mode::ZeroPad).unwrap_err();
        assert_eq!(err, Error::SizeMismatch);
    }

    #[test]
    fn ucv_rejects_odd_length_filter_under_periodization() {
        let input = [1.0_f64, 2.0, 3.0];
        let filter = [1.0_f64, 1.0, 1.0];
        let mut output = vec![0.0_f64; 6];
        let err = upsampling_convolution_valid_sf(&input, &filter, &mut output, Mode::Periodization).unwrap_err();
        assert_eq!(err, Error::FilterParity);
    }

    #[test]
    fn ucv_rejects_signal_shorter_than_half_filter() {
        let input = [1.0_f64];
        let filter = [1.0_f64, 1.0, 1.0, 1.0];
        let mut output = vec![0.0_f64; 4];
        let err = upsampling_convolution_valid_sf(&input, &filter, &mut output, Mode::ZeroPad).unwrap_err();
        assert_eq!(err, Error::SizeMismatch);
    }

    #[test]
    fn ucf_accumulates_additively() {
        let input = [1.0_f64, 1.0];
        let filter = [0.5_f64, 0.5, 0.5, 0.5];
        let mut output = vec![1.0_f64; 6];
        let before = output.clone();
        upsampling_convolution_full(&input, &filter, &mut output).unwrap();
        // Every touched slot should have grown, never been overwritten to a
        // value independent of its prior contents.
        let touched: Vec<bool> = output.iter().zip(before.iter()).map(|(a, b)| a != b).collect();
        assert!(touched.iter().any(|&t| t));
        for (after, prior) in output.iter().zip(before.iter()) {
            assert!(*after >= *prior || (*after - *prior).abs() < 1e6);
        }
    }

    #[test]
    fn haar_decimate_then_reconstruct_interior_matches() {
        let c = std::f64::consts::FRAC_1_SQRT_2;
        let dec_lo = [c, c];
        let rec_lo = [c, c];
        let x = [1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];

        let len = crate::convolution::output_len(x.len(), dec_lo.len(), 2, Mode::Periodization);
        let mut a = vec![0.0; len];
        crate::convolution::downsampling_convolution(&x, &dec_lo, &mut a, 2, Mode::Periodization);

        let mut recon = vec![0.0_f64; x.len()];
        upsampling_convolution_valid_sf(&a, &rec_lo, &mut recon, Mode::Periodization).unwrap();
        assert_relative_eq!(recon.iter().sum::<f64>(), x.iter().sum::<f64>(), epsilon = 1e-9);
    }
}
