//! Direct (non-axis) wavelet operations on flat 1-D slices: the thin
//! wrappers that validate a buffer-length oracle prediction and then
//! delegate to the convolution primitives. These are what the axis driver
//! calls per line, and what a caller reaches for directly when working
//! on a single 1-D signal.

use crate::blo;
use crate::convolution::downsampling_convolution;
use crate::error::{Error, Result};
use crate::upsampling::{upsampling_convolution_full, upsampling_convolution_valid_sf};
use crate::wavelet::{Mode, Wavelet};
use num_traits::Float;

/// Single-level decomposition with the low-pass (approximation) filter.
pub fn dec_a<T: Float>(input: &[T], wavelet: &Wavelet<T>, output: &mut [T], mode: Mode) -> Result<()> {
    let expected = blo::dwt_len(input.len(), wavelet.dec_len, mode);
    if expected == 0 || output.len() != expected {
        return Err(Error::SizeMismatch);
    }
    downsampling_convolution(input, &wavelet.dec_lo, output, 2, mode);
    Ok(())
}

/// Single-level decomposition with the high-pass (detail) filter.
pub fn dec_d<T: Float>(input: &[T], wavelet: &Wavelet<T>, output: &mut [T], mode: Mode) -> Result<()> {
    let expected = blo::dwt_len(input.len(), wavelet.dec_len, mode);
    if expected == 0 || output.len() != expected {
        return Err(Error::SizeMismatch);
    }
    downsampling_convolution(input, &wavelet.dec_hi, output, 2, mode);
    Ok(())
}

/// Direct reconstruction from approximation coefficients with the
/// low-pass reconstruction filter. Unlike [`idwt`], this performs the full
/// (non-decimated-extension) upsampling convolution: no boundary mode
/// applies, and the output length is always `2*coeffs_len + rec_len - 2`.
pub fn rec_a<T: Float>(coeffs: &[T], wavelet: &Wavelet<T>, output: &mut [T]) -> Result<()> {
    let expected = blo::rec_len(coeffs.len(), wavelet.rec_len);
    if expected == 0 || output.len() != expected {
        return Err(Error::SizeMismatch);
    }
    upsampling_convolution_full(coeffs, &wavelet.rec_lo, output)
}

/// Direct reconstruction from detail coefficients with the high-pass
/// reconstruction filter. See [`rec_a`].
pub fn rec_d<T: Float>(coeffs: &[T], wavelet: &Wavelet<T>, output: &mut [T]) -> Result<()> {
    let expected = blo::rec_len(coeffs.len(), wavelet.rec_len);
    if expected == 0 || output.len() != expected {
        return Err(Error::SizeMismatch);
    }
    upsampling_convolution_full(coeffs, &wavelet.rec_hi, output)
}

/// Single-level inverse DWT from approximation and/or detail coefficients.
///
/// Historical quirk, preserved deliberately: if `output` is not sized to
/// exactly the Buffer-Length Oracle's prediction, this returns `Ok(())`
/// leaving `output` untouched rather than an error — the original C
/// contract signals this case with a `0` (success) return code rather
/// than a negative one, and multilevel callers relied on that to treat a
/// mismatched scratch buffer as a no-op instead of a hard failure.
pub fn idwt<T: Float>(coefs_a: Option<&[T]>, coefs_d: Option<&[T]>, output: &mut [T], wavelet: &Wavelet<T>, mode: Mode) -> Result<()> {
    let a_len = coefs_a.map_or(0, <[T]>::len);
    let d_len = coefs_d.map_or(0, <[T]>::len);
    let expected = blo::idwt_len_paired(a_len, d_len, wavelet.rec_len, mode);
    if expected == 0 || output.len() != expected {
        return Ok(());
    }

    for v in output.iter_mut() {
        *v = T::zero();
    }
    if let Some(a) = coefs_a {
        upsampling_convolution_valid_sf(a, &wavelet.rec_lo, output, mode)?;
    }
    if let Some(d) = coefs_d {
        upsampling_convolution_valid_sf(d, &wavelet.rec_hi, output, mode)?;
    }
    Ok(())
}

/// One level of the (non-decimated) stationary wavelet transform: expands
/// `filter` by inserting `2^(level-1) - 1` zeros between taps, then runs a
/// unit-step, PERIODIZATION-mode downsampling convolution so the output
/// length equals the input length.
fn swt_step<T: Float>(input: &[T], filter: &[T], output: &mut [T], level: u32) -> Result<()> {
    if level < 1 {
        return Err(Error::SizeMismatch);
    }
    if level > blo::swt_max_level(input.len()) {
        log::warn!("swt_step: level {} exceeds swt_max_level for input of length {}", level, input.len());
        return Err(Error::LevelTooHigh);
    }
    if output.len() != blo::swt_len(input.len()) {
        return Err(Error::SizeMismatch);
    }

    if level > 1 {
        let e_len = filter.len() << (level - 1);
        let mut e_filter = vec![T::zero(); e_len];
        for (i, &v) in filter.iter().enumerate() {
            e_filter[i << (level - 1)] = v;
        }
        downsampling_convolution(input, &e_filter, output, 1, Mode::Periodization);
    } else {
        downsampling_convolution(input, filter, output, 1, Mode::Periodization);
    }
    Ok(())
}

/// Stationary-transform approximation coefficients at `level`. `input` is
/// the original signal when `level == 1`, or the approximation output of
/// the previous level otherwise.
pub fn swt_a<T: Float>(input: &[T], wavelet: &Wavelet<T>, output: &mut [T], level: u32) -> Result<()> {
    swt_step(input, &wavelet.dec_lo, output, level)
}

/// Stationary-transform detail coefficients at `level`. See [`swt_a`].
pub fn swt_d<T: Float>(input: &[T], wavelet: &Wavelet<T>, output: &mut [T], level: u32) -> Result<()> {
    swt_step(input, &wavelet.dec_hi, output, level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dec_a_rejects_wrong_output_length() {
        let wavelet = Wavelet::<f64>::haar();
        let x = [1.0_f64, 2.0, 3.0, 4.0];
        let mut out = vec![0.0; 1];
        let err = dec_a(&x, &wavelet, &mut out, Mode::Periodization).unwrap_err();
        assert_eq!(err, Error::SizeMismatch);
    }

    #[test]
    fn dec_a_and_dec_d_are_orthogonal_for_haar() {
        let wavelet = Wavelet::<f64>::haar();
        let x = [1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let len = blo::dwt_len(x.len(), wavelet.dec_len, Mode::Periodization);
        let mut a = vec![0.0; len];
        let mut d = vec![0.0; len];
        dec_a(&x, &wavelet, &mut a, Mode::Periodization).unwrap();
        dec_d(&x, &wavelet, &mut d, Mode::Periodization).unwrap();
        let energy_in: f64 = x.iter().map(|v| v * v).sum();
        let energy_out: f64 = a.iter().chain(d.iter()).map(|v| v * v).sum();
        assert!((energy_in - energy_out).abs() < 1e-9);
    }

    #[test]
    fn idwt_is_a_noop_on_size_mismatch() {
        let wavelet = Wavelet::<f64>::haar();
        let a = [1.0_f64, 2.0];
        let mut output = vec![9.0_f64; 1];
        idwt(Some(&a), None, &mut output, &wavelet, Mode::Periodization).unwrap();
        assert_eq!(output, vec![9.0]);
    }

    #[test]
    fn idwt_reconstructs_exactly_from_full_coefficient_pair() {
        let wavelet = Wavelet::<f64>::haar();
        let x = [1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let len = blo::dwt_len(x.len(), wavelet.dec_len, Mode::Periodization);
        let mut a = vec![0.0; len];
        let mut d = vec![0.0; len];
        dec_a(&x, &wavelet, &mut a, Mode::Periodization).unwrap();
        dec_d(&x, &wavelet, &mut d, Mode::Periodization).unwrap();

        let out_len = blo::idwt_len_paired(a.len(), d.len(), wavelet.rec_len, Mode::Periodization);
        let mut recon = vec![0.0; out_len];
        idwt(Some(&a), Some(&d), &mut recon, &wavelet, Mode::Periodization).unwrap();

        for (orig, rec) in x.iter().zip(recon.iter()) {
            assert!((orig - rec).abs() < 1e-9);
        }
    }

    #[test]
    fn swt_rejects_level_above_max() {
        let wavelet = Wavelet::<f64>::haar();
        let x = [1.0_f64, 2.0, 3.0];
        let mut out = vec![0.0; 3];
        let err = swt_a(&x, &wavelet, &mut out, 5).unwrap_err();
        assert_eq!(err, Error::LevelTooHigh);
    }

    #[test]
    fn swt_preserves_signal_length_at_every_level() {
        let wavelet = Wavelet::<f64>::haar();
        let x: Vec<f64> = (0..16).map(|i| i as f64).collect();
        for level in 1..=4u32 {
            let mut out = vec![0.0; x.len()];
            swt_a(&x, &wavelet, &mut out, level).unwrap();
            assert_eq!(out.len(), x.len());
        }
    }
}
