//! The axis driver: applies a single-axis operation (decomposition or
//! reconstruction) across every other axis of an N-dimensional array.
//!
//! Shape and stride bookkeeping lives entirely here: [`crate::convolution`]
//! and [`crate::upsampling`] only ever see a contiguous `&[T]`/`&mut [T]`
//! line. When an axis is non-unit-strided this driver copies it into a
//! temporary contiguous buffer first (and copies the result back out for a
//! non-unit-strided output), rather than teaching the convolution
//! primitives to understand strides directly.

use crate::blo;
use crate::convolution::downsampling_convolution;
use crate::error::{Error, Result};
use crate::upsampling::upsampling_convolution_valid_sf;
use crate::wavelet::{Coefficient, Mode, Wavelet};
use num_traits::Float;
use std::mem::size_of;

/// Shape and strides of one view into a flat, row-major buffer.
///
/// `strides` are measured in **bytes**, matching the `ndarray`/buffer-
/// protocol convention this driver's layout comes from. A stride equal to
/// `size_of::<T>()` along the operating axis is the fast, no-copy path;
/// any other value triggers line copying into a temporary contiguous
/// buffer. The last dimension varies fastest for a default contiguous
/// layout, as built by [`ArrayInfo::row_major`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayInfo {
    pub shape: Vec<usize>,
    pub strides: Vec<isize>,
}

impl ArrayInfo {
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Byte strides for a C-contiguous (row-major, last axis fastest)
    /// array of this shape, holding elements of type `T`.
    pub fn row_major<T>(shape: Vec<usize>) -> Self {
        let elem = size_of::<T>() as isize;
        let mut strides = vec![elem; shape.len()];
        for i in (0..shape.len().saturating_sub(1)).rev() {
            strides[i] = strides[i + 1] * shape[i + 1] as isize;
        }
        ArrayInfo { shape, strides }
    }
}

/// Number of independent lines to process: the product of every
/// non-`axis` dimension's length.
fn loop_count(shape: &[usize], axis: usize) -> usize {
    shape.iter().enumerate().filter(|&(i, _)| i != axis).map(|(_, &s)| s).product()
}

/// Decomposes the byte offset for loop iteration `i` into per-axis
/// contributions against one or more `ArrayInfo`s, row-major with the last
/// axis varying fastest.
fn axis_offsets(i: usize, shape: &[usize], axis: usize, strides: &[&[isize]]) -> Vec<isize> {
    let ndim = shape.len();
    let mut offsets = vec![0isize; strides.len()];
    let mut reduced_idx = i;
    for j in 0..ndim {
        let j_rev = ndim - 1 - j;
        if j_rev != axis {
            let axis_idx = reduced_idx % shape[j_rev];
            reduced_idx /= shape[j_rev];
            for (k, s) in strides.iter().enumerate() {
                offsets[k] += axis_idx as isize * s[j_rev];
            }
        }
    }
    offsets
}

/// Converts a byte offset into the buffer into an element index. Byte
/// offsets built from `ArrayInfo::strides` are always exact multiples of
/// `size_of::<T>()`.
fn elem_index(byte_offset: isize, elem: isize) -> usize {
    (byte_offset / elem) as usize
}

/// Applies a single-level decomposition filter (approximation or detail)
/// along `axis`, writing into `output`.
pub fn downcoef_axis<T: Float>(
    input: &[T],
    input_info: &ArrayInfo,
    output: &mut [T],
    output_info: &ArrayInfo,
    wavelet: &Wavelet<T>,
    axis: usize,
    coef: Coefficient,
    mode: Mode,
) -> Result<()> {
    let elem = size_of::<T>() as isize;
    let ndim = input_info.ndim();
    if ndim != output_info.ndim() || axis >= ndim {
        log::warn!("downcoef_axis: shape/axis mismatch (ndim {} vs {}, axis {})", ndim, output_info.ndim(), axis);
        return Err(Error::ValidationFailure);
    }
    for i in 0..ndim {
        if i == axis {
            let expected = blo::dwt_len_offset(input_info.shape[i], wavelet.dec_len, coef, mode);
            if expected == 0 || expected != output_info.shape[i] {
                log::warn!("downcoef_axis: output axis length {} does not match expected {}", output_info.shape[i], expected);
                return Err(Error::ValidationFailure);
            }
        } else if input_info.shape[i] != output_info.shape[i] {
            log::warn!("downcoef_axis: non-axis dimension {} mismatched", i);
            return Err(Error::ValidationFailure);
        }
    }

    let make_temp_input = input_info.strides[axis] != elem;
    let make_temp_output = output_info.strides[axis] != elem;
    let num_loops = loop_count(&output_info.shape, axis);
    let filter = wavelet.decomposition_filter(coef);
    let input_axis_len = input_info.shape[axis];
    let output_axis_len = output_info.shape[axis];

    let mut temp_input = vec![T::zero(); if make_temp_input { input_axis_len } else { 0 }];
    let mut temp_output = vec![T::zero(); if make_temp_output { output_axis_len } else { 0 }];

    for i in 0..num_loops {
        let offsets = axis_offsets(i, &output_info.shape, axis, &[&input_info.strides, &output_info.strides]);
        let (input_offset, output_offset) = (offsets[0], offsets[1]);

        if make_temp_input {
            for j in 0..input_axis_len {
                let byte = input_offset + j as isize * input_info.strides[axis];
                temp_input[j] = input[elem_index(byte, elem)];
            }
        }
        let input_row: &[T] = if make_temp_input {
            &temp_input
        } else {
            let start = elem_index(input_offset, elem);
            &input[start..start + input_axis_len]
        };

        if make_temp_output {
            downsampling_convolution(input_row, filter, &mut temp_output, 2, mode);
            for j in 0..output_axis_len {
                let byte = output_offset + j as isize * output_info.strides[axis];
                output[elem_index(byte, elem)] = temp_output[j];
            }
        } else {
            let start = elem_index(output_offset, elem);
            downsampling_convolution(input_row, filter, &mut output[start..start + output_axis_len], 2, mode);
        }
    }

    Ok(())
}

/// Reconstructs a single level along `axis` from approximation and/or
/// detail coefficients, adding their contributions into a freshly
/// zero-filled `output`. At least one of `coefs_a`/`coefs_d` must be
/// supplied.
pub fn idwt_axis<T: Float>(
    coefs_a: Option<(&[T], &ArrayInfo)>,
    coefs_d: Option<(&[T], &ArrayInfo)>,
    output: &mut [T],
    output_info: &ArrayInfo,
    wavelet: &Wavelet<T>,
    axis: usize,
    mode: Mode,
) -> Result<()> {
    let elem = size_of::<T>() as isize;
    if coefs_a.is_none() && coefs_d.is_none() {
        log::warn!("idwt_axis: neither approximation nor detail coefficients supplied");
        return Err(Error::MissingCoefficients);
    }
    let ndim = output_info.ndim();
    if let Some((_, info)) = coefs_a {
        if info.ndim() != ndim {
            return Err(Error::ValidationFailure);
        }
    }
    if let Some((_, info)) = coefs_d {
        if info.ndim() != ndim {
            return Err(Error::ValidationFailure);
        }
    }
    if axis >= ndim {
        log::warn!("idwt_axis: axis {} out of bounds for ndim {}", axis, ndim);
        return Err(Error::ValidationFailure);
    }

    for i in 0..ndim {
        if i == axis {
            let a_len = coefs_a.map_or(0, |(_, info)| info.shape[i]);
            let d_len = coefs_d.map_or(0, |(_, info)| info.shape[i]);
            let expected = blo::idwt_len_paired(a_len, d_len, wavelet.rec_len, mode);
            if expected == 0 || expected != output_info.shape[i] {
                log::warn!("idwt_axis: output axis length {} does not match expected {}", output_info.shape[i], expected);
                return Err(Error::ValidationFailure);
            }
        } else {
            if let Some((_, info)) = coefs_a {
                if info.shape[i] != output_info.shape[i] {
                    return Err(Error::ValidationFailure);
                }
            }
            if let Some((_, info)) = coefs_d {
                if info.shape[i] != output_info.shape[i] {
                    return Err(Error::ValidationFailure);
                }
            }
        }
    }

    let make_temp_a = coefs_a.is_some_and(|(_, info)| info.strides[axis] != elem);
    let make_temp_d = coefs_d.is_some_and(|(_, info)| info.strides[axis] != elem);
    let make_temp_output = output_info.strides[axis] != elem;
    let num_loops = loop_count(&output_info.shape, axis);
    let output_axis_len = output_info.shape[axis];

    let mut temp_a = vec![T::zero(); if make_temp_a { coefs_a.unwrap().1.shape[axis] } else { 0 }];
    let mut temp_d = vec![T::zero(); if make_temp_d { coefs_d.unwrap().1.shape[axis] } else { 0 }];
    let mut temp_output = vec![T::zero(); if make_temp_output { output_axis_len } else { 0 }];

    let a_strides = coefs_a.map(|(_, info)| info.strides.as_slice());
    let d_strides = coefs_d.map(|(_, info)| info.strides.as_slice());

    for i in 0..num_loops {
        let mut reduced_idx = i;
        let mut a_offset = 0isize;
        let mut d_offset = 0isize;
        let mut output_offset = 0isize;
        for j in 0..ndim {
            let j_rev = ndim - 1 - j;
            if j_rev != axis {
                let axis_idx = reduced_idx % output_info.shape[j_rev];
                reduced_idx /= output_info.shape[j_rev];
                if let Some(s) = a_strides {
                    a_offset += axis_idx as isize * s[j_rev];
                }
                if let Some(s) = d_strides {
                    d_offset += axis_idx as isize * s[j_rev];
                }
                output_offset += axis_idx as isize * output_info.strides[j_rev];
            }
        }

        if let (Some((data, info)), true) = (coefs_a, make_temp_a) {
            for j in 0..info.shape[axis] {
                let byte = a_offset + j as isize * info.strides[axis];
                temp_a[j] = data[elem_index(byte, elem)];
            }
        }
        if let (Some((data, info)), true) = (coefs_d, make_temp_d) {
            for j in 0..info.shape[axis] {
                let byte = d_offset + j as isize * info.strides[axis];
                temp_d[j] = data[elem_index(byte, elem)];
            }
        }

        {
            let out_slice: &mut [T] = if make_temp_output {
                &mut temp_output
            } else {
                let start = elem_index(output_offset, elem);
                &mut output[start..start + output_axis_len]
            };
            for v in out_slice.iter_mut() {
                *v = T::zero();
            }

            if let Some((data, info)) = coefs_a {
                let a_row: &[T] = if make_temp_a {
                    &temp_a
                } else {
                    let start = elem_index(a_offset, elem);
                    &data[start..start + info.shape[axis]]
                };
                upsampling_convolution_valid_sf(a_row, &wavelet.rec_lo, out_slice, mode)?;
            }
            if let Some((data, info)) = coefs_d {
                let d_row: &[T] = if make_temp_d {
                    &temp_d
                } else {
                    let start = elem_index(d_offset, elem);
                    &data[start..start + info.shape[axis]]
                };
                upsampling_convolution_valid_sf(d_row, &wavelet.rec_hi, out_slice, mode)?;
            }
        }

        if make_temp_output {
            for j in 0..output_axis_len {
                let byte = output_offset + j as isize * output_info.strides[axis];
                output[elem_index(byte, elem)] = temp_output[j];
            }
        }
    }

    Ok(())
}
