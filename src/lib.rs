//! Boundary-aware convolution primitives for discrete wavelet transforms.
//!
//! This crate is the numerical core of a DWT implementation: decimated and
//! upsampling convolution, the six boundary extension modes signal
//! processing libraries call "modes," an axis driver for applying a 1-D
//! operation across one axis of an N-dimensional array, and the buffer
//! length arithmetic needed to size output allocations ahead of time. It
//! does not read or write any particular array container, file format, or
//! wavelet coefficient table — callers supply filter taps and own their
//! buffers.
//!
//! Generic over `T: num_traits::Float`, instantiated at `f32` or `f64`.

pub mod array;
pub mod blo;
pub mod convolution;
pub mod error;
pub mod ops;
pub mod upsampling;
pub mod wavelet;

pub use array::{downcoef_axis, idwt_axis, ArrayInfo};
pub use error::{Error, Result};
pub use ops::{dec_a, dec_d, idwt, rec_a, rec_d, swt_a, swt_d};
pub use wavelet::{Coefficient, Mode, Wavelet};
