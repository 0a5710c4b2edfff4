use thiserror::Error;

/// Error taxonomy for the convolution core.
///
/// Each variant carries the historical negative/positive integer code from
/// the C implementation this crate's semantics are grounded on, so callers
/// that need drop-in numeric compatibility can still retrieve it via
/// [`Error::code`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Output length does not match the Buffer-Length Oracle's prediction,
    /// or `N` is too small for `upsampling_convolution_valid_sf` under a
    /// non-periodization mode.
    #[error("output length does not match the expected buffer length")]
    SizeMismatch,

    /// An even-length filter was required but `F` is odd.
    #[error("filter length must be even")]
    FilterParity,

    /// Axis, dimension, or shape consistency was violated.
    #[error("array shape or axis is inconsistent with the requested operation")]
    ValidationFailure,

    /// A temporary contiguous line buffer could not be allocated.
    #[error("failed to allocate a temporary line buffer")]
    AllocationFailure,

    /// Neither approximation nor detail coefficients were supplied to an
    /// inverse-transform axis operation.
    #[error("at least one of the approximation or detail coefficients must be present")]
    MissingCoefficients,

    /// The requested SWT level exceeds `swt_max_level` for the signal.
    #[error("requested level exceeds the maximum supported stationary transform level")]
    LevelTooHigh,
}

impl Error {
    /// The historical C-contract integer code for this error.
    pub fn code(&self) -> i32 {
        match self {
            Error::SizeMismatch => -1,
            Error::FilterParity => -3,
            Error::ValidationFailure => 1,
            Error::AllocationFailure => 2,
            Error::MissingCoefficients => 3,
            Error::LevelTooHigh => -2,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
