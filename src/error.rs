//! Error types for the data layer.
//!
//! Each stage of the pipeline owns one error enum so callers can match on the
//! exact failure. The binary and the pipeline wrap these with `anyhow`.

use thiserror::Error;

use crate::data::filter::FilterMethod;

/// A sample violated the shape or ordering invariants of a [`Series`].
///
/// [`Series`]: crate::data::model::Series
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    #[error("a series needs at least one data channel")]
    NoChannels,

    #[error("sample {index} has {found} channels, expected {expected}")]
    ChannelMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("timestamp {timestamp} at sample {index} precedes previous timestamp {previous}")]
    NonMonotonic {
        index: usize,
        previous: f64,
        timestamp: f64,
    },

    #[error("timestamp at sample {index} is not finite")]
    NonFinite { index: usize },

    #[error("{samples} samples x {channel_count} channels overflows the buffer size")]
    CapacityOverflow {
        samples: usize,
        channel_count: usize,
    },
}

/// Invalid signal generator parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeneratorError {
    #[error("duration must be positive and finite, got {0}")]
    InvalidDuration(f64),

    #[error("sample interval must be positive and finite, got {0}")]
    InvalidInterval(f64),

    #[error("frequency must be finite, got {0}")]
    InvalidFrequency(f64),

    #[error("SNR must be non-negative and finite, got {0}")]
    InvalidSnr(f64),

    #[error("{samples} samples x {channels} channels exceeds the limit of {limit} values")]
    TooLarge {
        samples: f64,
        channels: usize,
        limit: usize,
    },

    #[error(transparent)]
    Series(#[from] SeriesError),
}

/// Filter configuration errors. All of them are raised before any sample is
/// computed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    #[error("moving-average window size must be at least 1")]
    InvalidWindow,

    #[error("smoothing factor must lie in (0, 1], got {0}")]
    InvalidAlpha(f64),

    #[error("RC time constant must be non-negative and sample interval positive (rc = {rc}, dt = {dt})")]
    InvalidTimeConstant { rc: f64, dt: f64 },

    #[error("{0} filtering is not implemented")]
    UnimplementedMethod(FilterMethod),
}
