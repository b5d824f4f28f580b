use crate::error::SeriesError;

// ---------------------------------------------------------------------------
// Sample – one row of a series
// ---------------------------------------------------------------------------

/// Borrowed view of a single sample: its timestamp and channel values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample<'a> {
    pub timestamp: f64,
    pub channels: &'a [f64],
}

// ---------------------------------------------------------------------------
// Series – the complete multi-channel dataset
// ---------------------------------------------------------------------------

/// A time-ordered, multi-channel dataset.
///
/// Channel values are stored row-major in one contiguous buffer, so sample
/// `i` occupies `values[i * C .. (i + 1) * C]`. A `Series` has no mutators:
/// build one with [`SeriesBuilder`] and produce new ones instead of editing.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    channel_count: usize,
    timestamps: Vec<f64>,
    values: Vec<f64>,
}

impl Series {
    /// Number of samples.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Whether the series holds no samples.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Number of data channels (timestamp excluded).
    pub fn channel_count(&self) -> usize {
        self.channel_count
    }

    pub fn timestamps(&self) -> &[f64] {
        &self.timestamps
    }

    /// Sample at position `index` in forward-time order.
    pub fn sample(&self, index: usize) -> Option<Sample<'_>> {
        let timestamp = *self.timestamps.get(index)?;
        let start = index * self.channel_count;
        Some(Sample {
            timestamp,
            channels: &self.values[start..start + self.channel_count],
        })
    }

    /// All samples in forward-time order.
    pub fn samples(&self) -> impl ExactSizeIterator<Item = Sample<'_>> + '_ {
        self.timestamps
            .iter()
            .zip(self.values.chunks_exact(self.channel_count))
            .map(|(&timestamp, channels)| Sample {
                timestamp,
                channels,
            })
    }

    /// Values of one channel in forward-time order.
    ///
    /// # Panics
    /// If `channel >= self.channel_count()`.
    pub fn channel(
        &self,
        channel: usize,
    ) -> impl DoubleEndedIterator<Item = f64> + ExactSizeIterator + '_ {
        assert!(
            channel < self.channel_count,
            "channel {channel} out of range for {} channels",
            self.channel_count
        );
        self.values
            .chunks_exact(self.channel_count)
            .map(move |row| row[channel])
    }

    /// New series with this one's timestamps and shape but different
    /// row-major channel values.
    pub(crate) fn with_values(&self, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), self.values.len());
        Series {
            channel_count: self.channel_count,
            timestamps: self.timestamps.clone(),
            values,
        }
    }
}

// ---------------------------------------------------------------------------
// SeriesBuilder
// ---------------------------------------------------------------------------

/// Accumulates samples while checking the channel count and timestamp order.
#[derive(Debug)]
pub struct SeriesBuilder {
    channel_count: usize,
    timestamps: Vec<f64>,
    values: Vec<f64>,
}

impl SeriesBuilder {
    pub fn new(channel_count: usize) -> Result<Self, SeriesError> {
        Self::with_capacity(channel_count, 0)
    }

    /// Builder with room for `samples` samples.
    pub fn with_capacity(channel_count: usize, samples: usize) -> Result<Self, SeriesError> {
        if channel_count == 0 {
            return Err(SeriesError::NoChannels);
        }
        let values = samples
            .checked_mul(channel_count)
            .ok_or(SeriesError::CapacityOverflow {
                samples,
                channel_count,
            })?;
        Ok(Self {
            channel_count,
            timestamps: Vec::with_capacity(samples),
            values: Vec::with_capacity(values),
        })
    }

    /// Append one sample. Rejects the sample (leaving the builder untouched)
    /// if it has the wrong width or goes back in time.
    pub fn push(&mut self, timestamp: f64, channels: &[f64]) -> Result<(), SeriesError> {
        let index = self.timestamps.len();
        if channels.len() != self.channel_count {
            return Err(SeriesError::ChannelMismatch {
                index,
                expected: self.channel_count,
                found: channels.len(),
            });
        }
        if !timestamp.is_finite() {
            return Err(SeriesError::NonFinite { index });
        }
        if let Some(&previous) = self.timestamps.last() {
            if timestamp < previous {
                return Err(SeriesError::NonMonotonic {
                    index,
                    previous,
                    timestamp,
                });
            }
        }
        self.timestamps.push(timestamp);
        self.values.extend_from_slice(channels);
        Ok(())
    }

    pub fn build(self) -> Series {
        Series {
            channel_count: self.channel_count,
            timestamps: self.timestamps,
            values: self.values,
        }
    }
}
