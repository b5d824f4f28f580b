use super::Recurrence;
use crate::error::FilterError;

/// Running mean over a fixed window, computed incrementally.
///
/// Until the window fills the output is the cumulative mean of everything
/// seen so far; afterwards the oldest raw sample leaves the window as the
/// newest enters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovingAverage {
    window: usize,
}

impl MovingAverage {
    pub fn new(window: usize) -> Result<Self, FilterError> {
        if window == 0 {
            return Err(FilterError::InvalidWindow);
        }
        Ok(Self { window })
    }
}

impl Recurrence for MovingAverage {
    fn step(&self, k: usize, raw: &[f64], prior: &[f64]) -> f64 {
        if k == 0 {
            return raw[0];
        }
        let previous = prior[k - 1];
        if k < self.window {
            // Growing phase
            (previous * k as f64 + raw[k]) / (k + 1) as f64
        } else {
            let w = self.window as f64;
            (previous * w + raw[k] - raw[k - self.window]) / w
        }
    }
}
