use super::Recurrence;
use crate::error::FilterError;

/// Exponential moving average with constant alpha in (0,1].
///
/// The first output is `alpha * raw[0]` rather than `raw[0]`, so the filter
/// starts from zero and charges toward the signal like an RC circuit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialMovingAverage {
    alpha: f64,
}

impl ExponentialMovingAverage {
    pub fn new(alpha: f64) -> Result<Self, FilterError> {
        if !(alpha > 0.0 && alpha <= 1.0) {
            return Err(FilterError::InvalidAlpha(alpha));
        }
        Ok(Self { alpha })
    }
}

impl Recurrence for ExponentialMovingAverage {
    fn step(&self, k: usize, raw: &[f64], prior: &[f64]) -> f64 {
        if k == 0 {
            return self.alpha * raw[0];
        }
        self.alpha * raw[k] + (1.0 - self.alpha) * prior[k - 1]
    }
}
