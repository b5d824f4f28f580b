//! Filter engine: causal smoothing recurrences over a [`Series`].
//!
//! Every channel is run independently in reverse input order: the
//! chronologically last sample is recurrence index 0 (cold start) and the
//! recurrence walks back toward the first sample. Results are stored back at
//! their original positions, so the output lines up with the input sample for
//! sample.
//!
//! Repeated passes hand their output on in the order they produced it, so
//! the second pass cold-starts at the chronologically first sample.

mod exponential;
mod moving_average;

use std::fmt;

use serde::{Deserialize, Serialize};

use super::model::Series;
use crate::error::FilterError;

pub use exponential::ExponentialMovingAverage;
pub use moving_average::MovingAverage;

/// One step of a per-channel causal recurrence.
pub trait Recurrence {
    /// Output at recurrence index `k`.
    ///
    /// `raw` holds the channel's input for indices `0..=k` and `prior` the
    /// outputs already computed for indices `0..k`, both in processing order.
    fn step(&self, k: usize, raw: &[f64], prior: &[f64]) -> f64;
}

/// Bare filter method tag, without parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterMethod {
    MovingAverage,
    ExponentialMovingAverage,
    Kalman,
}

impl fmt::Display for FilterMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterMethod::MovingAverage => write!(f, "moving-average"),
            FilterMethod::ExponentialMovingAverage => write!(f, "exponential-moving-average"),
            FilterMethod::Kalman => write!(f, "Kalman"),
        }
    }
}

/// Supported filters with their parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum FilterSpec {
    /// Running mean over the last `window` samples.
    MovingAverage { window: usize },
    /// First-order recursive low-pass with smoothing factor `alpha` in (0, 1].
    ExponentialMovingAverage { alpha: f64 },
    /// Reserved; selecting it is a configuration error.
    Kalman,
}

impl FilterSpec {
    /// EMA whose smoothing factor is the discrete RC low-pass approximation
    /// `alpha = dt / (rc + dt)`.
    pub fn rc_lowpass(rc: f64, dt: f64) -> Result<Self, FilterError> {
        if !(rc.is_finite() && dt.is_finite() && rc >= 0.0 && dt > 0.0) {
            return Err(FilterError::InvalidTimeConstant { rc, dt });
        }
        let spec = FilterSpec::ExponentialMovingAverage {
            alpha: dt / (rc + dt),
        };
        spec.validate()?;
        Ok(spec)
    }

    pub fn method(&self) -> FilterMethod {
        match self {
            FilterSpec::MovingAverage { .. } => FilterMethod::MovingAverage,
            FilterSpec::ExponentialMovingAverage { .. } => FilterMethod::ExponentialMovingAverage,
            FilterSpec::Kalman => FilterMethod::Kalman,
        }
    }

    /// Check the parameters without building anything.
    pub fn validate(&self) -> Result<(), FilterError> {
        self.recurrence().map(|_| ())
    }

    /// Resolve the spec to its recurrence.
    pub fn recurrence(&self) -> Result<Box<dyn Recurrence>, FilterError> {
        match *self {
            FilterSpec::MovingAverage { window } => Ok(Box::new(MovingAverage::new(window)?)),
            FilterSpec::ExponentialMovingAverage { alpha } => {
                Ok(Box::new(ExponentialMovingAverage::new(alpha)?))
            }
            FilterSpec::Kalman => Err(FilterError::UnimplementedMethod(FilterMethod::Kalman)),
        }
    }
}

/// Direction a pass walks the series in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Order {
    /// Last sample is index 0.
    Reversed,
    /// First sample is index 0.
    Chronological,
}

impl Order {
    fn flipped(self) -> Self {
        match self {
            Order::Reversed => Order::Chronological,
            Order::Chronological => Order::Reversed,
        }
    }
}

/// Run one filtering pass over every channel of `input`.
///
/// Returns a new series with the input's timestamps; `input` is left as is.
pub fn filter(spec: &FilterSpec, input: &Series) -> Result<Series, FilterError> {
    filter_in_order(spec, input, Order::Reversed)
}

fn filter_in_order(spec: &FilterSpec, input: &Series, order: Order) -> Result<Series, FilterError> {
    let recurrence = spec.recurrence()?;
    let n = input.len();
    let channels = input.channel_count();
    log::debug!(
        "{} pass over {n} samples x {channels} channels ({order:?})",
        spec.method()
    );

    let position = |k: usize| match order {
        Order::Reversed => n - 1 - k,
        Order::Chronological => k,
    };
    let mut values = vec![0.0; n * channels];
    let mut raw = Vec::with_capacity(n);
    let mut prior = Vec::with_capacity(n);
    for j in 0..channels {
        raw.clear();
        match order {
            Order::Reversed => raw.extend(input.channel(j).rev()),
            Order::Chronological => raw.extend(input.channel(j)),
        }
        prior.clear();
        for k in 0..n {
            let y = recurrence.step(k, &raw[..=k], &prior);
            prior.push(y);
        }
        for (k, y) in prior.iter().enumerate() {
            values[position(k) * channels + j] = *y;
        }
    }
    Ok(input.with_values(values))
}

/// Filter the filtered output a second time with the same spec.
///
/// See [`filter_passes`] for the order each pass walks the series in.
pub fn double_pass(spec: &FilterSpec, input: &Series) -> Result<Series, FilterError> {
    filter_passes(spec, input, 2)
}

/// Apply `passes` consecutive passes, each consuming the previous output.
///
/// Every pass walks its input backwards from the order the previous pass
/// produced it in: pass 1 starts at the last sample, pass 2 at the first,
/// pass 3 at the last again. Results always sit at their original positions.
pub fn filter_passes(spec: &FilterSpec, input: &Series, passes: usize) -> Result<Series, FilterError> {
    spec.validate()?;
    if passes == 0 {
        return Ok(input.clone());
    }
    let mut order = Order::Reversed;
    let mut current = filter_in_order(spec, input, order)?;
    for pass in 2..=passes {
        order = order.flipped();
        current = filter_in_order(spec, &current, order)?;
        log::debug!("finished pass {pass}/{passes}");
    }
    Ok(current)
}
