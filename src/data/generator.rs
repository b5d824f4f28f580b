use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use super::model::{Series, SeriesBuilder};
use crate::error::GeneratorError;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Upper bound on `samples * channels` for one generated series.
pub const MAX_VALUES: usize = 1 << 28;

/// Closed-form waveform driving every channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Waveform {
    Sine,
    Cosine,
}

impl Waveform {
    fn eval(self, phase: f64) -> f64 {
        match self {
            Waveform::Sine => phase.sin(),
            Waveform::Cosine => phase.cos(),
        }
    }
}

/// Parameters for a synthetic series.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub waveform: Waveform,
    /// Waveform frequency in Hz.
    pub frequency_hz: f64,
    /// Total span in seconds.
    pub duration_s: f64,
    /// Sampling interval in seconds.
    pub interval_s: f64,
    pub channels: usize,
    /// Peak-to-peak width of the uniform noise added to each value.
    pub snr: f64,
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            waveform: Waveform::Sine,
            frequency_hz: 5.0,
            duration_s: 1.0,
            interval_s: 0.001,
            channels: 2,
            snr: 0.5,
            seed: 42,
        }
    }
}

impl GeneratorConfig {
    /// `ceil(duration / interval)`, snapping ratios that are integral up to
    /// rounding noise so 1 s at 1 ms gives exactly 1000 samples.
    pub fn sample_count(&self) -> usize {
        let ratio = self.duration_s / self.interval_s;
        let nearest = ratio.round();
        if (ratio - nearest).abs() < 1e-9 {
            nearest as usize
        } else {
            ratio.ceil() as usize
        }
    }

    fn validate(&self) -> Result<(), GeneratorError> {
        if !(self.duration_s.is_finite() && self.duration_s > 0.0) {
            return Err(GeneratorError::InvalidDuration(self.duration_s));
        }
        if !(self.interval_s.is_finite() && self.interval_s > 0.0) {
            return Err(GeneratorError::InvalidInterval(self.interval_s));
        }
        if !self.frequency_hz.is_finite() {
            return Err(GeneratorError::InvalidFrequency(self.frequency_hz));
        }
        if !(self.snr.is_finite() && self.snr >= 0.0) {
            return Err(GeneratorError::InvalidSnr(self.snr));
        }
        // bound the ratio before `sample_count` casts it
        let samples = (self.duration_s / self.interval_s).ceil();
        let within_limit = samples <= MAX_VALUES as f64
            && self
                .sample_count()
                .checked_mul(self.channels)
                .is_some_and(|values| values <= MAX_VALUES);
        if !within_limit {
            return Err(GeneratorError::TooLarge {
                samples,
                channels: self.channels,
                limit: MAX_VALUES,
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Produce a noisy waveform series.
///
/// Sample `i` sits at `t = i * dt`; every channel carries
/// `wave(2π f t) + u` with `u` uniform in `[-snr/2, snr/2)`, drawn
/// independently per channel.
pub fn generate(config: &GeneratorConfig) -> Result<Series, GeneratorError> {
    config.validate()?;
    let n = config.sample_count();
    let mut rng = SimpleRng::new(config.seed);
    let mut builder = SeriesBuilder::with_capacity(config.channels, n)?;
    let mut row = vec![0.0; config.channels];

    for i in 0..n {
        let t = i as f64 * config.interval_s;
        let clean = config.waveform.eval(2.0 * PI * config.frequency_hz * t);
        for v in &mut row {
            *v = clean + rng.uniform(config.snr);
        }
        builder.push(t, &row)?;
    }

    log::debug!(
        "generated {n} samples x {} channels ({:?}, {} Hz)",
        config.channels,
        config.waveform,
        config.frequency_hz
    );
    Ok(builder.build())
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform in [0, 1).
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform in [-width/2, width/2).
    fn uniform(&mut self, width: f64) -> f64 {
        (self.next_f64() - 0.5) * width
    }
}
