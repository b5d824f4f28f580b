use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::data::filter::{FilterSpec, filter_passes};
use crate::data::generator::{GeneratorConfig, generate};
use crate::data::writer::write_series;

// ---------------------------------------------------------------------------
// Run configuration
// ---------------------------------------------------------------------------

/// Everything a run needs besides the two output paths.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub generator: GeneratorConfig,
    pub filter: FilterSpec,
    /// Number of filter passes; each consumes the previous pass's output.
    pub passes: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            generator: GeneratorConfig::default(),
            filter: FilterSpec::MovingAverage { window: 20 },
            passes: 2,
        }
    }
}

/// What a successful run produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub samples: usize,
    pub channels: usize,
    pub passes: usize,
}

// ---------------------------------------------------------------------------
// Entry-point
// ---------------------------------------------------------------------------

/// Generate, filter and write.
///
/// Configuration errors abort before either file is touched. Both writes are
/// attempted even if the first fails; any failure makes the run an error.
pub fn run(config: &PipelineConfig, raw_path: &Path, filtered_path: &Path) -> Result<RunSummary> {
    if log::log_enabled!(log::Level::Debug) {
        match serde_json::to_string(config) {
            Ok(json) => log::debug!("pipeline config: {json}"),
            Err(e) => log::debug!("pipeline config not serializable: {e}"),
        }
    }

    let raw = generate(&config.generator).context("generating synthetic signal")?;
    let filtered = filter_passes(&config.filter, &raw, config.passes)
        .with_context(|| format!("applying {} filter", config.filter.method()))?;
    log::info!(
        "filtered {} samples with {} ({} passes)",
        filtered.len(),
        config.filter.method(),
        config.passes
    );

    let mut failures = 0;
    for (series, path) in [(&raw, raw_path), (&filtered, filtered_path)] {
        if let Err(e) = write_series(series, path) {
            log::error!("{e:#}");
            failures += 1;
        }
    }
    if failures > 0 {
        bail!("{failures} of 2 output files could not be written");
    }

    Ok(RunSummary {
        samples: raw.len(),
        channels: raw.channel_count(),
        passes: config.passes,
    })
}
