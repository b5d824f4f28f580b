use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use super::model::Series;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Write a series to `path` as tab-separated text.
///
/// Layout: one line per sample, timestamp first, then every channel, each
/// field with six decimal places and no header row:
///
/// ```text
/// 0.000000	0.012345	-0.104211
/// 0.001000	0.043120	0.087702
/// ```
///
/// Lines end right after the last channel. Tables from older tools that put
/// a tab after every field, the last included, differ from this output by
/// that one trailing byte per line.
pub fn write_series(series: &Series, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating output file {}", path.display()))?;
    write_series_to(series, file).with_context(|| format!("writing {}", path.display()))?;
    log::info!(
        "wrote {} samples x {} channels to {}",
        series.len(),
        series.channel_count(),
        path.display()
    );
    Ok(())
}

/// Write a series to any sink using the same layout as [`write_series`].
pub fn write_series_to<W: Write>(series: &Series, sink: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(sink);

    let mut record = csv::StringRecord::with_capacity(0, series.channel_count() + 1);
    for (row_no, sample) in series.samples().enumerate() {
        record.clear();
        record.push_field(&format!("{:.6}", sample.timestamp));
        for v in sample.channels {
            record.push_field(&format!("{v:.6}"));
        }
        writer
            .write_record(&record)
            .with_context(|| format!("writing sample {row_no}"))?;
    }
    writer.flush().context("flushing output")?;
    Ok(())
}
