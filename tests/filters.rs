use rusty_smoother::data::filter::{FilterSpec, double_pass, filter};
use rusty_smoother::data::generator::{GeneratorConfig, Waveform, generate};
use rusty_smoother::data::model::{Series, SeriesBuilder};
use rusty_smoother::error::FilterError;
use rusty_smoother::pipeline::{self, PipelineConfig};

fn constant(value: f64, len: usize, channels: usize) -> Series {
    let mut b = SeriesBuilder::new(channels).unwrap();
    let row = vec![value; channels];
    for i in 0..len {
        b.push(i as f64 * 0.01, &row).unwrap();
    }
    b.build()
}

fn noisy_sine() -> Series {
    generate(&GeneratorConfig {
        waveform: Waveform::Sine,
        frequency_hz: 5.0,
        duration_s: 1.0,
        interval_s: 0.001,
        channels: 2,
        snr: 0.5,
        seed: 3,
    })
    .unwrap()
}

#[test]
fn both_methods_preserve_shape() {
    let raw = noisy_sine();
    for spec in [
        FilterSpec::MovingAverage { window: 20 },
        FilterSpec::ExponentialMovingAverage { alpha: 0.07 },
    ] {
        let out = filter(&spec, &raw).unwrap();
        assert_eq!(out.len(), raw.len());
        assert_eq!(out.channel_count(), raw.channel_count());
        assert_eq!(out.timestamps(), raw.timestamps());
    }
}

#[test]
fn input_is_left_untouched() {
    let raw = noisy_sine();
    let copy = raw.clone();
    let _ = double_pass(&FilterSpec::ExponentialMovingAverage { alpha: 0.3 }, &raw).unwrap();
    assert_eq!(raw, copy);
}

#[test]
fn cold_start_hits_the_last_sample() {
    let raw = noisy_sine();
    let last = raw.len() - 1;

    let mav = filter(&FilterSpec::MovingAverage { window: 20 }, &raw).unwrap();
    assert_eq!(mav.sample(last).unwrap().channels, raw.sample(last).unwrap().channels);

    let alpha = 0.07;
    let ema = filter(&FilterSpec::ExponentialMovingAverage { alpha }, &raw).unwrap();
    for (y, x) in ema
        .sample(last)
        .unwrap()
        .channels
        .iter()
        .zip(raw.sample(last).unwrap().channels)
    {
        assert_eq!(*y, alpha * x);
    }
}

#[test]
fn moving_average_of_constant_is_exact() {
    let raw = constant(1.5, 200, 3);
    let out = filter(&FilterSpec::MovingAverage { window: 20 }, &raw).unwrap();
    assert_eq!(out, raw);
    assert_eq!(double_pass(&FilterSpec::MovingAverage { window: 7 }, &raw).unwrap(), raw);
}

#[test]
fn exponential_residual_follows_closed_form() {
    let alpha = 0.07;
    let c = 2.0;
    let n = 300;
    let raw = constant(c, n, 1);
    let out = filter(&FilterSpec::ExponentialMovingAverage { alpha }, &raw).unwrap();
    let processed: Vec<f64> = out.channel(0).rev().collect();

    let initial = c - processed[0];
    assert!((initial - (1.0 - alpha) * c).abs() < 1e-12);
    for (k, y) in processed.iter().enumerate() {
        let expected = (1.0 - alpha).powi(k as i32) * initial;
        assert!(((c - y) - expected).abs() < 1e-9, "step {k}");
    }
    // steady state: a 300-step run leaves a residual far below 1e-6
    assert!((out.channel(0).next().unwrap() - c).abs() < 1e-6);
}

#[test]
fn kalman_aborts_without_output_files() {
    let dir = tempfile::tempdir().unwrap();
    let raw_path = dir.path().join("raw.txt");
    let filtered_path = dir.path().join("filtered.txt");
    let config = PipelineConfig {
        filter: FilterSpec::Kalman,
        ..Default::default()
    };

    let err = pipeline::run(&config, &raw_path, &filtered_path).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<FilterError>(),
        Some(FilterError::UnimplementedMethod(_))
    ));
    assert!(!raw_path.exists());
    assert!(!filtered_path.exists());
}

#[test]
fn invalid_window_aborts_without_output_files() {
    let dir = tempfile::tempdir().unwrap();
    let raw_path = dir.path().join("raw.txt");
    let filtered_path = dir.path().join("filtered.txt");
    let config = PipelineConfig {
        filter: FilterSpec::MovingAverage { window: 0 },
        ..Default::default()
    };

    assert!(pipeline::run(&config, &raw_path, &filtered_path).is_err());
    assert!(!raw_path.exists());
    assert!(!filtered_path.exists());
}

#[test]
fn double_moving_average_on_sine() {
    let window = 20;
    let raw = generate(&GeneratorConfig::default()).unwrap();
    assert_eq!(raw.len(), 1000);

    let spec = FilterSpec::MovingAverage { window };
    let first = filter(&spec, &raw).unwrap();
    let second = double_pass(&spec, &raw).unwrap();
    assert_eq!(second.len(), 1000);
    assert_eq!(second.timestamps(), raw.timestamps());

    let n = raw.len();
    for j in 0..raw.channel_count() {
        let raw_c: Vec<f64> = raw.channel(j).collect();
        let first_c: Vec<f64> = first.channel(j).collect();
        let second_c: Vec<f64> = second.channel(j).collect();

        // pass 1 cold-starts at the last sample, pass 2 at the first
        assert_eq!(first_c[n - 1], raw_c[n - 1]);
        assert_eq!(second_c[0], first_c[0]);

        // from index 20 on, each value is the 20-point mean of the first
        // pass over positions i-19..=i
        for i in window..n {
            let mean: f64 = first_c[i + 1 - window..=i].iter().sum::<f64>() / window as f64;
            assert!((second_c[i] - mean).abs() < 1e-9, "channel {j}, index {i}");
        }
    }
}

// ---------------------------------------------------------------------------
// Reference: row-vector recurrence, one row = [timestamp, channels...]
// ---------------------------------------------------------------------------

#[derive(Clone, Copy)]
enum Reference {
    Mav(usize),
    Ema(f64),
}

/// Reverses its input and returns outputs in processing order, exactly as
/// the row-based reference tool does.
fn reference_pass(method: Reference, mut rows: Vec<Vec<f64>>) -> Vec<Vec<f64>> {
    rows.reverse();
    let mut out: Vec<Vec<f64>> = Vec::with_capacity(rows.len());
    for (idx, row) in rows.iter().enumerate() {
        let mut xy = vec![0.0; row.len()];
        xy[0] = row[0];
        for j in 1..row.len() {
            xy[j] = match method {
                Reference::Mav(w) => {
                    if idx < 1 {
                        row[j]
                    } else if idx < w {
                        (out[idx - 1][j] * idx as f64 + row[j]) / (idx + 1) as f64
                    } else {
                        (out[idx - 1][j] * w as f64 + row[j] - rows[idx - w][j]) / w as f64
                    }
                }
                Reference::Ema(alpha) => {
                    if idx < 1 {
                        alpha * row[j]
                    } else {
                        alpha * row[j] + (1.0 - alpha) * out[idx - 1][j]
                    }
                }
            };
        }
        out.push(xy);
    }
    out
}

fn rows_of(series: &Series) -> Vec<Vec<f64>> {
    series
        .samples()
        .map(|s| {
            let mut row = vec![s.timestamp];
            row.extend_from_slice(s.channels);
            row
        })
        .collect()
}

#[test]
fn double_pass_matches_reference_rows() {
    let mut b = SeriesBuilder::new(1).unwrap();
    for (t, x) in [1.0, 4.0, 2.0, 8.0, 5.0, 3.0].into_iter().enumerate() {
        b.push(t as f64, &[x]).unwrap();
    }
    let raw = b.build();

    let method = Reference::Mav(2);
    let expected = reference_pass(method, reference_pass(method, rows_of(&raw)));
    assert_eq!(
        expected,
        vec![
            vec![0.0, 2.5],
            vec![1.0, 2.75],
            vec![2.0, 4.0],
            vec![3.0, 5.75],
            vec![4.0, 5.25],
            vec![5.0, 3.5],
        ]
    );

    let got = double_pass(&FilterSpec::MovingAverage { window: 2 }, &raw).unwrap();
    assert_eq!(rows_of(&got), expected);
}

#[test]
fn double_pass_matches_reference_on_noisy_sine() {
    let raw = noisy_sine();
    for (spec, method) in [
        (FilterSpec::MovingAverage { window: 20 }, Reference::Mav(20)),
        (FilterSpec::ExponentialMovingAverage { alpha: 0.07 }, Reference::Ema(0.07)),
    ] {
        let expected = reference_pass(method, reference_pass(method, rows_of(&raw)));
        let got = double_pass(&spec, &raw).unwrap();
        assert_eq!(rows_of(&got), expected, "{spec:?}");
    }
}
