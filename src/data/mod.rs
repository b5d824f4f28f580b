//! Data layer: core types, generation, filtering, and output.
//!
//! Architecture:
//! ```text
//!   GeneratorConfig
//!        │
//!        ▼
//!   ┌───────────┐
//!   │ generator │  waveform + uniform noise → Series
//!   └───────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  Series  │  timestamps + row-major channel buffer
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter  │  MAV / EMA recurrence per channel → new Series
//!   └──────────┘   (run twice: second pass eats the first's output)
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  writer  │  Series → tab-separated text
//!   └──────────┘
//! ```
pub mod filter;
pub mod generator;
pub mod model;
pub mod writer;
