//! Synthetic signal generation and causal smoothing.
//!
//! [`data::generator`] builds a noisy multi-channel [`data::model::Series`],
//! [`data::filter`] smooths it with a moving or exponential moving average,
//! and [`data::writer`] dumps series as tab-separated text. [`pipeline`]
//! strings the three together the way the binary runs them.

pub mod data;
pub mod error;
pub mod pipeline;
