// src/processing/mod.rs
//! Signal conditioning for sEMG limb channels

pub mod envelope;
pub mod quadrature;

pub use envelope::{ChannelMetrics, ChannelProcessor};
