// src/io/mod.rs
//! Flat-file interfaces of the pipeline

pub mod summary;
pub mod tables;

pub use summary::write_summary;
pub use tables::{ColumnTable, LimbData};
