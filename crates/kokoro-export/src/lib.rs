//! Append-only training-data logs.
//!
//! Every successful exchange is written in three parallel line-delimited
//! encodings so any fine-tuning framework can consume the data directly.
//! Export-only: nothing here is ever read back by the running system.

pub mod exporter;
pub mod formats;

pub use exporter::TrainingExporter;

#[cfg(test)]
mod tests;
