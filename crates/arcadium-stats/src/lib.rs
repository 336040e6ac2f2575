//! Statistics utilities for summarizing fitness distributions over
//! batches of simulation runs.

pub use self::descriptive::DescriptiveStats;

pub mod descriptive;
