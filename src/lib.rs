//! Driver for the Phyta plant-grid simulation: run loop, output sinks and
//! config loading. The engine itself lives in `phyta_core`.

pub mod app;
pub mod sink;
