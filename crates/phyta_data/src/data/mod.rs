//! Core data structures for the Phyta simulation.

pub mod entity;
pub mod event;
pub mod genome;
