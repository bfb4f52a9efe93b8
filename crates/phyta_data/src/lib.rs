//! Core data structures for the Phyta simulation.
//!
//! Everything in this crate is plain data: organisms, their DNA and the
//! events the engine reports. Behaviour lives in `phyta_core`.

pub mod data;

pub use data::entity::{Organism, OrganismId, Position};
pub use data::event::{DeathCause, WorldEvent};
pub use data::genome::{Color, Cycle, Decision, Dna};
