//! `toybox-runtime` — composition of the event-sourced pipeline.
//!
//! Wires the pure decision logic (`toybox-toys`) to the kernel
//! (`toybox-events`): the write model appends and publishes, the read
//! model subscribes and maintains projections.

pub mod projections;
pub mod read_model;
pub mod write_model;

#[cfg(test)]
mod integration_tests;

pub use projections::{ColorFilter, CurrentToys, EverSeen};
pub use read_model::ReadModel;
pub use write_model::{ExecuteError, WriteModel};
