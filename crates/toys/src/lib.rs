//! Toybox domain module (event-sourced).
//!
//! This crate contains the business rules for toys, implemented purely
//! as deterministic decision logic (no IO, no storage, no bus).

pub mod toy;

pub use toy::{AddToy, Color, RemoveToy, Toy, ToyAdded, ToyCommand, ToyDecider, ToyEvent, ToyRemoved};
