//! Concrete projections over the toybox event stream.
//!
//! Each projection is an incrementally maintained fold of the event log
//! prefix observed so far. Reads are snapshots of already-maintained
//! state; no projection recomputes from the log on read.

pub mod color_filter;
pub mod current_toys;
pub mod ever_seen;

pub use color_filter::ColorFilter;
pub use current_toys::CurrentToys;
pub use ever_seen::EverSeen;
