//! # elastica-telemetry
//!
//! Event bus for simulation telemetry. The frame loop emits structured
//! events (timing, convergence, collisions, energy, scene changes) that
//! pluggable sinks consume.

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::EventBus;
pub use events::{EventKind, SimulationEvent};
pub use sinks::{EventSink, TracingSink, VecSink};
