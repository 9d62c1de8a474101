//! Adapters for the domain ports: in-memory stores, clocks, random sources
//! and identifier generation.

pub mod clock;
pub mod ids;
pub mod in_memory;
pub mod random;
