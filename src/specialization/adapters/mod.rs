//! Adapter implementations for specialization ports.

pub mod memory;
