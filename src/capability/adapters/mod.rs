//! Adapter implementations for capability ports.

pub mod memory;
