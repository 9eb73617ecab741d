//! Adapter implementations for route ports.

pub mod memory;
