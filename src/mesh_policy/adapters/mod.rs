//! Adapter implementations for policy report ports.

pub mod memory;
