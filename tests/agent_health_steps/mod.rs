//! Step definitions for agent health scenarios.

mod given;
mod then;
mod when;
pub mod world;
