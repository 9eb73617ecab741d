//! Step definitions for route discovery scenarios.

mod given;
mod then;
mod when;
pub mod world;
