//! Unit tests for the agent health context.

mod domain_tests;
mod monitor_tests;
