//! Unit tests for the route registry.
