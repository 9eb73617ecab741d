//! Unit tests for the capability registry.

mod domain_tests;
