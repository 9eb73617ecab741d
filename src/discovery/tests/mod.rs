//! Unit tests for the discovery context.

mod service_tests;
