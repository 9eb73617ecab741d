//! Unit tests for the specialization context.

mod analytics_tests;
