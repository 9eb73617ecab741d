//! Unit tests for the agent capability context.
