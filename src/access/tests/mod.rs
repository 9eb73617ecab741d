//! Unit tests for the access guard and adapters.
