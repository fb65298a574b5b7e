//! Unit tests for the crate-level configuration, error and logging modules.
