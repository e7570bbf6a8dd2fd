//! Shared fixtures for the integration tests.

pub mod grammars;
pub mod language;
