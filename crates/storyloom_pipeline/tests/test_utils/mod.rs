//! Shared test utilities for pipeline tests.

#![allow(dead_code)]

pub mod fixtures;
pub mod mock_services;

pub use fixtures::*;
pub use mock_services::*;
