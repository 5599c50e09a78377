//! Common test utilities shared across the integration suites

pub mod factories;
pub mod mocks;

#[allow(unused_imports)]
pub use factories::*;
#[allow(unused_imports)]
pub use mocks::*;
