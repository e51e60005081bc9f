//! Shared test utilities for aup integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. All fixtures are pinned to [`fixtures::now`] so results never
//! depend on the wall clock.

pub mod assertions;
pub mod builders;
pub mod fake_feed_api;
pub mod fixtures;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
