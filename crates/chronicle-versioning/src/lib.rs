//! # chronicle-versioning
//!
//! The Version Chain Manager. Owns the invariant "each project has exactly
//! one current summary" and performs the atomic detach-and-relink update
//! that appends a new summary to a project's history.

pub mod engine;

pub use engine::{UpsertRequest, VersionChainManager};
