//! # chronicle-service
//!
//! The operation surface consumed by a tool-dispatch front end. Every
//! collaborator (graph store, embedder, pairwise scorer) is an explicitly
//! constructed dependency injected at startup; there is no ambient global
//! state. Dropping the service closes the store.

pub mod service;
pub mod telemetry;

pub use service::ChronicleService;
