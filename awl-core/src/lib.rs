//! Core types and service wiring for the AWL waste collection client.

/// Loading and validating the address configuration file.
pub mod config;
/// Deserialization helpers for loosely typed JSON fields.
pub mod de;
/// Domain models shared by the provider and the command line client.
pub mod model;
/// Traits describing the provider interfaces.
pub mod ports;
/// Bundle of ports implementing a single provider.
pub mod provider;
/// Next pickup resolution over a fetched schedule.
pub mod resolver;
/// High-level service facade used by clients.
pub mod service;

pub use model::*;
pub use ports::*;
pub use provider::*;
pub use service::*;
