//! Core types, lookup stages, and service wiring for the indytrash pickup-day resolver.

/// Stage failure reasons and the caller-facing sentences they map to.
pub mod failure;
/// Stage 2: parcel lookup.
pub mod locator;
/// Domain models shared by all providers.
pub mod model;
/// Stage 1: address normalization.
pub mod normalizer;
/// Logging initialisation.
pub mod observability;
/// Bundle of ports supplied by a provider.
pub mod plugin;
/// Traits describing the lookup service interfaces.
pub mod ports;
/// Stage 3: schedule lookup.
pub mod schedule;
/// High-level service facade used by clients.
pub mod service;

#[cfg(test)]
mod testing;

pub use failure::*;
pub use model::*;
pub use plugin::*;
pub use ports::*;
pub use service::*;
