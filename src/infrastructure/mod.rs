//! Infrastructure layer - Artifact loading, services and observability

pub mod artifacts;
pub mod logging;
pub mod observability;
pub mod services;
