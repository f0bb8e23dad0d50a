//! Application layer
//!
//! This layer contains use cases that orchestrate domain logic to implement
//! application-specific workflows. Use cases coordinate domain services,
//! repositories, and other components to fulfill business requirements.

pub mod invoicing;
