//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for data persistence and payment processing.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`payments`] - Payment provider client and webhook verification

pub mod payments;
pub mod persistence;
