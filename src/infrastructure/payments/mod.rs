//! Payment provider integration.
//!
//! - [`gateway`] - Provider-agnostic [`PaymentGateway`] trait
//! - [`stripe_gateway`] - Stripe REST implementation over `reqwest`
//! - [`webhook_signature`] - `Stripe-Signature` header verification

pub mod gateway;
pub mod stripe_gateway;
pub mod webhook_signature;

pub use gateway::{GatewayError, PaymentGateway};
pub use stripe_gateway::{StripeGateway, StripeSettings};
pub use webhook_signature::{SignatureError, verify_signature};

#[cfg(test)]
pub use gateway::MockPaymentGateway;
