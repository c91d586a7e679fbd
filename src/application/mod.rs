//! Application layer services implementing business logic.
//!
//! Services hold repository trait objects, validate input and apply the
//! business rules; HTTP handlers only translate between DTOs and services.
//!
//! # Available Services
//!
//! - [`services::auth_service::AuthService`] - Session token verification
//! - [`services::profile_service::ProfileService`] - Profiles, pages and the public page
//! - [`services::link_service::LinkService`] - Link CRUD, ordering and click targets
//! - [`services::analytics_service::AnalyticsService`] - Dashboard analytics
//! - [`services::billing_service::BillingService`] - Premium checkout and webhooks

pub mod services;
