//! Business logic services for the application layer.

pub mod analytics_service;
pub mod auth_service;
pub mod billing_service;
pub mod link_service;
pub mod profile_service;

pub use analytics_service::AnalyticsService;
pub use auth_service::AuthService;
pub use billing_service::{BillingService, WebhookOutcome, WebhookSettings};
pub use link_service::LinkService;
pub use profile_service::{PageInput, ProfileService, PublicPage};
