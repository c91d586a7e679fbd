//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx with
//! bound parameters for every user-supplied value.
//!
//! # Repositories
//!
//! - [`PgProfileRepository`] - Profiles and the premium flag
//! - [`PgPageRepository`] - Bio pages with unique usernames
//! - [`PgLinkRepository`] - Link storage, ordering and visibility
//! - [`PgAnalyticsRepository`] - Atomic counters and analytics reads
//! - [`PgBillingRepository`] - Payment customer mappings

pub mod pg_analytics_repository;
pub mod pg_billing_repository;
pub mod pg_link_repository;
pub mod pg_page_repository;
pub mod pg_profile_repository;

pub use pg_analytics_repository::PgAnalyticsRepository;
pub use pg_billing_repository::PgBillingRepository;
pub use pg_link_repository::PgLinkRepository;
pub use pg_page_repository::PgPageRepository;
pub use pg_profile_repository::PgProfileRepository;
