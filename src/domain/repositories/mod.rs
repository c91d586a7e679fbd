//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access following the Repository pattern and are
//! implemented by concrete repositories in the infrastructure layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Services hold them as `Arc<dyn Trait>` so handlers and tests can inject
//!   any implementation
//! - Mock implementations are auto-generated via `mockall` for unit tests
//!
//! # Available Repositories
//!
//! - [`ProfileRepository`] - Account profiles and the premium flag
//! - [`PageRepository`] - Public bio pages
//! - [`LinkRepository`] - Link CRUD and ordering
//! - [`AnalyticsRepository`] - Atomic counters and analytics reads
//! - [`BillingRepository`] - Payment customer mappings

pub mod analytics_repository;
pub mod billing_repository;
pub mod link_repository;
pub mod page_repository;
pub mod profile_repository;

pub use analytics_repository::AnalyticsRepository;
pub use billing_repository::BillingRepository;
pub use link_repository::LinkRepository;
pub use page_repository::PageRepository;
pub use profile_repository::ProfileRepository;

#[cfg(test)]
pub use analytics_repository::MockAnalyticsRepository;
#[cfg(test)]
pub use billing_repository::MockBillingRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use page_repository::MockPageRepository;
#[cfg(test)]
pub use profile_repository::MockProfileRepository;
