//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures; persistence rows are mapped into them
//! by the infrastructure layer.
//!
//! # Entity Types
//!
//! - [`Profile`] - Account record of an authenticated identity
//! - [`Page`] - Public bio page (one per profile)
//! - [`Link`] - Outbound link shown on a page
//! - [`DailyViews`] / [`AnalyticsOverview`] - Analytics read models
//! - [`BillingCustomer`] - Payment customer to profile mapping
//!
//! # Design Pattern
//!
//! Separate structs are used for writes:
//! - `ProfileUpsert`, `PageUpsert`, `NewLink` - For creating/replacing records
//! - `LinkPatch` - For partial updates

pub mod analytics;
pub mod auth_user;
pub mod billing;
pub mod link;
pub mod page;
pub mod profile;

pub use analytics::{AnalyticsOverview, DailyViews, LinkClicks};
pub use auth_user::AuthUser;
pub use billing::{BillingCustomer, CheckoutSession};
pub use link::{Link, LinkIcon, LinkPatch, NewLink};
pub use page::{Page, PageUpsert, Template};
pub use profile::{Profile, ProfileUpsert};
