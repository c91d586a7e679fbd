//! Browser-facing layer: public bio pages and the HTML dashboard.
//!
//! Uses Askama templates for server-side rendering.
//!
//! # Modules
//!
//! - [`handlers`] - Template rendering handlers
//! - [`middleware`] - Session cookie gate for the dashboard
//! - [`render`] - Pure view models for the bio page
//! - [`routes`] - Route configuration

pub mod handlers;
pub mod middleware;
pub mod render;
pub mod routes;
