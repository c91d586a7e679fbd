//! Web page handlers using Askama templates.

pub mod analytics;
pub mod dashboard;
pub mod landing;
pub mod links;
pub mod pages;
pub mod profile;
pub mod public_page;

pub use analytics::analytics_handler;
pub use dashboard::dashboard_handler;
pub use landing::{demo_handler, landing_handler};
pub use links::links_handler;
pub use profile::profile_handler;
pub use public_page::public_page_handler;
