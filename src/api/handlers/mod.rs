//! HTTP request handlers for API endpoints.

pub mod account;
pub mod analytics;
pub mod billing;
pub mod health;
pub mod links;
pub mod redirect;

pub use account::{get_page_handler, me_handler, update_profile_handler, upsert_page_handler};
pub use analytics::analytics_handler;
pub use billing::{create_checkout_handler, stripe_webhook_handler};
pub use health::health_handler;
pub use links::{
    create_link_handler, delete_link_handler, list_links_handler, reorder_links_handler,
    set_link_active_handler, update_link_handler,
};
pub use redirect::link_click_handler;
