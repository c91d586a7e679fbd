//! Domain layer containing business entities and logic.
//!
//! Defines entities, repository interfaces, and the counter pipeline
//! independent of infrastructure concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`counter_event`] - View/click increment event model
//! - [`counter_worker`] - Asynchronous counter worker
//!
//! # Counter Flow
//!
//! 1. Public page or link redirect handler resolves its record
//! 2. [`counter_event::CounterEvent`] is queued with `try_send`
//! 3. [`counter_worker::run_counter_worker`] applies it with retry
//! 4. The increment runs as one atomic statement via
//!    [`repositories::AnalyticsRepository`]

pub mod counter_event;
pub mod counter_worker;
pub mod entities;
pub mod repositories;
