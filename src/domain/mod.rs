//! Domain layer containing business entities and logic.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`click_event`] - Click tracking event model
//! - [`click_worker`] - Asynchronous click recording worker
//!
//! # Click Processing Flow
//!
//! 1. The redirect handler resolves a short code and responds immediately
//! 2. A [`click_event::ClickEvent`] is pushed to a bounded channel without
//!    awaiting
//! 3. [`click_worker::run_click_worker`] classifies the client and persists
//!    the event with retry, absorbing all failures
//! 4. Analytics are later derived from the stored events via
//!    [`repositories::ClickRepository`]

pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod repositories;
