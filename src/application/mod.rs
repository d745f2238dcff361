//! Application layer services implementing business logic.
//!
//! Services orchestrate domain operations through repository traits and
//! provide a clean API for HTTP handlers. They never touch SQL or HTTP
//! types directly.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Link creation, resolution, CRUD
//! - [`services::stats_service::StatsService`] - Click analytics aggregation
//! - [`services::auth_service::AuthService`] - Registration, login, JWT validation

pub mod services;
