//! Request and response types for the REST API.
//!
//! All JSON field names are camelCase.

pub mod analytics;
pub mod auth;
pub mod health;
pub mod links;
pub mod pagination;
