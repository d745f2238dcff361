//! Infrastructure layer: concrete adapters behind the domain's repository
//! traits. Currently PostgreSQL only.

pub mod persistence;
