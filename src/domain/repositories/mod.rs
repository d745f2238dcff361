//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; concrete implementations
//! live in `crate::infrastructure::persistence`. Mock implementations are
//! auto-generated via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Short link storage and retrieval
//! - [`ClickRepository`] - Append-only click event log
//! - [`UserRepository`] - Account storage for authentication

pub mod click_repository;
pub mod link_repository;
pub mod user_repository;

pub use click_repository::ClickRepository;
pub use link_repository::{LinkRepository, LinkWithClicks};
pub use user_repository::UserRepository;

#[cfg(test)]
pub use click_repository::MockClickRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
