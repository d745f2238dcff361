//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without infrastructure concerns:
//!
//! - [`Link`] - A short code mapped to an original URL
//! - [`Click`] - One recorded redirect traversal with client classification
//! - [`User`] - An account owning links
//!
//! Creation inputs use separate `New*` structs; partial updates use
//! [`LinkUpdate`].

pub mod click;
pub mod link;
pub mod user;

pub use click::{Click, NewClick};
pub use link::{Link, LinkUpdate, NewLink};
pub use user::{NewUser, User};
