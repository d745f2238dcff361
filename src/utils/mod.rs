//! Utility functions for code generation, URL validation, and client
//! classification.
//!
//! - [`code_generator`] - Short code generation and custom alias validation
//! - [`url_validator`] - Absolute URL validation for link targets
//! - [`user_agent`] - User-Agent parsing into device/browser/OS categories

pub mod code_generator;
pub mod url_validator;
pub mod user_agent;
