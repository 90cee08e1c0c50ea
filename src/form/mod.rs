// src/form/mod.rs
//!
//! Form Module
//!
//! Form definitions (onboarding, profile, content filters...) fetched from the
//! platform and cached with a bundled fallback.

pub mod handler;
pub mod types;

pub use handler::GetFormHandler;
pub use types::{FormRequest, FormServiceConfig};
