//! Core validation types and traits.
//!
//! The fundamental building blocks of the engine:
//!
//! - **Trait**: [`KeywordValidator`] — one compiled keyword check.
//! - **Errors**: [`ValidationError`] with structured [`Params`].
//! - **Configuration**: [`ValidationContext`] — per-run, read-only.

pub mod context;
pub mod error;
pub mod traits;

pub use context::ValidationContext;
pub use error::{Params, ValidationError};
pub use traits::KeywordValidator;
