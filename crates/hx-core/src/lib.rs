//! hx-core: stable foundation for the hybrex workspace.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real + tolerances + guarded arithmetic helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{HxError, HxResult};
pub use numeric::*;
pub use units::*;
