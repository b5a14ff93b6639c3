//! mt-core: stable foundation for the McCabe-Thiele workspace.
//!
//! Contains:
//! - units (uom SI pressure types + constructors)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::MtError;
pub use numeric::*;
pub use units::*;
