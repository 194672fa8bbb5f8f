//! psy-core: shared foundation for the psychrometric workspace.
//!
//! Contains:
//! - units (uom SI types + constructors for the moist-air quantities)
//! - numeric (Real + tolerances + float helpers)
//! - ids (compact ids for registry entries)
//! - error (shared error types and the error-kind taxonomy)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

pub use error::{CoreError, CoreResult, ErrorKind};
pub use ids::*;
pub use numeric::*;
pub use units::*;
