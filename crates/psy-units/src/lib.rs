//! psy-units: measurement systems and unit conversion for psychrometrics.
//!
//! Provides:
//! - Dimensions (length, mass, time, temperature, pressure, enthalpy)
//! - Units with an affine mapping onto the canonical SI value
//! - Three measurement systems (SI, Imperial, CGS) with a main unit per dimension
//! - A registry built once during setup and read-only afterwards
//!
//! # Example
//!
//! ```
//! use psy_units::{Dimension, SystemKind, standard_registry};
//!
//! let registry = standard_registry();
//! let tdb = registry
//!     .to_si(SystemKind::Imperial, Dimension::Temperature, 212.0, None)
//!     .unwrap();
//! assert!((tdb - 100.0).abs() < 1e-9);
//! ```

pub mod dimension;
pub mod error;
pub mod format;
pub mod registry;
pub mod standard;
pub mod system;
pub mod unit;

pub use dimension::Dimension;
pub use error::{UnitError, UnitResult};
pub use format::Template;
pub use registry::{RenderTarget, UnitRegistry, UnitRegistryBuilder};
pub use standard::standard_registry;
pub use system::{MeasurementSystem, SystemKind};
pub use unit::{Unit, UnitSpec};
