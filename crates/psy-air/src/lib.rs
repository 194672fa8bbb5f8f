//! psy-air: psychrometric properties of moist air.
//!
//! Provides:
//! - ASHRAE closed-form correlations (saturation pressure, humidity ratio,
//!   enthalpy, dew point, densities)
//! - An iterative wet-bulb solve with a bisection safeguard
//! - `AirState`, a partially known state that derives its missing fields on
//!   demand and caches them
//! - Plain-text reports in the caller's measurement system
//!
//! All arithmetic runs in SI (Pa, °C, kJ/kg). Inputs and reports go through a
//! `psy_units::UnitRegistry`, so callers can work in imperial or CGS units.
//!
//! # Example
//!
//! ```
//! use psy_air::{AirState, AirStateConfig};
//! use psy_units::SystemKind;
//!
//! let config = AirStateConfig::new().with_tdb(30.0).with_rh(0.5);
//! let mut air = AirState::standard(SystemKind::Si, &config).unwrap();
//! let w = air.solve("w").unwrap();
//! assert!((w - 0.01331).abs() < 1e-5);
//! air.solve_all().unwrap();
//! println!("{}", air.report().unwrap());
//! ```

pub mod config;
pub mod error;
pub mod formulas;
pub mod property;
pub mod report;
pub mod state;
pub mod wet_bulb;

pub use config::AirStateConfig;
pub use error::{PsychroError, PsychroResult};
pub use property::{Field, Property};
pub use state::{AirSnapshot, AirState};
pub use wet_bulb::{WetBulbConfig, WetBulbSolution, solve_wet_bulb};
