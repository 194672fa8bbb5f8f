//! Unit registry: a mutable builder for the setup phase, frozen into an
//! immutable registry that every air state reads from.

use std::collections::HashMap;

use psy_core::UnitId;
use tracing::debug;

use crate::format::Template;
use crate::system::{MeasurementSystem, SystemKind};
use crate::unit::{Unit, UnitSpec};
use crate::{Dimension, UnitError, UnitResult};

/// What to render a value as: a system's main unit for a dimension, or a named unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderTarget<'a> {
    Dimension(Dimension),
    Unit(&'a str),
}

impl From<Dimension> for RenderTarget<'_> {
    fn from(d: Dimension) -> Self {
        Self::Dimension(d)
    }
}

impl<'a> From<&'a str> for RenderTarget<'a> {
    fn from(name: &'a str) -> Self {
        Self::Unit(name)
    }
}

/// Builder for a unit registry.
///
/// Use `add_unit` (and optionally `set_main_unit`) to populate the systems,
/// then call `build()` to freeze them into an immutable `UnitRegistry`.
#[derive(Debug, Clone)]
pub struct UnitRegistryBuilder {
    units: Vec<Unit>,
    by_name: HashMap<String, UnitId>,
    systems: [MeasurementSystem; 3],
}

impl Default for UnitRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitRegistryBuilder {
    /// Create a builder with the three systems and no units.
    pub fn new() -> Self {
        Self {
            units: Vec::new(),
            by_name: HashMap::new(),
            systems: SystemKind::ALL.map(MeasurementSystem::new),
        }
    }

    /// Register a unit under `system` and return its id.
    ///
    /// Without an explicit dimension the SI unit of the same name is aliased
    /// into `system`. A name can be defined only once across the registry;
    /// repeating an identical definition returns the existing id.
    pub fn add_unit(&mut self, system: SystemKind, spec: UnitSpec) -> UnitResult<UnitId> {
        let id = match spec.dimension {
            None => self.systems[SystemKind::Si.slot()]
                .unit_id(&spec.name)
                .ok_or_else(|| {
                    UnitError::configuration(format!(
                        "unit \"{}\" has no dimension and no SI unit of that name exists",
                        spec.name
                    ))
                })?,
            Some(dimension) => match self.by_name.get(&spec.name) {
                Some(&existing) if self.units[existing.slot()].matches(&spec) => existing,
                Some(_) => {
                    return Err(UnitError::configuration(format!(
                        "unit \"{}\" is already registered with a different definition",
                        spec.name
                    )));
                }
                None => {
                    let unit = spec.build(dimension)?;
                    let id = UnitId::from_index(self.units.len() as u32)
                        .ok_or_else(|| UnitError::configuration("unit registry is full"))?;
                    self.units.push(unit);
                    self.by_name.insert(spec.name.clone(), id);
                    id
                }
            },
        };

        let dimension = self.units[id.slot()].dimension();
        debug!(%system, unit = %spec.name, %dimension, "registered unit");
        self.systems[system.slot()].insert(&spec.name, id, dimension);
        Ok(id)
    }

    /// Make `name` the main unit of its dimension in `system`.
    pub fn set_main_unit(&mut self, system: SystemKind, name: &str) -> UnitResult<()> {
        let sys = &mut self.systems[system.slot()];
        let id = sys.unit_id(name).ok_or_else(|| UnitError::NotInSystem {
            name: name.to_string(),
            system,
        })?;
        sys.set_main(self.units[id.slot()].dimension(), id);
        Ok(())
    }

    /// Freeze into an immutable registry.
    pub fn build(self) -> UnitRegistry {
        UnitRegistry {
            units: self.units,
            by_name: self.by_name,
            systems: self.systems,
        }
    }
}

/// Immutable set of measurement systems and their units.
///
/// Shareable across threads once built; nothing here mutates.
#[derive(Debug, Clone)]
pub struct UnitRegistry {
    units: Vec<Unit>,
    by_name: HashMap<String, UnitId>,
    systems: [MeasurementSystem; 3],
}

impl UnitRegistry {
    pub fn builder() -> UnitRegistryBuilder {
        UnitRegistryBuilder::new()
    }

    pub fn system(&self, kind: SystemKind) -> &MeasurementSystem {
        &self.systems[kind.slot()]
    }

    /// All registered units, in registration order.
    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter()
    }

    /// Look up a unit by name across all systems.
    pub fn unit(&self, name: &str) -> UnitResult<&Unit> {
        self.by_name
            .get(name)
            .map(|id| &self.units[id.slot()])
            .ok_or_else(|| UnitError::UnknownUnit {
                name: name.to_string(),
            })
    }

    /// Look up a unit registered under `system`.
    pub fn unit_in(&self, system: SystemKind, name: &str) -> UnitResult<&Unit> {
        self.system(system)
            .unit_id(name)
            .map(|id| &self.units[id.slot()])
            .ok_or_else(|| UnitError::NotInSystem {
                name: name.to_string(),
                system,
            })
    }

    /// The main unit of `dimension` in `system`.
    pub fn main_unit(&self, system: SystemKind, dimension: Dimension) -> UnitResult<&Unit> {
        self.system(system)
            .main_unit_id(dimension)
            .map(|id| &self.units[id.slot()])
            .ok_or(UnitError::NoMainUnit { system, dimension })
    }

    /// Convert `value` expressed in `unit` to SI, or to `target` when given.
    pub fn convert(&self, unit: &str, value: f64, target: Option<&str>) -> UnitResult<f64> {
        let from = self.unit(unit)?;
        let si_value = from.to_si(value);
        match target {
            None => Ok(si_value),
            Some(target) => {
                let to = self.unit(target)?;
                if !from.is_compatible(to) {
                    return Err(UnitError::DimensionMismatch {
                        from: from.name().to_string(),
                        to: to.name().to_string(),
                        from_dim: from.dimension(),
                        to_dim: to.dimension(),
                    });
                }
                Ok(to.from_si(si_value))
            }
        }
    }

    /// Convert an SI value into `unit`.
    pub fn deconvert(&self, unit: &str, si_value: f64) -> UnitResult<f64> {
        Ok(self.unit(unit)?.from_si(si_value))
    }

    /// Convert a value given in `system` to SI.
    ///
    /// The value is read in `unit` when given (which must measure `dimension`),
    /// otherwise in the system's main unit. SI values without a unit override
    /// pass through untouched.
    pub fn to_si(
        &self,
        system: SystemKind,
        dimension: Dimension,
        value: f64,
        unit: Option<&str>,
    ) -> UnitResult<f64> {
        Ok(self.resolve(system, dimension, unit)?.map_or(value, |u| u.to_si(value)))
    }

    /// Inverse of `to_si`.
    pub fn from_si(
        &self,
        system: SystemKind,
        dimension: Dimension,
        si_value: f64,
        unit: Option<&str>,
    ) -> UnitResult<f64> {
        Ok(self
            .resolve(system, dimension, unit)?
            .map_or(si_value, |u| u.from_si(si_value)))
    }

    /// Format an SI value in the system's main unit for a dimension, or in a
    /// named unit of the system. `template` overrides the unit's own template.
    pub fn render<'a>(
        &self,
        system: SystemKind,
        target: impl Into<RenderTarget<'a>>,
        si_value: f64,
        template: Option<&str>,
    ) -> UnitResult<String> {
        let unit = match target.into() {
            RenderTarget::Dimension(dimension) => self.main_unit(system, dimension)?,
            RenderTarget::Unit(name) => self.unit_in(system, name)?,
        };
        let value = unit.from_si(si_value);
        match template {
            None => Ok(unit.render(value)),
            Some(t) => Ok(Template::parse(t)?.render(value, unit.symbol())),
        }
    }

    /// `None` means identity (SI without override).
    fn resolve(
        &self,
        system: SystemKind,
        dimension: Dimension,
        unit: Option<&str>,
    ) -> UnitResult<Option<&Unit>> {
        match unit {
            None if system == SystemKind::Si => Ok(None),
            None => self.main_unit(system, dimension).map(Some),
            Some(name) => {
                let u = self.unit(name)?;
                if u.dimension() != dimension {
                    return Err(UnitError::DimensionMismatch {
                        from: u.name().to_string(),
                        to: dimension.name().to_string(),
                        from_dim: u.dimension(),
                        to_dim: dimension,
                    });
                }
                Ok(Some(u))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny() -> UnitRegistry {
        let mut b = UnitRegistry::builder();
        b.add_unit(SystemKind::Si, UnitSpec::new("m", Dimension::Length))
            .unwrap();
        b.add_unit(SystemKind::Si, UnitSpec::new("s", Dimension::Time))
            .unwrap();
        b.add_unit(
            SystemKind::Imperial,
            UnitSpec::new("inch", Dimension::Length)
                .factor(0.0254)
                .symbol("in"),
        )
        .unwrap();
        b.add_unit(
            SystemKind::Imperial,
            UnitSpec::new("foot", Dimension::Length)
                .factor(0.3048)
                .symbol("ft"),
        )
        .unwrap();
        b.add_unit(SystemKind::Imperial, UnitSpec::alias("s")).unwrap();
        b.build()
    }

    #[test]
    fn alias_inherits_si_unit() {
        let reg = tiny();
        let si_s = reg.unit_in(SystemKind::Si, "s").unwrap();
        let imp_s = reg.unit_in(SystemKind::Imperial, "s").unwrap();
        assert_eq!(si_s, imp_s);
        assert_eq!(
            reg.main_unit(SystemKind::Imperial, Dimension::Time)
                .unwrap()
                .name(),
            "s"
        );
    }

    #[test]
    fn alias_without_si_unit_fails() {
        let mut b = UnitRegistry::builder();
        let err = b
            .add_unit(SystemKind::Cgs, UnitSpec::alias("parsec"))
            .unwrap_err();
        assert!(matches!(err, UnitError::Configuration { .. }));
    }

    #[test]
    fn conflicting_redefinition_fails() {
        let mut b = UnitRegistry::builder();
        b.add_unit(SystemKind::Si, UnitSpec::new("m", Dimension::Length))
            .unwrap();
        let again = b
            .add_unit(SystemKind::Si, UnitSpec::new("m", Dimension::Length))
            .unwrap();
        assert_eq!(again.index(), 0);
        let err = b
            .add_unit(
                SystemKind::Cgs,
                UnitSpec::new("m", Dimension::Length).factor(0.01),
            )
            .unwrap_err();
        assert!(matches!(err, UnitError::Configuration { .. }));
    }

    #[test]
    fn convert_between_units() {
        let reg = tiny();
        assert!((reg.convert("foot", 1.0, None).unwrap() - 0.3048).abs() < 1e-12);
        assert!((reg.convert("foot", 1.0, Some("inch")).unwrap() - 12.0).abs() < 1e-9);
    }

    #[test]
    fn convert_rejects_cross_dimension() {
        let reg = tiny();
        let err = reg.convert("foot", 1.0, Some("s")).unwrap_err();
        assert!(matches!(err, UnitError::DimensionMismatch { .. }));
    }

    #[test]
    fn convert_rejects_unknown_unit() {
        let reg = tiny();
        assert!(matches!(
            reg.convert("cubit", 1.0, None),
            Err(UnitError::UnknownUnit { .. })
        ));
    }

    #[test]
    fn to_si_uses_main_unit_or_override() {
        let reg = tiny();
        // Imperial main length is the first registered (inch).
        let v = reg
            .to_si(SystemKind::Imperial, Dimension::Length, 12.0, None)
            .unwrap();
        assert!((v - 0.3048).abs() < 1e-12);
        let v = reg
            .to_si(SystemKind::Imperial, Dimension::Length, 1.0, Some("foot"))
            .unwrap();
        assert!((v - 0.3048).abs() < 1e-12);
        assert_eq!(
            reg.to_si(SystemKind::Si, Dimension::Length, 7.0, None)
                .unwrap(),
            7.0
        );
        assert!(matches!(
            reg.to_si(SystemKind::Imperial, Dimension::Length, 1.0, Some("s")),
            Err(UnitError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn missing_main_unit_is_lookup_error() {
        let reg = tiny();
        let err = reg
            .to_si(SystemKind::Cgs, Dimension::Length, 1.0, None)
            .unwrap_err();
        assert!(matches!(err, UnitError::NoMainUnit { .. }));
    }

    #[test]
    fn set_main_unit_overrides_first() {
        let mut b = UnitRegistry::builder();
        for (name, factor) in [("inch", 0.0254), ("foot", 0.3048)] {
            b.add_unit(
                SystemKind::Imperial,
                UnitSpec::new(name, Dimension::Length).factor(factor),
            )
            .unwrap();
        }
        b.set_main_unit(SystemKind::Imperial, "foot").unwrap();
        assert!(matches!(
            b.set_main_unit(SystemKind::Si, "foot"),
            Err(UnitError::NotInSystem { .. })
        ));
        let reg = b.build();
        assert_eq!(
            reg.main_unit(SystemKind::Imperial, Dimension::Length)
                .unwrap()
                .name(),
            "foot"
        );
    }

    #[test]
    fn render_named_unit_with_template() {
        let reg = tiny();
        let text = reg
            .render(SystemKind::Imperial, "foot", 3.048, Some("%.1f %s o.s.l."))
            .unwrap();
        assert_eq!(text, "10.0 ft o.s.l.");
        assert!(matches!(
            reg.render(SystemKind::Si, "foot", 1.0, None),
            Err(UnitError::NotInSystem { .. })
        ));
    }
}
