//! Unit representation with affine conversion onto SI.

use crate::format::Template;
use crate::{Dimension, UnitError, UnitResult};

/// A named unit of one dimension.
///
/// The canonical SI value for a raw value `v` is `(v + offset) * factor - fix`.
/// `offset` is applied before scaling and `fix` after, so Fahrenheit
/// (offset only) and Btu/lb (fix only) both invert exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    name: String,
    dimension: Dimension,
    factor: f64,
    offset: f64,
    fix: f64,
    symbol: String,
    template: Template,
}

impl Unit {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn fix(&self) -> f64 {
        self.fix
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Convert a value expressed in this unit to SI.
    pub fn to_si(&self, value: f64) -> f64 {
        (value + self.offset) * self.factor - self.fix
    }

    /// Convert an SI value into this unit.
    pub fn from_si(&self, si_value: f64) -> f64 {
        (si_value + self.fix) / self.factor - self.offset
    }

    /// Check if two units measure the same dimension.
    pub fn is_compatible(&self, other: &Unit) -> bool {
        self.dimension == other.dimension
    }

    /// Format a value already expressed in this unit.
    pub fn render(&self, value: f64) -> String {
        self.template.render(value, &self.symbol)
    }

    /// Format an SI value in this unit.
    pub fn render_si(&self, si_value: f64) -> String {
        self.render(self.from_si(si_value))
    }

    /// Same as the definition in `spec` (used to tolerate idempotent re-registration).
    pub(crate) fn matches(&self, spec: &UnitSpec) -> bool {
        spec.dimension == Some(self.dimension)
            && spec.factor == self.factor
            && spec.offset == self.offset
            && spec.fix == self.fix
            && spec.symbol.as_deref().unwrap_or(&spec.name) == self.symbol
            && spec
                .template
                .as_deref()
                .is_none_or(|t| t == self.template.as_str())
    }
}

/// Registration request for a unit.
///
/// Leaving `dimension` unset asks the registry to alias the SI unit with the
/// same name (e.g. seconds in every system); the numeric parameters are then
/// ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitSpec {
    pub name: String,
    pub dimension: Option<Dimension>,
    pub factor: f64,
    pub offset: f64,
    pub fix: f64,
    pub symbol: Option<String>,
    pub template: Option<String>,
}

impl UnitSpec {
    pub fn new(name: impl Into<String>, dimension: Dimension) -> Self {
        Self {
            dimension: Some(dimension),
            ..Self::alias(name)
        }
    }

    /// A unit whose definition is inherited from the same-named SI unit.
    pub fn alias(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dimension: None,
            factor: 1.0,
            offset: 0.0,
            fix: 0.0,
            symbol: None,
            template: None,
        }
    }

    pub fn factor(mut self, factor: f64) -> Self {
        self.factor = factor;
        self
    }

    pub fn offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    pub fn fix(mut self, fix: f64) -> Self {
        self.fix = fix;
        self
    }

    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    /// Validate the numeric parameters and build the unit.
    pub(crate) fn build(&self, dimension: Dimension) -> UnitResult<Unit> {
        if self.name.trim().is_empty() {
            return Err(UnitError::configuration("unit name must not be empty"));
        }
        if !self.factor.is_finite() || self.factor == 0.0 {
            return Err(UnitError::configuration(format!(
                "unit \"{}\" needs a finite, non-zero factor",
                self.name
            )));
        }
        if !self.offset.is_finite() || !self.fix.is_finite() {
            return Err(UnitError::configuration(format!(
                "unit \"{}\" has a non-finite offset or fix",
                self.name
            )));
        }
        let template = match &self.template {
            Some(t) => Template::parse(t)?,
            None => Template::default(),
        };
        Ok(Unit {
            name: self.name.clone(),
            dimension,
            factor: self.factor,
            offset: self.offset,
            fix: self.fix,
            symbol: self.symbol.clone().unwrap_or_else(|| self.name.clone()),
            template,
        })
    }
}
