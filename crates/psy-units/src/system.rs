//! Measurement systems.

use crate::{Dimension, UnitError};
use psy_core::UnitId;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

/// One of the three predefined measurement systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SystemKind {
    /// Canonical system; every stored value is expressed here.
    #[default]
    Si,
    Imperial,
    Cgs,
}

impl SystemKind {
    pub const ALL: [SystemKind; 3] = [Self::Si, Self::Imperial, Self::Cgs];

    pub fn name(self) -> &'static str {
        match self {
            Self::Si => "si",
            Self::Imperial => "imp",
            Self::Cgs => "cgs",
        }
    }

    pub(crate) fn slot(self) -> usize {
        match self {
            Self::Si => 0,
            Self::Imperial => 1,
            Self::Cgs => 2,
        }
    }
}

impl fmt::Display for SystemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for SystemKind {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "si" | "metric" | "mks" => Ok(Self::Si),
            "imp" | "imperial" | "english" => Ok(Self::Imperial),
            "cgs" | "gsi" => Ok(Self::Cgs),
            _ => Err(UnitError::UnknownSystem {
                name: s.to_string(),
            }),
        }
    }
}

/// Units registered under one system, plus the main unit per dimension.
///
/// Units themselves live in the registry arena; the system only holds ids.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementSystem {
    kind: SystemKind,
    units: BTreeMap<String, UnitId>,
    main_units: HashMap<Dimension, UnitId>,
}

impl MeasurementSystem {
    pub(crate) fn new(kind: SystemKind) -> Self {
        Self {
            kind,
            units: BTreeMap::new(),
            main_units: HashMap::new(),
        }
    }

    pub fn kind(&self) -> SystemKind {
        self.kind
    }

    /// Id of the unit registered under `name` in this system.
    pub fn unit_id(&self, name: &str) -> Option<UnitId> {
        self.units.get(name).copied()
    }

    /// Id of the main unit for `dimension`.
    pub fn main_unit_id(&self, dimension: Dimension) -> Option<UnitId> {
        self.main_units.get(&dimension).copied()
    }

    /// Unit names in this system, sorted.
    pub fn unit_names(&self) -> impl Iterator<Item = &str> {
        self.units.keys().map(String::as_str)
    }

    /// Register `id` under `name`; the first unit of a dimension becomes its main unit.
    pub(crate) fn insert(&mut self, name: &str, id: UnitId, dimension: Dimension) {
        self.units.insert(name.to_string(), id);
        self.main_units.entry(dimension).or_insert(id);
    }

    pub(crate) fn set_main(&mut self, dimension: Dimension, id: UnitId) {
        self.main_units.insert(dimension, id);
    }
}
