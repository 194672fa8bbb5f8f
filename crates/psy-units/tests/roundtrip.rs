//! Conversion round trips over the standard registry.

use proptest::prelude::*;
use psy_core::{Tolerances, nearly_equal};
use psy_units::{Dimension, SystemKind, UnitError, standard_registry};

const TOL: Tolerances = Tolerances {
    abs: 1e-9,
    rel: 1e-9,
};

proptest! {
    #[test]
    fn every_unit_round_trips(v in -1.0e4_f64..1.0e4_f64) {
        let reg = standard_registry();
        for unit in reg.units() {
            let si = reg.convert(unit.name(), v, None).unwrap();
            let back = reg.deconvert(unit.name(), si).unwrap();
            prop_assert!(nearly_equal(back, v, TOL), "{}: {} -> {} -> {}", unit.name(), v, si, back);
        }
    }

    #[test]
    fn system_round_trips(v in -500.0_f64..500.0_f64) {
        let reg = standard_registry();
        for system in SystemKind::ALL {
            for dimension in Dimension::ALL {
                let si = reg.to_si(system, dimension, v, None).unwrap();
                let back = reg.from_si(system, dimension, si, None).unwrap();
                prop_assert!(nearly_equal(back, v, TOL));
            }
        }
    }
}

#[test]
fn same_dimension_conversions() {
    let reg = standard_registry();
    let kpa = reg.convert("psi", 14.696, Some("kilopascal")).unwrap();
    assert!((kpa - 101.325).abs() < 1e-2);

    let mb = reg.convert("bar", 1.01325, Some("millibar")).unwrap();
    assert!((mb - 1013.25).abs() < 1e-9);

    let c = reg.convert("degF", 60.0, None).unwrap();
    assert!((c - 15.555_555_555_6).abs() < 1e-9);
}

#[test]
fn enthalpy_datum_shift() {
    let reg = standard_registry();
    // 0 kJ/kg (dry air at 0 °C) is about 7.69 Btu/lb on the 0 °F datum.
    let btu = reg.convert("kJperkg", 0.0, Some("btuperlb")).unwrap();
    assert!((btu - 7.689).abs() < 1e-2, "btu = {btu}");
}

#[test]
fn cross_dimension_is_rejected() {
    let reg = standard_registry();
    let err = reg.convert("psi", 1.0, Some("degF")).unwrap_err();
    assert!(matches!(err, UnitError::DimensionMismatch { .. }));
    assert_eq!(err.kind(), psy_core::ErrorKind::DimensionMismatch);
}

#[test]
fn unknown_unit_is_lookup_error() {
    let reg = standard_registry();
    let err = reg.convert("furlong", 1.0, None).unwrap_err();
    assert_eq!(err.kind(), psy_core::ErrorKind::Lookup);
}
