//! Property tests for the solver.

use proptest::prelude::*;
use psy_air::formulas::{
    humidity_ratio_from_rh, humidity_ratio_from_wet_bulb, saturation_pressure,
};
use psy_air::{AirState, AirStateConfig, Field};
use psy_core::relative_error;
use psy_units::SystemKind;

/// Inputs of tdb plus one moisture field taken from a solved reference state.
fn moisture_inputs(reference: &AirState<'_>) -> Vec<AirStateConfig> {
    let tdb = reference.known(Field::DryBulb).unwrap();
    let base = AirStateConfig::new().with_tdb(tdb);
    let value = |field| reference.known(field).unwrap();
    vec![
        base.clone().with_enthalpy(value(Field::Enthalpy)),
        base.clone().with_ratio(value(Field::HumidityRatio)),
        base.clone().with_dew(value(Field::DewPoint)),
        base.with_twb(value(Field::WetBulb)),
    ]
}

fn solved(tdb: f64, rh: f64) -> AirState<'static> {
    let config = AirStateConfig::new().with_tdb(tdb).with_rh(rh);
    let mut air = AirState::standard(SystemKind::Si, &config).unwrap();
    air.solve_all().unwrap();
    air
}

proptest! {
    #[test]
    fn saturation_pressure_is_increasing(a in -50.0_f64..100.0, b in -50.0_f64..100.0) {
        prop_assume!(a != b);
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        prop_assert!(saturation_pressure(lo) < saturation_pressure(hi));
    }

    #[test]
    fn wet_bulb_between_dew_point_and_dry_bulb(tdb in -20.0_f64..50.0, rh in 0.05_f64..0.95) {
        let air = solved(tdb, rh);
        let twb = air.known(Field::WetBulb).unwrap();
        let dew = air.known(Field::DewPoint).unwrap();
        prop_assert!(dew <= twb && twb <= tdb, "dew {} twb {} tdb {}", dew, twb, tdb);
    }

    #[test]
    fn solved_state_is_self_consistent(tdb in 15.0_f64..45.0, rh in 0.1_f64..0.95) {
        let air = solved(tdb, rh);
        let p = air.pressure_pa();
        let w = air.known(Field::HumidityRatio).unwrap();
        let rh_solved = air.known(Field::RelativeHumidity).unwrap();
        let twb = air.known(Field::WetBulb).unwrap();

        let from_rh = humidity_ratio_from_rh(tdb, rh_solved, p).unwrap();
        let from_twb = humidity_ratio_from_wet_bulb(tdb, twb, p).unwrap();
        prop_assert!(relative_error(from_rh, w) <= 1e-4);
        prop_assert!(relative_error(from_twb, w) <= 1e-4);
    }

    #[test]
    fn solve_all_is_idempotent(tdb in -10.0_f64..40.0, rh in 0.1_f64..0.9) {
        let mut air = solved(tdb, rh);
        let first = air.snapshot();
        air.solve_all().unwrap();
        prop_assert_eq!(first, air.snapshot());
    }

    #[test]
    fn single_queries_match_solve_all(tdb in 5.0_f64..40.0, rh in 0.1_f64..0.9) {
        let reference = solved(tdb, rh);
        for config in moisture_inputs(&reference) {
            let mut expected = AirState::standard(SystemKind::Si, &config).unwrap();
            expected.solve_all().unwrap();

            for field in Field::REPORT_ORDER {
                let mut air = AirState::standard(SystemKind::Si, &config).unwrap();
                let value = air.solve(field.key()).unwrap();
                prop_assert_eq!(Some(value), expected.known(field), "{:?} from {:?}", field, config);
                air.solve_all().unwrap();
                prop_assert_eq!(air.snapshot(), expected.snapshot(), "{:?} first, {:?}", field, config);
            }
        }
    }
}
