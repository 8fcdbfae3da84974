//! 열역학 변환 회귀 테스트.
use approx::{assert_abs_diff_eq, assert_relative_eq};
use sounding_toolbox::thermo::*;

#[test]
fn mixing_ratio_and_specific_humidity_round_trip() {
    for i in 0..50 {
        let qv = i as f64 * 0.001;
        let w = specific_humidity_to_mixing_ratio(qv);
        assert_relative_eq!(mixing_ratio_to_specific_humidity(w), qv, max_relative = 1e-12);
        assert_relative_eq!(
            specific_humidity_to_mixing_ratio(mixing_ratio_to_specific_humidity(w)),
            w,
            max_relative = 1e-12
        );
    }
}

#[test]
fn relative_humidity_inverse_is_consistent() {
    for &(t, p) in &[(300.0, 1000.0), (285.0, 850.0), (260.0, 500.0), (230.0, 250.0)] {
        for &rh in &[0.05, 0.3, 0.75, 1.0] {
            let qv = relative_humidity_to_specific_humidity(t, rh, p);
            assert_relative_eq!(relative_humidity(qv, t, p), rh, max_relative = 1e-12);
        }
    }
}

#[test]
fn dewpoint_round_trip_at_290k() {
    let td = relative_humidity_to_dewpoint(290.0, 0.5);
    assert!(td < 290.0);
    assert_abs_diff_eq!(dewpoint_to_relative_humidity(290.0, td), 0.5, epsilon = 1e-9);
}

#[test]
fn dewpoint_inversion_branch_follows_air_temperature() {
    // 기온은 영상, 역산된 이슬점은 영하. 역산은 물 표면 식, 정방향은 얼음 식을 쓴다.
    let t = 280.0;
    let td = relative_humidity_to_dewpoint(t, 0.3);
    assert!(td < CONSTANTS.t0_k);
    let rh = dewpoint_to_relative_humidity(t, td);
    assert!((rh - 0.3).abs() > 0.01, "rh={rh}");
}

#[test]
fn specific_humidity_and_dewpoint_round_trip() {
    let (t, p) = (295.0, 900.0);
    let qv = dewpoint_to_specific_humidity(288.0, t, p);
    assert_abs_diff_eq!(specific_humidity_to_dewpoint(qv, t, p), 288.0, epsilon = 1e-9);
}

#[test]
fn saturation_branches_partition_at_zero_celsius() {
    let temps_c = [-5.0, -0.5, 0.0, 0.5, 5.0];
    let branches: Vec<_> = temps_c.iter().map(|&tc| SaturationBranch::select(tc)).collect();
    assert_eq!(
        branches,
        vec![
            SaturationBranch::Ice,
            SaturationBranch::Ice,
            SaturationBranch::Ice,
            SaturationBranch::Liquid,
            SaturationBranch::Liquid,
        ]
    );
    for &tc in &temps_c {
        let expected = SaturationBranch::select(tc).vapor_pressure(tc);
        assert_eq!(saturation_vapor_pressure(tc + CONSTANTS.t0_k), expected);
    }
}

#[test]
fn saturation_branches_are_distinct_fits() {
    // 0°C 에서는 두 식 모두 6.108 hPa (차이 0), 그 밖에서는 값이 다르다.
    let liquid = SaturationBranch::Liquid.vapor_pressure(0.0);
    let ice = SaturationBranch::Ice.vapor_pressure(0.0);
    assert_abs_diff_eq!(liquid - ice, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(liquid, ESAT_BASE_HPA, epsilon = 1e-12);

    let liquid = SaturationBranch::Liquid.vapor_pressure(-1.0);
    let ice = SaturationBranch::Ice.vapor_pressure(-1.0);
    assert!(liquid > ice + 0.05, "liquid {liquid} ice {ice}");
}

#[test]
fn saturation_vapor_pressure_reference_values() {
    // 20°C 에서 Tetens 식 약 23.4 hPa
    assert_abs_diff_eq!(saturation_vapor_pressure(293.15), 23.37, epsilon = 0.05);
    assert!(saturation_vapor_pressure(253.15) < 1.5);
}

#[test]
fn saturation_undefined_when_pressure_equals_esat() {
    let t = 300.0;
    let esat = saturation_vapor_pressure(t);
    assert!(saturation_mixing_ratio(esat, t).is_infinite());
    assert!(saturation_specific_humidity(esat, t).is_nan());
    assert!(relative_humidity(0.01, t, esat).is_nan());
}

#[test]
fn potential_temperature_identity() {
    for &(t, p) in &[(300.0, 1000.0), (250.0, 300.0), (210.0, 100.0), (310.0, 1050.0)] {
        let theta = temperature_to_theta(t, p);
        assert_relative_eq!(theta_to_temperature(theta, p), t, max_relative = 1e-12);
    }
    assert_eq!(temperature_to_theta(288.0, 1000.0), 288.0);
}

#[test]
fn virtual_temperature_close_to_linear_approximation() {
    let (p, t) = (1000.0, 300.0);
    let qv = dewpoint_to_specific_humidity(295.0, t, p);
    let tv = virtual_temperature(p, t, qv);
    let approx = t * (1.0 + 0.61 * specific_humidity_to_mixing_ratio(qv));
    assert!(tv > t);
    assert_abs_diff_eq!(tv, approx, epsilon = 0.2);
}

#[test]
fn moist_air_density_near_standard() {
    let qv = dewpoint_to_specific_humidity(295.0, 300.0, 1000.0);
    let rho = density(qv, 300.0, 1000.0);
    assert_abs_diff_eq!(rho, 1.15, epsilon = 0.01);
    // 수증기가 섞이면 건조 공기보다 가볍다
    assert!(rho < 100.0 * 1000.0 / (CONSTANTS.rd * 300.0));
}

#[test]
fn equivalent_potential_temperature_exceeds_theta_for_moist_air() {
    let qv = dewpoint_to_specific_humidity(295.0, 300.0, 1000.0);
    let theta_e = equivalent_potential_temperature(qv, 300.0, 1000.0);
    assert!(theta_e > 340.0 && theta_e < 360.0, "theta_e={theta_e}");
}

#[test]
fn saturation_deficit_sign() {
    let qsat = saturation_specific_humidity(850.0, 280.0);
    assert!(saturation_deficit(850.0, 280.0, 0.5 * qsat) < 0.0);
    assert_abs_diff_eq!(saturation_deficit(850.0, 280.0, qsat), 0.0, epsilon = 1e-15);
}

#[test]
fn vapor_pressure_matches_dewpoint_saturation() {
    let (p, t, td) = (950.0, 298.0, 290.0);
    let qv = dewpoint_to_specific_humidity(td, t, p);
    assert_relative_eq!(
        vapor_pressure(p, t, qv),
        saturation_vapor_pressure(td),
        max_relative = 1e-12
    );
}

#[test]
fn hypsometric_pressure_decreases_with_height() {
    let p = hypsometric_pressure(900.0, 290.0, 1000.0);
    assert!(p < 900.0 && p > 780.0, "p={p}");
    assert_eq!(hypsometric_pressure(900.0, 290.0, 0.0), 900.0);
}

#[test]
fn profile_helpers_are_elementwise() {
    let p = [1000.0, 850.0, 700.0];
    let t = [300.0, 290.0, 280.0];
    let td = [295.0, 280.0, 260.0];
    let qv = dewpoint_to_specific_humidity_profile(&td, &t, &p);
    for i in 0..3 {
        assert_eq!(qv[i], dewpoint_to_specific_humidity(td[i], t[i], p[i]));
    }
    let theta = theta_profile(&t, &p);
    assert_eq!(theta[2], temperature_to_theta(280.0, 700.0));
    let tv = virtual_temperature_profile(&p, &t, &qv);
    assert!(tv.iter().zip(&t).all(|(tv, t)| tv > t));
}

#[test]
fn virtual_temperature_of_dry_air_is_temperature() {
    assert_eq!(vapor_pressure(200.0, 220.0, 0.0), 0.0);
    assert_eq!(virtual_temperature(200.0, 220.0, 0.0), 220.0);
    let tv = virtual_temperature_profile(&[1000.0, 200.0], &[300.0, 220.0], &[0.01, 0.0]);
    assert!(tv[0] > 300.0);
    assert_eq!(tv[1], 220.0);
}
