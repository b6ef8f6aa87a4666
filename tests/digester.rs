use biogas_balance_toolbox::digester::sizing::{
    size_digester, DEFAULT_SUBSTRATE_DENSITY_KG_PER_M3,
};
use biogas_balance_toolbox::digester::validation::{validate_sizing_input, InputError};

#[test]
fn volume_follows_flow_and_retention() {
    let geom = size_digester(10000.0, 30.0, DEFAULT_SUBSTRATE_DENSITY_KG_PER_M3);
    assert!((geom.volume_m3 - 300.0).abs() < 1e-9);
    let expected_d = (4.0 * 300.0 / std::f64::consts::PI).cbrt();
    assert!((geom.diameter_m - expected_d).abs() < 1e-9);
}

#[test]
fn height_equals_diameter_and_area_closes() {
    let geom = size_digester(25000.0, 22.0, 1000.0);
    assert!(geom.volume_m3 > 0.0);
    assert!((geom.height_m - geom.diameter_m).abs() < 1e-12);
    let expected_area = 1.5 * std::f64::consts::PI * geom.diameter_m * geom.diameter_m;
    assert!((geom.surface_area_m2 - expected_area).abs() < 1e-9);
}

#[test]
fn zero_flow_yields_degenerate_geometry() {
    let geom = size_digester(0.0, 30.0, 1000.0);
    assert_eq!(geom.volume_m3, 0.0);
    assert_eq!(geom.diameter_m, 0.0);
    assert_eq!(geom.height_m, 0.0);
    assert_eq!(geom.surface_area_m2, 0.0);
}

#[test]
fn negative_retention_keeps_volume_but_zeroes_shape() {
    let geom = size_digester(10000.0, -5.0, 1000.0);
    assert!((geom.volume_m3 - (-50.0)).abs() < 1e-9);
    assert_eq!(geom.diameter_m, 0.0);
    assert_eq!(geom.height_m, 0.0);
    assert_eq!(geom.surface_area_m2, 0.0);
}

#[test]
fn custom_density_scales_volume() {
    let geom = size_digester(10000.0, 30.0, 500.0);
    assert!((geom.volume_m3 - 600.0).abs() < 1e-9);
}

#[test]
fn sizing_validation_rejects_bad_ranges() {
    assert!(validate_sizing_input(10000.0, 30.0, 1000.0).is_ok());
    assert!(matches!(
        validate_sizing_input(-1.0, 30.0, 1000.0),
        Err(InputError::NegativeValue { .. })
    ));
    assert!(matches!(
        validate_sizing_input(10000.0, 0.0, 1000.0),
        Err(InputError::NonPositive { .. })
    ));
    assert!(matches!(
        validate_sizing_input(10000.0, 30.0, 0.0),
        Err(InputError::NonPositive { .. })
    ));
}
