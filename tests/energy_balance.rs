use biogas_balance_toolbox::digester::energy_balance::{
    compute_energy_balance, BiogasUse, EnergyBalanceInput, TemperatureRange,
    CP_SUBSTRATE_KJ_PER_KG_C,
};
use biogas_balance_toolbox::digester::sizing::size_digester;
use biogas_balance_toolbox::digester::validation::{validate_balance_input, InputError};

/// 기준 시나리오: 10 ton/일, TS 20%, VS 80%, BMP 0.35, 효율 75%, CH₄ 60%, HRT 30일.
fn reference_input() -> EnergyBalanceInput {
    let geom = size_digester(10000.0, 30.0, 1000.0);
    EnergyBalanceInput {
        substrate_flow_kg_per_day: 10000.0,
        total_solids_pct: 20.0,
        vs_of_ts_pct: 80.0,
        bmp_nm3_ch4_per_kg_vs: 0.35,
        digestion_efficiency_pct: 75.0,
        ch4_content_pct: 60.0,
        cp_substrate_kj_per_kg_c: CP_SUBSTRATE_KJ_PER_KG_C,
        digester_temp_c: TemperatureRange::Mesophilic.operating_temp_c(),
        substrate_inlet_temp_c: 15.0,
        u_digester_w_per_m2_k: 0.5,
        surface_area_m2: geom.surface_area_m2,
        ambient_temp_c: 10.0,
        biogas_use: BiogasUse::Chp,
        chp_electrical_eff_pct: 35.0,
        chp_thermal_eff_pct: 45.0,
        boiler_eff_pct: 85.0,
        aux_electricity_kwh_per_ton: 30.0,
    }
}

#[test]
fn reference_scenario_production_chain() {
    let r = compute_energy_balance(&reference_input());
    assert!((r.vs_feed_kg_per_day - 1600.0).abs() < 1e-6);
    assert!((r.ch4_produced_nm3_per_day - 420.0).abs() < 1e-6);
    assert!((r.biogas_produced_nm3_per_day - 700.0).abs() < 1e-6);
    assert!((r.biogas_lhv_mj_per_nm3 - 21.48).abs() < 1e-6);
    assert!((r.gross_energy_mj_per_day - 15036.0).abs() < 1e-6);
    assert!((r.gross_energy_kwh_per_day - 15036.0 / 3.6).abs() < 1e-6);
}

#[test]
fn reference_scenario_thermal_demand() {
    let input = reference_input();
    let r = compute_energy_balance(&input);
    let expected_sensible = 10000.0 * CP_SUBSTRATE_KJ_PER_KG_C * (38.0 - 15.0) / 1000.0;
    assert!((r.sensible_heat_mj_per_day - expected_sensible).abs() < 1e-9);
    let expected_loss = 0.5 * input.surface_area_m2 * (38.0 - 10.0) * 86400.0 / 1.0e6;
    assert!((r.shell_loss_mj_per_day - expected_loss).abs() < 1e-9);
    assert!(
        (r.thermal_demand_mj_per_day - (expected_sensible + expected_loss)).abs() < 1e-9
    );
    assert!((r.thermal_demand_kwh_per_day - r.thermal_demand_mj_per_day / 3.6).abs() < 1e-9);
}

#[test]
fn zero_ch4_content_guards_division() {
    let mut input = reference_input();
    input.ch4_content_pct = 0.0;
    let r = compute_energy_balance(&input);
    assert_eq!(r.biogas_produced_nm3_per_day, 0.0);
    assert_eq!(r.biogas_lhv_mj_per_nm3, 0.0);
    assert_eq!(r.gross_energy_mj_per_day, 0.0);
}

#[test]
fn shell_loss_clamped_when_not_warmer_than_ambient() {
    let mut input = reference_input();
    input.ambient_temp_c = 38.0;
    let r = compute_energy_balance(&input);
    assert_eq!(r.shell_loss_mj_per_day, 0.0);

    let mut input = reference_input();
    input.ambient_temp_c = 45.0;
    let r = compute_energy_balance(&input);
    assert_eq!(r.shell_loss_mj_per_day, 0.0);

    let mut input = reference_input();
    input.surface_area_m2 = 0.0;
    let r = compute_energy_balance(&input);
    assert_eq!(r.shell_loss_mj_per_day, 0.0);
}

#[test]
fn methane_grows_with_digestion_efficiency() {
    let mut low = reference_input();
    low.digestion_efficiency_pct = 60.0;
    let mut high = reference_input();
    high.digestion_efficiency_pct = 80.0;
    let r_low = compute_energy_balance(&low);
    let r_high = compute_energy_balance(&high);
    assert!(r_high.ch4_produced_nm3_per_day > r_low.ch4_produced_nm3_per_day);
}

#[test]
fn chp_splits_gross_energy() {
    let r = compute_energy_balance(&reference_input());
    assert!((r.electricity_gross_kwh_per_day - r.gross_energy_kwh_per_day * 0.35).abs() < 1e-9);
    assert!((r.useful_heat_mj_per_day - r.gross_energy_mj_per_day * 0.45).abs() < 1e-9);
}

#[test]
fn boiler_mode_produces_heat_only() {
    let mut input = reference_input();
    input.biogas_use = BiogasUse::Boiler;
    let r = compute_energy_balance(&input);
    assert_eq!(r.electricity_gross_kwh_per_day, 0.0);
    assert!((r.useful_heat_mj_per_day - r.gross_energy_mj_per_day * 0.85).abs() < 1e-9);
}

#[test]
fn upgrading_mode_has_no_onsite_conversion() {
    let mut input = reference_input();
    input.biogas_use = BiogasUse::Upgrading;
    let r = compute_energy_balance(&input);
    assert_eq!(r.electricity_gross_kwh_per_day, 0.0);
    assert_eq!(r.useful_heat_mj_per_day, 0.0);
    // 소내 소비만 남으므로 순 전력은 항상 음수다.
    assert!(r.net_electricity_kwh_per_day < 0.0);
}

#[test]
fn auxiliary_consumption_per_ton() {
    let r = compute_energy_balance(&reference_input());
    assert!((r.aux_consumption_kwh_per_day - 10.0 * 30.0).abs() < 1e-9);
}

#[test]
fn electricity_deficit_is_a_result_not_an_error() {
    let mut input = reference_input();
    input.aux_electricity_kwh_per_ton = 1000.0;
    let r = compute_energy_balance(&input);
    assert!(r.aux_consumption_kwh_per_day > r.electricity_gross_kwh_per_day);
    assert!(r.net_electricity_kwh_per_day < 0.0);
    assert!(!r.warnings.is_empty());
}

#[test]
fn net_heat_sign_follows_use_mode() {
    let r = compute_energy_balance(&reference_input());
    let expected = r.useful_heat_mj_per_day - r.thermal_demand_mj_per_day;
    assert!((r.net_heat_mj_per_day - expected).abs() < 1e-9);
    assert!((r.net_heat_kwh_per_day - expected / 3.6).abs() < 1e-9);

    let mut input = reference_input();
    input.biogas_use = BiogasUse::Upgrading;
    let r = compute_energy_balance(&input);
    // 회수 열이 없으므로 열 수요만큼 부족하다.
    assert!((r.net_heat_mj_per_day + r.thermal_demand_mj_per_day).abs() < 1e-9);
    assert!(r.net_heat_mj_per_day < 0.0);
}

#[test]
fn balance_validation_rejects_out_of_range_percent() {
    assert!(validate_balance_input(&reference_input()).is_ok());

    let mut input = reference_input();
    input.total_solids_pct = 150.0;
    assert!(matches!(
        validate_balance_input(&input),
        Err(InputError::PercentOutOfRange { .. })
    ));

    let mut input = reference_input();
    input.substrate_flow_kg_per_day = -10.0;
    assert!(matches!(
        validate_balance_input(&input),
        Err(InputError::NegativeValue { .. })
    ));

    let mut input = reference_input();
    input.chp_electrical_eff_pct = -5.0;
    assert!(matches!(
        validate_balance_input(&input),
        Err(InputError::PercentOutOfRange { .. })
    ));
}
