use std::path::PathBuf;

use biogas_balance_toolbox::digester::energy_balance::{
    compute_energy_balance, BiogasUse, EnergyBalanceInput, CP_SUBSTRATE_KJ_PER_KG_C,
};
use biogas_balance_toolbox::digester::sizing::size_digester;
use biogas_balance_toolbox::export::{
    self, today_string, ProjectFile, ProjectInfo,
};
use biogas_balance_toolbox::i18n::Translator;

fn sample_input(aux_electricity_kwh_per_ton: f64) -> EnergyBalanceInput {
    let geom = size_digester(10000.0, 30.0, 1000.0);
    EnergyBalanceInput {
        substrate_flow_kg_per_day: 10000.0,
        total_solids_pct: 20.0,
        vs_of_ts_pct: 80.0,
        bmp_nm3_ch4_per_kg_vs: 0.35,
        digestion_efficiency_pct: 75.0,
        ch4_content_pct: 60.0,
        cp_substrate_kj_per_kg_c: CP_SUBSTRATE_KJ_PER_KG_C,
        digester_temp_c: 38.0,
        substrate_inlet_temp_c: 15.0,
        u_digester_w_per_m2_k: 0.5,
        surface_area_m2: geom.surface_area_m2,
        ambient_temp_c: 10.0,
        biogas_use: BiogasUse::Chp,
        chp_electrical_eff_pct: 35.0,
        chp_thermal_eff_pct: 45.0,
        boiler_eff_pct: 85.0,
        aux_electricity_kwh_per_ton,
    }
}

fn temp_path(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("biogas_balance_test_{}_{name}", std::process::id()));
    p
}

#[test]
fn date_stamp_is_iso_format() {
    let d = today_string();
    assert_eq!(d.len(), 10);
    assert_eq!(d.matches('-').count(), 2);
}

#[test]
fn csv_contains_labeled_values_with_units() {
    let tr = Translator::new("en");
    let input = sample_input(30.0);
    let geom = size_digester(10000.0, 30.0, 1000.0);
    let result = compute_energy_balance(&input);
    let info = ProjectInfo::new("Demo Plant", "Design Team");
    let path = temp_path("balance.csv");

    export::export_csv(&path, &tr, &info, "Agro residue", &input, 30.0, &geom, &result)
        .expect("csv export");
    let content = std::fs::read_to_string(&path).expect("read csv");
    std::fs::remove_file(&path).ok();

    assert!(content.contains("Demo Plant"));
    assert!(content.contains("Biogas produced,700.00,Nm³/d"));
    assert!(content.contains("Methane produced,420.00,Nm³/d"));
    assert!(content.contains("Working volume,300.00,m³"));
    assert!(content.contains("kWh/d"));
}

#[test]
fn report_marks_deficit_as_warning_line() {
    let tr = Translator::new("en");
    // 소내 소비를 크게 잡아 순 전력을 음수로 만든다.
    let input = sample_input(1000.0);
    let geom = size_digester(10000.0, 30.0, 1000.0);
    let result = compute_energy_balance(&input);
    assert!(result.net_electricity_kwh_per_day < 0.0);
    let info = ProjectInfo::new("Deficit Case", "-");
    let path = temp_path("balance.txt");

    export::export_text_report(&path, &tr, &info, "-", &input, 30.0, &geom, &result)
        .expect("report export");
    let content = std::fs::read_to_string(&path).expect("read report");
    std::fs::remove_file(&path).ok();

    assert!(content.contains("! Warning: electricity deficit."));
    assert!(content.contains("Net exportable electricity"));
    // 보고서에도 음수 값이 그대로 기록된다.
    assert!(content.contains("-"));
}

#[test]
fn project_file_round_trips_through_toml() {
    let input = sample_input(30.0);
    let project = ProjectFile {
        info: ProjectInfo::new("Roundtrip", "QA"),
        substrate_name: "옥수수 사일리지".to_string(),
        retention_days: 30.0,
        substrate_density_kg_per_m3: 1000.0,
        input: input.clone(),
    };
    let path = temp_path("project.toml");
    export::save_project(&path, &project).expect("save project");
    let loaded = export::load_project(&path).expect("load project");
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded.info.project_name, "Roundtrip");
    assert_eq!(loaded.substrate_name, "옥수수 사일리지");
    assert!((loaded.retention_days - 30.0).abs() < 1e-12);
    assert!(
        (loaded.input.substrate_flow_kg_per_day - input.substrate_flow_kg_per_day).abs() < 1e-12
    );
    assert_eq!(loaded.input.biogas_use, BiogasUse::Chp);
}
