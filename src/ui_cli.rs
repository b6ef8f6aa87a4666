use std::io::{self, Write};
use std::path::Path;

use crate::app::AppError;
use crate::config::Config;
use crate::digester::energy_balance::{
    compute_energy_balance, BiogasUse, EnergyBalanceInput, EnergyBalanceResult, TemperatureRange,
};
use crate::digester::sizing::{size_digester, DigesterGeometry};
use crate::digester::validation::{validate_balance_input, validate_sizing_input};
use crate::export::{self, ProjectFile, ProjectInfo};
use crate::i18n::{keys, Translator};
use crate::substrate_db;
use crate::units::{convert_energy, EnergyUnit};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Balance,
    Sizing,
    Substrates,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    println!("{}", tr.t(keys::MAIN_MENU_BALANCE));
    println!("{}", tr.t(keys::MAIN_MENU_SIZING));
    println!("{}", tr.t(keys::MAIN_MENU_SUBSTRATES));
    println!("{}", tr.t(keys::MAIN_MENU_SETTINGS));
    println!("{}", tr.t(keys::MAIN_MENU_EXIT));
    loop {
        let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::Balance),
            "2" => return Ok(MenuChoice::Sizing),
            "3" => return Ok(MenuChoice::Substrates),
            "4" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 에너지 밸런스 메뉴를 처리한다. 입력 수집 → 검증 → 크기 계산 → 밸런스 → 출력/내보내기.
pub fn handle_balance(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::BALANCE_HEADING));
    println!("{}", tr.t(keys::BALANCE_NOTE_DEFAULTS));
    let d = &cfg.defaults;

    let mut substrate_name = read_line_default(tr, keys::PROMPT_SUBSTRATE_NAME, "-")?;
    let mut ts_default = d.total_solids_pct;
    let mut vs_default = d.vs_of_ts_pct;
    let mut bmp_default = d.bmp_nm3_ch4_per_kg_vs;

    // BMP 출처: 문헌값을 고르면 기질 테이블에서 TS/VS/BMP 기본값을 채운다.
    let source = read_line(&prompt_text(tr, keys::PROMPT_BMP_SOURCE, None))?;
    if source.trim() == "2" {
        if let Some(s) = pick_substrate(tr)? {
            substrate_name = s.name.to_string();
            ts_default = s.ts_pct;
            vs_default = s.vs_of_ts_pct;
            bmp_default = s.bmp_nm3_ch4_per_kg_vs;
        }
    }

    let substrate_flow_kg_per_day =
        read_f64_default(tr, keys::PROMPT_SUBSTRATE_FLOW, d.substrate_flow_kg_per_day)?;
    let total_solids_pct = read_f64_default(tr, keys::PROMPT_TOTAL_SOLIDS, ts_default)?;
    let vs_of_ts_pct = read_f64_default(tr, keys::PROMPT_VS_OF_TS, vs_default)?;
    let bmp_nm3_ch4_per_kg_vs = read_f64_default(tr, keys::PROMPT_BMP_VALUE, bmp_default)?;
    let digestion_efficiency_pct =
        read_f64_default(tr, keys::PROMPT_DIGESTION_EFF, d.digestion_efficiency_pct)?;
    let retention_days = read_f64_default(tr, keys::PROMPT_RETENTION, d.retention_days)?;
    let ch4_content_pct = read_f64_default(tr, keys::PROMPT_CH4_CONTENT, d.ch4_content_pct)?;

    let digester_temp_c = read_digester_temp(tr, d.digester_temp_c)?;
    let substrate_inlet_temp_c =
        read_f64_default(tr, keys::PROMPT_INLET_TEMP, d.substrate_inlet_temp_c)?;
    let ambient_temp_c = read_f64_default(tr, keys::PROMPT_AMBIENT_TEMP, d.ambient_temp_c)?;
    let u_digester_w_per_m2_k = read_f64_default(tr, keys::PROMPT_U_VALUE, d.u_digester_w_per_m2_k)?;

    let biogas_use = read_biogas_use(tr, d.biogas_use)?;
    let mut chp_electrical_eff_pct = 0.0;
    let mut chp_thermal_eff_pct = 0.0;
    let mut boiler_eff_pct = 0.0;
    match biogas_use {
        BiogasUse::Chp => {
            chp_electrical_eff_pct =
                read_f64_default(tr, keys::PROMPT_CHP_ELEC_EFF, d.chp_electrical_eff_pct)?;
            chp_thermal_eff_pct =
                read_f64_default(tr, keys::PROMPT_CHP_THERM_EFF, d.chp_thermal_eff_pct)?;
        }
        BiogasUse::Boiler => {
            boiler_eff_pct = read_f64_default(tr, keys::PROMPT_BOILER_EFF, d.boiler_eff_pct)?;
        }
        BiogasUse::Upgrading => {}
    }
    let aux_electricity_kwh_per_ton =
        read_f64_default(tr, keys::PROMPT_AUX_CONSUMPTION, d.aux_electricity_kwh_per_ton)?;
    let density_kg_per_m3 =
        read_f64_default(tr, keys::PROMPT_DENSITY, d.substrate_density_kg_per_m3)?;

    validate_sizing_input(substrate_flow_kg_per_day, retention_days, density_kg_per_m3)?;
    let geom = size_digester(substrate_flow_kg_per_day, retention_days, density_kg_per_m3);

    let input = EnergyBalanceInput {
        substrate_flow_kg_per_day,
        total_solids_pct,
        vs_of_ts_pct,
        bmp_nm3_ch4_per_kg_vs,
        digestion_efficiency_pct,
        ch4_content_pct,
        cp_substrate_kj_per_kg_c: d.cp_substrate_kj_per_kg_c,
        digester_temp_c,
        substrate_inlet_temp_c,
        u_digester_w_per_m2_k,
        surface_area_m2: geom.surface_area_m2,
        ambient_temp_c,
        biogas_use,
        chp_electrical_eff_pct,
        chp_thermal_eff_pct,
        boiler_eff_pct,
        aux_electricity_kwh_per_ton,
    };
    validate_balance_input(&input)?;
    let result = compute_energy_balance(&input);

    print_geometry(tr, &geom);
    print_balance(tr, cfg, &input, &result);
    handle_export(tr, &substrate_name, &input, retention_days, density_kg_per_m3, &geom, &result)?;
    Ok(())
}

/// 소화조 크기 계산 메뉴를 처리한다.
pub fn handle_sizing(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SIZING_HEADING));
    let d = &cfg.defaults;
    let flow = read_f64_default(tr, keys::PROMPT_SUBSTRATE_FLOW, d.substrate_flow_kg_per_day)?;
    let retention = read_f64_default(tr, keys::PROMPT_RETENTION, d.retention_days)?;
    let density = read_f64_default(tr, keys::PROMPT_DENSITY, d.substrate_density_kg_per_m3)?;
    validate_sizing_input(flow, retention, density)?;
    let geom = size_digester(flow, retention, density);
    print_geometry(tr, &geom);
    Ok(())
}

/// 기질 문헌값 테이블을 출력한다.
pub fn handle_substrates(tr: &Translator) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SUBSTRATES_HEADING));
    println!("{}", tr.t(keys::SUBSTRATES_NOTE));
    for (i, s) in substrate_db::substrates().iter().enumerate() {
        println!(
            "{}) {:<10} {}  TS {:.0}%  VS/TS {:.0}%  BMP {:.2} Nm³/kg VS",
            i + 1,
            s.code,
            s.name,
            s.ts_pct,
            s.vs_of_ts_pct,
            s.bmp_nm3_ch4_per_kg_vs
        );
        println!("   - {}", s.notes);
    }
    Ok(())
}

/// 설정 메뉴를 처리한다. 언어는 다음 실행부터 적용된다.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!("{} {}", tr.t(keys::SETTINGS_CURRENT_LANGUAGE), cfg.language);
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    match sel.trim() {
        "1" => cfg.language = "ko-kr".to_string(),
        "2" => cfg.language = "en-us".to_string(),
        _ => {}
    }
    println!("{}", tr.t(keys::SETTINGS_ENERGY_OPTIONS));
    let sel = read_line(tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    match sel.trim() {
        "1" => cfg.default_units.energy = EnergyUnit::MegaJoule,
        "2" => cfg.default_units.energy = EnergyUnit::KilowattHour,
        "3" => cfg.default_units.energy = EnergyUnit::KiloCalorie,
        _ => {}
    }
    println!("{}", tr.t(keys::SETTINGS_SAVED));
    Ok(())
}

fn pick_substrate(tr: &Translator) -> Result<Option<&'static substrate_db::SubstrateData>, AppError> {
    handle_substrates(tr)?;
    let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
    let idx: usize = match sel.trim().parse() {
        Ok(n) => n,
        Err(_) => return Ok(None),
    };
    Ok(substrate_db::substrates().get(idx.wrapping_sub(1)))
}

fn read_digester_temp(tr: &Translator, default_c: f64) -> Result<f64, AppError> {
    let sel = read_line(&prompt_text(tr, keys::PROMPT_TEMP_RANGE, None))?;
    match sel.trim() {
        "1" => Ok(TemperatureRange::Mesophilic.operating_temp_c()),
        "2" => Ok(TemperatureRange::Thermophilic.operating_temp_c()),
        _ => read_f64_default(tr, keys::PROMPT_DIGESTER_TEMP, default_c),
    }
}

fn read_biogas_use(tr: &Translator, default: BiogasUse) -> Result<BiogasUse, AppError> {
    let sel = read_line(&prompt_text(tr, keys::PROMPT_BIOGAS_USE, None))?;
    Ok(match sel.trim() {
        "1" => BiogasUse::Chp,
        "2" => BiogasUse::Boiler,
        "3" => BiogasUse::Upgrading,
        _ => default,
    })
}

fn print_geometry(tr: &Translator, geom: &DigesterGeometry) {
    println!("\n{}", tr.t(keys::RESULT_GEOMETRY_HEADING));
    println!("{}: {:.2} m³", tr.t(keys::RESULT_VOLUME), geom.volume_m3);
    println!("{}: {:.2} m", tr.t(keys::RESULT_DIAMETER), geom.diameter_m);
    println!("{}: {:.2} m", tr.t(keys::RESULT_HEIGHT), geom.height_m);
    println!("{}: {:.2} m²", tr.t(keys::RESULT_SURFACE_AREA), geom.surface_area_m2);
}

/// 에너지 값을 설정된 표시 단위로 포맷한다. 내부 기준은 MJ/일.
fn fmt_energy(cfg: &Config, value_mj: f64) -> String {
    let unit = cfg.default_units.energy;
    let v = convert_energy(value_mj, EnergyUnit::MegaJoule, unit);
    format!("{:.2} {}/d", v, unit.symbol())
}

fn print_balance(tr: &Translator, cfg: &Config, input: &EnergyBalanceInput, r: &EnergyBalanceResult) {
    println!("\n{}", tr.t(keys::RESULT_PRODUCTION_HEADING));
    println!("{}: {:.2} kg/d", tr.t(keys::RESULT_VS_FEED), r.vs_feed_kg_per_day);
    println!(
        "{}: {:.2} Nm³/d",
        tr.t(keys::RESULT_CH4_PRODUCED),
        r.ch4_produced_nm3_per_day
    );
    println!(
        "{}: {:.2} Nm³/d",
        tr.t(keys::RESULT_BIOGAS_PRODUCED),
        r.biogas_produced_nm3_per_day
    );
    println!(
        "{}: {:.2} MJ/Nm³",
        tr.t(keys::RESULT_BIOGAS_LHV),
        r.biogas_lhv_mj_per_nm3
    );
    println!(
        "{}: {}",
        tr.t(keys::RESULT_GROSS_ENERGY),
        fmt_energy(cfg, r.gross_energy_mj_per_day)
    );

    println!("\n{}", tr.t(keys::RESULT_THERMAL_HEADING));
    println!(
        "{}: {}",
        tr.t(keys::RESULT_SENSIBLE_HEAT),
        fmt_energy(cfg, r.sensible_heat_mj_per_day)
    );
    println!(
        "{}: {}",
        tr.t(keys::RESULT_SHELL_LOSS),
        fmt_energy(cfg, r.shell_loss_mj_per_day)
    );
    println!(
        "{}: {}",
        tr.t(keys::RESULT_THERMAL_DEMAND),
        fmt_energy(cfg, r.thermal_demand_mj_per_day)
    );

    println!("\n{}", tr.t(keys::RESULT_POWER_HEADING));
    if input.biogas_use == BiogasUse::Upgrading {
        println!("{}", tr.t(keys::NOTE_UPGRADING));
    } else {
        println!(
            "{}: {:.2} kWh/d",
            tr.t(keys::RESULT_ELEC_GROSS),
            r.electricity_gross_kwh_per_day
        );
        println!(
            "{}: {}",
            tr.t(keys::RESULT_USEFUL_HEAT),
            fmt_energy(cfg, r.useful_heat_mj_per_day)
        );
    }
    println!(
        "{}: {:.2} kWh/d",
        tr.t(keys::RESULT_AUX_CONSUMPTION),
        r.aux_consumption_kwh_per_day
    );

    println!("\n{}", tr.t(keys::RESULT_NET_HEADING));
    println!(
        "{}: {:.2} kWh/d",
        tr.t(keys::RESULT_NET_ELECTRICITY),
        r.net_electricity_kwh_per_day
    );
    println!(
        "{}: {}",
        tr.t(keys::RESULT_NET_HEAT),
        fmt_energy(cfg, r.net_heat_mj_per_day)
    );
    if r.net_electricity_kwh_per_day < 0.0 {
        println!("{}", tr.t(keys::WARN_ELEC_DEFICIT));
    }
    if r.net_heat_mj_per_day < 0.0 {
        println!("{}", tr.t(keys::WARN_HEAT_DEFICIT));
    } else if r.net_heat_mj_per_day > 0.0 {
        println!("{}", tr.t(keys::NOTE_HEAT_SURPLUS));
    }
    for w in &r.warnings {
        println!("  ! {w}");
    }
}

fn handle_export(
    tr: &Translator,
    substrate_name: &str,
    input: &EnergyBalanceInput,
    retention_days: f64,
    density_kg_per_m3: f64,
    geom: &DigesterGeometry,
    result: &EnergyBalanceResult,
) -> Result<(), AppError> {
    println!("{}", tr.t(keys::EXPORT_HEADING));
    println!("{}", tr.t(keys::EXPORT_PROMPT));
    let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
    match sel.trim() {
        "1" | "2" => {
            let project = read_project_info(tr)?;
            let default_name = if sel.trim() == "1" { "balance.csv" } else { "balance.txt" };
            let path = read_line_default(tr, keys::PROMPT_EXPORT_PATH, default_name)?;
            let path = Path::new(&path);
            if sel.trim() == "1" {
                export::export_csv(
                    path, tr, &project, substrate_name, input, retention_days, geom, result,
                )?;
                println!("{} {}", tr.t(keys::EXPORT_CSV_DONE), path.display());
            } else {
                export::export_text_report(
                    path, tr, &project, substrate_name, input, retention_days, geom, result,
                )?;
                println!("{} {}", tr.t(keys::EXPORT_REPORT_DONE), path.display());
            }
        }
        "3" => {
            let info = read_project_info(tr)?;
            let path = read_line_default(tr, keys::PROMPT_EXPORT_PATH, "project.toml")?;
            let project = ProjectFile {
                info,
                substrate_name: substrate_name.to_string(),
                retention_days,
                substrate_density_kg_per_m3: density_kg_per_m3,
                input: input.clone(),
            };
            export::save_project(Path::new(&path), &project)?;
            println!("{} {}", tr.t(keys::EXPORT_PROJECT_SAVED), path);
        }
        _ => {}
    }
    Ok(())
}

fn read_project_info(tr: &Translator) -> Result<ProjectInfo, AppError> {
    let name = read_line_default(tr, keys::PROMPT_PROJECT_NAME, "-")?;
    let analyst = read_line_default(tr, keys::PROMPT_ANALYST_NAME, "-")?;
    Ok(ProjectInfo::new(name, analyst))
}

fn prompt_text(tr: &Translator, key: &str, default: Option<f64>) -> String {
    match default {
        Some(d) => format!("{} [{d}]: ", tr.t(key)),
        None => format!("{}: ", tr.t(key)),
    }
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush().map_err(AppError::Io)?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).map_err(AppError::Io)?;
    Ok(buf)
}

fn read_line_default(tr: &Translator, key: &str, default: &str) -> Result<String, AppError> {
    let s = read_line(&format!("{} [{default}]: ", tr.t(key)))?;
    let trimmed = s.trim();
    if trimmed.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(trimmed.to_string())
    }
}

/// 숫자를 읽는다. 빈 입력은 기본값을 돌려준다.
fn read_f64_default(tr: &Translator, key: &str, default: f64) -> Result<f64, AppError> {
    loop {
        let s = read_line(&prompt_text(tr, key, Some(default)))?;
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(default);
        }
        match trimmed.parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}
