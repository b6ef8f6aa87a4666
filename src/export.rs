use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::digester::energy_balance::{BiogasUse, EnergyBalanceInput, EnergyBalanceResult};
use crate::digester::sizing::DigesterGeometry;
use crate::i18n::{keys, Translator};

/// 내보내기 문서 머리말에 들어가는 프로젝트 정보.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub project_name: String,
    pub analyst: String,
    /// 분석 일자 (YYYY-MM-DD)
    pub date: String,
}

impl ProjectInfo {
    /// 오늘 날짜가 찍힌 프로젝트 정보를 만든다.
    pub fn new(project_name: impl Into<String>, analyst: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            analyst: analyst.into(),
            date: today_string(),
        }
    }
}

/// 오늘 날짜를 YYYY-MM-DD 문자열로 반환한다.
pub fn today_string() -> String {
    jiff::Zoned::now().date().to_string()
}

/// 내보내기 표의 한 줄: 라벨 + 값 + 물리 단위.
#[derive(Debug, Clone)]
pub struct ReportRow {
    pub label: String,
    pub value: String,
    pub unit: &'static str,
}

impl ReportRow {
    fn new(label: &str, value: String, unit: &'static str) -> Self {
        Self {
            label: label.to_string(),
            value,
            unit,
        }
    }
}

/// 내보내기 중 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum ExportError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// 프로젝트 파일 역직렬화 오류
    Serde(toml::de::Error),
    /// 프로젝트 파일 직렬화 오류
    Serialize(toml::ser::Error),
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::Io(e) => write!(f, "파일 입출력 오류: {e}"),
            ExportError::Serde(e) => write!(f, "프로젝트 파싱 오류: {e}"),
            ExportError::Serialize(e) => write!(f, "프로젝트 직렬화 오류: {e}"),
        }
    }
}

impl std::error::Error for ExportError {}

impl From<std::io::Error> for ExportError {
    fn from(value: std::io::Error) -> Self {
        ExportError::Io(value)
    }
}

impl From<toml::de::Error> for ExportError {
    fn from(value: toml::de::Error) -> Self {
        ExportError::Serde(value)
    }
}

impl From<toml::ser::Error> for ExportError {
    fn from(value: toml::ser::Error) -> Self {
        ExportError::Serialize(value)
    }
}

/// 입력 파라미터 섹션의 행을 만든다.
pub fn input_rows(
    tr: &Translator,
    substrate_name: &str,
    input: &EnergyBalanceInput,
    retention_days: f64,
) -> Vec<ReportRow> {
    let mut rows = vec![
        ReportRow::new(tr.t(keys::PROMPT_SUBSTRATE_NAME), substrate_name.to_string(), ""),
        ReportRow::new(
            tr.t(keys::PROMPT_SUBSTRATE_FLOW),
            format!("{:.2}", input.substrate_flow_kg_per_day),
            "kg/d",
        ),
        ReportRow::new(
            tr.t(keys::PROMPT_TOTAL_SOLIDS),
            format!("{:.1}", input.total_solids_pct),
            "%",
        ),
        ReportRow::new(
            tr.t(keys::PROMPT_VS_OF_TS),
            format!("{:.1}", input.vs_of_ts_pct),
            "%",
        ),
        ReportRow::new(
            tr.t(keys::PROMPT_BMP_VALUE),
            format!("{:.2}", input.bmp_nm3_ch4_per_kg_vs),
            "Nm³/kg VS",
        ),
        ReportRow::new(
            tr.t(keys::PROMPT_DIGESTION_EFF),
            format!("{:.1}", input.digestion_efficiency_pct),
            "%",
        ),
        ReportRow::new(tr.t(keys::PROMPT_RETENTION), format!("{retention_days:.1}"), "d"),
        ReportRow::new(
            tr.t(keys::PROMPT_CH4_CONTENT),
            format!("{:.1}", input.ch4_content_pct),
            "%",
        ),
        ReportRow::new(
            tr.t(keys::PROMPT_INLET_TEMP),
            format!("{:.1}", input.substrate_inlet_temp_c),
            "°C",
        ),
        ReportRow::new(
            tr.t(keys::PROMPT_AMBIENT_TEMP),
            format!("{:.1}", input.ambient_temp_c),
            "°C",
        ),
        ReportRow::new(
            tr.t(keys::PROMPT_U_VALUE),
            format!("{:.2}", input.u_digester_w_per_m2_k),
            "W/m²K",
        ),
        ReportRow::new(
            tr.t(keys::PROMPT_AUX_CONSUMPTION),
            format!("{:.1}", input.aux_electricity_kwh_per_ton),
            "kWh/ton",
        ),
    ];
    match input.biogas_use {
        BiogasUse::Chp => {
            rows.push(ReportRow::new(
                tr.t(keys::PROMPT_CHP_ELEC_EFF),
                format!("{:.1}", input.chp_electrical_eff_pct),
                "%",
            ));
            rows.push(ReportRow::new(
                tr.t(keys::PROMPT_CHP_THERM_EFF),
                format!("{:.1}", input.chp_thermal_eff_pct),
                "%",
            ));
        }
        BiogasUse::Boiler => {
            rows.push(ReportRow::new(
                tr.t(keys::PROMPT_BOILER_EFF),
                format!("{:.1}", input.boiler_eff_pct),
                "%",
            ));
        }
        BiogasUse::Upgrading => {}
    }
    rows
}

/// 소화조 크기 섹션의 행을 만든다.
pub fn geometry_rows(tr: &Translator, geom: &DigesterGeometry) -> Vec<ReportRow> {
    vec![
        ReportRow::new(tr.t(keys::RESULT_VOLUME), format!("{:.2}", geom.volume_m3), "m³"),
        ReportRow::new(tr.t(keys::RESULT_DIAMETER), format!("{:.2}", geom.diameter_m), "m"),
        ReportRow::new(tr.t(keys::RESULT_HEIGHT), format!("{:.2}", geom.height_m), "m"),
        ReportRow::new(
            tr.t(keys::RESULT_SURFACE_AREA),
            format!("{:.2}", geom.surface_area_m2),
            "m²",
        ),
    ]
}

/// 바이오가스 생산 섹션의 행을 만든다. 총 에너지는 MJ와 kWh를 함께 적는다.
pub fn production_rows(tr: &Translator, result: &EnergyBalanceResult) -> Vec<ReportRow> {
    vec![
        ReportRow::new(
            tr.t(keys::RESULT_VS_FEED),
            format!("{:.2}", result.vs_feed_kg_per_day),
            "kg/d",
        ),
        ReportRow::new(
            tr.t(keys::RESULT_CH4_PRODUCED),
            format!("{:.2}", result.ch4_produced_nm3_per_day),
            "Nm³/d",
        ),
        ReportRow::new(
            tr.t(keys::RESULT_BIOGAS_PRODUCED),
            format!("{:.2}", result.biogas_produced_nm3_per_day),
            "Nm³/d",
        ),
        ReportRow::new(
            tr.t(keys::RESULT_BIOGAS_LHV),
            format!("{:.2}", result.biogas_lhv_mj_per_nm3),
            "MJ/Nm³",
        ),
        ReportRow::new(
            tr.t(keys::RESULT_GROSS_ENERGY),
            format!(
                "{:.2} ({:.2} kWh/d)",
                result.gross_energy_mj_per_day, result.gross_energy_kwh_per_day
            ),
            "MJ/d",
        ),
    ]
}

/// 소화조 열 수요 섹션의 행을 만든다.
pub fn thermal_rows(tr: &Translator, result: &EnergyBalanceResult) -> Vec<ReportRow> {
    vec![
        ReportRow::new(
            tr.t(keys::RESULT_SENSIBLE_HEAT),
            format!("{:.2}", result.sensible_heat_mj_per_day),
            "MJ/d",
        ),
        ReportRow::new(
            tr.t(keys::RESULT_SHELL_LOSS),
            format!("{:.2}", result.shell_loss_mj_per_day),
            "MJ/d",
        ),
        ReportRow::new(
            tr.t(keys::RESULT_THERMAL_DEMAND),
            format!(
                "{:.2} ({:.2} kWh/d)",
                result.thermal_demand_mj_per_day, result.thermal_demand_kwh_per_day
            ),
            "MJ/d",
        ),
    ]
}

/// 에너지 생산/소비 섹션의 행을 만든다.
pub fn power_rows(tr: &Translator, result: &EnergyBalanceResult) -> Vec<ReportRow> {
    vec![
        ReportRow::new(
            tr.t(keys::RESULT_ELEC_GROSS),
            format!("{:.2}", result.electricity_gross_kwh_per_day),
            "kWh/d",
        ),
        ReportRow::new(
            tr.t(keys::RESULT_USEFUL_HEAT),
            format!("{:.2}", result.useful_heat_mj_per_day),
            "MJ/d",
        ),
        ReportRow::new(
            tr.t(keys::RESULT_AUX_CONSUMPTION),
            format!("{:.2}", result.aux_consumption_kwh_per_day),
            "kWh/d",
        ),
    ]
}

/// 순 밸런스 섹션의 행을 만든다. 음수는 부족을 뜻하며 그대로 기록한다.
pub fn net_rows(tr: &Translator, result: &EnergyBalanceResult) -> Vec<ReportRow> {
    vec![
        ReportRow::new(
            tr.t(keys::RESULT_NET_ELECTRICITY),
            format!("{:.2}", result.net_electricity_kwh_per_day),
            "kWh/d",
        ),
        ReportRow::new(
            tr.t(keys::RESULT_NET_HEAT),
            format!(
                "{:.2} ({:.2} kWh/d)",
                result.net_heat_mj_per_day, result.net_heat_kwh_per_day
            ),
            "MJ/d",
        ),
    ]
}

fn csv_escape(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn push_section(out: &mut String, heading: &str, rows: &[ReportRow]) {
    out.push_str(&csv_escape(heading));
    out.push_str(",,\n");
    for row in rows {
        out.push_str(&format!(
            "{},{},{}\n",
            csv_escape(&row.label),
            csv_escape(&row.value),
            csv_escape(row.unit)
        ));
    }
    out.push_str(",,\n");
}

/// 결과 전체를 스프레드시트용 CSV로 저장한다.
pub fn export_csv(
    path: &Path,
    tr: &Translator,
    project: &ProjectInfo,
    substrate_name: &str,
    input: &EnergyBalanceInput,
    retention_days: f64,
    geom: &DigesterGeometry,
    result: &EnergyBalanceResult,
) -> Result<(), ExportError> {
    let mut out = String::new();
    out.push_str(&format!(
        "{},{},{}\n,,\n",
        csv_escape(&project.project_name),
        csv_escape(&project.analyst),
        csv_escape(&project.date)
    ));
    push_section(&mut out, tr.t(keys::RESULT_GEOMETRY_HEADING), &geometry_rows(tr, geom));
    push_section(
        &mut out,
        tr.t(keys::RESULT_PRODUCTION_HEADING),
        &production_rows(tr, result),
    );
    push_section(&mut out, tr.t(keys::RESULT_THERMAL_HEADING), &thermal_rows(tr, result));
    push_section(&mut out, tr.t(keys::RESULT_POWER_HEADING), &power_rows(tr, result));
    push_section(&mut out, tr.t(keys::RESULT_NET_HEADING), &net_rows(tr, result));
    push_section(
        &mut out,
        tr.t(keys::BALANCE_HEADING).trim_start_matches('\n'),
        &input_rows(tr, substrate_name, input, retention_days),
    );
    fs::write(path, out)?;
    Ok(())
}

fn push_report_section(out: &mut String, heading: &str, rows: &[ReportRow]) {
    out.push_str(heading);
    out.push('\n');
    for row in rows {
        if row.unit.is_empty() {
            out.push_str(&format!("  {:<28}: {}\n", row.label, row.value));
        } else {
            out.push_str(&format!("  {:<28}: {} {}\n", row.label, row.value, row.unit));
        }
    }
    out.push('\n');
}

/// 결과 전체를 단락 구분된 텍스트 보고서로 저장한다.
/// 음수 순 밸런스는 경고 줄로 표시하며 오류로 취급하지 않는다.
pub fn export_text_report(
    path: &Path,
    tr: &Translator,
    project: &ProjectInfo,
    substrate_name: &str,
    input: &EnergyBalanceInput,
    retention_days: f64,
    geom: &DigesterGeometry,
    result: &EnergyBalanceResult,
) -> Result<(), ExportError> {
    let mut out = String::new();
    out.push_str(&format!("=== {} ===\n", project.project_name));
    out.push_str(&format!("{} | {}\n\n", project.date, project.analyst));

    push_report_section(
        &mut out,
        tr.t(keys::BALANCE_HEADING).trim_start_matches('\n'),
        &input_rows(tr, substrate_name, input, retention_days),
    );
    push_report_section(&mut out, tr.t(keys::RESULT_GEOMETRY_HEADING), &geometry_rows(tr, geom));
    push_report_section(
        &mut out,
        tr.t(keys::RESULT_PRODUCTION_HEADING),
        &production_rows(tr, result),
    );
    push_report_section(&mut out, tr.t(keys::RESULT_THERMAL_HEADING), &thermal_rows(tr, result));
    push_report_section(&mut out, tr.t(keys::RESULT_POWER_HEADING), &power_rows(tr, result));
    push_report_section(&mut out, tr.t(keys::RESULT_NET_HEADING), &net_rows(tr, result));

    if result.net_electricity_kwh_per_day < 0.0 {
        out.push_str(&format!("! {}\n", tr.t(keys::WARN_ELEC_DEFICIT)));
    }
    if result.net_heat_mj_per_day < 0.0 {
        out.push_str(&format!("! {}\n", tr.t(keys::WARN_HEAT_DEFICIT)));
    } else if result.net_heat_mj_per_day > 0.0 {
        out.push_str(&format!("{}\n", tr.t(keys::NOTE_HEAT_SURPLUS)));
    }

    fs::write(path, out)?;
    Ok(())
}

/// 입력 세트 전체를 담는 프로젝트 파일. TOML로 저장/로드한다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectFile {
    pub info: ProjectInfo,
    pub substrate_name: String,
    /// 체류시간 [일]
    pub retention_days: f64,
    /// 기질 밀도 [kg/m³]
    pub substrate_density_kg_per_m3: f64,
    pub input: EnergyBalanceInput,
}

/// 프로젝트 파일을 TOML로 저장한다.
pub fn save_project(path: &Path, project: &ProjectFile) -> Result<(), ExportError> {
    let content = toml::to_string_pretty(project)?;
    fs::write(path, content)?;
    Ok(())
}

/// TOML 프로젝트 파일을 로드한다.
pub fn load_project(path: &Path) -> Result<ProjectFile, ExportError> {
    let content = fs::read_to_string(path)?;
    let project: ProjectFile = toml::from_str(&content)?;
    Ok(project)
}
