use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::digester::energy_balance::{BiogasUse, CP_SUBSTRATE_KJ_PER_KG_C};
use crate::digester::sizing::DEFAULT_SUBSTRATE_DENSITY_KG_PER_M3;
use crate::units::*;

/// 각 물리량별 표시 단위 설정을 담는다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultUnits {
    pub temperature: TemperatureUnit,
    pub energy: EnergyUnit,
    pub mass: MassUnit,
}

impl Default for DefaultUnits {
    fn default() -> Self {
        Self {
            temperature: TemperatureUnit::Celsius,
            energy: EnergyUnit::MegaJoule,
            mass: MassUnit::Kilogram,
        }
    }
}

/// 입력 폼/CLI 프롬프트가 시작값으로 사용하는 설계 기본값.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceDefaults {
    /// 기질 투입량 [kg/일]
    pub substrate_flow_kg_per_day: f64,
    /// 총고형물(TS) [%]
    pub total_solids_pct: f64,
    /// TS 중 VS [%]
    pub vs_of_ts_pct: f64,
    /// BMP [Nm³ CH₄/kg VS]
    pub bmp_nm3_ch4_per_kg_vs: f64,
    /// 소화 효율 [%]
    pub digestion_efficiency_pct: f64,
    /// 체류시간(HRT) [일]
    pub retention_days: f64,
    /// 메탄 함량 [%]
    pub ch4_content_pct: f64,
    /// 기질 비열 [kJ/kg·°C]
    pub cp_substrate_kj_per_kg_c: f64,
    /// 소화조 운전 온도 [°C]
    pub digester_temp_c: f64,
    /// 기질 유입 온도 [°C]
    pub substrate_inlet_temp_c: f64,
    /// 열전달 계수 U [W/m²K]
    pub u_digester_w_per_m2_k: f64,
    /// 연평균 외기 온도 [°C]
    pub ambient_temp_c: f64,
    /// 기질 밀도 [kg/m³]
    pub substrate_density_kg_per_m3: f64,
    /// 바이오가스 이용 방식
    pub biogas_use: BiogasUse,
    /// CHP 발전 효율 [%]
    pub chp_electrical_eff_pct: f64,
    /// CHP 열효율 [%]
    pub chp_thermal_eff_pct: f64,
    /// 보일러 효율 [%]
    pub boiler_eff_pct: f64,
    /// 보조 전력 원단위 [kWh/ton]
    pub aux_electricity_kwh_per_ton: f64,
}

impl Default for BalanceDefaults {
    fn default() -> Self {
        Self {
            substrate_flow_kg_per_day: 10000.0,
            total_solids_pct: 20.0,
            vs_of_ts_pct: 80.0,
            bmp_nm3_ch4_per_kg_vs: 0.35,
            digestion_efficiency_pct: 75.0,
            retention_days: 30.0,
            ch4_content_pct: 60.0,
            cp_substrate_kj_per_kg_c: CP_SUBSTRATE_KJ_PER_KG_C,
            digester_temp_c: 38.0,
            substrate_inlet_temp_c: 15.0,
            u_digester_w_per_m2_k: 0.5,
            ambient_temp_c: 10.0,
            substrate_density_kg_per_m3: DEFAULT_SUBSTRATE_DENSITY_KG_PER_M3,
            biogas_use: BiogasUse::Chp,
            chp_electrical_eff_pct: 35.0,
            chp_thermal_eff_pct: 45.0,
            boiler_eff_pct: 85.0,
            aux_electricity_kwh_per_ton: 30.0,
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// 언어 코드 (auto/ko/en-us 등)
    pub language: String,
    pub default_units: DefaultUnits,
    pub defaults: BalanceDefaults,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            default_units: DefaultUnits::default(),
            defaults: BalanceDefaults::default(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum ConfigError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// TOML 역직렬화 오류
    Serde(toml::de::Error),
    /// TOML 직렬화 오류
    Serialize(toml::ser::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "파일 입출력 오류: {e}"),
            ConfigError::Serde(e) => write!(f, "설정 파싱 오류: {e}"),
            ConfigError::Serialize(e) => write!(f, "설정 직렬화 오류: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        ConfigError::Io(value)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        ConfigError::Serde(value)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(value: toml::ser::Error) -> Self {
        ConfigError::Serialize(value)
    }
}

/// config.toml을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    let path = Path::new("config.toml");
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        Ok(cfg)
    } else {
        let cfg = Config::default();
        save_config(&cfg)?;
        Ok(cfg)
    }
}

fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(cfg)?;
    fs::write("config.toml", content)?;
    Ok(())
}

impl Config {
    /// 설정을 config.toml에 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        save_config(self)
    }
}
