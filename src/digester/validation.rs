use super::energy_balance::EnergyBalanceInput;

/// 입력 검증 실패를 표현한다. 계산 엔진 자체는 관대한 수치 처리를 유지하므로,
/// 범위 검증은 입력을 수집하는 경계(CLI/GUI)에서 이 모듈로 수행한다.
#[derive(Debug, Clone, PartialEq)]
pub enum InputError {
    /// 음수가 허용되지 않는 항목
    NegativeValue { field: &'static str, value: f64 },
    /// 백분율 항목이 0~100 범위를 벗어남
    PercentOutOfRange { field: &'static str, value: f64 },
    /// 양수가 필요한 항목이 0 이하
    NonPositive { field: &'static str, value: f64 },
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::NegativeValue { field, value } => {
                write!(f, "{field} 값 {value}은(는) 음수일 수 없습니다.")
            }
            InputError::PercentOutOfRange { field, value } => {
                write!(f, "{field} 값 {value}이(가) 0~100% 범위를 벗어났습니다.")
            }
            InputError::NonPositive { field, value } => {
                write!(f, "{field} 값 {value}은(는) 0보다 커야 합니다.")
            }
        }
    }
}

impl std::error::Error for InputError {}

fn non_negative(field: &'static str, value: f64) -> Result<(), InputError> {
    if value < 0.0 {
        Err(InputError::NegativeValue { field, value })
    } else {
        Ok(())
    }
}

fn percent(field: &'static str, value: f64) -> Result<(), InputError> {
    if !(0.0..=100.0).contains(&value) {
        Err(InputError::PercentOutOfRange { field, value })
    } else {
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), InputError> {
    if value <= 0.0 {
        Err(InputError::NonPositive { field, value })
    } else {
        Ok(())
    }
}

/// 소화조 크기 계산 입력을 검증한다. 투입량 ≥ 0, HRT > 0, 밀도 > 0.
pub fn validate_sizing_input(
    substrate_flow_kg_per_day: f64,
    retention_days: f64,
    density_kg_per_m3: f64,
) -> Result<(), InputError> {
    non_negative("기질 투입량", substrate_flow_kg_per_day)?;
    positive("체류시간(HRT)", retention_days)?;
    positive("기질 밀도", density_kg_per_m3)?;
    Ok(())
}

/// 에너지 밸런스 입력의 수치 범위를 검증한다.
pub fn validate_balance_input(input: &EnergyBalanceInput) -> Result<(), InputError> {
    non_negative("기질 투입량", input.substrate_flow_kg_per_day)?;
    percent("총고형물(TS)", input.total_solids_pct)?;
    percent("VS/TS 비율", input.vs_of_ts_pct)?;
    non_negative("BMP", input.bmp_nm3_ch4_per_kg_vs)?;
    percent("소화 효율", input.digestion_efficiency_pct)?;
    percent("메탄 함량", input.ch4_content_pct)?;
    non_negative("열전달 계수 U", input.u_digester_w_per_m2_k)?;
    non_negative("표면적", input.surface_area_m2)?;
    percent("CHP 발전 효율", input.chp_electrical_eff_pct)?;
    percent("CHP 열효율", input.chp_thermal_eff_pct)?;
    percent("보일러 효율", input.boiler_eff_pct)?;
    non_negative("보조 전력 원단위", input.aux_electricity_kwh_per_ton)?;
    Ok(())
}
