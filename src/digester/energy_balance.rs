use serde::{Deserialize, Serialize};

/// 기질 비열 기본값 [kJ/kg·°C]. 물 기준 근사치.
pub const CP_SUBSTRATE_KJ_PER_KG_C: f64 = 4.186;

/// 메탄 저위발열량 [MJ/Nm³].
pub const CH4_LHV_MJ_PER_NM3: f64 = 35.8;

/// 바이오가스 주 이용 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BiogasUse {
    /// 열병합 발전(CHP)
    Chp,
    /// 바이오가스 보일러
    Boiler,
    /// 바이오메탄 업그레이딩 (현장 변환 없음)
    Upgrading,
}

/// 소화조 운전 온도 대역 프리셋.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemperatureRange {
    /// 중온 소화 (~37-42 °C)
    Mesophilic,
    /// 고온 소화 (~50-55 °C)
    Thermophilic,
}

impl TemperatureRange {
    /// 프리셋이 대표하는 운전 온도 [°C].
    pub fn operating_temp_c(&self) -> f64 {
        match self {
            TemperatureRange::Mesophilic => 38.0,
            TemperatureRange::Thermophilic => 52.0,
        }
    }
}

/// 에너지 밸런스 계산 입력.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnergyBalanceInput {
    /// 기질 투입량 [kg/일]
    pub substrate_flow_kg_per_day: f64,
    /// 총고형물(TS) 함량 [%]
    pub total_solids_pct: f64,
    /// TS 중 휘발성 고형물(VS) 비율 [%]
    pub vs_of_ts_pct: f64,
    /// 메탄 생산 퍼텐셜 BMP [Nm³ CH₄/kg VS]
    pub bmp_nm3_ch4_per_kg_vs: f64,
    /// 소화 효율 [%]
    pub digestion_efficiency_pct: f64,
    /// 바이오가스 중 메탄 함량 [%]
    pub ch4_content_pct: f64,
    /// 기질 비열 [kJ/kg·°C]
    pub cp_substrate_kj_per_kg_c: f64,
    /// 소화조 운전 온도 [°C]
    pub digester_temp_c: f64,
    /// 기질 유입 온도 [°C]
    pub substrate_inlet_temp_c: f64,
    /// 소화조 총괄 열전달 계수 U [W/m²K]
    pub u_digester_w_per_m2_k: f64,
    /// 소화조 외부 표면적 [m²] - 크기 계산 결과를 넘겨받는다
    pub surface_area_m2: f64,
    /// 연평균 외기 온도 [°C]
    pub ambient_temp_c: f64,
    /// 바이오가스 이용 방식
    pub biogas_use: BiogasUse,
    /// CHP 발전 효율 [%]
    pub chp_electrical_eff_pct: f64,
    /// CHP 회수 열효율 [%]
    pub chp_thermal_eff_pct: f64,
    /// 보일러 효율 [%]
    pub boiler_eff_pct: f64,
    /// 소내 보조 전력 소비 원단위 [kWh/ton 기질]
    pub aux_electricity_kwh_per_ton: f64,
}

/// 에너지 밸런스 계산 결과. 모든 값은 일 단위.
#[derive(Debug, Clone)]
pub struct EnergyBalanceResult {
    /// 투입 VS [kg/일]
    pub vs_feed_kg_per_day: f64,
    /// 메탄 생산량 [Nm³/일]
    pub ch4_produced_nm3_per_day: f64,
    /// 바이오가스 생산량 [Nm³/일]
    pub biogas_produced_nm3_per_day: f64,
    /// 바이오가스 저위발열량 [MJ/Nm³]
    pub biogas_lhv_mj_per_nm3: f64,
    /// 바이오가스 총 에너지 [MJ/일]
    pub gross_energy_mj_per_day: f64,
    /// 바이오가스 총 에너지 [kWh/일]
    pub gross_energy_kwh_per_day: f64,
    /// 기질 승온 열량 [MJ/일]
    pub sensible_heat_mj_per_day: f64,
    /// 소화조 외피 열손실 [MJ/일]
    pub shell_loss_mj_per_day: f64,
    /// 소화조 총 열 수요 [MJ/일]
    pub thermal_demand_mj_per_day: f64,
    /// 소화조 총 열 수요 [kWh/일]
    pub thermal_demand_kwh_per_day: f64,
    /// 총 발전량 [kWh/일]
    pub electricity_gross_kwh_per_day: f64,
    /// 회수 가능 유효 열 [MJ/일]
    pub useful_heat_mj_per_day: f64,
    /// 소내 보조 전력 소비 [kWh/일]
    pub aux_consumption_kwh_per_day: f64,
    /// 순 수출 가능 전력 [kWh/일] - 음수면 부족
    pub net_electricity_kwh_per_day: f64,
    /// 순 가용 열 [MJ/일] - 음수면 부족
    pub net_heat_mj_per_day: f64,
    /// 순 가용 열 [kWh/일]
    pub net_heat_kwh_per_day: f64,
    /// 경고/주의 메시지
    pub warnings: Vec<String>,
}

/// 정상 상태 에너지/물질 밸런스를 계산한다.
///
/// 입력 레코드만의 순수 함수이며 내부에서 실패하지 않는다. 메탄 함량 0%와
/// ΔT≤0(또는 표면적 0)의 나눗셈/음수 경로는 0으로 처리한다. 음수 순 밸런스는
/// 부족을 뜻하는 유효한 결과이며 오류가 아니다.
pub fn compute_energy_balance(input: &EnergyBalanceInput) -> EnergyBalanceResult {
    let vs_feed_kg_per_day = input.substrate_flow_kg_per_day
        * (input.total_solids_pct / 100.0)
        * (input.vs_of_ts_pct / 100.0);

    let ch4_produced_nm3_per_day = vs_feed_kg_per_day
        * input.bmp_nm3_ch4_per_kg_vs
        * (input.digestion_efficiency_pct / 100.0);

    let biogas_produced_nm3_per_day = if input.ch4_content_pct > 0.0 {
        ch4_produced_nm3_per_day / (input.ch4_content_pct / 100.0)
    } else {
        0.0
    };

    let biogas_lhv_mj_per_nm3 = CH4_LHV_MJ_PER_NM3 * (input.ch4_content_pct / 100.0);
    let gross_energy_mj_per_day = biogas_produced_nm3_per_day * biogas_lhv_mj_per_nm3;
    let gross_energy_kwh_per_day = gross_energy_mj_per_day / 3.6;

    // kJ → MJ
    let sensible_heat_mj_per_day = input.substrate_flow_kg_per_day
        * input.cp_substrate_kj_per_kg_c
        * (input.digester_temp_c - input.substrate_inlet_temp_c)
        / 1000.0;

    // W·s/일 → MJ/일
    let delta_t = input.digester_temp_c - input.ambient_temp_c;
    let shell_loss_mj_per_day = if delta_t > 0.0 && input.surface_area_m2 > 0.0 {
        input.u_digester_w_per_m2_k * input.surface_area_m2 * delta_t * 86400.0 / 1.0e6
    } else {
        0.0
    };

    let thermal_demand_mj_per_day = sensible_heat_mj_per_day + shell_loss_mj_per_day;
    let thermal_demand_kwh_per_day = thermal_demand_mj_per_day / 3.6;

    let (electricity_gross_kwh_per_day, useful_heat_mj_per_day) = match input.biogas_use {
        BiogasUse::Chp => (
            gross_energy_kwh_per_day * (input.chp_electrical_eff_pct / 100.0),
            gross_energy_mj_per_day * (input.chp_thermal_eff_pct / 100.0),
        ),
        BiogasUse::Boiler => (0.0, gross_energy_mj_per_day * (input.boiler_eff_pct / 100.0)),
        BiogasUse::Upgrading => (0.0, 0.0),
    };

    let aux_consumption_kwh_per_day =
        (input.substrate_flow_kg_per_day / 1000.0) * input.aux_electricity_kwh_per_ton;
    let net_electricity_kwh_per_day = electricity_gross_kwh_per_day - aux_consumption_kwh_per_day;
    let net_heat_mj_per_day = useful_heat_mj_per_day - thermal_demand_mj_per_day;
    let net_heat_kwh_per_day = net_heat_mj_per_day / 3.6;

    let mut warnings = Vec::new();
    if net_electricity_kwh_per_day < 0.0 {
        warnings.push(format!(
            "전력 부족: 소내 소비가 발전량보다 {:.2} kWh/일 많습니다.",
            -net_electricity_kwh_per_day
        ));
    }
    if net_heat_mj_per_day < 0.0 {
        warnings.push(format!(
            "열 부족: 외부에서 {:.2} MJ/일을 추가 공급해야 합니다.",
            -net_heat_mj_per_day
        ));
    }

    EnergyBalanceResult {
        vs_feed_kg_per_day,
        ch4_produced_nm3_per_day,
        biogas_produced_nm3_per_day,
        biogas_lhv_mj_per_nm3,
        gross_energy_mj_per_day,
        gross_energy_kwh_per_day,
        sensible_heat_mj_per_day,
        shell_loss_mj_per_day,
        thermal_demand_mj_per_day,
        thermal_demand_kwh_per_day,
        electricity_gross_kwh_per_day,
        useful_heat_mj_per_day,
        aux_consumption_kwh_per_day,
        net_electricity_kwh_per_day,
        net_heat_mj_per_day,
        net_heat_kwh_per_day,
        warnings,
    }
}
