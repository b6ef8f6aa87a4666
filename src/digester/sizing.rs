use std::f64::consts::PI;

/// 기질 밀도를 따로 알 수 없을 때 사용하는 기본값 [kg/m³].
pub const DEFAULT_SUBSTRATE_DENSITY_KG_PER_M3: f64 = 1000.0;

/// 소화조 크기 계산 결과.
#[derive(Debug, Clone, Copy)]
pub struct DigesterGeometry {
    /// 소화조 유효 용적 [m³]
    pub volume_m3: f64,
    /// 등가 원통 직경 [m]
    pub diameter_m: f64,
    /// 높이 [m] (H=D 설계 가정)
    pub height_m: f64,
    /// 외부 표면적 [m²]
    pub surface_area_m2: f64,
}

/// 기질 투입량과 체류시간으로 소화조 용적/형상을 계산한다.
///
/// 용적은 일일 기질 체적 × HRT. 용적이 0 이하이면 직경/높이/표면적은
/// 모두 0.0으로 반환한다(세제곱근/나눗셈 특이점 방지).
/// H=D 원통 가정이므로 표면적은 측면 + 상판 한 면, 즉 1.5·π·d².
pub fn size_digester(
    substrate_flow_kg_per_day: f64,
    retention_days: f64,
    density_kg_per_m3: f64,
) -> DigesterGeometry {
    let daily_volume_m3 = substrate_flow_kg_per_day / density_kg_per_m3;
    let volume_m3 = daily_volume_m3 * retention_days;
    if volume_m3 > 0.0 {
        let diameter_m = (4.0 * volume_m3 / PI).cbrt();
        DigesterGeometry {
            volume_m3,
            diameter_m,
            height_m: diameter_m,
            surface_area_m2: 1.5 * PI * diameter_m * diameter_m,
        }
    } else {
        DigesterGeometry {
            volume_m3,
            diameter_m: 0.0,
            height_m: 0.0,
            surface_area_m2: 0.0,
        }
    }
}
