/// 대표 기질의 문헌값(TS/VS/BMP) 테이블을 제공한다.
/// 값은 참고용이며 실제 설계에는 실험실 분석값을 사용해야 한다.

#[derive(Debug)]
pub struct SubstrateData {
    pub code: &'static str,
    pub name: &'static str,
    pub notes: &'static str,
    /// 총고형물(TS) [%]
    pub ts_pct: f64,
    /// TS 중 휘발성 고형물(VS) [%]
    pub vs_of_ts_pct: f64,
    /// 메탄 생산 퍼텐셜 [Nm³ CH₄/kg VS]
    pub bmp_nm3_ch4_per_kg_vs: f64,
}

pub fn substrates() -> &'static [SubstrateData] {
    SUBSTRATES
}

/// 코드 또는 이름으로 기질을 찾는다. 대소문자를 구분하지 않는다.
pub fn find_substrate(code: &str) -> Option<&'static SubstrateData> {
    SUBSTRATES
        .iter()
        .find(|s| s.code.eq_ignore_ascii_case(code) || s.name.eq_ignore_ascii_case(code))
}

const SUBSTRATES: &[SubstrateData] = &[
    SubstrateData {
        code: "CATTLE",
        name: "우분 슬러리",
        notes: "축사 수거 슬러리 기준, 희석 정도에 따라 TS 변동 큼",
        ts_pct: 8.0,
        vs_of_ts_pct: 80.0,
        bmp_nm3_ch4_per_kg_vs: 0.20,
    },
    SubstrateData {
        code: "PIG",
        name: "돈분 슬러리",
        notes: "사료 구성에 따라 BMP 0.25~0.35 범위",
        ts_pct: 6.0,
        vs_of_ts_pct: 80.0,
        bmp_nm3_ch4_per_kg_vs: 0.30,
    },
    SubstrateData {
        code: "MAIZE",
        name: "옥수수 사일리지",
        notes: "에너지 작물 대표값",
        ts_pct: 33.0,
        vs_of_ts_pct: 95.0,
        bmp_nm3_ch4_per_kg_vs: 0.34,
    },
    SubstrateData {
        code: "GRASS",
        name: "목초 사일리지",
        notes: "수확 시기에 따라 편차 있음",
        ts_pct: 35.0,
        vs_of_ts_pct: 90.0,
        bmp_nm3_ch4_per_kg_vs: 0.30,
    },
    SubstrateData {
        code: "FOODWASTE",
        name: "음식물류 폐기물",
        notes: "이물질 선별 후 기준, 염분/유분 주의",
        ts_pct: 22.0,
        vs_of_ts_pct: 90.0,
        bmp_nm3_ch4_per_kg_vs: 0.45,
    },
    SubstrateData {
        code: "AGRO",
        name: "농산업 부산물",
        notes: "문헌 추정 일반값",
        ts_pct: 20.0,
        vs_of_ts_pct: 80.0,
        bmp_nm3_ch4_per_kg_vs: 0.30,
    },
];
