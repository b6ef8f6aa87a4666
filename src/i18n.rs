use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_BALANCE: &str = "main_menu.balance";
    pub const MAIN_MENU_SIZING: &str = "main_menu.sizing";
    pub const MAIN_MENU_SUBSTRATES: &str = "main_menu.substrates";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";

    pub const BALANCE_HEADING: &str = "balance.heading";
    pub const BALANCE_NOTE_DEFAULTS: &str = "balance.note_defaults";
    pub const PROMPT_SUBSTRATE_NAME: &str = "prompt.substrate_name";
    pub const PROMPT_SUBSTRATE_FLOW: &str = "prompt.substrate_flow";
    pub const PROMPT_TOTAL_SOLIDS: &str = "prompt.total_solids";
    pub const PROMPT_VS_OF_TS: &str = "prompt.vs_of_ts";
    pub const PROMPT_BMP_SOURCE: &str = "prompt.bmp_source";
    pub const PROMPT_BMP_VALUE: &str = "prompt.bmp_value";
    pub const PROMPT_DIGESTION_EFF: &str = "prompt.digestion_eff";
    pub const PROMPT_RETENTION: &str = "prompt.retention";
    pub const PROMPT_CH4_CONTENT: &str = "prompt.ch4_content";
    pub const PROMPT_TEMP_RANGE: &str = "prompt.temp_range";
    pub const PROMPT_DIGESTER_TEMP: &str = "prompt.digester_temp";
    pub const PROMPT_INLET_TEMP: &str = "prompt.inlet_temp";
    pub const PROMPT_AMBIENT_TEMP: &str = "prompt.ambient_temp";
    pub const PROMPT_U_VALUE: &str = "prompt.u_value";
    pub const PROMPT_BIOGAS_USE: &str = "prompt.biogas_use";
    pub const PROMPT_CHP_ELEC_EFF: &str = "prompt.chp_elec_eff";
    pub const PROMPT_CHP_THERM_EFF: &str = "prompt.chp_therm_eff";
    pub const PROMPT_BOILER_EFF: &str = "prompt.boiler_eff";
    pub const PROMPT_AUX_CONSUMPTION: &str = "prompt.aux_consumption";
    pub const PROMPT_DENSITY: &str = "prompt.density";

    pub const SIZING_HEADING: &str = "sizing.heading";
    pub const RESULT_GEOMETRY_HEADING: &str = "result.geometry_heading";
    pub const RESULT_VOLUME: &str = "result.volume";
    pub const RESULT_DIAMETER: &str = "result.diameter";
    pub const RESULT_HEIGHT: &str = "result.height";
    pub const RESULT_SURFACE_AREA: &str = "result.surface_area";

    pub const RESULT_PRODUCTION_HEADING: &str = "result.production_heading";
    pub const RESULT_VS_FEED: &str = "result.vs_feed";
    pub const RESULT_CH4_PRODUCED: &str = "result.ch4_produced";
    pub const RESULT_BIOGAS_PRODUCED: &str = "result.biogas_produced";
    pub const RESULT_BIOGAS_LHV: &str = "result.biogas_lhv";
    pub const RESULT_GROSS_ENERGY: &str = "result.gross_energy";

    pub const RESULT_THERMAL_HEADING: &str = "result.thermal_heading";
    pub const RESULT_SENSIBLE_HEAT: &str = "result.sensible_heat";
    pub const RESULT_SHELL_LOSS: &str = "result.shell_loss";
    pub const RESULT_THERMAL_DEMAND: &str = "result.thermal_demand";

    pub const RESULT_POWER_HEADING: &str = "result.power_heading";
    pub const RESULT_ELEC_GROSS: &str = "result.elec_gross";
    pub const RESULT_USEFUL_HEAT: &str = "result.useful_heat";
    pub const RESULT_AUX_CONSUMPTION: &str = "result.aux_consumption";
    pub const NOTE_UPGRADING: &str = "result.note_upgrading";

    pub const RESULT_NET_HEADING: &str = "result.net_heading";
    pub const RESULT_NET_ELECTRICITY: &str = "result.net_electricity";
    pub const RESULT_NET_HEAT: &str = "result.net_heat";
    pub const WARN_ELEC_DEFICIT: &str = "warn.elec_deficit";
    pub const WARN_HEAT_DEFICIT: &str = "warn.heat_deficit";
    pub const NOTE_HEAT_SURPLUS: &str = "result.note_heat_surplus";

    pub const SUBSTRATES_HEADING: &str = "substrates.heading";
    pub const SUBSTRATES_NOTE: &str = "substrates.note";

    pub const EXPORT_HEADING: &str = "export.heading";
    pub const EXPORT_PROMPT: &str = "export.prompt";
    pub const PROMPT_PROJECT_NAME: &str = "export.prompt_project_name";
    pub const PROMPT_ANALYST_NAME: &str = "export.prompt_analyst_name";
    pub const PROMPT_EXPORT_PATH: &str = "export.prompt_path";
    pub const EXPORT_CSV_DONE: &str = "export.csv_done";
    pub const EXPORT_REPORT_DONE: &str = "export.report_done";
    pub const EXPORT_PROJECT_SAVED: &str = "export.project_saved";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_LANGUAGE: &str = "settings.current_language";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_ENERGY_OPTIONS: &str = "settings.energy_options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_SAVED: &str = "settings.saved";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("en") {
            Language::En
        } else {
            Language::Ko
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 ko로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code))
            .or_else(|| built_in_pack(lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 번역을 가져온다. 영어 번역이 없으면 한국어 문자열을 폴백한다.
    pub fn t(&self, key: &str) -> &'static str {
        if let Some(ref map) = self.overrides {
            if let Some(v) = map.get(key) {
                return Box::leak(v.clone().into_boxed_str());
            }
        }
        match self.lang {
            Language::En => en(key).unwrap_or_else(|| ko(key)),
            Language::Ko => ko(key),
        }
    }

    /// 키에 대응하는 번역을 찾되, 없으면 None을 돌려준다.
    /// `t`와 달리 누락 시 호출 측이 자체 기본값을 쓸 수 있도록 Option을 반환한다.
    pub fn lookup(&self, key: &str) -> Option<String> {
        if let Some(ref map) = self.overrides {
            if let Some(v) = map.get(key) {
                return Some(v.clone());
            }
        }
        match self.lang {
            Language::En => en(key).map(|s| s.to_string()),
            Language::Ko => match ko(key) {
                "[missing translation]" => None,
                s => Some(s.to_string()),
            },
        }
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en-us".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "ko" => Some("ko".into()),
        "ko-kr" => Some("ko-kr".into()),
        "en" => Some("en".into()),
        "en-us" => Some("en-us".into()),
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en-us".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(loc) = get_locale() {
        if let Some(lang) = normalize_locale_string(&loc) {
            return Some(lang);
        }
    }
    if let Ok(lang) = std::env::var("LANG") {
        if let Some(code) = normalize_locale_string(&lang) {
            return Some(code);
        }
    }
    if let Ok(lang) = std::env::var("LC_ALL") {
        if let Some(code) = normalize_locale_string(&lang) {
            return Some(code);
        }
    }
    None
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 로 구성된 플랫 맵.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    // 1) full code (e.g., en-us)
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    // 2) base code (e.g., en)
    if let Some((base, _)) = lang.split_once(['-', '_']) {
        if let Some(map) = try_load(base) {
            return Some(map);
        }
    }
    None
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

/// 내장 언어팩(파일이 없어도 동작하도록 빌드 시 포함).
fn built_in_pack(lang: &str) -> Option<HashMap<String, String>> {
    match lang.to_lowercase().as_str() {
        "en-us" | "en" => parse_toml_to_map(include_str!("../locales/en-us.toml")),
        "ko-kr" | "ko" => parse_toml_to_map(include_str!("../locales/ko-kr.toml")),
        _ => None,
    }
}

fn ko(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        MAIN_MENU_TITLE => "\n=== Biogas Balance Toolbox ===",
        MAIN_MENU_BALANCE => "1) 에너지 밸런스 계산",
        MAIN_MENU_SIZING => "2) 소화조 크기 계산",
        MAIN_MENU_SUBSTRATES => "3) 기질 문헌값 테이블",
        MAIN_MENU_SETTINGS => "4) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        BALANCE_HEADING => "\n-- 에너지 밸런스 --",
        BALANCE_NOTE_DEFAULTS => "엔터만 누르면 대괄호의 기본값을 사용합니다.",
        PROMPT_SUBSTRATE_NAME => "기질 이름/종류",
        PROMPT_SUBSTRATE_FLOW => "기질 투입량 [kg/일]",
        PROMPT_TOTAL_SOLIDS => "총고형물 TS [%]",
        PROMPT_VS_OF_TS => "TS 중 VS [%]",
        PROMPT_BMP_SOURCE => "BMP 출처 (1=실험실 분석값, 2=문헌 추정값)",
        PROMPT_BMP_VALUE => "BMP [Nm³ CH₄/kg VS]",
        PROMPT_DIGESTION_EFF => "소화 효율 [%]",
        PROMPT_RETENTION => "체류시간 HRT [일]",
        PROMPT_CH4_CONTENT => "바이오가스 중 메탄 함량 [%]",
        PROMPT_TEMP_RANGE => "소화조 온도 대역 (1=중온 38°C, 2=고온 52°C, 3=직접 입력)",
        PROMPT_DIGESTER_TEMP => "소화조 운전 온도 [°C]",
        PROMPT_INLET_TEMP => "기질 유입 온도 [°C]",
        PROMPT_AMBIENT_TEMP => "연평균 외기 온도 [°C]",
        PROMPT_U_VALUE => "총괄 열전달 계수 U [W/m²K] (보온: 0.3~0.8, 무보온: 1.5~3.0)",
        PROMPT_BIOGAS_USE => "바이오가스 이용 방식 (1=CHP, 2=보일러, 3=업그레이딩)",
        PROMPT_CHP_ELEC_EFF => "CHP 발전 효율 [%]",
        PROMPT_CHP_THERM_EFF => "CHP 회수 열효율 [%]",
        PROMPT_BOILER_EFF => "보일러 효율 [%]",
        PROMPT_AUX_CONSUMPTION => "소내 보조 전력 [kWh/ton 기질]",
        PROMPT_DENSITY => "기질 밀도 [kg/m³]",
        SIZING_HEADING => "\n-- 소화조 크기 계산 --",
        RESULT_GEOMETRY_HEADING => "[소화조 크기]",
        RESULT_VOLUME => "유효 용적",
        RESULT_DIAMETER => "직경 (H=D)",
        RESULT_HEIGHT => "높이",
        RESULT_SURFACE_AREA => "외부 표면적",
        RESULT_PRODUCTION_HEADING => "[바이오가스 생산]",
        RESULT_VS_FEED => "투입 VS",
        RESULT_CH4_PRODUCED => "메탄 생산량",
        RESULT_BIOGAS_PRODUCED => "바이오가스 생산량",
        RESULT_BIOGAS_LHV => "바이오가스 저위발열량",
        RESULT_GROSS_ENERGY => "바이오가스 총 에너지",
        RESULT_THERMAL_HEADING => "[소화조 열 수요]",
        RESULT_SENSIBLE_HEAT => "기질 승온 열량",
        RESULT_SHELL_LOSS => "외피 열손실",
        RESULT_THERMAL_DEMAND => "총 열 수요",
        RESULT_POWER_HEADING => "[에너지 생산/소비]",
        RESULT_ELEC_GROSS => "총 발전량",
        RESULT_USEFUL_HEAT => "회수 유효 열",
        RESULT_AUX_CONSUMPTION => "소내 보조 전력 소비",
        NOTE_UPGRADING => "바이오가스를 업그레이딩에 전량 사용합니다. 현장 발전/열 회수는 없습니다.",
        RESULT_NET_HEADING => "[순 에너지 밸런스]",
        RESULT_NET_ELECTRICITY => "순 수출 가능 전력",
        RESULT_NET_HEAT => "순 가용 열",
        WARN_ELEC_DEFICIT => "주의: 전력 부족 상태입니다.",
        WARN_HEAT_DEFICIT => "주의: 열 부족 상태입니다.",
        NOTE_HEAT_SURPLUS => "잉여 열을 다른 용도로 활용할 수 있습니다.",
        SUBSTRATES_HEADING => "\n-- 기질 문헌값 테이블 --",
        SUBSTRATES_NOTE => "참고용 문헌값입니다. 설계에는 실험실 분석값을 사용하세요.",
        EXPORT_HEADING => "\n-- 결과 내보내기 --",
        EXPORT_PROMPT => "1) CSV  2) 텍스트 보고서  3) 프로젝트 저장(TOML)  0) 건너뛰기",
        PROMPT_PROJECT_NAME => "프로젝트 이름",
        PROMPT_ANALYST_NAME => "분석자 이름",
        PROMPT_EXPORT_PATH => "저장 경로",
        EXPORT_CSV_DONE => "CSV 파일을 저장했습니다:",
        EXPORT_REPORT_DONE => "보고서를 저장했습니다:",
        EXPORT_PROJECT_SAVED => "프로젝트 파일을 저장했습니다:",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT_LANGUAGE => "현재 언어:",
        SETTINGS_OPTIONS => "1) 한국어  2) English",
        SETTINGS_ENERGY_OPTIONS => "에너지 표시 단위: 1=MJ 2=kWh 3=kcal (취소하려면 엔터)",
        SETTINGS_PROMPT_CHANGE => "변경할 번호(취소하려면 엔터): ",
        SETTINGS_SAVED => "설정이 저장되었습니다.",
        _ => "[missing translation]",
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    let s = match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting.",
        MAIN_MENU_TITLE => "\n=== Biogas Balance Toolbox ===",
        MAIN_MENU_BALANCE => "1) Energy balance",
        MAIN_MENU_SIZING => "2) Digester sizing",
        MAIN_MENU_SUBSTRATES => "3) Substrate reference table",
        MAIN_MENU_SETTINGS => "4) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid selection. Try again.",
        ERROR_INVALID_NUMBER => "Enter a number.",
        BALANCE_HEADING => "\n-- Energy Balance --",
        BALANCE_NOTE_DEFAULTS => "Press Enter to accept the bracketed default.",
        PROMPT_SUBSTRATE_NAME => "Substrate name/type",
        PROMPT_SUBSTRATE_FLOW => "Substrate flow [kg/day]",
        PROMPT_TOTAL_SOLIDS => "Total solids TS [%]",
        PROMPT_VS_OF_TS => "VS as % of TS [%]",
        PROMPT_BMP_SOURCE => "BMP source (1=lab value, 2=literature estimate)",
        PROMPT_BMP_VALUE => "BMP [Nm³ CH₄/kg VS]",
        PROMPT_DIGESTION_EFF => "Digestion efficiency [%]",
        PROMPT_RETENTION => "Hydraulic retention time [days]",
        PROMPT_CH4_CONTENT => "CH₄ content of biogas [%]",
        PROMPT_TEMP_RANGE => "Digester range (1=mesophilic 38°C, 2=thermophilic 52°C, 3=custom)",
        PROMPT_DIGESTER_TEMP => "Digester operating temperature [°C]",
        PROMPT_INLET_TEMP => "Substrate inlet temperature [°C]",
        PROMPT_AMBIENT_TEMP => "Mean ambient temperature [°C]",
        PROMPT_U_VALUE => "Overall U [W/m²K] (insulated: 0.3-0.8, bare: 1.5-3.0)",
        PROMPT_BIOGAS_USE => "Biogas use (1=CHP, 2=boiler, 3=upgrading)",
        PROMPT_CHP_ELEC_EFF => "CHP electrical efficiency [%]",
        PROMPT_CHP_THERM_EFF => "CHP recoverable thermal efficiency [%]",
        PROMPT_BOILER_EFF => "Boiler efficiency [%]",
        PROMPT_AUX_CONSUMPTION => "Auxiliary electricity [kWh/ton substrate]",
        PROMPT_DENSITY => "Substrate density [kg/m³]",
        SIZING_HEADING => "\n-- Digester Sizing --",
        RESULT_GEOMETRY_HEADING => "[Digester geometry]",
        RESULT_VOLUME => "Working volume",
        RESULT_DIAMETER => "Diameter (H=D)",
        RESULT_HEIGHT => "Height",
        RESULT_SURFACE_AREA => "External surface area",
        RESULT_PRODUCTION_HEADING => "[Biogas production]",
        RESULT_VS_FEED => "VS fed",
        RESULT_CH4_PRODUCED => "Methane produced",
        RESULT_BIOGAS_PRODUCED => "Biogas produced",
        RESULT_BIOGAS_LHV => "Biogas LHV",
        RESULT_GROSS_ENERGY => "Gross biogas energy",
        RESULT_THERMAL_HEADING => "[Digester heat demand]",
        RESULT_SENSIBLE_HEAT => "Substrate heating",
        RESULT_SHELL_LOSS => "Shell heat loss",
        RESULT_THERMAL_DEMAND => "Total heat demand",
        RESULT_POWER_HEADING => "[Energy production/consumption]",
        RESULT_ELEC_GROSS => "Gross electricity",
        RESULT_USEFUL_HEAT => "Useful heat recovered",
        RESULT_AUX_CONSUMPTION => "Auxiliary consumption",
        NOTE_UPGRADING => "All biogas goes to upgrading. No on-site power or heat recovery.",
        RESULT_NET_HEADING => "[Net energy balance]",
        RESULT_NET_ELECTRICITY => "Net exportable electricity",
        RESULT_NET_HEAT => "Net available heat",
        WARN_ELEC_DEFICIT => "Warning: electricity deficit.",
        WARN_HEAT_DEFICIT => "Warning: heat deficit.",
        NOTE_HEAT_SURPLUS => "Surplus heat is available for other uses.",
        SUBSTRATES_HEADING => "\n-- Substrate Reference Table --",
        SUBSTRATES_NOTE => "Literature values for reference. Use lab analyses for design.",
        EXPORT_HEADING => "\n-- Export Results --",
        EXPORT_PROMPT => "1) CSV  2) Text report  3) Save project (TOML)  0) Skip",
        PROMPT_PROJECT_NAME => "Project name",
        PROMPT_ANALYST_NAME => "Analyst name",
        PROMPT_EXPORT_PATH => "Output path",
        EXPORT_CSV_DONE => "CSV written:",
        EXPORT_REPORT_DONE => "Report written:",
        EXPORT_PROJECT_SAVED => "Project file written:",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_LANGUAGE => "Current language:",
        SETTINGS_OPTIONS => "1) Korean  2) English",
        SETTINGS_ENERGY_OPTIONS => "Energy display unit: 1=MJ 2=kWh 3=kcal (Enter to cancel)",
        SETTINGS_PROMPT_CHANGE => "Number to change (Enter to cancel): ",
        SETTINGS_SAVED => "Settings saved.",
        _ => return None,
    };
    Some(s)
}
