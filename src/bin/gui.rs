#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use eframe::{egui, App, Frame};
use image::GenericImageView;
use rfd::FileDialog;
use std::{env, fs, path::Path};

use biogas_balance_toolbox::{
    config,
    digester::energy_balance::{
        compute_energy_balance, BiogasUse, EnergyBalanceInput, EnergyBalanceResult,
        TemperatureRange,
    },
    digester::sizing::{size_digester, DigesterGeometry},
    digester::validation::{validate_balance_input, validate_sizing_input},
    export::{self, ProjectFile, ProjectInfo},
    i18n::{self, keys},
    substrate_db,
    units::{convert_energy, convert_mass, convert_temperature, EnergyUnit, MassUnit, TemperatureUnit},
};

fn main() -> Result<(), eframe::Error> {
    // CLI 언어 옵션 처리: --lang xx 또는 --lang=xx (xx: auto/en-us/ko-kr/ko)
    let mut cli_lang: Option<String> = None;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = Some(val.to_string());
        } else if a == "--lang" || a == "-L" {
            if i + 1 < args.len() {
                cli_lang = Some(args[i + 1].clone());
                i += 1;
            }
        }
        i += 1;
    }

    let icon_data = load_app_icon();
    let mut viewport = egui::ViewportBuilder::default().with_inner_size([1080.0, 760.0]);
    if let Some(icon) = icon_data {
        viewport = viewport.with_icon(icon);
    }
    let cfg = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let mut app_cfg = config::load_or_default().unwrap_or_default();
    if let Some(lang_cli) = cli_lang {
        let resolved = i18n::resolve_language(&lang_cli, Some(app_cfg.language.as_str()));
        app_cfg.language = resolved;
    }
    eframe::run_native(
        "Biogas Balance Toolbox",
        cfg,
        Box::new(move |cc| {
            if let Err(e) = setup_fonts(&cc.egui_ctx) {
                eprintln!("Font error: {e}");
            }
            Box::new(GuiApp::new(app_cfg.clone()))
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width: w,
        height: h,
    })
}

/// 한글 표시가 가능한 시스템 폰트를 찾아 egui에 등록한다.
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    let mut candidates: Vec<std::path::PathBuf> = vec![
        "/usr/share/fonts/truetype/nanum/NanumGothic.ttf".into(),
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc".into(),
        "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc".into(),
        "/System/Library/Fonts/AppleSDGothicNeo.ttc".into(),
    ];
    if let Some(windir) = std::env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        for cand in ["malgun.ttf", "malgunsl.ttf", "gulim.ttc", "batang.ttc"] {
            candidates.push(fonts.join(cand));
        }
    }
    for p in candidates {
        if p.exists() {
            let bytes = fs::read(&p)
                .map_err(|e| format!("Failed to read font ({}): {e}", p.display()))?;
            apply_font_bytes(ctx, bytes, "korean_font");
            return Ok(());
        }
    }
    Err("No CJK-capable font found; falling back to egui defaults.".into())
}

/// 폰트 바이트를 egui 기본 패밀리 앞에 끼워 넣는다.
fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    fonts
        .font_data
        .insert(name.to_string(), egui::FontData::from_owned(bytes));
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .insert(0, name.to_string());
    fonts
        .families
        .entry(egui::FontFamily::Monospace)
        .or_default()
        .push(name.to_string());
    ctx.set_fonts(fonts);
}

/// 온도 대역 선택 상태. Custom이면 직접 입력 필드를 쓴다.
#[derive(Clone, Copy, PartialEq, Eq)]
enum RangeChoice {
    Mesophilic,
    Thermophilic,
    Custom,
}

struct GuiApp {
    config: config::Config,
    tr: i18n::Translator,
    show_settings: bool,
    /// 계산 버튼을 눌러야 결과 패널이 보인다.
    show_results: bool,
    // 프로젝트
    project_name: String,
    analyst_name: String,
    // 기질
    substrate_preset: Option<&'static str>,
    substrate_name: String,
    substrate_flow: f64,
    flow_unit: MassUnit,
    total_solids_pct: f64,
    vs_of_ts_pct: f64,
    bmp_value: f64,
    inlet_temp: f64,
    temp_unit: TemperatureUnit,
    // 공정
    range_choice: RangeChoice,
    custom_digester_temp_c: f64,
    digestion_eff_pct: f64,
    retention_days: f64,
    ch4_content_pct: f64,
    ambient_temp: f64,
    u_value: f64,
    substrate_density: f64,
    // 이용/보조
    biogas_use: BiogasUse,
    chp_elec_eff_pct: f64,
    chp_therm_eff_pct: f64,
    boiler_eff_pct: f64,
    aux_kwh_per_ton: f64,
    // 결과
    geometry: Option<DigesterGeometry>,
    balance: Option<EnergyBalanceResult>,
    last_input: Option<EnergyBalanceInput>,
    input_error: Option<String>,
    export_status: Option<String>,
    ui_scale: f32,
}

impl GuiApp {
    fn new(config: config::Config) -> Self {
        let lang = i18n::resolve_language("auto", Some(config.language.as_str()));
        let tr = i18n::Translator::new_with_pack(&lang, None);
        let d = config.defaults.clone();
        Self {
            tr,
            show_settings: false,
            show_results: false,
            project_name: String::new(),
            analyst_name: String::new(),
            substrate_preset: None,
            substrate_name: String::new(),
            substrate_flow: d.substrate_flow_kg_per_day,
            flow_unit: config.default_units.mass,
            total_solids_pct: d.total_solids_pct,
            vs_of_ts_pct: d.vs_of_ts_pct,
            bmp_value: d.bmp_nm3_ch4_per_kg_vs,
            inlet_temp: d.substrate_inlet_temp_c,
            temp_unit: config.default_units.temperature,
            range_choice: RangeChoice::Mesophilic,
            custom_digester_temp_c: d.digester_temp_c,
            digestion_eff_pct: d.digestion_efficiency_pct,
            retention_days: d.retention_days,
            ch4_content_pct: d.ch4_content_pct,
            ambient_temp: d.ambient_temp_c,
            u_value: d.u_digester_w_per_m2_k,
            substrate_density: d.substrate_density_kg_per_m3,
            biogas_use: d.biogas_use,
            chp_elec_eff_pct: d.chp_electrical_eff_pct,
            chp_therm_eff_pct: d.chp_thermal_eff_pct,
            boiler_eff_pct: d.boiler_eff_pct,
            aux_kwh_per_ton: d.aux_electricity_kwh_per_ton,
            geometry: None,
            balance: None,
            last_input: None,
            input_error: None,
            export_status: None,
            ui_scale: 1.0,
            config,
        }
    }

    fn txt(&self, key: &str, fallback: &str) -> String {
        self.tr.lookup(key).unwrap_or_else(|| fallback.to_string())
    }

    fn digester_temp_c(&self) -> f64 {
        match self.range_choice {
            RangeChoice::Mesophilic => TemperatureRange::Mesophilic.operating_temp_c(),
            RangeChoice::Thermophilic => TemperatureRange::Thermophilic.operating_temp_c(),
            RangeChoice::Custom => self.custom_digester_temp_c,
        }
    }

    /// 표시 단위로 입력된 값을 SI로 바꿔 입력 레코드를 만든다.
    fn build_input(&self, surface_area_m2: f64) -> EnergyBalanceInput {
        let flow_kg_per_day =
            convert_mass(self.substrate_flow, self.flow_unit, MassUnit::Kilogram);
        let inlet_c =
            convert_temperature(self.inlet_temp, self.temp_unit, TemperatureUnit::Celsius);
        let ambient_c =
            convert_temperature(self.ambient_temp, self.temp_unit, TemperatureUnit::Celsius);
        EnergyBalanceInput {
            substrate_flow_kg_per_day: flow_kg_per_day,
            total_solids_pct: self.total_solids_pct,
            vs_of_ts_pct: self.vs_of_ts_pct,
            bmp_nm3_ch4_per_kg_vs: self.bmp_value,
            digestion_efficiency_pct: self.digestion_eff_pct,
            ch4_content_pct: self.ch4_content_pct,
            cp_substrate_kj_per_kg_c: self.config.defaults.cp_substrate_kj_per_kg_c,
            digester_temp_c: self.digester_temp_c(),
            substrate_inlet_temp_c: inlet_c,
            u_digester_w_per_m2_k: self.u_value,
            surface_area_m2,
            ambient_temp_c: ambient_c,
            biogas_use: self.biogas_use,
            chp_electrical_eff_pct: self.chp_elec_eff_pct,
            chp_thermal_eff_pct: self.chp_therm_eff_pct,
            boiler_eff_pct: self.boiler_eff_pct,
            aux_electricity_kwh_per_ton: self.aux_kwh_per_ton,
        }
    }

    fn compute(&mut self) {
        self.input_error = None;
        self.export_status = None;
        let flow_kg_per_day =
            convert_mass(self.substrate_flow, self.flow_unit, MassUnit::Kilogram);
        if let Err(e) =
            validate_sizing_input(flow_kg_per_day, self.retention_days, self.substrate_density)
        {
            self.input_error = Some(e.to_string());
            self.show_results = false;
            return;
        }
        let geom = size_digester(flow_kg_per_day, self.retention_days, self.substrate_density);
        let input = self.build_input(geom.surface_area_m2);
        if let Err(e) = validate_balance_input(&input) {
            self.input_error = Some(e.to_string());
            self.show_results = false;
            return;
        }
        let result = compute_energy_balance(&input);
        self.geometry = Some(geom);
        self.balance = Some(result);
        self.last_input = Some(input);
        self.show_results = true;
    }

    fn apply_substrate_preset(&mut self, code: &'static str) {
        if let Some(s) = substrate_db::find_substrate(code) {
            self.substrate_name = s.name.to_string();
            self.total_solids_pct = s.ts_pct;
            self.vs_of_ts_pct = s.vs_of_ts_pct;
            self.bmp_value = s.bmp_nm3_ch4_per_kg_vs;
        }
    }

    fn project_info(&self) -> ProjectInfo {
        let name = if self.project_name.trim().is_empty() {
            "-".to_string()
        } else {
            self.project_name.clone()
        };
        let analyst = if self.analyst_name.trim().is_empty() {
            "-".to_string()
        } else {
            self.analyst_name.clone()
        };
        ProjectInfo::new(name, analyst)
    }

    fn export_csv(&mut self) {
        let (Some(geom), Some(result), Some(input)) =
            (self.geometry.as_ref(), self.balance.as_ref(), self.last_input.as_ref())
        else {
            return;
        };
        let Some(path) = FileDialog::new()
            .add_filter("CSV", &["csv"])
            .set_file_name("balance.csv")
            .save_file()
        else {
            return;
        };
        let res = export::export_csv(
            &path,
            &self.tr,
            &self.project_info(),
            &self.substrate_name,
            input,
            self.retention_days,
            geom,
            result,
        );
        self.export_status = Some(match res {
            Ok(()) => format!("{} {}", self.tr.t(keys::EXPORT_CSV_DONE), path.display()),
            Err(e) => e.to_string(),
        });
    }

    fn export_report(&mut self) {
        let (Some(geom), Some(result), Some(input)) =
            (self.geometry.as_ref(), self.balance.as_ref(), self.last_input.as_ref())
        else {
            return;
        };
        let Some(path) = FileDialog::new()
            .add_filter("Text", &["txt"])
            .set_file_name("balance.txt")
            .save_file()
        else {
            return;
        };
        let res = export::export_text_report(
            &path,
            &self.tr,
            &self.project_info(),
            &self.substrate_name,
            input,
            self.retention_days,
            geom,
            result,
        );
        self.export_status = Some(match res {
            Ok(()) => format!("{} {}", self.tr.t(keys::EXPORT_REPORT_DONE), path.display()),
            Err(e) => e.to_string(),
        });
    }

    fn export_project(&mut self) {
        let Some(input) = self.last_input.as_ref() else {
            return;
        };
        let Some(path) = FileDialog::new()
            .add_filter("TOML", &["toml"])
            .set_file_name("project.toml")
            .save_file()
        else {
            return;
        };
        let project = ProjectFile {
            info: self.project_info(),
            substrate_name: self.substrate_name.clone(),
            retention_days: self.retention_days,
            substrate_density_kg_per_m3: self.substrate_density,
            input: input.clone(),
        };
        self.export_status = Some(match export::save_project(&path, &project) {
            Ok(()) => format!("{} {}", self.tr.t(keys::EXPORT_PROJECT_SAVED), path.display()),
            Err(e) => e.to_string(),
        });
    }

    fn fmt_energy(&self, value_mj: f64) -> String {
        let unit = self.config.default_units.energy;
        let v = convert_energy(value_mj, EnergyUnit::MegaJoule, unit);
        format!("{:.2} {}/d", v, unit.symbol())
    }

    fn input_form_left(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new(self.txt("gui.section_substrate", "1. Substrate characteristics"))
            .default_open(true)
            .show(ui, |ui| {
                egui::Grid::new("substrate_grid")
                    .num_columns(3)
                    .spacing([8.0, 6.0])
                    .show(ui, |ui| {
                        ui.label(self.txt("gui.substrate_preset", "Literature preset"));
                        let selected = self
                            .substrate_preset
                            .and_then(substrate_db::find_substrate)
                            .map(|s| s.name.to_string())
                            .unwrap_or_else(|| self.txt("gui.substrate_custom", "(custom)"));
                        let mut chosen: Option<&'static str> = None;
                        egui::ComboBox::from_id_source("substrate_preset")
                            .selected_text(selected)
                            .show_ui(ui, |ui| {
                                if ui
                                    .selectable_label(
                                        self.substrate_preset.is_none(),
                                        self.txt("gui.substrate_custom", "(custom)"),
                                    )
                                    .clicked()
                                {
                                    self.substrate_preset = None;
                                }
                                for s in substrate_db::substrates() {
                                    if ui
                                        .selectable_label(
                                            self.substrate_preset == Some(s.code),
                                            s.name,
                                        )
                                        .on_hover_text(s.notes)
                                        .clicked()
                                    {
                                        chosen = Some(s.code);
                                    }
                                }
                            });
                        if let Some(code) = chosen {
                            self.substrate_preset = Some(code);
                            self.apply_substrate_preset(code);
                        }
                        ui.end_row();

                        ui.label(self.txt("gui.substrate_name", "Substrate name/type"));
                        ui.text_edit_singleline(&mut self.substrate_name);
                        ui.end_row();

                        ui.label(self.txt("gui.substrate_flow", "Substrate flow (per day)"));
                        ui.add(egui::DragValue::new(&mut self.substrate_flow).speed(100.0).clamp_range(0.0..=f64::MAX));
                        egui::ComboBox::from_id_source("flow_unit")
                            .selected_text(self.flow_unit.symbol())
                            .show_ui(ui, |ui| {
                                for u in [MassUnit::Kilogram, MassUnit::Ton, MassUnit::Pound] {
                                    ui.selectable_value(&mut self.flow_unit, u, u.symbol());
                                }
                            });
                        ui.end_row();

                        ui.label(self.txt("gui.substrate_ts", "Total solids TS [%]"));
                        ui.add(egui::DragValue::new(&mut self.total_solids_pct).speed(0.1).clamp_range(0.0..=100.0));
                        ui.end_row();

                        ui.label(self.txt("gui.substrate_vs", "VS as % of TS [%]"));
                        ui.add(egui::DragValue::new(&mut self.vs_of_ts_pct).speed(0.1).clamp_range(0.0..=100.0));
                        ui.end_row();

                        ui.label(self.txt("gui.substrate_bmp", "BMP [Nm³ CH₄/kg VS]"));
                        ui.add(egui::DragValue::new(&mut self.bmp_value).speed(0.01).clamp_range(0.0..=f64::MAX));
                        ui.end_row();

                        ui.label(self.txt("gui.substrate_inlet_temp", "Inlet temperature"));
                        ui.add(egui::DragValue::new(&mut self.inlet_temp).speed(0.5));
                        egui::ComboBox::from_id_source("temp_unit")
                            .selected_text(self.temp_unit.symbol())
                            .show_ui(ui, |ui| {
                                for u in [
                                    TemperatureUnit::Celsius,
                                    TemperatureUnit::Kelvin,
                                    TemperatureUnit::Fahrenheit,
                                ] {
                                    ui.selectable_value(&mut self.temp_unit, u, u.symbol());
                                }
                            });
                        ui.end_row();
                    });
            });

        egui::CollapsingHeader::new(self.txt("gui.section_use", "3. Biogas utilization"))
            .default_open(true)
            .show(ui, |ui| {
                egui::Grid::new("use_grid")
                    .num_columns(2)
                    .spacing([8.0, 6.0])
                    .show(ui, |ui| {
                        ui.label(self.txt("gui.use_mode", "Main biogas use"));
                        egui::ComboBox::from_id_source("biogas_use")
                            .selected_text(self.biogas_use_label(self.biogas_use))
                            .show_ui(ui, |ui| {
                                for mode in [BiogasUse::Chp, BiogasUse::Boiler, BiogasUse::Upgrading]
                                {
                                    let label = self.biogas_use_label(mode);
                                    ui.selectable_value(&mut self.biogas_use, mode, label);
                                }
                            });
                        ui.end_row();

                        match self.biogas_use {
                            BiogasUse::Chp => {
                                ui.label(self.txt("gui.use_chp_elec", "CHP electrical efficiency [%]"));
                                ui.add(egui::DragValue::new(&mut self.chp_elec_eff_pct).speed(0.1).clamp_range(0.0..=100.0));
                                ui.end_row();
                                ui.label(self.txt("gui.use_chp_therm", "CHP thermal efficiency [%]"));
                                ui.add(egui::DragValue::new(&mut self.chp_therm_eff_pct).speed(0.1).clamp_range(0.0..=100.0));
                                ui.end_row();
                            }
                            BiogasUse::Boiler => {
                                ui.label(self.txt("gui.use_boiler_eff", "Boiler efficiency [%]"));
                                ui.add(egui::DragValue::new(&mut self.boiler_eff_pct).speed(0.1).clamp_range(0.0..=100.0));
                                ui.end_row();
                            }
                            BiogasUse::Upgrading => {}
                        }
                    });
            });
    }

    fn input_form_right(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new(self.txt("gui.section_process", "2. Digestion process design"))
            .default_open(true)
            .show(ui, |ui| {
                egui::Grid::new("process_grid")
                    .num_columns(3)
                    .spacing([8.0, 6.0])
                    .show(ui, |ui| {
                        ui.label(self.txt("gui.process_range", "Temperature range"));
                        let meso_label = self.txt("gui.process_range_meso", "Mesophilic (~38 °C)");
                        let thermo_label =
                            self.txt("gui.process_range_thermo", "Thermophilic (~52 °C)");
                        let custom_label = self.txt("gui.process_range_custom", "Custom");
                        ui.horizontal(|ui| {
                            ui.selectable_value(
                                &mut self.range_choice,
                                RangeChoice::Mesophilic,
                                meso_label,
                            );
                            ui.selectable_value(
                                &mut self.range_choice,
                                RangeChoice::Thermophilic,
                                thermo_label,
                            );
                            ui.selectable_value(
                                &mut self.range_choice,
                                RangeChoice::Custom,
                                custom_label,
                            );
                        });
                        ui.end_row();

                        if self.range_choice == RangeChoice::Custom {
                            ui.label(self.txt("gui.process_temp", "Operating temperature [°C]"));
                            ui.add(
                                egui::DragValue::new(&mut self.custom_digester_temp_c).speed(0.5),
                            );
                            ui.end_row();
                        }

                        ui.label(self.txt("gui.process_eff", "Digestion efficiency [%]"));
                        ui.add(egui::DragValue::new(&mut self.digestion_eff_pct).speed(0.5).clamp_range(0.0..=100.0));
                        ui.end_row();

                        ui.label(self.txt("gui.process_hrt", "Retention time HRT [days]"));
                        ui.add(egui::DragValue::new(&mut self.retention_days).speed(1.0).clamp_range(1.0..=f64::MAX));
                        ui.end_row();

                        ui.label(self.txt("gui.process_ch4", "CH₄ content [%]"));
                        ui.add(egui::DragValue::new(&mut self.ch4_content_pct).speed(0.1).clamp_range(0.0..=100.0));
                        ui.end_row();

                        ui.label(self.txt("gui.process_ambient", "Ambient temperature"));
                        ui.add(egui::DragValue::new(&mut self.ambient_temp).speed(0.5));
                        ui.label(self.temp_unit.symbol());
                        ui.end_row();

                        ui.label(self.txt("gui.process_u", "Overall U [W/m²K]"))
                            .on_hover_text(self.txt("gui.process_u_tip", "Insulated: 0.3-0.8, bare: 1.5-3.0"));
                        ui.add(egui::DragValue::new(&mut self.u_value).speed(0.01).clamp_range(0.0..=f64::MAX));
                        ui.end_row();

                        ui.label(self.txt("gui.process_density", "Substrate density [kg/m³]"));
                        ui.add(egui::DragValue::new(&mut self.substrate_density).speed(10.0).clamp_range(1.0..=f64::MAX));
                        ui.end_row();
                    });
            });

        egui::CollapsingHeader::new(self.txt("gui.section_aux", "4. Auxiliary consumption"))
            .default_open(true)
            .show(ui, |ui| {
                egui::Grid::new("aux_grid")
                    .num_columns(2)
                    .spacing([8.0, 6.0])
                    .show(ui, |ui| {
                        ui.label(self.txt("gui.aux_consumption", "Auxiliary electricity [kWh/ton]"));
                        ui.add(egui::DragValue::new(&mut self.aux_kwh_per_ton).speed(1.0).clamp_range(0.0..=f64::MAX));
                        ui.end_row();
                    });
            });
    }

    fn biogas_use_label(&self, mode: BiogasUse) -> String {
        match mode {
            BiogasUse::Chp => self.txt("gui.use_chp", "CHP cogeneration"),
            BiogasUse::Boiler => self.txt("gui.use_boiler", "Boiler"),
            BiogasUse::Upgrading => self.txt("gui.use_upgrading", "Upgrading to biomethane"),
        }
    }

    fn results_panel(&mut self, ui: &mut egui::Ui) {
        let (Some(geom), Some(result), Some(input)) =
            (self.geometry, self.balance.clone(), self.last_input.clone())
        else {
            return;
        };
        let tr = self.tr.clone();

        ui.separator();
        ui.columns(3, |cols| {
            cols[0].group(|ui| {
                ui.strong(tr.t(keys::RESULT_GEOMETRY_HEADING));
                ui.label(format!("{}: {:.2} m³", tr.t(keys::RESULT_VOLUME), geom.volume_m3));
                ui.label(format!("{}: {:.2} m", tr.t(keys::RESULT_DIAMETER), geom.diameter_m));
                ui.label(format!(
                    "{}: {:.2} m²",
                    tr.t(keys::RESULT_SURFACE_AREA),
                    geom.surface_area_m2
                ));
            });
            cols[1].group(|ui| {
                ui.strong(tr.t(keys::RESULT_PRODUCTION_HEADING));
                ui.label(format!(
                    "{}: {:.2} kg/d",
                    tr.t(keys::RESULT_VS_FEED),
                    result.vs_feed_kg_per_day
                ));
                ui.label(format!(
                    "{}: {:.2} Nm³/d",
                    tr.t(keys::RESULT_CH4_PRODUCED),
                    result.ch4_produced_nm3_per_day
                ));
                ui.label(format!(
                    "{}: {:.2} Nm³/d",
                    tr.t(keys::RESULT_BIOGAS_PRODUCED),
                    result.biogas_produced_nm3_per_day
                ));
                ui.label(format!(
                    "{}: {:.2} MJ/Nm³",
                    tr.t(keys::RESULT_BIOGAS_LHV),
                    result.biogas_lhv_mj_per_nm3
                ));
                ui.label(format!(
                    "{}: {}",
                    tr.t(keys::RESULT_GROSS_ENERGY),
                    self.fmt_energy(result.gross_energy_mj_per_day)
                ));
            });
            cols[2].group(|ui| {
                ui.strong(tr.t(keys::RESULT_THERMAL_HEADING));
                ui.label(format!(
                    "{}: {}",
                    tr.t(keys::RESULT_SENSIBLE_HEAT),
                    self.fmt_energy(result.sensible_heat_mj_per_day)
                ));
                ui.label(format!(
                    "{}: {}",
                    tr.t(keys::RESULT_SHELL_LOSS),
                    self.fmt_energy(result.shell_loss_mj_per_day)
                ));
                ui.label(format!(
                    "{}: {}",
                    tr.t(keys::RESULT_THERMAL_DEMAND),
                    self.fmt_energy(result.thermal_demand_mj_per_day)
                ));
            });
        });

        ui.add_space(6.0);
        ui.columns(2, |cols| {
            cols[0].group(|ui| {
                ui.strong(tr.t(keys::RESULT_POWER_HEADING));
                if input.biogas_use == BiogasUse::Upgrading {
                    ui.label(tr.t(keys::NOTE_UPGRADING));
                } else {
                    ui.label(format!(
                        "{}: {:.2} kWh/d",
                        tr.t(keys::RESULT_ELEC_GROSS),
                        result.electricity_gross_kwh_per_day
                    ));
                    ui.label(format!(
                        "{}: {}",
                        tr.t(keys::RESULT_USEFUL_HEAT),
                        self.fmt_energy(result.useful_heat_mj_per_day)
                    ));
                }
                ui.label(format!(
                    "{}: {:.2} kWh/d",
                    tr.t(keys::RESULT_AUX_CONSUMPTION),
                    result.aux_consumption_kwh_per_day
                ));
            });
            cols[1].group(|ui| {
                ui.strong(tr.t(keys::RESULT_NET_HEADING));
                let elec = format!(
                    "{}: {:.2} kWh/d",
                    tr.t(keys::RESULT_NET_ELECTRICITY),
                    result.net_electricity_kwh_per_day
                );
                if result.net_electricity_kwh_per_day < 0.0 {
                    ui.label(egui::RichText::new(elec).color(egui::Color32::RED));
                    ui.label(
                        egui::RichText::new(tr.t(keys::WARN_ELEC_DEFICIT))
                            .color(egui::Color32::RED),
                    );
                } else {
                    ui.label(elec);
                }
                let heat = format!(
                    "{}: {}",
                    tr.t(keys::RESULT_NET_HEAT),
                    self.fmt_energy(result.net_heat_mj_per_day)
                );
                if result.net_heat_mj_per_day < 0.0 {
                    ui.label(egui::RichText::new(heat).color(egui::Color32::RED));
                    ui.label(
                        egui::RichText::new(tr.t(keys::WARN_HEAT_DEFICIT))
                            .color(egui::Color32::RED),
                    );
                } else {
                    ui.label(heat);
                    if result.net_heat_mj_per_day > 0.0 {
                        ui.small(tr.t(keys::NOTE_HEAT_SURPLUS));
                    }
                }
            });
        });

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.strong(self.txt("gui.export_heading", "Export"));
            if ui.button(self.txt("gui.export_csv", "Export CSV")).clicked() {
                self.export_csv();
            }
            if ui.button(self.txt("gui.export_report", "Export report")).clicked() {
                self.export_report();
            }
            if ui.button(self.txt("gui.export_project", "Save project")).clicked() {
                self.export_project();
            }
        });
        if let Some(status) = &self.export_status {
            ui.small(status.clone());
        }
    }

    fn settings_window(&mut self, ctx: &egui::Context) {
        let title = self.txt("gui.settings_title", "Settings");
        let mut open = self.show_settings;
        egui::Window::new(title).open(&mut open).show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(self.txt("gui.settings_language", "Language"));
                let mut lang = self.config.language.clone();
                egui::ComboBox::from_id_source("lang_combo")
                    .selected_text(lang.clone())
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut lang, "ko-kr".to_string(), "한국어");
                        ui.selectable_value(&mut lang, "en-us".to_string(), "English");
                    });
                if lang != self.config.language {
                    self.config.language = lang;
                    self.tr = i18n::Translator::new_with_pack(&self.config.language, None);
                }
            });
            ui.horizontal(|ui| {
                ui.label(self.txt("gui.settings_energy_unit", "Energy display unit"));
                egui::ComboBox::from_id_source("energy_unit_combo")
                    .selected_text(self.config.default_units.energy.symbol())
                    .show_ui(ui, |ui| {
                        for u in [
                            EnergyUnit::MegaJoule,
                            EnergyUnit::KilowattHour,
                            EnergyUnit::KiloCalorie,
                        ] {
                            ui.selectable_value(&mut self.config.default_units.energy, u, u.symbol());
                        }
                    });
            });
            ui.horizontal(|ui| {
                ui.label(self.txt("gui.settings_font_scale", "UI scale"));
                ui.add(egui::Slider::new(&mut self.ui_scale, 0.8..=1.6));
            });
            ui.horizontal(|ui| {
                if ui.button(self.txt("gui.settings_save", "Save settings")).clicked() {
                    if let Err(e) = self.config.save() {
                        eprintln!("{e}");
                    }
                }
                if ui.button(self.txt("gui.settings_close", "Close")).clicked() {
                    self.show_settings = false;
                }
            });
        });
        if !open {
            self.show_settings = false;
        }
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        ctx.set_pixels_per_point(self.ui_scale);

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Biogas Balance Toolbox");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button(self.txt("gui.settings_title", "Settings")).clicked() {
                        self.show_settings = !self.show_settings;
                    }
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                egui::Grid::new("project_grid")
                    .num_columns(4)
                    .spacing([8.0, 6.0])
                    .show(ui, |ui| {
                        ui.label(self.txt("gui.project_name", "Project name"));
                        ui.text_edit_singleline(&mut self.project_name);
                        ui.label(self.txt("gui.project_analyst", "Analyst"));
                        ui.text_edit_singleline(&mut self.analyst_name);
                        ui.end_row();
                    });
                ui.separator();

                ui.columns(2, |cols| {
                    cols[0].vertical(|ui| {
                        self.input_form_left(ui);
                    });
                    cols[1].vertical(|ui| {
                        self.input_form_right(ui);
                    });
                });

                ui.add_space(8.0);
                let run_label = self.txt("gui.run", "COMPUTE ENERGY BALANCE");
                if ui
                    .add_sized([ui.available_width(), 32.0], egui::Button::new(run_label))
                    .clicked()
                {
                    self.compute();
                }
                if let Some(err) = &self.input_error {
                    ui.label(egui::RichText::new(err.clone()).color(egui::Color32::RED));
                }

                if self.show_results {
                    self.results_panel(ui);
                } else {
                    ui.add_space(8.0);
                    ui.small(self.txt(
                        "gui.results_pending",
                        "Set parameters and press COMPUTE ENERGY BALANCE.",
                    ));
                }
            });
        });

        if self.show_settings {
            self.settings_window(ctx);
        }
    }
}
