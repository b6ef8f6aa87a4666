use crate::config::Config;
use crate::digester::validation::InputError;
use crate::export::ExportError;
use crate::i18n::{self, Translator};
use crate::ui_cli;
use crate::ui_cli::MenuChoice;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum AppError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// 설정 저장/로드 오류
    Config(crate::config::ConfigError),
    /// 입력 범위 검증 오류
    Input(InputError),
    /// 결과 내보내기 오류
    Export(ExportError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io(e) => write!(f, "입출력 오류: {e}"),
            AppError::Config(e) => write!(f, "설정 오류: {e}"),
            AppError::Input(e) => write!(f, "입력 오류: {e}"),
            AppError::Export(e) => write!(f, "내보내기 오류: {e}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        AppError::Io(value)
    }
}

impl From<crate::config::ConfigError> for AppError {
    fn from(value: crate::config::ConfigError) -> Self {
        AppError::Config(value)
    }
}

impl From<InputError> for AppError {
    fn from(value: InputError) -> Self {
        AppError::Input(value)
    }
}

impl From<ExportError> for AppError {
    fn from(value: ExportError) -> Self {
        AppError::Export(value)
    }
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
/// 검증 실패는 메뉴를 끝내지 않고 메시지만 출력한 뒤 계속한다.
pub fn run(config: &mut Config, tr: &Translator) -> Result<(), AppError> {
    loop {
        match ui_cli::main_menu(tr)? {
            MenuChoice::Balance => match ui_cli::handle_balance(tr, config) {
                Ok(()) => {}
                Err(AppError::Input(e)) => println!("{}: {e}", tr.t(i18n::keys::ERROR_PREFIX)),
                Err(e) => return Err(e),
            },
            MenuChoice::Sizing => match ui_cli::handle_sizing(tr, config) {
                Ok(()) => {}
                Err(AppError::Input(e)) => println!("{}: {e}", tr.t(i18n::keys::ERROR_PREFIX)),
                Err(e) => return Err(e),
            },
            MenuChoice::Substrates => ui_cli::handle_substrates(tr)?,
            MenuChoice::Settings => {
                ui_cli::handle_settings(tr, config)?;
                config.save()?;
            }
            MenuChoice::Exit => {
                config.save()?;
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}
