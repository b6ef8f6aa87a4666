use clap::Parser;

use biogas_balance_toolbox::{app, config, i18n};

/// 혐기성 소화 바이오가스 플랜트 예비 에너지 밸런스 CLI.
#[derive(Parser)]
#[command(name = "biogas_balance_toolbox_cli", version)]
struct Cli {
    /// 언어 코드 (auto/ko/ko-kr/en/en-us)
    #[arg(long, short = 'L', default_value = "auto")]
    lang: String,
    /// 언어팩 디렉터리 (기본: locales/)
    #[arg(long)]
    lang_pack: Option<String>,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() {
    if let Err(err) = try_run() {
        eprintln!("오류: {err}");
    }
}

fn try_run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut cfg = config::load_or_default()?;
    let lang = i18n::resolve_language(&cli.lang, Some(cfg.language.as_str()));
    let tr = i18n::Translator::new_with_pack(&lang, cli.lang_pack.as_deref());
    app::run(&mut cfg, &tr)?;
    Ok(())
}
