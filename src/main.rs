use clap::Parser;
use sounding_toolbox::{app, config, ui_cli::Cli};
use tracing_subscriber::{fmt, EnvFilter};

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 명령을 실행한다.
fn main() {
    let cli = Cli::parse();
    if let Err(err) = try_run(cli) {
        eprintln!("오류: {err}");
        std::process::exit(1);
    }
}

fn try_run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::load_or_default(&cli.config)?;
    let level = cli.log_level.as_deref().unwrap_or(cfg.log_level.as_str());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    fmt().with_env_filter(filter).with_target(false).init();

    app::run(&cfg, cli.command)?;
    Ok(())
}
