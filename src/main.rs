use clap::Parser;
use hr_dashboard::app::server;
use hr_dashboard::utils::error::ErrorSeverity;
use hr_dashboard::utils::logger;
use hr_dashboard::{config, CliConfig};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 載入並驗證配置
    let loaded = match config::load(cli) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("❌ {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    logger::init_logger(
        loaded.verbose,
        loaded.provider.json_logs(),
        loaded.provider.log_level(),
    );
    tracing::info!("Starting hr-dashboard mock API");
    tracing::debug!("Bind address: {}", loaded.provider.bind_address());

    if let Err(e) = server::run(loaded.provider.as_ref()).await {
        tracing::error!("❌ Server failed: {} (Severity: {:?})", e, e.severity());
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e);

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }
}
