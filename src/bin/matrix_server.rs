use clap::Parser;
use matrix_csv::utils::{logger, validation::Validate};
use matrix_csv::TomlConfig;

#[derive(Parser)]
#[command(name = "matrix-server")]
#[command(about = "HTTP server that evaluates uploaded matrix files")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Override the listen host from config
    #[arg(long)]
    host: Option<String>,

    /// Override the listen port from config
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 載入 TOML 配置，未指定時使用預設值
    let mut config = match &args.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(e.exit_code());
            }
        },
        None => TomlConfig::default(),
    };

    // 應用命令列覆蓋設定
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if args.verbose {
        config.logging.level = "debug".to_string();
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    logger::init_server_logger(&config.logging.level, config.json_logs());
    tracing::info!("✅ Configuration loaded and validated successfully");
    tracing::debug!("Server config: {:?}", config);

    matrix_csv::server::run(config).await?;

    tracing::info!("Server stopped");
    Ok(())
}
