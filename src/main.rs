use clap::Parser;
use matrix_csv::utils::{logger, validation::Validate};
use matrix_csv::{CliConfig, FilePipeline, JobOutput, LocalStorage, MatrixJob};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting matrix-csv CLI");
    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    let storage = LocalStorage::new(".");
    let pipeline = FilePipeline::new(storage, config);
    let job = MatrixJob::new(pipeline);

    match job.run().await {
        Ok(JobOutput::Returned(output)) => {
            print!("{}", output);
        }
        Ok(JobOutput::Written { path, .. }) => {
            eprintln!("✅ Output saved to: {}", path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Matrix job failed: {} (Category: {:?})",
                e,
                e.category()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            // 驗證錯誤的文字與伺服器回應一致
            eprintln!("{}", e.response_body().trim_end());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}
