use anyhow::Result;
use std::time::Instant;
use tracing::{error, info};

use rds_sleeper::config::{Config, RunMode};
use rds_sleeper::lambda;
use rds_sleeper::logging;
use rds_sleeper::rds::RdsClient;
use rds_sleeper::sweeper::{Sweeper, SweeperConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_args();
    logging::init(&config.log_format, &config.log_level);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        commit = env!("GIT_COMMIT"),
        build_date = env!("BUILD_DATE"),
        "RDS Sleeper starting"
    );

    let client = match RdsClient::new(config.region.as_deref()).await {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "Failed to initialize RDS client");
            return Err(e);
        }
    };

    config.display(client.region());

    let sweeper_config = SweeperConfig::new(&config, client.region());
    let sweeper = Sweeper::new(client, sweeper_config);

    match config.effective_mode() {
        RunMode::Job => run_job(&sweeper).await,
        RunMode::Lambda => {
            info!("Serving Lambda runtime API");
            lambda::serve(sweeper).await.map_err(|e| anyhow::anyhow!(e))
        }
    }
}

async fn run_job(sweeper: &Sweeper<RdsClient>) -> Result<()> {
    let start_time = Instant::now();

    match sweeper.run().await {
        Ok(report) => {
            info!(
                status = "success",
                stopped_count = report.stopped.len(),
                total_execution_seconds = start_time.elapsed().as_secs_f64(),
                "Sweep execution completed successfully"
            );
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        Err(e) => {
            error!(
                status = "failed",
                error = %e,
                total_execution_seconds = start_time.elapsed().as_secs_f64(),
                "Sweep execution failed"
            );
            Err(e.into())
        }
    }
}
