use clap::{Parser, ValueEnum};

use crate::policy::{SHUTDOWN_TAG_KEY, SHUTDOWN_TAG_VALUE, ShutdownPolicy};

/// Environment variable the Lambda service sets inside every function sandbox
pub const LAMBDA_RUNTIME_API_ENV: &str = "AWS_LAMBDA_RUNTIME_API";

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Run a single sweep and exit
    Job,
    /// Serve the Lambda runtime API, one sweep per event
    Lambda,
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "rds-sleeper",
    version,
    about = "Stop tagged RDS instances on a schedule to save cost during idle hours"
)]
pub struct Config {
    /// Run mode. Switches to lambda automatically inside a Lambda sandbox
    #[arg(long, env = "RUN_MODE", value_enum, default_value = "job")]
    pub mode: RunMode,

    /// AWS region
    #[arg(long, env = "AWS_REGION")]
    pub region: Option<String>,

    /// Tag key that opts an instance into automatic shutdown
    #[arg(long, env = "SHUTDOWN_TAG_KEY", default_value = SHUTDOWN_TAG_KEY)]
    pub tag_key: String,

    /// Tag value that must accompany the shutdown tag key
    #[arg(long, env = "SHUTDOWN_TAG_VALUE", default_value = SHUTDOWN_TAG_VALUE)]
    pub tag_value: String,

    /// Dry run mode (no actual stop)
    #[arg(long, env = "DRY_RUN", default_value = "false")]
    pub dry_run: bool,

    /// Log format: json or pretty
    #[arg(long, env = "LOG_FORMAT", default_value = "json")]
    pub log_format: String,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Config {
    pub fn from_args() -> Self {
        Self::parse()
    }

    pub fn policy(&self) -> ShutdownPolicy {
        ShutdownPolicy::new(&self.tag_key, &self.tag_value)
    }

    /// Resolve the run mode, preferring lambda when the runtime API is reachable
    pub fn effective_mode(&self) -> RunMode {
        resolve_mode(self.mode, std::env::var(LAMBDA_RUNTIME_API_ENV).ok().as_deref())
    }

    pub fn display(&self, actual_region: &str) {
        let region_info = if let Some(region) = &self.region {
            region.clone()
        } else {
            format!("auto-detect ({})", actual_region)
        };

        tracing::info!(
            mode = ?self.effective_mode(),
            region = %region_info,
            tag_key = %self.tag_key,
            tag_value = %self.tag_value,
            dry_run = self.dry_run,
            log_format = %self.log_format,
            log_level = %self.log_level,
            "Configuration initialized"
        );

        if self.dry_run {
            tracing::warn!("DRY RUN MODE ENABLED - No instances will be stopped, only logged");
        }
    }
}

fn resolve_mode(requested: RunMode, lambda_runtime_api: Option<&str>) -> RunMode {
    match lambda_runtime_api {
        Some(api) if !api.is_empty() => RunMode::Lambda,
        _ => requested,
    }
}
