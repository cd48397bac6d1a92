use anyhow::Result;
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_rds::Client;
use aws_sdk_rds::error::DisplayErrorContext;
use tracing::{debug, info};

use super::DbInstanceProvider;
use crate::error::SweepError;
use crate::types::DbInstanceDescriptor;

pub struct RdsClient {
    pub(super) client: Client,
    pub(super) region: String,
}

impl RdsClient {
    /// Creates a new RDS client with AWS SDK configuration
    ///
    /// Region resolution priority:
    /// 1. Explicit region from Config (--region CLI arg or AWS_REGION env var)
    /// 2. AWS SDK defaults (environment variables, ~/.aws/config, IMDS)
    pub async fn new(region: Option<&str>) -> Result<Self> {
        info!("Initializing AWS SDK configuration");

        let config = Self::load_aws_config(region).await;
        let region_name = Self::extract_region_name(&config);
        let client = Client::new(&config);

        info!(
            region = %region_name,
            "AWS RDS client initialized successfully"
        );

        Ok(Self {
            client,
            region: region_name,
        })
    }

    async fn load_aws_config(region: Option<&str>) -> aws_config::SdkConfig {
        match region {
            Some(r) => {
                info!(region = %r, "Using explicit AWS region from configuration");
                aws_config::defaults(BehaviorVersion::latest())
                    .region(aws_config::Region::new(r.to_string()))
                    .load()
                    .await
            }
            None => {
                debug!("Using default AWS region from AWS SDK (environment/credentials file/IMDS)");
                aws_config::load_defaults(BehaviorVersion::latest()).await
            }
        }
    }

    fn extract_region_name(config: &aws_config::SdkConfig) -> String {
        config
            .region()
            .map(|r| r.as_ref())
            .unwrap_or("unknown")
            .to_string()
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    #[cfg(test)]
    pub(super) fn from_parts(client: Client, region: &str) -> Self {
        Self {
            client,
            region: region.to_string(),
        }
    }
}

#[async_trait]
impl DbInstanceProvider for RdsClient {
    async fn list_instances(&self) -> Result<Vec<DbInstanceDescriptor>, SweepError> {
        self.describe_all_instances().await
    }

    async fn stop_instance(&self, identifier: &str) -> Result<(), SweepError> {
        info!(
            db_instance_identifier = %identifier,
            region = %self.region,
            api_action = "StopDBInstance",
            "Sending stop request to AWS RDS API"
        );

        let response = self
            .client
            .stop_db_instance()
            .db_instance_identifier(identifier)
            .send()
            .await
            .map_err(|e| SweepError::command(identifier, DisplayErrorContext(&e)))?;

        debug!(
            db_instance_identifier = %identifier,
            reported_status = response
                .db_instance()
                .and_then(|i| i.db_instance_status())
                .unwrap_or("unknown"),
            "Stop request accepted"
        );

        Ok(())
    }
}
