use std::time::Instant;
use tracing::{Instrument, debug, error, info, info_span, warn};

use crate::config::Config;
use crate::error::SweepError;
use crate::policy::ShutdownPolicy;
use crate::rds::DbInstanceProvider;
use crate::types::{DbInstanceDescriptor, SweepReport};

#[derive(Debug, Clone, Default)]
pub struct SweeperConfig {
    pub policy: ShutdownPolicy,
    pub dry_run: bool,
    /// Region the provider talks to, reported in logs and the sweep report
    pub region: String,
}

impl SweeperConfig {
    pub fn new(config: &Config, region: &str) -> Self {
        Self {
            policy: config.policy(),
            dry_run: config.dry_run,
            region: region.to_string(),
        }
    }
}

/// Lists DB instances, picks the ones opted into shutdown and stops them.
///
/// Instances are handled one at a time in listing order. The first failed
/// stop request aborts the sweep; instances already stopped stay stopped and
/// the remaining ones are left untouched.
pub struct Sweeper<P> {
    provider: P,
    config: SweeperConfig,
}

impl<P: DbInstanceProvider> Sweeper<P> {
    pub fn new(provider: P, config: SweeperConfig) -> Self {
        Self { provider, config }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub async fn run(&self) -> Result<SweepReport, SweepError> {
        let span = info_span!(
            "rds_sweep",
            region = %self.config.region,
            dry_run = self.config.dry_run
        );
        self.list_eligible_and_stop().instrument(span).await
    }

    async fn list_eligible_and_stop(&self) -> Result<SweepReport, SweepError> {
        let start_time = Instant::now();

        debug!("Querying AWS RDS DescribeDBInstances API");
        let instances = self.provider.list_instances().await.inspect_err(|e| {
            error!(error = %e, "Failed to list DB instances, aborting sweep");
        })?;

        let eligible = self.select_eligible(&instances);

        info!(
            region = %self.config.region,
            total_scanned = instances.len(),
            eligible_count = eligible.len(),
            skipped_count = instances.len().saturating_sub(eligible.len()),
            tag_key = %self.config.policy.tag_key(),
            tag_value = %self.config.policy.tag_value(),
            "Completed DB instance scan"
        );

        let mut report = SweepReport {
            region: self.config.region.clone(),
            dry_run: self.config.dry_run,
            total_scanned: instances.len(),
            eligible: eligible.iter().map(|i| i.identifier.clone()).collect(),
            ..Default::default()
        };

        if eligible.is_empty() {
            info!(
                total_scanned = instances.len(),
                "No DB instances eligible for shutdown, no stop action required"
            );
        }

        for instance in eligible {
            if self.stop(instance).await? {
                report.stopped.push(instance.identifier.clone());
            }
        }

        report.duration_seconds = start_time.elapsed().as_secs_f64();

        info!(
            total_scanned = report.total_scanned,
            eligible_count = report.eligible.len(),
            stopped_count = report.stopped.len(),
            duration_seconds = format!("{:.2}", report.duration_seconds),
            "Shutdown sweep completed"
        );

        Ok(report)
    }

    fn select_eligible<'a>(
        &self,
        instances: &'a [DbInstanceDescriptor],
    ) -> Vec<&'a DbInstanceDescriptor> {
        instances
            .iter()
            .filter(|instance| {
                let eligible = self.config.policy.is_eligible(instance);
                debug!(
                    db_instance_identifier = %instance.identifier,
                    status = %instance.status,
                    engine = instance.engine.as_deref().unwrap_or("N/A"),
                    eligible,
                    "Evaluated DB instance"
                );
                eligible
            })
            .collect()
    }

    /// Returns whether a stop request was actually sent
    async fn stop(&self, instance: &DbInstanceDescriptor) -> Result<bool, SweepError> {
        if self.config.dry_run {
            warn!(
                db_instance_identifier = %instance.identifier,
                engine = instance.engine.as_deref().unwrap_or("N/A"),
                instance_class = instance.instance_class.as_deref().unwrap_or("N/A"),
                action = "stop",
                "DRY RUN: Would stop DB instance (no action taken)"
            );
            return Ok(false);
        }

        info!(
            db_instance_identifier = %instance.identifier,
            engine = instance.engine.as_deref().unwrap_or("N/A"),
            instance_class = instance.instance_class.as_deref().unwrap_or("N/A"),
            action = "stop",
            "Putting DB instance to sleep"
        );

        match self.provider.stop_instance(&instance.identifier).await {
            Ok(()) => {
                info!(
                    db_instance_identifier = %instance.identifier,
                    action = "stop",
                    result = "success",
                    "Successfully initiated DB instance stop"
                );
                Ok(true)
            }
            Err(e) => {
                error!(
                    db_instance_identifier = %instance.identifier,
                    error = %e,
                    action = "stop",
                    result = "failed",
                    "Failed to stop DB instance, aborting sweep"
                );
                Err(e)
            }
        }
    }
}
