mod client;
mod instances;
#[cfg(test)]
mod replay;

use async_trait::async_trait;

use crate::error::SweepError;
use crate::types::DbInstanceDescriptor;

pub use client::RdsClient;

/// The two RDS operations a sweep needs.
#[async_trait]
pub trait DbInstanceProvider: Send + Sync {
    /// Every DB instance visible to the caller, across all result pages
    async fn list_instances(&self) -> Result<Vec<DbInstanceDescriptor>, SweepError>;

    /// Request a stop and return once the request is accepted
    async fn stop_instance(&self, identifier: &str) -> Result<(), SweepError>;
}
