use aws_sdk_rds::error::DisplayErrorContext;
use aws_sdk_rds::types::{DbInstance, Tag};
use std::collections::HashMap;
use std::future::Future;
use tracing::{debug, info, warn};

use super::RdsClient;
use crate::error::SweepError;
use crate::types::DbInstanceDescriptor;

// DescribeDBInstances accepts 20..=100
const PAGE_SIZE: i32 = 100;

impl RdsClient {
    pub(super) async fn describe_all_instances(
        &self,
    ) -> Result<Vec<DbInstanceDescriptor>, SweepError> {
        let start_time = std::time::Instant::now();

        let instances = collect_pages(|marker| self.describe_page(marker)).await?;

        info!(
            region = %self.region,
            total_instances = instances.len(),
            response_time_ms = start_time.elapsed().as_millis(),
            "Fetched DB instance inventory"
        );

        Ok(instances)
    }

    async fn describe_page(
        &self,
        marker: Option<String>,
    ) -> Result<(Vec<DbInstanceDescriptor>, Option<String>), SweepError> {
        debug!(
            marker = ?marker,
            max_records = PAGE_SIZE,
            "Sending DescribeDBInstances API request"
        );

        let response = self
            .client
            .describe_db_instances()
            .max_records(PAGE_SIZE)
            .set_marker(marker)
            .send()
            .await
            .map_err(|e| SweepError::query(DisplayErrorContext(&e)))?;

        let descriptors = response
            .db_instances()
            .iter()
            .filter_map(descriptor_from_sdk)
            .collect();

        Ok((descriptors, response.marker().map(str::to_string)))
    }
}

/// Drain a marker-paginated listing. `fetch` receives the marker of the page
/// to load (`None` for the first) and returns its items plus the next marker.
pub(super) async fn collect_pages<T, E, F, Fut>(mut fetch: F) -> Result<Vec<T>, E>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<(Vec<T>, Option<String>), E>>,
{
    let mut items = Vec::new();
    let mut marker: Option<String> = None;
    let mut page_count = 0;

    loop {
        let (page, next_marker) = fetch(marker).await?;
        page_count += 1;
        items.extend(page);

        debug!(
            page_number = page_count,
            total_listed = items.len(),
            "Retrieved DB instance page"
        );

        match next_marker {
            Some(next) if !next.is_empty() => {
                debug!("More DB instances available, continuing pagination");
                marker = Some(next);
            }
            _ => break,
        }
    }

    Ok(items)
}

fn descriptor_from_sdk(instance: &DbInstance) -> Option<DbInstanceDescriptor> {
    let Some(identifier) = instance.db_instance_identifier() else {
        warn!(
            db_instance_arn = instance.db_instance_arn().unwrap_or("unknown"),
            "Skipping DB instance without identifier"
        );
        return None;
    };

    Some(DbInstanceDescriptor {
        identifier: identifier.to_string(),
        status: instance.db_instance_status().unwrap_or("unknown").to_string(),
        tags: tag_map(instance.tag_list()),
        engine: instance.engine().map(str::to_string),
        instance_class: instance.db_instance_class().map(str::to_string),
    })
}

fn tag_map(tags: &[Tag]) -> HashMap<String, String> {
    tags.iter()
        .filter_map(|tag| {
            tag.key()
                .map(|key| (key.to_string(), tag.value().unwrap_or_default().to_string()))
        })
        .collect()
}
