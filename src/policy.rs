//! Shutdown eligibility rules.
//!
//! An instance is put to sleep only when it carries the sentinel tag with the
//! affirmative value and is currently `available`. Both comparisons are exact
//! and case-sensitive.

use crate::types::DbInstanceDescriptor;

pub const SHUTDOWN_TAG_KEY: &str = "PUT_ME_TO_SLEEP";
pub const SHUTDOWN_TAG_VALUE: &str = "YES";
pub const ELIGIBLE_STATUS: &str = "available";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShutdownPolicy {
    tag_key: String,
    tag_value: String,
}

impl Default for ShutdownPolicy {
    fn default() -> Self {
        Self::new(SHUTDOWN_TAG_KEY, SHUTDOWN_TAG_VALUE)
    }
}

impl ShutdownPolicy {
    pub fn new(tag_key: &str, tag_value: &str) -> Self {
        Self {
            tag_key: tag_key.to_string(),
            tag_value: tag_value.to_string(),
        }
    }

    pub fn tag_key(&self) -> &str {
        &self.tag_key
    }

    pub fn tag_value(&self) -> &str {
        &self.tag_value
    }

    pub fn is_eligible(&self, instance: &DbInstanceDescriptor) -> bool {
        self.has_sentinel_tag(instance) && instance.status == ELIGIBLE_STATUS
    }

    fn has_sentinel_tag(&self, instance: &DbInstanceDescriptor) -> bool {
        instance.tag(&self.tag_key) == Some(self.tag_value.as_str())
    }
}

/// Eligibility under the default sentinel tag
pub fn is_eligible_for_shutdown(instance: &DbInstanceDescriptor) -> bool {
    ShutdownPolicy::default().is_eligible(instance)
}
