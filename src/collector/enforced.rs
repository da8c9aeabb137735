//! Enforced Configuration
//!
//! Single-assignment handle to the aggregate configuration. The collector
//! creates it, hands clones to every generator task at construction, and
//! publishes into it exactly once. Readers see either nothing or the final
//! value.

use std::sync::{Arc, OnceLock};

use crate::types::{AggregateConfiguration, DocfoldError, Result};

/// Property name reported when a task reads before publication
const PROPERTY: &str = "enforcedConfiguration";

#[derive(Debug, Clone, Default)]
pub struct EnforcedConfiguration {
    cell: Arc<OnceLock<AggregateConfiguration>>,
}

impl EnforcedConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish the aggregate. A second publication is rejected.
    pub fn publish(&self, configuration: AggregateConfiguration) -> Result<()> {
        self.cell
            .set(configuration)
            .map_err(|_| DocfoldError::AlreadyPublished)
    }

    /// The published aggregate, or `MissingValue` before publication
    pub fn get(&self) -> Result<&AggregateConfiguration> {
        self.cell.get().ok_or_else(|| DocfoldError::missing(PROPERTY))
    }

    pub fn is_published(&self) -> bool {
        self.cell.get().is_some()
    }
}
