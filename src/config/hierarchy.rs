//! Hierarchy size configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::ahp::{HierarchyLimits, MAX_ENTITIES, MIN_ENTITIES};

/// Bounds on criteria and alternative counts
#[derive(Debug, Clone, Deserialize)]
pub struct HierarchyConfig {
    #[serde(default = "default_min_entities")]
    pub min_entities: usize,

    #[serde(default = "default_max_entities")]
    pub max_entities: usize,
}

impl HierarchyConfig {
    pub fn limits(&self) -> HierarchyLimits {
        HierarchyLimits {
            min_entities: self.min_entities,
            max_entities: self.max_entities,
        }
    }

    /// Validate hierarchy configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.min_entities < MIN_ENTITIES
            || self.min_entities > self.max_entities
            || self.max_entities > MAX_ENTITIES
        {
            return Err(ValidationError::InvalidEntityLimits);
        }
        Ok(())
    }
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self {
            min_entities: default_min_entities(),
            max_entities: default_max_entities(),
        }
    }
}

fn default_min_entities() -> usize {
    MIN_ENTITIES
}

fn default_max_entities() -> usize {
    MAX_ENTITIES
}
