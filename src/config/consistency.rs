//! Consistency check configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::ahp::{
    ConsistencyChecker, ConsistencyThresholds, RandomIndexPolicy, ACCEPTABLE_THRESHOLD,
    CONSISTENT_THRESHOLD,
};

/// Consistency classification settings
#[derive(Debug, Clone, Deserialize)]
pub struct ConsistencyConfig {
    /// CR below this is "Consistent"
    #[serde(default = "default_consistent_threshold")]
    pub consistent_threshold: f64,

    /// CR below this is "Acceptable"
    #[serde(default = "default_acceptable_threshold")]
    pub acceptable_threshold: f64,

    /// Behavior for matrices larger than the random index table
    #[serde(default)]
    pub random_index_policy: RandomIndexPolicy,
}

impl ConsistencyConfig {
    pub fn thresholds(&self) -> ConsistencyThresholds {
        ConsistencyThresholds {
            consistent: self.consistent_threshold,
            acceptable: self.acceptable_threshold,
        }
    }

    /// Builds the checker these settings describe
    pub fn checker(&self) -> ConsistencyChecker {
        ConsistencyChecker::new(self.thresholds(), self.random_index_policy)
    }

    /// Validate consistency configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let ordered = self.consistent_threshold > 0.0
            && self.consistent_threshold < self.acceptable_threshold
            && self.acceptable_threshold <= 1.0;
        if !ordered {
            return Err(ValidationError::InvalidThresholds);
        }
        Ok(())
    }
}

impl Default for ConsistencyConfig {
    fn default() -> Self {
        Self {
            consistent_threshold: default_consistent_threshold(),
            acceptable_threshold: default_acceptable_threshold(),
            random_index_policy: RandomIndexPolicy::default(),
        }
    }
}

fn default_consistent_threshold() -> f64 {
    CONSISTENT_THRESHOLD
}

fn default_acceptable_threshold() -> f64 {
    ACCEPTABLE_THRESHOLD
}
