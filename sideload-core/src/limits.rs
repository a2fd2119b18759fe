//! Security limits and configuration

use crate::error::{PathError, Result};

/// Limits applied to property paths and input graphs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum property path length in characters (default: 1,024, hard: 8,192)
    pub max_path_length: usize,
    /// Maximum number of segments per path (default: 32, hard: 256)
    pub max_path_segments: usize,
    /// Maximum container nesting depth of an input graph (default: 128, hard: 1,024)
    pub max_nesting_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_path_length: 1_024,
            max_path_segments: 32,
            max_nesting_depth: 128,
        }
    }
}

impl Limits {
    /// Hard maximum limits that cannot be exceeded
    pub fn hard_maximums() -> Self {
        Self {
            max_path_length: 8_192,
            max_path_segments: 256,
            max_nesting_depth: 1_024,
        }
    }

    /// Validate limits against hard maximums
    pub fn validate(&self) -> Result<()> {
        let hard = Self::hard_maximums();

        let checks = [
            ("max_path_length", self.max_path_length, hard.max_path_length),
            (
                "max_path_segments",
                self.max_path_segments,
                hard.max_path_segments,
            ),
            (
                "max_nesting_depth",
                self.max_nesting_depth,
                hard.max_nesting_depth,
            ),
        ];

        for (name, value, max) in checks {
            if value > max {
                return Err(PathError::ConfigurationExceedsHardLimits {
                    reason: format!("{} {} exceeds hard limit {}", name, value, max),
                    max_path_length: hard.max_path_length,
                    max_path_segments: hard.max_path_segments,
                    max_nesting_depth: hard.max_nesting_depth,
                });
            }
        }

        Ok(())
    }
}
