//! Tree configuration.

use std::num::NonZeroUsize;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ConfigError;
use crate::spatial::Rect;

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct QuadTreeConfig {
    /// Maximum points per cell before it subdivides.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    #[serde(default)]
    pub root: RootConfig,
    #[serde(default)]
    pub demo: DemoConfig,
}

impl QuadTreeConfig {
    /// Load configuration from `path`, writing the defaults there if the file
    /// does not exist yet.
    pub fn load_or_create(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            let config: Self = toml::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else {
            info!("No {} found, creating default config", path.display());
            let default_config = Self::default();
            std::fs::write(path, toml::to_string_pretty(&default_config)?).map_err(|source| {
                ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            })?;
            Ok(default_config)
        }
    }

    /// Check every field that has a constrained range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.capacity()?;
        self.root_bounds()?;
        Ok(())
    }

    /// Split threshold as a non-zero count.
    pub fn capacity(&self) -> Result<NonZeroUsize, ConfigError> {
        NonZeroUsize::new(self.capacity).ok_or(ConfigError::ZeroCapacity)
    }

    /// Region covered by the root node.
    pub fn root_bounds(&self) -> Result<Rect, ConfigError> {
        let RootConfig {
            center_x,
            center_y,
            half_width,
            half_height,
        } = self.root;
        let extent_ok = |v: f32| v.is_finite() && v >= 0.0;
        if !center_x.is_finite()
            || !center_y.is_finite()
            || !extent_ok(half_width)
            || !extent_ok(half_height)
        {
            return Err(ConfigError::InvalidRoot {
                center_x,
                center_y,
                half_width,
                half_height,
            });
        }
        Ok(Rect::from_center(center_x, center_y, half_width, half_height))
    }
}

impl Default for QuadTreeConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            root: RootConfig::default(),
            demo: DemoConfig::default(),
        }
    }
}

fn default_capacity() -> usize {
    4
}

/// Region covered by the root node.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct RootConfig {
    #[serde(default)]
    pub center_x: f32,
    #[serde(default)]
    pub center_y: f32,
    #[serde(default = "default_half_extent")]
    pub half_width: f32,
    #[serde(default = "default_half_extent")]
    pub half_height: f32,
}

impl Default for RootConfig {
    fn default() -> Self {
        Self {
            center_x: 0.0,
            center_y: 0.0,
            half_width: default_half_extent(),
            half_height: default_half_extent(),
        }
    }
}

fn default_half_extent() -> f32 {
    500.0
}

/// Settings for the demo binary.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DemoConfig {
    /// Number of random points to scatter inside the root.
    #[serde(default = "default_demo_points")]
    pub points: usize,
    /// RNG seed. Unset means a fresh seed every run.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Fraction of each quadrant covered by the per-quadrant queries.
    #[serde(default = "default_query_shrink")]
    pub query_shrink: f32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            points: default_demo_points(),
            seed: None,
            query_shrink: default_query_shrink(),
        }
    }
}

fn default_demo_points() -> usize {
    1000
}
fn default_query_shrink() -> f32 {
    1.0
}
