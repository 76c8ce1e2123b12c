use std::path::Path;

use anyhow::Context as _;

use crate::{
    foundation::{
        core::Viewport,
        error::{FaceError, FaceResult},
    },
    layout::engine::LayoutConfig,
    zones::table::ZoneTable,
};

/// Delays driving the reconstruction timeline, in logical milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimingConfig {
    /// Gap between a reconstruct request and segmenting.
    pub segment_delay_ms: u64,
    /// Gap between consecutive popup spawns in display order.
    pub spawn_stagger_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            segment_delay_ms: 100,
            spawn_stagger_ms: 30,
        }
    }
}

/// Top-level configuration of a [`crate::Stage`].
///
/// Every field has a default, so `{}` is a valid JSON config.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StageConfig {
    pub viewport: Viewport,
    pub layout: LayoutConfig,
    pub timing: TimingConfig,
    /// Fixed seed for shuffles and jitter; OS entropy when absent.
    pub seed: Option<u64>,
    /// Custom zone table; the 14-zone face table when absent.
    pub zones: Option<ZoneTable>,
}

impl StageConfig {
    pub fn from_json_str(json: &str) -> FaceResult<Self> {
        let cfg: StageConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> FaceResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> FaceResult<()> {
        self.viewport.validate()?;
        self.layout.validate()?;
        if let Some(zones) = &self.zones
            && zones.is_empty()
        {
            return Err(FaceError::validation("zone table must not be empty"));
        }
        Ok(())
    }

    pub fn zone_table(&self) -> ZoneTable {
        self.zones.clone().unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
