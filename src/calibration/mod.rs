//! Region calibration.
//!
//! The operator points the mouse at the center of a lot's price and hits
//! the calibration hotkey; the capture box derived from that position is
//! stored and persisted immediately.

pub mod coords;

pub use coords::{get_cursor_position, region_at};

use anyhow::Result;
use std::path::Path;

use crate::config::{HelperConfig, LotTier, Region};

/// Calibrates one tier from the current pointer position and saves the
/// config. Returns the recorded region.
pub fn calibrate_tier(
    config: &mut HelperConfig,
    config_path: &Path,
    tier: LotTier,
) -> Result<Region> {
    let (x, y) = get_cursor_position()?;
    let region = region_at(x, y, config.price_w, config.row_h);
    config.regions.set(tier, region);
    config.save(config_path)?;
    crate::log(&format!(
        "Calibrated lot {}: x={} y={} {}x{}",
        tier, region.x, region.y, region.width, region.height
    ));
    Ok(region)
}
