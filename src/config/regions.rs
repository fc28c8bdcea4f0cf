//! Calibrated screen regions for the three lot tiers.
//!
//! Each tier (lot of 1, 10 or 100) has an optional rectangle in absolute
//! screen coordinates where its price is displayed. Regions are written by
//! calibration and read by the price reader; a missing region means the
//! tier has never been calibrated.

use serde::{Deserialize, Serialize};

/// A marketplace lot size. The Dofus sell dialog lists the same item in
/// batches of 1, 10 and 100 units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LotTier {
    #[serde(rename = "1")]
    One,
    #[serde(rename = "10")]
    Ten,
    #[serde(rename = "100")]
    Hundred,
}

impl LotTier {
    /// All tiers, smallest lot first.
    pub const ALL: [LotTier; 3] = [LotTier::One, LotTier::Ten, LotTier::Hundred];

    /// Number of units in the lot.
    pub fn lot_size(self) -> i64 {
        match self {
            LotTier::One => 1,
            LotTier::Ten => 10,
            LotTier::Hundred => 100,
        }
    }

    /// Display label ("1", "10", "100").
    pub fn label(self) -> &'static str {
        match self {
            LotTier::One => "1",
            LotTier::Ten => "10",
            LotTier::Hundred => "100",
        }
    }

    /// The calibration hotkey bound to this tier.
    pub fn calibrate_hotkey(self) -> &'static str {
        match self {
            LotTier::One => "Ctrl+Alt+F1",
            LotTier::Ten => "Ctrl+Alt+F2",
            LotTier::Hundred => "Ctrl+Alt+F3",
        }
    }
}

impl std::fmt::Display for LotTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A screen rectangle in absolute pixel coordinates.
///
/// The origin may be negative on multi-monitor setups. Width and height are
/// the shared capture-box dimensions; only the origin varies per tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Per-tier calibrated regions. `None` = uncalibrated.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RegionStore {
    #[serde(default)]
    pub lot_1: Option<Region>,
    #[serde(default)]
    pub lot_10: Option<Region>,
    #[serde(default)]
    pub lot_100: Option<Region>,
}

impl RegionStore {
    /// Returns the calibrated region for a tier, if any.
    pub fn get(&self, tier: LotTier) -> Option<Region> {
        match tier {
            LotTier::One => self.lot_1,
            LotTier::Ten => self.lot_10,
            LotTier::Hundred => self.lot_100,
        }
    }

    /// Records (or overwrites) the region for a tier.
    pub fn set(&mut self, tier: LotTier, region: Region) {
        match tier {
            LotTier::One => self.lot_1 = Some(region),
            LotTier::Ten => self.lot_10 = Some(region),
            LotTier::Hundred => self.lot_100 = Some(region),
        }
    }

    /// Tiers that have a calibrated region.
    pub fn calibrated_tiers(&self) -> Vec<LotTier> {
        LotTier::ALL
            .into_iter()
            .filter(|&t| self.get(t).is_some())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_set_get_roundtrip() {
        let mut store = RegionStore::default();
        assert!(store.get(LotTier::Ten).is_none());

        let region = Region { x: 360, y: 290, width: 80, height: 20 };
        store.set(LotTier::Ten, region);

        assert_eq!(store.get(LotTier::Ten), Some(region));
        assert!(store.get(LotTier::One).is_none());
        assert_eq!(store.calibrated_tiers(), vec![LotTier::Ten]);
    }

    #[test]
    fn test_set_overwrites_previous_calibration() {
        let mut store = RegionStore::default();
        store.set(LotTier::One, Region { x: 0, y: 0, width: 150, height: 40 });
        store.set(LotTier::One, Region { x: 5, y: 5, width: 150, height: 40 });

        assert_eq!(store.get(LotTier::One).unwrap().x, 5);
    }

    #[test]
    fn test_lot_sizes() {
        assert_eq!(LotTier::One.lot_size(), 1);
        assert_eq!(LotTier::Ten.lot_size(), 10);
        assert_eq!(LotTier::Hundred.lot_size(), 100);
    }
}
