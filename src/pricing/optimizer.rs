//! Lot optimizer: picks the tier with the best effective unit price.
//!
//! Given the three tiers' OCR results (any of which may have failed),
//! normalizes each observed price to a per-unit basis and recommends the
//! cheapest tier. Failed tiers are simply excluded from the comparison.

use crate::config::LotTier;

/// The optimizer's pick for one invocation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LotRecommendation {
    pub tier: LotTier,
    /// The price as read from the screen, for the whole lot.
    pub raw_price: i64,
    /// `raw_price / lot_size`.
    pub unit_price: f64,
}

/// Selects the tier with the minimum unit price among successful reads.
///
/// Ties on unit price prefer the larger lot (fewer listings to manage).
/// Returns `None` when every tier failed to read.
pub fn pick_best_lot(readings: &[(LotTier, Option<i64>)]) -> Option<LotRecommendation> {
    let mut best: Option<LotRecommendation> = None;

    for &(tier, raw) in readings {
        let Some(raw_price) = raw else { continue };
        let unit_price = raw_price as f64 / tier.lot_size() as f64;

        let better = match &best {
            None => true,
            Some(current) => {
                unit_price < current.unit_price
                    || (unit_price == current.unit_price
                        && tier.lot_size() > current.tier.lot_size())
            }
        };

        if better {
            best = Some(LotRecommendation { tier, raw_price, unit_price });
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_three(p1: Option<i64>, p10: Option<i64>, p100: Option<i64>) -> Vec<(LotTier, Option<i64>)> {
        vec![
            (LotTier::One, p1),
            (LotTier::Ten, p10),
            (LotTier::Hundred, p100),
        ]
    }

    #[test]
    fn test_picks_minimum_unit_price() {
        // Unit prices: 100, 95, 9 -> lot 100 wins
        let pick = pick_best_lot(&all_three(Some(100), Some(950), Some(900))).unwrap();
        assert_eq!(pick.tier, LotTier::Hundred);
        assert_eq!(pick.raw_price, 900);
        assert_eq!(pick.unit_price, 9.0);
    }

    #[test]
    fn test_tie_prefers_larger_lot() {
        // Unit price 10 everywhere -> lot 100 wins the tie
        let pick = pick_best_lot(&all_three(Some(10), Some(100), Some(1000))).unwrap();
        assert_eq!(pick.tier, LotTier::Hundred);

        // Tie between 1 and 10 only
        let pick = pick_best_lot(&all_three(Some(10), Some(100), Some(2000))).unwrap();
        assert_eq!(pick.tier, LotTier::Ten);
    }

    #[test]
    fn test_failed_tier_is_excluded() {
        // Lot 100 would win on unit price but its read failed
        let pick = pick_best_lot(&all_three(Some(100), Some(950), None)).unwrap();
        assert_eq!(pick.tier, LotTier::Ten);
        assert_eq!(pick.unit_price, 95.0);
    }

    #[test]
    fn test_all_failed_yields_none() {
        assert!(pick_best_lot(&all_three(None, None, None)).is_none());
    }

    #[test]
    fn test_single_successful_read_wins() {
        let pick = pick_best_lot(&all_three(None, Some(500), None)).unwrap();
        assert_eq!(pick.tier, LotTier::Ten);
        assert_eq!(pick.raw_price, 500);
    }
}
