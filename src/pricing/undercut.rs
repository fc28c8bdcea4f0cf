//! Undercut computation.
//!
//! Pure arithmetic: observed price in, adjusted price out. Nothing here
//! touches the screen or the config file, so everything is unit tested.

use crate::config::{Rounding, UndercutMode, UndercutSettings};

/// Applies the undercut rule and rounding to an observed price.
///
/// Fixed mode subtracts `value` kamas; percent mode scales by
/// `1 - value/100` and rounds half away from zero. The result is then
/// rounded per the configured rule and clamped so it can never go below
/// the configured minimum (and never below 1, whatever the config says).
pub fn compute_undercut(raw: i64, settings: &UndercutSettings) -> i64 {
    let adjusted = match settings.mode {
        UndercutMode::Fixed => raw - settings.value as i64,
        UndercutMode::Percent => {
            (raw as f64 * (1.0 - settings.value / 100.0)).round() as i64
        }
    };

    let rounded = apply_rounding(adjusted, settings.rounding);
    rounded.max(settings.min_price.max(1))
}

/// Applies the configured rounding rule.
///
/// `End9` may round up (1243 -> 1249); the down variants only round down.
fn apply_rounding(price: i64, rounding: Rounding) -> i64 {
    match rounding {
        Rounding::None => price,
        Rounding::Down10 => (price / 10) * 10,
        Rounding::Down100 => (price / 100) * 100,
        Rounding::End9 => ((price / 10) * 10 + 9).max(9),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UndercutSettings;

    fn fixed(value: f64) -> UndercutSettings {
        UndercutSettings {
            mode: UndercutMode::Fixed,
            value,
            rounding: Rounding::None,
            min_price: 1,
        }
    }

    fn percent(value: f64) -> UndercutSettings {
        UndercutSettings {
            mode: UndercutMode::Percent,
            value,
            rounding: Rounding::None,
            min_price: 1,
        }
    }

    #[test]
    fn test_fixed_subtracts_value() {
        assert_eq!(compute_undercut(1000, &fixed(1.0)), 999);
        assert_eq!(compute_undercut(1000, &fixed(50.0)), 950);
    }

    #[test]
    fn test_percent_scales_and_rounds() {
        // 1000 * 0.99 = 990
        assert_eq!(compute_undercut(1000, &percent(1.0)), 990);
        // 333 * 0.95 = 316.35 -> 316
        assert_eq!(compute_undercut(333, &percent(5.0)), 316);
        // 250 * 0.90 = 225
        assert_eq!(compute_undercut(250, &percent(10.0)), 225);
    }

    #[test]
    fn test_clamps_to_minimum_of_one() {
        assert_eq!(compute_undercut(1, &fixed(1.0)), 1);
        assert_eq!(compute_undercut(5, &fixed(100.0)), 1);
        assert_eq!(compute_undercut(3, &percent(100.0)), 1);
    }

    #[test]
    fn test_clamps_to_configured_minimum() {
        let mut settings = fixed(500.0);
        settings.min_price = 10;
        assert_eq!(compute_undercut(400, &settings), 10);
    }

    #[test]
    fn test_nonpositive_min_price_still_floors_at_one() {
        let mut settings = fixed(100.0);
        settings.min_price = 0;
        assert_eq!(compute_undercut(50, &settings), 1);
    }

    #[test]
    fn test_rounding_down_10() {
        let mut settings = fixed(1.0);
        settings.rounding = Rounding::Down10;
        assert_eq!(compute_undercut(1248, &settings), 1240);
        assert_eq!(compute_undercut(1241, &settings), 1240);
    }

    #[test]
    fn test_rounding_down_100() {
        let mut settings = fixed(1.0);
        settings.rounding = Rounding::Down100;
        assert_eq!(compute_undercut(1248, &settings), 1200);
    }

    #[test]
    fn test_rounding_end_9() {
        let mut settings = fixed(1.0);
        settings.rounding = Rounding::End9;
        // 1244 - 1 = 1243 -> 1249
        assert_eq!(compute_undercut(1244, &settings), 1249);
        // Tiny prices floor at 9
        assert_eq!(compute_undercut(4, &settings), 9);
    }
}
