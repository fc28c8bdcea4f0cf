//! Hotkey handlers: the glue between the store, capture, OCR, pricing and
//! the paster.
//!
//! Handlers run on the dispatch loop's thread, one at a time, to
//! completion. Every failure is logged and aborts only the current
//! action.

use std::path::PathBuf;

use crate::calibration;
use crate::capture;
use crate::config::{HelperConfig, LotTier};
use crate::error::HelperError;
use crate::hotkeys::HotkeyAction;
use crate::log;
use crate::ocr::{self, TextRecognizer};
use crate::paste::{paste_price, InputInjector};
use crate::pricing::{compute_undercut, pick_best_lot};

pub struct App {
    config: HelperConfig,
    config_path: PathBuf,
    recognizer: Box<dyn TextRecognizer>,
    injector: Box<dyn InputInjector>,
}

impl App {
    pub fn new(
        config: HelperConfig,
        config_path: PathBuf,
        recognizer: Box<dyn TextRecognizer>,
        injector: Box<dyn InputInjector>,
    ) -> Self {
        Self { config, config_path, recognizer, injector }
    }

    /// Runs one hotkey action to completion. Errors are logged, never
    /// propagated: the helper stays alive for the next hotkey.
    pub fn handle(&mut self, action: HotkeyAction) {
        let result = match action {
            HotkeyAction::ReadPaste(tier) => self.read_and_paste(tier),
            HotkeyAction::Optimize => self.optimize_and_paste(),
            HotkeyAction::Calibrate(tier) => self.calibrate(tier),
            HotkeyAction::DumpPrices => self.dump_prices(),
            HotkeyAction::ShowPointer => self.show_pointer(),
            // Quit is consumed by the dispatch loop before reaching here
            HotkeyAction::Quit => Ok(()),
        };

        if let Err(e) = result {
            log(&format!("{}", e));
        }
    }

    /// Reads one tier's price from its calibrated region.
    fn read_tier(&self, tier: LotTier) -> Result<i64, HelperError> {
        let region = self
            .config
            .regions
            .get(tier)
            .ok_or(HelperError::Uncalibrated(tier))?;

        let crop = capture::grab_region(&region)?;

        if self.config.debug_captures {
            match capture::save_debug_capture(&crop, tier) {
                Ok(path) => log(&format!("Saved capture: {}", path.display())),
                Err(e) => log(&format!("Could not save debug capture: {}", e)),
            }
        }

        ocr::read_price(self.recognizer.as_ref(), &crop)?
            .ok_or(HelperError::ReadFailure(tier))
    }

    /// F1/F2/F3: read, undercut, paste.
    fn read_and_paste(&self, tier: LotTier) -> Result<(), HelperError> {
        let raw = self.read_tier(tier)?;
        let adjusted = compute_undercut(raw, &self.config.undercut);
        log(&format!("Lot {}: read {} -> undercut {}", tier, raw, adjusted));
        self.paste(adjusted)
    }

    /// F4: read every tier, pick the best unit price, undercut, paste.
    /// A failed tier is excluded from the comparison; all three failing
    /// aborts with no paste.
    fn optimize_and_paste(&self) -> Result<(), HelperError> {
        let readings: Vec<(LotTier, Option<i64>)> = LotTier::ALL
            .into_iter()
            .map(|tier| {
                let price = match self.read_tier(tier) {
                    Ok(price) => Some(price),
                    Err(e) => {
                        log(&format!("Optimizer: skipping lot {}: {}", tier, e));
                        None
                    }
                };
                (tier, price)
            })
            .collect();

        let pick = pick_best_lot(&readings).ok_or(HelperError::AllReadsFailed)?;
        let adjusted = compute_undercut(pick.raw_price, &self.config.undercut);
        log(&format!(
            "Optimizer: lot {} wins at {:.2}/unit (read {}) -> undercut {}",
            pick.tier, pick.unit_price, pick.raw_price, adjusted
        ));
        self.paste(adjusted)
    }

    fn paste(&self, price: i64) -> Result<(), HelperError> {
        if !self.config.auto_paste {
            log(&format!("Auto-paste off; price {} not injected", price));
            return Ok(());
        }
        paste_price(self.injector.as_ref(), price)?;
        Ok(())
    }

    /// Ctrl+Alt+F1/F2/F3: record the capture box and persist it.
    fn calibrate(&mut self, tier: LotTier) -> Result<(), HelperError> {
        calibration::calibrate_tier(&mut self.config, &self.config_path, tier)?;
        Ok(())
    }

    /// Ctrl+Shift+P: log what every region currently reads.
    fn dump_prices(&self) -> Result<(), HelperError> {
        for tier in LotTier::ALL {
            match self.read_tier(tier) {
                Ok(raw) => {
                    let adjusted = compute_undercut(raw, &self.config.undercut);
                    log(&format!("Lot {}: {} -> {}", tier, raw, adjusted));
                }
                Err(e) => log(&format!("Lot {}: {}", tier, e)),
            }
        }
        Ok(())
    }

    /// Ctrl+Shift+M: log the pointer position.
    fn show_pointer(&self) -> Result<(), HelperError> {
        let (x, y) = calibration::get_cursor_position()?;
        log(&format!("Pointer: x={} y={}", x, y));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use image::GrayImage;

    struct UnreachableRecognizer;

    impl TextRecognizer for UnreachableRecognizer {
        fn recognize_digits(&self, _img: &GrayImage) -> Result<String> {
            panic!("OCR must not run for uncalibrated tiers");
        }
    }

    struct UnreachableInjector;

    impl InputInjector for UnreachableInjector {
        fn select_all(&self) -> Result<()> {
            panic!("nothing may be pasted");
        }
        fn type_digits(&self, _digits: &str) -> Result<()> {
            panic!("nothing may be pasted");
        }
    }

    fn uncalibrated_app() -> App {
        App::new(
            HelperConfig::default(),
            PathBuf::from("unused.json"),
            Box::new(UnreachableRecognizer),
            Box::new(UnreachableInjector),
        )
    }

    #[test]
    fn test_uncalibrated_tier_reports_configuration_error() {
        let app = uncalibrated_app();
        match app.read_tier(LotTier::Ten) {
            Err(HelperError::Uncalibrated(tier)) => assert_eq!(tier, LotTier::Ten),
            other => panic!("expected Uncalibrated, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_optimize_with_no_calibrated_tier_is_all_reads_failed_and_no_paste() {
        let app = uncalibrated_app();
        match app.optimize_and_paste() {
            Err(HelperError::AllReadsFailed) => {}
            other => panic!("expected AllReadsFailed, got {:?}", other.map(|_| ())),
        }
    }
}
