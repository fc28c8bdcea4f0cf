//! Error taxonomy for hotkey actions.
//!
//! Every variant is handled locally: the current action logs the message
//! and aborts, the process keeps running. Nothing here retries.

use thiserror::Error;

use crate::config::LotTier;

#[derive(Debug, Error)]
pub enum HelperError {
    /// The tier has no calibrated region; OCR is never attempted.
    #[error("Lot {0} is not calibrated. Point at the price and press {key}.", key = .0.calibrate_hotkey())]
    Uncalibrated(LotTier),

    /// OCR ran but produced no parseable number for the tier.
    #[error("No price could be read for lot {0}")]
    ReadFailure(LotTier),

    /// Every tier failed during an optimizer run; nothing is pasted.
    #[error("No lot produced a readable price; calibrate or retry")]
    AllReadsFailed,

    /// Capture, OCR subprocess or input plumbing failed.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
