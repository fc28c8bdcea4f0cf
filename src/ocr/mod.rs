pub mod engine;
pub mod extract;
pub mod preprocess;

pub use engine::{ensure_tesseract, TesseractRecognizer, TextRecognizer};
pub use extract::parse_price;
pub use preprocess::{binarize_otsu, upscale_grayscale};

use anyhow::Result;
use image::{ImageBuffer, Rgba};

/// Upscale factor applied before recognition.
pub const OCR_SCALE: u32 = 2;

/// High-level function: captured crop -> price.
///
/// Preprocesses (grayscale, upscale, binarize), runs the recognizer and
/// parses the digits. `Ok(None)` means the engine ran but produced no
/// parseable number - a read failure for the caller, not an error.
pub fn read_price(
    recognizer: &dyn TextRecognizer,
    crop: &ImageBuffer<Rgba<u8>, Vec<u8>>,
) -> Result<Option<i64>> {
    let gray = upscale_grayscale(crop, OCR_SCALE);
    let binary = binarize_otsu(&gray);
    let text = recognizer.recognize_digits(&binary)?;
    Ok(parse_price(&text))
}
