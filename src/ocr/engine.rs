//! Text recognition interface and the Tesseract implementation.
//!
//! The helper only ever reads digits, so the capability surface is a
//! single method. Production uses a Tesseract subprocess; tests substitute
//! fakes implementing the same trait.

use anyhow::{anyhow, Result};
use image::GrayImage;
use std::path::PathBuf;
use std::process::Command;
use tempfile::NamedTempFile;

use crate::log;

/// Digit-oriented OCR over a preprocessed grayscale image.
pub trait TextRecognizer {
    /// Returns whatever text the engine recognized. The caller strips
    /// non-digits; the engine is merely configured to favor digits.
    fn recognize_digits(&self, img: &GrayImage) -> Result<String>;
}

/// Runs the Tesseract executable with a digit whitelist.
///
/// The install is looked up per call, so a Tesseract dropped in after
/// startup works without restarting the helper.
pub struct TesseractRecognizer;

impl TextRecognizer for TesseractRecognizer {
    fn recognize_digits(&self, img: &GrayImage) -> Result<String> {
        let executable = find_tesseract_executable()?;
        let tessdata = find_tessdata_dir();

        // Tesseract reads from a file, so round-trip through a temp PNG.
        let temp_input = NamedTempFile::with_suffix(".png")?;
        img.save(temp_input.path())?;

        let mut command = Command::new(&executable);
        command
            .arg(temp_input.path())
            .arg("stdout")
            .arg("--psm")
            .arg("6") // Assume single uniform block of text
            .arg("-c")
            .arg("tessedit_char_whitelist=0123456789");
        if let Some(tessdata) = &tessdata {
            command.arg("--tessdata-dir").arg(tessdata);
        }

        let output = command.output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!("Tesseract failed: {}", stderr));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

/// Checks that a Tesseract install is reachable. Call at startup so a
/// missing install is reported before the first hotkey press.
pub fn ensure_tesseract() -> Result<()> {
    let executable = find_tesseract_executable()?;
    log(&format!("Tesseract found at: {}", executable.display()));
    Ok(())
}

/// Finds the Tesseract executable: user-local dir first, then PATH, then
/// the standard install locations.
fn find_tesseract_executable() -> Result<PathBuf> {
    let local_exe = get_tesseract_dir().join("tesseract.exe");
    if local_exe.exists() {
        return Ok(local_exe);
    }

    // Check PATH
    if let Ok(output) = Command::new("tesseract").arg("--version").output() {
        if output.status.success() {
            return Ok(PathBuf::from("tesseract"));
        }
    }

    // Check common installation paths
    let common_paths = [
        r"C:\Program Files\Tesseract-OCR\tesseract.exe",
        r"C:\Program Files (x86)\Tesseract-OCR\tesseract.exe",
    ];

    for path in &common_paths {
        let p = PathBuf::from(path);
        if p.exists() {
            return Ok(p);
        }
    }

    Err(anyhow!(
        "Tesseract not found. Install Tesseract-OCR (UB-Mannheim build) or \
         add it to PATH, then restart the helper."
    ))
}

/// Finds a tessdata directory if one is discoverable. `None` lets
/// Tesseract use whatever its install defaults to.
fn find_tessdata_dir() -> Option<PathBuf> {
    let local_tessdata = get_tesseract_dir().join("tessdata");
    if local_tessdata.join("eng.traineddata").exists() {
        return Some(local_tessdata);
    }

    let system_paths = [
        r"C:\Program Files\Tesseract-OCR\tessdata",
        r"C:\Program Files (x86)\Tesseract-OCR\tessdata",
    ];
    for path in &system_paths {
        let p = PathBuf::from(path);
        if p.join("eng.traineddata").exists() {
            return Some(p);
        }
    }

    if let Ok(prefix) = std::env::var("TESSDATA_PREFIX") {
        let p = PathBuf::from(&prefix);
        if p.join("eng.traineddata").exists() {
            return Some(p);
        }
        let p = p.join("tessdata");
        if p.join("eng.traineddata").exists() {
            return Some(p);
        }
    }

    None
}

/// Returns the user-local directory for a manually dropped-in Tesseract.
fn get_tesseract_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("dofus-price-helper")
        .join("tesseract")
}
