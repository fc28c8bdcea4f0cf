//! Dofus Price Helper
//!
//! A Windows helper for the marketplace sell dialog: global hotkeys read
//! a lot's price off the screen via OCR, undercut it, and type the result
//! into the focused price field.
//!
//! Hotkeys:
//!   F1 / F2 / F3    read & paste the price for lots of 1 / 10 / 100
//!   F4              read all three, paste the undercut of the best lot
//!   Ctrl+Alt+F1-F3  calibrate a lot's price region at the pointer
//!   Ctrl+Shift+P    dump what the three regions currently read
//!   Ctrl+Shift+M    show the pointer position
//!   Esc             quit

use anyhow::Result;
use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;

mod app;
mod calibration;
mod capture;
mod config;
mod error;
mod hotkeys;
mod ocr;
mod paste;
mod paths;
mod pricing;

use app::App;
use config::HelperConfig;
use hotkeys::HotkeyAction;
use ocr::TesseractRecognizer;
use paste::SendInputInjector;

/// Logs a message to both console and log file with timestamp.
pub fn log(msg: &str) {
    let timestamp = Local::now().format("%H:%M:%S%.3f");
    let line = format!("[{}] {}\n", timestamp, msg);
    print!("{}", line);
    let log_path = paths::get_logs_dir().join("price_helper.log");
    if let Ok(mut file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        let _ = file.write_all(line.as_bytes());
    }
}

fn main() -> Result<()> {
    // Log panics before the process dies
    std::panic::set_hook(Box::new(|panic_info| {
        let msg = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        let location = if let Some(loc) = panic_info.location() {
            format!(" at {}:{}:{}", loc.file(), loc.line(), loc.column())
        } else {
            String::new()
        };
        let log_msg = format!("[PANIC]{} {}\n", location, msg);
        eprintln!("{}", log_msg);
        if let Ok(exe_dir) = std::env::current_exe().map(|p| p.parent().unwrap().to_path_buf()) {
            let log_path = exe_dir.join("logs").join("price_helper.log");
            if let Ok(mut file) = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_path)
            {
                use std::io::Write;
                let _ = file.write_all(log_msg.as_bytes());
            }
        }
    }));

    paths::ensure_directories()?;

    // A missing Tesseract is reported up front but is not fatal:
    // calibration still works, reads will fail with a clear message.
    if let Err(e) = ocr::ensure_tesseract() {
        log(&format!("Warning: {}", e));
    }

    let config_path = paths::get_config_path();
    let config = HelperConfig::load(&config_path);
    let calibrated = config.regions.calibrated_tiers();
    if calibrated.is_empty() {
        log("No calibrated regions yet. Point at a price and press Ctrl+Alt+F1/F2/F3.");
    } else {
        log(&format!(
            "Calibrated lots: {}",
            calibrated
                .iter()
                .map(|t| t.label())
                .collect::<Vec<_>>()
                .join(", ")
        ));
    }

    // Hotkey registration failure at startup is the one fatal error.
    let actions = hotkeys::spawn_listener()?;

    log("Dofus Price Helper started");
    log("Hotkeys: F1/F2/F3 read & paste lot 1/10/100, F4 optimize");
    log("         Ctrl+Alt+F1/F2/F3 calibrate, Ctrl+Shift+P dump prices");
    log("         Ctrl+Shift+M pointer position, Esc quit");

    let mut app = App::new(
        config,
        config_path,
        Box::new(TesseractRecognizer),
        Box::new(SendInputInjector),
    );

    // Single consumer: each action runs to completion before the next
    // one is taken off the queue, so handlers never overlap.
    for action in actions {
        if action == HotkeyAction::Quit {
            log("Exit hotkey pressed");
            break;
        }
        app.handle(action);
    }

    log("Bye");
    Ok(())
}
