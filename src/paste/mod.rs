//! Keystroke injection for writing the adjusted price.
//!
//! The price field is assumed to be focused (documented usage, not
//! enforced). The sequence is select-all then the decimal digits, so the
//! field ends up containing exactly the adjusted price. Injection goes
//! through SendInput, which simulates hardware-level input that the
//! game's input layer accepts.

use anyhow::{anyhow, Result};
use std::thread::sleep;
use std::time::Duration;

use windows::Win32::UI::Input::KeyboardAndMouse::{
    SendInput, INPUT, INPUT_0, INPUT_KEYBOARD, KEYBDINPUT, KEYEVENTF_KEYUP, VIRTUAL_KEY,
    VK_CONTROL,
};

/// Delay between injected key events. The game drops keystrokes that
/// arrive back-to-back.
const KEY_DELAY: Duration = Duration::from_millis(20);

/// Narrow capability interface over synthetic keyboard input.
pub trait InputInjector {
    /// Selects the full content of the focused field (Ctrl+A).
    fn select_all(&self) -> Result<()>;
    /// Types a run of decimal digits.
    fn type_digits(&self, digits: &str) -> Result<()>;
}

/// Replaces the focused field's content with the price.
pub fn paste_price(injector: &dyn InputInjector, price: i64) -> Result<()> {
    injector.select_all()?;
    injector.type_digits(&price.to_string())
}

/// Production injector backed by SendInput.
pub struct SendInputInjector;

impl InputInjector for SendInputInjector {
    fn select_all(&self) -> Result<()> {
        // Ctrl down, A, Ctrl up
        send_key(VK_CONTROL, false)?;
        sleep(KEY_DELAY);
        tap_key(VIRTUAL_KEY(0x41))?; // 'A'
        send_key(VK_CONTROL, true)?;
        sleep(KEY_DELAY);
        Ok(())
    }

    fn type_digits(&self, digits: &str) -> Result<()> {
        for c in digits.chars() {
            let d = c
                .to_digit(10)
                .ok_or_else(|| anyhow!("Not a digit: {:?}", c))?;
            // VK_0..VK_9 are 0x30..0x39
            tap_key(VIRTUAL_KEY(0x30 + d as u16))?;
            sleep(KEY_DELAY);
        }
        Ok(())
    }
}

/// Sends a single key-down or key-up event.
fn send_key(vk: VIRTUAL_KEY, up: bool) -> Result<()> {
    let input = INPUT {
        r#type: INPUT_KEYBOARD,
        Anonymous: INPUT_0 {
            ki: KEYBDINPUT {
                wVk: vk,
                dwFlags: if up { KEYEVENTF_KEYUP } else { Default::default() },
                ..Default::default()
            },
        },
    };

    let sent = unsafe { SendInput(&[input], std::mem::size_of::<INPUT>() as i32) };
    if sent != 1 {
        return Err(anyhow!("SendInput rejected key event for vk {:#x}", vk.0));
    }
    Ok(())
}

/// Presses and releases a key.
fn tap_key(vk: VIRTUAL_KEY) -> Result<()> {
    send_key(vk, false)?;
    sleep(KEY_DELAY);
    send_key(vk, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Records the injected sequence instead of touching the OS.
    struct FakeInjector {
        calls: RefCell<Vec<String>>,
    }

    impl FakeInjector {
        fn new() -> Self {
            Self { calls: RefCell::new(Vec::new()) }
        }
    }

    impl InputInjector for FakeInjector {
        fn select_all(&self) -> Result<()> {
            self.calls.borrow_mut().push("select_all".to_string());
            Ok(())
        }

        fn type_digits(&self, digits: &str) -> Result<()> {
            self.calls.borrow_mut().push(format!("type:{}", digits));
            Ok(())
        }
    }

    #[test]
    fn test_paste_selects_then_types() {
        let injector = FakeInjector::new();
        paste_price(&injector, 1249).unwrap();

        assert_eq!(
            *injector.calls.borrow(),
            vec!["select_all".to_string(), "type:1249".to_string()]
        );
    }

    #[test]
    fn test_paste_single_digit_price() {
        let injector = FakeInjector::new();
        paste_price(&injector, 1).unwrap();
        assert_eq!(injector.calls.borrow()[1], "type:1");
    }
}
